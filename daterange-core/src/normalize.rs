//! Date normalization.
//!
//! Parses the loosely formatted date text that reaches us from date inputs and
//! host rows, and encodes calendar dates the way the host stores them for each
//! field type.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::field::{FieldType, Granularity};

/// Textual fallbacks tried after the numeric forms.
const GENERIC_FORMATS: [&str; 4] = ["%d %b %Y", "%b %d, %Y", "%b %d %Y", "%A, %B %d, %Y"];

/// Parse a date written in any of the forms users or the host produce.
///
/// Accepted, in order:
/// - compact host form `YYYYMMDD` (longer `YYYYMMDDHH…` values resolve to their day)
/// - year-first `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD`, optionally followed by a time
/// - `A/B/YYYY` with `/`, `.` or `-` separators
/// - RFC 3339, RFC 2822 and textual month forms such as `15 Jan 2023`
///
/// For `A/B/YYYY`, a first group above 12 can only be a day, so the input is
/// read European style (`DD/MM/YYYY`). Otherwise it is read US style
/// (`MM/DD/YYYY`). Inputs like `03/04/2023` are genuinely ambiguous and this
/// is a guess.
pub fn parse_flexible_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    parse_compact(text)
        .or_else(|| parse_year_first(text))
        .or_else(|| parse_day_month_groups(text))
        .or_else(|| parse_generic(text))
}

/// `YYYYMMDD`, plus the hour and second encodings which share that prefix.
fn parse_compact(text: &str) -> Option<NaiveDate> {
    if !matches!(text.len(), 8 | 10 | 12 | 14) || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = text[0..4].parse().ok()?;
    let month = text[4..6].parse().ok()?;
    let day = text[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn split_date_groups(text: &str) -> Option<[&str; 3]> {
    let sep = text.chars().find(|c| matches!(c, '-' | '/' | '.'))?;
    let mut parts = text.split(sep);
    let groups = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    if groups
        .iter()
        .any(|g| g.is_empty() || !g.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    Some(groups)
}

fn parse_year_first(text: &str) -> Option<NaiveDate> {
    // Drop a trailing time part ("2023-01-15T10:00:00", "2023-01-15 10:00")
    let date_part = text.split(['T', ' ']).next()?;
    let [y, m, d] = split_date_groups(date_part)?;
    if y.len() != 4 || m.len() > 2 || d.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, d.parse().ok()?)
}

fn parse_day_month_groups(text: &str) -> Option<NaiveDate> {
    let [a, b, y] = split_date_groups(text)?;
    if y.len() != 4 || a.len() > 2 || b.len() > 2 {
        return None;
    }
    let first: u32 = a.parse().ok()?;
    let second: u32 = b.parse().ok()?;
    let year: i32 = y.parse().ok()?;

    let (month, day) = if first > 12 {
        (second, first)
    } else {
        (first, second)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_generic(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    GENERIC_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

/// Encode a date as the host stores it for `field_type`.
///
/// Week fields are encoded at day level; this is not an ISO week value.
/// Matching against week data goes through [`comparable_for_value`] instead.
pub fn format_for_field(date: NaiveDate, field_type: FieldType) -> String {
    match field_type.granularity() {
        Granularity::Day | Granularity::Week => date.format("%Y%m%d").to_string(),
        Granularity::Month => date.format("%Y%m").to_string(),
        Granularity::Quarter => format!("{:04}Q{}", date.year(), quarter(date)),
        Granularity::Year => format!("{:04}", date.year()),
    }
}

/// Calendar quarter, 1-4.
pub fn quarter(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

/// Project a date onto an integer ordered at the field's granularity.
pub fn comparable_for_date(date: NaiveDate, field_type: FieldType) -> i64 {
    let year = i64::from(date.year());
    match field_type.granularity() {
        Granularity::Day => year * 10_000 + i64::from(date.month()) * 100 + i64::from(date.day()),
        Granularity::Week => {
            let week = date.iso_week();
            i64::from(week.year()) * 100 + i64::from(week.week())
        }
        Granularity::Month => year * 100 + i64::from(date.month()),
        Granularity::Quarter => year * 10 + i64::from(quarter(date)),
        Granularity::Year => year,
    }
}

/// Project a raw host value onto the same integer scale as [`comparable_for_date`].
///
/// Returns `None` when the value is not a valid encoding for the field type.
pub fn comparable_for_value(raw: &str, field_type: FieldType) -> Option<i64> {
    let raw = raw.trim();
    let native = match field_type.granularity() {
        Granularity::Day => parse_compact(raw).map(|d| comparable_for_date(d, field_type)),
        Granularity::Week => parse_year_and_unit(raw, 6, 1..=53).map(|(y, w)| y * 100 + w),
        Granularity::Month => parse_year_and_unit(raw, 6, 1..=12).map(|(y, m)| y * 100 + m),
        Granularity::Quarter => raw
            .split_once(['Q', 'q'])
            .filter(|(y, q)| y.len() == 4 && q.len() == 1)
            .and_then(|(y, q)| {
                let year: i64 = y.parse().ok()?;
                let q: i64 = q.parse().ok()?;
                (1..=4).contains(&q).then_some(year * 10 + q)
            }),
        Granularity::Year => (raw.len() == 4)
            .then(|| raw.parse::<i64>().ok())
            .flatten(),
    };

    native.or_else(|| parse_flexible_date(raw).map(|d| comparable_for_date(d, field_type)))
}

/// `YYYYNN` where NN must fall in `unit_range`.
fn parse_year_and_unit(
    raw: &str,
    len: usize,
    unit_range: std::ops::RangeInclusive<i64>,
) -> Option<(i64, i64)> {
    if raw.len() != len || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = raw[0..4].parse().ok()?;
    let unit = raw[4..].parse().ok()?;
    unit_range.contains(&unit).then_some((year, unit))
}

/// Render a date the way a date input holds its value.
pub fn to_input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // --- parse_flexible_date ---

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_flexible_date("2023-01-15"), Some(date(2023, 1, 15)));
        assert_eq!(parse_flexible_date("2023/1/5"), Some(date(2023, 1, 5)));
        assert_eq!(parse_flexible_date("2023.12.31"), Some(date(2023, 12, 31)));
        assert_eq!(parse_flexible_date("  2023-01-15  "), Some(date(2023, 1, 15)));
    }

    #[test]
    fn parses_iso_with_time_suffix() {
        assert_eq!(parse_flexible_date("2023-01-15T23:59:00"), Some(date(2023, 1, 15)));
        assert_eq!(parse_flexible_date("2023-01-15 08:00"), Some(date(2023, 1, 15)));
    }

    #[test]
    fn parses_compact_host_values() {
        assert_eq!(parse_flexible_date("20230101"), Some(date(2023, 1, 1)));
        assert_eq!(parse_flexible_date("2023010113"), Some(date(2023, 1, 1)));
        assert_eq!(parse_flexible_date("20230101135959"), Some(date(2023, 1, 1)));
        assert_eq!(parse_flexible_date("20231301"), None);
    }

    #[test]
    fn first_group_over_twelve_reads_day_first() {
        assert_eq!(parse_flexible_date("15/03/2023"), Some(date(2023, 3, 15)));
        assert_eq!(parse_flexible_date("31.12.2023"), Some(date(2023, 12, 31)));
        assert_eq!(parse_flexible_date("25-06-2023"), Some(date(2023, 6, 25)));
    }

    #[test]
    fn second_group_over_twelve_reads_month_first() {
        assert_eq!(parse_flexible_date("03/15/2023"), Some(date(2023, 3, 15)));
        assert_eq!(parse_flexible_date("12/31/2023"), Some(date(2023, 12, 31)));
    }

    #[test]
    fn ambiguous_slash_date_is_a_guess() {
        // Both groups <= 12: either reading could be right. The month-first
        // guess must at least produce one of the two candidates.
        let parsed = parse_flexible_date("03/04/2023").expect("Should parse");
        assert!(parsed == date(2023, 3, 4) || parsed == date(2023, 4, 3));
    }

    #[test]
    fn parses_generic_forms() {
        assert_eq!(parse_flexible_date("2023-01-15T10:00:00+02:00"), Some(date(2023, 1, 15)));
        assert_eq!(
            parse_flexible_date("Sun, 15 Jan 2023 10:00:00 +0000"),
            Some(date(2023, 1, 15))
        );
        assert_eq!(parse_flexible_date("15 Jan 2023"), Some(date(2023, 1, 15)));
        assert_eq!(parse_flexible_date("Jan 15, 2023"), Some(date(2023, 1, 15)));
    }

    #[test]
    fn rejects_garbage_without_panicking() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("   "), None);
        assert_eq!(parse_flexible_date("not a date"), None);
        assert_eq!(parse_flexible_date("2023-02-30"), None);
        assert_eq!(parse_flexible_date("13/13/2023"), None);
        assert_eq!(parse_flexible_date("2023-"), None);
        assert_eq!(parse_flexible_date("é/ü/2023"), None);
    }

    // --- format_for_field ---

    #[test]
    fn formats_each_field_type() {
        let d = date(2023, 8, 15);
        assert_eq!(format_for_field(d, FieldType::YearMonthDay), "20230815");
        assert_eq!(format_for_field(d, FieldType::YearMonthDayHour), "20230815");
        assert_eq!(format_for_field(d, FieldType::YearMonthDaySecond), "20230815");
        assert_eq!(format_for_field(d, FieldType::YearWeek), "20230815");
        assert_eq!(format_for_field(d, FieldType::YearMonth), "202308");
        assert_eq!(format_for_field(d, FieldType::YearQuarter), "2023Q3");
        assert_eq!(format_for_field(d, FieldType::Year), "2023");
    }

    #[test]
    fn quarter_boundaries() {
        assert_eq!(format_for_field(date(2023, 1, 1), FieldType::YearQuarter), "2023Q1");
        assert_eq!(format_for_field(date(2023, 3, 31), FieldType::YearQuarter), "2023Q1");
        assert_eq!(format_for_field(date(2023, 4, 1), FieldType::YearQuarter), "2023Q2");
        assert_eq!(format_for_field(date(2023, 12, 31), FieldType::YearQuarter), "2023Q4");
    }

    #[test]
    fn day_encoding_reparses_to_same_date() {
        let mut d = date(2020, 1, 1);
        while d <= date(2024, 12, 31) {
            let encoded = format_for_field(d, FieldType::YearMonthDay);
            assert_eq!(parse_flexible_date(&encoded), Some(d), "{}", encoded);
            d = d.succ_opt().unwrap();
        }
    }

    // --- comparable projection ---

    #[test]
    fn projects_host_values() {
        assert_eq!(comparable_for_value("20230115", FieldType::YearMonthDay), Some(20230115));
        assert_eq!(comparable_for_value("2023011513", FieldType::YearMonthDayHour), Some(20230115));
        assert_eq!(comparable_for_value("202301", FieldType::YearMonth), Some(202301));
        assert_eq!(comparable_for_value("2023Q3", FieldType::YearQuarter), Some(20233));
        assert_eq!(comparable_for_value("2023", FieldType::Year), Some(2023));
        assert_eq!(comparable_for_value("202305", FieldType::YearWeek), Some(202305));
    }

    #[test]
    fn rejects_invalid_host_values() {
        assert_eq!(comparable_for_value("202313", FieldType::YearMonth), None);
        assert_eq!(comparable_for_value("2023Q5", FieldType::YearQuarter), None);
        assert_eq!(comparable_for_value("202354", FieldType::YearWeek), None);
        assert_eq!(comparable_for_value("abc", FieldType::Year), None);
    }

    #[test]
    fn week_projection_uses_iso_weeks() {
        // 2023-01-01 is a Sunday, still in ISO week 52 of 2022
        assert_eq!(comparable_for_date(date(2023, 1, 1), FieldType::YearWeek), 202252);
        assert_eq!(comparable_for_date(date(2023, 1, 2), FieldType::YearWeek), 202301);
    }

    #[test]
    fn date_and_value_projections_agree() {
        let d = date(2023, 8, 15);
        for t in FieldType::ALL {
            if t == FieldType::YearWeek {
                continue;
            }
            let encoded = format_for_field(d, t);
            assert_eq!(
                comparable_for_value(&encoded, t),
                Some(comparable_for_date(d, t)),
                "{}",
                t
            );
        }
    }

    #[test]
    fn input_value_is_iso() {
        assert_eq!(to_input_value(date(2023, 1, 5)), "2023-01-05");
    }
}
