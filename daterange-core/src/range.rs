//! Date range expansion.

use chrono::NaiveDate;

use crate::field::FieldType;
use crate::normalize::{comparable_for_date, comparable_for_value, format_for_field, to_input_value};

/// A selected range of calendar days, both ends inclusive.
///
/// The range may be inverted (start after end); callers check
/// [`DateRange::is_inverted`] and treat that as "nothing selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// Build a range only when both bounds are set.
    pub fn from_bounds(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<Self> {
        Some(DateRange::new(start?, end?))
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every calendar day in the range, in order. Empty when inverted.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Whether an encoded host value falls inside the range once both are
    /// projected to the field's granularity.
    pub fn covers_value(&self, raw: &str, field_type: FieldType) -> bool {
        let Some(value) = comparable_for_value(raw, field_type) else {
            return false;
        };
        comparable_for_date(self.start, field_type) <= value
            && value <= comparable_for_date(self.end, field_type)
    }

    /// Encoded keys for every day in the range, see [`expand_range`].
    pub fn expand(&self, field_type: FieldType) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for day in self.days() {
            let key = format_for_field(day, field_type);
            // Coarser granularities repeat the same key on consecutive days
            if keys.last() != Some(&key) {
                keys.push(key);
            }
        }
        keys
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", to_input_value(self.start), to_input_value(self.end))
    }
}

/// Enumerate the distinct encoded date keys between `start` and `end`, inclusive.
///
/// Returns an empty vector when `start` is after `end`.
pub fn expand_range(start: NaiveDate, end: NaiveDate, field_type: FieldType) -> Vec<String> {
    DateRange::new(start, end).expand(field_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn expands_days_inclusive() {
        let keys = expand_range(date(2023, 1, 30), date(2023, 2, 2), FieldType::YearMonthDay);
        assert_eq!(keys, vec!["20230130", "20230131", "20230201", "20230202"]);
    }

    #[test]
    fn single_day_range() {
        let keys = expand_range(date(2023, 1, 1), date(2023, 1, 1), FieldType::YearMonthDay);
        assert_eq!(keys, vec!["20230101"]);
    }

    #[test]
    fn inverted_range_is_empty() {
        for t in FieldType::ALL {
            assert!(expand_range(date(2023, 6, 1), date(2023, 2, 1), t).is_empty());
        }
        assert!(DateRange::new(date(2023, 6, 1), date(2023, 2, 1)).is_inverted());
    }

    #[test]
    fn month_range_collapses_to_one_key_per_month() {
        let keys = expand_range(date(2023, 1, 15), date(2023, 3, 2), FieldType::YearMonth);
        assert_eq!(keys, vec!["202301", "202302", "202303"]);
    }

    #[test]
    fn quarter_and_year_ranges() {
        let quarters = expand_range(date(2023, 2, 1), date(2024, 1, 10), FieldType::YearQuarter);
        assert_eq!(quarters, vec!["2023Q1", "2023Q2", "2023Q3", "2023Q4", "2024Q1"]);

        let years = expand_range(date(2022, 12, 31), date(2023, 1, 1), FieldType::Year);
        assert_eq!(years, vec!["2022", "2023"]);
    }

    #[test]
    fn output_is_sorted_and_unique_for_every_type() {
        let start = date(2022, 11, 20);
        let end = date(2024, 2, 10);
        for t in FieldType::ALL {
            let keys = expand_range(start, end, t);
            let projected: Vec<i64> = keys
                .iter()
                .map(|k| comparable_for_value(k, t).expect("key should project"))
                .collect();
            assert!(projected.windows(2).all(|w| w[0] <= w[1]), "{} not ordered", t);

            let mut deduped = keys.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), keys.len(), "{} has duplicates", t);
        }
    }

    #[test]
    fn covers_value_uses_field_granularity() {
        let range = DateRange::new(date(2023, 1, 20), date(2023, 3, 5));
        assert!(range.covers_value("202301", FieldType::YearMonth));
        assert!(range.covers_value("202303", FieldType::YearMonth));
        assert!(!range.covers_value("202304", FieldType::YearMonth));
        assert!(range.covers_value("2023012223", FieldType::YearMonthDayHour));
        assert!(!range.covers_value("2023011923", FieldType::YearMonthDayHour));
        assert!(range.covers_value("202305", FieldType::YearWeek));
        assert!(!range.covers_value("garbage", FieldType::YearMonthDay));
    }

    #[test]
    fn contains_is_inclusive() {
        let range = DateRange::new(date(2023, 1, 1), date(2023, 1, 31));
        assert!(range.contains(date(2023, 1, 1)));
        assert!(range.contains(date(2023, 1, 31)));
        assert!(!range.contains(date(2022, 12, 31)));
        assert!(!range.contains(date(2023, 2, 1)));
        assert!(range.days().all(|d| range.contains(d)));
    }

    #[test]
    fn from_bounds_requires_both() {
        assert!(DateRange::from_bounds(Some(date(2023, 1, 1)), None).is_none());
        assert!(DateRange::from_bounds(None, Some(date(2023, 1, 1))).is_none());
        assert!(DateRange::from_bounds(Some(date(2023, 1, 1)), Some(date(2023, 1, 2))).is_some());
    }

    #[test]
    fn displays_as_input_values() {
        let range = DateRange::new(date(2023, 1, 1), date(2023, 1, 31));
        assert_eq!(range.to_string(), "2023-01-01 to 2023-01-31");
    }
}
