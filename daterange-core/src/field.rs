//! Host date dimension descriptors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DateRangeError;

/// A date dimension configured in the host (read-only to us).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateField {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// "DIMENSION" for date fields; kept for completeness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept: Option<String>,
}

/// How the host encodes values of a date dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    YearMonthDay,
    YearMonthDayHour,
    YearMonthDaySecond,
    YearMonth,
    YearWeek,
    YearQuarter,
    Year,
}

/// The calendar unit a field type resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::YearMonthDay,
        FieldType::YearMonthDayHour,
        FieldType::YearMonthDaySecond,
        FieldType::YearMonth,
        FieldType::YearWeek,
        FieldType::YearQuarter,
        FieldType::Year,
    ];

    pub fn granularity(self) -> Granularity {
        match self {
            FieldType::YearMonthDay
            | FieldType::YearMonthDayHour
            | FieldType::YearMonthDaySecond => Granularity::Day,
            FieldType::YearWeek => Granularity::Week,
            FieldType::YearMonth => Granularity::Month,
            FieldType::YearQuarter => Granularity::Quarter,
            FieldType::Year => Granularity::Year,
        }
    }

    /// Host wire name, e.g. `YEAR_MONTH_DAY`.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::YearMonthDay => "YEAR_MONTH_DAY",
            FieldType::YearMonthDayHour => "YEAR_MONTH_DAY_HOUR",
            FieldType::YearMonthDaySecond => "YEAR_MONTH_DAY_SECOND",
            FieldType::YearMonth => "YEAR_MONTH",
            FieldType::YearWeek => "YEAR_WEEK",
            FieldType::YearQuarter => "YEAR_QUARTER",
            FieldType::Year => "YEAR",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = DateRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace('-', "_");
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| DateRangeError::UnknownFieldType(s.to_string()))
    }
}
