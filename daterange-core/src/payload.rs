//! Host data payload delivered on every render.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DateRangeResult;
use crate::field::DateField;
use crate::style::StyleProps;

/// Everything the host hands us for one render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostPayload {
    #[serde(default)]
    pub tables: Tables,
    #[serde(default)]
    pub fields: Fields,
    #[serde(default)]
    pub style: StyleProps,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    #[serde(rename = "DEFAULT", default)]
    pub default: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fields {
    #[serde(rename = "dateDimension", default)]
    pub date_dimension: Vec<DateField>,
}

/// One data row; the date dimension holds a single raw value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(rename = "dateDimension", default)]
    pub date_dimension: Vec<Value>,
}

impl Row {
    pub fn date(value: impl Into<String>) -> Self {
        Row {
            date_dimension: vec![Value::String(value.into())],
        }
    }
}

impl HostPayload {
    pub fn from_json(json: &str) -> DateRangeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The date dimension being filtered, if one is configured.
    pub fn date_field(&self) -> Option<&DateField> {
        self.fields.date_dimension.first()
    }

    pub fn rows(&self) -> &[Row] {
        &self.tables.default
    }

    pub fn available_dates(&self) -> AvailableDateSet {
        AvailableDateSet::from_rows(self.rows())
    }
}

/// Distinct date values present in the current data, in first-seen order.
///
/// Only these values may be sent as filter values; the host ignores the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailableDateSet {
    values: Vec<String>,
}

impl AvailableDateSet {
    pub fn from_rows(rows: &[Row]) -> Self {
        let mut seen = HashSet::new();
        let values = rows
            .iter()
            .filter_map(|row| row.date_dimension.first())
            .filter_map(raw_text)
            .filter(|v| seen.insert(v.clone()))
            .collect();
        AvailableDateSet { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

/// Text of a raw cell, skipping null, blank and NaN values.
fn raw_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => {
                let f = n.as_f64()?;
                if f.is_finite() && f.fract() == 0.0 {
                    format!("{}", f as i64)
                } else {
                    return None;
                }
            }
        },
        _ => return None,
    };

    let skip = text.is_empty()
        || text.eq_ignore_ascii_case("nan")
        || text.eq_ignore_ascii_case("null")
        || text.eq_ignore_ascii_case("undefined");
    if skip { None } else { Some(text) }
}
