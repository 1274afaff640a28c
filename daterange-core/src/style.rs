//! Style configuration supplied by the host.
//!
//! The host style object is the only configuration surface of the widget.
//! Every property is optional; missing ones fall back to the defaults below.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::normalize::parse_flexible_date;

pub const DEFAULT_FONT_COLOR: &str = "#202124";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_BORDER_COLOR: &str = "#DADCE0";
pub const DEFAULT_BORDER_WIDTH: &str = "1px";
pub const DEFAULT_BORDER_RADIUS: &str = "8px";
pub const DEFAULT_FONT_FAMILY: &str = "Roboto";
pub const DEFAULT_FONT_SIZE: &str = "14px";
pub const DEFAULT_OPACITY: &str = "1";

/// Raw host style object, keyed by property id (e.g. `fontColor`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleProps(pub BTreeMap<String, StyleEntry>);

/// One style property as the host sends it.
///
/// `value` is a plain string or number, or an object such as `{ "color": "#000" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEntry {
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub default_value: Option<Value>,
}

impl StyleProps {
    /// Resolved text of a property: `value`, then `defaultValue`.
    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.0.get(key)?;
        entry
            .value
            .as_ref()
            .and_then(value_text)
            .or_else(|| entry.default_value.as_ref().and_then(value_text))
    }

    /// Set a plain value; used by local previews.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(
            key.into(),
            StyleEntry {
                value: Some(Value::String(value.into())),
                default_value: None,
            },
        );
    }
}

fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => return map.get("color").and_then(value_text),
        _ => return None,
    };
    if text.is_empty() { None } else { Some(text) }
}

/// Bare numbers are pixel sizes.
fn with_px(size: String) -> String {
    if size.parse::<f64>().is_ok_and(f64::is_finite) {
        format!("{}px", size)
    } else {
        size
    }
}

/// Style with every property resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub font_color: String,
    pub background_color: String,
    pub border_color: String,
    pub border_width: String,
    pub border_radius: String,
    pub font_family: String,
    pub font_size: String,
    pub opacity: String,
    /// Initial range applied once when nothing is selected yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_end_date: Option<NaiveDate>,
}

impl Default for Style {
    fn default() -> Self {
        Style::resolve(&StyleProps::default())
    }
}

impl Style {
    pub fn resolve(props: &StyleProps) -> Self {
        let text = |key: &str, default: &str| props.get(key).unwrap_or_else(|| default.to_string());

        Style {
            font_color: text("fontColor", DEFAULT_FONT_COLOR),
            background_color: text("backgroundColor", DEFAULT_BACKGROUND_COLOR),
            border_color: text("borderColor", DEFAULT_BORDER_COLOR),
            border_width: with_px(text("borderWidth", DEFAULT_BORDER_WIDTH)),
            border_radius: with_px(text("borderRadius", DEFAULT_BORDER_RADIUS)),
            font_family: text("fontFamily", DEFAULT_FONT_FAMILY),
            font_size: with_px(text("fontSize", DEFAULT_FONT_SIZE)),
            opacity: text("opacity", DEFAULT_OPACITY),
            default_start_date: props
                .get("defaultStartDate")
                .and_then(|s| parse_flexible_date(&s)),
            default_end_date: props
                .get("defaultEndDate")
                .and_then(|s| parse_flexible_date(&s)),
        }
    }

    pub fn has_default_range(&self) -> bool {
        self.default_start_date.is_some() || self.default_end_date.is_some()
    }

    /// Inline CSS for the container element.
    pub fn container_css(&self) -> String {
        format!(
            "color: {}; background-color: {}; border: {} solid {}; border-radius: {}; \
             font-family: {}; font-size: {}; opacity: {};",
            self.font_color,
            self.background_color,
            self.border_width,
            self.border_color,
            self.border_radius,
            self.font_family,
            self.font_size,
            self.opacity
        )
    }

    /// Inline CSS for the date inputs, which inherit the font color.
    pub fn input_css(&self) -> String {
        format!("color: {}; font-family: {};", self.font_color, self.font_family)
    }
}
