//! Pure view construction.
//!
//! `render` is a function of the host payload and the session only. The
//! inputs are filled from the session's retained selection, so a host-forced
//! rebuild never loses what the user typed.

use serde::Serialize;

use crate::normalize::to_input_value;
use crate::payload::HostPayload;
use crate::session::{FilterSession, PostRenderHook};
use crate::style::Style;

pub const NO_DATE_FIELD_MESSAGE: &str = "Please select a Date Dimension.";
pub const CONTAINER_CLASS: &str = "date-selector-container";
pub const INPUT_CLASS: &str = "date-input";
pub const SEPARATOR_CLASS: &str = "date-separator";
pub const SEPARATOR_TEXT: &str = " to ";

/// Description of what the widget shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    /// Shown instead of the control when no date dimension is configured
    Advisory { message: String },
    DateRange(DateRangeView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateRangeView {
    pub class_name: &'static str,
    pub style: Style,
    pub start_input: DateInput,
    pub separator: Separator,
    pub end_input: DateInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputRole {
    Start,
    End,
}

/// A date-valued input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateInput {
    pub role: InputRole,
    pub class_name: &'static str,
    /// `YYYY-MM-DD`, or empty when the bound is unset
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Separator {
    pub class_name: &'static str,
    pub text: &'static str,
}

/// A view plus the work to run after it is mounted.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    pub view: View,
    pub post_render: Option<PostRenderHook>,
}

pub fn render(payload: &HostPayload, session: &FilterSession) -> RenderOutput {
    if payload.date_field().is_none() {
        return RenderOutput {
            view: View::Advisory {
                message: NO_DATE_FIELD_MESSAGE.to_string(),
            },
            post_render: None,
        };
    }

    let selection = session.selection();
    let input = |role, date: Option<chrono::NaiveDate>| DateInput {
        role,
        class_name: INPUT_CLASS,
        value: date.map(to_input_value).unwrap_or_default(),
    };

    RenderOutput {
        view: View::DateRange(DateRangeView {
            class_name: CONTAINER_CLASS,
            style: Style::resolve(&payload.style),
            start_input: input(InputRole::Start, selection.start_date),
            separator: Separator {
                class_name: SEPARATOR_CLASS,
                text: SEPARATOR_TEXT,
            },
            end_input: input(InputRole::End, selection.end_date),
        }),
        post_render: session.post_render_hook(),
    }
}

impl View {
    /// HTML markup for the view, as a browser embedding would mount it.
    pub fn to_html(&self) -> String {
        match self {
            View::Advisory { message } => format!("<div>{}</div>", escape(message)),
            View::DateRange(view) => {
                let input_css = view.style.input_css();
                let input = |i: &DateInput| {
                    format!(
                        r#"<input type="date" class="{}" value="{}" style="{}">"#,
                        i.class_name,
                        escape(&i.value),
                        escape(&input_css)
                    )
                };
                format!(
                    r#"<div class="{}" style="{}">{}<span class="{}">{}</span>{}</div>"#,
                    view.class_name,
                    escape(&view.style.container_css()),
                    input(&view.start_input),
                    view.separator.class_name,
                    view.separator.text,
                    input(&view.end_input)
                )
            }
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
