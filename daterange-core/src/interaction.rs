//! Directives sent back to the host.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::render::View;

/// Channel id under which cross-filter interactions are sent.
pub const CROSS_FILTER_CHANNEL: &str = "crossFilter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionType {
    Filter,
}

/// Body of a filter interaction as the host expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionData {
    pub concepts: Vec<String>,
    /// One single-element tuple per selected value
    pub values: Vec<[String; 1]>,
}

/// What the session decided to tell the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FilterDirective {
    Set {
        concept_id: String,
        values: Vec<[String; 1]>,
    },
    Clear {
        concept_id: String,
    },
}

impl FilterDirective {
    pub fn set(concept_id: impl Into<String>, values: impl IntoIterator<Item = String>) -> Self {
        FilterDirective::Set {
            concept_id: concept_id.into(),
            values: values.into_iter().map(|v| [v]).collect(),
        }
    }

    pub fn clear(concept_id: impl Into<String>) -> Self {
        FilterDirective::Clear {
            concept_id: concept_id.into(),
        }
    }

    pub fn concept_id(&self) -> &str {
        match self {
            FilterDirective::Set { concept_id, .. } | FilterDirective::Clear { concept_id } => {
                concept_id
            }
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, FilterDirective::Clear { .. })
    }

    /// Interaction body for a set directive; `None` for clears.
    pub fn interaction_data(&self) -> Option<InteractionData> {
        match self {
            FilterDirective::Set { concept_id, values } => Some(InteractionData {
                concepts: vec![concept_id.clone()],
                values: values.clone(),
            }),
            FilterDirective::Clear { .. } => None,
        }
    }
}

impl fmt::Display for FilterDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterDirective::Set { concept_id, values } => {
                write!(f, "set {} ({} values)", concept_id, values.len())
            }
            FilterDirective::Clear { concept_id } => write!(f, "clear {}", concept_id),
        }
    }
}

/// The embedding dashboard, as seen from the widget.
pub trait Host {
    /// Replace the widget's visible content.
    fn mount(&mut self, view: &View);

    fn send_interaction(&mut self, channel: &str, kind: InteractionType, data: InteractionData);

    fn clear_interaction(&mut self, channel: &str, kind: InteractionType);

    /// Route a directive to the cross-filter channel.
    fn dispatch(&mut self, directive: &FilterDirective) {
        match directive.interaction_data() {
            Some(data) => {
                self.send_interaction(CROSS_FILTER_CHANNEL, InteractionType::Filter, data)
            }
            None => self.clear_interaction(CROSS_FILTER_CHANNEL, InteractionType::Filter),
        }
    }
}
