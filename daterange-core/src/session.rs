//! Filter session: selection state that outlives individual renders.
//!
//! The host tears down and rebuilds the widget on every render, so the
//! selection lives here instead of in the inputs. The session decides, for
//! each evaluation, whether the host needs a new set or clear directive.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::field::FieldType;
use crate::interaction::FilterDirective;
use crate::normalize::{comparable_for_value, parse_flexible_date};
use crate::payload::{AvailableDateSet, HostPayload};
use crate::range::DateRange;
use crate::style::Style;

/// Bounds at or before this year are treated as half-typed input.
pub const MIN_VALID_YEAR: i32 = 1900;

/// The selected bounds and how they got there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Last change came from the user rather than from configuration
    pub is_manual: bool,
    /// The user has touched the inputs at least once
    pub has_interacted: bool,
}

impl SelectionState {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn range(&self) -> Option<DateRange> {
        DateRange::from_bounds(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No stored range
    Idle,
    /// Range came from configuration, not from the user
    DefaultsApplied,
    /// Range was set or changed by the user
    UserSet,
}

/// What caused an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    UserInput,
    /// Post-render re-evaluation; never marks the selection as manual
    Programmatic,
}

/// Identity of an emitted filter, used to suppress repeats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterFingerprint {
    pub field_id: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub value_count: usize,
}

/// Work to run once the freshly rendered view is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostRenderHook {
    /// Re-send the user's range against the new data
    Reapply,
    /// Send the configured initial range as an active filter
    ApplyDefaults,
}

/// Selection and emission state for one widget instance.
#[derive(Debug, Clone, Default)]
pub struct FilterSession {
    selection: SelectionState,
    defaults_applied: bool,
    last_filter_sent: Option<FilterFingerprint>,
    has_sent_filter: bool,
}

impl FilterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn phase(&self) -> SessionPhase {
        if self.selection.is_empty() {
            SessionPhase::Idle
        } else if self.selection.has_interacted {
            SessionPhase::UserSet
        } else {
            SessionPhase::DefaultsApplied
        }
    }

    pub fn last_filter_sent(&self) -> Option<&FilterFingerprint> {
        self.last_filter_sent.as_ref()
    }

    /// Whether any directive has been emitted during this session.
    pub fn has_sent_filter(&self) -> bool {
        self.has_sent_filter
    }

    /// Whether the host currently holds a set filter from us.
    fn filter_active(&self) -> bool {
        self.last_filter_sent
            .as_ref()
            .is_some_and(|f| f.value_count > 0)
    }

    /// Populate the range from configuration, at most once per session.
    ///
    /// Returns whether anything was applied.
    pub fn apply_defaults(&mut self, style: &Style) -> bool {
        if self.defaults_applied
            || self.selection.has_interacted
            || self.phase() != SessionPhase::Idle
            || !style.has_default_range()
        {
            return false;
        }

        self.selection.start_date = style.default_start_date;
        self.selection.end_date = style.default_end_date;
        self.selection.is_manual = false;
        self.defaults_applied = true;
        debug!(
            start = ?self.selection.start_date,
            end = ?self.selection.end_date,
            "applied default range"
        );
        true
    }

    /// User edited the start input. Unparseable text leaves the bound unset.
    pub fn set_start_input(&mut self, text: &str) {
        self.selection.start_date = parse_flexible_date(text);
        self.mark_user_change();
    }

    /// User edited the end input. Unparseable text leaves the bound unset.
    pub fn set_end_input(&mut self, text: &str) {
        self.selection.end_date = parse_flexible_date(text);
        self.mark_user_change();
    }

    /// User cleared both inputs.
    pub fn clear_inputs(&mut self) {
        self.selection.start_date = None;
        self.selection.end_date = None;
        self.mark_user_change();
    }

    fn mark_user_change(&mut self) {
        self.selection.is_manual = true;
        self.selection.has_interacted = true;
    }

    /// What to run after the next render has been mounted, if anything.
    pub fn post_render_hook(&self) -> Option<PostRenderHook> {
        match self.phase() {
            SessionPhase::UserSet if self.selection.range().is_some() => {
                Some(PostRenderHook::Reapply)
            }
            SessionPhase::DefaultsApplied if !self.has_sent_filter => {
                Some(PostRenderHook::ApplyDefaults)
            }
            _ => None,
        }
    }

    /// Decide whether the host needs a new directive for the current selection.
    ///
    /// Returns `None` when nothing should be sent: half-typed or inverted
    /// input, a single bound, no date field, or a repeat of the last filter.
    pub fn evaluate_and_emit(
        &mut self,
        trigger: Trigger,
        payload: &HostPayload,
    ) -> Option<FilterDirective> {
        if trigger == Trigger::UserInput {
            self.selection.is_manual = true;
        }

        let start = self.selection.start_date;
        let end = self.selection.end_date;

        if [start, end]
            .iter()
            .flatten()
            .any(|d| d.year() <= MIN_VALID_YEAR)
        {
            debug!(?start, ?end, "ignoring bound at or before {}", MIN_VALID_YEAR);
            return None;
        }

        let field = payload.date_field()?;

        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            (None, None) => {
                if !self.filter_active() {
                    return None;
                }
                info!(field = %field.id, ?trigger, "selection cleared, clearing filter");
                self.record(None);
                return Some(FilterDirective::clear(&field.id));
            }
            // Waiting for the other bound
            _ => return None,
        };

        let range = DateRange::new(start, end);
        if range.is_inverted() {
            debug!(%start, %end, "start is after end, ignoring");
            return None;
        }

        let values = matching_values(&range, field.field_type, &payload.available_dates());
        let fingerprint = FilterFingerprint {
            field_id: field.id.clone(),
            start,
            end,
            value_count: values.len(),
        };
        if self.last_filter_sent.as_ref() == Some(&fingerprint) {
            debug!(%range, "filter unchanged, not resending");
            return None;
        }
        self.record(Some(fingerprint));

        if values.is_empty() {
            info!(field = %field.id, %range, ?trigger, "range matches no data, clearing filter");
            return Some(FilterDirective::clear(&field.id));
        }

        info!(
            field = %field.id,
            %range,
            values = values.len(),
            ?trigger,
            "sending filter"
        );
        Some(FilterDirective::set(&field.id, values))
    }

    fn record(&mut self, fingerprint: Option<FilterFingerprint>) {
        self.last_filter_sent = fingerprint;
        self.has_sent_filter = true;
    }
}

/// Values from the data that the range selects, in ascending date order.
///
/// Every key the range expands to projects inside the range, so testing each
/// available value is enough; the work is bounded by the data, not the range.
fn matching_values(
    range: &DateRange,
    field_type: FieldType,
    available: &AvailableDateSet,
) -> Vec<String> {
    let mut values: Vec<String> = available
        .iter()
        .filter(|v| range.covers_value(v, field_type))
        .map(str::to_string)
        .collect();
    values.sort_by_key(|v| (comparable_for_value(v, field_type), v.clone()));
    values
}
