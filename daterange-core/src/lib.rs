//! Core logic for the daterange cross-filter picker.
//!
//! This crate holds everything that runs inside a host render cycle:
//! - `normalize` parses loosely formatted dates and encodes them for a field type
//! - `range` expands a selected range into the host's discrete date keys
//! - `session` tracks the selection across re-renders and decides what to emit
//! - `render` and `widget` turn a host payload plus session into a view and directives

pub mod error;
pub mod field;
pub mod interaction;
pub mod normalize;
pub mod payload;
pub mod range;
pub mod render;
pub mod session;
pub mod style;
pub mod widget;

pub use error::{DateRangeError, DateRangeResult};
pub use field::{DateField, FieldType, Granularity};
pub use interaction::{FilterDirective, Host, InteractionType, CROSS_FILTER_CHANNEL};
pub use payload::{AvailableDateSet, HostPayload};
pub use session::{FilterFingerprint, FilterSession, SessionPhase, Trigger};
pub use widget::DateRangeWidget;
