//! Widget driver tying the session, renderer and host together.
//!
//! The host serializes everything on one thread: a render runs to completion,
//! its post-render hook runs right after the view is mounted, and only then
//! can the next render or input event arrive.

use tracing::debug;

use crate::interaction::{FilterDirective, Host};
use crate::payload::HostPayload;
use crate::render::render;
use crate::session::{FilterSession, Trigger};
use crate::style::Style;

/// One embedded date-range picker.
pub struct DateRangeWidget<H: Host> {
    host: H,
    session: FilterSession,
    payload: HostPayload,
}

impl<H: Host> DateRangeWidget<H> {
    pub fn new(host: H) -> Self {
        DateRangeWidget {
            host,
            session: FilterSession::new(),
            payload: HostPayload::default(),
        }
    }

    pub fn session(&self) -> &FilterSession {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Host-invoked render with fresh data and style.
    ///
    /// Returns the directive sent by the post-render hook, if any.
    pub fn draw(&mut self, payload: HostPayload) -> Option<FilterDirective> {
        self.payload = payload;

        if self.payload.date_field().is_some() {
            self.session.apply_defaults(&Style::resolve(&self.payload.style));
        }

        let output = render(&self.payload, &self.session);
        self.host.mount(&output.view);

        let hook = output.post_render?;
        debug!(?hook, "running post-render evaluation");
        self.evaluate(Trigger::Programmatic)
    }

    /// The user changed the start input.
    pub fn on_start_change(&mut self, text: &str) -> Option<FilterDirective> {
        self.session.set_start_input(text);
        self.evaluate(Trigger::UserInput)
    }

    /// The user changed the end input.
    pub fn on_end_change(&mut self, text: &str) -> Option<FilterDirective> {
        self.session.set_end_input(text);
        self.evaluate(Trigger::UserInput)
    }

    /// The user emptied both inputs.
    pub fn on_clear(&mut self) -> Option<FilterDirective> {
        self.session.clear_inputs();
        self.evaluate(Trigger::UserInput)
    }

    fn evaluate(&mut self, trigger: Trigger) -> Option<FilterDirective> {
        let directive = self.session.evaluate_and_emit(trigger, &self.payload)?;
        self.host.dispatch(&directive);
        Some(directive)
    }
}
