//! A host that prints what the widget would show and send.

use daterange_core::interaction::{InteractionData, InteractionType};
use daterange_core::render::View;
use daterange_core::Host;

pub struct StdoutHost {
    /// Print mounted views as HTML instead of JSON
    pub html: bool,
    /// Print mounted views at all
    pub show_views: bool,
}

impl Host for StdoutHost {
    fn mount(&mut self, view: &View) {
        if !self.show_views {
            return;
        }
        if self.html {
            println!("{}", view.to_html());
        } else {
            match serde_json::to_string_pretty(view) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Could not serialize view: {}", e),
            }
        }
    }

    fn send_interaction(&mut self, channel: &str, kind: InteractionType, data: InteractionData) {
        let body = serde_json::to_string(&data).unwrap_or_default();
        println!("→ {} {:?} {}", channel, kind, body);
    }

    fn clear_interaction(&mut self, channel: &str, kind: InteractionType) {
        println!("→ {} {:?} clear", channel, kind);
    }
}
