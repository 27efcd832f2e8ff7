//! # TitleBar Component
//!
//! Top status bar: app name, the active topic and search, and the latest
//! status message.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar {
//!     topic: "Eco-Packaging".to_string(),
//!     search: String::new(),
//!     status_message: app.status_message.clone(),
//! };
//! title_bar.render(frame, area);
//! ```
//!
//! Segments are joined with `|`; empty ones are skipped, so the bar degrades
//! to just `ShipTalk · <topic>` on a quiet screen.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Active category label, or "All Posts"
    pub topic: String,
    /// Current search query (empty when none)
    pub search: String,
    /// Latest status line from the core
    pub status_message: String,
}

impl TitleBar {
    pub fn new(topic: String, search: String, status_message: String) -> Self {
        Self {
            topic,
            search,
            status_message,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "ShipTalk",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" · {}", self.topic)),
        ];
        if !self.search.is_empty() {
            spans.push(Span::raw(format!(" | search: \"{}\"", self.search)));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.as_str(),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
