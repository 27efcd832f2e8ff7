//! Live discussion panel: an append-only message log for one local participant.

use log::debug;

use crate::core::clock::Clock;
use crate::core::model::ChatMessage;

pub const DEFAULT_DISPLAY_NAME: &str = "You";

pub struct LiveChat {
    messages: Vec<ChatMessage>,
    display_name: String,
}

impl LiveChat {
    pub fn new(seed: Vec<ChatMessage>) -> Self {
        Self {
            messages: seed,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Appends a message from the local participant. Blank text is ignored.
    pub fn send(&mut self, text: &str, clock: &dyn Clock) -> Option<i64> {
        if text.trim().is_empty() {
            return None;
        }
        let last = self.messages.iter().map(|m| m.id).max().unwrap_or(0);
        let id = clock.now_millis().max(last + 1);
        self.messages.push(ChatMessage {
            id,
            author: self.display_name.clone(),
            content: text.to_string(),
        });
        debug!("Chat message {} sent ({} total)", id, self.messages.len());
        Some(id)
    }
}
