//! # Application State
//!
//! Core business state for ShipTalk. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── forum: Forum                  // canonical posts, filter, tab, card state
//! ├── assistant: Assistant          // query, pending request, answer
//! ├── chat: LiveChat                // append-only live discussion
//! ├── sidebar: Sidebar              // groups, experts, events, camera
//! ├── clock: Arc<dyn Clock>         // timestamps for new records
//! ├── assistant_delay: Duration     // simulated thinking time
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::sync::Arc;
use std::time::Duration;

use crate::core::assistant::Assistant;
use crate::core::camera::CameraPreview;
use crate::core::chat::LiveChat;
use crate::core::clock::Clock;
use crate::core::config::ResolvedConfig;
use crate::core::feed::Forum;
use crate::core::sample;
use crate::core::sidebar::{DialogTarget, Sidebar};

pub struct App {
    pub forum: Forum,
    pub assistant: Assistant,
    pub chat: LiveChat,
    pub sidebar: Sidebar,
    pub clock: Arc<dyn Clock>,
    pub assistant_delay: Duration,
    pub status_message: String,
}

impl App {
    /// Sample data with default settings.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::from_config(&ResolvedConfig::default(), clock)
    }

    pub fn from_config(config: &ResolvedConfig, clock: Arc<dyn Clock>) -> Self {
        let mut forum = Forum::new(sample::sample_posts())
            .with_hot_threshold(config.hot_threshold)
            .with_collapsed_comments(config.collapsed_comments)
            .with_comment_author(config.comment_author.clone());
        if let Some(category) = config.start_category {
            forum.select_category(category);
        }
        forum.select_tab(config.start_tab);

        Self {
            forum,
            assistant: Assistant::new(),
            chat: LiveChat::new(sample::seeded_chat())
                .with_display_name(config.display_name.clone()),
            sidebar: Sidebar::new(
                sample::trending_groups(),
                sample::experts(),
                sample::virtual_events(),
                CameraPreview::new(config.camera_enabled),
            ),
            clock,
            assistant_delay: config.assistant_delay,
            status_message: String::from("Welcome to ShipTalk!"),
        }
    }

    /// The one open dialog, if any.
    pub fn open_dialog(&self) -> Option<DialogTarget> {
        if self.assistant.dialog.is_open() {
            return Some(DialogTarget::AssistantAnswer);
        }
        self.sidebar.open_dialog()
    }
}
