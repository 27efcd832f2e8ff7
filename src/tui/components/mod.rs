//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: Top status bar showing topic, search and status
//! - `PostCardView`: One post with its visible comments
//! - `ChatPanel`, `AssistantPanel`, `Dialog`
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient wrapper borrows it each
//! frame:
//! - `Composer`: Single-line text input
//! - `FeedState` / `FeedList`: Tab bar and scrollable card stack
//! - `TopicListState` / `TopicList`: Category filter
//! - `SidebarState` / `SidebarPanel`: Groups, experts and events
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs              (this file)
//! ├── title_bar.rs        (Top status bar)
//! ├── topic_list.rs       (Left column)
//! ├── feed.rs             (Centre column: tabs + cards or chat)
//! ├── post_card.rs        (Single post renderer)
//! ├── chat_panel.rs       (Live discussion log)
//! ├── assistant_panel.rs  (Right column, top)
//! ├── sidebar.rs          (Right column, below the assistant)
//! ├── dialog.rs           (Modal overlay)
//! └── composer.rs         (Bottom text input)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod assistant_panel;
pub mod chat_panel;
pub mod composer;
pub mod dialog;
pub mod feed;
pub mod post_card;
pub mod sidebar;
pub mod topic_list;

pub use assistant_panel::AssistantPanel;
pub use composer::{Composer, InputEvent};
pub use dialog::Dialog;
pub use feed::{FeedList, FeedState};
pub use sidebar::{SidebarEvent, SidebarPanel, SidebarState};
pub use topic_list::{TopicEvent, TopicList, TopicListState};
