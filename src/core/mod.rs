//! # Core Application Logic
//!
//! This module contains ShipTalk's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No terminal I/O.       │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │  timers, camera requests,
//!                         │  Adapter   │  rendering, key handling
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`feed`]: Canonical post store, filtering, tabs, card state
//! - [`assistant`]: The simulated assistant with request supersession
//! - [`chat`]: Live discussion log
//! - [`sidebar`]: Trending groups, experts, events and their dialogs
//! - [`camera`]: Scoped capture-device access for the live-call preview

pub mod action;
pub mod assistant;
pub mod camera;
pub mod chat;
pub mod clock;
pub mod config;
pub mod feed;
pub mod model;
pub mod sample;
pub mod sidebar;
pub mod state;
