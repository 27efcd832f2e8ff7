//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::clock::Clock;
use crate::core::feed::Forum;
use crate::core::sample::sample_posts;
use crate::core::state::App;

/// A clock frozen at 2023-06-24.
pub struct FixedClock {
    pub millis: i64,
    pub date: String,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self {
            millis: 1_687_600_000_000,
            date: "6/24/2023".to_string(),
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.millis
    }

    fn locale_date(&self) -> String {
        self.date.clone()
    }
}

/// The sample forum with default settings.
pub fn test_forum() -> Forum {
    Forum::new(sample_posts())
}

/// Creates a test App on the sample data with a FixedClock.
pub fn test_app() -> App {
    App::new(Arc::new(FixedClock::default()))
}
