//! # Mock Assistant
//!
//! A stand-in for a request/response cycle: `ask()` hands out a request id,
//! the adapter sleeps for the configured delay via [`simulate_lookup`], then
//! feeds the canned answer back through `resolve()`.
//!
//! Only the most recent request may resolve. Asking again while a lookup is
//! pending supersedes it, and a late answer for the old id is dropped.

use std::time::Duration;

use log::{debug, info};
use uuid::Uuid;

use crate::core::model::AssistantAnswer;
use crate::core::sample::canned_answer;
use crate::core::sidebar::DialogState;

pub const DEFAULT_ASSISTANT_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct Assistant {
    pub query: String,
    pending: Option<RequestId>,
    answer: Option<AssistantAnswer>,
    pub dialog: DialogState,
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit_query(&mut self, text: &str) {
        self.query.clear();
        self.query.push_str(text);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<RequestId> {
        self.pending
    }

    pub fn answer(&self) -> Option<&AssistantAnswer> {
        self.answer.as_ref()
    }

    /// Starts a lookup for the current query. Blank queries do nothing.
    /// A lookup already in flight is superseded by the new one.
    pub fn ask(&mut self) -> Option<RequestId> {
        if self.query.trim().is_empty() {
            return None;
        }
        let request = RequestId::new();
        if let Some(previous) = self.pending.replace(request) {
            info!("Assistant request {} superseded by {}", previous, request);
        }
        info!("Assistant request {} for {:?}", request, self.query.trim());
        self.query.clear();
        Some(request)
    }

    /// Applies an answer if it belongs to the pending request.
    /// Returns whether it was applied.
    pub fn resolve(&mut self, request: RequestId, answer: AssistantAnswer) -> bool {
        if self.pending != Some(request) {
            debug!("Dropping stale assistant answer for {}", request);
            return false;
        }
        self.pending = None;
        self.answer = Some(answer);
        true
    }

    /// Abandons the pending request, if any. A shown answer stays.
    pub fn cancel(&mut self) -> Option<RequestId> {
        let cancelled = self.pending.take();
        if let Some(request) = cancelled {
            info!("Assistant request {} cancelled", request);
        }
        cancelled
    }
}

/// The simulated lookup: waits out the delay, then yields the canned answer.
pub async fn simulate_lookup(delay: Duration) -> AssistantAnswer {
    tokio::time::sleep(delay).await;
    canned_answer()
}
