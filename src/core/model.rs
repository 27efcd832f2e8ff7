//! # Forum Records
//!
//! Plain data carried by the forum: posts, comments, chat messages and the
//! assistant's answer. Nothing here mutates itself; the owning stores in
//! `feed`, `chat` and `assistant` do that.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of topic labels a post can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Carrier Comparison")]
    CarrierComparison,
    #[serde(rename = "Packaging")]
    Packaging,
    #[serde(rename = "Cost Optimization")]
    CostOptimization,
    #[serde(rename = "Eco-Packaging")]
    EcoPackaging,
    #[serde(rename = "Last-Mile Innovation")]
    LastMileInnovation,
    #[serde(rename = "Delivery Speed")]
    DeliverySpeed,
}

impl Category {
    /// Sidebar order.
    pub const ALL: [Category; 6] = [
        Category::CarrierComparison,
        Category::Packaging,
        Category::CostOptimization,
        Category::EcoPackaging,
        Category::LastMileInnovation,
        Category::DeliverySpeed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::CarrierComparison => "Carrier Comparison",
            Category::Packaging => "Packaging",
            Category::CostOptimization => "Cost Optimization",
            Category::EcoPackaging => "Eco-Packaging",
            Category::LastMileInnovation => "Last-Mile Innovation",
            Category::DeliverySpeed => "Delivery Speed",
        }
    }

    /// Exact label match. Unknown labels are not a category.
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reply attached to exactly one post. `id` is unique within that post only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub author: String,
    pub content: String,
    /// Seed comments carry ISO dates, user comments an en-US locale date.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub content: String,
    /// No floor: downvoting below zero is allowed.
    pub upvotes: i64,
    pub category: Category,
    /// Insertion order is display order.
    pub comments: Vec<Comment>,
}

impl Post {
    /// Next comment id for this post: the timestamp, bumped past any existing id.
    pub fn next_comment_id(&self, now_millis: i64) -> i64 {
        let max = self.comments.iter().map(|c| c.id).max().unwrap_or(0);
        now_millis.max(max + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantAnswer {
    pub title: String,
    pub content: String,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: i64,
    pub author: String,
    pub content: String,
}
