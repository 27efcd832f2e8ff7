//! # Discussion Feed
//!
//! `Forum` is the single owner of the canonical post list. Cards never hold
//! a private copy of their post: every vote and comment is an
//! update-by-index against this store, so a card re-rendered after a filter
//! or tab change shows the same tally it showed before.
//!
//! ```text
//! posts (canonical) ──► visible (category + search) ──► tab_view(tab)
//!                                                        ├── All: visible
//!                                                        ├── Hot: upvotes > threshold
//!                                                        ├── New: sorted copy, newest first
//!                                                        └── Live: chat panel
//! ```

use std::str::FromStr;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::clock::{Clock, parse_comment_date};
use crate::core::model::{Category, Comment, Post};

pub const DEFAULT_HOT_THRESHOLD: i64 = 20;
pub const DEFAULT_COLLAPSED_COMMENTS: usize = 2;
pub const DEFAULT_COMMENT_AUTHOR: &str = "Anonymous User";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Hot,
    New,
    Live,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::All, Tab::Hot, Tab::New, Tab::Live];

    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All Posts",
            Tab::Hot => "Hot",
            Tab::New => "New",
            Tab::Live => "Live Discussion",
        }
    }

    pub fn next(self) -> Tab {
        match self {
            Tab::All => Tab::Hot,
            Tab::Hot => Tab::New,
            Tab::New => Tab::Live,
            Tab::Live => Tab::All,
        }
    }

    pub fn prev(self) -> Tab {
        match self {
            Tab::All => Tab::Live,
            Tab::Hot => Tab::All,
            Tab::New => Tab::Hot,
            Tab::Live => Tab::New,
        }
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Tab::All),
            "hot" => Ok(Tab::Hot),
            "new" => Ok(Tab::New),
            "live" => Ok(Tab::Live),
            other => Err(format!("unknown tab '{other}' (expected all, hot, new or live)")),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_label(s.trim()).ok_or_else(|| format!("unknown category '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Down,
}

/// What a tab shows. Post lists are indices into the canonical list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabView {
    Posts(Vec<usize>),
    Live,
}

/// The control offered under a card's comment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandControl {
    ShowAll(usize),
    ShowLess,
}

/// Per-card view state. The post itself stays in `Forum::posts`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostCard {
    pub draft: String,
    pub expanded: bool,
}

pub struct Forum {
    posts: Vec<Post>,
    cards: Vec<PostCard>,
    visible: Vec<usize>,
    active_category: Option<Category>,
    active_tab: Tab,
    search: String,
    hot_threshold: i64,
    collapsed_comments: usize,
    comment_author: String,
}

impl Forum {
    pub fn new(posts: Vec<Post>) -> Self {
        let cards = vec![PostCard::default(); posts.len()];
        let visible = (0..posts.len()).collect();
        Self {
            posts,
            cards,
            visible,
            active_category: None,
            active_tab: Tab::All,
            search: String::new(),
            hot_threshold: DEFAULT_HOT_THRESHOLD,
            collapsed_comments: DEFAULT_COLLAPSED_COMMENTS,
            comment_author: DEFAULT_COMMENT_AUTHOR.to_string(),
        }
    }

    pub fn with_hot_threshold(mut self, threshold: i64) -> Self {
        self.hot_threshold = threshold;
        self
    }

    pub fn with_collapsed_comments(mut self, count: usize) -> Self {
        self.collapsed_comments = count;
        self
    }

    pub fn with_comment_author(mut self, author: impl Into<String>) -> Self {
        self.comment_author = author.into();
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, index: usize) -> Option<&Post> {
        self.posts.get(index)
    }

    pub fn card(&self, index: usize) -> Option<&PostCard> {
        self.cards.get(index)
    }

    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn active_category(&self) -> Option<Category> {
        self.active_category
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn hot_threshold(&self) -> i64 {
        self.hot_threshold
    }

    // ------------------------------------------------------------------
    // Filtering and tabs
    // ------------------------------------------------------------------

    /// Narrows the feed to one category, keeping canonical order, and jumps
    /// back to the "all" tab. Clears any search.
    pub fn select_category(&mut self, category: Category) {
        self.active_category = Some(category);
        self.active_tab = Tab::All;
        self.search.clear();
        self.refresh_visible();
        info!(
            "Selected category {} ({} posts)",
            category.label(),
            self.visible.len()
        );
    }

    /// Shows every post again. The active tab is left alone.
    pub fn reset_filter(&mut self) {
        self.active_category = None;
        self.search.clear();
        self.refresh_visible();
        info!("Filter reset ({} posts)", self.visible.len());
    }

    /// Case-insensitive match on title or content, applied on top of the
    /// category filter. An empty query lifts the restriction.
    pub fn search(&mut self, query: &str) {
        self.search = query.trim().to_string();
        self.refresh_visible();
        debug!("Search {:?} matched {} posts", self.search, self.visible.len());
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    fn refresh_visible(&mut self) {
        let needle = self.search.to_lowercase();
        self.visible = self
            .posts
            .iter()
            .enumerate()
            .filter(|(_, post)| self.active_category.is_none_or(|c| post.category == c))
            .filter(|(_, post)| {
                needle.is_empty()
                    || post.title.to_lowercase().contains(&needle)
                    || post.content.to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect();
    }

    /// Derives what `tab` shows from the current visible set. Never mutates
    /// `visible`; the "new" ordering is a sorted copy.
    pub fn tab_view(&self, tab: Tab) -> TabView {
        match tab {
            Tab::All => TabView::Posts(self.visible.clone()),
            Tab::Hot => TabView::Posts(
                self.visible
                    .iter()
                    .copied()
                    .filter(|&i| self.posts[i].upvotes > self.hot_threshold)
                    .collect(),
            ),
            Tab::New => {
                let mut sorted = self.visible.clone();
                // None (no comments or unparseable date) sorts below every date,
                // so descending order puts those posts last. Stable on ties.
                sorted.sort_by(|&a, &b| self.first_comment_date(b).cmp(&self.first_comment_date(a)));
                TabView::Posts(sorted)
            }
            Tab::Live => TabView::Live,
        }
    }

    fn first_comment_date(&self, index: usize) -> Option<chrono::NaiveDate> {
        self.posts[index]
            .comments
            .first()
            .and_then(|c| parse_comment_date(&c.date))
    }

    // ------------------------------------------------------------------
    // Card operations (update-by-index)
    // ------------------------------------------------------------------

    /// Applies one vote and returns the new tally. No floor, no dedup.
    pub fn vote(&mut self, index: usize, direction: VoteDirection) -> Option<i64> {
        let Some(post) = self.posts.get_mut(index) else {
            warn!("Vote for unknown post index {}", index);
            return None;
        };
        post.upvotes += match direction {
            VoteDirection::Up => 1,
            VoteDirection::Down => -1,
        };
        debug!("Post {} now at {} upvotes", index, post.upvotes);
        Some(post.upvotes)
    }

    pub fn edit_draft(&mut self, index: usize, text: &str) {
        if let Some(card) = self.cards.get_mut(index) {
            card.draft.clear();
            card.draft.push_str(text);
        }
    }

    /// Appends the card's draft as a new comment and clears the draft.
    /// Whitespace-only drafts are ignored. Returns the new comment id.
    pub fn submit_comment(&mut self, index: usize, clock: &dyn Clock) -> Option<i64> {
        let (Some(post), Some(card)) = (self.posts.get_mut(index), self.cards.get_mut(index)) else {
            warn!("Comment for unknown post index {}", index);
            return None;
        };
        if card.draft.trim().is_empty() {
            return None;
        }

        let id = post.next_comment_id(clock.now_millis());
        post.comments.push(Comment {
            id,
            author: self.comment_author.clone(),
            content: std::mem::take(&mut card.draft),
            date: clock.locale_date(),
        });
        info!("Comment {} added to post {}", id, index);
        Some(id)
    }

    /// Flips the card's expand state and returns the new value.
    pub fn toggle_expanded(&mut self, index: usize) -> Option<bool> {
        let card = self.cards.get_mut(index)?;
        card.expanded = !card.expanded;
        Some(card.expanded)
    }

    /// Comments a card shows: everything when expanded, otherwise the first
    /// few in insertion order.
    pub fn visible_comments(&self, index: usize) -> &[Comment] {
        let (Some(post), Some(card)) = (self.posts.get(index), self.cards.get(index)) else {
            return &[];
        };
        if card.expanded {
            &post.comments
        } else {
            &post.comments[..post.comments.len().min(self.collapsed_comments)]
        }
    }

    pub fn expand_control(&self, index: usize) -> Option<ExpandControl> {
        let post = self.posts.get(index)?;
        let card = self.cards.get(index)?;
        if post.comments.len() <= self.collapsed_comments {
            return None;
        }
        Some(if card.expanded {
            ExpandControl::ShowLess
        } else {
            ExpandControl::ShowAll(post.comments.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::sample_posts;
    use crate::test_support::{FixedClock, test_forum};

    fn titles(forum: &Forum, view: &TabView) -> Vec<String> {
        match view {
            TabView::Posts(indices) => indices
                .iter()
                .map(|&i| forum.post(i).unwrap().title.clone())
                .collect(),
            TabView::Live => panic!("expected a post list"),
        }
    }

    fn bare_post(title: &str, category: Category, upvotes: i64, dates: &[&str]) -> Post {
        Post {
            title: title.to_string(),
            content: String::new(),
            upvotes,
            category,
            comments: dates
                .iter()
                .enumerate()
                .map(|(i, d)| Comment {
                    id: i as i64 + 1,
                    author: "a".into(),
                    content: "c".into(),
                    date: d.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_vote_up_then_down_is_identity() {
        let mut forum = test_forum();
        for i in 0..forum.posts().len() {
            let original = forum.post(i).unwrap().upvotes;
            assert_eq!(forum.vote(i, VoteDirection::Up), Some(original + 1));
            assert_eq!(forum.vote(i, VoteDirection::Down), Some(original));
        }
    }

    #[test]
    fn test_vote_has_no_floor() {
        let mut forum = Forum::new(vec![bare_post("p", Category::Packaging, 0, &[])]);
        forum.vote(0, VoteDirection::Down);
        assert_eq!(forum.vote(0, VoteDirection::Down), Some(-2));
    }

    #[test]
    fn test_vote_unknown_index_is_noop() {
        let mut forum = test_forum();
        assert_eq!(forum.vote(99, VoteDirection::Up), None);
    }

    #[test]
    fn test_votes_survive_filter_changes() {
        let mut forum = test_forum();
        forum.vote(3, VoteDirection::Up);
        forum.select_category(Category::EcoPackaging);
        forum.reset_filter();
        assert_eq!(forum.post(3).unwrap().upvotes, 43);
    }

    #[test]
    fn test_whitespace_comment_is_ignored() {
        let mut forum = test_forum();
        let clock = FixedClock::default();
        let before = forum.post(0).unwrap().comments.len();
        forum.edit_draft(0, "   \t ");
        assert_eq!(forum.submit_comment(0, &clock), None);
        assert_eq!(forum.post(0).unwrap().comments.len(), before);
        // Draft is left as typed when nothing was submitted
        assert_eq!(forum.card(0).unwrap().draft, "   \t ");
    }

    #[test]
    fn test_comment_appends_last_and_clears_draft() {
        let mut forum = test_forum();
        let clock = FixedClock::default();
        let before = forum.post(1).unwrap().comments.len();

        forum.edit_draft(1, "Air pillows work well for us");
        let id = forum.submit_comment(1, &clock).unwrap();

        let post = forum.post(1).unwrap();
        assert_eq!(post.comments.len(), before + 1);
        let last = post.comments.last().unwrap();
        assert_eq!(last.id, id);
        assert_eq!(last.id, clock.millis);
        assert_eq!(last.author, "Anonymous User");
        assert_eq!(last.content, "Air pillows work well for us");
        assert_eq!(last.date, "6/24/2023");
        assert!(forum.card(1).unwrap().draft.is_empty());
    }

    #[test]
    fn test_same_millisecond_comments_keep_unique_ids() {
        let mut forum = test_forum();
        let clock = FixedClock::default();
        forum.edit_draft(0, "first");
        let a = forum.submit_comment(0, &clock).unwrap();
        forum.edit_draft(0, "second");
        let b = forum.submit_comment(0, &clock).unwrap();
        assert_ne!(a, b);
        assert_eq!(b, a + 1);
    }

    #[test]
    fn test_collapsed_shows_first_two_comments() {
        let mut forum = test_forum();
        assert_eq!(forum.visible_comments(0).len(), 2);
        assert_eq!(forum.visible_comments(0)[0].author, "ShippingPro");
        assert_eq!(forum.expand_control(0), Some(ExpandControl::ShowAll(3)));

        forum.toggle_expanded(0);
        assert_eq!(forum.visible_comments(0).len(), 3);
        assert_eq!(forum.expand_control(0), Some(ExpandControl::ShowLess));

        forum.toggle_expanded(0);
        assert_eq!(forum.visible_comments(0).len(), 2);
    }

    #[test]
    fn test_no_expand_control_with_two_or_fewer_comments() {
        let mut forum = test_forum();
        assert_eq!(forum.expand_control(1), None);
        forum.toggle_expanded(1);
        assert_eq!(forum.expand_control(1), None);
        assert_eq!(forum.visible_comments(1).len(), 2);
    }

    #[test]
    fn test_new_comment_reveals_expand_control() {
        let mut forum = test_forum();
        let clock = FixedClock::default();
        forum.edit_draft(1, "third");
        forum.submit_comment(1, &clock);
        assert_eq!(forum.expand_control(1), Some(ExpandControl::ShowAll(3)));
    }

    #[test]
    fn test_select_category_preserves_order_and_resets_tab() {
        let mut forum = Forum::new(vec![
            bare_post("a", Category::Packaging, 1, &["2023-01-01"]),
            bare_post("b", Category::DeliverySpeed, 1, &["2023-01-01"]),
            bare_post("c", Category::Packaging, 1, &["2023-01-01"]),
        ]);
        forum.select_tab(Tab::Hot);
        forum.select_category(Category::Packaging);
        assert_eq!(forum.active_tab(), Tab::All);
        assert_eq!(forum.visible(), &[0, 2]);
        assert!(
            forum
                .visible()
                .iter()
                .all(|&i| forum.post(i).unwrap().category == Category::Packaging)
        );
    }

    #[test]
    fn test_reset_filter_restores_everything_but_tab() {
        let mut forum = test_forum();
        forum.select_category(Category::EcoPackaging);
        forum.select_tab(Tab::Hot);
        forum.reset_filter();
        assert_eq!(forum.visible(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(forum.active_category(), None);
        assert_eq!(forum.active_tab(), Tab::Hot);
    }

    #[test]
    fn test_hot_excludes_threshold_boundary() {
        let forum = Forum::new(vec![
            bare_post("twenty", Category::Packaging, 20, &[]),
            bare_post("twenty-one", Category::Packaging, 21, &[]),
        ]);
        assert_eq!(forum.tab_view(Tab::Hot), TabView::Posts(vec![1]));
    }

    #[test]
    fn test_hot_threshold_is_configurable() {
        let forum = test_forum().with_hot_threshold(30);
        assert_eq!(forum.tab_view(Tab::Hot), TabView::Posts(vec![2, 3, 4]));
    }

    #[test]
    fn test_new_sorts_descending_by_first_comment() {
        let forum = test_forum();
        let view = forum.tab_view(Tab::New);
        assert_eq!(
            titles(&forum, &view),
            vec![
                "Improving delivery speed without breaking the bank",
                "Strategies for optimizing last-mile delivery",
                "Eco-friendly packaging solutions for e-commerce",
                "UPS vs FedEx for international B2B shipments",
                "Best practices for reducing shipping damages",
                "New USPS rates impact on small businesses",
            ]
        );
        // Sorting is on a copy
        assert_eq!(forum.visible(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(forum.tab_view(Tab::All), TabView::Posts(vec![0, 1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_new_puts_uncommented_posts_last() {
        let forum = Forum::new(vec![
            bare_post("empty-1", Category::Packaging, 0, &[]),
            bare_post("old", Category::Packaging, 0, &["2023-06-01"]),
            bare_post("garbled", Category::Packaging, 0, &["someday"]),
            bare_post("recent", Category::Packaging, 0, &["6/30/2023"]),
            bare_post("empty-2", Category::Packaging, 0, &[]),
        ]);
        let view = forum.tab_view(Tab::New);
        assert_eq!(
            titles(&forum, &view),
            vec!["recent", "old", "empty-1", "garbled", "empty-2"]
        );
    }

    #[test]
    fn test_live_tab_ignores_visible() {
        let mut forum = test_forum();
        forum.select_category(Category::Packaging);
        assert_eq!(forum.tab_view(Tab::Live), TabView::Live);
    }

    #[test]
    fn test_search_matches_title_and_content_case_insensitively() {
        let mut forum = test_forum();
        forum.search("usps");
        assert_eq!(forum.visible(), &[2]);
        forum.search("EXPEDITED");
        assert_eq!(forum.visible(), &[5]);
        forum.search("  ");
        assert_eq!(forum.visible().len(), 6);
    }

    #[test]
    fn test_search_composes_with_category() {
        let mut forum = test_forum();
        forum.select_category(Category::CarrierComparison);
        forum.search("packaging");
        assert!(forum.visible().is_empty());
        forum.search("fedex");
        assert_eq!(forum.visible(), &[0]);
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("hot".parse::<Tab>(), Ok(Tab::Hot));
        assert_eq!(" Live ".parse::<Tab>(), Ok(Tab::Live));
        assert!("feed".parse::<Tab>().is_err());
        assert_eq!(Tab::Live.next(), Tab::All);
        assert_eq!(Tab::All.prev(), Tab::Live);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Eco-Packaging".parse::<Category>(), Ok(Category::EcoPackaging));
        assert!("Eco".parse::<Category>().is_err());
    }

    #[test]
    fn test_sample_forum_matches_dataset() {
        let forum = Forum::new(sample_posts());
        assert_eq!(forum.posts().len(), 6);
        assert_eq!(forum.hot_threshold(), DEFAULT_HOT_THRESHOLD);
    }
}
