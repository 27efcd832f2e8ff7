//! # Feed Component
//!
//! The centre column: a tab bar over either a scrollable stack of post cards
//! or the live discussion.
//!
//! ## Architecture
//!
//! `FeedList` is a transient component (created each frame) that wraps
//! `&'a mut FeedState` (persistent state) and borrows the forum and chat as
//! props. Card heights are measured every frame; the handful of posts makes
//! a cache pointless, but the prefix sums still drive visible-range culling
//! and keep the selected card on screen.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph, Tabs};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::chat::LiveChat;
use crate::core::feed::{Forum, Tab, TabView};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::chat_panel::ChatPanel;
use crate::tui::components::post_card::PostCardView;
use crate::tui::event::TuiEvent;

/// Selection and scroll state for the feed.
/// Must be persisted in the parent TuiState.
pub struct FeedState {
    pub scroll_state: ScrollViewState,
    /// Position of the selected card within the current tab's list.
    pub selected: usize,
    /// Canonical index of the last post voted on. Held until the cursor
    /// moves so queued votes stay on that post even if it leaves the tab.
    pinned: Option<usize>,
    heights: Vec<u16>,
    prefix_heights: Vec<u16>,
    viewport_height: u16,
    /// Cards in the current tab as of the last render.
    item_count: usize,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected: 0,
            pinned: None,
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            viewport_height: 0,
            item_count: 0,
        }
    }

    /// Back to the first card, scrolled to the top. Called whenever the
    /// list the feed shows is replaced (filter, search, tab).
    pub fn reset(&mut self) {
        self.selected = 0;
        self.pinned = None;
        self.scroll_state.scroll_to_top();
    }

    pub fn pin(&mut self, post: usize) {
        self.pinned = Some(post);
    }

    /// Moves the selection onto the pinned post in `view`. Returns false when
    /// the pinned post is no longer listed.
    pub fn follow_pinned(&mut self, view: &TabView) -> bool {
        let (Some(post), TabView::Posts(indices)) = (self.pinned, view) else {
            return true;
        };
        match indices.iter().position(|&i| i == post) {
            Some(pos) => {
                self.selected = pos;
                true
            }
            None => false,
        }
    }

    /// Canonical index of the selected card in `view`.
    pub fn selected_post(&self, view: &TabView) -> Option<usize> {
        match view {
            TabView::Posts(indices) => indices.get(self.selected).copied(),
            TabView::Live => None,
        }
    }

    fn set_heights(&mut self, heights: Vec<u16>) {
        self.item_count = heights.len();
        self.prefix_heights = heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
        self.heights = heights;
        if self.selected >= self.item_count {
            self.selected = self.item_count.saturating_sub(1);
        }
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Scroll the viewport so the selected card is fully visible.
    /// If the card is taller than the viewport, align its top edge.
    pub fn scroll_to_selected(&mut self) {
        let idx = self.selected;
        if idx >= self.prefix_heights.len() {
            return;
        }
        let item_top = if idx == 0 {
            0
        } else {
            self.prefix_heights[idx - 1]
        };
        let item_bottom = self.prefix_heights[idx];
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y || self.heights[idx] > self.viewport_height {
            self.scroll_state
                .set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state
                .set_offset(Position { x: 0, y: new_y });
        }
    }

    fn visible_range(&self, scroll_offset: u16) -> std::ops::Range<usize> {
        let buffer = self.viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(self.viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());
        start..end
    }
}

/// Scroll and selection only; the parent maps the selection to actions.
impl EventHandler for FeedState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.pinned = None;
                self.selected = self.selected.saturating_sub(1);
                self.scroll_to_selected();
            }
            TuiEvent::CursorDown => {
                self.pinned = None;
                if self.selected + 1 < self.item_count {
                    self.selected += 1;
                }
                self.scroll_to_selected();
            }
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            _ => {}
        }
        None
    }
}

/// Created fresh each frame with references to state and data.
pub struct FeedList<'a> {
    pub state: &'a mut FeedState,
    pub forum: &'a Forum,
    pub chat: &'a LiveChat,
    pub display_name: &'a str,
    pub is_focused: bool,
}

impl FeedList<'_> {
    fn title(&self) -> String {
        let mut title = match self.forum.active_category() {
            Some(category) => format!(" Discussions · {} ", category.label()),
            None => String::from(" Discussions "),
        };
        if !self.forum.search_query().is_empty() {
            title.push_str(&format!("· \"{}\" ", self.forum.search_query()));
        }
        title
    }

    fn render_posts(&mut self, frame: &mut Frame, area: Rect, indices: &[usize]) {
        if indices.is_empty() {
            self.state.set_heights(Vec::new());
            frame.render_widget(
                Paragraph::new("No posts match.").style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        // -1 for the scrollbar
        let content_width = area.width.saturating_sub(1);
        let forum = self.forum;
        let selected = self.state.selected;
        let cards: Vec<PostCardView> = indices
            .iter()
            .enumerate()
            .filter_map(|(pos, &i)| {
                let post = forum.post(i)?;
                Some(PostCardView {
                    post,
                    comments: forum.visible_comments(i),
                    control: forum.expand_control(i),
                    draft: forum.card(i).map(|c| c.draft.as_str()).unwrap_or(""),
                    is_selected: self.is_focused && pos == selected,
                })
            })
            .collect();
        self.state
            .set_heights(cards.iter().map(|c| c.height(content_width)).collect());
        self.state.viewport_height = area.height;
        self.state.clamp_scroll();

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.visible_range(scroll_offset);
        let mut scroll_view = ScrollView::new(Size::new(content_width, self.state.total_height()))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset = if visible_range.start > 0 {
            self.state.prefix_heights[visible_range.start - 1]
        } else {
            0
        };
        for i in visible_range {
            let height = self.state.heights[i];
            scroll_view.render_widget(cards[i], Rect::new(0, y_offset, content_width, height));
            y_offset += height;
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl Component for FeedList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [tabs_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);

        let active = self.forum.active_tab();
        let selected = Tab::ALL.iter().position(|&t| t == active).unwrap_or(0);
        let tabs = Tabs::new(Tab::ALL.iter().map(|t| Line::from(t.label())))
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            );
        frame.render_widget(tabs, tabs_area);

        let view = self.forum.tab_view(active);
        // What the user now sees is the selection; a post that left the tab lets go
        if !self.state.follow_pinned(&view) {
            self.state.pinned = None;
        }
        match view {
            TabView::Live => {
                self.state.set_heights(Vec::new());
                let mut panel = ChatPanel {
                    messages: self.chat.messages(),
                    display_name: self.display_name,
                };
                panel.render(frame, body_area);
            }
            TabView::Posts(indices) => self.render_posts(frame, body_area, &indices),
        }
    }
}
