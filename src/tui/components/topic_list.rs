//! # Topic List Component
//!
//! Left column: "All Posts" followed by the six categories.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TopicListState` lives in `TuiState`
//! - `TopicList` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState};

use crate::core::model::Category;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Row 0 is "All Posts"; rows 1..=6 follow `Category::ALL`.
const ROW_COUNT: usize = Category::ALL.len() + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicEvent {
    ShowAll,
    Select(Category),
}

pub struct TopicListState {
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for TopicListState {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicListState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    fn row_event(row: usize) -> Option<TopicEvent> {
        match row {
            0 => Some(TopicEvent::ShowAll),
            n => Category::ALL.get(n - 1).copied().map(TopicEvent::Select),
        }
    }
}

impl EventHandler for TopicListState {
    type Event = TopicEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(ROW_COUNT - 1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => Self::row_event(self.selected),
            _ => None,
        }
    }
}

pub struct TopicList<'a> {
    pub state: &'a mut TopicListState,
    /// The filter currently applied to the feed.
    pub active: Option<Category>,
    pub is_focused: bool,
}

impl Component for TopicList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rows = std::iter::once((None, "All Posts"))
            .chain(Category::ALL.iter().map(|&c| (Some(c), c.label())));
        let items: Vec<ListItem> = rows
            .map(|(category, label)| {
                let is_active = category == self.active;
                let marker = if is_active { "● " } else { "  " };
                let style = if is_active {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(label, style),
                ]))
            })
            .collect();

        let border_style = if self.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let highlight = if self.is_focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        let list = List::new(items)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(" Topics "),
            )
            .highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}
