//! # Sidebar Component
//!
//! Right column under the assistant: trending groups, experts and virtual
//! events stacked in three boxes. One cursor walks all rows top to bottom;
//! Enter on a row opens that item's dialog.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::sidebar::{DialogTarget, EventTab, Sidebar};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    /// Enter on a row; the parent resolves the row to a dialog target.
    Activate,
    /// `e` flips between upcoming and live events.
    ToggleEventTab,
}

#[derive(Default)]
pub struct SidebarState {
    /// Flattened row: groups, then experts, then listed events.
    pub selected: usize,
    row_count: usize,
}

impl SidebarState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-reads the row count so the cursor stays in range after the event
    /// list changes.
    pub fn sync(&mut self, sidebar: &Sidebar) {
        self.row_count =
            sidebar.groups.len() + sidebar.experts.len() + sidebar.listed_events().len();
        if self.selected >= self.row_count {
            self.selected = self.row_count.saturating_sub(1);
        }
    }

    /// The dialog the selected row opens.
    pub fn target(&self, sidebar: &Sidebar) -> Option<DialogTarget> {
        let groups = sidebar.groups.len();
        let experts = sidebar.experts.len();
        let events = sidebar.listed_events().len();
        match self.selected {
            i if i < groups => Some(DialogTarget::JoinGroup(i)),
            i if i < groups + experts => Some(DialogTarget::Expert(i - groups)),
            i if i < groups + experts + events => Some(DialogTarget::Rsvp(i - groups - experts)),
            _ => None,
        }
    }
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if self.selected + 1 < self.row_count {
                    self.selected += 1;
                }
                None
            }
            TuiEvent::Submit => Some(SidebarEvent::Activate),
            TuiEvent::InputChar('e') => Some(SidebarEvent::ToggleEventTab),
            _ => None,
        }
    }
}

pub struct SidebarPanel<'a> {
    pub state: &'a mut SidebarState,
    pub sidebar: &'a Sidebar,
    pub is_focused: bool,
}

impl SidebarPanel<'_> {
    fn row_style(&self, row: usize) -> Style {
        if self.is_focused && row == self.state.selected {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        }
    }

    fn section(title: &str, lines: Vec<Line<'static>>) -> Paragraph<'static> {
        Paragraph::new(lines).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" {title} ")),
        )
    }
}

impl Component for SidebarPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.sidebar);
        let sidebar = self.sidebar;
        let mut row = 0usize;

        let group_lines: Vec<Line> = sidebar
            .groups
            .iter()
            .map(|g| {
                let style = self.row_style(row);
                row += 1;
                let mut spans = vec![
                    Span::styled(format!("# {}", g.title), style),
                    Span::styled(
                        format!("  {}", g.discussions),
                        style.fg(Color::DarkGray),
                    ),
                ];
                if g.joined {
                    spans.push(Span::styled(" ✓", style.fg(Color::Green)));
                }
                Line::from(spans)
            })
            .collect();

        let expert_lines: Vec<Line> = sidebar
            .experts
            .iter()
            .map(|e| {
                let style = self.row_style(row);
                row += 1;
                let (dot, dot_color) = if e.is_live {
                    ("● ", Color::Green)
                } else {
                    ("○ ", Color::DarkGray)
                };
                let mut spans = vec![
                    Span::styled(dot, style.fg(dot_color)),
                    Span::styled(e.name.clone(), style),
                ];
                if e.in_call {
                    spans.push(Span::styled(" in call", style.fg(Color::Green)));
                } else if e.booking.is_some() {
                    spans.push(Span::styled(" booked", style.fg(Color::Blue)));
                }
                Line::from(spans)
            })
            .collect();

        let tab_style = |tab: EventTab| {
            if sidebar.event_tab == tab {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            }
        };
        let mut event_lines = vec![Line::from(vec![
            Span::styled("Upcoming", tab_style(EventTab::Upcoming)),
            Span::raw(" | "),
            Span::styled("Live Now", tab_style(EventTab::LiveNow)),
        ])];
        let listed = sidebar.listed_events();
        if listed.is_empty() {
            event_lines.push(Line::styled(
                "No live events at the moment",
                Style::default().fg(Color::DarkGray),
            ));
        }
        for event in listed {
            let style = self.row_style(row);
            row += 1;
            let mut spans = vec![Span::styled(event.title.clone(), style)];
            if event.rsvp {
                spans.push(Span::styled(" ✓", style.fg(Color::Green)));
            }
            event_lines.push(Line::from(spans));
            event_lines.push(Line::styled(
                format!("  {}", event.date),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let [groups_area, experts_area, events_area] = Layout::vertical([
            Constraint::Length(group_lines.len() as u16 + 2),
            Constraint::Length(expert_lines.len() as u16 + 2),
            Constraint::Min(3),
        ])
        .areas(area);

        frame.render_widget(Self::section("Trending Groups", group_lines), groups_area);
        frame.render_widget(Self::section("Experts", expert_lines), experts_area);
        frame.render_widget(Self::section("Virtual Events", event_lines), events_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::camera::CameraPreview;
    use crate::core::sample::{experts, trending_groups, virtual_events};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn sidebar() -> Sidebar {
        Sidebar::new(
            trending_groups(),
            experts(),
            virtual_events(),
            CameraPreview::new(true),
        )
    }

    fn render(state: &mut SidebarState, sidebar: &Sidebar) -> String {
        let backend = TestBackend::new(40, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                SidebarPanel {
                    state: &mut *state,
                    sidebar,
                    is_focused: true,
                }
                .render(f, f.area())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_rows_map_to_dialog_targets() {
        let sidebar = sidebar();
        let mut state = SidebarState::new();
        state.sync(&sidebar);
        assert_eq!(state.target(&sidebar), Some(DialogTarget::JoinGroup(0)));
        state.selected = 4;
        assert_eq!(state.target(&sidebar), Some(DialogTarget::Expert(0)));
        state.selected = 7;
        assert_eq!(state.target(&sidebar), Some(DialogTarget::Rsvp(0)));
        state.selected = 8;
        assert_eq!(state.target(&sidebar), Some(DialogTarget::Rsvp(1)));
    }

    #[test]
    fn test_cursor_clamps_to_last_row() {
        let sidebar = sidebar();
        let mut state = SidebarState::new();
        state.sync(&sidebar);
        for _ in 0..20 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, 8);
    }

    #[test]
    fn test_live_tab_hides_events_and_reclamps() {
        let mut sidebar = sidebar();
        let mut state = SidebarState::new();
        state.sync(&sidebar);
        state.selected = 8;
        sidebar.event_tab = EventTab::LiveNow;
        let text = render(&mut state, &sidebar);
        assert!(text.contains("No live events at the moment"));
        assert_eq!(state.selected, 6);
        assert_eq!(state.target(&sidebar), Some(DialogTarget::Expert(2)));
    }

    #[test]
    fn test_render_lists_everything() {
        let sidebar = sidebar();
        let mut state = SidebarState::new();
        let text = render(&mut state, &sidebar);
        assert!(text.contains("# Eco-Packaging"));
        assert!(text.contains("● Sarah Johnson"));
        assert!(text.contains("○ Mike Chen"));
        assert!(text.contains("Future of Last-Mile Delivery"));
    }

    #[test]
    fn test_event_keys() {
        let mut state = SidebarState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('e')),
            Some(SidebarEvent::ToggleEventTab)
        );
        assert_eq!(state.handle_event(&TuiEvent::Submit), Some(SidebarEvent::Activate));
    }
}
