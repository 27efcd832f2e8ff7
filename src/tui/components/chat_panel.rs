//! Live discussion log, pinned to the newest message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::model::ChatMessage;
use crate::tui::component::Component;

pub struct ChatPanel<'a> {
    pub messages: &'a [ChatMessage],
    /// Name the local participant posts under; their lines are highlighted.
    pub display_name: &'a str,
}

impl Component for ChatPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .messages
            .iter()
            .map(|m| {
                let author_style = if m.author == self.display_name {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                };
                Line::from(vec![
                    Span::styled(format!("{}: ", m.author), author_style),
                    Span::raw(m.content.as_str()),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
        let total = paragraph.line_count(area.width) as u16;
        let offset = total.saturating_sub(area.height);
        frame.render_widget(paragraph.scroll((offset, 0)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sample::seeded_chat;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(messages: &[ChatMessage], width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut panel = ChatPanel {
            messages,
            display_name: "You",
        };
        terminal.draw(|f| panel.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_renders_seeded_messages_in_order() {
        let text = render(&seeded_chat(), 120, 5);
        let first = text.find("ShippingPro:").unwrap();
        let second = text.find("LogisticsGuru:").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_short_viewport_keeps_newest() {
        let mut messages = seeded_chat();
        messages.push(ChatMessage {
            id: 99,
            author: "You".into(),
            content: "latest".into(),
        });
        let text = render(&messages, 120, 1);
        assert!(text.contains("You: latest"));
    }
}
