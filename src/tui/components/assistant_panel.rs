//! Assistant box in the right column: idle hint, spinner while a lookup
//! runs, or the title of the last answer.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::assistant::Assistant;
use crate::tui::component::Component;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct AssistantPanel<'a> {
    pub assistant: &'a Assistant,
    pub spinner_frame: usize,
    pub is_focused: bool,
}

impl AssistantPanel<'_> {
    fn lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();
        if self.assistant.is_pending() {
            lines.push(Line::from(vec![
                Span::styled(
                    SPINNER[self.spinner_frame % SPINNER.len()],
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(" Thinking...", Style::default().fg(Color::Yellow)),
            ]));
            lines.push(Line::styled(
                "Esc to cancel",
                Style::default().fg(Color::DarkGray),
            ));
        } else if let Some(answer) = self.assistant.answer() {
            lines.push(Line::styled(
                answer.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                format!("{} references · o to read", answer.references.len()),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            lines.push(Line::styled(
                "Ask about shipping best practices.",
                Style::default().fg(Color::Gray),
            ));
            lines.push(Line::styled(
                "Enter to write a question",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if !self.assistant.query.is_empty() {
            lines.push(Line::styled(
                format!("Draft: {}", self.assistant.query),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
        }
        lines
    }
}

impl Component for AssistantPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let paragraph = Paragraph::new(self.lines())
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(" AI Assistant "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}
