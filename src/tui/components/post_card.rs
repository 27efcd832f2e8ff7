//! # PostCard Component
//!
//! Renders one post: vote tally, title, body, category, the visible slice of
//! comments and the show-all/show-less control.
//!
//! `PostCardView` is a transient widget built each frame from the canonical
//! post and its card state. It measures itself with `Paragraph::line_count`
//! so the feed can lay out the scroll canvas before drawing anything.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::feed::ExpandControl;
use crate::core::model::{Comment, Post};

#[derive(Clone, Copy)]
pub struct PostCardView<'a> {
    pub post: &'a Post,
    pub comments: &'a [Comment],
    pub control: Option<ExpandControl>,
    pub draft: &'a str,
    pub is_selected: bool,
}

impl<'a> PostCardView<'a> {
    fn paragraph(&self) -> Paragraph<'a> {
        let tally_style = match self.post.upvotes {
            n if n > 0 => Style::default().fg(Color::Green),
            0 => Style::default().fg(Color::Gray),
            _ => Style::default().fg(Color::Red),
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("▲ {} ▼  ", self.post.upvotes), tally_style),
                Span::styled(
                    self.post.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(self.post.content.as_str()),
            Line::from(Span::styled(
                format!(
                    "{} comments · {}",
                    self.post.comments.len(),
                    self.post.category.label()
                ),
                Style::default().fg(Color::Magenta),
            )),
        ];

        for comment in self.comments {
            lines.push(Line::from(vec![
                Span::styled(
                    comment.author.as_str(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", comment.date),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            lines.push(Line::styled(
                format!("  {}", comment.content),
                Style::default().fg(Color::Gray),
            ));
        }

        match self.control {
            Some(ExpandControl::ShowAll(n)) => lines.push(Line::styled(
                format!("Show all {n} comments"),
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            )),
            Some(ExpandControl::ShowLess) => lines.push(Line::styled(
                "Show less",
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            )),
            None => {}
        }

        if !self.draft.is_empty() {
            lines.push(Line::styled(
                format!("Draft: {}", self.draft),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ));
        }

        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .padding(Padding::horizontal(1)),
            )
            .wrap(Wrap { trim: false })
    }

    /// Rendered height at `width`, borders included.
    pub fn height(&self, width: u16) -> u16 {
        if width <= 4 {
            return 1;
        }
        self.paragraph().line_count(width) as u16
    }
}

impl Widget for PostCardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.paragraph().render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_forum;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_string(view: PostCardView<'_>, width: u16) -> String {
        let height = view.height(width);
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| f.render_widget(view, f.area()))
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
    fn test_collapsed_card_shows_control() {
        let forum = test_forum();
        let view = PostCardView {
            post: forum.post(0).unwrap(),
            comments: forum.visible_comments(0),
            control: forum.expand_control(0),
            draft: "",
            is_selected: false,
        };
        let text = render_to_string(view, 200);
        assert!(text.contains("▲ 24 ▼"));
        assert!(text.contains("ShippingPro"));
        assert!(text.contains("LogisticsGuru"));
        assert!(!text.contains("GlobalTrader"));
        assert!(text.contains("Show all 3 comments"));
        assert!(text.contains("3 comments · Carrier Comparison"));
    }

    #[test]
    fn test_card_without_control() {
        let forum = test_forum();
        let view = PostCardView {
            post: forum.post(1).unwrap(),
            comments: forum.visible_comments(1),
            control: forum.expand_control(1),
            draft: "half-written",
            is_selected: true,
        };
        let text = render_to_string(view, 200);
        assert!(!text.contains("Show all"));
        assert!(text.contains("Draft: half-written"));
    }

    #[test]
    fn test_height_grows_when_narrow() {
        let forum = test_forum();
        let view = PostCardView {
            post: forum.post(0).unwrap(),
            comments: forum.visible_comments(0),
            control: forum.expand_control(0),
            draft: "",
            is_selected: false,
        };
        // 3 header lines + 2 comments * 2 lines + control + 2 borders
        assert_eq!(view.height(400), 10);
        assert!(view.height(40) > view.height(400));
    }
}
