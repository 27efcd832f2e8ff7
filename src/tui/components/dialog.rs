//! # Dialog Overlay
//!
//! Centered modal for whichever dialog the core reports as open: join a
//! group, join or schedule an expert call, RSVP to an event, or read the
//! assistant's answer. Stateless; everything it shows is in `App`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::camera::{CameraPreview, PreviewState};
use crate::core::sidebar::{DialogTarget, Expert};
use crate::core::state::App;
use crate::tui::component::Component;

pub struct Dialog<'a> {
    pub app: &'a App,
    pub target: DialogTarget,
}

struct Content<'a> {
    title: String,
    body: Vec<Line<'a>>,
    help: &'static str,
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn camera_lines(camera: &CameraPreview) -> Vec<Line<'static>> {
    if !camera.is_enabled() {
        return vec![Line::styled("Camera preview disabled", dim())];
    }
    let line = match camera.state() {
        PreviewState::Off => Line::styled("Camera off", dim()),
        PreviewState::Requesting { .. } => {
            Line::styled("Requesting camera...", Style::default().fg(Color::Yellow))
        }
        PreviewState::Live(guard) => Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Red)),
            Span::raw(format!("Preview: {}", guard.track_labels().join(", "))),
        ]),
        // Failed acquisition leaves an empty preview; the error only goes to the log
        PreviewState::Blank => Line::styled("Preview:", dim()),
    };
    vec![line]
}

fn expert_content<'a>(expert: &'a Expert, camera: &CameraPreview) -> Content<'a> {
    let mut body = vec![
        Line::styled(expert.specialty.as_str(), dim()),
        Line::default(),
    ];
    if expert.is_live {
        body.push(Line::from(format!("{} is live now.", expert.name)));
        body.extend(camera_lines(camera));
        Content {
            title: format!(" Join Live Session with {} ", expert.name),
            body,
            help: " Enter Join  p Preview  Esc Cancel ",
        }
    } else {
        if let Some(at) = expert.booking {
            body.push(Line::styled(
                format!("Booked: {}", at.format("%b %-d, %Y at %-I:%M %p")),
                Style::default().fg(Color::Blue),
            ));
        }
        body.push(Line::from(vec![
            Span::raw("When (YYYY-MM-DD HH:MM): "),
            Span::styled(
                format!("{}▏", expert.schedule_input),
                Style::default().fg(Color::Green),
            ),
        ]));
        Content {
            title: format!(" Schedule a Call with {} ", expert.name),
            body,
            help: " Enter Schedule  Esc Cancel ",
        }
    }
}

impl<'a> Dialog<'a> {
    fn content(&self) -> Option<Content<'a>> {
        let app = self.app;
        let sidebar = &app.sidebar;
        match self.target {
            DialogTarget::JoinGroup(i) => {
                let group = sidebar.groups.get(i)?;
                Some(Content {
                    title: format!(" Join {} ", group.title),
                    body: vec![Line::from(format!(
                        "Join the {} group to follow its {} discussions.",
                        group.title, group.discussions
                    ))],
                    help: " Enter Join  Esc Cancel ",
                })
            }
            DialogTarget::Expert(i) => {
                let expert = sidebar.experts.get(i)?;
                Some(expert_content(expert, &sidebar.camera))
            }
            DialogTarget::Rsvp(i) => {
                let event = sidebar.events.get(i)?;
                Some(Content {
                    title: format!(" RSVP for {} ", event.title),
                    body: vec![
                        Line::from(event.title.as_str()),
                        Line::styled(event.date.as_str(), dim()),
                    ],
                    help: " Enter Confirm  Esc Cancel ",
                })
            }
            DialogTarget::AssistantAnswer => {
                let answer = app.assistant.answer()?;
                let mut body = vec![Line::from(answer.content.as_str()), Line::default()];
                body.push(Line::styled(
                    "References",
                    Style::default().add_modifier(Modifier::BOLD),
                ));
                for reference in &answer.references {
                    body.push(Line::from(vec![
                        Span::raw(format!("• {}", reference.title)),
                        Span::styled(format!("  #{}", reference.id), dim()),
                    ]));
                }
                Some(Content {
                    title: format!(" {} ", answer.title),
                    body,
                    help: " Esc Close ",
                })
            }
        }
    }
}

impl Component for Dialog<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let Some(content) = self.content() else {
            return;
        };
        let (pct_x, pct_y) = match self.target {
            DialogTarget::AssistantAnswer => (70, 70),
            _ => (50, 40),
        };
        let overlay = centered_rect(pct_x, pct_y, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(content.title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(content.help).centered())
            .padding(Padding::horizontal(1));
        let paragraph = Paragraph::new(content.body)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, overlay);
    }
}

/// Compute a centered rect using percentage of the outer rect.
fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
