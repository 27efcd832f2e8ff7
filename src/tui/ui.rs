use crate::core::camera::PreviewState;
use crate::core::feed::Tab;
use crate::core::sidebar::DialogTarget;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{
    AssistantPanel, Dialog, FeedList, SidebarPanel, TitleBar, TopicList,
};
use crate::tui::{Focus, InputMode, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

const TOPICS_WIDTH: u16 = 26;
const RIGHT_WIDTH: u16 = 36;
const ASSISTANT_HEIGHT: u16 = 6;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3), Length(1)]);
    let [title_area, main_area, composer_area, help_area] = layout.areas(frame.area());
    let [topics_area, feed_area, right_area] =
        Layout::horizontal([Length(TOPICS_WIDTH), Min(30), Length(RIGHT_WIDTH)]).areas(main_area);
    let [assistant_area, sidebar_area] =
        Layout::vertical([Length(ASSISTANT_HEIGHT), Min(0)]).areas(right_area);

    let topic = app
        .forum
        .active_category()
        .map(|c| c.label())
        .unwrap_or("All Posts");
    TitleBar::new(
        topic.to_string(),
        app.forum.search_query().to_string(),
        app.status_message.clone(),
    )
    .render(frame, title_area);

    TopicList {
        state: &mut tui.topics,
        active: app.forum.active_category(),
        is_focused: tui.focus == Focus::Topics,
    }
    .render(frame, topics_area);

    FeedList {
        state: &mut tui.feed,
        forum: &app.forum,
        chat: &app.chat,
        display_name: app.chat.display_name(),
        is_focused: tui.focus == Focus::Feed,
    }
    .render(frame, feed_area);

    AssistantPanel {
        assistant: &app.assistant,
        spinner_frame,
        is_focused: tui.focus == Focus::Assistant,
    }
    .render(frame, assistant_area);

    SidebarPanel {
        state: &mut tui.sidebar,
        sidebar: &app.sidebar,
        is_focused: tui.focus == Focus::Sidebar,
    }
    .render(frame, sidebar_area);

    tui.composer.render(frame, composer_area);

    frame.render_widget(
        Span::styled(help_text(app, tui), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(target) = app.open_dialog() {
        Dialog { app, target }.render(frame, frame.area());
    }
}

/// One-line key reference for whatever currently has the keyboard.
pub fn help_text(app: &App, tui: &TuiState) -> &'static str {
    if let Some(target) = app.open_dialog() {
        return match target {
            DialogTarget::Expert(i)
                if app.sidebar.experts.get(i).is_some_and(|e| e.is_live) =>
            {
                match app.sidebar.camera.state() {
                    PreviewState::Off => " Enter join · p camera preview · Esc cancel",
                    _ => " Enter join · p hide preview · Esc cancel",
                }
            }
            DialogTarget::Expert(_) => {
                " type a time (YYYY-MM-DD HH:MM) · Enter schedule · Esc cancel"
            }
            _ => " Enter confirm · Esc close",
        };
    }
    if tui.input_mode == InputMode::Input {
        return " Enter send · Esc stop writing";
    }
    match tui.focus {
        Focus::Topics => " ↑↓ move · Enter filter · Tab next panel · / search · q quit",
        Focus::Feed if app.forum.active_tab() == Tab::Live => {
            " ←→ tabs · Enter chat · Tab next panel · q quit"
        }
        Focus::Feed => {
            " ↑↓ select · ←→ tabs · +/- vote · Space comments · c comment · / search · q quit"
        }
        Focus::Assistant if app.assistant.is_pending() => " Esc cancel · Tab next panel · q quit",
        Focus::Assistant => " Enter ask · o open answer · Tab next panel · q quit",
        Focus::Sidebar => " ↑↓ move · Enter open · e events tab · Tab next panel · q quit",
    }
}
