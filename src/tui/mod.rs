//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into core::Action values, and carries out the
//! effects `update()` returns.
//!
//! This is the only module that knows about ratatui, crossterm and tokio
//! tasks. The core never sleeps or opens devices; it asks for that through
//! `Effect`, and results come back over an `mpsc` channel as ordinary
//! actions.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (assistant thinking, camera opening): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resize or
//!   background results.
//!
//! ## Routing
//!
//! ```text
//! TuiEvent ──► open dialog? ──► dialog keys
//!          ──► Input mode?  ──► Composer ──► target (comment/chat/assistant/search)
//!          ──► Cursor mode  ──► global keys, then the focused panel
//! ```

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::assistant::simulate_lookup;
use crate::core::camera::{CaptureDevice, PreviewState, SimulatedCamera, acquire};
use crate::core::clock::{Clock, SystemClock};
use crate::core::config::ResolvedConfig;
use crate::core::feed::{Tab, VoteDirection};
use crate::core::sidebar::{DialogTarget, EventTab};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    Composer, FeedState, InputEvent, SidebarEvent, SidebarState, TopicEvent, TopicListState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which panel receives cursor-mode keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Topics,
    Feed,
    Assistant,
    Sidebar,
}

impl Focus {
    fn next(self) -> Focus {
        match self {
            Focus::Topics => Focus::Feed,
            Focus::Feed => Focus::Assistant,
            Focus::Assistant => Focus::Sidebar,
            Focus::Sidebar => Focus::Topics,
        }
    }

    fn prev(self) -> Focus {
        match self {
            Focus::Topics => Focus::Sidebar,
            Focus::Feed => Focus::Topics,
            Focus::Assistant => Focus::Feed,
            Focus::Sidebar => Focus::Assistant,
        }
    }
}

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate panels with arrow keys and single-key commands.
    Cursor,
    /// Text editing in the composer. Esc switches back to Cursor.
    Input,
}

/// What the composer's text is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeTarget {
    Comment(usize),
    Chat,
    Assistant,
    Search,
}

impl ComposeTarget {
    fn title(self) -> &'static str {
        match self {
            ComposeTarget::Comment(_) => " Add a comment ",
            ComposeTarget::Chat => " Live discussion ",
            ComposeTarget::Assistant => " Ask the assistant ",
            ComposeTarget::Search => " Search posts ",
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub input_mode: InputMode,
    pub compose_target: Option<ComposeTarget>,
    // Persistent component states
    pub composer: Composer,
    pub topics: TopicListState,
    pub feed: FeedState,
    pub sidebar: SidebarState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Feed,
            input_mode: InputMode::Cursor,
            compose_target: None,
            composer: Composer::new(),
            topics: TopicListState::new(),
            feed: FeedState::new(),
            sidebar: SidebarState::new(),
        }
    }

    /// Opens the composer for `target`, preloaded with `text`.
    fn start_compose(&mut self, target: ComposeTarget, text: &str) {
        self.compose_target = Some(target);
        self.input_mode = InputMode::Input;
        self.composer.load(text);
    }

    fn stop_compose(&mut self) {
        self.compose_target = None;
        self.input_mode = InputMode::Cursor;
        self.composer.clear();
    }

    /// Refreshes the composer's props from the current mode and target.
    fn sync_composer(&mut self) {
        self.composer.dimmed = self.input_mode == InputMode::Cursor;
        self.composer.title = self
            .compose_target
            .map(ComposeTarget::title)
            .unwrap_or(" Compose ")
            .to_string();
    }
}

/// Translates one terminal event into core actions, updating presentation
/// state along the way. Reads `app` but never mutates it.
pub fn route_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Vec<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return vec![Action::Quit];
    }
    if let Some(target) = app.open_dialog() {
        return route_dialog_event(app, target, event);
    }
    match tui.input_mode {
        InputMode::Input => route_input_event(tui, event),
        InputMode::Cursor => route_cursor_event(app, tui, event),
    }
}

fn route_dialog_event(app: &App, target: DialogTarget, event: TuiEvent) -> Vec<Action> {
    let expert = match target {
        DialogTarget::Expert(i) => app.sidebar.experts.get(i).map(|e| (i, e)),
        _ => None,
    };
    match (event, expert) {
        (TuiEvent::Escape, _) => vec![Action::DismissDialog],
        (TuiEvent::Submit, _) => vec![Action::ConfirmDialog],
        (TuiEvent::InputChar('p'), Some((_, e))) if e.is_live => vec![Action::ToggleCameraPreview],
        // Scheduling dialogs take typed text as the requested time
        (TuiEvent::InputChar(c), Some((i, e))) if !e.is_live => {
            let mut text = e.schedule_input.clone();
            text.push(c);
            vec![Action::EditSchedule { expert: i, text }]
        }
        (TuiEvent::Paste(pasted), Some((i, e))) if !e.is_live => {
            let text = format!("{}{}", e.schedule_input, pasted.trim());
            vec![Action::EditSchedule { expert: i, text }]
        }
        (TuiEvent::Backspace, Some((i, e))) if !e.is_live => {
            let mut text = e.schedule_input.clone();
            text.pop();
            vec![Action::EditSchedule { expert: i, text }]
        }
        _ => Vec::new(),
    }
}

fn route_input_event(tui: &mut TuiState, event: TuiEvent) -> Vec<Action> {
    let Some(target) = tui.compose_target else {
        tui.stop_compose();
        return Vec::new();
    };
    if matches!(event, TuiEvent::Escape) {
        // Comment drafts and the assistant query are already mirrored into the core
        tui.stop_compose();
        return Vec::new();
    }

    match tui.composer.handle_event(&event) {
        Some(InputEvent::ContentChanged) => {
            let text = tui.composer.buffer.clone();
            match target {
                ComposeTarget::Comment(post) => vec![Action::EditDraft { post, text }],
                ComposeTarget::Assistant => vec![Action::EditQuery(text)],
                ComposeTarget::Search => {
                    tui.feed.reset();
                    vec![Action::Search(text)]
                }
                ComposeTarget::Chat => Vec::new(),
            }
        }
        Some(InputEvent::Submit(text)) => match target {
            ComposeTarget::Comment(post) => {
                tui.stop_compose();
                vec![
                    Action::EditDraft { post, text },
                    Action::SubmitComment { post },
                ]
            }
            // Chat stays open for the next message
            ComposeTarget::Chat => vec![Action::SendChat(text)],
            ComposeTarget::Assistant => {
                tui.stop_compose();
                vec![Action::EditQuery(text), Action::AskAssistant]
            }
            ComposeTarget::Search => {
                tui.stop_compose();
                tui.feed.reset();
                vec![Action::Search(text)]
            }
        },
        None => Vec::new(),
    }
}

fn route_cursor_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Vec<Action> {
    // Global keys
    match event {
        TuiEvent::Resize => return Vec::new(),
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next();
            return Vec::new();
        }
        TuiEvent::FocusPrev => {
            tui.focus = tui.focus.prev();
            return Vec::new();
        }
        TuiEvent::InputChar('q') => return vec![Action::Quit],
        TuiEvent::Escape if app.assistant.is_pending() => return vec![Action::CancelAssistant],
        TuiEvent::InputChar('/') => {
            tui.start_compose(ComposeTarget::Search, app.forum.search_query());
            return Vec::new();
        }
        TuiEvent::InputChar(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            tui.feed.reset();
            return vec![Action::SelectTab(Tab::ALL[index])];
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.feed.handle_event(&event);
            return Vec::new();
        }
        _ => {}
    }

    match tui.focus {
        Focus::Topics => match tui.topics.handle_event(&event) {
            Some(TopicEvent::ShowAll) => {
                tui.feed.reset();
                vec![Action::ResetFilter]
            }
            Some(TopicEvent::Select(category)) => {
                tui.feed.reset();
                vec![Action::SelectCategory(category)]
            }
            None => Vec::new(),
        },
        Focus::Feed => route_feed_event(app, tui, event),
        Focus::Assistant => match event {
            TuiEvent::Submit => {
                tui.start_compose(ComposeTarget::Assistant, &app.assistant.query);
                Vec::new()
            }
            TuiEvent::InputChar('o') => vec![Action::OpenDialog(DialogTarget::AssistantAnswer)],
            _ => Vec::new(),
        },
        Focus::Sidebar => match tui.sidebar.handle_event(&event) {
            Some(SidebarEvent::Activate) => tui
                .sidebar
                .target(&app.sidebar)
                .map(|target| vec![Action::OpenDialog(target)])
                .unwrap_or_default(),
            Some(SidebarEvent::ToggleEventTab) => {
                let tab = match app.sidebar.event_tab {
                    EventTab::Upcoming => EventTab::LiveNow,
                    EventTab::LiveNow => EventTab::Upcoming,
                };
                vec![Action::SelectEventTab(tab)]
            }
            None => Vec::new(),
        },
    }
}

fn route_feed_event(app: &App, tui: &mut TuiState, event: TuiEvent) -> Vec<Action> {
    let tab = app.forum.active_tab();
    match event {
        TuiEvent::CursorLeft => {
            tui.feed.reset();
            return vec![Action::SelectTab(tab.prev())];
        }
        TuiEvent::CursorRight => {
            tui.feed.reset();
            return vec![Action::SelectTab(tab.next())];
        }
        TuiEvent::CursorUp | TuiEvent::CursorDown => {
            tui.feed.handle_event(&event);
            return Vec::new();
        }
        _ => {}
    }

    if tab == Tab::Live {
        if matches!(event, TuiEvent::Submit | TuiEvent::InputChar('c')) {
            tui.start_compose(ComposeTarget::Chat, "");
        }
        return Vec::new();
    }

    let view = app.forum.tab_view(tab);
    if !tui.feed.follow_pinned(&view) {
        // The post just voted on left the tab; drop keys queued behind that vote
        return Vec::new();
    }
    let Some(post) = tui.feed.selected_post(&view) else {
        return Vec::new();
    };
    match event {
        TuiEvent::InputChar('+') => {
            tui.feed.pin(post);
            vec![Action::Vote {
                post,
                direction: VoteDirection::Up,
            }]
        }
        TuiEvent::InputChar('-') => {
            tui.feed.pin(post);
            vec![Action::Vote {
                post,
                direction: VoteDirection::Down,
            }]
        }
        TuiEvent::InputChar(' ') => vec![Action::ToggleComments { post }],
        TuiEvent::Submit | TuiEvent::InputChar('c') => {
            let draft = app.forum.card(post).map(|c| c.draft.as_str()).unwrap_or("");
            tui.start_compose(ComposeTarget::Comment(post), draft);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Owns the tokio tasks started on behalf of the core.
struct BackgroundTasks {
    tx: mpsc::Sender<Action>,
    camera: Arc<dyn CaptureDevice>,
    assistant: Option<AbortHandle>,
    /// Requests still in flight. Each result carries its own ticket, so an
    /// older request finishing late is discarded by the core.
    camera_requests: Vec<AbortHandle>,
}

impl BackgroundTasks {
    fn new(tx: mpsc::Sender<Action>, camera: Arc<dyn CaptureDevice>) -> Self {
        Self {
            tx,
            camera,
            assistant: None,
            camera_requests: Vec::new(),
        }
    }

    /// Carries out one effect. Returns true when the app should exit.
    fn perform(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Quit => {
                self.abort_all();
                true
            }
            Effect::SpawnAssistantLookup { request, delay } => {
                if let Some(previous) = self.assistant.take() {
                    previous.abort();
                }
                self.assistant = Some(spawn_assistant_lookup(request, delay, self.tx.clone()));
                false
            }
            Effect::AbortAssistantLookup => {
                if let Some(handle) = self.assistant.take() {
                    handle.abort();
                }
                false
            }
            Effect::RequestCamera(ticket) => {
                self.camera_requests.retain(|h| !h.is_finished());
                let camera = self.camera.clone();
                let tx = self.tx.clone();
                let handle = tokio::spawn(async move {
                    let result = acquire(camera.as_ref()).await;
                    // A failed send drops the result, which releases the stream
                    if tx.send(Action::CameraResolved { ticket, result }).is_err() {
                        warn!("Failed to deliver camera result: receiver dropped");
                    }
                });
                self.camera_requests.push(handle.abort_handle());
                false
            }
        }
    }

    fn abort_all(&mut self) {
        if let Some(handle) = self.assistant.take() {
            handle.abort();
        }
        for handle in self.camera_requests.drain(..) {
            handle.abort();
        }
    }
}

fn spawn_assistant_lookup(
    request: crate::core::assistant::RequestId,
    delay: Duration,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning assistant lookup {} ({}ms)", request, delay.as_millis());
    let handle = tokio::spawn(async move {
        let answer = simulate_lookup(delay).await;
        if tx.send(Action::AssistantAnswered { request, answer }).is_err() {
            warn!("Failed to deliver assistant answer {}: receiver dropped", request);
        }
    });
    handle.abort_handle()
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Stops background work and releases the camera, including any stream
/// that arrived on the channel but was never applied.
fn release_all(tasks: &mut BackgroundTasks, app: &mut App, rx: &mpsc::Receiver<Action>) {
    tasks.abort_all();
    app.sidebar.camera.close();
    let dropped = rx.try_iter().count();
    if dropped > 0 {
        debug!("Dropped {} unapplied background results", dropped);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let mut app = App::from_config(&config, clock);
    let mut tui = TuiState::new();

    let camera: Arc<dyn CaptureDevice> = Arc::new(SimulatedCamera::new(
        config.camera_available,
        config.camera_latency,
    ));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut tasks = BackgroundTasks::new(tx, camera);

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        tui.sync_composer();

        let animating = app.assistant.is_pending()
            || matches!(app.sidebar.camera.state(), PreviewState::Requesting { .. });
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            for action in route_event(&app, &mut tui, event) {
                debug!("Dispatching {:?}", action);
                let effect = update(&mut app, action);
                if tasks.perform(effect) {
                    should_quit = true;
                }
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task results (assistant answers, camera streams)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if tasks.perform(effect) {
                should_quit = true;
            }
        }
        if should_quit {
            break;
        }
    }

    release_all(&mut tasks, &mut app, &rx);
    info!("ShipTalk shutting down");

    ratatui::restore();
    Ok(())
}
