//! # Actions
//!
//! Everything that can happen in ShipTalk becomes an `Action`.
//! User presses `+` on a post? That's `Action::Vote { .. }`.
//! The assistant's timer fires? That's `Action::AssistantAnswered { .. }`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect` describing any I/O the adapter should start. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use std::time::Duration;

use log::{debug, info};

use crate::core::assistant::RequestId;
use crate::core::camera::{CameraError, CameraTicket, PreviewGuard};
use crate::core::feed::{Tab, VoteDirection};
use crate::core::model::{AssistantAnswer, Category};
use crate::core::sidebar::{Confirmation, DialogState, DialogTarget, EventTab};
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    Quit,

    // Feed
    SelectCategory(Category),
    ResetFilter,
    Search(String),
    SelectTab(Tab),
    Vote { post: usize, direction: VoteDirection },
    EditDraft { post: usize, text: String },
    SubmitComment { post: usize },
    ToggleComments { post: usize },

    // Assistant
    EditQuery(String),
    AskAssistant,
    AssistantAnswered { request: RequestId, answer: AssistantAnswer },
    CancelAssistant,

    // Live chat
    SendChat(String),

    // Dialogs and sidebar
    OpenDialog(DialogTarget),
    DismissDialog,
    ConfirmDialog,
    EditSchedule { expert: usize, text: String },
    SelectEventTab(EventTab),
    ToggleCameraPreview,
    CameraResolved {
        ticket: CameraTicket,
        result: Result<PreviewGuard, CameraError>,
    },
}

/// I/O the adapter should perform after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    /// Start the simulated lookup; replaces any lookup already running.
    SpawnAssistantLookup { request: RequestId, delay: Duration },
    AbortAssistantLookup,
    RequestCamera(CameraTicket),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => {
            app.assistant.cancel();
            app.sidebar.camera.close();
            Effect::Quit
        }

        Action::SelectCategory(category) => {
            app.forum.select_category(category);
            app.status_message = format!("Topic: {}", category.label());
            Effect::None
        }
        Action::ResetFilter => {
            app.forum.reset_filter();
            app.status_message = String::from("All Posts");
            Effect::None
        }
        Action::Search(query) => {
            app.forum.search(&query);
            app.status_message = if app.forum.search_query().is_empty() {
                String::new()
            } else {
                format!(
                    "Search \"{}\": {} posts",
                    app.forum.search_query(),
                    app.forum.visible().len()
                )
            };
            Effect::None
        }
        Action::SelectTab(tab) => {
            app.forum.select_tab(tab);
            Effect::None
        }
        Action::Vote { post, direction } => {
            app.forum.vote(post, direction);
            Effect::None
        }
        Action::EditDraft { post, text } => {
            app.forum.edit_draft(post, &text);
            Effect::None
        }
        Action::SubmitComment { post } => {
            app.forum.submit_comment(post, app.clock.as_ref());
            Effect::None
        }
        Action::ToggleComments { post } => {
            app.forum.toggle_expanded(post);
            Effect::None
        }

        Action::EditQuery(text) => {
            app.assistant.edit_query(&text);
            Effect::None
        }
        Action::AskAssistant => match app.assistant.ask() {
            Some(request) => {
                app.status_message = String::from("Assistant is thinking...");
                Effect::SpawnAssistantLookup {
                    request,
                    delay: app.assistant_delay,
                }
            }
            None => Effect::None,
        },
        Action::AssistantAnswered { request, answer } => {
            if app.assistant.resolve(request, answer) {
                app.status_message = String::from("Assistant answered");
            }
            Effect::None
        }
        Action::CancelAssistant => match app.assistant.cancel() {
            Some(_) => {
                app.status_message = String::from("Assistant request cancelled");
                Effect::AbortAssistantLookup
            }
            None => Effect::None,
        },

        Action::SendChat(text) => {
            app.chat.send(&text, app.clock.as_ref());
            Effect::None
        }

        Action::OpenDialog(target) => {
            if let Some(open) = app.open_dialog() {
                close_dialog(app, open);
            }
            let opened = match target {
                DialogTarget::AssistantAnswer if app.assistant.answer().is_some() => {
                    app.assistant.dialog = DialogState::Open;
                    true
                }
                DialogTarget::AssistantAnswer => false,
                _ => app.sidebar.open(target),
            };
            if opened {
                debug!("Opened dialog {:?}", target);
            }
            Effect::None
        }
        Action::DismissDialog => {
            if let Some(open) = app.open_dialog() {
                close_dialog(app, open);
            }
            Effect::None
        }
        Action::ConfirmDialog => {
            let Some(open) = app.open_dialog() else {
                return Effect::None;
            };
            if open == DialogTarget::AssistantAnswer {
                close_dialog(app, open);
                return Effect::None;
            }
            match app.sidebar.confirm(open) {
                Ok(confirmation) => {
                    if let Some(message) = confirmation_message(&confirmation) {
                        app.status_message = message;
                    }
                }
                Err(e) => {
                    info!("Schedule rejected: {}", e);
                    app.status_message = e.to_string();
                }
            }
            Effect::None
        }
        Action::EditSchedule { expert, text } => {
            app.sidebar.edit_schedule(expert, &text);
            Effect::None
        }
        Action::SelectEventTab(tab) => {
            app.sidebar.event_tab = tab;
            Effect::None
        }
        Action::ToggleCameraPreview => {
            // Only meaningful inside a live expert's dialog
            let in_live_dialog = matches!(
                app.open_dialog(),
                Some(DialogTarget::Expert(i)) if app.sidebar.experts.get(i).is_some_and(|e| e.is_live)
            );
            if !in_live_dialog {
                return Effect::None;
            }
            match app.sidebar.camera.toggle() {
                Some(ticket) => Effect::RequestCamera(ticket),
                None => Effect::None,
            }
        }
        Action::CameraResolved { ticket, result } => {
            app.sidebar.camera.resolve(ticket, result);
            Effect::None
        }
    }
}

fn close_dialog(app: &mut App, target: DialogTarget) {
    match target {
        DialogTarget::AssistantAnswer => app.assistant.dialog = DialogState::Closed,
        _ => app.sidebar.close(target),
    }
}

fn confirmation_message(confirmation: &Confirmation) -> Option<String> {
    match confirmation {
        Confirmation::JoinedGroup(title) => Some(format!("Joined {title} group")),
        Confirmation::JoinedCall(name) => Some(format!("Joined live call with {name}")),
        Confirmation::Booked { expert, at } => Some(format!(
            "Call with {expert} booked for {}",
            at.format("%b %-d, %Y at %-I:%M %p")
        )),
        Confirmation::Rsvped(title) => Some(format!("RSVP confirmed for {title}")),
        Confirmation::Nothing => None,
    }
}
