//! # Sidebar Widgets
//!
//! Trending groups, the expert roster and the virtual event list. Each item
//! owns a two-state confirmation dialog; the root reducer keeps at most one
//! of them open at a time.

use std::fmt;

use chrono::NaiveDateTime;
use log::info;

use crate::core::camera::CameraPreview;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

impl DialogState {
    pub fn is_open(self) -> bool {
        self == DialogState::Open
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    InvalidDateTime(String),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::InvalidDateTime(raw) => {
                write!(f, "'{raw}' is not a date and time (expected YYYY-MM-DD HH:MM)")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Parses a datetime-local style value: `2023-06-20T14:30` or `2023-06-20 14:30`.
pub fn parse_schedule(raw: &str) -> Result<NaiveDateTime, ScheduleError> {
    let trimmed = raw.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
        .map_err(|_| ScheduleError::InvalidDateTime(trimmed.to_string()))
}

#[derive(Debug, Clone)]
pub struct TrendingGroup {
    pub title: String,
    pub discussions: u32,
    pub joined: bool,
    pub dialog: DialogState,
}

impl TrendingGroup {
    pub fn new(title: &str, discussions: u32) -> Self {
        Self {
            title: title.to_string(),
            discussions,
            joined: false,
            dialog: DialogState::Closed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Expert {
    pub name: String,
    pub specialty: String,
    /// Live experts offer "Join Live"; the rest offer "Schedule".
    pub is_live: bool,
    pub dialog: DialogState,
    pub schedule_input: String,
    pub booking: Option<NaiveDateTime>,
    pub in_call: bool,
}

impl Expert {
    pub fn new(name: &str, specialty: &str, is_live: bool) -> Self {
        Self {
            name: name.to_string(),
            specialty: specialty.to_string(),
            is_live,
            dialog: DialogState::Closed,
            schedule_input: String::new(),
            booking: None,
            in_call: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VirtualEvent {
    pub title: String,
    pub date: String,
    pub rsvp: bool,
    pub dialog: DialogState,
}

impl VirtualEvent {
    pub fn new(title: &str, date: &str) -> Self {
        Self {
            title: title.to_string(),
            date: date.to_string(),
            rsvp: false,
            dialog: DialogState::Closed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventTab {
    #[default]
    Upcoming,
    LiveNow,
}

/// Which dialog an action is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogTarget {
    JoinGroup(usize),
    /// "Join Live" or "Schedule", depending on the expert.
    Expert(usize),
    Rsvp(usize),
    AssistantAnswer,
}

/// What confirming a dialog achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    JoinedGroup(String),
    JoinedCall(String),
    Booked { expert: String, at: NaiveDateTime },
    Rsvped(String),
    /// Nothing to confirm (empty schedule input, unknown target).
    Nothing,
}

pub struct Sidebar {
    pub groups: Vec<TrendingGroup>,
    pub experts: Vec<Expert>,
    pub events: Vec<VirtualEvent>,
    pub event_tab: EventTab,
    pub camera: CameraPreview,
}

impl Sidebar {
    pub fn new(
        groups: Vec<TrendingGroup>,
        experts: Vec<Expert>,
        events: Vec<VirtualEvent>,
        camera: CameraPreview,
    ) -> Self {
        Self {
            groups,
            experts,
            events,
            event_tab: EventTab::Upcoming,
            camera,
        }
    }

    /// Events listed under the current event tab. Nothing is ever live.
    pub fn listed_events(&self) -> &[VirtualEvent] {
        match self.event_tab {
            EventTab::Upcoming => &self.events,
            EventTab::LiveNow => &[],
        }
    }

    fn dialog_mut(&mut self, target: DialogTarget) -> Option<&mut DialogState> {
        match target {
            DialogTarget::JoinGroup(i) => self.groups.get_mut(i).map(|g| &mut g.dialog),
            DialogTarget::Expert(i) => self.experts.get_mut(i).map(|e| &mut e.dialog),
            DialogTarget::Rsvp(i) => self.events.get_mut(i).map(|e| &mut e.dialog),
            DialogTarget::AssistantAnswer => None,
        }
    }

    /// Opens one item's dialog. Returns false for unknown targets.
    pub fn open(&mut self, target: DialogTarget) -> bool {
        match self.dialog_mut(target) {
            Some(dialog) => {
                *dialog = DialogState::Open;
                true
            }
            None => false,
        }
    }

    /// Closes one item's dialog. Closing an expert dialog also closes the camera.
    pub fn close(&mut self, target: DialogTarget) {
        if let Some(dialog) = self.dialog_mut(target) {
            *dialog = DialogState::Closed;
        }
        if matches!(target, DialogTarget::Expert(_)) {
            self.camera.close();
        }
    }

    /// The open dialog, if any.
    pub fn open_dialog(&self) -> Option<DialogTarget> {
        let groups = self.groups.iter().enumerate().find(|(_, g)| g.dialog.is_open());
        if let Some((i, _)) = groups {
            return Some(DialogTarget::JoinGroup(i));
        }
        let experts = self.experts.iter().enumerate().find(|(_, e)| e.dialog.is_open());
        if let Some((i, _)) = experts {
            return Some(DialogTarget::Expert(i));
        }
        self.events
            .iter()
            .position(|e| e.dialog.is_open())
            .map(DialogTarget::Rsvp)
    }

    pub fn edit_schedule(&mut self, expert: usize, text: &str) {
        if let Some(expert) = self.experts.get_mut(expert) {
            expert.schedule_input.clear();
            expert.schedule_input.push_str(text);
        }
    }

    /// Carries out a dialog's confirm button. The dialog closes on success;
    /// an unparseable schedule keeps it open.
    pub fn confirm(&mut self, target: DialogTarget) -> Result<Confirmation, ScheduleError> {
        let confirmation = match target {
            DialogTarget::JoinGroup(i) => match self.groups.get_mut(i) {
                Some(group) => {
                    group.joined = true;
                    info!("Joined group {}", group.title);
                    Confirmation::JoinedGroup(group.title.clone())
                }
                None => Confirmation::Nothing,
            },
            DialogTarget::Expert(i) => match self.experts.get_mut(i) {
                Some(expert) if expert.is_live => {
                    expert.in_call = true;
                    info!("Joined live call with {}", expert.name);
                    Confirmation::JoinedCall(expert.name.clone())
                }
                Some(expert) => {
                    if expert.schedule_input.trim().is_empty() {
                        return Ok(Confirmation::Nothing);
                    }
                    let at = parse_schedule(&expert.schedule_input)?;
                    expert.booking = Some(at);
                    expert.schedule_input.clear();
                    info!("Booked call with {} at {}", expert.name, at);
                    Confirmation::Booked {
                        expert: expert.name.clone(),
                        at,
                    }
                }
                None => Confirmation::Nothing,
            },
            DialogTarget::Rsvp(i) => match self.events.get_mut(i) {
                Some(event) => {
                    event.rsvp = true;
                    info!("RSVP for {}", event.title);
                    Confirmation::Rsvped(event.title.clone())
                }
                None => Confirmation::Nothing,
            },
            DialogTarget::AssistantAnswer => Confirmation::Nothing,
        };
        self.close(target);
        Ok(confirmation)
    }
}
