//! # Composer Component
//!
//! The single-line text field at the bottom of the screen. Whatever is
//! being written (a comment, a chat message, an assistant question, a
//! search, a call time) goes through here; the parent decides what a
//! submission means.
//!
//! The buffer is internal state. `title` and `dimmed` are props refreshed
//! every frame from the current compose target and input mode.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders consumed horizontally by the block.
const HORIZONTAL_OVERHEAD: u16 = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; the buffer is handed over and cleared.
    Submit(String),
    ContentChanged,
}

pub struct Composer {
    pub buffer: String,
    /// Cursor as a byte offset into `buffer`.
    pos: usize,
    pub title: String,
    pub dimmed: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

impl Composer {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            pos: 0,
            title: String::from("Compose"),
            dimmed: true,
        }
    }

    /// Replaces the buffer (e.g. with a saved draft) and moves the cursor to the end.
    pub fn load(&mut self, text: &str) {
        self.buffer = text.to_string();
        self.pos = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.pos = 0;
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.pos..]
            .chars()
            .next()
            .map(|c| self.pos + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }

    /// Leading columns hidden so the cursor stays inside `inner_width`.
    fn scroll_columns(&self, inner_width: u16) -> usize {
        let cursor_col = self.buffer[..self.pos].width();
        let inner = inner_width as usize;
        if inner == 0 {
            return cursor_col;
        }
        cursor_col.saturating_sub(inner.saturating_sub(1))
    }

    fn visible_text(&self, inner_width: u16) -> String {
        let mut skip = self.scroll_columns(inner_width);
        let mut out = String::new();
        let mut used = 0usize;
        for c in self.buffer.chars() {
            let w = c.width().unwrap_or(0);
            if skip > 0 {
                skip = skip.saturating_sub(w);
                continue;
            }
            if used + w > inner_width as usize {
                break;
            }
            used += w;
            out.push(c);
        }
        out
    }
}

impl Component for Composer {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let style = if self.dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };
        let border_style = if self.dimmed {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title.as_str());
        let input = Paragraph::new(self.visible_text(inner_width))
            .block(block)
            .style(style);
        frame.render_widget(input, area);

        if !self.dimmed {
            let col = self.buffer[..self.pos].width() - self.scroll_columns(inner_width);
            let x = area.x + 1 + (col as u16).min(inner_width.saturating_sub(1));
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for Composer {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.pos, *c);
                self.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let flat = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.pos, &flat);
                self.pos += flat.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.pos > 0 => {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.pos);
                self.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete if self.pos < self.buffer.len() => {
                let next = self.next_boundary();
                self.buffer.drain(self.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft if self.pos > 0 => {
                self.pos = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight if self.pos < self.buffer.len() => {
                self.pos = self.next_boundary();
                None
            }
            TuiEvent::CursorHome => {
                self.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.pos = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                let text = std::mem::take(&mut self.buffer);
                self.pos = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
