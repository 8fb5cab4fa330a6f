pub mod main_list;
pub mod profiles;
pub mod settings;
pub mod setup;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::TextArea;

use crate::data::launcher::Launcher;
use crate::data::store::ConfigStore;
use crate::model::configuration::Configuration;

/// What a screen asks the app controller to do after handling an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Quit,
    SetupComplete(PathBuf),
    OpenProfiles,
    OpenSettings,
    Back,
}

/// Borrowed view of the shared state, handed to the active screen for the
/// duration of one event.
pub struct Ctx<'a> {
    pub config: &'a mut Configuration,
    pub store: &'a dyn ConfigStore,
    pub launcher: &'a dyn Launcher,
}

impl Ctx<'_> {
    /// Write the whole configuration. Errors come back as a status line.
    pub fn persist(&self) -> Result<(), Status> {
        self.store.save(self.config).map_err(|e| {
            tracing::warn!(error = %e, "save failed");
            Status::error(format!("save failed: {}", e))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Transient message shown at the bottom of a screen.
#[derive(Debug, Clone)]
pub struct Status {
    pub text: String,
    pub kind: StatusKind,
    pub at: Instant,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            kind: StatusKind::Info,
            at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Status {
            text: text.into(),
            kind: StatusKind::Error,
            at: Instant::now(),
        }
    }

    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.at.elapsed() >= ttl
    }
}

/// Drop a status once it has been visible for `ttl`.
pub fn clear_stale(status: &mut Option<Status>, ttl: Duration) {
    if status.as_ref().is_some_and(|s| s.is_stale(ttl)) {
        *status = None;
    }
}

/// Single-line text input backed by a `TextArea`.
pub fn text_field(initial: &str) -> TextArea<'static> {
    let mut field = TextArea::new(vec![initial.to_string()]);
    field.set_cursor_line_style(ratatui::style::Style::default());
    field.move_cursor(tui_textarea::CursorMove::End);
    field
}

pub fn field_value(field: &TextArea<'_>) -> String {
    field.lines().join("")
}

/// Feed a key to a single-line field. Enter is the caller's business and is
/// never inserted as a newline.
pub fn field_input(field: &mut TextArea<'_>, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter)
        || (key.code == KeyCode::Char('m') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return;
    }
    field.input(key);
}

/// Move a list cursor one step, clamped to `[0, len-1]`.
pub fn step_cursor(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}

pub fn is_up(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up | KeyCode::Char('k'))
}

pub fn is_down(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Down | KeyCode::Char('j'))
}
