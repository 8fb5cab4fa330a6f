//! Shared fakes and key helpers for unit tests.

use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::data::launcher::{plan_sessions, LaunchError, Launcher};
use crate::data::store::{ConfigStore, StoreError};
use crate::model::configuration::Configuration;
use crate::model::directory::DirectoryEntry;
use crate::model::profile::Profile;

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Type each character of `text` through `handle`.
pub fn press_str<T>(handle: &mut impl FnMut(KeyEvent) -> T, text: &str) {
    for c in text.chars() {
        handle(key(KeyCode::Char(c)));
    }
}

/// In-memory store that counts saves and can be told to fail. `load` returns
/// whatever was saved last.
#[derive(Default)]
pub struct MemoryStore {
    saved: RefCell<Option<Configuration>>,
    saves: Cell<usize>,
    fail: Cell<bool>,
}

impl MemoryStore {
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn last_saved(&self) -> Option<Configuration> {
        self.saved.borrow().clone()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Option<Configuration>, StoreError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, config: &Configuration) -> Result<(), StoreError> {
        if self.fail.get() {
            return Err(StoreError::Write {
                path: "memory".into(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saves.set(self.saves.get() + 1);
        *self.saved.borrow_mut() = Some(config.clone());
        Ok(())
    }
}

/// Launcher that records its inputs instead of spawning anything.
///
/// Reports the number of sessions the real planner would open, or fails
/// with the configured message.
#[derive(Default)]
pub struct RecordingLauncher {
    calls: RefCell<Vec<(usize, usize, Option<String>)>>,
    failure: RefCell<Option<String>>,
}

impl RecordingLauncher {
    /// `(directories, profiles, terminal)` for every call so far.
    pub fn calls(&self) -> Vec<(usize, usize, Option<String>)> {
        self.calls.borrow().clone()
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.borrow_mut() = Some(message.to_string());
    }
}

impl Launcher for RecordingLauncher {
    fn launch(
        &self,
        directories: &[DirectoryEntry],
        profiles: &[Profile],
        terminal: Option<&str>,
    ) -> Result<usize, LaunchError> {
        self.calls.borrow_mut().push((
            directories.len(),
            profiles.len(),
            terminal.map(str::to_string),
        ));
        if let Some(message) = self.failure.borrow().as_ref() {
            return Err(LaunchError::Spawn {
                directory: "test".into(),
                profile: "test".into(),
                source: io::Error::new(io::ErrorKind::NotFound, message.clone()),
            });
        }
        Ok(plan_sessions(directories, profiles).len())
    }
}

/// Lets a test keep a handle on a fake after boxing it into the app.
impl<T: ConfigStore> ConfigStore for Rc<T> {
    fn load(&self) -> Result<Option<Configuration>, StoreError> {
        (**self).load()
    }

    fn save(&self, config: &Configuration) -> Result<(), StoreError> {
        (**self).save(config)
    }
}

impl<T: Launcher> Launcher for Rc<T> {
    fn launch(
        &self,
        directories: &[DirectoryEntry],
        profiles: &[Profile],
        terminal: Option<&str>,
    ) -> Result<usize, LaunchError> {
        (**self).launch(directories, profiles, terminal)
    }
}
