use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use tui_textarea::TextArea;

use super::{field_input, field_value, is_down, is_up, step_cursor, text_field, Ctx, Status, Transition};
use crate::config::expand_home;
use crate::data::scanner;
use crate::model::profile::ProfileId;

/// Rows taken by the header, list borders, status line and hint bar.
pub const RESERVED_LINES: u16 = 5;

/// Never show fewer rows than this, even in a tiny terminal.
pub const MIN_VISIBLE_ROWS: usize = 3;

pub enum MainMode {
    List,
    Assign(AssignState),
    ChangeSource(TextArea<'static>),
}

/// Working state of the profile-assignment overlay.
pub struct AssignState {
    /// Directory being edited, captured by path when the overlay opened.
    pub target: PathBuf,
    pub target_name: String,
    pub cursor: usize,
    pub selected: HashSet<ProfileId>,
}

pub struct MainScreen {
    pub mode: MainMode,
    pub cursor: usize,
    pub scroll: usize,
    pub height: u16,
    pub status: Option<Status>,
    pub last_scan: Option<DateTime<Local>>,
}

impl MainScreen {
    pub fn new(height: u16) -> Self {
        MainScreen {
            mode: MainMode::List,
            cursor: 0,
            scroll: 0,
            height,
            status: None,
            last_scan: None,
        }
    }

    pub fn in_list_mode(&self) -> bool {
        matches!(self.mode, MainMode::List)
    }

    /// True while a text field has keyboard focus.
    pub fn accepts_text(&self) -> bool {
        matches!(self.mode, MainMode::ChangeSource(_))
    }

    pub fn visible_rows(&self) -> usize {
        (self.height.saturating_sub(RESERVED_LINES) as usize).max(MIN_VISIBLE_ROWS)
    }

    pub fn resize(&mut self, height: u16, len: usize) {
        self.height = height;
        self.clamp_scroll(len);
    }

    /// Clamp the cursor to the list and re-derive the scroll window.
    pub fn refresh(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
        self.clamp_scroll(len);
    }

    /// Keep the cursor inside `[scroll, scroll + visible)` and the scroll
    /// offset inside `[0, max(0, len - visible)]`.
    pub fn clamp_scroll(&mut self, len: usize) {
        let visible = self.visible_rows();
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }
        if self.cursor >= self.scroll + visible {
            self.scroll = self.cursor + 1 - visible;
        }
        let max_scroll = len.saturating_sub(visible);
        if self.scroll > max_scroll {
            self.scroll = max_scroll;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut Ctx<'_>) -> Option<Transition> {
        match self.mode {
            MainMode::List => self.handle_list_key(key, ctx),
            MainMode::Assign(_) => {
                self.handle_assign_key(key, ctx);
                None
            }
            MainMode::ChangeSource(_) => {
                self.handle_change_source_key(key, ctx);
                None
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent, ctx: &mut Ctx<'_>) -> Option<Transition> {
        let len = ctx.config.directories.len();
        match key.code {
            KeyCode::Char('q') => return Some(Transition::Quit),
            _ if is_up(&key) => self.move_cursor(step_cursor(self.cursor, len, false), len),
            _ if is_down(&key) => self.move_cursor(step_cursor(self.cursor, len, true), len),
            KeyCode::PageUp => {
                let target = self.cursor.saturating_sub(self.visible_rows());
                self.move_cursor(target, len);
            }
            KeyCode::PageDown => {
                let target = (self.cursor + self.visible_rows()).min(len.saturating_sub(1));
                self.move_cursor(target, len);
            }
            KeyCode::Char('g') | KeyCode::Home => self.move_cursor(0, len),
            KeyCode::Char('G') | KeyCode::End => self.move_cursor(len.saturating_sub(1), len),
            KeyCode::Char(' ') => self.toggle_selected(ctx),
            KeyCode::Enter => self.enter_assign(ctx),
            KeyCode::Char('p') => return Some(Transition::OpenProfiles),
            KeyCode::Char('t') => return Some(Transition::OpenSettings),
            KeyCode::Char('s') => self.start(ctx),
            KeyCode::Char('r') => self.rescan(ctx),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                let current = ctx.config.source_root.to_string_lossy().to_string();
                self.mode = MainMode::ChangeSource(text_field(&current));
            }
            _ => {}
        }
        None
    }

    fn move_cursor(&mut self, target: usize, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = target.min(len - 1);
        self.clamp_scroll(len);
    }

    fn toggle_selected(&mut self, ctx: &mut Ctx<'_>) {
        let Some(entry) = ctx.config.directories.get_mut(self.cursor) else {
            return;
        };
        entry.toggle_enabled();
        tracing::debug!(directory = %entry.name, enabled = entry.enabled, "toggled");
        if let Err(status) = ctx.persist() {
            self.status = Some(status);
        }
    }

    fn enter_assign(&mut self, ctx: &Ctx<'_>) {
        let Some(entry) = ctx.config.directories.get(self.cursor) else {
            return;
        };
        self.mode = MainMode::Assign(AssignState {
            target: entry.path.clone(),
            target_name: entry.name.clone(),
            cursor: 0,
            selected: entry.profile_ids.iter().cloned().collect(),
        });
    }

    fn handle_assign_key(&mut self, key: KeyEvent, ctx: &mut Ctx<'_>) {
        let MainMode::Assign(ref mut assign) = self.mode else {
            return;
        };
        let profiles = &ctx.config.profiles;
        match key.code {
            KeyCode::Esc => self.mode = MainMode::List,
            _ if is_up(&key) => assign.cursor = step_cursor(assign.cursor, profiles.len(), false),
            _ if is_down(&key) => assign.cursor = step_cursor(assign.cursor, profiles.len(), true),
            KeyCode::Char(' ') => {
                if let Some(profile) = profiles.get(assign.cursor) {
                    if !assign.selected.remove(&profile.id) {
                        assign.selected.insert(profile.id.clone());
                    }
                }
            }
            KeyCode::Enter => {
                let ids: Vec<ProfileId> = profiles
                    .iter()
                    .filter(|p| assign.selected.contains(&p.id))
                    .map(|p| p.id.clone())
                    .collect();
                let target = assign.target.clone();
                let name = assign.target_name.clone();
                self.mode = MainMode::List;

                let Some(entry) = ctx.config.find_directory_mut(&target) else {
                    self.status = Some(Status::error(format!("{} is no longer listed", name)));
                    return;
                };
                entry.profile_ids = ids;
                tracing::debug!(directory = %name, profiles = entry.profile_ids.len(), "assigned");
                if let Err(status) = ctx.persist() {
                    self.status = Some(status);
                }
            }
            _ => {}
        }
    }

    fn handle_change_source_key(&mut self, key: KeyEvent, ctx: &mut Ctx<'_>) {
        let MainMode::ChangeSource(ref mut input) = self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.mode = MainMode::List,
            KeyCode::Enter => {
                let value = field_value(input);
                let value = value.trim();
                if value.is_empty() {
                    self.status = Some(Status::error("path cannot be empty"));
                    return;
                }
                let root = expand_home(value);
                self.mode = MainMode::List;
                self.set_source_root(root, ctx);
            }
            _ => field_input(input, key),
        }
    }

    /// Adopt a new source root: reconcile against the existing entries and
    /// persist. The root is kept even when it cannot be read.
    pub fn set_source_root(&mut self, root: PathBuf, ctx: &mut Ctx<'_>) {
        tracing::info!(root = %root.display(), "source root changed");
        ctx.config.source_root = root;
        match scanner::reconcile(&ctx.config.source_root, &ctx.config.directories) {
            Ok(dirs) => {
                let count = dirs.len();
                ctx.config.directories = dirs;
                self.last_scan = Some(Local::now());
                self.cursor = 0;
                self.scroll = 0;
                self.status = Some(Status::info(format!("src changed, {} dirs", count)));
            }
            Err(e) => {
                tracing::warn!(error = %e, "scan of new root failed");
                self.status = Some(Status::error(format!("scan error: {}", e)));
            }
        }
        if let Err(status) = ctx.persist() {
            self.status = Some(status);
        }
        self.refresh(ctx.config.directories.len());
    }

    /// Re-run reconciliation against the current source root.
    pub fn rescan(&mut self, ctx: &mut Ctx<'_>) {
        let selected_path = ctx
            .config
            .directories
            .get(self.cursor)
            .map(|d| d.path.clone());

        match scanner::reconcile(&ctx.config.source_root, &ctx.config.directories) {
            Ok(dirs) => {
                let count = dirs.len();
                ctx.config.directories = dirs;
                self.last_scan = Some(Local::now());
                self.status = Some(Status::info(format!("rescanned: {} dirs", count)));
                if let Err(status) = ctx.persist() {
                    self.status = Some(status);
                }
                if let Some(idx) = selected_path
                    .and_then(|p| ctx.config.directories.iter().position(|d| d.path == p))
                {
                    self.cursor = idx;
                }
                self.refresh(count);
            }
            Err(e) => {
                tracing::warn!(error = %e, "rescan failed");
                self.status = Some(Status::error(format!("scan error: {}", e)));
            }
        }
    }

    fn start(&mut self, ctx: &mut Ctx<'_>) {
        let result = ctx.launcher.launch(
            &ctx.config.directories,
            &ctx.config.profiles,
            ctx.config.terminal.as_deref(),
        );
        self.status = Some(match result {
            Ok(0) => Status::info("nothing to launch: enable a directory and assign profiles"),
            Ok(1) => Status::info("launched 1 session"),
            Ok(n) => Status::info(format!("launched {} sessions", n)),
            Err(e) => Status::error(format!("error: {}", e)),
        });
    }
}
