use crossterm::event::{KeyCode, KeyEvent};
use tui_textarea::TextArea;

use super::{field_input, field_value, is_down, is_up, step_cursor, text_field, Ctx, Status, Transition};
use crate::model::profile::ProfileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Label,
    Command,
}

impl EditField {
    fn other(self) -> Self {
        match self {
            EditField::Label => EditField::Command,
            EditField::Command => EditField::Label,
        }
    }
}

/// Add/update form. `editing` is `None` when adding a new profile.
pub struct EditState {
    pub editing: Option<ProfileId>,
    pub label: TextArea<'static>,
    pub command: TextArea<'static>,
    pub focus: EditField,
    pub error: Option<String>,
}

pub enum ProfilesMode {
    List,
    Edit(EditState),
}

pub struct ProfilesScreen {
    pub mode: ProfilesMode,
    pub cursor: usize,
    pub status: Option<Status>,
}

impl Default for ProfilesScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilesScreen {
    pub fn new() -> Self {
        ProfilesScreen {
            mode: ProfilesMode::List,
            cursor: 0,
            status: None,
        }
    }

    pub fn accepts_text(&self) -> bool {
        matches!(self.mode, ProfilesMode::Edit(_))
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut Ctx<'_>) -> Option<Transition> {
        match self.mode {
            ProfilesMode::List => self.handle_list_key(key, ctx),
            ProfilesMode::Edit(_) => {
                self.handle_edit_key(key, ctx);
                None
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent, ctx: &mut Ctx<'_>) -> Option<Transition> {
        let len = ctx.config.profiles.len();
        match key.code {
            KeyCode::Esc => return Some(Transition::Back),
            KeyCode::Char('q') => return Some(Transition::Quit),
            _ if is_up(&key) => self.cursor = step_cursor(self.cursor, len, false),
            _ if is_down(&key) => self.cursor = step_cursor(self.cursor, len, true),
            KeyCode::Char('a') | KeyCode::Char('n') => {
                self.mode = ProfilesMode::Edit(EditState {
                    editing: None,
                    label: text_field(""),
                    command: text_field(""),
                    focus: EditField::Label,
                    error: None,
                });
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(profile) = ctx.config.profiles.get(self.cursor) {
                    self.mode = ProfilesMode::Edit(EditState {
                        editing: Some(profile.id.clone()),
                        label: text_field(&profile.label),
                        command: text_field(&profile.cmd),
                        focus: EditField::Label,
                        error: None,
                    });
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let Some(id) = ctx.config.profiles.get(self.cursor).map(|p| p.id.clone()) else {
                    return None;
                };
                if let Some(removed) = ctx.config.remove_profile(&id) {
                    tracing::info!(profile = %removed.label, "profile deleted");
                    self.status = Some(Status::info(format!("deleted {}", removed.label)));
                }
                self.cursor = self.cursor.min(ctx.config.profiles.len().saturating_sub(1));
                if let Err(status) = ctx.persist() {
                    self.status = Some(status);
                }
            }
            _ => {}
        }
        None
    }

    fn handle_edit_key(&mut self, key: KeyEvent, ctx: &mut Ctx<'_>) {
        let ProfilesMode::Edit(ref mut edit) = self.mode else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.mode = ProfilesMode::List,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                edit.focus = edit.focus.other();
            }
            KeyCode::Enter => {
                let label = field_value(&edit.label).trim().to_string();
                let command = field_value(&edit.command).trim().to_string();
                if label.is_empty() || command.is_empty() {
                    edit.error = Some("label and command are required".to_string());
                    return;
                }
                let status = match edit.editing.take() {
                    Some(id) => {
                        if !ctx.config.update_profile(&id, &label, &command) {
                            self.mode = ProfilesMode::List;
                            self.status = Some(Status::error(format!("{} no longer exists", label)));
                            return;
                        }
                        tracing::info!(profile = %label, "profile updated");
                        Status::info(format!("updated {}", label))
                    }
                    None => {
                        ctx.config.add_profile(&label, &command);
                        self.cursor = ctx.config.profiles.len() - 1;
                        tracing::info!(profile = %label, "profile added");
                        Status::info(format!("added {}", label))
                    }
                };
                self.mode = ProfilesMode::List;
                self.status = Some(ctx.persist().err().unwrap_or(status));
            }
            _ => match edit.focus {
                EditField::Label => field_input(&mut edit.label, key),
                EditField::Command => field_input(&mut edit.command, key),
            },
        }
    }
}
