use crossterm::event::{KeyCode, KeyEvent};

use super::{is_down, is_up, step_cursor, Ctx, Status, Transition};
use crate::model::configuration::Configuration;

/// Terminal-emulator picker.
pub struct SettingsScreen {
    pub terminals: Vec<String>,
    pub cursor: usize,
    pub status: Option<Status>,
}

impl SettingsScreen {
    /// Cursor starts on the configured terminal when it is among `terminals`.
    pub fn new(terminals: Vec<String>, config: &Configuration) -> Self {
        let mut screen = SettingsScreen {
            terminals,
            cursor: 0,
            status: None,
        };
        screen.cursor = screen.current_index(config).unwrap_or(0);
        screen
    }

    /// Index of the configured terminal, if it was discovered.
    pub fn current_index(&self, config: &Configuration) -> Option<usize> {
        let current = config.terminal.as_deref()?;
        self.terminals.iter().position(|t| t == current)
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut Ctx<'_>) -> Option<Transition> {
        let len = self.terminals.len();
        match key.code {
            KeyCode::Esc => return Some(Transition::Back),
            KeyCode::Char('q') => return Some(Transition::Quit),
            _ if is_up(&key) => self.cursor = step_cursor(self.cursor, len, false),
            _ if is_down(&key) => self.cursor = step_cursor(self.cursor, len, true),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(name) = self.terminals.get(self.cursor) else {
                    return None;
                };
                ctx.config.terminal = Some(name.clone());
                tracing::info!(terminal = %name, "terminal preference set");
                self.status = Some(match ctx.persist() {
                    Ok(()) => Status::info(format!("terminal set to {}", name)),
                    Err(status) => status,
                });
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{key, MemoryStore, RecordingLauncher};

    fn terminals() -> Vec<String> {
        vec!["alacritty".into(), "kitty".into(), "xterm".into()]
    }

    fn press(
        screen: &mut SettingsScreen,
        config: &mut Configuration,
        store: &MemoryStore,
        code: KeyCode,
    ) -> Option<Transition> {
        let launcher = RecordingLauncher::default();
        let mut ctx = Ctx {
            config,
            store,
            launcher: &launcher,
        };
        screen.handle_key(key(code), &mut ctx)
    }

    #[test]
    fn cursor_starts_on_configured_terminal() {
        let config = Configuration {
            terminal: Some("kitty".into()),
            ..Configuration::default()
        };
        let screen = SettingsScreen::new(terminals(), &config);
        assert_eq!(screen.cursor, 1);
        assert_eq!(screen.current_index(&config), Some(1));
    }

    #[test]
    fn unknown_configured_terminal_is_not_highlighted() {
        let config = Configuration {
            terminal: Some("hyper".into()),
            ..Configuration::default()
        };
        let screen = SettingsScreen::new(terminals(), &config);
        assert_eq!(screen.cursor, 0);
        assert_eq!(screen.current_index(&config), None);
    }

    #[test]
    fn confirming_sets_preference_and_persists() {
        let mut config = Configuration::default();
        let store = MemoryStore::default();
        let mut screen = SettingsScreen::new(terminals(), &config);
        press(&mut screen, &mut config, &store, KeyCode::Down);
        press(&mut screen, &mut config, &store, KeyCode::Down);
        press(&mut screen, &mut config, &store, KeyCode::Down);
        assert_eq!(screen.cursor, 2);
        assert_eq!(press(&mut screen, &mut config, &store, KeyCode::Enter), None);
        assert_eq!(config.terminal.as_deref(), Some("xterm"));
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.last_saved().unwrap().terminal.as_deref(), Some("xterm"));
        assert_eq!(screen.current_index(&config), Some(2));
    }

    #[test]
    fn esc_goes_back_without_saving() {
        let mut config = Configuration::default();
        let store = MemoryStore::default();
        let mut screen = SettingsScreen::new(terminals(), &config);
        assert_eq!(
            press(&mut screen, &mut config, &store, KeyCode::Esc),
            Some(Transition::Back)
        );
        assert_eq!(store.save_count(), 0);
        assert_eq!(config.terminal, None);
    }
}
