use std::path::Path;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};

use crate::config::STATUS_TTL_SECS;
use crate::data::launcher::Launcher;
use crate::data::store::ConfigStore;
use crate::model::configuration::Configuration;
use crate::screens::main_list::MainScreen;
use crate::screens::profiles::ProfilesScreen;
use crate::screens::settings::SettingsScreen;
use crate::screens::setup::SetupScreen;
use crate::screens::{clear_stale, Ctx, Status, Transition};

/// Suggested root shown on the first-run prompt.
const SETUP_SUGGESTION: &str = "~/src";

/// The active screen. Main's state lives on `App` so the cursor survives a
/// trip to Profiles or Settings.
pub enum Screen {
    Setup(SetupScreen),
    Main,
    Profiles(ProfilesScreen),
    Settings(SettingsScreen),
}

pub struct App {
    pub should_quit: bool,
    pub show_help: bool,
    pub dirty: bool,

    pub config: Configuration,
    pub screen: Screen,
    pub main: MainScreen,
    pub terminals: Vec<String>,
    pub status_ttl: Duration,

    /// A watcher event arrived while Main was busy; rescan once it is back in List.
    rescan_pending: bool,

    store: Box<dyn ConfigStore>,
    launcher: Box<dyn Launcher>,
}

impl App {
    pub fn new(
        config: Configuration,
        store: Box<dyn ConfigStore>,
        launcher: Box<dyn Launcher>,
        terminals: Vec<String>,
        height: u16,
    ) -> Self {
        let screen = if config.has_source_root() {
            Screen::Main
        } else {
            Screen::Setup(SetupScreen::new(SETUP_SUGGESTION))
        };
        let mut app = App {
            should_quit: false,
            show_help: false,
            dirty: true,
            config,
            screen,
            main: MainScreen::new(height),
            terminals,
            status_ttl: Duration::from_secs(STATUS_TTL_SECS),
            rescan_pending: false,
            store,
            launcher,
        };

        if matches!(app.screen, Screen::Main) {
            let (mut ctx, _, main) = app.parts();
            main.rescan(&mut ctx);
        }
        app
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Split the borrow: shared state for a screen, plus the screens themselves.
    fn parts(&mut self) -> (Ctx<'_>, &mut Screen, &mut MainScreen) {
        (
            Ctx {
                config: &mut self.config,
                store: &*self.store,
                launcher: &*self.launcher,
            },
            &mut self.screen,
            &mut self.main,
        )
    }

    /// True while the active screen has a text field focused.
    pub fn accepts_text(&self) -> bool {
        match &self.screen {
            Screen::Setup(_) => true,
            Screen::Main => self.main.accepts_text(),
            Screen::Profiles(p) => p.accepts_text(),
            Screen::Settings(_) => false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }
        if key.code == KeyCode::Char('?') && !self.accepts_text() {
            self.show_help = true;
            return;
        }

        let (mut ctx, screen, main) = self.parts();
        let transition = match screen {
            Screen::Setup(s) => s.handle_key(key),
            Screen::Main => main.handle_key(key, &mut ctx),
            Screen::Profiles(s) => s.handle_key(key, &mut ctx),
            Screen::Settings(s) => s.handle_key(key, &mut ctx),
        };
        if let Some(transition) = transition {
            self.apply(transition);
        }
        self.run_pending_rescan();
    }

    fn apply(&mut self, transition: Transition) {
        tracing::debug!(?transition, "screen transition");
        match transition {
            Transition::Quit => self.should_quit = true,
            Transition::SetupComplete(root) => {
                self.screen = Screen::Main;
                let (mut ctx, _, main) = self.parts();
                main.set_source_root(root, &mut ctx);
            }
            Transition::OpenProfiles => {
                self.screen = Screen::Profiles(ProfilesScreen::new());
            }
            Transition::OpenSettings => {
                self.screen = Screen::Settings(SettingsScreen::new(
                    self.terminals.clone(),
                    &self.config,
                ));
            }
            Transition::Back => {
                self.screen = Screen::Main;
                self.main.refresh(self.config.directories.len());
            }
        }
    }

    pub fn handle_resize(&mut self, height: u16) {
        self.main.resize(height, self.config.directories.len());
    }

    /// A debounced change under the source root.
    pub fn handle_source_changed(&mut self, path: &Path) {
        tracing::debug!(path = %path.display(), "source change queued");
        self.rescan_pending = true;
        self.run_pending_rescan();
    }

    pub fn handle_watch_error(&mut self, message: &str) {
        tracing::warn!(error = %message, "watcher error");
        self.main.status = Some(Status::error(format!("watch error: {}", message)));
    }

    fn run_pending_rescan(&mut self) {
        if !self.rescan_pending || !matches!(self.screen, Screen::Main) || !self.main.in_list_mode() {
            return;
        }
        self.rescan_pending = false;
        let (mut ctx, _, main) = self.parts();
        main.rescan(&mut ctx);
    }

    pub fn rescan_pending(&self) -> bool {
        self.rescan_pending
    }

    /// Root the watcher should follow, if any.
    pub fn watch_root(&self) -> Option<&Path> {
        match self.screen {
            Screen::Setup(_) => None,
            _ if self.config.has_source_root() => Some(self.config.source_root.as_path()),
            _ => None,
        }
    }

    pub fn on_tick(&mut self) {
        let ttl = self.status_ttl;
        clear_stale(&mut self.main.status, ttl);
        match &mut self.screen {
            Screen::Profiles(p) => clear_stale(&mut p.status, ttl),
            Screen::Settings(s) => clear_stale(&mut s.status, ttl),
            Screen::Setup(_) | Screen::Main => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::directory::DirectoryEntry;
    use crate::model::profile::Profile;
    use crate::screens::main_list::MainMode;
    use crate::testutil::{key, press_str, MemoryStore, RecordingLauncher};
    use std::path::PathBuf;
    use std::rc::Rc;

    struct Fixture {
        app: App,
        store: Rc<MemoryStore>,
        launcher: Rc<RecordingLauncher>,
    }

    fn fixture(config: Configuration) -> Fixture {
        let store = Rc::new(MemoryStore::default());
        let launcher = Rc::new(RecordingLauncher::default());
        let app = App::new(
            config,
            Box::new(Rc::clone(&store)),
            Box::new(Rc::clone(&launcher)),
            vec!["alacritty".into(), "xterm".into()],
            24,
        );
        Fixture {
            app,
            store,
            launcher,
        }
    }

    fn rooted(root: &Path) -> Configuration {
        Configuration {
            source_root: root.to_path_buf(),
            profiles: vec![Profile {
                id: "p1".into(),
                label: "Claude".into(),
                cmd: "claude".into(),
            }],
            ..Configuration::default()
        }
    }

    fn source_tree(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        dir
    }

    #[test]
    fn empty_root_starts_in_setup() {
        let f = fixture(Configuration::default());
        assert!(matches!(f.app.screen, Screen::Setup(_)));
        assert!(f.app.watch_root().is_none());
        assert_eq!(f.store.save_count(), 0);
    }

    #[test]
    fn startup_reconciles_and_persists() {
        let dir = source_tree(&["beta", "alpha"]);
        let f = fixture(rooted(dir.path()));
        assert!(matches!(f.app.screen, Screen::Main));
        let names: Vec<_> = f.app.config.directories.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert_eq!(f.store.save_count(), 1);
        assert_eq!(f.app.watch_root(), Some(dir.path()));
    }

    #[test]
    fn startup_scan_failure_is_first_status() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = rooted(&dir.path().join("missing"));
        config.directories = vec![DirectoryEntry::discovered(PathBuf::from("/x/kept"), "kept".into())];
        let f = fixture(config);
        assert!(matches!(f.app.screen, Screen::Main));
        assert_eq!(f.app.config.directories.len(), 1);
        assert!(f.app.main.status.as_ref().unwrap().text.starts_with("scan error"));
        assert_eq!(f.store.save_count(), 0);
    }

    #[test]
    fn setup_complete_sets_root_reconciles_and_switches_to_main() {
        let dir = source_tree(&["one"]);
        let mut f = fixture(Configuration::default());
        if let Screen::Setup(s) = &mut f.app.screen {
            s.input = crate::screens::text_field("");
        }
        press_str(&mut |k| f.app.handle_key(k), &dir.path().to_string_lossy());
        f.app.handle_key(key(KeyCode::Enter));

        assert!(matches!(f.app.screen, Screen::Main));
        assert_eq!(f.app.config.source_root, dir.path());
        assert_eq!(f.app.config.directories.len(), 1);
        assert_eq!(f.store.save_count(), 1);
        assert_eq!(f.store.last_saved().unwrap().source_root, dir.path());
    }

    #[test]
    fn question_mark_is_text_during_setup() {
        let mut f = fixture(Configuration::default());
        f.app.handle_key(key(KeyCode::Char('?')));
        assert!(!f.app.show_help);
    }

    #[test]
    fn main_profiles_round_trip_keeps_cursor() {
        let dir = source_tree(&["a", "b", "c"]);
        let mut f = fixture(rooted(dir.path()));
        f.app.handle_key(key(KeyCode::Down));
        f.app.handle_key(key(KeyCode::Down));
        f.app.handle_key(key(KeyCode::Char('p')));
        assert!(matches!(f.app.screen, Screen::Profiles(_)));
        f.app.handle_key(key(KeyCode::Esc));
        assert!(matches!(f.app.screen, Screen::Main));
        assert_eq!(f.app.main.cursor, 2);
    }

    #[test]
    fn profiles_only_reachable_from_list_mode() {
        let dir = source_tree(&["a"]);
        let mut f = fixture(rooted(dir.path()));
        f.app.handle_key(key(KeyCode::Enter));
        assert!(matches!(f.app.main.mode, MainMode::Assign(_)));
        f.app.handle_key(key(KeyCode::Char('p')));
        assert!(matches!(f.app.screen, Screen::Main));
        f.app.handle_key(key(KeyCode::Esc));
        f.app.handle_key(key(KeyCode::Char('p')));
        assert!(matches!(f.app.screen, Screen::Profiles(_)));
    }

    #[test]
    fn deleting_profile_hides_label_after_back() {
        let dir = source_tree(&["a"]);
        let mut config = rooted(dir.path());
        config.directories = vec![DirectoryEntry {
            path: dir.path().join("a"),
            name: "a".into(),
            enabled: true,
            profile_ids: vec!["p1".into()],
        }];
        let mut f = fixture(config);
        f.app.handle_key(key(KeyCode::Char('p')));
        f.app.handle_key(key(KeyCode::Char('d')));
        f.app.handle_key(key(KeyCode::Esc));
        let entry = &f.app.config.directories[0];
        assert_eq!(entry.profile_ids.len(), 1);
        assert!(f.app.config.resolve_labels(entry).is_empty());
    }

    #[test]
    fn settings_selection_persists_terminal() {
        let dir = source_tree(&[]);
        let mut f = fixture(rooted(dir.path()));
        f.app.handle_key(key(KeyCode::Char('t')));
        assert!(matches!(f.app.screen, Screen::Settings(_)));
        f.app.handle_key(key(KeyCode::Down));
        f.app.handle_key(key(KeyCode::Enter));
        f.app.handle_key(key(KeyCode::Esc));
        assert!(matches!(f.app.screen, Screen::Main));
        assert_eq!(f.app.config.terminal.as_deref(), Some("xterm"));
        assert_eq!(f.store.last_saved().unwrap().terminal.as_deref(), Some("xterm"));
    }

    #[test]
    fn start_passes_terminal_preference() {
        let dir = source_tree(&[]);
        let mut config = rooted(dir.path());
        config.terminal = Some("kitty".into());
        let mut f = fixture(config);
        f.app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(f.launcher.calls()[0].2.as_deref(), Some("kitty"));
        assert!(f.app.main.status.as_ref().unwrap().text.starts_with("nothing to launch"));
    }

    #[test]
    fn quit_from_every_list_screen() {
        let dir = source_tree(&[]);
        for open in [None, Some('p'), Some('t')] {
            let mut f = fixture(rooted(dir.path()));
            if let Some(c) = open {
                f.app.handle_key(key(KeyCode::Char(c)));
            }
            f.app.handle_key(key(KeyCode::Char('q')));
            assert!(f.app.should_quit);
        }
    }

    #[test]
    fn help_overlay_swallows_keys_until_closed() {
        let dir = source_tree(&["a"]);
        let mut f = fixture(rooted(dir.path()));
        f.app.handle_key(key(KeyCode::Char('?')));
        assert!(f.app.show_help);
        f.app.handle_key(key(KeyCode::Char('p')));
        assert!(matches!(f.app.screen, Screen::Main));
        f.app.handle_key(key(KeyCode::Esc));
        assert!(!f.app.show_help);
        assert!(!f.app.should_quit);
    }

    #[test]
    fn source_change_rescans_immediately_in_list_mode() {
        let dir = source_tree(&["a"]);
        let mut f = fixture(rooted(dir.path()));
        std::fs::create_dir(dir.path().join("b")).unwrap();
        f.app.handle_source_changed(&dir.path().join("b"));
        assert!(!f.app.rescan_pending());
        assert_eq!(f.app.config.directories.len(), 2);
    }

    #[test]
    fn source_change_is_deferred_while_assigning() {
        let dir = source_tree(&["a"]);
        let mut f = fixture(rooted(dir.path()));
        f.app.handle_key(key(KeyCode::Enter));
        std::fs::create_dir(dir.path().join("b")).unwrap();
        f.app.handle_source_changed(&dir.path().join("b"));
        assert!(f.app.rescan_pending());
        assert_eq!(f.app.config.directories.len(), 1);

        f.app.handle_key(key(KeyCode::Esc));
        assert!(!f.app.rescan_pending());
        assert_eq!(f.app.config.directories.len(), 2);
    }

    #[test]
    fn source_change_is_deferred_on_profiles_screen() {
        let dir = source_tree(&["a"]);
        let mut f = fixture(rooted(dir.path()));
        f.app.handle_key(key(KeyCode::Char('p')));
        std::fs::create_dir(dir.path().join("b")).unwrap();
        f.app.handle_source_changed(&dir.path().join("b"));
        assert!(f.app.rescan_pending());
        f.app.handle_key(key(KeyCode::Esc));
        assert_eq!(f.app.config.directories.len(), 2);
    }

    #[test]
    fn stale_status_is_cleared_on_tick() {
        let dir = source_tree(&[]);
        let mut f = fixture(rooted(dir.path()));
        assert!(f.app.main.status.is_some());
        f.app.status_ttl = Duration::ZERO;
        f.app.on_tick();
        assert!(f.app.main.status.is_none());
    }
}
