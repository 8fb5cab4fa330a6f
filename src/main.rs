mod app;
mod config;
mod data;
mod event;
mod model;
mod screens;
#[cfg(test)]
mod testutil;
mod ui;
mod watcher;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self as ct_event, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::app::App;
use crate::config::Settings;
use crate::data::launcher::{Launcher, SystemLauncher};
use crate::data::store::{load_or_default, ConfigStore, JsonFileStore, StoreError};
use crate::data::{scanner, terminals};
use crate::event::AppEvent;
use crate::model::configuration::Configuration;
use crate::watcher::SourceWatcher;

#[derive(Parser)]
#[command(
    name = "dirdeck",
    version,
    about = "Open a terminal per project directory and launch profile",
    override_help = HELP_TEXT,
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration document to use instead of the per-user default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not write a log file
    #[arg(long, global = true)]
    no_log: bool,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Rescan and launch every enabled directory/profile pair, then exit
    Start,
    /// List the terminal emulators found on this machine
    Terminals,
}

const HELP_TEXT: &str = "\
dirdeck - open one terminal per project directory and launch profile

USAGE:
  dirdeck [OPTIONS]              Start the TUI
  dirdeck start [OPTIONS]        Launch all enabled directories without the TUI
  dirdeck terminals [OPTIONS]    List detected terminal emulators (* = configured)

GLOBAL OPTIONS:
  --config <FILE>   Configuration document [default: <config dir>/dirdeck/config.json]
  --no-log          Do not write dirdeck.log
  -h, --help        Print this help
  -V, --version     Print version

FILES:
  config.json       Source root, profiles, directories, preferred terminal
  settings.toml     Optional: [display] tick_rate, status_ttl
                              [watch] enabled, debounce_ms
                              [log] level
  dirdeck.log       Log output; DIRDECK_LOG overrides the level

TUI KEYBINDINGS (directory list):
  j/k  Up/Down       Move cursor
  PgUp/PgDn          Move one page
  g / G              Jump to top / bottom
  Space              Enable / disable directory
  Enter              Assign profiles (Space toggles, Enter saves, Esc cancels)
  c                  Change source directory
  r                  Rescan source directory
  s                  Start terminals for enabled directories
  p                  Manage profiles (a add, e edit, d delete, Esc back)
  t                  Choose terminal emulator
  ?                  Toggle help overlay
  q / Ctrl+C         Quit

EXAMPLES:
  dirdeck
  dirdeck start
  dirdeck --config ~/work/dirdeck.json terminals";

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_dir = match config::config_dir() {
        Some(dir) => dir,
        None if cli.config.is_some() => PathBuf::from("."),
        None => return Err(StoreError::NoConfigDir.into()),
    };
    let settings = config::load_settings(&config_dir);

    if !cli.no_log {
        if let Err(e) = init_logging(&config_dir, settings.log_level()) {
            eprintln!("warning: logging disabled: {:#}", e);
        }
    }

    let store_path = cli
        .config
        .unwrap_or_else(|| config_dir.join(config::CONFIG_FILE));
    let store = JsonFileStore::new(store_path);
    let configuration = load_or_default(&store)
        .with_context(|| format!("loading {}", store.path().display()))?;
    tracing::info!(
        path = %store.path().display(),
        profiles = configuration.profiles.len(),
        directories = configuration.directories.len(),
        "configuration loaded"
    );

    match cli.command {
        Some(Command::Start) => run_start(configuration, &store),
        Some(Command::Terminals) => list_terminals(&configuration),
        None => run_tui(configuration, store, &settings),
    }
}

/// File logger. The terminal belongs to the TUI, so nothing goes to stdout.
fn init_logging(dir: &Path, level: &str) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(config::LOG_FILE))?;

    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_env("DIRDECK_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))
}

fn run_start(mut configuration: Configuration, store: &dyn ConfigStore) -> Result<()> {
    if configuration.has_source_root() {
        match scanner::reconcile(&configuration.source_root, &configuration.directories) {
            Ok(dirs) => {
                configuration.directories = dirs;
                store.save(&configuration)?;
            }
            Err(e) => {
                tracing::warn!(error = %e, "rescan failed, using stored list");
                eprintln!("warning: {}", e);
            }
        }
    }

    let launched = SystemLauncher.launch(
        &configuration.directories,
        &configuration.profiles,
        configuration.terminal.as_deref(),
    )?;
    match launched {
        0 => println!("nothing to launch: enable a directory and assign profiles"),
        1 => println!("launched 1 session"),
        n => println!("launched {} sessions", n),
    }
    Ok(())
}

fn list_terminals(configuration: &Configuration) -> Result<()> {
    let configured = configuration.terminal.as_deref();
    for name in terminals::available_terminals() {
        let marker = if configured == Some(name.as_str()) { '*' } else { ' ' };
        println!("{} {}", marker, name);
    }
    if configured.is_none() {
        println!("(none configured, auto-detect picks {})", terminals::detect_terminal());
    }
    Ok(())
}

fn run_tui(configuration: Configuration, store: JsonFileStore, settings: &Settings) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, configuration, store, settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "exiting with error");
        eprintln!("Error: {}", e);
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    configuration: Configuration,
    store: JsonFileStore,
    settings: &Settings,
) -> Result<()> {
    let height = terminal.size()?.height;
    let mut app = App::new(
        configuration,
        Box::new(store),
        Box::new(SystemLauncher),
        terminals::available_terminals(),
        height,
    );
    app.status_ttl = Duration::from_secs(settings.status_ttl());

    let (tx, rx) = mpsc::channel::<AppEvent>();
    let debounce = Duration::from_millis(settings.debounce_ms());
    let mut source_watch: Option<(PathBuf, Option<SourceWatcher>)> = None;

    let tick_rate = Duration::from_millis(settings.tick_rate());
    let mut last_tick = Instant::now();

    loop {
        if settings.watch_enabled() {
            sync_watcher(&app, &mut source_watch, debounce, &tx);
        }

        // Draw only when dirty
        if app.dirty {
            terminal.draw(|f| ui::draw(f, &app))?;
            app.dirty = false;
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if ct_event::poll(timeout)? {
            match ct_event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(&mut app, key);
                    app.mark_dirty();
                }
                Event::Resize(_, height) => {
                    app.handle_resize(height);
                    app.mark_dirty();
                }
                _ => {}
            }
        }

        // Watcher events are applied on this thread, between key events
        while let Ok(evt) = rx.try_recv() {
            match evt {
                AppEvent::SourceChanged(path) => app.handle_source_changed(&path),
                AppEvent::WatchError(message) => app.handle_watch_error(&message),
            }
            app.mark_dirty();
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            app.on_tick();
            app.mark_dirty();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Point the watcher at the app's current source root, restarting it when
/// the root changes. A root that cannot be watched is remembered so the
/// attempt is not repeated every iteration.
fn sync_watcher(
    app: &App,
    current: &mut Option<(PathBuf, Option<SourceWatcher>)>,
    debounce: Duration,
    tx: &mpsc::Sender<AppEvent>,
) {
    let wanted = app.watch_root();
    if current.as_ref().map(|(root, _)| root.as_path()) == wanted {
        return;
    }
    *current = wanted.map(|root| {
        let watcher = match watcher::start_watcher(root, debounce, tx.clone()) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "cannot watch source root");
                None
            }
        };
        (root.to_path_buf(), watcher)
    });
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keybindings (always active)
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }
    app.handle_key(key);
}
