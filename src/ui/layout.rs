use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::{help_overlay, main_view, profiles_view, settings_view, setup_view, theme};
use crate::app::{App, Screen};
use crate::screens::main_list::MainMode;
use crate::screens::profiles::ProfilesMode;
use crate::screens::{Status, StatusKind};

pub fn draw_layout(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(3),    // Content
            Constraint::Length(1), // Status message
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);

    match &app.screen {
        Screen::Setup(s) => setup_view::draw_setup(f, chunks[1], s),
        Screen::Main => main_view::draw_main(f, chunks[1], app),
        Screen::Profiles(p) => profiles_view::draw_profiles(f, chunks[1], app, p),
        Screen::Settings(s) => settings_view::draw_settings(f, chunks[1], app, s),
    }

    draw_status_line(f, chunks[2], current_status(app));
    draw_hint_bar(f, chunks[3], app);

    // Help overlay (on top of everything)
    if app.show_help {
        help_overlay::draw_help(f, f.area());
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);

    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1]);

    horiz[1]
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.screen {
        Screen::Setup(_) => "Setup",
        Screen::Main => "Directories",
        Screen::Profiles(_) => "Profiles",
        Screen::Settings(_) => "Terminal",
    };
    let mut spans = vec![
        Span::styled(" dirdeck ", theme::HEADER),
        Span::styled(format!("| {} ", title), theme::HEADER),
    ];
    if app.config.has_source_root() {
        spans.push(Span::styled(
            format!("| {} ", app.config.source_root.display()),
            theme::HEADER_DIM,
        ));
    }
    if let Some(at) = app.main.last_scan {
        spans.push(Span::styled(
            format!("| scanned {} ", at.format("%H:%M:%S")),
            theme::HEADER_DIM,
        ));
    }
    let used: usize = spans.iter().map(|s| s.width()).sum();
    spans.push(Span::styled(
        " ".repeat((area.width as usize).saturating_sub(used)),
        theme::HEADER,
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn current_status(app: &App) -> Option<&Status> {
    match &app.screen {
        Screen::Setup(_) => None,
        Screen::Main => app.main.status.as_ref(),
        Screen::Profiles(p) => p.status.as_ref(),
        Screen::Settings(s) => s.status.as_ref(),
    }
}

fn draw_status_line(f: &mut Frame, area: Rect, status: Option<&Status>) {
    let Some(status) = status else {
        return;
    };
    let style = match status.kind {
        StatusKind::Info => theme::STATUS_INFO,
        StatusKind::Error => theme::STATUS_ERROR,
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {}", status.text), style))),
        area,
    );
}

fn mode_badge(app: &App) -> Option<&'static str> {
    match &app.screen {
        Screen::Main => match app.main.mode {
            MainMode::List => None,
            MainMode::Assign(_) => Some(" ASSIGN "),
            MainMode::ChangeSource(_) => Some(" SOURCE "),
        },
        Screen::Profiles(p) => match &p.mode {
            ProfilesMode::List => None,
            ProfilesMode::Edit(e) if e.editing.is_none() => Some(" ADD "),
            ProfilesMode::Edit(_) => Some(" EDIT "),
        },
        Screen::Setup(_) | Screen::Settings(_) => None,
    }
}

fn hint_text(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints: Vec<(&str, &str)> = match &app.screen {
        Screen::Setup(_) => vec![("Enter", "confirm")],
        Screen::Main => match app.main.mode {
            MainMode::List => vec![
                ("Space", "enable"),
                ("Enter", "profiles"),
                ("s", "start"),
                ("r", "rescan"),
                ("c", "source"),
                ("p", "edit profiles"),
                ("t", "terminal"),
            ],
            MainMode::Assign(_) => vec![("Space", "toggle"), ("Enter", "save"), ("Esc", "cancel")],
            MainMode::ChangeSource(_) => vec![("Enter", "save"), ("Esc", "cancel")],
        },
        Screen::Profiles(p) => match p.mode {
            ProfilesMode::List => vec![
                ("a", "add"),
                ("e", "edit"),
                ("d", "delete"),
                ("Esc", "back"),
            ],
            ProfilesMode::Edit(_) => vec![("Tab", "field"), ("Enter", "save"), ("Esc", "cancel")],
        },
        Screen::Settings(_) => vec![("j/k", "nav"), ("Enter", "select"), ("Esc", "back")],
    };
    if !app.accepts_text() {
        hints.push(("?", "help"));
    }
    hints
}

fn draw_hint_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut left_spans: Vec<Span> = Vec::new();
    if let Some(badge) = mode_badge(app) {
        left_spans.push(Span::styled(badge, theme::MODE_BADGE));
    }

    // Build right-aligned hint spans
    let hints = hint_text(app);
    let mut hint_spans: Vec<Span> = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            hint_spans.push(Span::styled("  ", theme::STATUS_BAR));
        }
        hint_spans.push(Span::styled(*key, theme::HINT_KEY));
        hint_spans.push(Span::styled(":", theme::HINT_DESC));
        hint_spans.push(Span::styled(*desc, theme::HINT_DESC));
    }
    hint_spans.push(Span::styled(" ", theme::STATUS_BAR));

    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let hint_width: usize = hint_spans.iter().map(|s| s.width()).sum();
    let total = area.width as usize;
    let gap = total.saturating_sub(left_width + hint_width);

    let mut spans = left_spans;
    spans.push(Span::styled(" ".repeat(gap), theme::STATUS_BAR));
    spans.extend(hint_spans);

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
