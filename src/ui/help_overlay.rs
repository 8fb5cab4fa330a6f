use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::layout::centered;
use super::theme;

const BINDINGS: &[(&str, &str)] = &[
    ("j/k or Up/Down", "Move cursor"),
    ("PgUp / PgDn", "Move one page"),
    ("g / G", "Jump to top / bottom"),
    ("Space", "Enable / disable directory"),
    ("Enter", "Assign profiles to directory"),
    ("c", "Change source directory"),
    ("r", "Rescan source directory"),
    ("s", "Start terminals"),
    ("p", "Manage profiles"),
    ("a / e / d", "Add / edit / delete profile"),
    ("Tab", "Switch field while editing"),
    ("t", "Choose terminal emulator"),
    ("Esc", "Cancel / back"),
    ("?", "Toggle this help"),
    ("q / Ctrl+C", "Quit"),
];

pub fn draw_help(f: &mut Frame, area: Rect) {
    let height = (BINDINGS.len() as u16 + 4).min(area.height.saturating_sub(2));
    let popup_area = centered(area, 56, height);

    // Clear background
    f.render_widget(Clear, popup_area);

    let mut lines = vec![
        Line::from(Span::styled(" Keybindings", theme::HELP_TITLE)),
        Line::from(""),
    ];

    for (key, desc) in BINDINGS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:18}", key), theme::HELP_KEY),
            Span::styled(*desc, theme::HELP_DESC),
        ]));
    }

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER_ACTIVE);

    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}
