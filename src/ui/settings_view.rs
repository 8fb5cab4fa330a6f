use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};
use ratatui::Frame;

use super::theme;
use crate::app::App;
use crate::screens::settings::SettingsScreen;

pub fn draw_settings(f: &mut Frame, area: Rect, app: &App, settings: &SettingsScreen) {
    let current = settings.current_index(&app.config);
    let title = match app.config.terminal.as_deref() {
        Some(name) => format!(" Terminal emulator [{}] ", name),
        None => " Terminal emulator [auto-detect] ".to_string(),
    };

    let items: Vec<ListItem> = settings
        .terminals
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let line = if Some(i) == current {
                Line::from(vec![
                    Span::styled(" * ", theme::CURRENT_MARK),
                    Span::styled(name.as_str(), theme::CURRENT_MARK),
                ])
            } else {
                Line::from(vec![
                    Span::raw("   "),
                    Span::styled(name.as_str(), theme::LIST_NORMAL),
                ])
            };
            ListItem::new(line)
        })
        .collect();

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::BORDER_ACTIVE);

    let mut state = ListState::default();
    state.select(Some(settings.cursor));
    let list = List::new(items)
        .block(block)
        .highlight_style(theme::LIST_SELECTED);
    f.render_stateful_widget(list, area, &mut state);
}
