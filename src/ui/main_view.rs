use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tui_textarea::TextArea;

use super::layout::centered;
use super::theme;
use super::util::{fit_width, truncate_width};
use crate::app::App;
use crate::model::directory::DirectoryEntry;
use crate::screens::main_list::{AssignState, MainMode};

/// Column width for directory names in the list.
const NAME_WIDTH: usize = 28;

pub fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    draw_directory_list(f, area, app);

    match &app.main.mode {
        MainMode::List => {}
        MainMode::Assign(assign) => draw_assign(f, area, app, assign),
        MainMode::ChangeSource(input) => draw_change_source(f, area, input),
    }
}

fn draw_directory_list(f: &mut Frame, area: Rect, app: &App) {
    let dirs = &app.config.directories;
    let enabled = dirs.iter().filter(|d| d.enabled).count();
    let title = format!(" Directories [{}/{}] ", enabled, dirs.len());
    let border_style = if app.main.in_list_mode() {
        theme::BORDER_ACTIVE
    } else {
        theme::BORDER_INACTIVE
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    if dirs.is_empty() {
        let p = Paragraph::new(format!(
            "No subdirectories in {}\n\nPress 'r' to rescan or 'c' to pick another source directory",
            app.config.source_root.display()
        ))
        .style(theme::EMPTY_STATE)
        .block(block)
        .wrap(Wrap { trim: false });
        f.render_widget(p, area);
        return;
    }

    // Only the scroll window is handed to the widget
    let rows = area.height.saturating_sub(2) as usize;
    let (start, end) = row_window(
        app.main.scroll,
        app.main.cursor,
        app.main.visible_rows().min(rows),
        dirs.len(),
    );
    let width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = dirs[start..end]
        .iter()
        .map(|entry| ListItem::new(directory_line(app, entry, width)))
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.main.cursor.saturating_sub(start)));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::LIST_SELECTED);
    f.render_stateful_widget(list, area, &mut state);
}

/// Rows `[start, end)` to draw. On terminals too short for the controller's
/// minimum window, the window is cut down to `rows` and kept on the cursor.
fn row_window(scroll: usize, cursor: usize, rows: usize, len: usize) -> (usize, usize) {
    let mut start = scroll.min(len);
    if rows > 0 && cursor >= start + rows {
        start = cursor + 1 - rows;
    }
    (start, (start + rows).min(len))
}

fn directory_line(app: &App, entry: &DirectoryEntry, width: usize) -> Line<'static> {
    let (mark, mark_style) = if entry.enabled {
        (" [x] ", theme::DIR_ENABLED)
    } else {
        (" [ ] ", theme::DIR_DISABLED)
    };
    let labels = app.config.resolve_labels(entry).join(", ");
    let label_width = width.saturating_sub(NAME_WIDTH + 6);

    Line::from(vec![
        Span::styled(mark, mark_style),
        Span::styled(fit_width(&entry.name, NAME_WIDTH), theme::LIST_NORMAL),
        Span::raw(" "),
        Span::styled(truncate_width(&labels, label_width).into_owned(), theme::PROFILE_LABELS),
    ])
}

fn draw_assign(f: &mut Frame, area: Rect, app: &App, assign: &AssignState) {
    let profiles = &app.config.profiles;
    let height = (profiles.len() as u16 + 2).max(3);
    let popup_area = centered(area, 50, height);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" Profiles for {} ", truncate_width(&assign.target_name, 30)))
        .borders(Borders::ALL)
        .border_style(theme::BORDER_EDIT);

    if profiles.is_empty() {
        let p = Paragraph::new("No profiles. Press Esc, then 'p' to add one.")
            .style(theme::EMPTY_STATE)
            .block(block);
        f.render_widget(p, popup_area);
        return;
    }

    let items: Vec<ListItem> = profiles
        .iter()
        .map(|profile| {
            let checked = assign.selected.contains(&profile.id);
            let (mark, style) = if checked {
                (" [x] ", theme::DIR_ENABLED)
            } else {
                (" [ ] ", theme::DIR_DISABLED)
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(profile.label.as_str(), theme::LIST_NORMAL),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(assign.cursor));
    let list = List::new(items)
        .block(block)
        .highlight_style(theme::LIST_SELECTED);
    f.render_stateful_widget(list, popup_area, &mut state);
}

fn draw_change_source(f: &mut Frame, area: Rect, input: &TextArea<'static>) {
    let popup_area = centered(area, 70, 3);
    f.render_widget(Clear, popup_area);

    let mut editor = input.clone();
    editor.set_block(
        Block::default()
            .title(" Source directory ")
            .borders(Borders::ALL)
            .border_style(theme::BORDER_EDIT),
    );
    editor.set_style(theme::FIELD_TEXT);
    f.render_widget(&editor, popup_area);
}
