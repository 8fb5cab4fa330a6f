use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tui_textarea::TextArea;

use super::layout::centered;
use super::theme;
use super::util::fit_width;
use crate::app::App;
use crate::screens::profiles::{EditField, EditState, ProfilesMode, ProfilesScreen};

const LABEL_WIDTH: usize = 20;

pub fn draw_profiles(f: &mut Frame, area: Rect, app: &App, screen: &ProfilesScreen) {
    draw_profile_list(f, area, app, screen);

    if let ProfilesMode::Edit(ref edit) = screen.mode {
        draw_edit(f, area, edit);
    }
}

fn draw_profile_list(f: &mut Frame, area: Rect, app: &App, screen: &ProfilesScreen) {
    let profiles = &app.config.profiles;
    let border_style = match screen.mode {
        ProfilesMode::List => theme::BORDER_ACTIVE,
        ProfilesMode::Edit(_) => theme::BORDER_INACTIVE,
    };
    let block = Block::default()
        .title(format!(" Profiles [{}] ", profiles.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if profiles.is_empty() {
        let p = Paragraph::new("No profiles yet\n\nPress 'a' to add one")
            .style(theme::EMPTY_STATE)
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = profiles
        .iter()
        .map(|p| {
            ListItem::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(fit_width(&p.label, LABEL_WIDTH), theme::LIST_NORMAL),
                Span::raw(" "),
                Span::styled(p.cmd.as_str(), theme::COMMAND),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(screen.cursor));
    let list = List::new(items)
        .block(block)
        .highlight_style(theme::LIST_SELECTED);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_edit(f: &mut Frame, area: Rect, edit: &EditState) {
    let popup_area = centered(area, 70, 9);
    f.render_widget(Clear, popup_area);

    let title = if edit.editing.is_some() {
        " Edit profile "
    } else {
        " New profile "
    };
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(theme::BORDER_EDIT);
    let inner = outer.inner(popup_area);
    f.render_widget(outer, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Label
            Constraint::Length(3), // Command
            Constraint::Min(0),    // Error
        ])
        .split(inner);

    draw_field(f, chunks[0], &edit.label, " Label ", edit.focus == EditField::Label);
    draw_field(f, chunks[1], &edit.command, " Command ", edit.focus == EditField::Command);

    if let Some(ref err) = edit.error {
        f.render_widget(
            Paragraph::new(Span::styled(err.as_str(), theme::FIELD_ERROR)),
            chunks[2],
        );
    }
}

fn draw_field(f: &mut Frame, area: Rect, field: &TextArea<'static>, title: &str, focused: bool) {
    let mut editor = field.clone();
    let border = if focused {
        theme::BORDER_ACTIVE
    } else {
        theme::BORDER_INACTIVE
    };
    editor.set_block(
        Block::default()
            .title(title.to_string())
            .borders(Borders::ALL)
            .border_style(border),
    );
    editor.set_style(theme::FIELD_TEXT);
    if !focused {
        // hide the cursor in the unfocused field
        editor.set_cursor_style(theme::FIELD_TEXT);
    }
    f.render_widget(&editor, area);
}
