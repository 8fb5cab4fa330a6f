use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::layout::centered;
use super::theme;
use crate::screens::setup::SetupScreen;

pub fn draw_setup(f: &mut Frame, area: Rect, setup: &SetupScreen) {
    let box_area = centered(area, 70, 8);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Prompt
            Constraint::Length(3), // Input
            Constraint::Length(1), // Error
            Constraint::Min(0),
        ])
        .split(box_area);

    let prompt = vec![
        Line::from(Span::styled("Where do your projects live?", theme::HELP_TITLE)),
        Line::from(Span::styled(
            "Every subdirectory of this folder becomes a row you can launch.",
            theme::HELP_DESC,
        )),
    ];
    f.render_widget(Paragraph::new(prompt), chunks[0]);

    let mut editor = setup.input.clone();
    editor.set_block(
        Block::default()
            .title(" Source directory ")
            .borders(Borders::ALL)
            .border_style(theme::BORDER_EDIT),
    );
    editor.set_style(theme::FIELD_TEXT);
    f.render_widget(&editor, chunks[1]);

    if let Some(ref err) = setup.error {
        f.render_widget(
            Paragraph::new(Span::styled(err.as_str(), theme::FIELD_ERROR)),
            chunks[2],
        );
    }
}
