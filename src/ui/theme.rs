use ratatui::style::{Color, Modifier, Style};

// Header
pub const HEADER: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
pub const HEADER_DIM: Style = Style::new().fg(Color::DarkGray).bg(Color::Cyan);

// Status bar
pub const STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);
pub const STATUS_INFO: Style = Style::new().fg(Color::Green);
pub const STATUS_ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

// Mode badge in the status bar
pub const MODE_BADGE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

// List items
pub const LIST_SELECTED: Style = Style::new()
    .fg(Color::White)
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);
pub const LIST_NORMAL: Style = Style::new().fg(Color::White);

// Directory rows
pub const DIR_ENABLED: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
pub const DIR_DISABLED: Style = Style::new().fg(Color::DarkGray);
pub const PROFILE_LABELS: Style = Style::new().fg(Color::Magenta);
pub const COMMAND: Style = Style::new().fg(Color::DarkGray);

// Settings: the configured terminal
pub const CURRENT_MARK: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

// Borders
pub const BORDER_ACTIVE: Style = Style::new().fg(Color::Cyan);
pub const BORDER_INACTIVE: Style = Style::new().fg(Color::DarkGray);
pub const BORDER_EDIT: Style = Style::new().fg(Color::Yellow);

// Text fields
pub const FIELD_TEXT: Style = Style::new().fg(Color::White);
pub const FIELD_ERROR: Style = Style::new().fg(Color::Red);

// Help overlay
pub const HELP_TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
pub const HELP_KEY: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
pub const HELP_DESC: Style = Style::new().fg(Color::White);

// Footer hints
pub const HINT_KEY: Style = Style::new().fg(Color::Yellow).bg(Color::DarkGray);
pub const HINT_DESC: Style = Style::new().fg(Color::Gray).bg(Color::DarkGray);

// Empty state
pub const EMPTY_STATE: Style = Style::new().fg(Color::DarkGray);
