pub mod help_overlay;
pub mod layout;
pub mod main_view;
pub mod profiles_view;
pub mod settings_view;
pub mod setup_view;
pub mod theme;
pub mod util;

use ratatui::Frame;

use crate::app::App;

/// Main draw dispatcher.
pub fn draw(f: &mut Frame, app: &App) {
    layout::draw_layout(f, app);
}
