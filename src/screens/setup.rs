use crossterm::event::{KeyCode, KeyEvent};
use tui_textarea::TextArea;

use super::{field_input, field_value, text_field, Transition};
use crate::config::expand_home;

/// First-run prompt for the source root.
pub struct SetupScreen {
    pub input: TextArea<'static>,
    pub error: Option<String>,
}

impl SetupScreen {
    pub fn new(suggestion: &str) -> Self {
        SetupScreen {
            input: text_field(suggestion),
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Transition> {
        match key.code {
            KeyCode::Enter => {
                let value = field_value(&self.input);
                let value = value.trim();
                if value.is_empty() {
                    self.error = Some("path cannot be empty".to_string());
                    return None;
                }
                self.error = None;
                Some(Transition::SetupComplete(expand_home(value)))
            }
            _ => {
                field_input(&mut self.input, key);
                None
            }
        }
    }
}
