//! Application state and core logic

use crate::config::TuiConfig;
use crate::state::{values_to_json, AppState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Loaded user configuration
    pub config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance from the user's config
    pub fn new() -> Result<Self> {
        let config = TuiConfig::load()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: TuiConfig) -> Self {
        let state = AppState::new(config.triggers());
        Self {
            state,
            config,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Route a key event to the form
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if ctrl => self.quit = true,
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('r') if ctrl => self.state.reset_form(),
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                self.copy_values()
            }
            KeyCode::Tab | KeyCode::Down => self.state.next_form_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Enter if self.state.is_submit_active() => self.submit(),
            KeyCode::Enter => self.state.form_newline(),
            KeyCode::Char(' ') if self.state.active().is_some_and(|c| c.is_checkbox()) => {
                self.state.toggle_active()
            }
            KeyCode::Left => self.state.step_active_select(false),
            KeyCode::Right => self.state.step_active_select(true),
            KeyCode::Char(c) if !ctrl => self.state.form_input_char(c),
            KeyCode::Backspace => self.state.form_backspace(),
            _ => {}
        }
        Ok(())
    }

    fn submit(&mut self) {
        if self.state.submit() {
            if let Some(submission) = &self.state.submissions.last {
                tracing::info!(
                    at = %submission.submitted_at,
                    fields = submission.values.len(),
                    "submission accepted"
                );
            }
        }
    }

    /// Copy the values JSON to the system clipboard
    fn copy_values(&mut self) {
        let json = match serde_json::to_string_pretty(&values_to_json(self.state.form.values())) {
            Ok(json) => json,
            Err(e) => {
                self.state.status_message = Some(format!("Failed to encode values: {e}"));
                return;
            }
        };
        let result = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(json));
        self.state.status_message = Some(match result {
            Ok(()) => "Copied values to clipboard".to_string(),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {e}");
                format!("Failed to copy: {e}")
            }
        });
    }
}
