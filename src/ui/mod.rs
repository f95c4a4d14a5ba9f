//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod state_panel;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (form_area, panel_area) = layout::create_layout(area, app.config.show_state_panels());

    forms::draw_account_form(frame, form_area, app);

    if let Some(panel_area) = panel_area {
        state_panel::draw(frame, panel_area, app);
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);
}
