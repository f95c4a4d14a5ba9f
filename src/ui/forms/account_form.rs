//! Account form rendering

use super::field_renderer::{draw_checkbox, draw_error_line, draw_field};
use crate::app::App;
use crate::state::{AppState, ControlKind, FormControl};
use crate::ui::components::{render_button, ButtonTone, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// What occupies one row of the form layout
enum Row<'a> {
    Control(usize, &'a FormControl),
    Error(&'a str),
    Submit,
}

fn control_height(control: &FormControl) -> u16 {
    match control.kind {
        ControlKind::Text { multiline: true } => 5,
        ControlKind::Checkbox | ControlKind::CheckboxOption { .. } => 1,
        _ => 3,
    }
}

/// Rows in render order. Checkbox errors get their own line after the last
/// box bound to the field; bordered controls show theirs in the border.
fn rows(state: &AppState) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    for (index, control) in state.controls.iter().enumerate() {
        rows.push(Row::Control(index, control));
        if control.is_checkbox() && state.is_last_of_group(index) {
            if let Some(error) = state.form.visible_error(&control.name) {
                rows.push(Row::Error(&error.message));
            }
        }
    }
    rows.push(Row::Submit);
    rows
}

/// Draw the account form
pub fn draw_account_form(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;

    let block = Block::default()
        .title(" New Account ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = rows(state);
    let mut constraints: Vec<Constraint> = rows
        .iter()
        .map(|row| match row {
            Row::Control(_, control) => Constraint::Length(control_height(control)),
            Row::Error(_) => Constraint::Length(1),
            Row::Submit => Constraint::Length(BUTTON_HEIGHT),
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .horizontal_margin(1)
        .split(inner);

    for (row, chunk) in rows.iter().zip(chunks.iter()) {
        match row {
            Row::Control(index, control) => {
                let is_active = *index == state.active_control;
                let text = state.control_text(control);
                if control.is_checkbox() {
                    draw_checkbox(frame, *chunk, &control.label, &text, is_active);
                } else {
                    let error = state
                        .form
                        .visible_error(&control.name)
                        .map(|e| e.message.as_str());
                    draw_field(
                        frame,
                        *chunk,
                        &control.label,
                        &text,
                        is_active,
                        control.is_multiline(),
                        error,
                    );
                }
            }
            Row::Error(message) => draw_error_line(frame, *chunk, message),
            Row::Submit => {
                let button_area = Rect {
                    width: chunk.width.min(14),
                    ..*chunk
                };
                let tone = if state.form.is_valid() {
                    ButtonTone::Ready
                } else {
                    ButtonTone::Blocked
                };
                render_button(frame, button_area, "Submit", state.is_submit_active(), tone);
            }
        }
    }
}
