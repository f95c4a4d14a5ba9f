//! Layout components (main split, status bar)

use crate::app::App;
use crate::platform::{COPY_SHORTCUT, RESET_SHORTCUT, SUBMIT_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split into the form area and, when enabled, the state panel area.
/// The bottom line is reserved for the status bar.
pub fn create_layout(area: Rect, show_panels: bool) -> (Rect, Option<Rect>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    if !show_panels {
        return (rows[0], None);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),        // Form
            Constraint::Percentage(40), // State panels
        ])
        .split(rows[0]);

    (columns[0], Some(columns[1]))
}

/// Key hints for the focused control
fn get_hints(app: &App) -> String {
    let control_hint = match app.state.active() {
        Some(c) if c.is_checkbox() => "Space: toggle",
        Some(c) if c.is_multiline() => "Enter: new line",
        Some(c) if c.accepts_text() => "type to edit",
        Some(_) => "←/→: choose",
        None => "Enter: submit",
    };
    format!(
        " Tab/↓: next | Shift+Tab/↑: prev | {control_hint} | {SUBMIT_SHORTCUT}: submit | \
         {RESET_SHORTCUT}: reset | {COPY_SHORTCUT}: copy values | Esc: quit "
    )
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let form = &app.state.form;
    let mut spans = vec![];

    let validity = if form.is_valid() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Red))
    };
    spans.push(validity);

    spans.push(Span::styled(get_hints(app), Style::default().fg(Color::Gray)));

    if form.is_dirty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("modified", Style::default().fg(Color::Yellow)));
    }

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);
}
