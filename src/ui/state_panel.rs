//! Errors, values and touched-field panels

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<{e}>"))
}

fn draw_json(frame: &mut Frame, area: Rect, title: &str, body: String, color: Color) {
    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(paragraph, area);
}

/// Draw the errors, values, touched and last submission panels
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40), // Errors
            Constraint::Min(6),         // Values
            Constraint::Length(3),      // Touched
            Constraint::Length(3),      // Last submission
        ])
        .split(area);

    let form = &app.state.form;
    let error_color = if form.is_valid() {
        Color::DarkGray
    } else {
        Color::Red
    };
    draw_json(
        frame,
        chunks[0],
        "Errors",
        pretty(&form.errors_json()),
        error_color,
    );
    draw_json(
        frame,
        chunks[1],
        "Values",
        pretty(&form.values_json()),
        Color::DarkGray,
    );

    let touched = if form.touched().is_empty() {
        "none".to_string()
    } else {
        form.touched()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    draw_json(frame, chunks[2], "Touched", touched, Color::DarkGray);

    let submissions = &app.state.submissions;
    let summary = match &submissions.last {
        Some(s) => format!(
            "#{} at {}",
            submissions.accepted,
            s.submitted_at.format("%H:%M:%S")
        ),
        None => format!("none ({} attempt(s))", form.submit_count()),
    };
    draw_json(frame, chunks[3], "Last submission", summary, Color::DarkGray);
}
