//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Whether pressing the button is expected to go through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonTone {
    Ready,
    /// Pressing still works but will be rejected
    Blocked,
}

impl ButtonTone {
    fn marker(self) -> &'static str {
        match self {
            ButtonTone::Ready => "▶",
            ButtonTone::Blocked => "✗",
        }
    }

    fn color(self) -> Color {
        match self {
            ButtonTone::Ready => Color::Cyan,
            ButtonTone::Blocked => Color::Red,
        }
    }
}

/// Render a bordered button. Unfocused buttons are dimmed; the tone picks
/// the focus color and the leading marker.
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    tone: ButtonTone,
) {
    let (border_style, text_style) = if is_selected {
        (
            Style::default().fg(tone.color()),
            Style::default()
                .fg(tone.color())
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(match tone {
                ButtonTone::Ready => Color::Reset,
                ButtonTone::Blocked => Color::DarkGray,
            }),
        )
    };

    let paragraph = Paragraph::new(format!(" {} {content} ", tone.marker())).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
