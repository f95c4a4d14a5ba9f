//! Reusable UI components

mod button;

pub use button::{render_button, ButtonTone, BUTTON_HEIGHT};
