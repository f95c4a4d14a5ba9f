//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `account_form`: The account form layout

mod account_form;
mod field_renderer;

pub use account_form::draw_account_form;
