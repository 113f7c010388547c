//! Reusable TUI widgets.

pub mod form;
pub mod status_bar;

pub use form::{FormCursor, draw_form, edit_value};
pub use status_bar::{StatusBarContext, draw_status_bar};
