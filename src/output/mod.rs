//! Output formatting for lookup results.
//!
//! This module handles presenting a lookup:
//! - [`html`] - the page served to visitors
//! - [`terminal`] - coloured terminal output for the CLI

mod html;
mod terminal;

pub use html::{escape_html, render_error_page, render_page, PageOutcome};
pub use terminal::{format_label, format_lookup, print_lookup};
