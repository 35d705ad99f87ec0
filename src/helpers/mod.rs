//! Helper functions for rendering
//!
//! Date formatting and HTML generation shared by the rich text renderer,
//! the CLI and the preview server.

mod date;
mod html;

pub use date::*;
pub use html::*;
