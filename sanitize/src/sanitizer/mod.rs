//! The sanitizing copier and its string pipeline.

mod pipeline;
mod url;
mod walk;

pub use pipeline::{SanitizeHook, PLACEHOLDER};
pub use walk::{sanitize, Sanitize, SanitizeKey, Sanitized};
