//! Profile page helpers.
//!
//! This module provides:
//! - Bio sanitizing and plain-text excerpts
//! - The [`ProfileView`] assembled for one record (metadata, keywords,
//!   derived subcategories, structured data)

mod sanitize;
mod view;

// Re-export main types
pub use sanitize::{description, plain_text, sanitize_bio, DESCRIPTION_MAX_CHARS};
pub use view::{ProfileMetadata, ProfileView};

#[cfg(test)]
mod tests;
