//! Data sources the directory snapshot is loaded from.
//!
//! This module provides:
//! - The [`ProfessionalSource`] trait every backend implements
//! - A REST table client ([`RestSource`])
//! - A JSON file reader ([`JsonFileSource`])
//! - An in-memory source for tests and fixtures ([`StaticSource`])

mod file;
mod memory;
mod rest;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ProfessionalRow;

// Re-export main types
pub use file::JsonFileSource;
pub use memory::StaticSource;
pub use rest::{RestSource, RestSourceConfig, DEFAULT_TABLE};

/// A backend that can return every professional row in one request.
#[async_trait]
pub trait ProfessionalSource: Send + Sync {
    /// Short human-readable description, used in status output and logs.
    fn label(&self) -> String;

    /// Fetches all rows. Failures surface as [`crate::DirectoryError::Fetch`]
    /// or an I/O / serialization error; no partial result is returned.
    async fn fetch_all(&self) -> Result<Vec<ProfessionalRow>>;
}

pub type SharedSource = Arc<dyn ProfessionalSource>;
