//! HTTP service for the Popravci professional directory.
//!
//! Wraps the [`directory`] crate with configuration, a snapshot cache and an
//! axum JSON API.

pub mod catalog;
pub mod config;
pub mod error;
pub mod server;
pub mod telemetry;

pub use catalog::Catalog;
pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceResult};
pub use server::Server;
