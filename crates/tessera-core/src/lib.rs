//! Tessera Core Library
//!
//! This crate provides core domain models, error types, configuration and
//! pagination parsing that are shared across all Tessera components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel, UploadError};
