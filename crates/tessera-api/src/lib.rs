//! Tessera API Library
//!
//! This crate provides the HTTP handlers, the per-request rendering context,
//! authentication, and application setup.

mod handlers;
mod services;
mod utils;

pub mod auth;
pub mod context;
pub mod error;
pub mod setup;
pub mod state;
pub mod views;

// Re-exports
pub use context::RequestContext;
pub use error::{ErrorResponse, HttpAppError, UploadFailure};
pub use setup::routes::setup_routes;
pub use state::AppState;
