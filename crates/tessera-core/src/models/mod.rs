//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod cookie;
mod file;
mod interface;
mod pagination;
mod user;

// Re-export all models for convenient imports
pub use cookie::*;
pub use file::*;
pub use interface::*;
pub use pagination::*;
pub use user::*;
