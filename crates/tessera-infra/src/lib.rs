//! Tessera Infrastructure Library
//!
//! This crate provides shared infrastructure components used by the Tessera server:
//! - Middleware (request ID)
//! - Telemetry initialization (tracing subscriber)

pub mod middleware;
pub mod telemetry;

// Re-export commonly used types
pub use middleware::{request_id_middleware, RequestId, REQUEST_ID_HEADER};
pub use telemetry::{init_telemetry, LogFormat};
