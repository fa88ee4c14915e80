//! Telemetry initialization
//!
//! Structured logging through `tracing`. OpenTelemetry export is not wired;
//! spans and events go to stdout in plain or JSON format.

mod init_basic;

pub use init_basic::{init_telemetry, LogFormat};
