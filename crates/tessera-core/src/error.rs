//! Error types module
//!
//! This module provides the core error types used throughout Tessera.
//! General failures are unified under the `AppError` enum; the upload flow has
//! its own `UploadError` taxonomy because its failures are reported to clients
//! in a dedicated `{id, message, success}` shape.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden from clients
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::Database(_) => (500, "DATABASE_ERROR", true, LogLevel::Error),
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::BadRequest(_) => (400, "BAD_REQUEST", false, LogLevel::Debug),
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", false, LogLevel::Debug),
        AppError::Forbidden(_) => (403, "FORBIDDEN", false, LogLevel::Debug),
        AppError::Render(_) => (500, "RENDER_ERROR", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
        AppError::InternalWithSource { .. } => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Forbidden(_) => "Forbidden",
            AppError::Render(_) => "Render",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Forbidden(ref msg) => msg.clone(),
            AppError::Render(_) => "Failed to render page".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

/// Failures of the upload flow, one per step that can abort it.
///
/// Every variant carries the message returned to the client. All of them are
/// terminal for the request; none are retried.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The multipart form has no usable `file` field.
    #[error("{0}")]
    FormFieldMissing(String),

    /// The uploaded bytes could not be received or buffered.
    #[error("{0}")]
    StreamOpenFailure(String),

    /// Hashing, creating the destination file, or copying into it failed.
    #[error("{0}")]
    HashOrCopyFailure(String),

    /// The original filename has no usable extension.
    #[error("{0}")]
    InvalidExtension(String),

    /// The extension is not in the file type whitelist.
    #[error("{0}")]
    UnsupportedType(String),

    /// The metadata row was not recorded.
    #[error("{0}")]
    PersistenceFailure(String),
}

impl UploadError {
    pub fn error_type(&self) -> &'static str {
        match self {
            UploadError::FormFieldMissing(_) => "FormFieldMissing",
            UploadError::StreamOpenFailure(_) => "StreamOpenFailure",
            UploadError::HashOrCopyFailure(_) => "HashOrCopyFailure",
            UploadError::InvalidExtension(_) => "InvalidExtension",
            UploadError::UnsupportedType(_) => "UnsupportedType",
            UploadError::PersistenceFailure(_) => "PersistenceFailure",
        }
    }
}

impl ErrorMetadata for UploadError {
    fn http_status_code(&self) -> u16 {
        match self {
            UploadError::PersistenceFailure(_) => 406,
            _ => 400,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            UploadError::FormFieldMissing(_) => "FORM_FIELD_MISSING",
            UploadError::StreamOpenFailure(_) => "STREAM_OPEN_FAILURE",
            UploadError::HashOrCopyFailure(_) => "HASH_OR_COPY_FAILURE",
            UploadError::InvalidExtension(_) => "INVALID_EXTENSION",
            UploadError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
            UploadError::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn is_sensitive(&self) -> bool {
        false
    }

    fn log_level(&self) -> LogLevel {
        match self {
            UploadError::FormFieldMissing(_)
            | UploadError::InvalidExtension(_)
            | UploadError::UnsupportedType(_) => LogLevel::Debug,
            UploadError::StreamOpenFailure(_) => LogLevel::Warn,
            UploadError::HashOrCopyFailure(_) | UploadError::PersistenceFailure(_) => {
                LogLevel::Error
            }
        }
    }
}
