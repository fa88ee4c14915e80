//! HTTP error response conversion
//!
//! **Preferred handler pattern:** return `Result<Response, HttpAppError>` and use
//! `AppError` for failures; `?` converts them so every error renders with the
//! same status, body and logging. The upload endpoint is the exception: its
//! failures are `UploadError`s rendered through [`UploadFailure`] in the
//! `{id, message, success}` shape its clients expect.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tessera_core::models::UploadResponse;
use tessera_core::{AppError, ErrorMetadata, LogLevel, UploadError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from tessera-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_at(level: LogLevel, error: &dyn std::fmt::Display, error_type: &str) {
    match level {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_at(app_error.log_level(), app_error, app_error.error_type());

        // Details are only exposed outside production and never for sensitive errors.
        let body = if is_production_env() || app_error.is_sensitive() {
            ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
            }
        } else {
            ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Upload failure rendered as `{"id": -1, "message": ..., "success": false}`.
#[derive(Debug)]
pub struct UploadFailure(pub UploadError);

impl From<UploadError> for UploadFailure {
    fn from(err: UploadError) -> Self {
        UploadFailure(err)
    }
}

impl IntoResponse for UploadFailure {
    fn into_response(self) -> Response {
        let upload_error = &self.0;
        let status =
            StatusCode::from_u16(upload_error.http_status_code()).unwrap_or(StatusCode::BAD_REQUEST);

        log_at(
            upload_error.log_level(),
            upload_error,
            upload_error.error_type(),
        );

        (
            status,
            Json(UploadResponse::failed(upload_error.client_message())),
        )
            .into_response()
    }
}
