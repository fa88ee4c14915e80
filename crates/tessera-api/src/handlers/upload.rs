use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Response,
};
use tessera_core::models::UploadResponse;
use tessera_core::UploadError;

use crate::context::RequestContext;
use crate::error::UploadFailure;
use crate::services::UploadService;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;

/// Upload a file
///
/// Accepts a multipart form with a `file` field. The file is stored under the
/// SHA-256 of its content and recorded in the database.
///
/// # Returns
/// `{"id": <record id>, "message": "Successfully uploaded", "success": true}` (HTTP 200)
///
/// # Errors
/// The same shape with `id = -1` and `success = false`: HTTP 400 for form,
/// stream, storage and type failures, HTTP 406 when the record was not saved.
#[tracing::instrument(skip(state, ctx, multipart), fields(user_id = tracing::field::Empty))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, UploadFailure> {
    if let Ok(user) = ctx.current_user() {
        tracing::Span::current().record("user_id", user.id);
    }

    let multipart = multipart.map_err(|e| {
        tracing::debug!(error = %e, "Request is not a multipart form");
        UploadError::FormFieldMissing("Error retrieving file from form data".to_string())
    })?;

    let received = extract_multipart_file(multipart).await?;
    let file = UploadService::new(&state).upload(received).await?;

    Ok(ctx.json(StatusCode::OK, UploadResponse::uploaded(file.id)))
}
