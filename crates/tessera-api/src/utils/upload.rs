//! Receiving the uploaded file from a multipart form

use axum::extract::Multipart;
use tessera_core::constants::UPLOAD_FIELD_NAME;
use tessera_core::UploadError;
use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

const FIELD_MISSING: &str = "Error retrieving file from form data";
const STREAM_OPEN_FAILED: &str = "Error opening received file";

/// The `file` field, spooled to an anonymous temporary file.
///
/// The spool is positioned at its start. It is deleted by the OS once the
/// handle is dropped, on every exit path.
#[derive(Debug)]
pub struct ReceivedFile {
    pub original_filename: String,
    pub spool: File,
    pub size: u64,
}

async fn open_spool() -> Result<File, UploadError> {
    let std_file = tokio::task::spawn_blocking(tempfile::tempfile)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Spool creation task failed");
            UploadError::StreamOpenFailure(STREAM_OPEN_FAILED.to_string())
        })?
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to create spool file");
            UploadError::StreamOpenFailure(STREAM_OPEN_FAILED.to_string())
        })?;

    Ok(File::from_std(std_file))
}

/// Find the first `file` field that carries a file and spool its bytes.
///
/// Fields without a filename, or with an empty one, do not count as files.
/// An empty upload is rejected like a missing one.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<ReceivedFile, UploadError> {
    loop {
        let field = multipart.next_field().await.map_err(|e| {
            tracing::debug!(error = %e, "Failed to read multipart form");
            UploadError::FormFieldMissing(FIELD_MISSING.to_string())
        })?;

        let Some(mut field) = field else {
            return Err(UploadError::FormFieldMissing(FIELD_MISSING.to_string()));
        };

        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let original_filename = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let mut spool = open_spool().await?;
        let mut size: u64 = 0;

        while let Some(chunk) = field.chunk().await.map_err(|e| {
            tracing::warn!(error = %e, filename = %original_filename, "Failed to receive upload");
            UploadError::StreamOpenFailure(STREAM_OPEN_FAILED.to_string())
        })? {
            spool.write_all(&chunk).await.map_err(|e| {
                tracing::warn!(error = %e, "Failed to spool upload");
                UploadError::StreamOpenFailure(STREAM_OPEN_FAILED.to_string())
            })?;
            size += chunk.len() as u64;
        }

        if size == 0 {
            return Err(UploadError::FormFieldMissing(FIELD_MISSING.to_string()));
        }

        spool.flush().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to flush spooled upload");
            UploadError::StreamOpenFailure(STREAM_OPEN_FAILED.to_string())
        })?;
        spool.rewind().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to rewind spooled upload");
            UploadError::StreamOpenFailure(STREAM_OPEN_FAILED.to_string())
        })?;

        tracing::debug!(filename = %original_filename, size, "Upload received");

        return Ok(ReceivedFile {
            original_filename,
            spool,
            size,
        });
    }
}
