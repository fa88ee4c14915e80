//! Content-addressed upload service
//!
//! The pipeline is linear and each step aborts the upload on failure:
//! hash → rewind → stage → validate type → record → commit.
//!
//! Files are stored as `<sha256-hex><extension>`, so identical bytes uploaded
//! with the same extension share one file. Bytes are staged under a temporary
//! name and only moved onto the stored name once the record exists. A failed
//! upload therefore only ever deletes its own staged copy.

use std::sync::Arc;

use tessera_core::models::{FileType, NewUploadedFile, UploadedFile};
use tessera_core::UploadError;
use tessera_storage::{
    content_addressed_name, file_extension, hash_reader, is_valid_extension, StagedObject,
    StorageError,
};
use tokio::io::AsyncSeekExt;

use crate::state::AppState;
use crate::utils::upload::ReceivedFile;

const HASH_FAILED: &str = "Error calculating hash";
const COPY_FAILED: &str = "Error copying file to destination";
const NOT_RECORDED: &str = "File uploaded but was not saved in database";

pub struct UploadService {
    state: Arc<AppState>,
}

impl UploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Store a received file and record it.
    #[tracing::instrument(skip(self, received), fields(filename = %received.original_filename, size = received.size))]
    pub async fn upload(&self, received: ReceivedFile) -> Result<UploadedFile, UploadError> {
        let ReceivedFile {
            original_filename,
            mut spool,
            ..
        } = received;

        // Step 1: Hash the full content
        let digest = hash_reader(&mut spool).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to hash upload");
            UploadError::HashOrCopyFailure(HASH_FAILED.to_string())
        })?;

        // Step 2: Rewind for the copy
        spool.rewind().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to rewind upload");
            UploadError::HashOrCopyFailure(COPY_FAILED.to_string())
        })?;

        // Step 3: Stage under the content-addressed name
        let extension = file_extension(&original_filename).to_string();
        if !is_valid_extension(&extension) {
            return Err(UploadError::InvalidExtension(format!(
                "File type {} has a problem",
                extension
            )));
        }

        let name = content_addressed_name(&digest, &extension);
        let staged = self
            .state
            .storage
            .stage(&name, &mut spool)
            .await
            .map_err(|e| match e {
                StorageError::CreateFailed(path) => {
                    UploadError::HashOrCopyFailure(format!("Error creating file on server: {}", path))
                }
                other => {
                    tracing::error!(error = %other, "Failed to copy upload");
                    UploadError::HashOrCopyFailure(COPY_FAILED.to_string())
                }
            })?;

        // Step 4: Validate the type against the whitelist
        let file_type = match self.resolve_type(&extension).await {
            Some(file_type) => file_type,
            None => {
                self.discard(staged).await;
                return Err(UploadError::UnsupportedType(format!(
                    "Server can't accept {} type files",
                    extension
                )));
            }
        };

        // Step 5: Record the metadata
        let record = NewUploadedFile::stored(
            original_filename,
            digest,
            extension,
            staged.size,
            self.state.storage.location(),
            file_type.id,
        );

        let file = match self.state.files.insert(record).await {
            Ok(Some(file)) => file,
            Ok(None) => {
                tracing::error!(name = %staged.name, "File record insert affected no rows");
                self.discard(staged).await;
                return Err(UploadError::PersistenceFailure(NOT_RECORDED.to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, name = %staged.name, "Failed to insert file record");
                self.discard(staged).await;
                return Err(UploadError::PersistenceFailure(NOT_RECORDED.to_string()));
            }
        };

        // Step 6: Move the bytes onto the recorded name
        let stored = self.state.storage.commit(staged).await.map_err(|e| {
            tracing::error!(error = %e, file_id = file.id, "Recorded file could not be moved into place");
            UploadError::HashOrCopyFailure(COPY_FAILED.to_string())
        })?;

        tracing::info!(
            file_id = file.id,
            name = %file.name,
            replaced = stored.replaced,
            "File uploaded"
        );
        Ok(file)
    }

    /// Look up an extension (with its leading dot) in the whitelist, ignoring case
    async fn resolve_type(&self, extension: &str) -> Option<FileType> {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        match self.state.file_types.find_by_extension(&ext).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(error = %e, ext = %ext, "File type lookup failed");
                None
            }
        }
    }

    async fn discard(&self, staged: StagedObject) {
        let name = staged.name.clone();
        if let Err(e) = self.state.storage.abandon(staged).await {
            tracing::warn!(error = %e, name = %name, "Failed to remove staged upload");
        }
    }
}
