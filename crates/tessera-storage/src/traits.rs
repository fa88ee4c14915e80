//! Storage abstraction trait
//!
//! This module defines the Storage trait that storage backends implement.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create file {0}")]
    CreateFailed(String),

    #[error("Failed to write file {0}")]
    WriteFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Bytes written by [`Storage::stage`] under a temporary name.
///
/// Nothing is visible under `name` until the object is committed.
#[derive(Debug, Clone)]
pub struct StagedObject {
    /// Final stored name (`<digest><extension>`)
    pub name: String,
    /// Temporary name the bytes currently live under
    pub staging_name: String,
    /// Bytes written
    pub size: u64,
}

/// A file moved into place by [`Storage::commit`]
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Stored name (`<digest><extension>`)
    pub name: String,
    /// Filesystem path of the file
    pub path: PathBuf,
    /// Web path of the file below the public root
    pub public_path: String,
    /// Bytes written
    pub size: u64,
    /// Whether a file with this name already existed and was replaced
    pub replaced: bool,
}

/// Storage abstraction trait
///
/// Names passed to a backend are bare file names; they must not contain path
/// separators or `..`.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Copy everything from `reader` to a temporary location for `name`.
    /// A failed copy leaves no file behind and never touches `name` itself.
    async fn stage(
        &self,
        name: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> StorageResult<StagedObject>;

    /// Atomically move staged bytes onto their final name, replacing any
    /// existing file of that name.
    async fn commit(&self, staged: StagedObject) -> StorageResult<StoredObject>;

    /// Delete staged bytes that will not be committed. Abandoning twice is not an error.
    async fn abandon(&self, staged: StagedObject) -> StorageResult<()>;

    /// Web path of the directory files are stored in (e.g. `/uploads/`)
    fn location(&self) -> &str;

    /// Web path of the file called `name`
    fn public_path(&self, name: &str) -> String {
        format!("{}{}", self.location(), name)
    }
}
