//! Repository trait abstractions
//!
//! These traits define the minimal interface the upload flow and the admin
//! pages need from the relational store, allowing for easy mocking and testing
//! without database dependencies.

use async_trait::async_trait;
use tessera_core::models::{FileType, NewUploadedFile, PageQuery, UploadedFile};
use tessera_core::AppError;

/// Read-only access to the file type whitelist
#[async_trait]
pub trait FileTypeLookup: Send + Sync {
    /// Find the whitelist entry for an extension given without its leading dot.
    /// When several entries share an extension the most recent one wins.
    async fn find_by_extension(&self, ext: &str) -> Result<Option<FileType>, AppError>;
}

/// Access to uploaded file records
#[async_trait]
pub trait FileRecordStore: Send + Sync {
    /// Insert a record. Returns `None` when the insert did not affect exactly one row.
    async fn insert(&self, file: NewUploadedFile) -> Result<Option<UploadedFile>, AppError>;

    /// List records, newest first
    async fn list(&self, page: PageQuery) -> Result<Vec<UploadedFile>, AppError>;

    /// Total number of records
    async fn count(&self) -> Result<i64, AppError>;
}
