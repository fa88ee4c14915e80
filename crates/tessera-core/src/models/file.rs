use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded file record. Created once per successful upload and never mutated
/// by the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct UploadedFile {
    pub id: i64,
    /// Stored name: `<sha256-hex><extension>`
    pub name: String,
    /// Filename as sent by the client
    pub original: String,
    pub hash: String,
    /// Extension including the leading dot
    pub extension: String,
    pub size: i64,
    /// Uploads directory the file was stored in (web path)
    pub location: String,
    /// Web path of the stored file: `<location><name>`
    pub path: String,
    pub compressed: bool,
    pub type_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Insert DTO for `files`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUploadedFile {
    pub name: String,
    pub original: String,
    pub hash: String,
    pub extension: String,
    pub size: i64,
    pub location: String,
    pub path: String,
    pub compressed: bool,
    pub type_id: i64,
}

impl NewUploadedFile {
    /// Build the record for a freshly stored file.
    pub fn stored(
        original: impl Into<String>,
        hash: impl Into<String>,
        extension: impl Into<String>,
        size: u64,
        location: impl Into<String>,
        type_id: i64,
    ) -> Self {
        let hash = hash.into();
        let extension = extension.into();
        let location = location.into();
        let name = format!("{}{}", hash, extension);
        let path = format!("{}{}", location, name);

        Self {
            name,
            original: original.into(),
            hash,
            extension,
            size: i64::try_from(size).unwrap_or(i64::MAX),
            location,
            path,
            compressed: false,
            type_id,
        }
    }
}

/// Whitelisted file type. Uploads are only accepted for extensions that have
/// an entry here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FileType {
    pub id: i64,
    /// Extension without the leading dot (e.g. `png`)
    pub ext: String,
    pub mime: String,
    pub name: String,
}

/// Body returned by the upload endpoint, for success and failure alike.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub id: i64,
    pub message: String,
    pub success: bool,
}

impl UploadResponse {
    pub fn uploaded(id: i64) -> Self {
        Self {
            id,
            message: "Successfully uploaded".to_string(),
            success: true,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            id: crate::constants::NO_RECORD_ID,
            message: message.into(),
            success: false,
        }
    }
}
