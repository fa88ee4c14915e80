use crate::keys::is_safe_name;
use crate::traits::{StagedObject, Storage, StorageError, StorageResult, StoredObject};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncRead;

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// Hidden sibling of `name`, unique per process and write
fn staging_name_for(name: &str) -> String {
    format!(
        ".{}.{}-{}.part",
        name,
        std::process::id(),
        STAGING_SEQ.fetch_add(1, Ordering::Relaxed)
    )
}

/// Local filesystem storage below a public web root
#[derive(Clone, Debug)]
pub struct LocalStorage {
    /// Directory files are written to: `<public_root>/<uploads_dir>`
    base_path: PathBuf,
    /// Web path of `base_path`, always with leading and trailing `/`
    location: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `public_root` - Directory served as the web root (e.g. "./public")
    /// * `uploads_dir` - Web path of the uploads directory below it (e.g. "/uploads/")
    pub async fn new(public_root: impl AsRef<Path>, uploads_dir: &str) -> StorageResult<Self> {
        if uploads_dir.contains("..") {
            return Err(StorageError::ConfigError(format!(
                "Uploads directory {} escapes the public root",
                uploads_dir
            )));
        }

        let relative = uploads_dir.trim_matches('/');
        let base_path = public_root.as_ref().join(relative);
        let location = if relative.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", relative)
        };

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            location,
        })
    }

    /// Directory files are written to
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn remove_staging(&self, staging_path: &Path) {
        if let Err(e) = fs::remove_file(staging_path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(error = %e, path = %staging_path.display(), "Failed to remove staged file");
            }
        }
    }

    fn name_to_path(&self, name: &str) -> StorageResult<PathBuf> {
        if !is_safe_name(name) {
            return Err(StorageError::InvalidKey(format!(
                "Stored name {:?} contains invalid characters",
                name
            )));
        }
        Ok(self.base_path.join(name))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn stage(
        &self,
        name: &str,
        reader: &mut (dyn AsyncRead + Unpin + Send),
    ) -> StorageResult<StagedObject> {
        // Validates the final name before anything touches the disk.
        self.name_to_path(name)?;
        let public_path = self.public_path(name);
        let staging_name = staging_name_for(name);
        let staging_path = self.name_to_path(&staging_name)?;
        let start = std::time::Instant::now();

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&staging_path)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, path = %staging_path.display(), "Failed to create file");
                StorageError::CreateFailed(public_path.clone())
            })?;

        let written = match tokio::io::copy(reader, &mut file).await {
            Ok(size) => file.sync_all().await.map(|()| size),
            Err(e) => Err(e),
        };
        drop(file);

        let size = match written {
            Ok(size) => size,
            Err(e) => {
                tracing::error!(error = %e, path = %staging_path.display(), "Failed to write staged file");
                self.remove_staging(&staging_path).await;
                return Err(StorageError::WriteFailed(public_path));
            }
        };

        tracing::debug!(
            path = %staging_path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write staged"
        );

        Ok(StagedObject {
            name: name.to_string(),
            staging_name,
            size,
        })
    }

    async fn commit(&self, staged: StagedObject) -> StorageResult<StoredObject> {
        let path = self.name_to_path(&staged.name)?;
        let staging_path = self.name_to_path(&staged.staging_name)?;
        let public_path = self.public_path(&staged.name);
        let replaced = fs::try_exists(&path).await.unwrap_or(false);

        if let Err(e) = fs::rename(&staging_path, &path).await {
            tracing::error!(error = %e, path = %path.display(), "Failed to move staged file into place");
            self.remove_staging(&staging_path).await;
            return Err(StorageError::WriteFailed(public_path));
        }

        tracing::info!(
            path = %path.display(),
            size_bytes = staged.size,
            replaced,
            "Local storage write successful"
        );

        Ok(StoredObject {
            name: staged.name,
            path,
            public_path,
            size: staged.size,
            replaced,
        })
    }

    async fn abandon(&self, staged: StagedObject) -> StorageResult<()> {
        let staging_path = self.name_to_path(&staged.staging_name)?;

        match fs::remove_file(&staging_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                staging_path.display(),
                e
            ))),
        }
    }

    fn location(&self) -> &str {
        &self.location
    }
}
