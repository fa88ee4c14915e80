use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tessera_core::{models::FileType, AppError};

use crate::traits::FileTypeLookup;

/// Repository for the `file_types` whitelist
#[derive(Clone)]
pub struct PgFileTypeRepository {
    pool: PgPool,
}

impl PgFileTypeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileTypeLookup for PgFileTypeRepository {
    #[tracing::instrument(skip(self), fields(db.table = "file_types", db.operation = "select"))]
    async fn find_by_extension(&self, ext: &str) -> Result<Option<FileType>, AppError> {
        let file_type = sqlx::query_as::<Postgres, FileType>(
            "SELECT id, ext, mime, name FROM file_types WHERE ext = $1 ORDER BY id DESC LIMIT 1",
        )
        .bind(ext)
        .fetch_optional(&self.pool)
        .await?;

        Ok(file_type)
    }
}
