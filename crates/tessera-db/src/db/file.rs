use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tessera_core::{
    models::{NewUploadedFile, PageQuery, UploadedFile},
    AppError,
};

use crate::traits::FileRecordStore;

const FILE_COLUMNS: &str =
    "id, name, original, hash, extension, size, location, path, compressed, type_id, created_at";

/// Repository for uploaded file records
#[derive(Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRecordStore for PgFileRepository {
    #[tracing::instrument(
        skip(self, file),
        fields(db.table = "files", db.operation = "insert", file.name = %file.name)
    )]
    async fn insert(&self, file: NewUploadedFile) -> Result<Option<UploadedFile>, AppError> {
        let query = format!(
            r#"
            INSERT INTO files (name, original, hash, extension, size, location, path, compressed, type_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            FILE_COLUMNS
        );

        let mut inserted = sqlx::query_as::<Postgres, UploadedFile>(&query)
            .bind(&file.name)
            .bind(&file.original)
            .bind(&file.hash)
            .bind(&file.extension)
            .bind(file.size)
            .bind(&file.location)
            .bind(&file.path)
            .bind(file.compressed)
            .bind(file.type_id)
            .fetch_all(&self.pool)
            .await?;

        if inserted.len() != 1 {
            tracing::warn!(rows_affected = inserted.len(), "Unexpected row count for file insert");
            return Ok(None);
        }

        Ok(inserted.pop())
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    async fn list(&self, page: PageQuery) -> Result<Vec<UploadedFile>, AppError> {
        let query = format!(
            "SELECT {} FROM files ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
            FILE_COLUMNS
        );

        let files = sqlx::query_as::<Postgres, UploadedFile>(&query)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(files)
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "count"))]
    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<Postgres, i64>("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
