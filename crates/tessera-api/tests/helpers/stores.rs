//! In-memory implementations of the repository traits

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tessera_core::models::{FileType, NewUploadedFile, PageQuery, UploadedFile};
use tessera_core::AppError;
use tessera_db::{FileRecordStore, FileTypeLookup};
use tokio::sync::Barrier;

pub struct InMemoryFileTypes {
    types: Vec<FileType>,
}

impl InMemoryFileTypes {
    pub fn with_extensions(extensions: &[&str]) -> Self {
        let types = extensions
            .iter()
            .enumerate()
            .map(|(i, ext)| FileType {
                id: i as i64 + 1,
                ext: ext.to_string(),
                mime: format!("image/{}", ext),
                name: ext.to_uppercase(),
            })
            .collect();
        Self { types }
    }
}

#[async_trait]
impl FileTypeLookup for InMemoryFileTypes {
    async fn find_by_extension(&self, ext: &str) -> Result<Option<FileType>, AppError> {
        Ok(self.types.iter().rev().find(|t| t.ext == ext).cloned())
    }
}

/// File records kept in insertion order
pub struct InMemoryFileStore {
    records: Mutex<Vec<UploadedFile>>,
    next_id: AtomicI64,
    reject_inserts: AtomicBool,
    reject_next_insert: AtomicBool,
    insert_gate: Option<Arc<Barrier>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            reject_inserts: AtomicBool::new(false),
            reject_next_insert: AtomicBool::new(false),
            insert_gate: None,
        }
    }

    /// Hold every insert until `parties` inserts are in flight at once
    pub fn with_insert_gate(parties: usize) -> Self {
        Self {
            insert_gate: Some(Arc::new(Barrier::new(parties))),
            ..Self::new()
        }
    }

    /// Make only the next insert report zero affected rows
    pub fn reject_next_insert(&self) {
        self.reject_next_insert.store(true, Ordering::SeqCst);
    }

    /// Make inserts report zero affected rows
    pub fn reject_inserts(&self, reject: bool) {
        self.reject_inserts.store(reject, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<UploadedFile> {
        self.records.lock().unwrap().clone()
    }

    pub fn seed(&self, count: usize) {
        for i in 0..count {
            let record = NewUploadedFile::stored(
                format!("seed-{}.png", i),
                format!("{:064x}", i),
                ".png",
                10,
                "/uploads/",
                1,
            );
            self.push(record);
        }
    }

    fn push(&self, file: NewUploadedFile) -> UploadedFile {
        let record = UploadedFile {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: file.name,
            original: file.original,
            hash: file.hash,
            extension: file.extension,
            size: file.size,
            location: file.location,
            path: file.path,
            compressed: file.compressed,
            type_id: file.type_id,
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        record
    }
}

#[async_trait]
impl FileRecordStore for InMemoryFileStore {
    async fn insert(&self, file: NewUploadedFile) -> Result<Option<UploadedFile>, AppError> {
        if let Some(gate) = &self.insert_gate {
            let _ = tokio::time::timeout(Duration::from_secs(5), gate.wait()).await;
        }
        if self.reject_inserts.load(Ordering::SeqCst)
            || self.reject_next_insert.swap(false, Ordering::SeqCst)
        {
            return Ok(None);
        }
        Ok(Some(self.push(file)))
    }

    async fn list(&self, page: PageQuery) -> Result<Vec<UploadedFile>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .rev()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.lock().unwrap().len() as i64)
    }
}
