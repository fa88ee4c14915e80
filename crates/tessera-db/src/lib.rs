//! Tessera DB Library
//!
//! Repositories for the relational store: the file type whitelist and the
//! uploaded files table. Handlers depend on the traits in [`traits`] so they
//! can run against in-memory stores in tests.

pub mod db;
pub mod traits;

pub use db::{PgFileRepository, PgFileTypeRepository};
pub use traits::{FileRecordStore, FileTypeLookup};
