//! Tessera Storage Library
//!
//! This crate provides content hashing and content-addressed file storage.
//!
//! # Naming
//!
//! A stored file is always named `<sha256-hex-of-content><extension>`. Identical
//! bytes uploaded with the same extension therefore land on the same path, and
//! client-supplied filenames never reach the filesystem.
//!
//! Writes are staged under a hidden temporary name and renamed onto the final
//! name only when committed, so a stored name never holds partial content.

pub mod hash;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use hash::{content_addressed_name, hash_reader};
pub use keys::{file_extension, is_valid_extension};
pub use local::LocalStorage;
pub use traits::{StagedObject, Storage, StorageError, StorageResult, StoredObject};
