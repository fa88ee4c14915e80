//! Database repositories for data access layer
//!
//! Each repository is responsible for a single table and implements the
//! matching trait from [`crate::traits`] on top of a Postgres pool.

pub mod file;
pub mod file_type;

pub use file::PgFileRepository;
pub use file_type::PgFileTypeRepository;
