//! Test helpers: build AppState and router over in-memory repositories.
//!
//! Run from workspace root: `cargo test -p tessera-api`. No database is needed;
//! uploaded files land in a temporary public root.

#![allow(dead_code)]

pub mod auth;
pub mod stores;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;
use tessera_api::{setup_routes, AppState};
use tessera_core::Config;
use tessera_storage::LocalStorage;

use stores::{InMemoryFileStore, InMemoryFileTypes};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";
pub const TEST_PAGE_MAX_SIZE: i64 = 5;

/// Test application: server, stores, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub files: Arc<InMemoryFileStore>,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Directory uploads are written to
    pub fn uploads_path(&self) -> PathBuf {
        self.state.config.public_root.join("uploads")
    }

    pub fn stored_file(&self, name: &str) -> PathBuf {
        self.uploads_path().join(name)
    }

    /// Names of all files in the uploads directory
    pub fn stored_names(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads_path())
            .expect("uploads dir")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

pub fn test_config(public_root: &Path) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        database_url: "postgres://unused".to_string(),
        db_max_connections: 1,
        db_timeout_seconds: 1,
        run_migrations: false,
        public_root: public_root.to_path_buf(),
        uploads_dir: "/uploads/".to_string(),
        page_max_size: TEST_PAGE_MAX_SIZE,
        max_upload_size_bytes: 1024 * 1024,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        site_name: "Tessera Test".to_string(),
        http_concurrency_limit: 64,
    }
}

/// Setup test app with the default whitelist (png, jpg) and a working file store.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(InMemoryFileStore::new(), |_| {}).await
}

/// Setup test app with a specific file store and config tweaks.
pub async fn setup_test_app_with(
    files: InMemoryFileStore,
    configure: impl FnOnce(&mut Config),
) -> TestApp {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut config = test_config(temp_dir.path());
    configure(&mut config);

    let storage = LocalStorage::new(&config.public_root, &config.uploads_dir)
        .await
        .expect("Failed to create local storage");
    let files = Arc::new(files);

    let state = Arc::new(AppState::new(
        config,
        Arc::new(InMemoryFileTypes::with_extensions(&["png", "jpg"])),
        files.clone(),
        Arc::new(storage),
    ));

    let server = TestServer::new(setup_routes(state.clone()).into_make_service())
        .expect("Failed to create test server");

    TestApp {
        server,
        files,
        state,
        _temp_dir: temp_dir,
    }
}
