//! Application state shared by all handlers.
//!
//! Collaborators are held behind their traits so the router can be built over
//! Postgres and the local filesystem in production and over in-memory stores in
//! tests.

use std::sync::Arc;

use tessera_core::models::SiteInterface;
use tessera_core::Config;
use tessera_db::{FileRecordStore, FileTypeLookup};
use tessera_storage::Storage;

use crate::auth::JwtKeys;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub site: SiteInterface,
    pub file_types: Arc<dyn FileTypeLookup>,
    pub files: Arc<dyn FileRecordStore>,
    pub storage: Arc<dyn Storage>,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub fn new(
        config: Config,
        file_types: Arc<dyn FileTypeLookup>,
        files: Arc<dyn FileRecordStore>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let site = SiteInterface::new(config.site_name.clone());
        let jwt = Arc::new(JwtKeys::new(&config.jwt_secret));

        Self {
            config,
            site,
            file_types,
            files,
            storage,
            jwt,
        }
    }
}
