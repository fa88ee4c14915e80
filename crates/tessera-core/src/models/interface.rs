use serde::{Deserialize, Serialize};

/// Site-wide presentation settings consumed by the public page layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteInterface {
    pub site_name: String,
}

impl SiteInterface {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }
}
