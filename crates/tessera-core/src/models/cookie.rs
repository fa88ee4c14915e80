use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Simplified cookie value: key, value and optional expiry.
///
/// Cookies read from a request carry no expiry; browsers do not send it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub key: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            expires: None,
        }
    }

    pub fn with_expiry(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Placeholder returned when a requested cookie is absent.
    pub fn empty() -> Self {
        Self::new("", "")
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}
