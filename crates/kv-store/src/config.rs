use serde::{Deserialize, Serialize};

pub const DEFAULT_STORE_URL: &str = "redis://127.0.0.1:6379/0";
pub const DEFAULT_SCAN_COUNT: usize = 100;

/// Connection settings for the backing key-value store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis/Valkey connection URL, database index in the path.
    pub url: String,
    /// `COUNT` hint sent with every `SCAN` page.
    pub scan_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STORE_URL.to_string(),
            scan_count: DEFAULT_SCAN_COUNT,
        }
    }
}

impl StoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_scan_count(mut self, scan_count: usize) -> Self {
        self.scan_count = scan_count.max(1);
        self
    }
}
