//! Configuration management module
//!
//! Settings come from a YAML file, then `DIRSYNC_*` environment variables,
//! then command-line flags, each layer overriding the previous one.

use anyhow::{Context, Result};
use dirsync_kv_store::StoreConfig;
use serde::{Deserialize, Serialize};

pub const ENV_STORE_URL: &str = "DIRSYNC_STORE_URL";
pub const ENV_SCAN_COUNT: &str = "DIRSYNC_SCAN_COUNT";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config file")
    }

    /// Applies environment overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_STORE_URL).filter(|url| !url.trim().is_empty()) {
            self.store.url = url.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_SCAN_COUNT) {
            let count: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SCAN_COUNT} must be a positive integer, got '{raw}'"))?;
            self.store = self.store.clone().with_scan_count(count);
        }
        Ok(())
    }
}
