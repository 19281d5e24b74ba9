use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dirsync_kv_store::{KvStore, RedisStore, StoreHandle};
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::Config;

pub struct CliContext {
    config: Arc<Config>,
    config_path: PathBuf,
    store: OnceCell<StoreHandle>,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
            store: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Connects to the store and pings it on first use.
    pub async fn store(&self) -> Result<StoreHandle> {
        self.store
            .get_or_try_init(|| async {
                let url = &self.config.store.url;
                let store = RedisStore::connect(&self.config.store)
                    .await
                    .with_context(|| format!("Failed to connect to store at {url}"))?;
                store
                    .ping()
                    .await
                    .with_context(|| format!("Failed to connect to store at {url}"))?;
                info!("Successfully connected to {url}");
                Ok::<StoreHandle, anyhow::Error>(Arc::new(store))
            })
            .await
            .map(Arc::clone)
    }
}
