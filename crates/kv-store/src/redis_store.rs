use std::sync::Arc;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::debug;

use crate::api::{KvStore, ScanPage};
use crate::config::StoreConfig;
use crate::errors::{StoreErrKind, StoreError, StoreResult};
use crate::scan::scan_pattern;

/// Redis/Valkey-backed store sharing a single multiplexed connection.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    url: Arc<String>,
    scan_count: usize,
}

impl RedisStore {
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let client = redis::Client::open(config.url.as_str()).map_err(|err| {
            StoreErrKind::InvalidConfig(format!("redis url '{}': {err}", config.url))
        })?;
        let manager = ConnectionManager::new(client).await.map_err(|err| {
            StoreErrKind::Unavailable(format!("redis connect {}: {err}", config.url))
        })?;
        debug!(url = %config.url, "redis connection established");
        Ok(Self {
            manager,
            url: Arc::new(config.url.clone()),
            scan_count: config.scan_count.max(1),
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.manager.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|err| StoreErrKind::Unavailable(format!("redis ping {}: {err}", self.url)))?;
        Ok(())
    }

    async fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut conn = self.manager.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|err| StoreError::command("redis set", err))
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        let value: Option<Vec<u8>> = conn
            .get(key)
            .await
            .map_err(|err| StoreError::command("redis get", err))?;
        Ok(value)
    }

    async fn scan_page(&self, namespace: &str, cursor: u64) -> StoreResult<ScanPage> {
        let mut conn = self.manager.clone();
        let (cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(scan_pattern(namespace))
            .arg("COUNT")
            .arg(self.scan_count)
            .query_async(&mut conn)
            .await
            .map_err(|err| StoreError::command("redis scan", err))?;
        Ok(ScanPage { cursor, keys })
    }
}
