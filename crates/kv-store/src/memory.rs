use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::api::{KvStore, ScanPage};
use crate::errors::StoreResult;

const DEFAULT_PAGE_SIZE: usize = 10;

/// Process-local store with Redis-like paged scans.
///
/// Cursors are offsets into the sorted key set, so a scan interleaved with
/// writes may skip or repeat keys, much like the real thing.
#[derive(Clone, Debug)]
pub struct MemoryStore {
    inner: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }

    pub fn insert(&self, key: impl Into<String>, value: Vec<u8>) {
        self.inner.lock().insert(key.into(), value);
    }

    pub fn value(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.inner.lock().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.inner.lock().get(key).cloned())
    }

    async fn scan_page(&self, namespace: &str, cursor: u64) -> StoreResult<ScanPage> {
        let prefix = format!("{namespace}/");
        let guard = self.inner.lock();
        let matching: Vec<&String> = guard
            .range(prefix.clone()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(&prefix))
            .collect();

        let offset = usize::try_from(cursor).unwrap_or(usize::MAX);
        let keys: Vec<String> = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|key| (*key).clone())
            .collect();
        let consumed = offset.saturating_add(keys.len());
        let cursor = if consumed >= matching.len() {
            0
        } else {
            consumed as u64
        };
        Ok(ScanPage { cursor, keys })
    }
}
