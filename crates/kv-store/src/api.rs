use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StoreResult;

/// One page of a cursor-based key scan.
///
/// A `cursor` of `0` marks the final page, mirroring Redis `SCAN`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanPage {
    pub cursor: u64,
    pub keys: Vec<String>,
}

impl ScanPage {
    pub fn is_last(&self) -> bool {
        self.cursor == 0
    }
}

/// Flat byte-valued key-value store.
///
/// Records never expire. `scan_page` enumerates keys of the form
/// `<namespace>/...`; a page may repeat keys already returned earlier in the
/// same scan, and callers should go through [`crate::KeyScan`] rather than
/// driving cursors by hand.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
    async fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    async fn scan_page(&self, namespace: &str, cursor: u64) -> StoreResult<ScanPage>;
}

pub type StoreHandle = Arc<dyn KvStore + 'static>;
