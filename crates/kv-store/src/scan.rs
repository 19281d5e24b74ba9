use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::api::KvStore;
use crate::errors::StoreResult;

/// Glob pattern matching every key below `namespace`, with the namespace
/// itself matched literally.
pub fn scan_pattern(namespace: &str) -> String {
    let mut pattern = String::with_capacity(namespace.len() + 2);
    for ch in namespace.chars() {
        if matches!(ch, '*' | '?' | '[' | ']' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push_str("/*");
    pattern
}

/// Lazy cursor over every key below a namespace.
///
/// Pages are pulled from the store only once the buffered keys run out, and
/// the scan is finished when the store hands back cursor `0`. Each key is
/// yielded at most once even when the store repeats it across pages. A scan
/// is single-use: start a new one to enumerate again.
pub struct KeyScan<'a, S: KvStore + ?Sized> {
    store: &'a S,
    namespace: String,
    key_prefix: String,
    cursor: u64,
    buffered: VecDeque<String>,
    seen: HashSet<String>,
    finished: bool,
    pages: usize,
}

impl<'a, S: KvStore + ?Sized> KeyScan<'a, S> {
    pub fn new(store: &'a S, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let key_prefix = format!("{namespace}/");
        Self {
            store,
            namespace,
            key_prefix,
            cursor: 0,
            buffered: VecDeque::new(),
            seen: HashSet::new(),
            finished: false,
            pages: 0,
        }
    }

    /// Number of store round-trips made so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub async fn next(&mut self) -> StoreResult<Option<String>> {
        loop {
            if let Some(key) = self.buffered.pop_front() {
                return Ok(Some(key));
            }
            if self.finished {
                return Ok(None);
            }

            let page = match self.store.scan_page(&self.namespace, self.cursor).await {
                Ok(page) => page,
                Err(err) => {
                    self.finished = true;
                    return Err(err);
                }
            };
            self.pages += 1;
            self.cursor = page.cursor;
            self.finished = page.is_last();
            debug!(
                namespace = %self.namespace,
                page = self.pages,
                keys = page.keys.len(),
                cursor = page.cursor,
                "scan page"
            );

            for key in page.keys {
                if !key.starts_with(&self.key_prefix) {
                    continue;
                }
                if self.seen.insert(key.clone()) {
                    self.buffered.push_back(key);
                }
            }
        }
    }

    /// Drains the remaining keys into a vector.
    pub async fn collect(mut self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();
        while let Some(key) = self.next().await? {
            keys.push(key);
        }
        Ok(keys)
    }
}
