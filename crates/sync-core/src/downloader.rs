use std::path::Path;

use dirsync_kv_store::{KeyScan, StoreHandle};
use tokio::fs;
use tracing::{info, warn};

use crate::errors::{SyncError, SyncResult};
use crate::keymap::Namespace;
use crate::report::{SyncDirection, SyncReport};

/// Recreates a stored namespace as a directory tree.
#[derive(Clone)]
pub struct Downloader {
    store: StoreHandle,
}

impl Downloader {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Writes every record below `prefix` into `target`, overwriting files
    /// already there. A prefix with no records still creates `target` and
    /// succeeds with an empty report.
    pub async fn download(&self, prefix: &str, target: &Path) -> SyncResult<SyncReport> {
        let namespace = Namespace::from_prefix(prefix)?;
        fs::create_dir_all(target)
            .await
            .map_err(|source| SyncError::io("create target directory", target, source))?;
        info!(
            namespace = %namespace,
            target = %target.display(),
            "downloading namespace"
        );

        let mut report = SyncReport::start(SyncDirection::Download, namespace.as_str(), target);
        let mut scan = KeyScan::new(self.store.as_ref(), namespace.as_str());
        while let Some(key) = scan.next().await.map_err(|source| SyncError::Scan {
            namespace: namespace.to_string(),
            source,
        })? {
            let relative = namespace.relative_path_of(&key)?;
            let content = self
                .store
                .get(&key)
                .await
                .map_err(|source| SyncError::Get {
                    key: key.clone(),
                    source,
                })?
                .ok_or_else(|| SyncError::MissingRecord(key.clone()))?;

            let destination = target.join(&relative);
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| SyncError::io("create directory", parent, source))?;
            }
            fs::write(&destination, &content)
                .await
                .map_err(|source| SyncError::io("write file", &destination, source))?;
            info!(key = %key, path = %destination.display(), bytes = content.len(), "downloaded");
            report.record(content.len());
        }

        if report.is_empty() {
            warn!(namespace = %namespace, "no records matched prefix");
        }
        Ok(report.finish())
    }
}
