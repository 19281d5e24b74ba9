use std::path::Path;

use dirsync_kv_store::StoreHandle;
use tokio::fs;
use tracing::info;

use crate::errors::{SyncError, SyncResult};
use crate::keymap::Namespace;
use crate::report::{SyncDirection, SyncReport};
use crate::walk::FileWalk;

/// Copies every regular file below a directory into the store under
/// `<base name>/<relative path>`.
#[derive(Clone)]
pub struct Uploader {
    store: StoreHandle,
}

impl Uploader {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Uploads `root`, stopping at the first failure. Records written before
    /// the failure stay in the store.
    pub async fn upload_dir(&self, root: &Path) -> SyncResult<SyncReport> {
        let namespace = Namespace::from_root(root)?;
        let walk = FileWalk::new(root)?;
        info!(root = %root.display(), namespace = %namespace, "uploading directory");

        let mut report = SyncReport::start(SyncDirection::Upload, namespace.as_str(), root);
        for entry in walk {
            let path = entry?;
            let content = fs::read(&path)
                .await
                .map_err(|source| SyncError::io("read file", &path, source))?;
            let relative = path
                .strip_prefix(root)
                .map_err(|_| SyncError::Relativize {
                    path: path.clone(),
                    root: root.to_path_buf(),
                })?;
            let key = namespace.key_for(relative)?;

            self.store
                .put(&key, &content)
                .await
                .map_err(|source| SyncError::Put {
                    key: key.clone(),
                    path: path.clone(),
                    source,
                })?;
            info!(path = %path.display(), key = %key, bytes = content.len(), "uploaded");
            report.record(content.len());
        }

        Ok(report.finish())
    }
}
