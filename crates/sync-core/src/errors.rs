use std::io;
use std::path::{Path, PathBuf};

use dirsync_kv_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("invalid root directory {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },
    #[error("invalid download prefix '{prefix}': {reason}")]
    InvalidPrefix { prefix: String, reason: &'static str },
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to get relative path for {} under {}", path.display(), root.display())]
    Relativize { path: PathBuf, root: PathBuf },
    #[error("path {} is not valid UTF-8", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("refusing key '{key}': {reason}")]
    UnsafeKey { key: String, reason: &'static str },
    #[error("failed to upload file {} with key {key}: {source}", path.display())]
    Put {
        key: String,
        path: PathBuf,
        #[source]
        source: StoreError,
    },
    #[error("failed to get value for key {key}: {source}")]
    Get {
        key: String,
        #[source]
        source: StoreError,
    },
    #[error("record {0} disappeared before it could be fetched")]
    MissingRecord(String),
    #[error("error during scan of '{namespace}': {source}")]
    Scan {
        namespace: String,
        #[source]
        source: StoreError,
    },
}

impl SyncError {
    pub(crate) fn io(op: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
