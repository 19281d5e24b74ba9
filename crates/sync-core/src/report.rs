use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDirection {
    Upload,
    Download,
}

/// Outcome of a completed upload or download run.
#[derive(Clone, Debug, Serialize)]
pub struct SyncReport {
    pub direction: SyncDirection,
    pub namespace: String,
    pub local_path: PathBuf,
    pub files: usize,
    pub bytes: u64,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl SyncReport {
    pub(crate) fn start(direction: SyncDirection, namespace: &str, local_path: &Path) -> Self {
        Self {
            direction,
            namespace: namespace.to_string(),
            local_path: local_path.to_path_buf(),
            files: 0,
            bytes: 0,
            started_at: Utc::now(),
            elapsed_ms: 0,
        }
    }

    pub(crate) fn record(&mut self, bytes: usize) {
        self.files += 1;
        self.bytes += bytes as u64;
    }

    pub(crate) fn finish(mut self) -> Self {
        let elapsed = Utc::now().signed_duration_since(self.started_at);
        self.elapsed_ms = u64::try_from(elapsed.num_milliseconds()).unwrap_or(0);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.files == 0
    }
}
