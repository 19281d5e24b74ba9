//! Mapping between relative file paths and store keys.
//!
//! A key is `<namespace>/<seg>/.../<seg>`, always `/`-separated. Every
//! segment is a single plain file name, which keeps the mapping a bijection
//! and keeps downloaded paths inside the target directory.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::errors::{SyncError, SyncResult};

pub const KEY_SEPARATOR: char = '/';

/// Leading key segment(s) shared by every record of one synced directory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    /// Namespace for uploading `root`: the root's base name.
    ///
    /// Roots without a base name (`.`, `..`, `foo/..`) are canonicalized
    /// first; the filesystem root has no base name and is rejected.
    pub fn from_root(root: &Path) -> SyncResult<Self> {
        let base = match root.file_name() {
            Some(name) => name.to_os_string(),
            None => {
                let canonical = std::fs::canonicalize(root)
                    .map_err(|source| SyncError::io("resolve", root, source))?;
                canonical
                    .file_name()
                    .map(|name| name.to_os_string())
                    .ok_or_else(|| SyncError::InvalidRoot {
                        path: root.to_path_buf(),
                        reason: "directory has no base name".into(),
                    })?
            }
        };
        let name = base
            .to_str()
            .ok_or_else(|| SyncError::NonUtf8Path(root.to_path_buf()))?;
        if name.contains(KEY_SEPARATOR) {
            return Err(SyncError::InvalidRoot {
                path: root.to_path_buf(),
                reason: format!("base name '{name}' contains '{KEY_SEPARATOR}'"),
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Namespace named by a download prefix such as `data` or `data/sub/`.
    pub fn from_prefix(prefix: &str) -> SyncResult<Self> {
        let trimmed = prefix.trim_end_matches(KEY_SEPARATOR);
        let invalid = |reason| SyncError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason,
        };
        if trimmed.is_empty() {
            return Err(invalid("prefix is empty"));
        }
        for segment in trimmed.split(KEY_SEPARATOR) {
            if segment.is_empty() {
                return Err(invalid("prefix has an empty segment"));
            }
            if segment == "." || segment == ".." {
                return Err(invalid("prefix has a relative segment"));
            }
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key for a file at `relative` below the namespace root.
    pub fn key_for(&self, relative: &Path) -> SyncResult<String> {
        let mut key = self.0.clone();
        let mut segments = 0usize;
        for component in relative.components() {
            let Component::Normal(segment) = component else {
                return Err(SyncError::Relativize {
                    path: relative.to_path_buf(),
                    root: PathBuf::from(&self.0),
                });
            };
            let segment = segment
                .to_str()
                .ok_or_else(|| SyncError::NonUtf8Path(relative.to_path_buf()))?;
            key.push(KEY_SEPARATOR);
            key.push_str(segment);
            segments += 1;
        }
        if segments == 0 {
            return Err(SyncError::Relativize {
                path: relative.to_path_buf(),
                root: PathBuf::from(&self.0),
            });
        }
        Ok(key)
    }

    /// Relative local path for `key`, refusing anything that could land
    /// outside the directory it is joined onto.
    pub fn relative_path_of(&self, key: &str) -> SyncResult<PathBuf> {
        let unsafe_key = |reason| SyncError::UnsafeKey {
            key: key.to_string(),
            reason,
        };
        let rest = key
            .strip_prefix(self.0.as_str())
            .and_then(|rest| rest.strip_prefix(KEY_SEPARATOR))
            .ok_or_else(|| unsafe_key("key is outside the namespace"))?;
        if rest.is_empty() {
            return Err(unsafe_key("key has no relative path"));
        }

        let mut relative = PathBuf::new();
        for segment in rest.split(KEY_SEPARATOR) {
            if segment.is_empty() {
                return Err(unsafe_key("key has an empty path segment"));
            }
            if segment == "." || segment == ".." {
                return Err(unsafe_key("key has a relative path segment"));
            }
            let mut components = Path::new(segment).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(name)), None) if name == segment => {}
                _ => return Err(unsafe_key("key segment is not a plain file name")),
            }
            relative.push(segment);
        }
        Ok(relative)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
