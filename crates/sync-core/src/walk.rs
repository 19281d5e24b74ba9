use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::errors::{SyncError, SyncResult};

/// Lazy depth-first walk yielding every regular file below a root.
///
/// Entries of a directory are visited in lexical order and a directory is
/// only read once the walk reaches it. Symlinks to files are yielded under
/// the link's own path; symlinks to directories are not followed. After the
/// first error the walk yields nothing more.
#[derive(Debug)]
pub struct FileWalk {
    stack: Vec<PathBuf>,
}

impl FileWalk {
    pub fn new(root: impl Into<PathBuf>) -> SyncResult<Self> {
        let root = root.into();
        let metadata = fs::metadata(&root).map_err(|err| SyncError::InvalidRoot {
            path: root.clone(),
            reason: err.to_string(),
        })?;
        if !metadata.is_dir() {
            return Err(SyncError::InvalidRoot {
                path: root,
                reason: "not a directory".into(),
            });
        }
        let mut walk = Self { stack: Vec::new() };
        walk.push_children(&root)?;
        Ok(walk)
    }

    fn push_children(&mut self, dir: &Path) -> SyncResult<()> {
        let entries = fs::read_dir(dir).map_err(|source| SyncError::io("read directory", dir, source))?;
        let mut children = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| SyncError::io("read directory", dir, source))?;
            children.push(entry.path());
        }
        children.sort();
        self.stack.extend(children.into_iter().rev());
        Ok(())
    }

    fn fail(&mut self, err: SyncError) -> Option<SyncResult<PathBuf>> {
        self.stack.clear();
        Some(Err(err))
    }
}

impl Iterator for FileWalk {
    type Item = SyncResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.stack.pop() {
            let file_type = match fs::symlink_metadata(&path) {
                Ok(metadata) => metadata.file_type(),
                Err(source) => return self.fail(SyncError::io("stat", &path, source)),
            };

            if file_type.is_dir() {
                if let Err(err) = self.push_children(&path) {
                    return self.fail(err);
                }
                continue;
            }
            if file_type.is_file() {
                return Some(Ok(path));
            }
            if file_type.is_symlink() {
                match fs::metadata(&path) {
                    Ok(target) if target.is_file() => return Some(Ok(path)),
                    Ok(_) => {
                        debug!(path = %path.display(), "not following symlink to directory");
                        continue;
                    }
                    Err(source) => {
                        return self.fail(SyncError::io("resolve symlink", &path, source))
                    }
                }
            }
            warn!(path = %path.display(), "skipping special file");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relative_files(root: &Path) -> Vec<String> {
        FileWalk::new(root)
            .unwrap()
            .map(|entry| {
                entry
                    .unwrap()
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn yields_files_depth_first_in_lexical_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.txt", "b");
        write(dir.path(), "a/z.txt", "z");
        write(dir.path(), "a/m/n.txt", "n");
        write(dir.path(), "c/d.txt", "d");

        assert_eq!(
            relative_files(dir.path()),
            vec!["a/m/n.txt", "a/z.txt", "b.txt", "c/d.txt"]
        );
    }

    #[test]
    fn empty_directories_yield_nothing() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("x/y/z")).unwrap();
        assert!(relative_files(dir.path()).is_empty());
    }

    #[test]
    fn root_must_be_an_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FileWalk::new(dir.path().join("nope")).unwrap_err();
        assert!(matches!(missing, SyncError::InvalidRoot { .. }));

        write(dir.path(), "file.txt", "x");
        let file = FileWalk::new(dir.path().join("file.txt")).unwrap_err();
        assert!(matches!(file, SyncError::InvalidRoot { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn file_symlinks_are_yielded_and_directory_symlinks_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let outside = tempfile::tempdir().unwrap();
        write(outside.path(), "target.txt", "t");
        write(outside.path(), "nested/inner.txt", "i");
        write(dir.path(), "plain.txt", "p");
        std::os::unix::fs::symlink(outside.path().join("target.txt"), dir.path().join("link.txt"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path().join("nested"), dir.path().join("linkdir"))
            .unwrap();

        assert_eq!(relative_files(dir.path()), vec!["link.txt", "plain.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_stops_the_walk() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.txt", "a");
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("b.txt")).unwrap();
        write(dir.path(), "c.txt", "c");

        let mut walk = FileWalk::new(dir.path()).unwrap();
        assert!(walk.next().unwrap().is_ok());
        assert!(walk.next().unwrap().is_err());
        assert!(walk.next().is_none());
    }
}
