//! Directory ⇄ key-value store synchronization.
//!
//! [`Uploader`] walks a directory and writes one record per file;
//! [`Downloader`] scans a namespace and rebuilds the tree. Both take the
//! store handle explicitly and process one file or key at a time.

pub mod downloader;
pub mod errors;
pub mod keymap;
pub mod report;
pub mod uploader;
pub mod walk;

pub use downloader::Downloader;
pub use errors::{SyncError, SyncResult};
pub use keymap::{Namespace, KEY_SEPARATOR};
pub use report::{SyncDirection, SyncReport};
pub use uploader::Uploader;
pub use walk::FileWalk;
