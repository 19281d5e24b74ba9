//! Key-value store capability used by the directory sync engine.
//!
//! [`KvStore`] is the seam: [`RedisStore`] talks to Redis/Valkey,
//! [`MemoryStore`] keeps everything in process. Key enumeration always goes
//! through [`KeyScan`], which drains paged cursors lazily.

pub mod api;
pub mod config;
pub mod errors;
pub mod memory;
pub mod redis_store;
pub mod scan;

pub use api::{KvStore, ScanPage, StoreHandle};
pub use config::StoreConfig;
pub use errors::{StoreErrKind, StoreError, StoreResult};
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use scan::{scan_pattern, KeyScan};
