//! # Storage Layer
//!
//! The whole notebook is persisted as **one serialized blob under one key**.
//! There are no per-page keys, no version field and no migrations: the
//! persisted shape is exactly the in-memory `Vec<PageRecord>`.
//!
//! The layer is split in two:
//!
//! 1. [`StorageBackend`]: the "how" of storage. A string-keyed, whole-value
//!    read/write API, the same contract a browser's local storage offers.
//! 2. [`page_store::PageStore`]: the "what". Owns the in-memory page
//!    collection and the active index, serializes it through the backend and
//!    fails soft on absent or corrupt data.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: Production backend, one `<key>.json` file per key.
//! - [`mem_backend::MemBackend`]: For testing logic without filesystem I/O.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── config.json             # InkpadConfig
//! └── hindiNotebookData.json  # [{"text": "...", "drawing": "data:image/png;base64,..."}, ...]
//! ```

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;
pub mod page_store;

/// Abstract interface for raw key-value storage.
///
/// Calls are synchronous and operate on whole values. There are no partial
/// writes, transactions or concurrent-writer protection: one document, one
/// writer.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}
