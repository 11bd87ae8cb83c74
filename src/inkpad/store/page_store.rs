use super::StorageBackend;
use crate::error::Result;
use crate::model::{PageCounter, PageRecord};
use tracing::{debug, warn};

/// In-memory page collection plus the active-page index.
///
/// Invariants: `pages` is never empty and `active < pages.len()`.
pub struct PageStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    key: String,
    pages: Vec<PageRecord>,
    active: usize,
}

impl<B: StorageBackend> PageStore<B> {
    /// Deserialize the persisted collection under `key`.
    ///
    /// Absent, empty, unreadable or malformed data all fall back to a single
    /// blank page. This never fails.
    pub fn load(backend: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let pages = match backend.read(&key) {
            Ok(Some(raw)) => parse_pages(&key, &raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "could not read notebook, starting fresh");
                Vec::new()
            }
        };

        let pages = if pages.is_empty() {
            vec![PageRecord::blank()]
        } else {
            pages
        };
        debug!(key = %key, pages = pages.len(), "notebook loaded");

        Self {
            backend,
            key,
            pages,
            active: 0,
        }
    }

    /// Write the whole collection through the backend.
    pub fn persist(&self) -> Result<()> {
        let blob = serde_json::to_string(&self.pages)?;
        self.backend.write(&self.key, &blob)
    }

    /// Overwrite the active record and persist unconditionally.
    pub fn record_active(&mut self, record: PageRecord) -> Result<()> {
        self.pages[self.active] = record;
        self.persist()
    }

    /// Append a blank page, make it active and persist.
    pub fn append_blank(&mut self) -> Result<usize> {
        self.pages.push(PageRecord::blank());
        self.active = self.pages.len() - 1;
        self.persist()?;
        Ok(self.active)
    }

    /// Move to the next page. Returns false at the last page.
    pub fn advance(&mut self) -> bool {
        if self.active + 1 < self.pages.len() {
            self.active += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page. Returns false at the first page.
    pub fn retreat(&mut self) -> bool {
        if self.active > 0 {
            self.active -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to `index`. Returns false, leaving the active page alone, when
    /// it is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.pages.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn is_last(&self) -> bool {
        self.active + 1 == self.pages.len()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always false once loaded; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> Option<&PageRecord> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[PageRecord] {
        &self.pages
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn counter_at(&self, index: usize) -> PageCounter {
        PageCounter {
            current: index,
            total: self.pages.len(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

fn parse_pages(key: &str, raw: &str) -> Vec<PageRecord> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<PageRecord>>(raw) {
        Ok(pages) => pages,
        Err(e) => {
            warn!(key = %key, error = %e, "stored notebook is malformed, ignoring it");
            Vec::new()
        }
    }
}
