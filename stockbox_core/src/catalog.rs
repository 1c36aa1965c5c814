//! In-memory product catalog, bounded in size.

use stockbox_traits::{CatalogEntry, CatalogSource};

use crate::error::StationError;
use crate::hw_error::map_hw_error;

#[derive(Debug, Clone)]
pub struct ProductCatalog {
    entries: Vec<CatalogEntry>,
    capacity: usize,
}

impl ProductCatalog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Build a catalog directly; entries past `capacity` are dropped.
    pub fn from_entries(entries: Vec<CatalogEntry>, capacity: usize) -> Self {
        let mut c = Self::new(capacity);
        c.replace(entries);
        c
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    pub fn designation(&self, index: usize) -> Option<&str> {
        self.get(index).map(|e| e.designation.as_str())
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    fn replace(&mut self, mut entries: Vec<CatalogEntry>) {
        if entries.len() > self.capacity {
            tracing::warn!(
                received = entries.len(),
                capacity = self.capacity,
                "catalog larger than capacity; extra entries ignored"
            );
            entries.truncate(self.capacity);
        }
        self.entries = entries;
    }

    /// Fetch the catalog from `source` and replace the current contents.
    ///
    /// On failure the previous contents are kept and the typed error is
    /// returned. Returns the number of entries loaded.
    pub fn reload(&mut self, source: &mut dyn CatalogSource) -> Result<usize, StationError> {
        match source.fetch_all() {
            Ok(entries) => {
                self.replace(entries);
                tracing::info!(count = self.entries.len(), "catalog loaded");
                Ok(self.entries.len())
            }
            Err(e) => {
                let err = map_hw_error(&*e);
                tracing::warn!(error = %err, kept = self.entries.len(), "catalog reload failed");
                Err(err)
            }
        }
    }
}

impl Default for ProductCatalog {
    fn default() -> Self {
        Self::new(crate::config::CATALOG_CAPACITY)
    }
}
