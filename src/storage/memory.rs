//! Transient in-process store.

use super::{KeyValueStore, StoreError, StoreErrorKind};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

/// In-memory store. Clones share the same map, so a test can keep a
/// handle while the engine owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys. A poisoned store counts as empty.
    pub fn len(&self) -> usize {
        match self.entries() {
            Ok(entries) => entries.len(),
            Err(e) => {
                warn!(error = %e, "Memory store unreadable, reporting it as empty");
                0
            }
        }
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[track_caller]
    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::new(StoreErrorKind::Io, "Memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    #[instrument(skip(self, blob), fields(bytes = blob.len()))]
    fn save(&self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        self.entries()?.insert(key.to_string(), blob.to_vec());
        debug!("Saved to memory");
        Ok(())
    }

    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        self.entries()?
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    #[instrument(skip(self))]
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries()?.contains_key(key))
    }

    #[instrument(skip(self))]
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}
