//! Durable storage for match snapshots.

mod error;
mod file;
mod memory;
mod persistence;
mod snapshot;

pub use error::{PersistError, SnapshotError, StoreError, StoreErrorKind};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use persistence::{DEFAULT_SAVE_KEY, PersistenceEngine};
pub use snapshot::{MatchSnapshot, flatten, unflatten};

/// Key-value store holding opaque blobs.
///
/// Single writer: only one match uses a store at a time, so
/// implementations do no locking beyond what their backend needs.
pub trait KeyValueStore: Send {
    /// Stores `blob` under `key`, replacing any previous value.
    fn save(&self, key: &str, blob: &[u8]) -> Result<(), StoreError>;

    /// Reads the blob under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreErrorKind::NotFound`] error if nothing is stored.
    fn load(&self, key: &str) -> Result<Vec<u8>, StoreError>;

    /// Whether anything is stored under `key`.
    fn exists(&self, key: &str) -> Result<bool, StoreError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn delete(&self, key: &str) -> Result<(), StoreError>;
}
