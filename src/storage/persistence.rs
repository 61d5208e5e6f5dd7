//! Save/resume engine over a key-value store.

use super::{KeyValueStore, MatchSnapshot, PersistError};
use tracing::{debug, info, instrument, warn};

/// Key the current match is saved under unless configured otherwise.
pub const DEFAULT_SAVE_KEY: &str = "CurrentGameSave";

/// Owns the save record for the current match.
///
/// The store is read once, at construction. After that the engine trusts
/// its own cache, which only changes after a write succeeds.
pub struct PersistenceEngine {
    store: Box<dyn KeyValueStore>,
    key: String,
    cached: Option<MatchSnapshot>,
}

impl std::fmt::Debug for PersistenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceEngine")
            .field("key", &self.key)
            .field("cached", &self.cached)
            .finish_non_exhaustive()
    }
}

impl PersistenceEngine {
    /// Creates an engine using [`DEFAULT_SAVE_KEY`].
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(store, DEFAULT_SAVE_KEY)
    }

    /// Creates an engine saving under `key` and loads any existing record.
    ///
    /// A missing, unreadable or undecodable record leaves the cache empty.
    #[instrument(skip(store, key), fields(key = %key.as_ref()))]
    pub fn with_key(store: Box<dyn KeyValueStore>, key: impl AsRef<str>) -> Self {
        let key = key.as_ref().to_string();
        let cached = load_snapshot(store.as_ref(), &key);
        info!(
            found = cached.is_some(),
            resumable = cached.as_ref().is_some_and(|s| *s.in_progress()),
            "Persistence engine ready"
        );
        Self { store, key, cached }
    }

    /// True iff a saved match exists and is still in progress.
    pub fn has_resumable_match(&self) -> bool {
        self.cached.as_ref().is_some_and(|s| *s.in_progress())
    }

    /// Last snapshot written or loaded.
    pub fn current_snapshot(&self) -> Option<&MatchSnapshot> {
        self.cached.as_ref()
    }

    /// Cumulative score across finished matches.
    pub fn total_score(&self) -> i64 {
        self.cached.as_ref().map_or(0, |s| *s.total_score())
    }

    /// Writes `snapshot`, adding `score_delta` to the previous total.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if encoding or the store write fails. The
    /// cache and the stored record are unchanged in that case.
    #[instrument(skip(self, snapshot), fields(key = %self.key, in_progress = *snapshot.in_progress()))]
    pub fn persist(
        &mut self,
        mut snapshot: MatchSnapshot,
        score_delta: i64,
    ) -> Result<&MatchSnapshot, PersistError> {
        let total = self.total_score() + score_delta;
        snapshot.set_total_score(total);

        let blob = serde_json::to_vec(&snapshot)?;
        self.store.save(&self.key, &blob)?;
        debug!(total, score_delta, bytes = blob.len(), "Snapshot persisted");

        Ok(self.cached.insert(snapshot))
    }

    /// Deletes the saved record, cumulative score included.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Store`] if the delete fails.
    #[instrument(skip(self), fields(key = %self.key))]
    pub fn discard(&mut self) -> Result<(), PersistError> {
        self.store.delete(&self.key)?;
        self.cached = None;
        info!("Saved match discarded");
        Ok(())
    }
}

fn load_snapshot(store: &dyn KeyValueStore, key: &str) -> Option<MatchSnapshot> {
    match store.exists(key) {
        Ok(true) => {}
        Ok(false) => {
            debug!("No saved match");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "Could not check for saved match");
            return None;
        }
    }

    let blob = match store.load(key) {
        Ok(blob) => blob,
        Err(e) => {
            warn!(error = %e, "Could not read saved match");
            return None;
        }
    };

    match serde_json::from_slice(&blob) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(error = %e, "Saved match is corrupt, ignoring it");
            None
        }
    }
}
