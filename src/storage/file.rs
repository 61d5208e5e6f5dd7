//! File-backed store, one JSON file per key.

use super::{KeyValueStore, StoreError};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Store that keeps each key in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        info!("Creating FileStore");
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self, blob), fields(bytes = blob.len()))]
    fn save(&self, key: &str, blob: &[u8]) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // The previous save stays intact until the rename.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, blob)?;
        std::fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "Saved to file");
        Ok(())
    }

    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Err(StoreError::not_found(key));
        }
        Ok(std::fs::read(&path)?)
    }

    #[instrument(skip(self))]
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(key).try_exists()?)
    }

    #[instrument(skip(self))]
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
            debug!(path = %path.display(), "Deleted save file");
        }
        Ok(())
    }
}
