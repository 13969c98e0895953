use std::fs;
use std::path::{Path, PathBuf};

use cjk_core::errors::StorageError;
use cjk_core::models::CredentialPair;

use super::TokenStore;

/// Directory-scoped store: one JSON blob `{access, refresh}` per key.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// reader never sees a partially written pair.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    dir: PathBuf,
    key: String,
}

impl FileTokenStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Path of the blob for this store's key.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", self.key))
    }
}

fn io_error(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, pair: &CredentialPair) -> Result<(), StorageError> {
        let blob = serde_json::to_vec(pair).map_err(|e| StorageError::Serialization {
            message: e.to_string(),
        })?;

        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let temp = self.temp_path();
        fs::write(&temp, blob).map_err(|e| io_error(&temp, e))?;

        let target = self.path();
        fs::rename(&temp, &target).map_err(|e| {
            let _ = fs::remove_file(&temp);
            io_error(&target, e)
        })
    }

    fn get(&self) -> Option<CredentialPair> {
        let path = self.path();
        let raw = fs::read(&path).ok()?;
        match serde_json::from_slice(&raw) {
            Ok(pair) => Some(pair),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "ignoring unreadable credential blob");
                None
            }
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
