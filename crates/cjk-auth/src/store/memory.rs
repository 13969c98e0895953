use std::sync::{Mutex, MutexGuard};

use cjk_core::errors::StorageError;
use cjk_core::models::CredentialPair;

use super::TokenStore;

/// In-process store. Lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<CredentialPair>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `pair`.
    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            slot: Mutex::new(Some(pair)),
        }
    }

    // A panic while holding the lock cannot leave a half-written pair, so a
    // poisoned slot is still consistent.
    fn slot(&self) -> MutexGuard<'_, Option<CredentialPair>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, pair: &CredentialPair) -> Result<(), StorageError> {
        *self.slot() = Some(pair.clone());
        Ok(())
    }

    fn get(&self) -> Option<CredentialPair> {
        self.slot().clone()
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}
