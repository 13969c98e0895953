//! Credential pair persistence.
//!
//! Stores hold one pair at most. They do not validate what they hold; expiry
//! is judged by the codec.

pub mod detached;
pub mod file;
pub mod memory;

pub use detached::DetachedTokenStore;
pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use std::sync::Arc;

use cjk_core::errors::StorageError;
use cjk_core::models::CredentialPair;

/// Persistence contract for the credential pair.
///
/// The pair is saved and cleared as a unit. `get` never fails: unreadable
/// content is reported as absent.
pub trait TokenStore: Send + Sync {
    fn save(&self, pair: &CredentialPair) -> Result<(), StorageError>;
    fn get(&self) -> Option<CredentialPair>;
    fn clear(&self) -> Result<(), StorageError>;
}

impl<S: TokenStore + ?Sized> TokenStore for Arc<S> {
    fn save(&self, pair: &CredentialPair) -> Result<(), StorageError> {
        (**self).save(pair)
    }

    fn get(&self) -> Option<CredentialPair> {
        (**self).get()
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
