use cjk_core::errors::StorageError;
use cjk_core::models::CredentialPair;

use super::TokenStore;

/// Store for contexts with no client storage. Holds nothing and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedTokenStore;

impl TokenStore for DetachedTokenStore {
    fn save(&self, _pair: &CredentialPair) -> Result<(), StorageError> {
        Ok(())
    }

    fn get(&self) -> Option<CredentialPair> {
        None
    }

    fn clear(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
