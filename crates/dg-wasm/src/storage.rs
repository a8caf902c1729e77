//! Browser `localStorage` backend for the identity store.

use dg_store::{KeyValueStorage, StoreError};
use web_sys::Storage;

/// `window.localStorage`, adapted to the store's key-value trait.
pub struct LocalStorage {
    inner: Storage,
}

impl LocalStorage {
    /// Grab `window.localStorage`. Fails when there is no window or the
    /// browser denies storage access (private mode, sandboxed frame).
    pub fn new() -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Backend("no window object".into()))?;
        let inner = window
            .local_storage()
            .map_err(|_| StoreError::Backend("localStorage access denied".into()))?
            .ok_or_else(|| StoreError::Backend("localStorage unavailable".into()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner
            .get_item(key)
            .map_err(|_| StoreError::Backend(format!("failed to read {key:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner
            .set_item(key, value)
            .map_err(|_| StoreError::Backend(format!("failed to write {key:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner
            .remove_item(key)
            .map_err(|_| StoreError::Backend(format!("failed to remove {key:?}")))
    }
}
