//! `localStorage` persistence for the session pair.

use magmon_core::SessionStorage;
#[cfg(not(target_arch = "wasm32"))]
use magmon_core::MemoryStorage;

#[derive(Debug, thiserror::Error)]
pub enum BrowserStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Session values in `window.localStorage`.
///
/// Host builds (SSR, tests) keep the values in memory instead.
#[derive(Debug, Default)]
pub struct BrowserStorage {
    #[cfg(not(target_arch = "wasm32"))]
    fallback: MemoryStorage,
}

impl BrowserStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(target_arch = "wasm32")]
impl SessionStorage for BrowserStorage {
    type Error = BrowserStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| BrowserStorageError::Storage(crate::dom::js_error_message(&err)))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| BrowserStorageError::Storage(crate::dom::js_error_message(&err)))
    }

    fn remove(&self, key: &str) {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::delete(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SessionStorage for BrowserStorage {
    type Error = BrowserStorageError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.fallback
            .read(key)
            .map_err(|never| match never {})
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.fallback
            .write(key, value)
            .map_err(|never| match never {})
    }

    fn remove(&self, key: &str) {
        self.fallback.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magmon_core::storage::TOKEN_KEY;

    #[test]
    fn host_storage_round_trips_values() {
        let storage = BrowserStorage::new();
        assert_eq!(storage.read(TOKEN_KEY).unwrap(), None);
        storage.write(TOKEN_KEY, "abc").unwrap();
        assert_eq!(storage.read(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        storage.remove(TOKEN_KEY);
        assert_eq!(storage.read(TOKEN_KEY).unwrap(), None);
    }
}
