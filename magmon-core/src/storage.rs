use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;

/// Persisted JSON of the signed-in [`crate::model::User`].
pub const USER_KEY: &str = "loggedInUser";
/// Persisted bearer token.
pub const TOKEN_KEY: &str = "accessToken";

/// Key/value persistence for the session pair.
/// Platform-specific implementations should provide this
pub trait SessionStorage {
    type Error: std::error::Error + 'static;

    /// Read a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store a raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    fn remove(&self, key: &str);
}

/// In-memory storage for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let storage = Self::new();
        storage.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        storage
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl SessionStorage for MemoryStorage {
    type Error = Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
