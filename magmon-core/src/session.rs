//! Session holder: the signed-in user and bearer token, mirrored to storage.

use crate::model::User;
use crate::storage::{SessionStorage, TOKEN_KEY, USER_KEY};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Listener = Rc<dyn Fn(Option<&User>)>;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

pub struct SessionStore<S: SessionStorage> {
    storage: S,
    user: RefCell<Option<User>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_listener: Cell<usize>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Restore the session persisted by a previous visit.
    ///
    /// A stored user that no longer parses is purged together with its token.
    pub fn restore(storage: S) -> Self {
        let user = match storage.read(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::warn!("discarding unreadable stored user: {err}");
                    storage.remove(USER_KEY);
                    storage.remove(TOKEN_KEY);
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("session storage unavailable: {err}");
                None
            }
        };
        Self {
            storage,
            user: RefCell::new(user),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.user.borrow().is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.borrow().as_ref().is_some_and(|u| u.is_admin)
    }

    /// Bearer token, read from storage on every call.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match self.storage.read(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                log::warn!("could not read access token: {err}");
                None
            }
        }
    }

    pub fn login(&self, user: User, token: &str) {
        self.persist_user(&user);
        if let Err(err) = self.storage.write(TOKEN_KEY, token) {
            log::error!("failed to persist access token: {err}");
        }
        log::info!("signed in as {}", user.username);
        *self.user.borrow_mut() = Some(user);
        self.notify();
    }

    pub fn logout(&self) {
        self.storage.remove(USER_KEY);
        self.storage.remove(TOKEN_KEY);
        let was_logged_in = self.user.borrow_mut().take().is_some();
        if was_logged_in {
            log::info!("signed out");
        }
        self.notify();
    }

    /// Swap the token after a password change and clear the forced-change flag.
    pub fn complete_password_change(&self, token: &str) {
        if let Err(err) = self.storage.write(TOKEN_KEY, token) {
            log::error!("failed to persist access token: {err}");
        }
        let updated = self.user.borrow().clone().map(|mut user| {
            user.must_change_password = false;
            user
        });
        if let Some(user) = updated {
            self.replace_user(user);
        }
    }

    pub fn replace_user(&self, user: User) {
        self.persist_user(&user);
        *self.user.borrow_mut() = Some(user);
        self.notify();
    }

    pub fn subscribe(&self, listener: impl Fn(Option<&User>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(err) = self.storage.write(USER_KEY, &json) {
                    log::error!("failed to persist user: {err}");
                }
            }
            Err(err) => log::error!("failed to serialize user: {err}"),
        }
    }

    fn notify(&self) {
        // Listeners may unsubscribe while being called.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        let user = self.user.borrow().clone();
        for listener in listeners {
            listener(user.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn user(name: &str) -> User {
        User {
            id: 1,
            username: name.to_string(),
            email: None,
            is_admin: false,
            must_change_password: true,
            avatar_url: None,
        }
    }

    #[test]
    fn login_persists_both_values_and_notifies() {
        let store = SessionStore::restore(MemoryStorage::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |u| sink.borrow_mut().push(u.map(|u| u.username.clone())));

        store.login(user("ana"), "tok");
        assert!(store.storage().contains(USER_KEY));
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(seen.borrow().as_slice(), [Some("ana".to_string())]);

        store.logout();
        assert!(!store.storage().contains(USER_KEY));
        assert!(!store.storage().contains(TOKEN_KEY));
        assert_eq!(seen.borrow().last(), Some(&None));
    }

    #[test]
    fn restore_reads_previous_session() {
        let json = serde_json::to_string(&user("ana")).unwrap();
        let storage = MemoryStorage::with_entries([(USER_KEY, json.as_str()), (TOKEN_KEY, "t")]);
        let store = SessionStore::restore(storage);
        assert_eq!(store.current_user().map(|u| u.username), Some("ana".into()));
    }

    #[test]
    fn restore_purges_malformed_user() {
        let storage = MemoryStorage::with_entries([(USER_KEY, "{not json"), (TOKEN_KEY, "t")]);
        let store = SessionStore::restore(storage);
        assert!(!store.is_logged_in());
        assert!(!store.storage().contains(TOKEN_KEY));
    }

    #[test]
    fn password_change_swaps_token_and_clears_flag() {
        let store = SessionStore::restore(MemoryStorage::new());
        store.login(user("ana"), "old");
        store.complete_password_change("new");
        assert_eq!(store.token().as_deref(), Some("new"));
        assert_eq!(
            store.current_user().map(|u| u.must_change_password),
            Some(false)
        );
    }

    #[test]
    fn unsubscribed_listeners_stop_receiving() {
        let store = SessionStore::restore(MemoryStorage::new());
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let id = store.subscribe(move |_| c.set(c.get() + 1));
        store.logout();
        store.unsubscribe(id);
        store.logout();
        assert_eq!(count.get(), 1);
    }
}
