//! Token Store
//!
//! Holds the single bearer token. The browser build persists it in
//! `localStorage`; tests use [`MemoryTokenStore`]. [`SessionMirror`] keeps
//! a login working for the current page when persistence is unavailable.

use std::cell::RefCell;

/// Persistent slot for the auth token.
///
/// An absent token is a normal state (logged out), not an error, so none of
/// these operations fail. Implementations that can fail internally log and
/// degrade to "absent".
pub trait TokenStore {
    fn get(&self) -> Option<String>;

    fn set(&self, token: &str);

    fn clear(&self);

    fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

/// Token store that lives only as long as the value
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RefCell<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.token.borrow_mut().take();
    }
}

/// Wraps a persistent store and remembers this session's last write.
///
/// Reads prefer the session's own write, so a backend that silently drops
/// writes (private browsing, sandboxed frames) still sees the token until
/// the page is closed. Before any write, reads go to the backend.
#[derive(Debug)]
pub struct SessionMirror<S> {
    inner: S,
    written: RefCell<Option<Option<String>>>,
}

impl<S: TokenStore> SessionMirror<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            written: RefCell::new(None),
        }
    }
}

impl<S: TokenStore> TokenStore for SessionMirror<S> {
    fn get(&self) -> Option<String> {
        match &*self.written.borrow() {
            Some(token) => token.clone(),
            None => self.inner.get(),
        }
    }

    fn set(&self, token: &str) {
        self.inner.set(token);
        *self.written.borrow_mut() = Some(Some(token.to_string()));
    }

    fn clear(&self) {
        self.inner.clear();
        *self.written.borrow_mut() = Some(None);
    }
}
