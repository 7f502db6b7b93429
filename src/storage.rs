//! Browser Token Storage
//!
//! `localStorage`-backed [`TokenStore`]. Storage can be unavailable (private
//! mode, sandboxed iframes); every failure is logged and reads as "no token".

use todo_api::TokenStore;
use web_sys::Storage;

pub struct LocalStorageTokenStore {
    key: String,
}

impl LocalStorageTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Option<Storage> {
        let storage = web_sys::window().and_then(|win| win.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable, token will not persist");
        }
        storage
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn get(&self) -> Option<String> {
        self.storage()?.get_item(&self.key).ok().flatten()
    }

    fn set(&self, token: &str) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.set_item(&self.key, token) {
                log::error!("Failed to store token: {:?}", e);
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = self.storage() {
            if let Err(e) = storage.remove_item(&self.key) {
                log::error!("Failed to remove token: {:?}", e);
            }
        }
    }
}
