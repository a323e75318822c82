use std::collections::HashMap;
use std::sync::Mutex;

use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const REFRESH_TOKEN_KEY: &str = "auth_refresh_token";

/// String key/value persistence used for the session.
///
/// The browser build uses [`LocalStorage`]; tests and non-browser hosts inject
/// [`MemoryStorage`].
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;
}

/// `window.localStorage`, looked up on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn get_local_storage() -> Result<web_sys::Storage, String> {
    window()
        .ok_or("window is not available")?
        .local_storage()
        .map_err(|e| format!("Failed to access localStorage: {:?}", e))?
        .ok_or_else(|| "localStorage is not available".to_string())
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        get_local_storage()?
            .get_item(key)
            .map_err(|e| format!("Failed to read '{}': {:?}", key, e))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        get_local_storage()?
            .set_item(key, value)
            .map_err(|e| format!("Failed to write '{}': {:?}", key, e))
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        get_local_storage()?
            .remove_item(key)
            .map_err(|e| format!("Failed to remove '{}': {:?}", key, e))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        let items = self.items.lock().map_err(|_| "storage lock poisoned")?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|_| "storage lock poisoned")?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        let mut items = self.items.lock().map_err(|_| "storage lock poisoned")?;
        items.remove(key);
        Ok(())
    }
}

pub fn save_access_token(storage: &dyn KeyValueStore, token: &str) {
    if let Err(e) = storage.set_item(ACCESS_TOKEN_KEY, token) {
        log::warn!("{}", e);
    }
}

pub fn save_refresh_token(storage: &dyn KeyValueStore, token: &str) {
    if let Err(e) = storage.set_item(REFRESH_TOKEN_KEY, token) {
        log::warn!("{}", e);
    }
}

pub fn get_access_token(storage: &dyn KeyValueStore) -> Option<String> {
    read_token(storage, ACCESS_TOKEN_KEY)
}

pub fn get_refresh_token(storage: &dyn KeyValueStore) -> Option<String> {
    read_token(storage, REFRESH_TOKEN_KEY)
}

fn read_token(storage: &dyn KeyValueStore, key: &str) -> Option<String> {
    match storage.get_item(key) {
        Ok(token) => token.filter(|t| !t.is_empty()),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}

/// Clear all authentication tokens
pub fn clear_tokens(storage: &dyn KeyValueStore) {
    for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY] {
        if let Err(e) = storage.remove_item(key) {
            log::warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some("v".to_string()));
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_tokens_lifecycle() {
        let storage = MemoryStorage::new();
        assert_eq!(get_access_token(&storage), None);

        save_access_token(&storage, "access-1");
        save_refresh_token(&storage, "refresh-1");
        assert_eq!(get_access_token(&storage).as_deref(), Some("access-1"));
        assert_eq!(get_refresh_token(&storage).as_deref(), Some("refresh-1"));

        save_access_token(&storage, "access-2");
        assert_eq!(get_access_token(&storage).as_deref(), Some("access-2"));

        clear_tokens(&storage);
        assert_eq!(get_access_token(&storage), None);
        assert_eq!(get_refresh_token(&storage), None);
    }

    #[test]
    fn test_empty_token_counts_as_missing() {
        let storage = MemoryStorage::new();
        storage.set_item(ACCESS_TOKEN_KEY, "").unwrap();
        assert_eq!(get_access_token(&storage), None);
    }
}
