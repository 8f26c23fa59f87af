//! Client-local persisted state
//!
//! The only thing the client persists is the credential pair. Backends are
//! interchangeable: browser `localStorage` on the web, a JSON file on the
//! desktop and a plain map everywhere else.

use crate::error::StorageError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// String key/value store backing the token store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// Access + refresh token pair issued at login or registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access: String,
    pub refresh: String,
}

/// Owns the two credential keys. Nothing else reads or writes them.
#[derive(Clone)]
pub struct TokenStore {
    backend: Rc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::default()))
    }

    pub fn access(&self) -> Option<String> {
        self.backend
            .get(ACCESS_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn refresh(&self) -> Option<String> {
        self.backend
            .get(REFRESH_TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    pub fn has_access(&self) -> bool {
        self.access().is_some()
    }

    /// Writes both tokens or neither: a failed write leaves the store empty.
    pub fn save(&self, credentials: &Credentials) -> Result<(), StorageError> {
        let written = self
            .backend
            .set(ACCESS_TOKEN_KEY, &credentials.access)
            .and_then(|()| self.backend.set(REFRESH_TOKEN_KEY, &credentials.refresh));
        if let Err(e) = written {
            log::error!("Failed to persist credentials: {}", e);
            self.clear();
            return Err(e);
        }
        Ok(())
    }

    pub fn clear(&self) {
        self.backend.remove(ACCESS_TOKEN_KEY);
        self.backend.remove(REFRESH_TOKEN_KEY);
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("has_access", &self.has_access())
            .finish()
    }
}

/// Volatile store, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// JSON object on disk, rewritten on every change.
#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
#[derive(Debug)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> HashMap<String, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable token file {:?}: {}", self.path, e);
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        }
    }

    fn persist(&self, entries: &HashMap<String, String>, key: &str) -> Result<(), StorageError> {
        let write_err = |reason: String| StorageError::Write {
            key: key.to_string(),
            reason,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
            }
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| write_err(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| write_err(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries, key)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.load();
        if entries.remove(key).is_some() {
            if let Err(e) = self.persist(&entries, key) {
                log::error!("Failed to remove '{}' from token file: {}", key, e);
            }
        }
    }
}

/// `window.localStorage`.
#[cfg(feature = "web")]
#[derive(Debug, Default)]
pub struct BrowserStore;

#[cfg(feature = "web")]
impl BrowserStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|window| window.local_storage().ok().flatten())
    }
}

#[cfg(feature = "web")]
impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = Self::storage().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// Picks the backend matching the enabled platform feature.
#[allow(unused_variables)]
pub fn platform_store(config: &crate::config::AppConfig) -> TokenStore {
    #[cfg(feature = "web")]
    {
        return TokenStore::new(Rc::new(BrowserStore));
    }

    #[cfg(all(feature = "desktop", not(feature = "web")))]
    {
        return TokenStore::new(Rc::new(FileStore::new(config.token_file.clone())));
    }

    #[cfg(not(any(feature = "web", feature = "desktop")))]
    {
        log::warn!("No platform feature enabled, credentials will not outlive the process");
        TokenStore::in_memory()
    }
}
