//! Client session: the persisted bearer token.
//!
//! DESIGN
//! ======
//! The token lives in a small JSON key/value file under the fixed key
//! `token`, the terminal analogue of browser local storage. Instead of
//! reading ambient global storage, the API client is handed a [`Session`]
//! that owns a [`TokenStore`]. The file store reads lazily on first access
//! and caches what it saw; writes go through the cache.
//!
//! ERROR HANDLING
//! ==============
//! Store failures are typed ([`SessionError`]) for explicit token commands.
//! When building request headers an unreadable store counts as "no token"
//! and is logged, so a broken file never blocks anonymous requests.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value};

pub const TOKEN_KEY: &str = "token";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("token storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token storage at {path} is not a JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Persistent storage for a single bearer token.
pub trait TokenStore: Send + Sync {
    /// Current token, if one is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn token(&self) -> Result<Option<String>, SessionError>;

    /// Store `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set_token(&self, token: &str) -> Result<(), SessionError>;

    /// Remove the stored token. Clearing an empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn clear_token(&self) -> Result<(), SessionError>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: Mutex::new(Some(token.into())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// JSON-file token store. Other keys in the file are preserved on write.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // Outer `None` means the file has not been read yet.
    cache: Mutex<Option<Option<String>>>,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), cache: Mutex::new(None) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(SessionError::Io { path: self.path.clone(), source }),
        };
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str::<Map<String, Value>>(&raw)
            .map_err(|source| SessionError::Corrupt { path: self.path.clone(), source })
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), SessionError> {
        let io_err = |source| SessionError::Io { path: self.path.clone(), source };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let rendered = serde_json::to_string_pretty(entries)
            .map_err(|source| SessionError::Corrupt { path: self.path.clone(), source })?;
        fs::write(&self.path, rendered).map_err(io_err)
    }
}

impl TokenStore for FileTokenStore {
    fn token(&self) -> Result<Option<String>, SessionError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.as_ref() {
            return Ok(cached.clone());
        }
        let token = self
            .read_entries()?
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(ToOwned::to_owned);
        *cache = Some(token.clone());
        Ok(token)
    }

    fn set_token(&self, token: &str) -> Result<(), SessionError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        entries.insert(TOKEN_KEY.to_owned(), Value::String(token.to_owned()));
        self.write_entries(&entries)?;
        *cache = Some(Some(token.to_owned()));
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionError> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.read_entries()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
        }
        *cache = Some(None);
        Ok(())
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Context object handed to the API client.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }

    /// Session backed by the JSON file at `path`.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileTokenStore::new(path))
    }

    /// Session with no token and nothing persisted.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    /// Token to send as `Authorization: Bearer`, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<String> {
        match self.store.token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "token storage unreadable; sending request without token");
                None
            }
        }
    }

    /// Persist a new token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be written.
    pub fn set_token(&self, token: &str) -> Result<(), SessionError> {
        self.store.set_token(token)
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token store cannot be written.
    pub fn clear_token(&self) -> Result<(), SessionError> {
        self.store.clear_token()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
