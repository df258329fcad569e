//! Bearer token held for the lifetime of a session.
//!
//! The token is cached in memory and loaded lazily from a [`TokenStorage`] on
//! first use. Code that calls the API takes a `&SessionContext` explicitly.

use std::path::PathBuf;
use std::sync::{
    PoisonError,
    RwLock,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to access token storage: {0}")]
    Storage(#[from] std::io::Error),
}

/// Persistent backing store for the token.
pub trait TokenStorage {
    /// Returns the stored token, or `None` if nothing is stored.
    fn load(&self) -> Result<Option<String>, SessionError>;

    fn save(&self, token: &str) -> Result<(), SessionError>;

    fn remove(&self) -> Result<(), SessionError>;
}

/// Storage that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    token: RwLock<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: RwLock::new(Some(token.to_string())) }
    }
}

impl TokenStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, SessionError> {
        Ok(self.token.read().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Storage in a single file holding the raw token.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStorage for FileStorage {
    fn load(&self) -> Result<Option<String>, SessionError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    fn remove(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Token cache for one session.
#[derive(Debug)]
pub struct SessionContext<S> {
    storage: S,
    /// Cached token; empty tokens are never cached
    cached: RwLock<Option<String>>,
}

impl<S: TokenStorage> SessionContext<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage, cached: RwLock::new(None) }
    }

    /// Current token, loading it from storage when nothing is cached.
    ///
    /// Storage failures are logged and treated as "no token".
    pub fn get(&self) -> Option<String> {
        if let Some(token) = self.cached.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Some(token.clone());
        }

        let stored = match self.storage.load() {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load session token");
                None
            }
        };
        let token = stored.filter(|token| !token.is_empty())?;

        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(token.clone());
        Some(token)
    }

    /// Stores a new token and caches it.
    ///
    /// # Errors
    /// The storage could not be written; the cache is left unchanged.
    pub fn set(&self, token: &str) -> Result<(), SessionError> {
        self.storage.save(token)?;
        let cached = (!token.is_empty()).then(|| token.to_string());
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = cached;
        Ok(())
    }

    /// Drops the cached token. The next [`Self::get`] reloads it from storage.
    pub fn clear(&self) {
        *self.cached.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Drops the token from both cache and storage.
    ///
    /// # Errors
    /// The storage could not be cleared.
    pub fn logout(&self) -> Result<(), SessionError> {
        self.clear();
        self.storage.remove()
    }

    /// `Authorization` header value, if a token is available.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.get().map(|token| format!("Bearer {token}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn test_get_loads_lazily_and_caches() {
        let session = SessionContext::new(MemoryStorage::with_token("abc"));

        expect_that!(session.get(), some(eq("abc")));

        // Cached value survives a storage change until cleared.
        session.storage.save("def").unwrap();
        expect_that!(session.get(), some(eq("abc")));

        session.clear();
        expect_that!(session.get(), some(eq("def")));
    }

    #[rstest]
    #[case::nothing_stored(MemoryStorage::new())]
    #[case::empty_token(MemoryStorage::with_token(""))]
    fn test_get_without_token(#[case] storage: MemoryStorage) {
        let session = SessionContext::new(storage);

        assert_that!(session.get(), none());
        assert_that!(session.authorization_header(), none());
    }

    #[googletest::test]
    fn test_set_and_authorization_header() {
        let session = SessionContext::new(MemoryStorage::new());

        session.set("token-1").unwrap();

        expect_that!(session.authorization_header(), some(eq("Bearer token-1")));
        expect_that!(session.storage.load().unwrap(), some(eq("token-1")));
    }

    #[googletest::test]
    fn test_clear_keeps_storage_but_logout_removes_it() {
        let session = SessionContext::new(MemoryStorage::with_token("abc"));
        expect_that!(session.get(), some(eq("abc")));

        session.clear();
        expect_that!(session.storage.load().unwrap(), some(eq("abc")));

        session.logout().unwrap();
        expect_that!(session.get(), none());
        expect_that!(session.storage.load().unwrap(), none());
    }

    #[googletest::test]
    fn test_file_storage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session").join("token");
        let session = SessionContext::new(FileStorage::new(path.clone()));

        expect_that!(session.get(), none());

        session.set("file-token").unwrap();
        session.clear();
        expect_that!(session.get(), some(eq("file-token")));
        expect_that!(std::fs::read_to_string(&path).unwrap(), eq("file-token"));

        session.logout().unwrap();
        expect_that!(path.exists(), eq(false));
        // Removing an absent file is not an error.
        expect_that!(session.logout(), ok(anything()));
    }

    #[googletest::test]
    fn test_file_storage_trims_whitespace() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("token");
        std::fs::write(&path, "abc\n").unwrap();

        let session = SessionContext::new(FileStorage::new(path));

        expect_that!(session.authorization_header(), some(eq("Bearer abc")));
    }
}
