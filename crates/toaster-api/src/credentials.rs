//! Session token persistence
//!
//! [`FileCredentialStore`] keeps the tokens as JSON in the user's data
//! directory; [`MemoryCredentialStore`] is the process-local variant.

use std::path::{Path, PathBuf};

use toaster_core::prelude::*;
use toaster_core::{AuthTokens, CredentialStore};

const CREDENTIALS_FILENAME: &str = "credentials.json";

/// Tokens stored in `<dir>/credentials.json`
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(CREDENTIALS_FILENAME),
        }
    }

    /// Store under the platform data directory (`<data_local_dir>/toaster`)
    pub fn in_data_dir() -> Self {
        Self::new(&toaster_core::logging::data_directory())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<AuthTokens>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(&self.path).context("Failed to read stored credentials")?;
        match serde_json::from_str(&content) {
            Ok(tokens) => Ok(Some(tokens)),
            Err(e) => {
                warn!("Ignoring unreadable credentials at {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    fn save(&mut self, tokens: &AuthTokens) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                Error::credentials(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        let content = serde_json::to_string_pretty(tokens)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        debug!("Saved credentials to {:?}", self.path);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Cleared credentials at {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::credentials(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// Tokens held for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    tokens: Option<AuthTokens>,
}

impl MemoryCredentialStore {
    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            tokens: Some(tokens),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<AuthTokens>> {
        Ok(self.tokens.clone())
    }

    fn save(&mut self, tokens: &AuthTokens) -> Result<()> {
        self.tokens = Some(tokens.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.tokens = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access_token: "access".into(),
            refresh_token: "refresh".into(),
        }
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = FileCredentialStore::new(dir.path());

        assert_eq!(store.load().unwrap(), None);
        store.save(&tokens()).unwrap();
        assert_eq!(store.load().unwrap(), Some(tokens()));
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut store = FileCredentialStore::new(dir.path());
        store.save(&tokens()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let mut store = FileCredentialStore::new(&dir.path().join("nested").join("toaster"));

        store.save(&tokens()).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_file_loads_as_logged_out() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CREDENTIALS_FILENAME), "not json").unwrap();
        let store = FileCredentialStore::new(dir.path());

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_unreadable_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join(CREDENTIALS_FILENAME)).unwrap();
        let store = FileCredentialStore::new(dir.path());

        assert!(matches!(store.load(), Err(Error::Io(_))));
    }

    #[test]
    fn test_memory_store_clear() {
        let mut store = MemoryCredentialStore::with_tokens(tokens());
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
