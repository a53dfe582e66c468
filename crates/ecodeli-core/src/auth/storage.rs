//! Durable storage for the session token.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};
use tracing::warn;

/// Preferences namespace the token lives under
pub const PREFS_NAMESPACE: &str = "ecodeli_prefs";

/// Key of the token entry within the namespace
pub const TOKEN_KEY: &str = "auth_token";

/// A single key-value slot holding the session token.
///
/// Removing an entry that does not exist is not an error.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn store(&self, token: &str) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

/// Token stored in a JSON preferences file, `<dir>/ecodeli_prefs.json`.
///
/// Other keys in the file are left untouched.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", PREFS_NAMESPACE)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_prefs(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let contents = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences file {}", self.path.display()))?;
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse preferences file {}", self.path.display()))
    }

    fn write_prefs(&self, prefs: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        // Write then rename so a reader never sees a half-written file
        let tmp = self.path.with_extension("json.tmp");
        let contents = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&tmp, contents).context("Failed to write preferences file")?;
        restrict_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path).context("Failed to replace preferences file")?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .context("Failed to restrict preferences file permissions")
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        let prefs = self.read_prefs()?;
        Ok(prefs.get(TOKEN_KEY).and_then(Value::as_str).map(String::from))
    }

    fn store(&self, token: &str) -> Result<()> {
        let mut prefs = self.read_prefs().unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable preferences file");
            Map::new()
        });
        prefs.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_prefs(&prefs)
    }

    fn remove(&self) -> Result<()> {
        let mut prefs = match self.read_prefs() {
            Ok(prefs) => prefs,
            Err(e) => {
                // An unreadable file cannot hold a usable token either
                warn!(error = %e, "Removing unreadable preferences file");
                std::fs::remove_file(&self.path).context("Failed to remove preferences file")?;
                return Ok(());
            }
        };
        if prefs.remove(TOKEN_KEY).is_some() {
            self.write_prefs(&prefs)?;
        }
        Ok(())
    }
}

/// Token held in process memory only.
#[derive(Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| anyhow!("Token storage lock poisoned"))
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn store(&self, token: &str) -> Result<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

impl<S: TokenStorage + ?Sized> TokenStorage for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn store(&self, token: &str) -> Result<()> {
        (**self).store(token)
    }

    fn remove(&self) -> Result<()> {
        (**self).remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());
        assert_eq!(storage.load().unwrap(), None);

        storage.store("first").unwrap();
        storage.store("second").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("second"));
        assert!(storage.path().ends_with("ecodeli_prefs.json"));

        storage.remove().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_file_storage_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());
        std::fs::write(storage.path(), r#"{"theme": "dark"}"#).unwrap();

        storage.store("token").unwrap();
        storage.remove().unwrap();

        let contents = std::fs::read_to_string(storage.path()).unwrap();
        let prefs: Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(prefs, serde_json::json!({ "theme": "dark" }));
    }

    #[test]
    fn test_file_storage_remove_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested"));
        storage.remove().unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());
        std::fs::write(storage.path(), "{not json").unwrap();

        assert!(storage.load().is_err());
        storage.store("fresh").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("fresh"));

        std::fs::write(storage.path(), "{not json").unwrap();
        storage.remove().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_memory_storage() {
        let storage = MemoryTokenStorage::with_token("abc");
        assert_eq!(storage.load().unwrap().as_deref(), Some("abc"));
        storage.remove().unwrap();
        storage.remove().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }
}
