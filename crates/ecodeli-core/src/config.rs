//! Client configuration management.
//!
//! This module handles loading and saving the client configuration: the
//! backend URL, where the session token is stored, and the last email used
//! to log in.
//!
//! Configuration is stored at `~/.config/ecodeli/config.json`. The
//! `ECODELI_API_URL` environment variable overrides the stored URL.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{FileTokenStorage, KeyringTokenStorage, MemoryTokenStorage, SessionStore};

/// Application name used for the config directory path
const APP_NAME: &str = "ecodeli";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Path of the GraphQL endpoint relative to the API URL
const GRAPHQL_PATH: &str = "graphql";

/// Host loopback as seen from the Android emulator
pub const DEFAULT_API_URL: &str = "http://10.0.2.2:4000/";

/// Environment variable overriding `api_url`
pub const API_URL_ENV: &str = "ECODELI_API_URL";

/// Where the session token is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON preferences file next to the config
    #[default]
    File,
    /// OS keychain
    Keyring,
    /// Process memory; the session ends with the process
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "file"),
            StorageBackend::Keyring => write!(f, "keyring"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "keyring" | "keychain" => Ok(StorageBackend::Keyring),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!(
                "unknown storage backend '{}' (expected file, keyring or memory)",
                other
            )),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default)]
    pub last_email: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            storage: StorageBackend::default(),
            last_email: None,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
    }

    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME))
    }

    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Full URL of the GraphQL endpoint, e.g. `http://10.0.2.2:4000/graphql`
    pub fn graphql_endpoint(&self) -> String {
        let base = self.api_url.trim_end_matches('/');
        if base.ends_with(&format!("/{}", GRAPHQL_PATH)) {
            base.to_string()
        } else {
            format!("{}/{}", base, GRAPHQL_PATH)
        }
    }

    /// Build the session store for the configured backend.
    pub fn open_session(&self) -> Result<SessionStore> {
        self.open_session_in(&Self::config_dir()?)
    }

    /// Like `open_session`, keeping the file backend's preferences in `dir`.
    pub fn open_session_in(&self, dir: &Path) -> Result<SessionStore> {
        let store = match self.storage {
            StorageBackend::File => SessionStore::new(FileTokenStorage::new(dir)),
            StorageBackend::Keyring => SessionStore::new(KeyringTokenStorage::new()?),
            StorageBackend::Memory => SessionStore::new(MemoryTokenStorage::new()),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::tests::token_with_payload;

    #[test]
    fn test_graphql_endpoint() {
        let mut config = Config::default();
        assert_eq!(config.graphql_endpoint(), "http://10.0.2.2:4000/graphql");

        config.api_url = "https://api.ecodeli.fr".to_string();
        assert_eq!(config.graphql_endpoint(), "https://api.ecodeli.fr/graphql");

        config.api_url = "https://api.ecodeli.fr/graphql/".to_string();
        assert_eq!(config.graphql_endpoint(), "https://api.ecodeli.fr/graphql");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_url: "http://localhost:4000/".to_string(),
            storage: StorageBackend::Keyring,
            last_email: Some("jane@ecodeli.fr".to_string()),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"storage": "memory"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.storage, StorageBackend::Memory);
    }

    #[test]
    fn test_env_overrides_api_url() {
        let mut config = Config::default();

        std::env::set_var(API_URL_ENV, "  https://staging.ecodeli.fr/  ");
        config.apply_env();
        assert_eq!(config.api_url, "https://staging.ecodeli.fr/");
        assert_eq!(config.graphql_endpoint(), "https://staging.ecodeli.fr/graphql");

        // Blank values are ignored
        std::env::set_var(API_URL_ENV, " ");
        config.apply_env();
        assert_eq!(config.api_url, "https://staging.ecodeli.fr/");

        std::env::remove_var(API_URL_ENV);
        config.apply_env();
        assert_eq!(config.api_url, "https://staging.ecodeli.fr/");
    }

    #[test]
    fn test_open_session_file_backend_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        let token = token_with_payload(&serde_json::json!({ "exp": 4_000_000_000i64 }));

        config.open_session_in(dir.path()).unwrap().save(&token).unwrap();

        assert!(dir.path().join("ecodeli_prefs.json").exists());
        let reopened = config.open_session_in(dir.path()).unwrap();
        assert_eq!(reopened.read(), Some(token));
    }

    #[test]
    fn test_open_session_memory_backend_is_per_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            storage: StorageBackend::Memory,
            ..Config::default()
        };
        let token = token_with_payload(&serde_json::json!({ "exp": 4_000_000_000i64 }));

        let session = config.open_session_in(dir.path()).unwrap();
        session.save(&token).unwrap();
        assert_eq!(session.read(), Some(token));

        assert_eq!(config.open_session_in(dir.path()).unwrap().read(), None);
        assert!(!dir.path().join("ecodeli_prefs.json").exists());
    }

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!("Keychain".parse::<StorageBackend>(), Ok(StorageBackend::Keyring));
        assert_eq!("file".parse::<StorageBackend>(), Ok(StorageBackend::File));
        assert!("cloud".parse::<StorageBackend>().is_err());
    }
}
