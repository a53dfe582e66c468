use anyhow::{Context, Result};
use keyring::Entry;

use super::storage::{TokenStorage, TOKEN_KEY};

const SERVICE_NAME: &str = "ecodeli";

/// Token stored in the OS keychain under service `ecodeli`.
pub struct KeyringTokenStorage {
    entry: Entry,
}

impl KeyringTokenStorage {
    pub fn new() -> Result<Self> {
        let entry = Entry::new(SERVICE_NAME, TOKEN_KEY).context("Failed to create keyring entry")?;
        Ok(Self { entry })
    }
}

impl TokenStorage for KeyringTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        match self.entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to retrieve token from keychain"),
        }
    }

    fn store(&self, token: &str) -> Result<()> {
        self.entry
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn remove(&self) -> Result<()> {
        match self.entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_store_outlives_entry() {
        use keyring::credential::{CredentialBuilderApi, CredentialPersistence};

        // The mock store forgets a credential when its entry is dropped
        let persistence = keyring::default::default_credential_builder().persistence();
        assert!(!matches!(persistence, CredentialPersistence::EntryOnly));
    }

    #[test]
    fn test_keyring_storage_with_mock_backend() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());

        let storage = KeyringTokenStorage::new().unwrap();
        assert_eq!(storage.load().unwrap(), None);
        storage.remove().unwrap();

        storage.store("token").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("token"));

        storage.remove().unwrap();
        assert_eq!(storage.load().unwrap(), None);
    }
}
