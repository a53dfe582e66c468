use chrono::Utc;
use tracing::{debug, warn};

use super::storage::TokenStorage;
use super::token::TokenClaims;
use super::SessionError;

/// Source of the current wall-clock time in seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

/// Persisted session token with expiry enforcement.
///
/// A token whose `exp` claim is at or before the current time is never
/// handed out: it is purged from storage and reported as absent. Malformed
/// tokens get the same treatment.
pub struct SessionStore {
    storage: Box<dyn TokenStorage>,
    clock: Box<dyn Clock>,
}

impl SessionStore {
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Persist the token, replacing any previous one. No validation here.
    pub fn save(&self, token: &str) -> Result<(), SessionError> {
        self.storage
            .store(token)
            .map_err(|e| SessionError::Storage(format!("{:#}", e)))?;
        debug!("Session token saved");
        Ok(())
    }

    /// The stored token if it is still valid.
    pub fn read(&self) -> Option<String> {
        self.require().ok()
    }

    /// The stored token, or the reason there is none usable.
    pub fn require(&self) -> Result<String, SessionError> {
        self.current().map(|(token, _)| token)
    }

    /// Claims of the token `read` would return.
    pub fn claims(&self) -> Option<TokenClaims> {
        self.current().ok().map(|(_, claims)| claims)
    }

    /// Remove the stored token unconditionally.
    pub fn clear(&self) {
        match self.storage.remove() {
            Ok(()) => debug!("Session cleared"),
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(error = %message, "Failed to clear session token");
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    /// The stored token with its claims, or the reason there is none usable.
    pub fn current(&self) -> Result<(String, TokenClaims), SessionError> {
        let token = match self.storage.load() {
            Ok(Some(token)) => token,
            Ok(None) => return Err(SessionError::Absent),
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(error = %message, "Failed to load session token");
                return Err(SessionError::Storage(message));
            }
        };

        let claims = TokenClaims::decode(&token).and_then(|claims| {
            if claims.is_expired_at(self.clock.now()) {
                Err(SessionError::Expired)
            } else {
                Ok(claims)
            }
        });

        match claims {
            Ok(claims) => Ok((token, claims)),
            Err(reason) => {
                warn!(%reason, "Discarding stored session token");
                self.clear();
                Err(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::storage::{FileTokenStorage, MemoryTokenStorage};
    use crate::auth::token::tests::token_with_payload;
    use serde_json::json;

    const NOW: i64 = 1_750_000_000;

    fn token_expiring_at(exp: i64) -> String {
        token_with_payload(&json!({ "exp": exp, "sub": "user-1" }))
    }

    fn store_at(now: i64) -> (SessionStore, Arc<MemoryTokenStorage>) {
        let storage = Arc::new(MemoryTokenStorage::new());
        let store = SessionStore::new(storage.clone()).with_clock(FixedClock(now));
        (store, storage)
    }

    #[test]
    fn test_future_expiry_returns_exact_token() {
        let (store, _) = store_at(NOW);
        let token = token_expiring_at(NOW + 3600);
        store.save(&token).unwrap();

        assert_eq!(store.read(), Some(token.clone()));
        assert_eq!(store.read(), Some(token));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_past_expiry_purges_storage() {
        let (store, storage) = store_at(NOW);
        store.save(&token_expiring_at(NOW - 1)).unwrap();

        assert_eq!(store.read(), None);
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_expiry_equal_to_now_is_expired() {
        let (store, storage) = store_at(NOW);
        store.save(&token_expiring_at(NOW)).unwrap();

        assert_eq!(store.require(), Err(SessionError::Expired));
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_clear_then_read_is_absent() {
        let (store, _) = store_at(NOW);
        store.clear();
        assert_eq!(store.read(), None);

        store.save(&token_expiring_at(NOW + 60)).unwrap();
        store.clear();
        assert_eq!(store.read(), None);
        assert_eq!(store.require(), Err(SessionError::Absent));
    }

    #[test]
    fn test_malformed_token_is_purged() {
        let (store, storage) = store_at(NOW);
        store.save("header.payload").unwrap();

        assert!(matches!(store.require(), Err(SessionError::Malformed(_))));
        assert_eq!(storage.load().unwrap(), None);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_save_overwrites_without_validation() {
        let (store, storage) = store_at(NOW);
        store.save("not-a-jwt").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("not-a-jwt"));

        let token = token_expiring_at(NOW + 10);
        store.save(&token).unwrap();
        assert_eq!(store.read(), Some(token));
    }

    #[test]
    fn test_claims_follow_validity() {
        let (store, _) = store_at(NOW);
        assert_eq!(store.claims(), None);

        store.save(&token_expiring_at(NOW + 90)).unwrap();
        let claims = store.claims().unwrap();
        assert_eq!(claims.sub.as_deref(), Some("user-1"));
        assert_eq!(claims.seconds_until_expiry(store.now()), 90);
    }

    #[test]
    fn test_token_expires_while_stored() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let token = token_expiring_at(NOW + 5);

        let early = SessionStore::new(storage.clone()).with_clock(FixedClock(NOW));
        early.save(&token).unwrap();
        assert!(early.is_authenticated());

        let late = SessionStore::new(storage.clone()).with_clock(FixedClock(NOW + 5));
        assert!(!late.is_authenticated());
        assert_eq!(early.read(), None);
    }

    #[test]
    fn test_token_unusable_in_header_is_purged() {
        let (store, storage) = store_at(NOW);
        store.save(&format!("{}\u{7}", token_expiring_at(NOW + 3600))).unwrap();

        assert!(matches!(store.require(), Err(SessionError::Malformed(_))));
        assert_eq!(storage.load().unwrap(), None);
    }

    #[test]
    fn test_expired_token_is_purged_from_prefs_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path());
        std::fs::write(storage.path(), r#"{"theme": "dark"}"#).unwrap();

        let store = SessionStore::new(FileTokenStorage::new(dir.path())).with_clock(FixedClock(NOW));
        store.save(&token_expiring_at(NOW - 1)).unwrap();
        assert!(std::fs::read_to_string(storage.path()).unwrap().contains("auth_token"));

        assert_eq!(store.read(), None);
        let prefs: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(storage.path()).unwrap()).unwrap();
        assert_eq!(prefs.get("auth_token"), None);
        assert_eq!(prefs["theme"], "dark");
    }

    #[test]
    fn test_file_session_survives_new_store() {
        let dir = tempfile::tempdir().unwrap();
        let token = token_expiring_at(NOW + 600);

        SessionStore::new(FileTokenStorage::new(dir.path()))
            .with_clock(FixedClock(NOW))
            .save(&token)
            .unwrap();

        let reopened = SessionStore::new(FileTokenStorage::new(dir.path())).with_clock(FixedClock(NOW));
        assert_eq!(reopened.read(), Some(token));
    }

    struct FailingStorage;

    impl TokenStorage for FailingStorage {
        fn load(&self) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("disk on fire"))
        }
        fn store(&self, _token: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
        fn remove(&self) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("disk on fire"))
        }
    }

    #[test]
    fn test_storage_failures_do_not_escape_reads() {
        let store = SessionStore::new(FailingStorage);
        assert_eq!(store.read(), None);
        assert!(matches!(store.require(), Err(SessionError::Storage(_))));
        store.clear();
        assert!(matches!(store.save("t"), Err(SessionError::Storage(_))));
    }
}
