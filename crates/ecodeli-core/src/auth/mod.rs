//! Authentication module for managing the client session.
//!
//! This module provides:
//! - `SessionStore`: the single source of truth for "is this client
//!   authenticated", purging expired or malformed tokens on read
//! - `TokenStorage`: durable storage for the token, with file, OS keychain
//!   and in-memory backends
//! - `TokenClaims`: the unverified claims embedded in a session JWT
//!
//! The store is passed explicitly to whoever needs it; there is no global
//! session.

pub mod credentials;
pub mod session;
pub mod storage;
pub mod token;

use thiserror::Error;

pub use credentials::KeyringTokenStorage;
pub use session::{Clock, FixedClock, SessionStore, SystemClock};
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
pub use token::TokenClaims;

/// Why the session could not produce a usable token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Not logged in")]
    Absent,

    #[error("Session expired - please log in again")]
    Expired,

    #[error("Stored session token is invalid: {0}")]
    Malformed(String),

    #[error("Session storage failed: {0}")]
    Storage(String),
}
