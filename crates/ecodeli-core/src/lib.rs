//! Core library for the EcoDeli client.
//!
//! This crate contains everything beneath the screens of the EcoDeli
//! delivery and service marketplace client:
//!
//! - `api`: the GraphQL gateway (`ApiClient`) and the marketplace operations
//! - `auth`: the token-based `SessionStore` and its storage backends
//! - `models`: typed records mirroring the remote schema
//! - `config`: endpoint and storage configuration
//! - `styles`: the label and colour mapping shared by every status chip
//! - `utils`: formatting helpers for prices, durations and dates

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod styles;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{SessionError, SessionStore};
pub use config::{Config, StorageBackend};
