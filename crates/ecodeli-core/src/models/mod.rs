//! Data models for EcoDeli marketplace entities.
//!
//! These mirror the remote GraphQL schema. Each fetch yields a fresh,
//! immutable snapshot; nothing here is cached or merged client side.
//!
//! - `Task`: a delivery (`SHIPPING`) or service (`SERVICE`) posting
//! - `TaskApplication`: a user's application to carry out a task
//! - `TaskMessage`: a message exchanged about a task
//! - `User`, `Address`, `Category`, `Shipping`: embedded records

pub mod address;
pub mod application;
pub mod message;
pub mod shipping;
pub mod task;
pub mod user;

pub use address::Address;
pub use application::{ApplicationStatus, TaskApplication};
pub use message::{MessageType, TaskMessage};
pub use shipping::{PackageCategory, Shipping};
pub use task::{Category, Task, TaskCompletion, TaskFilters, TaskStatus, TaskType};
pub use user::{Role, User};

/// Deserialize `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    use serde::Deserialize;
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Error returned when parsing an enum from user input fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseEnumError {}

/// Normalize user input like `in-progress` or `In Progress` to `IN_PROGRESS`.
pub(crate) fn normalize_variant(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_uppercase() })
        .collect()
}
