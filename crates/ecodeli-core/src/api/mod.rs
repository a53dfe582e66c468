//! GraphQL gateway for the EcoDeli backend.
//!
//! This module provides the `ApiClient` for executing queries and mutations
//! against the single GraphQL endpoint, plus the typed marketplace operations
//! (tasks, applications, messages, login) built on top of it.
//!
//! Requests carry the session's JWT as a bearer token when one is present.

pub mod client;
pub mod error;
pub mod graphql;
pub mod queries;

pub use client::ApiClient;
pub use error::ApiError;
pub use graphql::{GraphQLError, GraphQLRequest, GraphQLResponse, Location, PathSegment, Variables};
