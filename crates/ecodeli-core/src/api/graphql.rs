//! Wire types for the GraphQL request and response envelopes.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;

/// Named variables sent alongside an operation document.
pub type Variables = serde_json::Map<String, Value>;

/// Body of a single POST to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Variables>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
        }
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Operation name declared by the document, e.g. `GetMe` for
    /// `query GetMe { ... }`. Anonymous documents yield `None`.
    pub fn operation_name(&self) -> Option<&str> {
        operation_name(&self.query)
    }
}

pub(crate) fn operation_name(document: &str) -> Option<&str> {
    let mut tokens = document.split_whitespace();
    match tokens.next()? {
        "query" | "mutation" | "subscription" => {}
        _ => return None,
    }
    let name = tokens.next()?;
    let end = name.find(|c: char| c == '(' || c == '{').unwrap_or(name.len());
    let name = &name[..end];
    (!name.is_empty()).then_some(name)
}

/// The `{data, errors}` wrapper every GraphQL response arrives in.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T = Value> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl GraphQLResponse<Value> {
    /// Unwrap the envelope into the caller's expected shape.
    ///
    /// A non-empty error list always wins over a data payload, and the
    /// failure carries the first error's message verbatim. Any mismatch
    /// between `data` and `T` is a decode failure.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let message = errors[0].message.clone();
            return Err(ApiError::Protocol { message, errors });
        }

        let data = self.data.unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Location>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<PathSegment>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl std::fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            let joined: Vec<String> = path.iter().map(ToString::to_string).collect();
            write!(f, " (at {})", joined.join("."))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// One step of an error path: a field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(u64),
}

impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}
