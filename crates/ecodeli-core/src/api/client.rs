//! GraphQL client for the EcoDeli backend.
//!
//! This module provides the `ApiClient` struct, which executes one operation
//! per call against the GraphQL endpoint and unwraps the response envelope
//! into typed results. Each call makes exactly one attempt: retry policy
//! belongs to the caller.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::graphql::{GraphQLRequest, GraphQLResponse, Variables};
use super::{queries, ApiError};
use crate::auth::{SessionError, SessionStore};
use crate::models::{Task, TaskApplication, TaskCompletion, TaskFilters, User};

/// HTTP request timeout in seconds.
/// Only guards against dead connections; it is never retried.
const REQUEST_TIMEOUT_SECS: u64 = 30;

const JSON_CONTENT_TYPE: &str = "application/json";

/// API client for the EcoDeli GraphQL endpoint.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a new API client posting to `endpoint`
    pub fn new(endpoint: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            session,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(JSON_CONTENT_TYPE));
        if let Some(token) = self.session.read() {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                SessionError::Malformed("token is not a valid header value".to_string())
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Execute an operation document and decode its `data` payload into `T`.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Option<Variables>,
    ) -> Result<T, ApiError> {
        let request = match variables {
            Some(variables) => GraphQLRequest::new(document).with_variables(variables),
            None => GraphQLRequest::new(document),
        };
        self.execute_request(&request).await
    }

    pub async fn execute_request<T: DeserializeOwned>(
        &self,
        request: &GraphQLRequest,
    ) -> Result<T, ApiError> {
        let operation = request.operation_name().unwrap_or("anonymous");
        let headers = self.auth_headers()?;
        debug!(
            operation,
            authenticated = headers.contains_key(header::AUTHORIZATION),
            "Sending GraphQL request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .json(request)
            .send()
            .await
            .inspect_err(|e| warn!(operation, error = %e, "GraphQL request failed to send"))?;

        let response = Self::check_response(response)
            .await
            .inspect_err(|e| warn!(operation, error = %e, "GraphQL transport error"))?;

        let body = response.text().await?;
        let envelope: GraphQLResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(operation, error = %e, "Response is not a GraphQL envelope");
            ApiError::Decode(format!("response is not a GraphQL envelope: {}", e))
        })?;

        envelope.into_result().inspect_err(|e| match e {
            ApiError::Protocol { errors, .. } => {
                warn!(operation, count = errors.len(), error = %e, "GraphQL errors returned")
            }
            _ => warn!(operation, error = %e, "Failed to decode GraphQL data"),
        })
    }

    // ===== Session =====

    /// Exchange credentials for a session token and persist it.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let variables = variables(json!({
            "input": { "email": email, "password": password }
        }));
        let response: LoginResponse = self.execute(queries::LOGIN, variables).await?;

        let token = response
            .login
            .and_then(|payload| payload.token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Decode("login response contained no token".to_string()))?;

        self.session.save(&token)?;
        debug!("Logged in");
        Ok(token)
    }

    /// Forget the current session. No request is made.
    pub fn logout(&self) {
        self.session.clear();
    }

    // ===== Data Fetching Methods =====

    /// Fetch the logged-in user
    pub async fn me(&self) -> Result<User, ApiError> {
        let response: MeResponse = self.execute(queries::GET_ME, None).await?;
        Ok(response.me)
    }

    /// Fetch published tasks, optionally filtered by type and status
    pub async fn list_tasks(&self, filters: Option<TaskFilters>) -> Result<Vec<Task>, ApiError> {
        let variables = filters
            .filter(|f| !f.is_empty())
            .and_then(|f| variables(json!({ "filters": f })));
        let response: ListTasksResponse = self.execute(queries::LIST_TASKS, variables).await?;
        debug!(count = response.list_tasks.len(), "Fetched tasks");
        Ok(response.list_tasks)
    }

    /// Fetch the tasks created by the logged-in user
    pub async fn my_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response: MyTasksResponse = self.execute(queries::GET_MY_TASKS, None).await?;
        debug!(count = response.get_my_tasks.len(), "Fetched my tasks");
        Ok(response.get_my_tasks)
    }

    /// Fetch the logged-in user's applications to other users' tasks
    pub async fn my_applications(&self) -> Result<Vec<TaskApplication>, ApiError> {
        let response: MyApplicationsResponse =
            self.execute(queries::GET_MY_APPLICATIONS, None).await?;
        debug!(count = response.get_my_applications.len(), "Fetched my applications");
        Ok(response.get_my_applications)
    }

    /// Fetch one task with its applications and messages
    pub async fn task(&self, id: &str) -> Result<Task, ApiError> {
        let response: TaskResponse = self
            .execute(queries::GET_TASK, variables(json!({ "id": id })))
            .await?;
        Ok(response.get_task)
    }

    /// Confirm a task was carried out, using the code handed over on completion
    pub async fn validate_task_completion(
        &self,
        task_id: &str,
        validation_code: &str,
    ) -> Result<TaskCompletion, ApiError> {
        let variables = variables(json!({
            "taskId": task_id,
            "validationCode": validation_code,
        }));
        let response: ValidateResponse = self
            .execute(queries::VALIDATE_TASK_COMPLETION, variables)
            .await?;
        response.validate_task_completion.ok_or_else(|| {
            ApiError::Decode("validateTaskCompletion returned no task".to_string())
        })
    }

    /// Mark every message of a task as read
    pub async fn mark_messages_as_read(&self, task_id: &str) -> Result<bool, ApiError> {
        let response: MarkReadResponse = self
            .execute(queries::MARK_MESSAGES_AS_READ, variables(json!({ "taskId": task_id })))
            .await?;
        Ok(response.mark_messages_as_read.unwrap_or(true))
    }
}

/// Turn a `json!` object literal into a variable map.
fn variables(value: Value) -> Option<Variables> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

// Internal response types, one per operation

#[derive(Debug, Deserialize)]
struct LoginResponse {
    login: Option<LoginPayload>,
}

#[derive(Debug, Deserialize)]
struct LoginPayload {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    me: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListTasksResponse {
    list_tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyTasksResponse {
    get_my_tasks: Vec<Task>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyApplicationsResponse {
    get_my_applications: Vec<TaskApplication>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskResponse {
    get_task: Task,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateResponse {
    validate_task_completion: Option<TaskCompletion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkReadResponse {
    mark_messages_as_read: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStorage;
    use crate::models::TaskType;

    fn client() -> ApiClient {
        let session = Arc::new(SessionStore::new(MemoryTokenStorage::new()));
        ApiClient::new("http://127.0.0.1:9/graphql", session).unwrap()
    }

    #[test]
    fn test_variables_helper() {
        let map = variables(json!({ "id": "t1" })).unwrap();
        assert_eq!(map.get("id"), Some(&json!("t1")));
        assert!(variables(json!(["not", "an", "object"])).is_none());
    }

    #[test]
    fn test_anonymous_headers() {
        let headers = client().auth_headers().unwrap();
        assert!(!headers.contains_key(header::AUTHORIZATION));
        assert_eq!(headers[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(headers[header::ACCEPT], JSON_CONTENT_TYPE);
    }

    #[test]
    fn test_filters_become_variables() {
        let filters = TaskFilters::of_type(TaskType::Service);
        let vars = variables(json!({ "filters": filters })).unwrap();
        assert_eq!(Value::Object(vars), json!({ "filters": { "type": "SERVICE" } }));
    }

    #[test]
    fn test_null_mutation_payloads() {
        let response: MarkReadResponse =
            serde_json::from_value(json!({ "markMessagesAsRead": null })).unwrap();
        assert_eq!(response.mark_messages_as_read, None);

        let response: LoginResponse = serde_json::from_value(json!({ "login": null })).unwrap();
        assert!(response.login.is_none());
    }
}
