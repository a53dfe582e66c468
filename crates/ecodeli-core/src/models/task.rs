use serde::{Deserialize, Serialize};

use super::{normalize_variant, Address, ParseEnumError, Shipping, TaskApplication, TaskMessage, User};
use crate::utils::format_price;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    Service,
    Shipping,
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskType::Service => write!(f, "Prestation"),
            TaskType::Shipping => write!(f, "Livraison"),
        }
    }
}

impl std::str::FromStr for TaskType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "SERVICE" => Ok(TaskType::Service),
            "SHIPPING" => Ok(TaskType::Shipping),
            _ => Err(ParseEnumError::new("task type", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Draft,
    Published,
    InProgress,
    Completed,
    Done,
    Cancelled,
}

impl TaskStatus {
    /// Completed by the carrier but not yet confirmed with a validation code.
    pub fn awaiting_validation(&self) -> bool {
        matches!(self, TaskStatus::InProgress | TaskStatus::Completed)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.badge().label)
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "DRAFT" => Ok(TaskStatus::Draft),
            "PUBLISHED" => Ok(TaskStatus::Published),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "COMPLETED" => Ok(TaskStatus::Completed),
            "DONE" => Ok(TaskStatus::Done),
            "CANCELLED" => Ok(TaskStatus::Cancelled),
            _ => Err(ParseEnumError::new("task status", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    /// Hex colour chosen by the back office, e.g. `#4CAF50`
    pub color: Option<String>,
    pub amount_in_cents: Option<i64>,
    pub file_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub address: Address,
    pub user: Option<User>,
    pub category: Option<Category>,
    pub shipping: Option<Shipping>,
    pub applications: Option<Vec<TaskApplication>>,
    pub messages: Option<Vec<TaskMessage>>,
    pub calculated_price_in_cents: Option<i64>,
    pub file_url: Option<String>,
    pub completed_at: Option<String>,
    pub validated_at: Option<String>,
    pub estimated_duration: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Task {
    pub fn applications(&self) -> &[TaskApplication] {
        self.applications.as_deref().unwrap_or_default()
    }

    pub fn messages(&self) -> &[TaskMessage] {
        self.messages.as_deref().unwrap_or_default()
    }

    pub fn unread_messages(&self) -> usize {
        self.messages().iter().filter(|m| !m.is_read).count()
    }

    pub fn price_display(&self) -> String {
        format_price(self.calculated_price_in_cents)
    }

    pub fn is_shipping(&self) -> bool {
        self.task_type == TaskType::Shipping
    }
}

/// Filters accepted by `listTasks`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskFilters {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskFilters {
    pub fn of_type(task_type: TaskType) -> Self {
        Self {
            task_type: Some(task_type),
            status: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.task_type.is_none() && self.status.is_none()
    }
}

/// Result of `validateTaskCompletion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    pub id: String,
    pub status: TaskStatus,
    pub validated_at: Option<String>,
}
