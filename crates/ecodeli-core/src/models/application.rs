use serde::{Deserialize, Serialize};

use super::{normalize_variant, ParseEnumError, Task, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Validated,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.badge().label)
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_variant(s).as_str() {
            "PENDING" => Ok(ApplicationStatus::Pending),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            "COMPLETED" => Ok(ApplicationStatus::Completed),
            "VALIDATED" => Ok(ApplicationStatus::Validated),
            _ => Err(ParseEnumError::new("application status", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskApplication {
    pub id: String,
    pub task_id: Option<String>,
    pub applicant_id: Option<String>,
    pub applicant: Option<User>,
    pub task: Option<Box<Task>>,
    pub status: ApplicationStatus,
    pub message: Option<String>,
    /// Code the task owner hands over to confirm completion
    pub validation_code: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub validated_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl TaskApplication {
    /// Accepted and carried out, but not yet validated by the owner.
    pub fn is_active(&self) -> bool {
        matches!(self.status, ApplicationStatus::Accepted | ApplicationStatus::Completed)
    }
}
