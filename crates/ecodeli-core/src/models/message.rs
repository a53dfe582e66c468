use serde::{Deserialize, Serialize};

use super::{null_as_default, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Text,
    ValidationCode,
    System,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Text => write!(f, "Message"),
            MessageType::ValidationCode => write!(f, "Code de validation"),
            MessageType::System => write!(f, "Système"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMessage {
    pub id: String,
    pub task_id: Option<String>,
    pub sender_id: Option<String>,
    pub sender: Option<User>,
    pub receiver_id: Option<String>,
    pub receiver: Option<User>,
    pub content: String,
    pub message_type: MessageType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_read: bool,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_parses() {
        let json = r#"{"id":"m1","content":"Votre code : 4821","messageType":"VALIDATION_CODE","isRead":false,"createdAt":"2025-03-05T10:00:00.000Z","sender":{"id":"u1","firstName":"Jane","lastName":"Doe"},"receiver":{"id":"u2","firstName":"Sam","lastName":"Roe"}}"#;
        let message: TaskMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.message_type, MessageType::ValidationCode);
        assert!(!message.is_read);
        assert_eq!(message.sender.unwrap().full_name(), "Jane Doe");
    }

    #[test]
    fn test_missing_or_null_read_flag_is_unread() {
        let null: TaskMessage =
            serde_json::from_str(r#"{"id":"m1","content":"Bonjour","messageType":"TEXT","isRead":null}"#).unwrap();
        assert!(!null.is_read);

        let missing: TaskMessage =
            serde_json::from_str(r#"{"id":"m2","content":"Bonjour","messageType":"TEXT"}"#).unwrap();
        assert!(!missing.is_read);
    }
}
