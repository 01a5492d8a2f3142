//! Transcript message types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the author of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageRole {
    /// Interface-generated notice (session opened, etc.)
    System,
    /// Message written by the trainee
    Counselor,
    /// Message spoken by the simulated client
    Client,
}

/// A single message in a session transcript.
///
/// Messages are immutable once created and appended in order. Client
/// messages may carry an emotion tag and a complaint annotation supplied by
/// the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Author of the message
    pub role: MessageRole,
    /// Message text
    pub content: String,
    /// Timestamp when the message was created (ISO 8601 format)
    pub timestamp: String,
    /// Displayed emotion tag, if any
    #[serde(default)]
    pub emotion: Option<String>,
    /// Complaint annotation, if any
    #[serde(default)]
    pub complaint: Option<String>,
}

impl Message {
    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            emotion: None,
            complaint: None,
        }
    }

    /// Creates a system notice.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Creates a counselor message.
    pub fn counselor(content: impl Into<String>) -> Self {
        Self::new(MessageRole::Counselor, content)
    }

    /// Creates a client message with optional annotations.
    pub fn client(
        content: impl Into<String>,
        emotion: Option<String>,
        complaint: Option<String>,
    ) -> Self {
        Self {
            emotion,
            complaint,
            ..Self::new(MessageRole::Client, content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_role() {
        assert_eq!(Message::system("s").role, MessageRole::System);
        assert_eq!(Message::counselor("c").role, MessageRole::Counselor);
        assert_eq!(Message::client("r", None, None).role, MessageRole::Client);
    }

    #[test]
    fn test_client_message_carries_annotations() {
        let msg = Message::client("嗯...", Some("焦虑".to_string()), Some("失眠".to_string()));
        assert_eq!(msg.emotion.as_deref(), Some("焦虑"));
        assert_eq!(msg.complaint.as_deref(), Some("失眠"));
    }

    #[test]
    fn test_messages_get_unique_ids() {
        let a = Message::counselor("one");
        let b = Message::counselor("one");
        assert_ne!(a.id, b.id);
    }
}
