use chrono::{ DateTime, Utc };
use serde::{ Serialize, Deserialize };
use uuid::Uuid;

/// Extra detail attached to bot replies that matched a topic.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageMetadata {
    pub confidence: f32,
    pub topic: String,
}

/// A single transcript entry. Immutable once created.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_user: true,
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    pub fn bot(text: impl Into<String>, metadata: Option<MessageMetadata>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_user: false,
            timestamp: Utc::now(),
            metadata,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Conversation {
    pub messages: Vec<Message>,
}
