use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("topic table error: {0}")]
    InvalidTopics(String),

    #[error("unsupported storage type: {0}")]
    UnsupportedStorage(String),

    #[error("contact mailer is not configured")]
    ContactNotConfigured,

    #[error("contact send rejected with status {0}")]
    ContactStatus(reqwest::StatusCode),

    #[error("contact request failed: {0}")]
    ContactRequest(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
