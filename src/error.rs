use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed suggestion: {0}")]
    Suggestion(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("History error: {0}")]
    History(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl AceError {
    pub fn suggestion(message: impl Into<String>) -> Self {
        AceError::Suggestion(message.into())
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        AceError::Analysis(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            AceError::Io(e) => ErrorPayload::new(
                ErrorCategory::Config,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            AceError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Suggestion,
                e.to_string(),
                "Check that the input is valid JSON.",
            ),
            AceError::Suggestion(msg) => ErrorPayload::new(
                ErrorCategory::Suggestion,
                msg.to_string(),
                "The suggestion payload must contain a non-empty `changes` map; each change needs a `new` snippet.",
            ),
            AceError::Analysis(msg) => ErrorPayload::new(
                ErrorCategory::Analysis,
                msg.to_string(),
                "Check the HTML/CSS/JS inputs; analyzers degrade rather than fail, so this usually points at the request itself.",
            ),
            AceError::History(msg) => ErrorPayload::new(
                ErrorCategory::History,
                msg.to_string(),
                "Verify the history file is an object with `versions` and `cursor` fields.",
            ),
            AceError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("timeout") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set `analyzer_timeout_ms` to a positive integer.",
                    )
                } else if lower.contains("max_history") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set `max_history` to at least 1.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check the config file syntax (TOML) and field names.",
                    )
                }
            }
            AceError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, AceError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Suggestion,
    Analysis,
    History,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
