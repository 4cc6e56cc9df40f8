use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when the grading service fails without saying why.
pub const UNKNOWN_SERVER_ERROR: &str = "An unknown server error occurred.";

/// Error body the grading service attaches to a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Decodes an error body leniently: anything that is not an object with a
    /// string `error` field yields an empty `ApiError`.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn message_or_default(&self) -> &str {
        match self.error.as_deref() {
            Some(message) if !message.trim().is_empty() => message,
            _ => UNKNOWN_SERVER_ERROR,
        }
    }
}

/// Input problems that block a submission before anything is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please paste the rubric.")]
    MissingRubric,
    #[error("Please upload the student's answer PDF.")]
    MissingDocument,
}
