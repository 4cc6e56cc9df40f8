use std::{error::Error as StdError, io, path::PathBuf};

use shared::error::ValidationError;
use thiserror::Error;

/// Everything that can end a grading cycle without an evaluation.
///
/// The `Display` text is what the user sees after the `"Error: "` prefix, so
/// variants render their message alone.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Decode(String),
}

impl SubmissionError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Transport(_) => "transport",
            Self::Server { .. } => "server",
            Self::Decode(_) => "decode",
        }
    }
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        let message = error_chain(&err);
        if err.is_decode() {
            Self::Decode(message)
        } else {
            Self::Transport(message)
        }
    }
}

/// reqwest keeps the useful part ("connection refused") in the source chain.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(
        "grading endpoint is not configured; pass --endpoint, set GRADER_ENDPOINT, or add `grading_endpoint` to grader.toml"
    )]
    MissingEndpoint,
    #[error("invalid grading endpoint '{value}': {reason}")]
    InvalidEndpoint { value: String, reason: String },
    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("'{}' does not name a file", path.display())]
    NoFileName { path: PathBuf },
    #[error("failed to read answer document '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
