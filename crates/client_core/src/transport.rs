use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, StatusCode,
};
use shared::{
    domain::{AnswerDocument, Rubric},
    error::ApiError,
    protocol::{GradeResponse, ANSWER_DOCUMENT_FIELD, RUBRIC_FIELD},
};
use tracing::{info, warn};
use url::Url;

use crate::{error::SubmissionError, settings::ClientSettings};

/// A validated submission, ready to be sent.
#[derive(Debug, Clone)]
pub struct GradeRequest {
    pub rubric: Rubric,
    pub document: AnswerDocument,
}

#[async_trait]
pub trait GradingTransport: Send + Sync {
    /// Sends one grading request and returns the evaluation text.
    async fn grade(&self, request: GradeRequest) -> Result<String, SubmissionError>;
}

pub struct HttpGradingClient {
    http: Client,
    endpoint: Url,
}

impl HttpGradingClient {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.grading_endpoint.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

// reqwest derives the multipart boundary and Content-Type header itself.
fn build_form(request: GradeRequest) -> Result<Form, SubmissionError> {
    let GradeRequest { rubric, document } = request;
    let part = Part::bytes(document.bytes)
        .file_name(document.file_name)
        .mime_str(&document.mime_type)
        .map_err(|err| {
            SubmissionError::Transport(format!(
                "invalid MIME type '{}' for answer document: {err}",
                document.mime_type
            ))
        })?;

    Ok(Form::new()
        .text(RUBRIC_FIELD, rubric.into_inner())
        .part(ANSWER_DOCUMENT_FIELD, part))
}

/// Maps a grading response onto the evaluation text or a typed failure.
pub(crate) fn decode_grade_response(
    status: StatusCode,
    body: &[u8],
) -> Result<String, SubmissionError> {
    if !status.is_success() {
        let message = ApiError::from_body(body).message_or_default().to_string();
        warn!(status = status.as_u16(), %message, "grading service returned an error");
        return Err(SubmissionError::Server {
            status: status.as_u16(),
            message,
        });
    }

    let response: GradeResponse = serde_json::from_slice(body)
        .map_err(|err| SubmissionError::Decode(format!("invalid grading response: {err}")))?;
    Ok(response.evaluation)
}

#[async_trait]
impl GradingTransport for HttpGradingClient {
    async fn grade(&self, request: GradeRequest) -> Result<String, SubmissionError> {
        let file_name = request.document.file_name.clone();
        let document_bytes = request.document.len();
        let rubric_chars = request.rubric.as_str().chars().count();
        let form = build_form(request)?;

        info!(
            endpoint = %self.endpoint,
            %file_name,
            document_bytes,
            rubric_chars,
            "submitting answer for grading"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        info!(status = status.as_u16(), body_bytes = body.len(), "grading response received");

        decode_grade_response(status, &body)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
