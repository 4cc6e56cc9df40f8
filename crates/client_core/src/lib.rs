//! Grading client core: validates a rubric and answer document, submits them
//! to the grading service as one multipart POST, and maps the outcome onto
//! what the form shows.

pub mod document;
pub mod error;
pub mod settings;
pub mod submission;
pub mod transport;

pub use document::{load_answer_document, load_selected_document};
pub use error::{DocumentError, SettingsError, SubmissionError};
pub use settings::{load_settings, parse_grading_endpoint, ClientSettings, SettingsOverrides};
pub use submission::{
    validate_submission, SubmissionController, SubmissionPhase, SubmissionView, SubmitOutcome,
    PROGRESS_MESSAGE, SUBMITTING_LABEL, SUBMIT_LABEL,
};
pub use transport::{GradeRequest, GradingTransport, HttpGradingClient};
