use serde::{Deserialize, Serialize};

/// Path appended to a configured base URL that has none of its own.
pub const GRADE_PATH: &str = "/grade";

/// Multipart field carrying the rubric text.
pub const RUBRIC_FIELD: &str = "rubric";

/// Multipart field carrying the answer document bytes.
pub const ANSWER_DOCUMENT_FIELD: &str = "student_answer_pdf";

/// Body of a successful `POST /grade`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResponse {
    pub evaluation: String,
}
