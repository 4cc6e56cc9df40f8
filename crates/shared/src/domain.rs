use std::fmt;

use crate::error::ValidationError;

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Grading criteria text. Never empty or whitespace-only; the original text
/// (surrounding whitespace included) is what gets sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rubric(String);

impl Rubric {
    pub fn parse(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::MissingRubric);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// The student's answer file as picked by the user.
#[derive(Clone, PartialEq, Eq)]
pub struct AnswerDocument {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AnswerDocument {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn pdf(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(file_name, PDF_MIME_TYPE, bytes)
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type.eq_ignore_ascii_case(PDF_MIME_TYPE)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Document bytes stay out of logs.
impl fmt::Debug for AnswerDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerDocument")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Outcome of one grading cycle. Replaced wholesale by the next cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationResult {
    Evaluated(String),
    Failed(String),
}

impl EvaluationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Evaluated(_))
    }

    /// Text for the output area: evaluations verbatim, failures prefixed.
    pub fn display_text(&self) -> String {
        match self {
            Self::Evaluated(evaluation) => evaluation.clone(),
            Self::Failed(message) => format!("Error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_rubrics_are_rejected() {
        for text in ["", " ", "\n\t  \r\n", "\u{3000}"] {
            assert_eq!(
                Rubric::parse(text),
                Err(ValidationError::MissingRubric),
                "{text:?}"
            );
        }
    }

    #[test]
    fn rubric_text_is_kept_verbatim() {
        let rubric = Rubric::parse("  Q1: mentions photosynthesis (2 pts)\n").expect("rubric");
        assert_eq!(rubric.as_str(), "  Q1: mentions photosynthesis (2 pts)\n");
    }

    #[test]
    fn display_text_prefixes_failures_only() {
        assert_eq!(
            EvaluationResult::Evaluated("Score: 8/10".into()).display_text(),
            "Score: 8/10"
        );
        assert_eq!(
            EvaluationResult::Failed("OCR failed".into()).display_text(),
            "Error: OCR failed"
        );
    }

    #[test]
    fn debug_output_omits_document_bytes() {
        let doc = AnswerDocument::pdf("answer.pdf", vec![0x25, 0x50, 0x44, 0x46]);
        let rendered = format!("{doc:?}");
        assert!(rendered.contains("len: 4"), "{rendered}");
        assert!(!rendered.contains("37"), "{rendered}");
    }
}
