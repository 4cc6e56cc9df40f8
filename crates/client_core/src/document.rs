use std::path::Path;

use shared::domain::{AnswerDocument, Rubric, PDF_MIME_TYPE};
use tracing::{debug, warn};

use crate::error::DocumentError;

/// Reads the answer file picked by the user. The MIME type is guessed from the
/// extension; unknown extensions are sent as PDF.
pub async fn load_answer_document(path: impl AsRef<Path>) -> Result<AnswerDocument, DocumentError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| DocumentError::NoFileName {
            path: path.to_path_buf(),
        })?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| PDF_MIME_TYPE.to_string());

    let document = AnswerDocument::new(file_name, mime_type, bytes);
    if !document.is_pdf() {
        warn!(
            file_name = %document.file_name,
            mime_type = %document.mime_type,
            "answer document does not look like a PDF; sending it anyway"
        );
    }
    debug!(file_name = %document.file_name, bytes = document.len(), "loaded answer document");
    Ok(document)
}

/// Loads the picked answer file only once the rubric is known to be valid, so
/// a blank rubric is reported before any file problem. Returns `None` when
/// nothing was picked or the rubric is blank; the controller then rejects the
/// submission with the right notice.
pub async fn load_selected_document(
    rubric_text: &str,
    answer_path: Option<&Path>,
) -> Result<Option<AnswerDocument>, DocumentError> {
    let Some(path) = answer_path else {
        return Ok(None);
    };
    if Rubric::parse(rubric_text).is_err() {
        debug!("rubric is blank; answer document not read");
        return Ok(None);
    }
    load_answer_document(path).await.map(Some)
}
