//! Form state and how backend events change it.

use std::path::PathBuf;

use client_core::{SUBMITTING_LABEL, SUBMIT_LABEL};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub struct FormState {
    pub rubric: String,
    pub answer_path: Option<PathBuf>,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub output: Option<String>,
    pub notice: Option<String>,
    pub status: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            rubric: String::new(),
            answer_path: None,
            submit_enabled: true,
            submit_label: SUBMIT_LABEL.to_string(),
            output: None,
            notice: None,
            status: "Starting grading worker...".to_string(),
        }
    }
}

impl FormState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::Notice(message) => {
                self.notice = Some(message);
            }
            UiEvent::SubmitControl { enabled, label } => {
                self.submit_enabled = enabled;
                self.submit_label = label;
                self.status = if enabled {
                    "Ready".to_string()
                } else {
                    "Waiting for the grading service".to_string()
                };
            }
            UiEvent::Output(text) => {
                self.output = Some(text);
            }
            UiEvent::Error(err) => {
                tracing::warn!(context = ?err.context(), message = err.message(), "backend error");
                if !err.is_recoverable() {
                    self.submit_enabled = false;
                }
                self.status = err.user_message();
                self.notice = Some(err.user_message());
            }
        }
    }

    pub fn answer_file_label(&self) -> String {
        self.answer_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "No file selected".to_string())
    }

    /// Disables the button for the click that produced the command. The
    /// backend re-enables it when the cycle ends, however it ends.
    pub fn begin_submit(&mut self) -> BackendCommand {
        self.submit_enabled = false;
        self.submit_label = SUBMITTING_LABEL.to_string();
        BackendCommand::Grade {
            rubric: self.rubric.clone(),
            answer_path: self.answer_path.clone(),
        }
    }

    /// The command never reached the backend, so nothing will re-enable the
    /// button but this.
    pub fn submit_not_queued(&mut self, reason: impl Into<String>) {
        self.submit_enabled = true;
        self.submit_label = SUBMIT_LABEL.to_string();
        self.status = reason.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::events::{UiError, UiErrorContext};
    use client_core::PROGRESS_MESSAGE;

    #[test]
    fn busy_cycle_disables_then_restores_the_button() {
        let mut form = FormState::default();

        form.apply(UiEvent::Output(PROGRESS_MESSAGE.to_string()));
        form.apply(UiEvent::SubmitControl {
            enabled: false,
            label: SUBMITTING_LABEL.to_string(),
        });
        assert!(!form.submit_enabled);
        assert_eq!(form.submit_label, "Grading...");
        assert_eq!(form.output.as_deref(), Some(PROGRESS_MESSAGE));

        form.apply(UiEvent::Output("Score: 8/10".to_string()));
        form.apply(UiEvent::SubmitControl {
            enabled: true,
            label: SUBMIT_LABEL.to_string(),
        });
        assert!(form.submit_enabled);
        assert_eq!(form.submit_label, "Grade Answer");
        assert_eq!(form.output.as_deref(), Some("Score: 8/10"));
    }

    #[test]
    fn notices_do_not_touch_the_output_area() {
        let mut form = FormState {
            output: Some("Score: 8/10".into()),
            ..FormState::default()
        };
        form.apply(UiEvent::Notice("Please paste the rubric.".into()));
        assert_eq!(form.notice.as_deref(), Some("Please paste the rubric."));
        assert_eq!(form.output.as_deref(), Some("Score: 8/10"));
        assert!(form.submit_enabled);
    }

    #[test]
    fn startup_failure_disables_submission() {
        let mut form = FormState::default();
        form.apply(UiEvent::Error(UiError::new(
            UiErrorContext::BackendStartup,
            "no runtime",
        )));
        assert!(!form.submit_enabled);
        assert!(form.notice.is_some());
    }

    #[test]
    fn document_errors_keep_the_form_usable() {
        let mut form = FormState::default();
        form.apply(UiEvent::Error(UiError::new(
            UiErrorContext::LoadDocument,
            "permission denied",
        )));
        assert!(form.submit_enabled);
        assert_eq!(
            form.notice.as_deref(),
            Some("Could not read the answer file: permission denied")
        );
    }

    #[test]
    fn click_disables_the_button_before_the_backend_answers() {
        let mut form = FormState {
            rubric: "Answer must mention photosynthesis".into(),
            answer_path: Some(PathBuf::from("answer.pdf")),
            ..FormState::default()
        };

        let BackendCommand::Grade {
            rubric,
            answer_path,
        } = form.begin_submit();
        assert_eq!(rubric, "Answer must mention photosynthesis");
        assert_eq!(answer_path, Some(PathBuf::from("answer.pdf")));
        assert!(!form.submit_enabled);
        assert_eq!(form.submit_label, SUBMITTING_LABEL);
    }

    #[test]
    fn rejected_click_is_restored_by_the_backend() {
        let mut form = FormState::default();
        form.begin_submit();

        form.apply(UiEvent::Notice("Please paste the rubric.".into()));
        assert!(!form.submit_enabled);
        form.apply(UiEvent::SubmitControl {
            enabled: true,
            label: SUBMIT_LABEL.to_string(),
        });
        assert!(form.submit_enabled);
        assert_eq!(form.submit_label, SUBMIT_LABEL);
    }

    #[test]
    fn unqueued_click_restores_the_button() {
        let mut form = FormState::default();
        form.begin_submit();
        form.submit_not_queued("queue is full");
        assert!(form.submit_enabled);
        assert_eq!(form.submit_label, SUBMIT_LABEL);
        assert_eq!(form.status, "queue is full");
    }

    #[test]
    fn file_label_shows_only_the_file_name() {
        let mut form = FormState::default();
        assert_eq!(form.answer_file_label(), "No file selected");
        form.answer_path = Some(PathBuf::from("/home/teacher/scans/answer-07.pdf"));
        assert_eq!(form.answer_file_label(), "answer-07.pdf");
    }
}
