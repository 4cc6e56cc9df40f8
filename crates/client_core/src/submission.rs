//! Submission lifecycle: `Idle -> Submitting -> {Succeeded, Failed} -> Idle`.
//!
//! One controller serves one form. It reads inputs through [`SubmissionView`],
//! sends at most one request at a time through [`GradingTransport`], and always
//! hands the submit control back to the user when a cycle ends.

use std::{
    ops::{Deref, DerefMut},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use shared::{
    domain::{AnswerDocument, EvaluationResult, Rubric},
    error::ValidationError,
};
use tracing::{debug, info, warn};

use crate::transport::{GradeRequest, GradingTransport};

pub const SUBMIT_LABEL: &str = "Grade Answer";
pub const SUBMITTING_LABEL: &str = "Grading...";
pub const PROGRESS_MESSAGE: &str = "Processing PDF and grading... This may take a minute or two.";

/// What the controller needs from whatever renders the form.
pub trait SubmissionView {
    fn rubric_text(&self) -> String;
    fn selected_document(&self) -> Option<AnswerDocument>;
    /// Immediate notice for input problems (an alert, a stderr line).
    fn notify(&mut self, message: &str);
    fn set_submit_enabled(&mut self, enabled: bool, label: &str);
    fn display(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Inputs were invalid; nothing was sent.
    Rejected(ValidationError),
    /// Another cycle is still in flight; nothing was sent.
    Busy,
    Completed(EvaluationResult),
}

pub fn validate_submission(
    rubric_text: String,
    document: Option<AnswerDocument>,
) -> Result<(Rubric, AnswerDocument), ValidationError> {
    let rubric = Rubric::parse(rubric_text)?;
    let document = document.ok_or(ValidationError::MissingDocument)?;
    Ok((rubric, document))
}

pub struct SubmissionController {
    transport: Arc<dyn GradingTransport>,
    in_flight: AtomicBool,
    last_result: Mutex<Option<EvaluationResult>>,
}

impl SubmissionController {
    pub fn new(transport: Arc<dyn GradingTransport>) -> Self {
        Self {
            transport,
            in_flight: AtomicBool::new(false),
            last_result: Mutex::new(None),
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        if self.is_in_flight() {
            SubmissionPhase::Submitting
        } else {
            SubmissionPhase::Idle
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn last_result(&self) -> Option<EvaluationResult> {
        self.last_result
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs one full cycle against `view`.
    ///
    /// The submit control is disabled before the request goes out and is
    /// re-enabled with its original label on every exit path, including the
    /// returned future being dropped mid-request.
    pub async fn submit<V>(&self, view: &mut V) -> SubmitOutcome
    where
        V: SubmissionView + ?Sized,
    {
        let Some(_in_flight) = InFlightGuard::acquire(&self.in_flight) else {
            debug!("submit ignored; a grading request is already in flight");
            return SubmitOutcome::Busy;
        };

        let (rubric, document) =
            match validate_submission(view.rubric_text(), view.selected_document()) {
                Ok(valid) => valid,
                Err(reason) => {
                    info!(%reason, "submission blocked by validation");
                    view.notify(&reason.to_string());
                    return SubmitOutcome::Rejected(reason);
                }
            };

        view.display(PROGRESS_MESSAGE);
        view.set_submit_enabled(false, SUBMITTING_LABEL);
        let mut view = RestoreSubmitControl { view };

        let result = match self.transport.grade(GradeRequest { rubric, document }).await {
            Ok(evaluation) => {
                info!(evaluation_chars = evaluation.chars().count(), "grading succeeded");
                EvaluationResult::Evaluated(evaluation)
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "grading failed");
                EvaluationResult::Failed(err.to_string())
            }
        };

        view.display(&result.display_text());
        *self
            .last_result
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(result.clone());
        SubmitOutcome::Completed(result)
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Re-enables the submit control when dropped.
struct RestoreSubmitControl<'a, V: SubmissionView + ?Sized> {
    view: &'a mut V,
}

impl<V: SubmissionView + ?Sized> Deref for RestoreSubmitControl<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: SubmissionView + ?Sized> DerefMut for RestoreSubmitControl<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: SubmissionView + ?Sized> Drop for RestoreSubmitControl<'_, V> {
    fn drop(&mut self) {
        self.view.set_submit_enabled(true, SUBMIT_LABEL);
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;
