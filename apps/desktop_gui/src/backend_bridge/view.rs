//! `SubmissionView` adapter that forwards everything to the egui thread.

use client_core::SubmissionView;
use crossbeam_channel::Sender;
use shared::domain::AnswerDocument;

use crate::controller::events::UiEvent;

/// Form inputs captured when the grade button was clicked; output flows back
/// to the UI as events.
pub struct ChannelView {
    rubric: String,
    document: Option<AnswerDocument>,
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(rubric: String, document: Option<AnswerDocument>, ui_tx: Sender<UiEvent>) -> Self {
        Self {
            rubric,
            document,
            ui_tx,
        }
    }

    fn emit(&self, event: UiEvent) {
        if self.ui_tx.send(event).is_err() {
            tracing::debug!("ui event dropped; window already closed");
        }
    }
}

impl SubmissionView for ChannelView {
    fn rubric_text(&self) -> String {
        self.rubric.clone()
    }

    fn selected_document(&self) -> Option<AnswerDocument> {
        self.document.clone()
    }

    fn notify(&mut self, message: &str) {
        self.emit(UiEvent::Notice(message.to_string()));
    }

    fn set_submit_enabled(&mut self, enabled: bool, label: &str) {
        self.emit(UiEvent::SubmitControl {
            enabled,
            label: label.to_string(),
        });
    }

    fn display(&mut self, text: &str) {
        self.emit(UiEvent::Output(text.to_string()));
    }
}
