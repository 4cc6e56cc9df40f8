//! UI/backend events and error modeling for the grading form.

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    /// Blocking notice for the user, e.g. a missing rubric.
    Notice(String),
    SubmitControl {
        enabled: bool,
        label: String,
    },
    Output(String),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadDocument,
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn user_message(&self) -> String {
        match self.context {
            UiErrorContext::BackendStartup => format!(
                "The grading worker could not start; restart the app. ({})",
                self.message
            ),
            UiErrorContext::LoadDocument => {
                format!("Could not read the answer file: {}", self.message)
            }
        }
    }

    /// Whether the form can still be submitted after this error.
    pub fn is_recoverable(&self) -> bool {
        self.context != UiErrorContext::BackendStartup
    }
}
