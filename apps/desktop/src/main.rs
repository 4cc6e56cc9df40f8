use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use client_core::{
    load_selected_document, load_settings, HttpGradingClient, SettingsOverrides,
    SubmissionController, SubmissionView, SubmitOutcome, PROGRESS_MESSAGE,
};
use shared::domain::AnswerDocument;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Grade a student's answer PDF against a rubric.
#[derive(Parser, Debug)]
#[command(name = "grade", group(ArgGroup::new("rubric_source").args(["rubric", "rubric_file"])))]
struct Args {
    /// Rubric text.
    #[arg(long)]
    rubric: Option<String>,
    /// File containing the rubric text.
    #[arg(long)]
    rubric_file: Option<PathBuf>,
    /// The student's answer document (PDF).
    #[arg(long)]
    answer: Option<PathBuf>,
    /// Grading endpoint, e.g. http://127.0.0.1:5000/grade.
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file (defaults to ./grader.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Terminal rendering of the grading form.
struct TerminalView {
    rubric: String,
    document: Option<AnswerDocument>,
    output: String,
}

impl SubmissionView for TerminalView {
    fn rubric_text(&self) -> String {
        self.rubric.clone()
    }

    fn selected_document(&self) -> Option<AnswerDocument> {
        self.document.clone()
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn set_submit_enabled(&mut self, enabled: bool, label: &str) {
        if enabled {
            info!(label, "ready");
        } else {
            eprintln!("{label}");
        }
    }

    fn display(&mut self, text: &str) {
        if text == PROGRESS_MESSAGE {
            eprintln!("{text}");
        }
        self.output = text.to_string();
    }
}

/// Exit status when the input is rejected before anything is sent.
const EXIT_REJECTED: u8 = 2;

/// Reads the answer file, unless the rubric is blank (the controller reports
/// that first). An unreadable file is a notice, not a crash.
async fn terminal_view(rubric: String, answer: Option<&Path>) -> Result<TerminalView, ExitCode> {
    match load_selected_document(&rubric, answer).await {
        Ok(document) => Ok(TerminalView {
            rubric,
            document,
            output: String::new(),
        }),
        Err(err) => {
            eprintln!("{err}");
            Err(ExitCode::from(EXIT_REJECTED))
        }
    }
}

fn exit_code(outcome: &SubmitOutcome) -> ExitCode {
    match outcome {
        SubmitOutcome::Completed(result) if result.is_success() => ExitCode::SUCCESS,
        SubmitOutcome::Completed(_) | SubmitOutcome::Busy => ExitCode::from(1),
        SubmitOutcome::Rejected(_) => ExitCode::from(EXIT_REJECTED),
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings(&SettingsOverrides {
        config_path: args.config,
        grading_endpoint: args.endpoint,
    })?;

    let rubric = match (args.rubric, args.rubric_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read rubric file '{}'", path.display()))?,
        (None, None) => String::new(),
    };
    let mut view = match terminal_view(rubric, args.answer.as_deref()).await {
        Ok(view) => view,
        Err(code) => return Ok(code),
    };

    let transport = HttpGradingClient::from_settings(&settings);
    info!(endpoint = %transport.endpoint(), "grading client ready");
    let controller = SubmissionController::new(Arc::new(transport));

    let outcome = controller.submit(&mut view).await;
    if let SubmitOutcome::Completed(_) = outcome {
        println!("{}", view.output);
    }
    Ok(exit_code(&outcome))
}
