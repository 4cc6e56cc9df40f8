//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{
    load_selected_document, ClientSettings, HttpGradingClient, SubmissionController,
    SubmitOutcome, SUBMIT_LABEL,
};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::{commands::BackendCommand, view::ChannelView};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(settings: ClientSettings, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let transport = HttpGradingClient::from_settings(&settings);
    let controller = Arc::new(SubmissionController::new(Arc::new(transport)));
    start_backend_bridge(controller, cmd_rx, ui_tx);
}

pub fn start_backend_bridge(
    controller: Arc<SubmissionController>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info("Ready".to_string()));
        let mut tasks = Vec::new();
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::Grade {
                    rubric,
                    answer_path,
                } => {
                    // Each cycle runs as its own task so the controller, not
                    // this queue, decides whether a second click is a no-op.
                    let controller = controller.clone();
                    let ui_tx = ui_tx.clone();
                    tasks.retain(|task: &tokio::task::JoinHandle<()>| !task.is_finished());
                    tasks.push(runtime.spawn(run_grade(controller, rubric, answer_path, ui_tx)));
                }
            }
        }

        runtime.block_on(async move {
            for task in tasks {
                let _ = task.await;
            }
        });
        tracing::debug!("backend worker stopped");
    })
}

async fn run_grade(
    controller: Arc<SubmissionController>,
    rubric: String,
    answer_path: Option<std::path::PathBuf>,
    ui_tx: Sender<UiEvent>,
) {
    let document = match load_selected_document(&rubric, answer_path.as_deref()).await {
        Ok(document) => document,
        Err(err) => {
            tracing::warn!(error = %err, "could not load answer document");
            let _ = ui_tx.send(UiEvent::Error(UiError::new(
                UiErrorContext::LoadDocument,
                err.to_string(),
            )));
            restore_submit_control(&ui_tx);
            return;
        }
    };

    let mut view = ChannelView::new(rubric, document, ui_tx.clone());
    match controller.submit(&mut view).await {
        // The UI disabled the button on click; the controller never did.
        SubmitOutcome::Rejected(_) => restore_submit_control(&ui_tx),
        // The cycle in flight re-enables the button when it resolves.
        SubmitOutcome::Busy => {
            tracing::debug!("grade click ignored while a request is in flight");
        }
        SubmitOutcome::Completed(_) => {}
    }
}

fn restore_submit_control(ui_tx: &Sender<UiEvent>) {
    let _ = ui_tx.send(UiEvent::SubmitControl {
        enabled: true,
        label: SUBMIT_LABEL.to_string(),
    });
}
