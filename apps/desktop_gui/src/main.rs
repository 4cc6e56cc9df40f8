use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, SettingsOverrides};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::{GraderApp, StartupConfig};

#[derive(Parser, Debug)]
struct Args {
    /// Grading endpoint, e.g. http://127.0.0.1:5000/grade.
    #[arg(long)]
    endpoint: Option<String>,
    /// Settings file (defaults to ./grader.toml).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);

    let startup = match load_settings(&SettingsOverrides {
        config_path: args.config,
        grading_endpoint: args.endpoint,
    }) {
        Ok(settings) => {
            let endpoint = settings.grading_endpoint.to_string();
            tracing::info!(%endpoint, "grading endpoint configured");
            backend_bridge::runtime::launch(settings, cmd_rx, ui_tx);
            StartupConfig::Ready { endpoint, cmd_tx }
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to load grader settings");
            StartupConfig::Misconfigured(err.to_string())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Rubric Grader")
            .with_inner_size([760.0, 680.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Rubric Grader",
        options,
        Box::new(|_cc| Ok(Box::new(GraderApp::new(startup, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("desktop GUI failed: {err}"))
}
