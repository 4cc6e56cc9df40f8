use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, reducer::FormState};

pub enum StartupConfig {
    Ready {
        endpoint: String,
        cmd_tx: Sender<BackendCommand>,
    },
    /// Settings could not be loaded; the form stays read-only.
    Misconfigured(String),
}

pub struct GraderApp {
    form: FormState,
    cmd_tx: Option<Sender<BackendCommand>>,
    ui_rx: Receiver<UiEvent>,
    endpoint_label: String,
}

impl GraderApp {
    pub fn new(startup: StartupConfig, ui_rx: Receiver<UiEvent>) -> Self {
        let mut form = FormState::default();
        let (cmd_tx, endpoint_label) = match startup {
            StartupConfig::Ready { endpoint, cmd_tx } => (Some(cmd_tx), endpoint),
            StartupConfig::Misconfigured(message) => {
                form.submit_enabled = false;
                form.status = format!("Configuration error: {message}");
                (None, "no grading endpoint".to_string())
            }
        };

        Self {
            form,
            cmd_tx,
            ui_rx,
            endpoint_label,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.form.apply(event);
        }
    }

    fn submit(&mut self) {
        let Some(cmd_tx) = &self.cmd_tx else {
            return;
        };
        match cmd_tx.try_send(self.form.begin_submit()) {
            Ok(()) => tracing::debug!(command = "grade", "queued ui->backend command"),
            Err(TrySendError::Full(_)) => {
                self.form
                    .submit_not_queued("UI command queue is full; please retry");
            }
            Err(TrySendError::Disconnected(_)) => {
                self.form.submit_not_queued(
                    "Grading worker disconnected (possible startup/runtime failure); restart the app",
                );
            }
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Grade a student answer");
        ui.add_space(8.0);

        ui.label("Rubric");
        ui.add(
            egui::TextEdit::multiline(&mut self.form.rubric)
                .hint_text("Paste the question-wise rubric here")
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            if ui.button("Choose PDF…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("PDF", &["pdf"])
                    .pick_file()
                {
                    self.form.answer_path = Some(path);
                }
            }
            ui.label(self.form.answer_file_label());
        });
        ui.add_space(8.0);

        let can_submit = self.form.submit_enabled && self.cmd_tx.is_some();
        let button = egui::Button::new(self.form.submit_label.as_str());
        if ui.add_enabled(can_submit, button).clicked() {
            self.submit();
        }

        if let Some(output) = &self.form.output {
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(egui::Label::new(output.as_str()).selectable(true).wrap());
                });
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = self.form.notice.clone() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.form.notice = None;
        }
    }
}

impl eframe::App for GraderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.form.status.as_str());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(self.endpoint_label.as_str());
                });
            });
        });
        egui::CentralPanel::default().show(ctx, |ui| self.show_form(ui));
        self.show_notice(ctx);

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn ready_app(cmd_tx: Sender<BackendCommand>) -> GraderApp {
        let (_ui_tx, ui_rx) = bounded(8);
        let mut app = GraderApp::new(
            StartupConfig::Ready {
                endpoint: "http://127.0.0.1:5000/grade".into(),
                cmd_tx,
            },
            ui_rx,
        );
        app.form.rubric = "Rubric".into();
        app
    }

    #[test]
    fn queued_click_keeps_the_button_disabled() {
        let (cmd_tx, cmd_rx) = bounded(1);
        let mut app = ready_app(cmd_tx);

        app.submit();
        assert!(!app.form.submit_enabled);
        assert!(matches!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::Grade { rubric, .. }) if rubric == "Rubric"
        ));
    }

    #[test]
    fn full_queue_reenables_the_button() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        cmd_tx
            .try_send(BackendCommand::Grade {
                rubric: "earlier".into(),
                answer_path: None,
            })
            .expect("fill queue");
        let mut app = ready_app(cmd_tx);

        app.submit();
        assert!(app.form.submit_enabled);
        assert!(app.form.status.contains("queue is full"), "{}", app.form.status);
    }

    #[test]
    fn disconnected_worker_reenables_the_button() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut app = ready_app(cmd_tx);

        app.submit();
        assert!(app.form.submit_enabled);
        assert!(app.form.status.contains("disconnected"), "{}", app.form.status);
    }

    #[test]
    fn misconfigured_app_sends_nothing() {
        let (_ui_tx, ui_rx) = bounded(8);
        let mut app = GraderApp::new(StartupConfig::Misconfigured("no endpoint".into()), ui_rx);
        app.submit();
        assert!(!app.form.submit_enabled);
        assert!(app.form.status.starts_with("Configuration error"));
    }
}
