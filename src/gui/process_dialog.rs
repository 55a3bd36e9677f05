//! Progress window for a single conversion.
//!
//! The dialog owns its [`ConversionJob`]; closing the dialog drops the job,
//! which stops a converter that is still running.

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use egui::{Color32, ProgressBar, RichText, ScrollArea, TextEdit};

use crate::config::ConverterConfig;
use crate::conversion::{prepare_job, BuiltArguments, ConversionJob, ProcessingRequest};
use crate::logger::log;
use crate::notifier::Notifier;
use crate::process_mode::ProcessModeCatalog;

/// Repaint interval while the converter is producing output
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct ProcessDialog {
    request: ProcessingRequest,
    built: BuiltArguments,
    job: ConversionJob,
    mode_label: String,
}

impl ProcessDialog {
    /// Build the command line for `request` and start the converter
    pub fn open(
        request: ProcessingRequest,
        config: &ConverterConfig,
        catalog: &ProcessModeCatalog,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let (built, mut job) = prepare_job(config, &request, notifier);
        let mode_tag = built.mode.as_deref().unwrap_or(request.mode.as_str());
        let mode_label = Self::resolve_mode_label(catalog, mode_tag);
        job.start();
        Self {
            request,
            built,
            job,
            mode_label,
        }
    }

    fn resolve_mode_label(catalog: &ProcessModeCatalog, tag: &str) -> String {
        match catalog.label_for(tag) {
            Ok(label) => label.to_string(),
            Err(e) => {
                log::warn!("{}, showing raw value", e);
                tag.to_string()
            }
        }
    }

    pub fn job(&self) -> &ConversionJob {
        &self.job
    }

    pub fn mode_label(&self) -> &str {
        &self.mode_label
    }

    /// Draw the dialog. Returns false once the user closed it.
    pub fn show(&mut self, ctx: &egui::Context) -> bool {
        if self.job.poll() {
            ctx.request_repaint();
        }
        if self.job.is_running() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        let mut open = true;
        let mut close_clicked = false;

        egui::Window::new(format!("Converting {}", self.request.input_name()))
            .id(egui::Id::new("process_dialog"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(520.0)
            .default_height(420.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("🖼").heading());
                    ui.label(RichText::new(self.request.input.display().to_string()).strong());
                });
                ui.add_space(5.0);

                egui::Grid::new("process_values")
                    .num_columns(2)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        if let Some(threads) = &self.built.threads {
                            ui.label("Threads:");
                            ui.label(threads);
                            ui.end_row();
                        }
                        if let Some(scale) = &self.built.scale_ratio {
                            ui.label("Scale ratio:");
                            ui.label(scale);
                            ui.end_row();
                        }
                        if let Some(noise) = &self.built.noise_level {
                            ui.label("Noise level:");
                            ui.label(noise);
                            ui.end_row();
                        }
                        ui.label("Mode:");
                        ui.label(&self.mode_label);
                        ui.end_row();
                    });

                ui.add_space(10.0);

                match self.job.status_message() {
                    Some(message) => {
                        let color = if self.job.outcome().is_some_and(|o| o.is_success()) {
                            Color32::GREEN
                        } else {
                            Color32::from_rgb(255, 100, 100)
                        };
                        ui.colored_label(color, message);
                        ui.add(ProgressBar::new(self.job.progress()).show_percentage());
                    }
                    None => {
                        ui.label("Processing...");
                        ui.add(ProgressBar::new(self.job.progress()).animate(true));
                    }
                }

                if let (Some(start), Some(end)) = (self.job.started_at(), self.job.finished_at()) {
                    let elapsed = end - start;
                    ui.small(format!(
                        "Finished at {} ({}.{:03} s)",
                        end.format("%H:%M:%S"),
                        elapsed.num_seconds(),
                        elapsed.num_milliseconds().rem_euclid(1000)
                    ));
                }

                ui.add_space(5.0);
                ui.separator();

                let console = self.job.console_text();
                let mut console_view: &str = &console;
                ScrollArea::vertical()
                    .max_height(240.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.add(
                            TextEdit::multiline(&mut console_view)
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY)
                                .desired_rows(12),
                        );
                    });

                ui.separator();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if self.job.is_finished() { "Close" } else { "Cancel" };
                    if ui.button(label).clicked() {
                        close_clicked = true;
                    }
                });
            });

        if (!open || close_clicked) && self.job.is_running() {
            log::info!("Process dialog closed while converting, stopping converter");
        }
        open && !close_clicked
    }
}
