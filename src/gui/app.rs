//! # Main Window
//!
//! Entry point for conversions: drag an image onto the window or browse for
//! one, adjust the processing options and a process dialog opens.
//!
//! The window owns the settings, the processing-mode catalog and the
//! notifier. The catalog and notifier are passed down to each process dialog
//! so the dialog never needs to reach back into the window.
//!
//! Processing values are written back to the settings file when the window
//! closes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;
use egui::{CentralPanel, ComboBox, DragValue, RichText, Slider, TopBottomPanel, Color32};

use crate::config::ConverterConfig;
use crate::constants::{
    APP_NAME, DEFAULT_PROCESS_MODE, MAX_NOISE_LEVEL, MAX_SCALE_RATIO, MAX_THREADS, MIN_SCALE_RATIO,
};
use crate::conversion::ProcessingRequest;
use crate::gui::about::show_about_window;
use crate::gui::preferences::{PreferencesAction, PreferencesDialog};
use crate::gui::process_dialog::ProcessDialog;
use crate::logger::log;
use crate::notifier::{select_notifier, Notifier};
use crate::process_mode::{ProcessMode, ProcessModeCatalog};

pub struct ConverterApp {
    /// Persistent settings, processing values included
    config: ConverterConfig,

    catalog: ProcessModeCatalog,

    notifier: Arc<dyn Notifier>,

    // Main window widgets
    threads: u32,
    scale_ratio: f64,
    noise_level: u8,
    selected_mode: String,

    /// At most one conversion at a time
    process_dialog: Option<ProcessDialog>,

    preferences: Option<PreferencesDialog>,

    show_about: bool,

    /// One-line feedback below the drop area
    status: Option<String>,

    saved_on_exit: bool,
}

impl ConverterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::from(select_notifier());
        Self::with_config(ConverterConfig::load(), notifier)
    }

    /// Build the window state from explicit settings and notifier
    pub fn with_config(config: ConverterConfig, notifier: Arc<dyn Notifier>) -> Self {
        let catalog = ProcessModeCatalog::default();

        let selected_mode = if catalog.index_of(&config.process_mode).is_some() {
            config.process_mode.clone()
        } else {
            log::warn!(
                "Saved processing mode '{}' is unknown, using '{}'",
                config.process_mode,
                DEFAULT_PROCESS_MODE
            );
            DEFAULT_PROCESS_MODE.to_string()
        };

        Self {
            threads: config.threads.clamp(1, MAX_THREADS),
            scale_ratio: config.scale_ratio,
            noise_level: config.noise_level.min(MAX_NOISE_LEVEL),
            selected_mode,
            config,
            catalog,
            notifier,
            process_dialog: None,
            preferences: None,
            show_about: false,
            status: None,
            saved_on_exit: false,
        }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn is_converting(&self) -> bool {
        self.process_dialog.is_some()
    }

    fn selected_process_mode(&self) -> Option<ProcessMode> {
        ProcessMode::from_tag(&self.selected_mode)
    }

    /// Request built from the current widget values
    pub fn current_request(&self, input: PathBuf, output: Option<PathBuf>) -> ProcessingRequest {
        ProcessingRequest {
            input,
            output,
            threads: self.threads,
            scale_ratio: self.scale_ratio,
            noise_level: self.noise_level,
            mode: self.selected_mode.clone(),
            model_dir: self.config.model_directory_path(),
        }
    }

    /// Copy the widget values into the settings
    pub fn store_widget_values(&mut self) {
        self.config.threads = self.threads;
        self.config.scale_ratio = self.scale_ratio;
        self.config.noise_level = self.noise_level;
        self.config.process_mode = self.selected_mode.clone();
    }

    fn save_config(&mut self) {
        self.store_widget_values();
        if let Err(e) = self.config.save() {
            log::error!("Failed to save configuration: {}", e);
        }
    }

    fn browse_image(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title("Select image")
            .add_filter("Images", &["png", "jpg", "jpeg"])
            .add_filter("All files", &["*"]);
        if !self.config.last_used_dir.is_empty() {
            dialog = dialog.set_directory(&self.config.last_used_dir);
        }

        if let Some(path) = dialog.pick_file() {
            if let Some(dir) = path.parent() {
                self.config.last_used_dir = dir.display().to_string();
            }
            self.process_image(path);
        }
    }

    /// Ask where to save the result, starting next to the input
    fn browse_save_location(&self, input: &Path) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title("Save");
        if let Some(dir) = input.parent().filter(|d| !d.as_os_str().is_empty()) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = input.file_name() {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        dialog.save_file()
    }

    fn process_image(&mut self, input: PathBuf) {
        if self.process_dialog.is_some() {
            self.status = Some("A conversion is already running".to_string());
            return;
        }
        if !input.is_file() {
            self.status = Some(format!("Not a file: {}", input.display()));
            return;
        }

        let output = if self.config.use_custom_file_name {
            match self.browse_save_location(&input) {
                Some(path) => Some(path),
                None => {
                    log::debug!("Save location dialog cancelled");
                    return;
                }
            }
        } else {
            None
        };

        let request = self.current_request(input, output);
        log::info!("Converting {}", request.input.display());
        self.status = None;
        self.process_dialog = Some(ProcessDialog::open(
            request,
            &self.config,
            &self.catalog,
            Arc::clone(&self.notifier),
        ));
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            self.process_image(path);
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("📂 Open image…").clicked() {
                        self.browse_image();
                    }
                    if ui.button("⚙ Preferences…").clicked() {
                        self.preferences = Some(PreferencesDialog::new(&self.config));
                    }
                    ui.separator();
                    if ui.button("❌ Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Help", |ui| {
                    if ui.button(format!("About {}", APP_NAME)).clicked() {
                        self.show_about = true;
                    }
                });
            });
        });
    }

    fn show_main_panel(&mut self, ctx: &egui::Context) {
        let busy = self.process_dialog.is_some() || self.preferences.is_some();
        let hovering_files = ctx.input(|i| !i.raw.hovered_files.is_empty());

        CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!busy, |ui| {
                ui.vertical_centered_justified(|ui| {
                    ui.add_space(10.0);

                    // Drop area
                    ui.group(|ui| {
                        ui.set_min_height(140.0);
                        ui.vertical_centered(|ui| {
                            ui.add_space(40.0);
                            let text = if hovering_files {
                                RichText::new("Release to convert").heading().color(Color32::LIGHT_BLUE)
                            } else {
                                RichText::new("Drop an image here").heading()
                            };
                            ui.label(text);
                            ui.add_space(10.0);
                            if ui.button("📂 Browse…").clicked() {
                                self.browse_image();
                            }
                        });
                    });

                    if let Some(status) = &self.status {
                        ui.add_space(5.0);
                        ui.colored_label(Color32::from_rgb(255, 165, 0), status);
                    }

                    ui.add_space(15.0);

                    let mode = self.selected_process_mode();
                    let noise_enabled = mode.map(ProcessMode::uses_noise).unwrap_or(true);
                    let scale_enabled = mode.map(ProcessMode::uses_scale).unwrap_or(true);

                    ui.group(|ui| {
                        egui::Grid::new("processing_options")
                            .num_columns(2)
                            .spacing([12.0, 8.0])
                            .show(ui, |ui| {
                                ui.label("Mode:");
                                let selected_label = self.catalog.display_label(&self.selected_mode).to_string();
                                ComboBox::from_id_salt("process_mode")
                                    .selected_text(selected_label)
                                    .show_ui(ui, |ui| {
                                        for entry in self.catalog.entries() {
                                            ui.selectable_value(
                                                &mut self.selected_mode,
                                                entry.tag.clone(),
                                                &entry.label,
                                            );
                                        }
                                    });
                                ui.end_row();

                                ui.label("Threads:");
                                ui.add(DragValue::new(&mut self.threads).range(1..=MAX_THREADS));
                                ui.end_row();

                                ui.label("Scale ratio:");
                                ui.add_enabled(
                                    scale_enabled,
                                    DragValue::new(&mut self.scale_ratio)
                                        .range(MIN_SCALE_RATIO..=MAX_SCALE_RATIO)
                                        .speed(0.1)
                                        .max_decimals(2),
                                );
                                ui.end_row();

                                ui.label("Noise reduction level:");
                                ui.add_enabled(
                                    noise_enabled,
                                    Slider::new(&mut self.noise_level, 0..=MAX_NOISE_LEVEL),
                                );
                                ui.end_row();
                            });
                    });
                });
            });
        });
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) && !self.saved_on_exit {
            self.save_config();
            self.saved_on_exit = true;
        }

        if self.process_dialog.is_none() && self.preferences.is_none() {
            self.handle_dropped_files(ctx);
        }

        self.show_menu_bar(ctx);
        self.show_main_panel(ctx);

        if let Some(dialog) = self.process_dialog.as_mut() {
            if !dialog.show(ctx) {
                // dropping the dialog stops a converter that is still running
                self.process_dialog = None;
            }
        }

        if let Some(preferences) = self.preferences.as_mut() {
            match preferences.show(ctx) {
                PreferencesAction::None => {}
                PreferencesAction::Save(draft) => {
                    self.config = *draft;
                    self.save_config();
                    self.preferences = None;
                }
                PreferencesAction::Cancel => self.preferences = None,
            }
        }

        if self.show_about {
            show_about_window(ctx, &mut self.show_about);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::NullNotifier;

    fn app_with(config: ConverterConfig) -> ConverterApp {
        ConverterApp::with_config(config, Arc::new(NullNotifier))
    }

    #[test]
    fn widgets_start_from_saved_values() {
        let mut config = ConverterConfig::default();
        config.threads = 8;
        config.scale_ratio = 1.5;
        config.noise_level = 2;
        config.process_mode = "scale".to_string();
        config.model_directory = "/models".to_string();

        let app = app_with(config);
        let request = app.current_request(PathBuf::from("cat.png"), None);
        assert_eq!(request.threads, 8);
        assert_eq!(request.scale_ratio, 1.5);
        assert_eq!(request.noise_level, 2);
        assert_eq!(request.mode, "scale");
        assert_eq!(request.model_dir, Some(PathBuf::from("/models")));
        assert!(!app.is_converting());
    }

    #[test]
    fn unknown_saved_mode_falls_back_to_default() {
        let mut config = ConverterConfig::default();
        config.process_mode = "sharpen".to_string();
        let app = app_with(config);
        assert_eq!(app.current_request(PathBuf::from("a.png"), None).mode, "noise_scale");
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = ConverterConfig::default();
        config.threads = 0;
        config.noise_level = 9;
        let app = app_with(config);
        let request = app.current_request(PathBuf::from("a.png"), None);
        assert_eq!(request.threads, 1);
        assert_eq!(request.noise_level, MAX_NOISE_LEVEL);
    }

    #[test]
    fn widget_values_are_written_back() {
        let mut app = app_with(ConverterConfig::default());
        app.threads = 3;
        app.scale_ratio = 4.0;
        app.noise_level = 0;
        app.selected_mode = "noise".to_string();
        app.store_widget_values();

        assert_eq!(app.config().threads, 3);
        assert_eq!(app.config().scale_ratio, 4.0);
        assert_eq!(app.config().noise_level, 0);
        assert_eq!(app.config().process_mode, "noise");
    }
}
