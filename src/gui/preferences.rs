//! Preferences dialog: converter location, model directory, output naming and
//! the per-flag table.

use eframe::egui;
use egui::{Color32, RichText};

use crate::config::{ConverterConfig, ConverterOption, OptionTable};

/// What the user did with the dialog this frame
#[derive(Debug, Clone, PartialEq)]
pub enum PreferencesAction {
    None,
    Save(Box<ConverterConfig>),
    Cancel,
}

/// Edits a copy of the settings; nothing is applied until Save
pub struct PreferencesDialog {
    draft: ConverterConfig,
}

impl PreferencesDialog {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            draft: config.clone(),
        }
    }

    pub fn draft(&self) -> &ConverterConfig {
        &self.draft
    }

    /// Restore the converter-related fields; processing values are left alone
    pub fn reset_to_defaults(&mut self) {
        let defaults = ConverterConfig::default();
        self.draft.command = defaults.command;
        self.draft.model_directory = defaults.model_directory;
        self.draft.use_custom_file_name = defaults.use_custom_file_name;
        self.draft.options = OptionTable::default();
    }

    pub fn show(&mut self, ctx: &egui::Context) -> PreferencesAction {
        let mut open = true;
        let mut action = PreferencesAction::None;

        egui::Window::new("⚙ Preferences")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(560.0)
            .show(ctx, |ui| {
                ui.heading("Converter");
                ui.add_space(5.0);

                ui.group(|ui| {
                    egui::Grid::new("converter_paths")
                        .num_columns(3)
                        .spacing([8.0, 6.0])
                        .show(ui, |ui| {
                            ui.label("Executable:");
                            ui.text_edit_singleline(&mut self.draft.command);
                            if ui.button("Browse…").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .set_title("Select waifu2x-converter-cpp")
                                    .pick_file()
                                {
                                    self.draft.command = path.display().to_string();
                                }
                            }
                            ui.end_row();

                            ui.label("Model directory:");
                            ui.text_edit_singleline(&mut self.draft.model_directory);
                            if ui.button("Browse…").clicked() {
                                if let Some(path) = rfd::FileDialog::new()
                                    .set_title("Select model directory")
                                    .pick_folder()
                                {
                                    self.draft.model_directory = path.display().to_string();
                                }
                            }
                            ui.end_row();
                        });

                    ui.checkbox(
                        &mut self.draft.use_custom_file_name,
                        "Choose output file name before converting",
                    );
                });

                ui.add_space(10.0);
                ui.heading("Command-line options");
                ui.small(
                    RichText::new("A non-empty argument replaces the value chosen in the main window.")
                        .color(Color32::GRAY),
                );
                ui.add_space(5.0);

                ui.group(|ui| {
                    egui::Grid::new("option_table")
                        .num_columns(4)
                        .striped(true)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            ui.label(RichText::new("Option").strong());
                            ui.label(RichText::new("Flag").strong());
                            ui.label(RichText::new("Argument").strong());
                            ui.label(RichText::new("Ignore").strong());
                            ui.end_row();

                            for option in ConverterOption::ALL {
                                let setting = self.draft.options.get_mut(option);
                                ui.label(option.to_string());
                                ui.add(egui::TextEdit::singleline(&mut setting.flag).desired_width(110.0));
                                ui.add_enabled(
                                    !setting.ignored,
                                    egui::TextEdit::singleline(&mut setting.argument).desired_width(160.0),
                                );
                                ui.checkbox(&mut setting.ignored, "");
                                ui.end_row();
                            }
                        });
                });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("💾 Save").clicked() {
                        action = PreferencesAction::Save(Box::new(self.draft.clone()));
                    }
                    if ui.button("Cancel").clicked() {
                        action = PreferencesAction::Cancel;
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Reset to defaults").clicked() {
                            self.reset_to_defaults();
                        }
                    });
                });
            });

        if !open && action == PreferencesAction::None {
            action = PreferencesAction::Cancel;
        }
        action
    }
}
