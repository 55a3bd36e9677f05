use eframe::egui;
use egui::RichText;

use crate::constants::{APP_NAME, PROJECT_URL};
use crate::logger::log;

/// Static About window. Sets `open` to false when dismissed.
pub fn show_about_window(ctx: &egui::Context, open: &mut bool) {
    let mut close_clicked = false;

    egui::Window::new(format!("About {}", APP_NAME))
        .open(open)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(APP_NAME);
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(10.0);
                ui.label("A graphical front-end for waifu2x-converter-cpp.");
                ui.label(RichText::new("Image upscaling is performed by the external converter.").small());
                ui.add_space(10.0);
                if ui.link(PROJECT_URL).clicked() {
                    if let Err(e) = webbrowser::open(PROJECT_URL) {
                        log::warn!("Failed to open browser: {}", e);
                    }
                }
                ui.add_space(10.0);
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
            });
        });

    if close_clicked {
        *open = false;
    }
}
