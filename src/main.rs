//! # Waifu2x Converter
//!
//! Graphical shell around `waifu2x-converter-cpp`: pick or drop an image,
//! choose threads, scale ratio, noise level and mode, and the converter runs
//! as a subprocess while its console output streams into a progress dialog.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌──────────────────────┐
//! │   Main Window   │───►│ Process Dialog  │───►│ waifu2x-converter-cpp│
//! │                 │    │                 │◄───│   (stdout/stderr)    │
//! │ • Drop / Browse │    │ • Arguments     │    └──────────────────────┘
//! │ • Options       │    │ • Console       │
//! └─────────────────┘    │ • Notification  │
//!          │             └─────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │  config.toml    │
//! └─────────────────┘
//! ```

use eframe::egui::ViewportBuilder;
use waifu2x_converter_gui::constants::APP_NAME;
use waifu2x_converter_gui::gui::app::ConverterApp;
use waifu2x_converter_gui::logger;

fn main() -> eframe::Result<()> {
    // Logging first so startup problems are visible
    if let Err(e) = logger::init_logger() {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size((460.0, 420.0))
            .with_min_inner_size((380.0, 360.0))
            .with_title(APP_NAME)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(ConverterApp::new(cc)))),
    )
}
