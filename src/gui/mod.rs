//! User interface built on `eframe`/`egui`.

pub mod about;
pub mod app;
pub mod preferences;
pub mod process_dialog;
