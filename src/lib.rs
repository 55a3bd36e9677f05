//! # Waifu2x Converter GUI
//!
//! Desktop front-end for the `waifu2x-converter-cpp` image upscaler. The
//! library holds everything below the window layer so it can be tested
//! without a display:
//!
//! - [`config`]: persisted settings and the per-flag option table
//! - [`process_mode`]: the processing-mode catalog
//! - [`conversion`]: argument construction and the converter subprocess
//! - [`notifier`]: desktop notifications
//! - [`gui`]: main window, process dialog, preferences and About

pub mod config;
pub mod constants;
pub mod conversion;
pub mod error;
pub mod gui;
pub mod logger;
pub mod notifier;
pub mod process_mode;

pub use error::{ConverterError, Result};
