//! # Logging Infrastructure Module
//!
//! Centralized logging for the converter front-end, built on the `tracing`
//! ecosystem.
//!
//! ## Log Levels
//!
//! - **ERROR**: converter launch failures, settings that cannot be written
//! - **WARN**: teardown escalations, unknown processing modes
//! - **INFO**: conversions started/finished, settings saved
//! - **DEBUG**: argument vectors, notification backend results
//!
//! ## Environment Configuration
//!
//! Set the `RUST_LOG` environment variable to control log output:
//! - `RUST_LOG=waifu2x_converter_gui=debug` - Show all logs from this application
//! - `RUST_LOG=waifu2x_converter_gui::conversion=debug,warn` - Debug the job runner only

use tracing_subscriber::{fmt, EnvFilter, prelude::*};
use once_cell::sync::Lazy;

/// Initialize the global logger.
///
/// Safe to call more than once; only the first call installs the subscriber.
/// Should be called once from `main.rs`.
pub fn init_logger() -> Result<(), Box<dyn std::error::Error>> {
    static INIT: Lazy<()> = Lazy::new(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("waifu2x_converter_gui=debug,warn"));

        // try_init: test binaries may already own a global subscriber
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer()
                .with_target(false)
                .with_thread_ids(true)
                .with_level(true)
                .with_line_number(true)
            )
            .try_init();
    });

    Lazy::force(&INIT);
    Ok(())
}

/// Convenience re-export of log macros
///
/// ```rust
/// use waifu2x_converter_gui::logger::log;
///
/// log::info!("Converting {}", "cat.png");
/// log::warn!("Unknown processing mode {}", "sharpen");
/// ```
pub mod log {
    pub use tracing::{debug, error, info, warn};
}
