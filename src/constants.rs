//! # Application Constants
//!
//! Application-wide defaults shared by the settings store, the argument
//! builder and the conversion job. Flag tokens match the command-line
//! interface of `waifu2x-converter-cpp`.

use std::time::Duration;

/// Human readable application name, used for the window title and About dialog
pub const APP_NAME: &str = "Waifu2x Converter";

/// Project page opened from the About dialog
pub const PROJECT_URL: &str = "https://github.com/DeadSix27/waifu2x-converter-cpp";

/// Executable looked up on `PATH` when no explicit path is configured
pub const DEFAULT_COMMAND: &str = "waifu2x-converter-cpp";

/// Default flag tokens, in argument order
pub const FLAG_JOBS: &str = "-j";
pub const FLAG_SCALE_RATIO: &str = "-s";
pub const FLAG_NOISE_LEVEL: &str = "-n";
pub const FLAG_MODE: &str = "-m";
pub const FLAG_INPUT_FILE: &str = "-i";
pub const FLAG_OUTPUT_FILE: &str = "-o";
pub const FLAG_MODEL_DIR: &str = "--model-dir";

/// Default processing option values
pub const DEFAULT_SCALE_RATIO: f64 = 2.0;
pub const DEFAULT_NOISE_LEVEL: u8 = 1;
pub const DEFAULT_PROCESS_MODE: &str = "noise_scale";

/// Valid ranges exposed by the main window widgets
pub const MAX_NOISE_LEVEL: u8 = 3;
pub const MIN_SCALE_RATIO: f64 = 1.0;
pub const MAX_SCALE_RATIO: f64 = 16.0;
pub const MAX_THREADS: u32 = 256;

/// freedesktop icon names passed to the notification daemon
pub const ICON_SUCCESS: &str = "image-x-generic";
pub const ICON_FAILURE: &str = "dialog-error";

/// How long a converter gets to exit after SIGTERM before it is hard-killed
pub const TERMINATE_GRACE_PERIOD: Duration = Duration::from_millis(1500);

/// Upper bound on waiting for the converter to be reaped after a hard kill
pub const KILL_WAIT_TIMEOUT: Duration = Duration::from_secs(3);

/// Size of a single read from the converter's stdout/stderr pipes
pub const OUTPUT_CHUNK_SIZE: usize = 4096;
