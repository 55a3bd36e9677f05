//! # Configuration Management Module
//!
//! Persistent storage of the converter settings. Configuration is stored in a
//! platform-appropriate location using TOML, so the flag table can be edited
//! by hand when the installed converter build uses different option names.
//!
//! Missing, unreadable or corrupt files never stop the application: they are
//! logged and replaced by defaults.
//!
//! ## Configuration Storage Locations
//!
//! - **Windows**: `%APPDATA%\Waifu2xConverterGui\config.toml`
//! - **macOS**: `~/Library/Application Support/Waifu2xConverterGui/config.toml`
//! - **Linux**: `~/.config/waifu2x-converter-gui/config.toml`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_COMMAND, DEFAULT_NOISE_LEVEL, DEFAULT_PROCESS_MODE, DEFAULT_SCALE_RATIO, FLAG_INPUT_FILE,
    FLAG_JOBS, FLAG_MODE, FLAG_MODEL_DIR, FLAG_NOISE_LEVEL, FLAG_OUTPUT_FILE, FLAG_SCALE_RATIO,
};
use crate::error::{ConverterError, Result};
use crate::logger::log;

/// Command-line options of the converter that the front-end knows how to fill in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterOption {
    Jobs,
    ScaleRatio,
    NoiseLevel,
    Mode,
    InputFile,
    OutputFile,
    ModelDir,
}

impl ConverterOption {
    /// Every option, in the order its arguments are emitted
    pub const ALL: [ConverterOption; 7] = [
        ConverterOption::Jobs,
        ConverterOption::ScaleRatio,
        ConverterOption::NoiseLevel,
        ConverterOption::Mode,
        ConverterOption::InputFile,
        ConverterOption::OutputFile,
        ConverterOption::ModelDir,
    ];

    pub fn default_flag(self) -> &'static str {
        match self {
            ConverterOption::Jobs => FLAG_JOBS,
            ConverterOption::ScaleRatio => FLAG_SCALE_RATIO,
            ConverterOption::NoiseLevel => FLAG_NOISE_LEVEL,
            ConverterOption::Mode => FLAG_MODE,
            ConverterOption::InputFile => FLAG_INPUT_FILE,
            ConverterOption::OutputFile => FLAG_OUTPUT_FILE,
            ConverterOption::ModelDir => FLAG_MODEL_DIR,
        }
    }
}

impl fmt::Display for ConverterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConverterOption::Jobs => "Threads",
            ConverterOption::ScaleRatio => "Scale ratio",
            ConverterOption::NoiseLevel => "Noise level",
            ConverterOption::Mode => "Mode",
            ConverterOption::InputFile => "Input file",
            ConverterOption::OutputFile => "Output file",
            ConverterOption::ModelDir => "Model directory",
        };
        f.write_str(name)
    }
}

/// Per-flag settings
///
/// - `flag`: token placed on the command line (`-j`, `--model-dir`, ...)
/// - `argument`: literal value used instead of the one chosen in the main window
///   when non-empty
/// - `ignored`: leave this flag off the command line entirely
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OptionSetting {
    pub flag: String,
    pub argument: String,
    pub ignored: bool,
}

impl OptionSetting {
    fn with_flag(flag: &str) -> Self {
        Self {
            flag: flag.to_string(),
            argument: String::new(),
            ignored: false,
        }
    }

    /// The override argument, if one is set
    pub fn override_argument(&self) -> Option<&str> {
        if self.argument.is_empty() {
            None
        } else {
            Some(&self.argument)
        }
    }
}

impl Default for OptionSetting {
    fn default() -> Self {
        Self::with_flag("")
    }
}

/// One `OptionSetting` per `ConverterOption`, serialized as named TOML tables
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OptionTable {
    pub jobs: OptionSetting,
    pub scale_ratio: OptionSetting,
    pub noise_level: OptionSetting,
    pub mode: OptionSetting,
    pub input_file: OptionSetting,
    pub output_file: OptionSetting,
    pub model_dir: OptionSetting,
}

impl Default for OptionTable {
    fn default() -> Self {
        Self {
            jobs: OptionSetting::with_flag(FLAG_JOBS),
            scale_ratio: OptionSetting::with_flag(FLAG_SCALE_RATIO),
            noise_level: OptionSetting::with_flag(FLAG_NOISE_LEVEL),
            mode: OptionSetting::with_flag(FLAG_MODE),
            input_file: OptionSetting::with_flag(FLAG_INPUT_FILE),
            output_file: OptionSetting::with_flag(FLAG_OUTPUT_FILE),
            model_dir: OptionSetting::with_flag(FLAG_MODEL_DIR),
        }
    }
}

impl OptionTable {
    pub fn get(&self, option: ConverterOption) -> &OptionSetting {
        match option {
            ConverterOption::Jobs => &self.jobs,
            ConverterOption::ScaleRatio => &self.scale_ratio,
            ConverterOption::NoiseLevel => &self.noise_level,
            ConverterOption::Mode => &self.mode,
            ConverterOption::InputFile => &self.input_file,
            ConverterOption::OutputFile => &self.output_file,
            ConverterOption::ModelDir => &self.model_dir,
        }
    }

    pub fn get_mut(&mut self, option: ConverterOption) -> &mut OptionSetting {
        match option {
            ConverterOption::Jobs => &mut self.jobs,
            ConverterOption::ScaleRatio => &mut self.scale_ratio,
            ConverterOption::NoiseLevel => &mut self.noise_level,
            ConverterOption::Mode => &mut self.mode,
            ConverterOption::InputFile => &mut self.input_file,
            ConverterOption::OutputFile => &mut self.output_file,
            ConverterOption::ModelDir => &mut self.model_dir,
        }
    }

    pub fn is_ignored(&self, option: ConverterOption) -> bool {
        self.get(option).ignored
    }
}

/// Application configuration structure
///
/// The processing defaults (`threads` through `process_mode`) mirror the main
/// window widgets and are written back when the window closes. The remaining
/// fields are edited in the Preferences dialog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ConverterConfig {
    /// Worker threads passed to the converter
    pub threads: u32,

    /// Upscale factor (2.0 doubles width and height)
    pub scale_ratio: f64,

    /// Noise reduction strength, 0 to 3
    pub noise_level: u8,

    /// Processing mode tag: `scale`, `noise` or `noise_scale`
    pub process_mode: String,

    /// Directory holding the converter's model files, empty for the built-in default
    pub model_directory: String,

    /// Ask for an output path before each conversion instead of letting the
    /// converter derive one
    pub use_custom_file_name: bool,

    /// Directory the image browser opens in
    pub last_used_dir: String,

    /// Path to the converter executable
    pub command: String,

    /// Flag tokens, overrides and ignore switches
    pub options: OptionTable,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get() as u32,
            scale_ratio: DEFAULT_SCALE_RATIO,
            noise_level: DEFAULT_NOISE_LEVEL,
            process_mode: DEFAULT_PROCESS_MODE.to_string(),
            model_directory: String::new(),
            use_custom_file_name: false,
            last_used_dir: dirs::home_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            command: DEFAULT_COMMAND.to_string(),
            options: OptionTable::default(),
        }
    }
}

impl ConverterConfig {
    /// Load configuration from the platform config file, falling back to
    /// defaults on any failure
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_or_default(&path),
            Err(e) => {
                log::warn!("Failed to get config path: {}", e);
                Self::default()
            }
        }
    }

    /// Load from an explicit path, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                Self::default()
            }
        }
    }

    /// Strict load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ConverterError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to the platform config file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save to an explicit path, creating parent directories as needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        log::info!("Configuration saved to: {}", path.display());
        Ok(())
    }

    /// Platform-appropriate configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dir_name = if cfg!(target_os = "windows") || cfg!(target_os = "macos") {
            "Waifu2xConverterGui"
        } else {
            "waifu2x-converter-gui"
        };

        let config_dir = dirs::config_dir()
            .ok_or(ConverterError::ConfigPath)?
            .join(dir_name);

        Ok(config_dir.join("config.toml"))
    }

    /// Model directory as an optional path
    pub fn model_directory_path(&self) -> Option<PathBuf> {
        if self.model_directory.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(&self.model_directory))
        }
    }
}
