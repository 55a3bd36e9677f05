//! # Error Types
//!
//! A single error enum for every fallible library operation. The GUI layer
//! logs these and turns them into status text; nothing is retried.

use std::{error::Error as StdError, fmt, io, path::PathBuf};

/// Errors produced by the settings store, the mode catalog and the job runner
#[derive(Debug)]
pub enum ConverterError {
    /// A processing-mode tag has no entry in the catalog
    ModeNotFound(String),

    /// The converter executable could not be started
    Launch {
        command: String,
        source: io::Error,
    },

    /// Generic filesystem failure
    Io(io::Error),

    /// The platform configuration directory could not be determined
    ConfigPath,

    /// A settings file exists but is not valid TOML for the settings schema
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Settings could not be serialized
    ConfigSerialize(toml::ser::Error),
}

impl fmt::Display for ConverterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConverterError::ModeNotFound(tag) => {
                write!(f, "processing mode '{}' not found", tag)
            }
            ConverterError::Launch { command, source } => {
                write!(f, "failed to start '{}': {}", command, source)
            }
            ConverterError::Io(e) => write!(f, "I/O error: {}", e),
            ConverterError::ConfigPath => write!(f, "could not find config directory"),
            ConverterError::ConfigParse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            ConverterError::ConfigSerialize(e) => {
                write!(f, "failed to serialize settings: {}", e)
            }
        }
    }
}

impl StdError for ConverterError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConverterError::Launch { source, .. } => Some(source),
            ConverterError::Io(e) => Some(e),
            ConverterError::ConfigParse { source, .. } => Some(source),
            ConverterError::ConfigSerialize(e) => Some(e),
            ConverterError::ModeNotFound(_) | ConverterError::ConfigPath => None,
        }
    }
}

impl From<io::Error> for ConverterError {
    fn from(e: io::Error) -> Self {
        ConverterError::Io(e)
    }
}

impl From<toml::ser::Error> for ConverterError {
    fn from(e: toml::ser::Error) -> Self {
        ConverterError::ConfigSerialize(e)
    }
}

pub type Result<T> = std::result::Result<T, ConverterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_error_keeps_io_source() {
        let err = ConverterError::Launch {
            command: "waifu2x-converter-cpp".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("waifu2x-converter-cpp"));
        assert!(err.source().is_some());
    }

    #[test]
    fn mode_not_found_names_the_tag() {
        let err = ConverterError::ModeNotFound("sharpen".to_string());
        assert_eq!(err.to_string(), "processing mode 'sharpen' not found");
        assert!(err.source().is_none());
    }
}
