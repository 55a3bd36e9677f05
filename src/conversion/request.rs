use std::path::PathBuf;

use crate::config::ConverterConfig;

/// Everything the process dialog needs to know about one conversion
///
/// Built once from the main window's widget values when an image is chosen
/// and never changed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingRequest {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub threads: u32,
    pub scale_ratio: f64,
    pub noise_level: u8,
    /// Mode tag (`scale`, `noise`, `noise_scale`)
    pub mode: String,
    pub model_dir: Option<PathBuf>,
}

impl ProcessingRequest {
    /// Request for `input` using the processing values stored in `config`
    pub fn from_config(input: impl Into<PathBuf>, output: Option<PathBuf>, config: &ConverterConfig) -> Self {
        Self {
            input: input.into(),
            output,
            threads: config.threads,
            scale_ratio: config.scale_ratio,
            noise_level: config.noise_level,
            mode: config.process_mode.clone(),
            model_dir: config.model_directory_path(),
        }
    }

    pub fn input_name(&self) -> String {
        self.input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_copies_processing_values() {
        let mut config = ConverterConfig::default();
        config.threads = 6;
        config.scale_ratio = 1.5;
        config.noise_level = 2;
        config.process_mode = "noise".to_string();
        config.model_directory = "/opt/models".to_string();

        let request = ProcessingRequest::from_config("/tmp/cat.png", None, &config);
        assert_eq!(request.threads, 6);
        assert_eq!(request.scale_ratio, 1.5);
        assert_eq!(request.noise_level, 2);
        assert_eq!(request.mode, "noise");
        assert_eq!(request.model_dir, Some(PathBuf::from("/opt/models")));
        assert_eq!(request.input_name(), "cat.png");
    }
}
