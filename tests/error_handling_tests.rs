use std::error::Error;
use std::fs;
use std::sync::{Arc, Once};

use serial_test::serial;
use tempfile::TempDir;
use waifu2x_converter_gui::config::{ConverterConfig, OptionTable};
use waifu2x_converter_gui::conversion::{ConversionJob, ExitOutcome};
use waifu2x_converter_gui::logger;
use waifu2x_converter_gui::notifier::NullNotifier;
use waifu2x_converter_gui::process_mode::ProcessModeCatalog;
use waifu2x_converter_gui::ConverterError;

static INIT: Once = Once::new();

fn setup() {
    INIT.call_once(|| {
        let _ = logger::init_logger();
    });
}

#[test]
#[serial]
fn test_corrupted_config_file_recovery() {
    setup();

    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    let corrupted_configs = vec![
        ("invalid toml content", "Invalid TOML syntax"),
        ("[[[[[", "Malformed TOML"),
        ("threads = ", "Incomplete assignment"),
        ("command = \"unclosed string", "Unclosed string"),
        ("threads = \"many\"", "Invalid type"),
        ("use_custom_file_name = maybe", "Invalid boolean"),
        ("noise_level = 999", "Out of range for u8"),
        ("[options]\njobs = 5", "Option row is not a table"),
    ];

    for (content, description) in corrupted_configs {
        let config_path = temp_dir
            .path()
            .join(format!("corrupted_{}.toml", description.replace(' ', "_")));
        fs::write(&config_path, content).expect("Failed to write corrupted config");

        assert!(
            ConverterConfig::load_from(&config_path).is_err(),
            "Strict load should reject '{}'",
            description
        );

        // The lenient loader always yields a usable config
        let config = ConverterConfig::load_or_default(&config_path);
        assert!(!config.command.is_empty(), "Fallback for '{}' has no command", description);
        assert_eq!(config.options, OptionTable::default());
    }
}

#[test]
#[serial]
fn test_unknown_fields_are_tolerated() {
    setup();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("newer_version.toml");
    fs::write(&config_path, "threads = 3\nfuture_setting = true\n").expect("write config");

    let config = ConverterConfig::load_from(&config_path).expect("Unknown keys should be ignored");
    assert_eq!(config.threads, 3);
}

#[test]
#[serial]
fn test_missing_converter_executable() {
    setup();

    let mut job = ConversionJob::new(
        "/definitely/not/installed/waifu2x-converter-cpp",
        vec!["-i".to_string(), "cat.png".to_string()],
        Arc::new(NullNotifier),
    );
    job.start();

    assert_eq!(job.outcome(), Some(&ExitOutcome::LaunchFailed));
    assert!(!job.is_running());
    assert!(job.pid().is_none());
    // Dropping a job that never started must be harmless
    drop(job);
}

#[test]
#[serial]
fn test_unknown_mode_lookup_is_an_error() {
    setup();
    let catalog = ProcessModeCatalog::default();

    for tag in ["", "NOISE", "noise-scale", "scale ", "denoise"] {
        let err = catalog.label_for(tag).expect_err("lookup should miss");
        assert!(matches!(err, ConverterError::ModeNotFound(ref t) if t == tag));
        assert!(err.source().is_none());
        assert_eq!(catalog.display_label(tag), tag);
    }
}
