use std::path::PathBuf;

use waifu2x_converter_gui::config::{ConverterConfig, ConverterOption, OptionTable};
use waifu2x_converter_gui::conversion::{build_arguments, ProcessingRequest};

fn full_request() -> ProcessingRequest {
    ProcessingRequest {
        input: PathBuf::from("cat.png"),
        output: Some(PathBuf::from("cat_out.png")),
        threads: 4,
        scale_ratio: 2.0,
        noise_level: 1,
        mode: "noise_scale".to_string(),
        model_dir: Some(PathBuf::from("models")),
    }
}

/// (option, value the request contributes)
fn expected_pairs() -> Vec<(ConverterOption, &'static str)> {
    vec![
        (ConverterOption::Jobs, "4"),
        (ConverterOption::ScaleRatio, "2"),
        (ConverterOption::NoiseLevel, "1"),
        (ConverterOption::Mode, "noise_scale"),
        (ConverterOption::InputFile, "cat.png"),
        (ConverterOption::OutputFile, "cat_out.png"),
        (ConverterOption::ModelDir, "models"),
    ]
}

#[test]
fn test_reference_example() {
    let request = ProcessingRequest {
        output: None,
        model_dir: None,
        ..full_request()
    };
    let built = build_arguments(&request, &OptionTable::default());
    assert_eq!(
        built.args,
        vec!["-j", "4", "-s", "2", "-n", "1", "-m", "noise_scale", "-i", "cat.png"]
    );
}

#[test]
fn test_every_ignore_and_override_combination() {
    let request = full_request();
    let options_count = ConverterOption::ALL.len();

    // Every subset of ignored flags, crossed with overrides on/off
    for ignore_mask in 0u32..(1 << options_count) {
        for with_overrides in [false, true] {
            let mut options = OptionTable::default();
            for (i, option) in ConverterOption::ALL.iter().enumerate() {
                let setting = options.get_mut(*option);
                setting.ignored = ignore_mask & (1 << i) != 0;
                if with_overrides && i % 2 == 0 {
                    setting.argument = format!("override-{}", i);
                }
            }

            let mut expected: Vec<String> = Vec::new();
            for (i, (option, value)) in expected_pairs().into_iter().enumerate() {
                if ignore_mask & (1 << i) != 0 {
                    continue;
                }
                expected.push(option.default_flag().to_string());
                if with_overrides && i % 2 == 0 {
                    expected.push(format!("override-{}", i));
                } else {
                    expected.push(value.to_string());
                }
            }

            let built = build_arguments(&request, &options);
            assert_eq!(
                built.args, expected,
                "ignore mask {:07b}, overrides {}",
                ignore_mask, with_overrides
            );
        }
    }
}

#[test]
fn test_missing_output_and_model_dir_are_skipped_even_with_override() {
    let request = ProcessingRequest {
        output: None,
        model_dir: None,
        ..full_request()
    };
    let mut options = OptionTable::default();
    options.output_file.argument = "forced.png".to_string();
    options.model_dir.argument = "/forced/models".to_string();

    let built = build_arguments(&request, &options);
    assert!(!built.args.iter().any(|a| a == "-o" || a == "--model-dir"));
}

#[test]
fn test_input_override_applies() {
    let mut options = OptionTable::default();
    options.input_file.argument = "-".to_string();
    let built = build_arguments(&full_request(), &options);
    let i = built.args.iter().position(|a| a == "-i").expect("input flag present");
    assert_eq!(built.args[i + 1], "-");
}

#[test]
fn test_displayed_values_track_emitted_arguments() {
    let mut options = OptionTable::default();
    options.jobs.ignored = true;
    options.scale_ratio.argument = "4".to_string();

    let built = build_arguments(&full_request(), &options);
    assert_eq!(built.threads, None);
    assert_eq!(built.scale_ratio.as_deref(), Some("4"));
    assert_eq!(built.noise_level.as_deref(), Some("1"));
    assert_eq!(built.mode.as_deref(), Some("noise_scale"));
}

#[test]
fn test_request_from_saved_settings() {
    let mut config = ConverterConfig::default();
    config.threads = 2;
    config.scale_ratio = 1.25;
    config.noise_level = 0;
    config.process_mode = "scale".to_string();

    let request = ProcessingRequest::from_config("dog.jpg", None, &config);
    let built = build_arguments(&request, &config.options);
    assert_eq!(
        built.args,
        vec!["-j", "2", "-s", "1.25", "-n", "0", "-m", "scale", "-i", "dog.jpg"]
    );
}
