//! Command-line construction for `waifu2x-converter-cpp`.

use std::path::Path;

use crate::config::{ConverterOption, OptionTable};
use super::request::ProcessingRequest;

/// The argument vector plus the effective values that went into it
///
/// A value field is `None` when its flag was ignored, so the dialog can hide
/// the corresponding row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuiltArguments {
    pub args: Vec<String>,
    pub threads: Option<String>,
    pub scale_ratio: Option<String>,
    pub noise_level: Option<String>,
    pub mode: Option<String>,
}

impl BuiltArguments {
    /// Arguments joined with single spaces, as echoed to the console
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

const SIGNIFICANT_DIGITS: i32 = 6;

/// Format a scale ratio like C's `%g`: six significant digits, trailing
/// zeros removed. 2.0 becomes "2", 1.2345678 becomes "1.23457".
///
/// Ratios too large or small for fixed notation under `%g` still print in
/// fixed notation; the main window clamps them to 1..=16 anyway.
pub fn format_scale_ratio(ratio: f64) -> String {
    if !ratio.is_finite() {
        return ratio.to_string();
    }
    if ratio == 0.0 {
        return "0".to_string();
    }
    let exponent = ratio.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - exponent).max(0) as usize;
    let text = format!("{:.*}", decimals, ratio);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

fn path_value(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
        .filter(|p| !p.is_empty())
}

/// Build the converter's argument vector
///
/// Flags are emitted in a fixed order: jobs, scale, noise, mode, input,
/// output, model directory. An ignored flag is left out together with its
/// value. A non-empty override argument replaces the request's value
/// verbatim. Output and model directory are also left out when the request
/// has no value for them. A blank flag token falls back to the option's
/// default flag.
pub fn build_arguments(request: &ProcessingRequest, options: &OptionTable) -> BuiltArguments {
    let mut built = BuiltArguments::default();

    let mut emit = |option: ConverterOption, value: Option<String>| -> Option<String> {
        let setting = options.get(option);
        if setting.ignored {
            return None;
        }
        let value = value?;
        let effective = setting
            .override_argument()
            .map(str::to_string)
            .unwrap_or(value);
        let flag = if setting.flag.trim().is_empty() {
            option.default_flag().to_string()
        } else {
            setting.flag.clone()
        };
        built.args.push(flag);
        built.args.push(effective.clone());
        Some(effective)
    };

    let threads = emit(ConverterOption::Jobs, Some(request.threads.to_string()));
    let scale_ratio = emit(
        ConverterOption::ScaleRatio,
        Some(format_scale_ratio(request.scale_ratio)),
    );
    let noise_level = emit(ConverterOption::NoiseLevel, Some(request.noise_level.to_string()));
    let mode = emit(ConverterOption::Mode, Some(request.mode.clone()));
    emit(
        ConverterOption::InputFile,
        Some(request.input.to_string_lossy().into_owned()),
    );
    emit(ConverterOption::OutputFile, path_value(request.output.as_deref()));
    emit(ConverterOption::ModelDir, path_value(request.model_dir.as_deref()));

    built.threads = threads;
    built.scale_ratio = scale_ratio;
    built.noise_level = noise_level;
    built.mode = mode;
    built
}
