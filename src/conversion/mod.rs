//! # Conversion Module
//!
//! Turns a [`ProcessingRequest`] and the stored flag settings into a running
//! `waifu2x-converter-cpp` process.
//!
//! - [`request`]: the immutable per-conversion values
//! - [`arguments`]: argument vector construction
//! - [`job`]: subprocess lifecycle and console relay

pub mod arguments;
pub mod job;
pub mod request;

use std::sync::Arc;

pub use arguments::{build_arguments, format_scale_ratio, BuiltArguments};
pub use job::{classify_exit, ConversionJob, ExitOutcome, JobState};
pub use request::ProcessingRequest;

use crate::config::ConverterConfig;
use crate::notifier::Notifier;

/// Build the argument vector for `request` and an idle job that will run it
/// with the configured converter executable
pub fn prepare_job(
    config: &ConverterConfig,
    request: &ProcessingRequest,
    notifier: Arc<dyn Notifier>,
) -> (BuiltArguments, ConversionJob) {
    let built = build_arguments(request, &config.options);
    let job = ConversionJob::new(config.command.clone(), built.args.clone(), notifier);
    (built, job)
}
