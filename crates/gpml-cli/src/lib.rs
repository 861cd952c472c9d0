//! GPML CLI library
//!
//! This module contains the core CLI logic for the GPML converter.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use log::info;

use gpml::{FormatVersion, GpmlError, PathwayConverter};

/// Run the GPML CLI application
///
/// This function reads the input document, converts it to the configured
/// version and writes the result to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `GpmlError` for:
/// - File I/O errors
/// - Configuration loading errors and an invalid `--to` version
/// - Malformed, invalid or unsupported documents
pub fn run(args: &Args) -> Result<(), GpmlError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing pathway"
    );

    let cli_config = config::load_config(args.config.as_ref())?;
    let (mut convert_config, mut catalog) = cli_config.into_parts();

    if let Some(to) = &args.to {
        let version: FormatVersion = to.parse().map_err(GpmlError::Config)?;
        convert_config = convert_config.with_output_version(version);
    }
    if args.validate {
        convert_config = convert_config.with_validate_input(true);
    }

    let converter = PathwayConverter::new(convert_config);
    converter.convert_file(&args.input, &args.output, &mut catalog)?;

    info!(output_file = args.output; "Pathway exported successfully");

    Ok(())
}
