//! Command-line argument definitions for the GPML CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the target version,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the GPML converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input GPML file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output GPML file
    #[arg(short, long, default_value = "out.gpml")]
    pub output: String,

    /// Version to write (2013a, 2017 or 2021), overriding the configuration
    #[arg(long)]
    pub to: Option<String>,

    /// Validate the input document against its schema before converting
    #[arg(long)]
    pub validate: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
