//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, output format,
//! configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Command-line arguments for the Trellis layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input layout script
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,
}

/// What the CLI writes to the output file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// An SVG drawing with one rectangle per view.
    #[default]
    Svg,
    /// A plain-text listing of every frame.
    Text,
}
