//! CLI logic for the Trellis layout tool.
//!
//! Reads a layout script, runs the layout pass and writes the result as SVG
//! or as a plain-text frame listing.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::{info, warn};

use trellis::{LayoutBuilder, Script, TrellisError};

use error_adapter::warnings_to_reportables;

/// Run the Trellis CLI application
///
/// This function processes the input file through the Trellis pipeline
/// and writes the rendered layout to the output file.
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Hierarchy and layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format:? = args.format;
        "Processing layout"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = LayoutBuilder::new(app_config);
    let script = builder.parse(&source)?;
    report_warnings(&script, &source);

    let layout = builder.layout(&script)?;
    let output = match args.format {
        OutputFormat::Svg => builder.render_svg(&layout)?,
        OutputFormat::Text => builder.render_text(&layout)?,
    };

    fs::write(&args.output, output)?;

    info!(output_file = args.output; "Layout exported successfully");

    Ok(())
}

/// Logs every script warning with a labelled source snippet.
fn report_warnings(script: &Script, source: &str) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in warnings_to_reportables(script.warnings(), source) {
        let mut writer = String::new();
        match reporter.render_report(&mut writer, &reportable) {
            Ok(()) => warn!("{writer}"),
            Err(_) => warn!("{reportable}"),
        }
    }
}
