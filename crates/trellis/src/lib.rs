//! Trellis - a relative-positioning layout engine for rectangular views.
//!
//! Views are declared in a small layout script, each one positioned and
//! sized by copying attributes (edges, centers, dimensions) from other views
//! with fixed or scalable offsets. This crate builds the view hierarchy,
//! orders the assignments, runs the layout pass and exports the result.

pub mod color;
pub mod config;
pub mod export;
pub mod pass;
pub mod structure;

mod error;

pub use trellis_core::{attribute, geometry, hierarchy, identifier, node, value};
pub use trellis_parser::Script;

pub use error::{HierarchyError, TrellisError};

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use pass::{LayoutPass, LayoutResult};

/// Builder for parsing, laying out and rendering Trellis scripts.
///
/// # Examples
///
/// ```rust
/// use trellis::{LayoutBuilder, config::AppConfig, identifier::Key};
///
/// let source = "
///     view screen frame(0, 0, 320, 480);
///     view header in screen;
///     header.width = screen.width;
///     header.height = 64;
/// ";
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let script = builder.parse(source).expect("Failed to parse");
/// let layout = builder.layout(&script).expect("Failed to lay out");
///
/// let header = layout.frame(Key::new("header")).unwrap();
/// assert_eq!(header.width(), 320.0);
///
/// let svg = builder.render_svg(&layout).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration this builder was created with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a layout script.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Parse`] carrying every diagnostic together with
    /// the source, for syntax errors and semantic errors alike.
    pub fn parse(&self, source: &str) -> Result<Script, TrellisError> {
        info!("Parsing layout script");

        let script = trellis_parser::parse(source)
            .map_err(|err| TrellisError::new_parse_error(err, source))?;

        debug!(
            views = script.views().len(),
            assignments = script.assignments().len();
            "Script parsed successfully"
        );
        trace!(script:?; "Parsed script");

        Ok(script)
    }

    /// Run the layout pass over a parsed script.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Hierarchy`] for circular dependencies and
    /// [`TrellisError::Config`] for rejected multipliers.
    pub fn layout(&self, script: &Script) -> Result<LayoutResult, TrellisError> {
        let pass = LayoutPass::new(script, self.config.layout())?;
        let result = pass.run()?;
        info!(views = result.len(); "Layout calculated");
        Ok(result)
    }

    /// Render a finished layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Export`] if the style configuration is invalid.
    pub fn render_svg(&self, layout: &LayoutResult) -> Result<String, TrellisError> {
        let exporter = export::svg::Svg::new(self.config.style())?;
        let svg = exporter.render(layout)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render a finished layout as a plain-text frame listing.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Export`] if formatting fails.
    pub fn render_text(&self, layout: &LayoutResult) -> Result<String, TrellisError> {
        Ok(export::text::Text.render(layout)?)
    }
}
