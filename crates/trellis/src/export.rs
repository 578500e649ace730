//! Exporters turning a finished layout into an output document.

pub mod svg;
pub mod text;

use thiserror::Error;

use crate::pass::LayoutResult;

/// A format a [`LayoutResult`] can be written in.
pub trait Exporter {
    /// Renders the layout to the exporter's textual format.
    fn render(&self, layout: &LayoutResult) -> Result<String, Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),
}
