//! Error types for Trellis operations.
//!
//! [`TrellisError`] wraps everything that can go wrong between reading a
//! layout script and writing its SVG; [`HierarchyError`] covers the
//! structural problems found while building the view tree and ordering the
//! pass.

use std::io;

use thiserror::Error;

use trellis_core::identifier::Key;
use trellis_parser::error::ParseError;

/// The main error type for Trellis operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the script source next to the structured
/// diagnostics so callers can render labelled snippets.
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for TrellisError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl TrellisError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}

/// Structural problems in the view tree or its read dependencies.
///
/// All of these abort the layout pass; no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("view `{0}` is registered twice")]
    DuplicateView(Key),

    #[error("view `{key}` is placed in unknown view `{parent}`")]
    UnknownParent { key: Key, parent: Key },

    #[error("unknown view `{0}`")]
    UnknownView(Key),

    #[error("circular dependency involving view `{key}`")]
    Cycle { key: Key },
}
