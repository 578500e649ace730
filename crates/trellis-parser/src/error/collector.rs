//! Collector for accumulating diagnostics during a processing phase.

use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so a phase can report every problem it finds
/// instead of stopping at the first one.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Returns `true` once any error-severity diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finish collection.
    ///
    /// Returns every diagnostic as a [`ParseError`] if any of them is an
    /// error, otherwise the warnings (possibly none).
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
