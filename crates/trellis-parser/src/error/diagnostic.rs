//! The core diagnostic type for the Trellis error system.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message with source location information.
///
/// # Example
///
/// ```text
/// error[E201]: view `header` is declared multiple times
///   --> layout.trl:4:6
///    |
///  4 | view header in root;
///    |      ^^^^^^ duplicate declaration
///    |
///  2 | view header;
///    |      ------ first declared here
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E200]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("test error");

        assert!(diag.severity().is_error());
        assert_eq!(diag.message(), "test error");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("view `a` is declared multiple times")
            .with_code(ErrorCode::E201)
            .with_label(Span::new(20..21), "duplicate declaration")
            .with_secondary_label(Span::new(5..6), "first declared here")
            .with_help("rename one of the views");

        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.help(), Some("rename one of the views"));
    }

    #[test]
    fn test_diagnostic_display() {
        let with_code = Diagnostic::error("undefined view `x`").with_code(ErrorCode::E200);
        assert_eq!(with_code.to_string(), "error[E200]: undefined view `x`");

        let without_code = Diagnostic::warning("view `x` is never assigned");
        assert_eq!(without_code.to_string(), "warning: view `x` is never assigned");
    }
}
