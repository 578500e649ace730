//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a location in the source.
///
/// A diagnostic normally carries one primary label marking where the problem
/// is, plus optional secondary labels for context such as "first declared
/// here".
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(10..20), "error here");
        assert_eq!(label.span(), Span::new(10..20));
        assert_eq!(label.message(), "error here");
        assert!(label.is_primary());
        assert!(!label.is_secondary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(5..15), "first declared here");
        assert_eq!(label.span().start(), 5);
        assert!(label.is_secondary());
    }
}
