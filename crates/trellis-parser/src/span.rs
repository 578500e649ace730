//! Byte-offset source spans.

use std::ops::Range;

/// A half-open byte range into the layout script source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Create a union of two spans (encompassing both)
    pub fn union(&self, other: Span) -> Span {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the span as a byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A value paired with the source location it was parsed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned<T> {
    value: T,
    span: Span,
}

impl<T> Spanned<T> {
    pub fn new(value: T, span: Span) -> Self {
        Self { value, span }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Get a reference to the underlying value
    pub fn inner(&self) -> &T {
        &self.value
    }

    /// Consume the wrapper and return just the inner value
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Transform the value while keeping the span.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Spanned<U> {
        Spanned {
            value: f(self.value),
            span: self.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(4..10);
        assert_eq!(span.start(), 4);
        assert_eq!(span.end(), 10);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::new(3..3).is_empty());
    }

    #[test]
    fn test_span_union_is_order_independent() {
        let a = Span::new(10..12);
        let b = Span::new(2..5);
        assert_eq!(a.union(b), Span::new(2..12));
        assert_eq!(b.union(a), Span::new(2..12));
    }

    #[test]
    fn test_spanned_map_keeps_span() {
        let spanned = Spanned::new("12", Span::new(1..3));
        let parsed = spanned.map(|s| s.len());
        assert_eq!(*parsed.inner(), 2);
        assert_eq!(parsed.span(), Span::new(1..3));
    }
}
