//! The elaborated form of a layout script.
//!
//! A [`Script`] is what the layout pass consumes: resolved view keys, typed
//! attributes and values, and the source span of every statement for error
//! reporting. Declarations and assignments keep their source order.

use std::fmt;

use trellis_core::{
    attribute::{Attribute, Axis},
    geometry::Frame,
    identifier::Key,
    value::{ScaledSize, ScaledValue},
};

use crate::{error::Diagnostic, span::Span};

/// A `view` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewDecl {
    key: Key,
    parent: Option<Key>,
    frame: Frame,
    multiplier: Option<f32>,
    span: Span,
}

impl ViewDecl {
    pub(crate) fn new(
        key: Key,
        parent: Option<Key>,
        frame: Frame,
        multiplier: Option<f32>,
        span: Span,
    ) -> Self {
        Self {
            key,
            parent,
            frame,
            multiplier,
            span,
        }
    }

    pub fn key(&self) -> Key {
        self.key
    }

    /// The container this view lives in, or `None` for a root.
    pub fn parent(&self) -> Option<Key> {
        self.parent
    }

    /// Initial frame, in the parent's coordinate space. Zero when the
    /// declaration has no `frame(...)` clause.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Per-view `scale` override, if any.
    pub fn multiplier(&self) -> Option<f32> {
        self.multiplier
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// The left-hand attribute of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// One of the eight scalar attributes.
    Scalar(Attribute),
    /// The compound `size` attribute.
    Size,
}

impl Property {
    /// The axes an assignment to this property writes along.
    pub fn axes(self) -> &'static [Axis] {
        match self {
            Property::Scalar(attribute) => match attribute.axis() {
                Axis::Horizontal => &[Axis::Horizontal],
                Axis::Vertical => &[Axis::Vertical],
            },
            Property::Size => &Axis::ALL,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::Scalar(attribute) => write!(f, "{attribute}"),
            Property::Size => write!(f, "size"),
        }
    }
}

/// The right-hand side of an assignment, already checked against its
/// [`Property`]: scalar properties only ever receive [`Expr::Length`] or
/// [`Expr::Read`], `size` only [`Expr::Size`] or [`Expr::ReadSize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr {
    /// A literal length, resolved against the target's multiplier.
    Length(ScaledValue),
    /// Another view's scalar attribute plus an offset.
    Read {
        source: Key,
        attribute: Attribute,
        offset: ScaledValue,
    },
    /// A literal size.
    Size(ScaledSize),
    /// Another view's size.
    ReadSize { source: Key },
}

impl Expr {
    /// The view this expression reads from, if any.
    pub fn source(&self) -> Option<Key> {
        match self {
            Expr::Read { source, .. } | Expr::ReadSize { source } => Some(*source),
            Expr::Length(_) | Expr::Size(_) => None,
        }
    }
}

/// `target.attribute = value;`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    target: Key,
    attribute: Property,
    value: Expr,
    span: Span,
}

impl Assignment {
    pub(crate) fn new(target: Key, attribute: Property, value: Expr, span: Span) -> Self {
        Self {
            target,
            attribute,
            value,
            span,
        }
    }

    pub fn target(&self) -> Key {
        self.target
    }

    pub fn attribute(&self) -> Property {
        self.attribute
    }

    pub fn value(&self) -> &Expr {
        &self.value
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// A parsed and checked layout script.
#[derive(Debug, Clone, Default)]
pub struct Script {
    views: Vec<ViewDecl>,
    assignments: Vec<Assignment>,
    warnings: Vec<Diagnostic>,
}

impl Script {
    pub(crate) fn new(
        views: Vec<ViewDecl>,
        assignments: Vec<Assignment>,
        warnings: Vec<Diagnostic>,
    ) -> Self {
        Self {
            views,
            assignments,
            warnings,
        }
    }

    /// View declarations in source order.
    pub fn views(&self) -> &[ViewDecl] {
        &self.views
    }

    /// Assignments in source order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Non-fatal diagnostics raised while checking the script.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    /// Looks up a view declaration by key.
    pub fn view(&self, key: Key) -> Option<&ViewDecl> {
        self.views.iter().find(|view| view.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_axes() {
        assert_eq!(
            Property::Scalar(Attribute::CenterX).axes(),
            &[Axis::Horizontal]
        );
        assert_eq!(Property::Scalar(Attribute::Height).axes(), &[Axis::Vertical]);
        assert_eq!(Property::Size.axes(), &Axis::ALL);
    }
}
