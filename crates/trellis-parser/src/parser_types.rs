//! Syntax tree produced by the parser, before name resolution.
//!
//! Names are still borrowed source slices and attribute names are
//! unchecked; [`crate::elaborate`] turns these into a [`crate::Script`].

use trellis_core::value::ScaledValue;

use crate::span::{Span, Spanned};

/// `view NAME [in PARENT] [frame(x, y, w, h)] [scale N];`
#[derive(Debug, Clone, PartialEq)]
pub struct ViewStatement<'src> {
    pub name: Spanned<&'src str>,
    pub parent: Option<Spanned<&'src str>>,
    pub frame: Option<Spanned<[f32; 4]>>,
    pub scale: Option<Spanned<f32>>,
    pub span: Span,
}

/// `NAME.ATTR`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reference<'src> {
    pub view: Spanned<&'src str>,
    pub attribute: Spanned<&'src str>,
}

impl Reference<'_> {
    pub fn span(&self) -> Span {
        self.view.span().union(self.attribute.span())
    }
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression<'src> {
    /// `fixed(N)`, `scalable(N)` or a bare number.
    Length(Spanned<ScaledValue>),
    /// `(LENGTH, LENGTH)`
    Pair(Spanned<(ScaledValue, ScaledValue)>),
    /// `NAME.ATTR [(+|-) LENGTH]`; a `-` is already folded into the offset.
    Reference {
        reference: Reference<'src>,
        offset: Option<Spanned<ScaledValue>>,
    },
}

impl Expression<'_> {
    pub fn span(&self) -> Span {
        match self {
            Expression::Length(length) => length.span(),
            Expression::Pair(pair) => pair.span(),
            Expression::Reference { reference, offset } => offset
                .as_ref()
                .map_or(reference.span(), |offset| reference.span().union(offset.span())),
        }
    }
}

/// `NAME.ATTR = EXPR;`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStatement<'src> {
    pub target: Reference<'src>,
    pub value: Expression<'src>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement<'src> {
    View(ViewStatement<'src>),
    Assign(AssignStatement<'src>),
}
