//! Tokens of the layout-script language.

use std::fmt;

use crate::span::Span;

/// Token types for the layout-script language.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'src> {
    // Keywords
    View,
    In,
    Frame,
    Scale,
    Fixed,
    Scalable,

    // Literals
    Number(f32),
    Identifier(&'src str),

    // Operators
    Equals, // =
    Plus,   // +
    Minus,  // -
    Dot,    // .

    // Punctuation
    LeftParen,  // (
    RightParen, // )
    Semicolon,  // ;
    Comma,      // ,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::View => write!(f, "view"),
            Token::In => write!(f, "in"),
            Token::Frame => write!(f, "frame"),
            Token::Scale => write!(f, "scale"),
            Token::Fixed => write!(f, "fixed"),
            Token::Scalable => write!(f, "scalable"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Identifier(name) => write!(f, "{name}"),
            Token::Equals => write!(f, "="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Dot => write!(f, "."),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),
        }
    }
}

/// A token with its source span.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}
