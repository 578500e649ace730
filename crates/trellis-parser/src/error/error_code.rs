//! Error codes for the Trellis diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Lexer errors
//! - `E1xx` - Parser errors
//! - `E2xx` - Elaboration errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Lexer Errors (E0xx)
    // =========================================================================
    /// Unexpected character.
    ///
    /// A character was encountered that does not start any token.
    E001,

    /// Invalid number.
    ///
    /// A literal starts with a digit but is not a number, e.g. `1e` or `12px`.
    E002,

    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Unexpected token.
    ///
    /// The parser encountered a token it did not expect at this position.
    E100,

    /// Incomplete input.
    ///
    /// The input ended before a complete statement was parsed.
    E101,

    // =========================================================================
    // Elaboration Errors (E2xx)
    // =========================================================================
    /// Undefined view.
    ///
    /// A view was referenced that is never declared.
    E200,

    /// Duplicate view declaration.
    E201,

    /// Unknown attribute.
    ///
    /// The name after `.` is not one of `top`, `left`, `bottom`, `right`,
    /// `center_x`, `center_y`, `width`, `height` or `size`.
    E202,

    /// Size/scalar mismatch.
    ///
    /// A pair was assigned to a scalar attribute, or a scalar to `size`.
    E203,

    /// Parent declared after use.
    ///
    /// A view names a container that is only declared further down.
    E204,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E200").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unexpected character",
            ErrorCode::E002 => "invalid number",
            ErrorCode::E100 => "unexpected token",
            ErrorCode::E101 => "incomplete input",
            ErrorCode::E200 => "undefined view",
            ErrorCode::E201 => "duplicate view",
            ErrorCode::E202 => "unknown attribute",
            ErrorCode::E203 => "size/scalar mismatch",
            ErrorCode::E204 => "parent declared after use",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E204.to_string(), "E204");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E002.description(), "invalid number");
        assert_eq!(ErrorCode::E101.description(), "incomplete input");
        assert_eq!(ErrorCode::E200.description(), "undefined view");
        assert_eq!(ErrorCode::E203.description(), "size/scalar mismatch");
    }
}
