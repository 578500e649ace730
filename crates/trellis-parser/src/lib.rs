//! # Trellis Parser
//!
//! Parser for the Trellis layout-script language. A script declares views
//! and then positions them relative to each other:
//!
//! ```text
//! view root frame(0, 0, 375, 667);
//! view header in root;
//! header.size = (fixed(375), scalable(64));
//! header.top = root.top;
//! ```
//!
//! ## Usage
//!
//! ```
//! # use trellis_parser::{parse, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let script = parse("view root frame(0, 0, 100, 100); view dot in root; dot.size = (4, 4);")?;
//!     assert_eq!(script.views().len(), 2);
//!     assert_eq!(script.assignments().len(), 1);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod lexer;
mod parser;
mod parser_types;
mod script;
mod span;
mod tokens;

pub use script::{Assignment, Expr, Property, Script, ViewDecl};
pub use span::Span;

use log::debug;

use elaborate::Builder;
use error::ParseError;

/// Parse source text into a checked [`Script`].
///
/// The pipeline is:
///
/// 1. **Tokenize** - source text to tokens, reporting every stray character
/// 2. **Parse** - tokens to statements, stopping at the first syntax error
/// 3. **Elaborate** - resolve names and check value shapes, reporting every
///    semantic error
///
/// # Errors
///
/// Returns a [`ParseError`] carrying one or more diagnostics with source
/// spans when the script is malformed.
pub fn parse(source: &str) -> Result<Script, ParseError> {
    let tokens = lexer::tokenize(source)?;
    debug!(tokens = tokens.len(); "Source tokenized");

    let statements = parser::build_statements(&tokens)?;
    debug!(statements = statements.len(); "Statements parsed");

    Builder::new().build(&statements)
}
