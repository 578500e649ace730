//! Error and diagnostic system for the Trellis parser.
//!
//! Every phase (lexing, parsing, elaboration) reports problems as
//! [`Diagnostic`]s: a severity, an optional [`ErrorCode`], labelled source
//! spans and optional help text. One or more diagnostics are wrapped in a
//! [`ParseError`] when they leave the crate.
//!
//! # Example
//!
//! ```
//! # use trellis_parser::error::{Diagnostic, ErrorCode};
//! # use trellis_parser::Span;
//! let diag = Diagnostic::error("view `header` is declared multiple times")
//!     .with_code(ErrorCode::E201)
//!     .with_label(Span::new(40..46), "duplicate declaration")
//!     .with_secondary_label(Span::new(5..11), "first declared here")
//!     .with_help("rename one of the views");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
