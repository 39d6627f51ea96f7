//! Crate-level error type.

use crate::lexer::LexError;
use crate::parser::ParseError;

/// Anything that can stop a script from being parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The script could not be tokenized.
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    /// A strict-mode parse reported a diagnostic.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Result alias for the crate's entry points.
pub type Result<T> = core::result::Result<T, Error>;
