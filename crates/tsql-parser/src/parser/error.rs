//! Parser error types.

use crate::lexer::{Location, Span, Token};

/// A parse error.
///
/// In lenient mode these are recorded as diagnostics and the parser moves on;
/// in strict mode the first one is surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {location}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// Byte range of the offending token.
    pub span: Span,
    /// Line/column of the offending token.
    pub location: Location,
    /// What the parser was looking for, if applicable.
    pub expected: Option<String>,
    /// Verbatim text of the token found instead.
    pub found: Option<String>,
}

/// Result alias used by every parsing routine.
pub type PResult<T> = Result<T, ParseError>;

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, span: Span, location: Location) -> Self {
        Self {
            message: message.into(),
            span,
            location,
            expected: None,
            found: None,
        }
    }

    /// Creates an "unexpected token" error, or an end-of-input error when
    /// `found` is the EOF sentinel.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        if found.is_eof() {
            return Self::unexpected_eof(expected, found);
        }
        let expected: String = expected.into();
        Self {
            message: format!("expected {expected}, found '{}'", found.literal),
            span: found.span,
            location: found.location,
            expected: Some(expected),
            found: Some(found.literal.clone()),
        }
    }

    /// Creates an "unexpected end of input" error.
    #[must_use]
    pub fn unexpected_eof(expected: impl Into<String>, eof: &Token) -> Self {
        let expected: String = expected.into();
        Self {
            message: format!("unexpected end of input, expected {expected}"),
            span: eof.span,
            location: eof.location,
            expected: Some(expected),
            found: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn unexpected_carries_expected_and_found() {
        let token = Token::new(
            TokenKind::Comma,
            ",",
            Span::new(4, 5),
            Location { line: 2, column: 3 },
        );
        let err = ParseError::unexpected("identifier", &token);
        assert_eq!(err.expected.as_deref(), Some("identifier"));
        assert_eq!(err.found.as_deref(), Some(","));
        assert_eq!(err.to_string(), "expected identifier, found ',' at 2:3");
    }

    #[test]
    fn unexpected_at_eof() {
        let err = ParseError::unexpected("')'", &Token::eof(10, Location::default()));
        assert!(err.found.is_none());
        assert!(err.message.starts_with("unexpected end of input"));
    }
}
