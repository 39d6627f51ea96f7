//! Lexer error types.

use super::{Location, Span};

/// A malformed token. The lexer stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    /// A `'...'` literal without its closing quote.
    #[error("unterminated string literal starting at {location}")]
    UnterminatedString {
        /// Where the literal starts.
        span: Span,
        /// Line/column of the opening quote.
        location: Location,
    },

    /// A `"..."` or `[...]` identifier without its closing delimiter.
    #[error("unterminated quoted identifier starting at {location}")]
    UnterminatedIdentifier {
        /// Where the identifier starts.
        span: Span,
        /// Line/column of the opening delimiter.
        location: Location,
    },

    /// A `/* ... */` comment that runs to the end of input.
    #[error("unterminated block comment starting at {location}")]
    UnterminatedComment {
        /// Where the comment starts.
        span: Span,
        /// Line/column of the opening `/*`.
        location: Location,
    },

    /// A character that cannot start any token.
    #[error("unexpected character {character:?} at {location}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte range of the character.
        span: Span,
        /// Line/column of the character.
        location: Location,
    },
}

impl LexError {
    /// Returns the location of the error.
    #[must_use]
    pub const fn location(&self) -> Location {
        match self {
            Self::UnterminatedString { location, .. }
            | Self::UnterminatedIdentifier { location, .. }
            | Self::UnterminatedComment { location, .. }
            | Self::UnexpectedCharacter { location, .. } => *location,
        }
    }
}
