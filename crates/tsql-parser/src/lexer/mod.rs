//! T-SQL Lexer/Tokenizer
//!
//! Produces the token stream the parser consumes. Whitespace and comments are
//! discarded; every other token keeps its verbatim source text.

mod error;
mod span;
mod token;
mod tokenizer;

pub use error::LexError;
pub use span::{Location, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
