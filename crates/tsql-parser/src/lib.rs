//! # tsql-parser
//!
//! A lenient recursive-descent parser for Transact-SQL scripts.
//!
//! This crate provides:
//! - A lexer producing a flat token stream with spans and line/column locations
//! - A hand-written recursive descent parser with Pratt expression parsing
//! - A typed, `serde`-serializable syntax tree covering DML, queries and a wide
//!   slice of DDL (`CREATE`/`ALTER`/`DROP` for tables, indexes, databases,
//!   routines, principals and more)
//!
//! ## Lenient parsing
//!
//! A malformed statement does not stop the script. The error is recorded, the
//! partially built statement is kept and parsing resumes at the next
//! statement boundary:
//!
//! ```rust
//! use tsql_parser::ast::Statement;
//!
//! let script = tsql_parser::parse(
//!     "CREATE TABLE dbo.t (id INT NOT NULL PRIMARY KEY, name NVARCHAR(100) NULL);
//!      DROP TABLE IF EXISTS a, b, c",
//! )
//! .unwrap();
//!
//! assert_eq!(script.statements.len(), 2);
//! let Statement::DropTable(drop) = &script.statements[1] else {
//!     panic!("expected DROP TABLE");
//! };
//! assert_eq!(drop.objects.len(), 3);
//! ```
//!
//! ## Strict parsing
//!
//! In strict mode the first diagnostic becomes an error:
//!
//! ```rust
//! assert!(tsql_parser::parse_strict("SELECT 1").is_ok());
//! assert!(tsql_parser::parse_strict("SELECT FROM WHERE").is_err());
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Statement, StatementFamily};
pub use config::ParserOptions;
pub use error::{Error, Result};
pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};

/// The statements of one script, plus the first diagnostic when parsing in
/// strict mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScript {
    /// Statements in source order, including partially parsed ones.
    pub statements: Vec<Statement>,
    /// The first recorded diagnostic. Only set when `strict` is on.
    pub error: Option<ParseError>,
}

/// Parses a script with the default, lenient options.
///
/// # Errors
///
/// Returns [`Error::Lex`] when the input cannot be tokenized.
pub fn parse(sql: &str) -> Result<ParsedScript> {
    parse_with_options(sql, &ParserOptions::default())
}

/// Parses a script with the given options.
///
/// # Errors
///
/// Returns [`Error::Lex`] when the input cannot be tokenized. Parse errors
/// never fail this call; see [`ParsedScript::error`].
pub fn parse_with_options(sql: &str, options: &ParserOptions) -> Result<ParsedScript> {
    let tokens = Lexer::new(sql).tokenize()?;
    let mut parser = Parser::new(tokens, options.clone());
    let statements = parser.parse_script();
    let error = if options.strict {
        parser.diagnostics().first().cloned()
    } else {
        None
    };
    Ok(ParsedScript { statements, error })
}

/// Parses a script and fails on the first diagnostic.
///
/// # Errors
///
/// Returns [`Error::Lex`] for untokenizable input and [`Error::Parse`] for the
/// first parse error.
pub fn parse_strict(sql: &str) -> Result<Vec<Statement>> {
    let script = parse_with_options(sql, &ParserOptions::strict())?;
    match script.error {
        Some(error) => Err(error.into()),
        None => Ok(script.statements),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script() {
        let script = parse("").unwrap();
        assert!(script.statements.is_empty());
        assert!(script.error.is_none());

        let script = parse("  ;; -- nothing here\n /* or here */ ").unwrap();
        assert!(script.statements.is_empty());
    }

    #[test]
    fn lenient_mode_drops_the_diagnostic() {
        let script = parse("SELECT FROM; SELECT 1").unwrap();
        assert!(script.error.is_none());
        assert_eq!(script.statements.last().map(Statement::tag), Some("Select"));
    }

    #[test]
    fn strict_mode_keeps_the_forest() {
        let script =
            parse_with_options("SELECT FROM; SELECT 1", &ParserOptions::strict()).unwrap();
        assert!(script.error.is_some());
        assert_eq!(script.statements.len(), 2);
    }

    #[test]
    fn lex_errors_fail_the_call() {
        assert!(matches!(parse("SELECT 'open"), Err(Error::Lex(_))));
        assert!(matches!(parse_strict("SELEC 1"), Err(Error::Parse(_))));
    }
}
