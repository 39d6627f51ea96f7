//! The parser state and its single-token look-ahead cursor.

use super::error::{PResult, ParseError};
use crate::config::ParserOptions;
use crate::lexer::{Keyword, Location, Token, TokenKind};

/// T-SQL parser over a pre-lexed token stream.
///
/// One parser owns one stream and one cursor; every sub-parser advances the
/// same cursor, which never moves backwards.
#[derive(Debug)]
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    pub(super) options: ParserOptions,
    pub(super) diagnostics: Vec<ParseError>,
    pub(super) depth: usize,
}

impl Parser {
    /// Creates a parser. An `Eof` sentinel is appended if the stream lacks one.
    #[must_use]
    pub fn new(mut tokens: Vec<Token>, options: ParserOptions) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let (offset, location) = tokens
                .last()
                .map_or((0, Location::default()), |t| (t.span.end, t.location));
            tokens.push(Token::eof(offset, location));
        }
        Self {
            tokens,
            pos: 0,
            options,
            diagnostics: Vec::new(),
            depth: 0,
        }
    }

    /// Diagnostics recorded so far, in source order.
    #[must_use]
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    /// The options this parser was built with.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The current token, without consuming it.
    pub(crate) fn current(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    /// The token after the current one.
    pub(crate) fn peek(&self) -> &Token {
        self.nth(1)
    }

    /// The token `offset` places ahead; clamps to the `Eof` sentinel.
    pub(crate) fn nth(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Consumes the current token and returns it. At EOF the cursor stays put.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(kind.describe()))
        }
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.kind() == TokenKind::Keyword(keyword)
    }

    pub(crate) fn peek_keyword(&self, keyword: Keyword) -> bool {
        self.peek().kind == TokenKind::Keyword(keyword)
    }

    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(TokenKind::Keyword(keyword))
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> PResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error_here(keyword.as_str()))
        }
    }

    /// The current token's text, upper-cased.
    pub(crate) fn literal_upper(&self) -> String {
        self.current().literal.to_ascii_uppercase()
    }

    /// True if the current token is an unquoted word: a plain identifier or
    /// a reserved keyword.
    pub(crate) fn at_word(&self) -> bool {
        is_word_token(self.current())
    }

    /// Case-insensitive match of an unquoted word.
    pub(crate) fn is_word(&self, word: &str) -> bool {
        word_matches(self.current(), word)
    }

    pub(crate) fn peek_is_word(&self, word: &str) -> bool {
        word_matches(self.peek(), word)
    }

    pub(crate) fn is_any_word(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.is_word(w))
    }

    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        if self.is_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> PResult<()> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.error_here(word))
        }
    }

    /// Consumes any unquoted word and returns it upper-cased.
    pub(crate) fn expect_any_word(&mut self) -> PResult<String> {
        if self.at_word() {
            Ok(self.advance().literal.to_ascii_uppercase())
        } else {
            Err(self.error_here("keyword"))
        }
    }

    pub(crate) fn is_batch_separator(&self) -> bool {
        let token = self.current();
        token.kind == TokenKind::Identifier
            && token
                .literal
                .eq_ignore_ascii_case(&self.options.batch_separator)
    }

    /// Builds an "expected X" error at the current token.
    pub(crate) fn error_here(&self, expected: &str) -> ParseError {
        ParseError::unexpected(expected, self.current())
    }

    pub(crate) fn error_message(&self, message: impl Into<String>) -> ParseError {
        let token = self.current();
        ParseError::new(message, token.span, token.location)
    }

    /// Runs `f` one nesting level deeper, failing once `max_depth` is reached.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.error_message(format!(
                "nesting exceeds the limit of {} levels",
                self.options.max_depth
            )));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// `( f )`
    pub(crate) fn parenthesized<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.expect(TokenKind::LeftParen)?;
        let value = self.nested(f)?;
        self.expect(TokenKind::RightParen)?;
        Ok(value)
    }

    /// `item [, item ...]`
    pub(crate) fn comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = vec![item(self)?];
        while self.eat(TokenKind::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// `( item [, item ...] )`, allowing an empty list.
    pub(crate) fn parenthesized_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        self.expect(TokenKind::LeftParen)?;
        if self.eat(TokenKind::RightParen) {
            return Ok(Vec::new());
        }
        let items = self.nested(|p| p.comma_separated(&mut item))?;
        self.expect(TokenKind::RightParen)?;
        Ok(items)
    }

    /// Skips a balanced parenthesized group starting at the current `(`.
    pub(crate) fn skip_parenthesized(&mut self) {
        if !self.eat(TokenKind::LeftParen) {
            return;
        }
        let mut depth = 1usize;
        while depth > 0 && !self.at_eof() {
            match self.advance().kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
        }
    }
}

pub(crate) fn is_word_token(token: &Token) -> bool {
    matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword(_))
}

fn word_matches(token: &Token, word: &str) -> bool {
    is_word_token(token) && token.literal.eq_ignore_ascii_case(word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        let tokens = Lexer::new(sql).tokenize().unwrap();
        Parser::new(tokens, ParserOptions::default())
    }

    #[test]
    fn advance_stops_at_eof() {
        let mut p = parser("a");
        assert_eq!(p.advance().literal, "a");
        assert!(p.at_eof());
        p.advance();
        assert!(p.at_eof());
    }

    #[test]
    fn peek_is_single_token_lookahead() {
        let p = parser("create sequence s");
        assert!(p.check_keyword(Keyword::Create));
        assert!(p.peek_is_word("SEQUENCE"));
        assert_eq!(p.literal_upper(), "CREATE");
    }

    #[test]
    fn words_match_case_insensitively_but_not_quoted() {
        let p = parser("[online] Online");
        assert!(!p.is_word("ONLINE"));
        assert!(p.peek_is_word("online"));
    }

    #[test]
    fn expect_reports_found_token() {
        let mut p = parser("x");
        let err = p.expect(TokenKind::LeftParen).unwrap_err();
        assert_eq!(err.found.as_deref(), Some("x"));
        assert_eq!(err.expected.as_deref(), Some("'('"));
    }

    #[test]
    fn missing_eof_is_appended() {
        let p = Parser::new(Vec::new(), ParserOptions::default());
        assert!(p.at_eof());
    }

    #[test]
    fn nesting_limit_is_an_error() {
        let mut p = Parser::new(Vec::new(), ParserOptions::default().with_max_depth(1));
        let result = p.nested(|p| p.nested(|_| Ok(())));
        assert!(result.is_err());
        assert_eq!(p.depth, 0);
    }

    #[test]
    fn batch_separator_is_configurable() {
        let tokens = Lexer::new("go").tokenize().unwrap();
        let p = Parser::new(tokens.clone(), ParserOptions::default());
        assert!(p.is_batch_separator());
        let options = ParserOptions {
            batch_separator: "RUN".into(),
            ..ParserOptions::default()
        };
        assert!(!Parser::new(tokens, options).is_batch_separator());
    }
}
