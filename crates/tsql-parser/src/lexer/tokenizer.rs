//! T-SQL tokenizer implementation.

use super::{Keyword, LexError, Location, Span, Token, TokenKind};

/// A lexer that tokenizes T-SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Line/column of the current position.
    location: Location,
    /// Line/column of the start of the current token.
    start_location: Location,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            location: Location::new(1, 1),
            start_location: Location::new(1, 1),
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the character after the current one without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.location.line += 1;
            self.location.column = 1;
        } else {
            self.location.column += 1;
        }
        Some(c)
    }

    /// Advances while `pred` holds.
    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Skips whitespace and comments. Block comments nest.
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            self.advance_while(char::is_whitespace);

            if self.peek() == Some('-') && self.peek_next() == Some('-') {
                self.advance_while(|c| c != '\n');
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                let start = self.pos;
                let location = self.location;
                self.advance();
                self.advance();
                let mut depth = 1usize;
                while depth > 0 {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            depth -= 1;
                        }
                        Some('/') if self.peek() == Some('*') => {
                            self.advance();
                            depth += 1;
                        }
                        Some(_) => {}
                        None => {
                            return Err(LexError::UnterminatedComment {
                                span: Span::new(start, self.pos),
                                location,
                            });
                        }
                    }
                }
                continue;
            }

            return Ok(());
        }
    }

    /// Creates a token spanning from the token start to the current position.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            &self.input[self.start..self.pos],
            Span::new(self.start, self.pos),
            self.start_location,
        )
    }

    fn is_identifier_part(c: char) -> bool {
        c.is_alphanumeric() || matches!(c, '_' | '$' | '#' | '@')
    }

    /// Scans an identifier or keyword. The first character is consumed.
    fn scan_identifier(&mut self) -> Token {
        self.advance_while(Self::is_identifier_part);
        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    /// Scans a delimited run such as `'...'`, `"..."` or `[...]`, where a
    /// doubled closing delimiter is an escape. The opening delimiter is consumed.
    fn scan_delimited(&mut self, close: char) -> Option<()> {
        loop {
            match self.advance()? {
                c if c == close => {
                    if self.peek() == Some(close) {
                        self.advance();
                    } else {
                        return Some(());
                    }
                }
                _ => {}
            }
        }
    }

    fn scan_string(&mut self, kind: TokenKind) -> Result<Token, LexError> {
        match self.scan_delimited('\'') {
            Some(()) => Ok(self.make_token(kind)),
            None => Err(LexError::UnterminatedString {
                span: Span::new(self.start, self.pos),
                location: self.start_location,
            }),
        }
    }

    fn scan_quoted_identifier(&mut self, close: char, kind: TokenKind) -> Result<Token, LexError> {
        match self.scan_delimited(close) {
            Some(()) => Ok(self.make_token(kind)),
            None => Err(LexError::UnterminatedIdentifier {
                span: Span::new(self.start, self.pos),
                location: self.start_location,
            }),
        }
    }

    /// Scans a number. The first character (digit or `.`) is consumed.
    fn scan_number(&mut self, first: char) -> Token {
        let mut kind = if first == '.' {
            TokenKind::Numeric
        } else {
            TokenKind::Integer
        };
        self.advance_while(|c| c.is_ascii_digit());

        if kind == TokenKind::Integer && self.peek() == Some('.') {
            kind = TokenKind::Numeric;
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            kind = TokenKind::Real;
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            self.advance_while(|c| c.is_ascii_digit());
        }

        self.make_token(kind)
    }

    /// Scans `$12.50` style money literals. The `$` is consumed.
    fn scan_money(&mut self) -> Token {
        if self.peek() == Some('-') {
            self.advance();
        }
        self.advance_while(|c| c.is_ascii_digit() || c == '.');
        self.make_token(TokenKind::Money)
    }

    /// Picks the compound-assignment form when the next character is `=`.
    fn with_assign(&mut self, plain: TokenKind, compound: TokenKind) -> Token {
        if self.peek() == Some('=') {
            self.advance();
            self.make_token(compound)
        } else {
            self.make_token(plain)
        }
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] for unterminated literals or comments and for
    /// characters that cannot start a token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;
        self.start = self.pos;
        self.start_location = self.location;

        let Some(c) = self.advance() else {
            return Ok(Token::eof(self.pos, self.location));
        };

        let token = match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '~' => self.make_token(TokenKind::BitNot),
            '+' => self.with_assign(TokenKind::Plus, TokenKind::PlusEq),
            '-' => self.with_assign(TokenKind::Minus, TokenKind::MinusEq),
            '*' => self.with_assign(TokenKind::Star, TokenKind::StarEq),
            '/' => self.with_assign(TokenKind::Slash, TokenKind::SlashEq),
            '%' => self.with_assign(TokenKind::Percent, TokenKind::PercentEq),
            '&' => self.with_assign(TokenKind::BitAnd, TokenKind::AndEq),
            '|' => self.with_assign(TokenKind::BitOr, TokenKind::OrEq),
            '^' => self.with_assign(TokenKind::BitXor, TokenKind::XorEq),
            '=' => self.make_token(TokenKind::Eq),
            ':' => {
                if self.peek() == Some(':') {
                    self.advance();
                    self.make_token(TokenKind::DoubleColon)
                } else {
                    self.make_token(TokenKind::Colon)
                }
            }
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                }
                Some('>') => {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                }
                _ => self.make_token(TokenKind::Lt),
            },
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::GtEq)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '!' => {
                let kind = match self.peek() {
                    Some('=') => TokenKind::NotEq,
                    Some('<') => TokenKind::NotLt,
                    Some('>') => TokenKind::NotGt,
                    _ => return Err(self.unexpected('!')),
                };
                self.advance();
                self.make_token(kind)
            }
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number('.')
                } else {
                    self.make_token(TokenKind::Dot)
                }
            }
            '\'' => self.scan_string(TokenKind::String)?,
            'N' | 'n' if self.peek() == Some('\'') => {
                self.advance();
                self.scan_string(TokenKind::NationalString)?
            }
            '"' => self.scan_quoted_identifier('"', TokenKind::QuotedIdentifier)?,
            '[' => self.scan_quoted_identifier(']', TokenKind::BracketedIdentifier)?,
            '0' if matches!(self.peek(), Some('x' | 'X')) => {
                self.advance();
                self.advance_while(|c| c.is_ascii_hexdigit());
                self.make_token(TokenKind::Binary)
            }
            '@' => {
                if !self.peek().is_some_and(Self::is_identifier_part) {
                    return Err(self.unexpected('@'));
                }
                self.advance_while(Self::is_identifier_part);
                self.make_token(TokenKind::Variable)
            }
            '$' if self.peek().is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '.') => {
                self.scan_money()
            }
            c if c.is_ascii_digit() => self.scan_number(c),
            c if c.is_alphabetic() || matches!(c, '_' | '#' | '$') => self.scan_identifier(),
            c => return Err(self.unexpected(c)),
        };
        Ok(token)
    }

    fn unexpected(&self, character: char) -> LexError {
        LexError::UnexpectedCharacter {
            character,
            span: Span::new(self.start, self.pos),
            location: self.start_location,
        }
    }

    /// Tokenizes the entire input. The result always ends with one `Eof` token.
    ///
    /// # Errors
    ///
    /// Returns the first [`LexError`] encountered.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().unwrap()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_and_comment_only_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(
            token_kinds("  -- note\n /* outer /* inner */ still comment */ "),
            vec![TokenKind::Eof]
        );
    }

    #[test]
    fn reserved_and_contextual_words() {
        assert_eq!(
            token_kinds("create SEQUENCE go"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifier_forms_keep_their_delimiters() {
        let tokens = tokenize("[my]]col] \"quoted\"\"id\" #tmp ##global $action");
        assert_eq!(tokens[0].kind, TokenKind::BracketedIdentifier);
        assert_eq!(tokens[0].literal, "[my]]col]");
        assert_eq!(tokens[1].kind, TokenKind::QuotedIdentifier);
        assert_eq!(tokens[1].literal, "\"quoted\"\"id\"");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
        assert_eq!(tokens[2].literal, "#tmp");
        assert_eq!(tokens[3].literal, "##global");
        assert_eq!(tokens[4].kind, TokenKind::Identifier);
        assert_eq!(tokens[4].literal, "$action");
    }

    #[test]
    fn variables() {
        let tokens = tokenize("@id @@ROWCOUNT");
        assert_eq!(tokens[0].kind, TokenKind::Variable);
        assert_eq!(tokens[0].literal, "@id");
        assert_eq!(tokens[1].kind, TokenKind::Variable);
        assert_eq!(tokens[1].literal, "@@ROWCOUNT");
    }

    #[test]
    fn numbers() {
        assert_eq!(
            token_kinds("42 3.14 .5 1e10 2.5E-3 0x1F0A 0x $12.50"),
            vec![
                TokenKind::Integer,
                TokenKind::Numeric,
                TokenKind::Numeric,
                TokenKind::Real,
                TokenKind::Real,
                TokenKind::Binary,
                TokenKind::Binary,
                TokenKind::Money,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn strings() {
        let tokens = tokenize("'it''s' N'unicode' n'x'");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].literal, "'it''s'");
        assert_eq!(tokens[1].kind, TokenKind::NationalString);
        assert_eq!(tokens[1].literal, "N'unicode'");
        assert_eq!(tokens[2].kind, TokenKind::NationalString);
    }

    #[test]
    fn operators() {
        assert_eq!(
            token_kinds("= <> != !< !> < <= > >= + - * / % & | ^ ~"),
            vec![
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::NotLt,
                TokenKind::NotGt,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::BitAnd,
                TokenKind::BitOr,
                TokenKind::BitXor,
                TokenKind::BitNot,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn compound_assignments() {
        assert_eq!(
            token_kinds("+= -= *= /= %= &= |= ^="),
            vec![
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
                TokenKind::PercentEq,
                TokenKind::AndEq,
                TokenKind::OrEq,
                TokenKind::XorEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn delimiters() {
        assert_eq!(
            token_kinds("( ) , ; . : ::"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Colon,
                TokenKind::DoubleColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn locations_track_lines() {
        let tokens = tokenize("SELECT\n  id");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].location, Location::new(2, 3));
    }

    #[test]
    fn lex_errors() {
        assert!(matches!(
            Lexer::new("'open").tokenize(),
            Err(LexError::UnterminatedString { .. })
        ));
        assert!(matches!(
            Lexer::new("[open").tokenize(),
            Err(LexError::UnterminatedIdentifier { .. })
        ));
        assert!(matches!(
            Lexer::new("/* /* */").tokenize(),
            Err(LexError::UnterminatedComment { .. })
        ));
        assert!(matches!(
            Lexer::new("SELECT ?").tokenize(),
            Err(LexError::UnexpectedCharacter { character: '?', .. })
        ));
    }
}
