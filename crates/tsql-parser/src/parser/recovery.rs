//! Error recording and statement-level resynchronisation.

use tracing::debug;

use super::cursor::Parser;
use super::error::{PResult, ParseError};
use crate::lexer::{Keyword, TokenKind};

/// Reserved words that begin a statement the dispatcher knows, beyond the
/// lexer's own recovery stop set.
const EXTRA_STATEMENT_KEYWORDS: &[Keyword] = &[
    Keyword::Set,
    Keyword::With,
    Keyword::Merge,
    Keyword::Truncate,
    Keyword::Open,
    Keyword::Close,
    Keyword::Fetch,
    Keyword::Deallocate,
    Keyword::Commit,
    Keyword::Rollback,
    Keyword::Save,
    Keyword::Deny,
    Keyword::Revert,
    Keyword::Kill,
    Keyword::Checkpoint,
    Keyword::Reconfigure,
    Keyword::RaisError,
    Keyword::Bulk,
    Keyword::Add,
];

impl Parser {
    /// Records a diagnostic without moving the cursor.
    pub(crate) fn record(&mut self, error: ParseError) {
        self.diagnostics.push(error);
    }

    /// Records `error` and skips to the end of the current statement.
    pub(crate) fn recover(&mut self, error: ParseError) {
        let location = error.location;
        self.record(error);
        let skipped = self.skip_to_end_of_statement();
        debug!(
            line = location.line,
            column = location.column,
            skipped,
            "recovered from parse error"
        );
    }

    /// Builds a node by filling a default value. On error the partially
    /// filled node is kept, the error is recorded and the cursor moves on to
    /// the next statement boundary.
    pub(crate) fn lenient<T: Default>(
        &mut self,
        fill: impl FnOnce(&mut Self, &mut T) -> PResult<()>,
    ) -> T {
        let mut node = T::default();
        if let Err(error) = self.nested(|p| fill(p, &mut node)) {
            self.recover(error);
        }
        node
    }

    /// True at a token that ends the current statement without belonging to
    /// it: `;`, end of input, the batch separator or a statement keyword.
    pub(crate) fn at_statement_end(&self) -> bool {
        match self.kind() {
            TokenKind::Semicolon | TokenKind::Eof => true,
            TokenKind::Keyword(keyword) => keyword.starts_statement(),
            TokenKind::Identifier => self.is_batch_separator() || self.is_word("THROW"),
            _ => false,
        }
    }

    /// True if the current token can begin a statement or closes the one
    /// before it.
    pub(crate) fn can_start_statement(&self) -> bool {
        if self.at_statement_end() {
            return true;
        }
        match self.kind() {
            TokenKind::Keyword(keyword) => EXTRA_STATEMENT_KEYWORDS.contains(&keyword),
            TokenKind::Identifier => self.peek().kind == TokenKind::Colon,
            TokenKind::LeftParen => self.peek_keyword(Keyword::Select),
            _ => false,
        }
    }

    /// Skips tokens up to the next statement boundary and returns how many
    /// were skipped. A `;` is consumed; every other stop token is left for the
    /// statement list to see.
    pub(crate) fn skip_to_end_of_statement(&mut self) -> usize {
        let mut skipped = 0;
        loop {
            if self.check(TokenKind::Semicolon) {
                self.advance();
                return skipped;
            }
            if self.at_statement_end() {
                return skipped;
            }
            self.advance();
            skipped += 1;
        }
    }

    /// Skips the rest of an option entry up to the next `,` or `)` at the
    /// current nesting level, leaving the delimiter in place.
    pub(crate) fn skip_option_value(&mut self) {
        loop {
            match self.kind() {
                TokenKind::Comma | TokenKind::RightParen | TokenKind::Eof => return,
                TokenKind::LeftParen => self.skip_parenthesized(),
                _ => {
                    self.advance();
                }
            }
        }
    }
}
