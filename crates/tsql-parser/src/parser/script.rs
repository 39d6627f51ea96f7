//! Statement dispatch and statement lists.

use tracing::{trace, warn};

use super::cursor::Parser;
use crate::ast::{
    BreakStatement, ContinueStatement, DeleteStatement, InsertStatement, MergeStatement,
    SelectStatement, Statement, UpdateStatement,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a whole script. Batch separators (`GO [count]`) and empty
    /// statements are skipped; the cursor always reaches end of input.
    pub fn parse_script(&mut self) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            statements.extend(self.parse_statement_list(|_| false));
            if !self.is_batch_separator() {
                break;
            }
            self.advance();
            if self.check(TokenKind::Integer) {
                self.advance();
            }
        }
        statements
    }

    /// Statements up to end of input, a batch separator or a token for which
    /// `stop` holds (`END` for blocks and routine bodies).
    pub(crate) fn parse_statement_list(&mut self, stop: fn(&Self) -> bool) -> Vec<Statement> {
        let mut statements = Vec::new();
        loop {
            while self.eat(TokenKind::Semicolon) {}
            if self.at_eof() || self.is_batch_separator() || stop(self) {
                return statements;
            }
            let start = self.pos;
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            if !self.can_start_statement() && !stop(self) {
                let error = self.error_here("end of statement");
                self.recover(error);
            }
            if self.pos == start {
                self.advance();
            }
        }
    }

    /// Parses one statement selected by its leading token and eats one
    /// trailing `;`. Returns `None` when no statement starts here; the
    /// error is recorded and the cursor is past the offending statement.
    pub(crate) fn parse_statement(&mut self) -> Option<Statement> {
        let start = self.pos;
        let statement = match self.kind() {
            TokenKind::Keyword(keyword) => self.parse_keyword_statement(keyword),
            TokenKind::Identifier if self.peek().kind == TokenKind::Colon => {
                Some(Statement::Label(self.lenient(Self::fill_label)))
            }
            TokenKind::Identifier if self.is_word("THROW") => {
                Some(Statement::Throw(self.lenient(Self::fill_throw)))
            }
            TokenKind::LeftParen if self.peek_keyword(Keyword::Select) => {
                Some(Statement::Select(self.lenient(Self::fill_select)))
            }
            _ => None,
        };
        match statement {
            Some(statement) => {
                trace!(tag = statement.tag(), "parsed statement");
                self.eat(TokenKind::Semicolon);
                Some(statement)
            }
            None => {
                self.reject_statement(start);
                None
            }
        }
    }

    fn parse_keyword_statement(&mut self, keyword: Keyword) -> Option<Statement> {
        let statement = match keyword {
            Keyword::Select => Statement::Select(self.lenient(Self::fill_select)),
            Keyword::With => self.parse_with_statement(),
            Keyword::Insert if self.peek_keyword(Keyword::Bulk) => {
                Statement::InsertBulk(self.lenient(Self::fill_insert_bulk))
            }
            Keyword::Insert => Statement::Insert(self.lenient(Self::fill_insert)),
            Keyword::Bulk => Statement::BulkInsert(self.lenient(Self::fill_bulk_insert)),
            Keyword::Update => Statement::Update(self.lenient(Self::fill_update)),
            Keyword::Delete => Statement::Delete(self.lenient(Self::fill_delete)),
            Keyword::Merge => Statement::Merge(self.lenient(Self::fill_merge)),
            Keyword::Truncate => Statement::TruncateTable(self.lenient(Self::fill_truncate_table)),
            Keyword::Exec | Keyword::Execute if self.peek_keyword(Keyword::As) => {
                Statement::ExecuteAs(self.lenient(Self::fill_execute_as))
            }
            Keyword::Exec | Keyword::Execute => {
                Statement::Execute(self.lenient(Self::fill_execute))
            }
            Keyword::Create => return self.parse_create_statement(),
            Keyword::Alter => return self.parse_alter_statement(),
            Keyword::Drop => return self.parse_drop_statement(),
            Keyword::Declare => self.parse_declare_statement(),
            Keyword::Set => self.parse_set_statement(),
            Keyword::If => Statement::If(self.lenient(Self::fill_if)),
            Keyword::While => Statement::While(self.lenient(Self::fill_while)),
            Keyword::Begin => self.parse_begin_statement(),
            Keyword::Commit => Statement::CommitTransaction(self.lenient(Self::fill_commit)),
            Keyword::Rollback => {
                Statement::RollbackTransaction(self.lenient(Self::fill_transaction_name))
            }
            Keyword::Save => Statement::SaveTransaction(self.lenient(Self::fill_transaction_name)),
            Keyword::Return => Statement::Return(self.lenient(Self::fill_return)),
            Keyword::Break => {
                self.advance();
                Statement::Break(BreakStatement)
            }
            Keyword::Continue => {
                self.advance();
                Statement::Continue(ContinueStatement)
            }
            Keyword::Goto => Statement::Goto(self.lenient(Self::fill_goto)),
            Keyword::Print => Statement::Print(self.lenient(Self::fill_print)),
            Keyword::RaisError => Statement::RaiseError(self.lenient(Self::fill_raise_error)),
            Keyword::WaitFor => Statement::WaitFor(self.lenient(Self::fill_wait_for)),
            Keyword::Use => Statement::Use(self.lenient(Self::fill_use)),
            Keyword::Open => Statement::OpenCursor(self.lenient(Self::fill_cursor_statement)),
            Keyword::Close => Statement::CloseCursor(self.lenient(Self::fill_cursor_statement)),
            Keyword::Deallocate => {
                Statement::DeallocateCursor(self.lenient(Self::fill_cursor_statement))
            }
            Keyword::Fetch => Statement::FetchCursor(self.lenient(Self::fill_fetch)),
            Keyword::Checkpoint => Statement::Checkpoint(self.lenient(Self::fill_checkpoint)),
            Keyword::Reconfigure => Statement::Reconfigure(self.lenient(Self::fill_reconfigure)),
            Keyword::Kill => Statement::Kill(self.lenient(Self::fill_kill)),
            Keyword::Backup => Statement::Backup(self.lenient(Self::fill_backup)),
            Keyword::Restore => Statement::Restore(self.lenient(Self::fill_restore)),
            Keyword::Grant => Statement::Grant(self.lenient(Self::fill_grant)),
            Keyword::Deny => Statement::Deny(self.lenient(Self::fill_deny)),
            Keyword::Revoke => Statement::Revoke(self.lenient(Self::fill_revoke)),
            Keyword::Revert => Statement::Revert(self.lenient(Self::fill_revert)),
            Keyword::Add if self.peek_is_word("SENSITIVITY") => {
                Statement::AddSensitivityClassification(
                    self.lenient(Self::fill_sensitivity_classification),
                )
            }
            Keyword::Add if self.peek_is_word("SIGNATURE") || self.peek_is_word("COUNTER") => {
                Statement::AddSignature(self.lenient(Self::fill_signature))
            }
            _ => return None,
        };
        Some(statement)
    }

    /// `WITH ctes` followed by the statement the expressions belong to.
    fn parse_with_statement(&mut self) -> Statement {
        let ctes = match self.nested(Self::parse_with_ctes) {
            Ok(ctes) => ctes,
            Err(error) => {
                self.recover(error);
                return Statement::Select(SelectStatement::default());
            }
        };
        match self.kind() {
            TokenKind::Keyword(Keyword::Insert) => {
                Statement::Insert(self.lenient(|p, stmt: &mut InsertStatement| {
                    stmt.ctes = Some(ctes);
                    p.fill_insert(stmt)
                }))
            }
            TokenKind::Keyword(Keyword::Update) => {
                Statement::Update(self.lenient(|p, stmt: &mut UpdateStatement| {
                    stmt.ctes = Some(ctes);
                    p.fill_update(stmt)
                }))
            }
            TokenKind::Keyword(Keyword::Delete) => {
                Statement::Delete(self.lenient(|p, stmt: &mut DeleteStatement| {
                    stmt.ctes = Some(ctes);
                    p.fill_delete(stmt)
                }))
            }
            TokenKind::Keyword(Keyword::Merge) => {
                Statement::Merge(self.lenient(|p, stmt: &mut MergeStatement| {
                    stmt.ctes = Some(ctes);
                    p.fill_merge(stmt)
                }))
            }
            _ => Statement::Select(self.lenient(|p, stmt: &mut SelectStatement| {
                stmt.ctes = Some(ctes);
                p.fill_select(stmt)
            })),
        }
    }

    /// Records an unclassifiable statement and skips it. At least one token
    /// is consumed.
    fn reject_statement(&mut self, start: usize) {
        let token = self.current().clone();
        warn!(
            line = token.location.line,
            column = token.location.column,
            token = %token.literal,
            "unrecognized statement"
        );
        let error = self.error_here("statement");
        self.record(error);
        if self.pos == start {
            self.advance();
        }
        self.skip_to_end_of_statement();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    fn tags(statements: &[Statement]) -> Vec<&'static str> {
        statements.iter().map(Statement::tag).collect()
    }

    #[test]
    fn empty_scripts() {
        for sql in ["", "   ", "-- note\n/* block */", ";;;", "GO\nGO 3\n;GO"] {
            let mut p = parser(sql);
            assert!(p.parse_script().is_empty(), "{sql:?}");
            assert!(p.diagnostics().is_empty(), "{sql:?}");
            assert!(p.at_eof());
        }
    }

    #[test]
    fn batches_and_separators() {
        let mut p = parser("SELECT 1\nGO\nPRINT 'x'; SELECT 2;\ngo 2\nUSE db");
        let statements = p.parse_script();
        assert_eq!(tags(&statements), ["Select", "Print", "Select", "Use"]);
        assert!(p.diagnostics().is_empty());
    }

    #[test]
    fn ctes_attach_to_the_following_statement() {
        let mut p = parser(
            "WITH a AS (SELECT 1 AS x) DELETE FROM t WHERE id IN (SELECT x FROM a); \
             WITH b (x) AS (SELECT 2) SELECT x FROM b",
        );
        let statements = p.parse_script();
        assert_eq!(tags(&statements), ["Delete", "Select"]);
        let Statement::Delete(delete) = &statements[0] else {
            unreachable!()
        };
        assert!(delete.ctes.is_some());
    }

    #[test]
    fn unknown_statement_is_skipped() {
        let mut p = parser("FROBNICATE the widgets; SELECT 1");
        let statements = p.parse_script();
        assert_eq!(tags(&statements), ["Select"]);
        assert_eq!(p.diagnostics().len(), 1);
    }

    #[test]
    fn stray_end_is_an_error() {
        let mut p = parser("END SELECT 1");
        let statements = p.parse_script();
        assert_eq!(tags(&statements), ["Select"]);
        assert_eq!(p.diagnostics().len(), 1);
    }

    #[test]
    fn partial_statement_is_kept() {
        let mut p = parser("INSERT INTO t (a, VALUES (1); PRINT 'after'");
        let statements = p.parse_script();
        assert_eq!(tags(&statements), ["Insert", "Print"]);
        assert!(!p.diagnostics().is_empty());
    }

    #[test]
    fn trailing_junk_is_skipped() {
        let mut p = parser("PRINT 'a' 'b' 'c'\nSELECT 1");
        let statements = p.parse_script();
        assert_eq!(tags(&statements), ["Print", "Select"]);
        assert_eq!(p.diagnostics().len(), 1);
    }

    #[test]
    fn security_and_signature_dispatch() {
        let mut p = parser(
            "GRANT SELECT ON t TO u; EXECUTE AS LOGIN = 'x'; REVERT; \
             ADD SIGNATURE TO p BY CERTIFICATE c; EXEC p",
        );
        let statements = p.parse_script();
        assert_eq!(
            tags(&statements),
            ["Grant", "ExecuteAs", "Revert", "AddSignature", "Execute"]
        );
    }

    #[test]
    fn depth_limit_is_reported() {
        let sql = format!("SELECT {}1{}", "(".repeat(40), ")".repeat(40));
        let tokens = Lexer::new(&sql).tokenize().unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default().with_max_depth(10));
        let statements = p.parse_script();
        assert_eq!(tags(&statements), ["Select"]);
        assert!(!p.diagnostics().is_empty());
        assert!(p.at_eof());
    }
}
