//! Procedural statements: variables, `SET`, blocks, branching, loops,
//! transactions, cursors and error raising.

use super::cursor::Parser;
use super::error::PResult;
use super::pratt::token_to_assignment;
use crate::ast::{
    option_kind_from_name, BeginEndBlockStatement, BeginTransactionStatement,
    CommitTransactionStatement, CursorDefinition, CursorStatement, DeclareCursorStatement,
    DeclareTableVariableStatement, DeclareVariableElement, DeclareVariableStatement,
    FetchCursorStatement, FetchOrientation, GeneralSetStatement, GotoStatement,
    IdentifierOrVariable, IfStatement, IsolationLevel, LabelStatement, Literal,
    PredicateSetStatement, PrintStatement, RaiseErrorStatement, ReturnStatement, ScalarExpression,
    SelectStatement, SetIdentityInsertStatement, SetTransactionIsolationLevelStatement,
    SetVariableStatement, Statement, ThrowStatement, TransactionNameStatement, TryCatchStatement,
    WaitForKind, WaitForStatement, WhileStatement,
};
use crate::lexer::{Keyword, TokenKind};

/// `SET` commands that take a single value rather than `ON`/`OFF`.
const GENERAL_SET_COMMANDS: &[&str] = &[
    "LANGUAGE",
    "DATEFORMAT",
    "DATEFIRST",
    "DEADLOCK_PRIORITY",
    "LOCK_TIMEOUT",
    "ROWCOUNT",
    "TEXTSIZE",
    "CONTEXT_INFO",
    "QUERY_GOVERNOR_COST_LIMIT",
];

impl Parser {
    /// `DECLARE` in any of its three shapes.
    pub(crate) fn parse_declare_statement(&mut self) -> Statement {
        self.advance();
        if !self.check(TokenKind::Variable) {
            return Statement::DeclareCursor(self.lenient(Self::fill_declare_cursor));
        }
        let variable = self.advance().literal;
        self.eat_keyword(Keyword::As);
        if self.check_keyword(Keyword::Table) {
            return Statement::DeclareTableVariable(self.lenient(
                |p, stmt: &mut DeclareTableVariableStatement| {
                    stmt.variable = variable;
                    p.expect_keyword(Keyword::Table)?;
                    stmt.definition = p.parse_table_definition()?;
                    Ok(())
                },
            ));
        }
        Statement::DeclareVariable(self.lenient(|p, stmt: &mut DeclareVariableStatement| {
            stmt.declarations.push(DeclareVariableElement {
                variable,
                ..DeclareVariableElement::default()
            });
            p.fill_declare_element_tail(stmt)?;
            while p.eat(TokenKind::Comma) {
                let variable = p.expect(TokenKind::Variable)?.literal;
                p.eat_keyword(Keyword::As);
                stmt.declarations.push(DeclareVariableElement {
                    variable,
                    ..DeclareVariableElement::default()
                });
                p.fill_declare_element_tail(stmt)?;
            }
            Ok(())
        }))
    }

    /// `type [= value]` for the last element pushed.
    fn fill_declare_element_tail(&mut self, stmt: &mut DeclareVariableStatement) -> PResult<()> {
        let data_type = self.parse_data_type()?;
        let value = if self.eat(TokenKind::Eq) {
            Some(self.parse_scalar_expression()?)
        } else {
            None
        };
        if let Some(element) = stmt.declarations.last_mut() {
            element.data_type = Some(data_type);
            element.value = value;
        }
        Ok(())
    }

    /// `name [INSENSITIVE] [SCROLL] CURSOR [options] FOR select [FOR ...]`
    fn fill_declare_cursor(&mut self, stmt: &mut DeclareCursorStatement) -> PResult<()> {
        stmt.name = self.expect_identifier()?;
        stmt.definition.options = self.parse_cursor_option_words();
        self.expect_keyword(Keyword::Cursor)?;
        self.fill_cursor_definition(&mut stmt.definition)
    }

    /// Option words up to `CURSOR` or `FOR`, pascal-cased.
    fn parse_cursor_option_words(&mut self) -> Vec<String> {
        let mut options = Vec::new();
        while self.at_word()
            && !self.check_keyword(Keyword::Cursor)
            && !self.check_keyword(Keyword::For)
        {
            options.push(option_kind_from_name(&self.advance().literal));
        }
        options
    }

    /// `[options] FOR select [FOR READ ONLY | FOR UPDATE [OF cols]]` after `CURSOR`.
    fn fill_cursor_definition(&mut self, definition: &mut CursorDefinition) -> PResult<()> {
        definition.options.extend(self.parse_cursor_option_words());
        self.expect_keyword(Keyword::For)?;
        let mut select = SelectStatement::default();
        self.fill_select(&mut select)?;
        definition.update_columns = select.query.take_for_update();
        definition.select = Some(Box::new(select));
        if self.check_keyword(Keyword::For) && self.peek_keyword(Keyword::Read) {
            self.advance();
            self.advance();
            self.expect_word("ONLY")?;
            definition.read_only = true;
        }
        Ok(())
    }

    /// `SET` in all its forms, classified by the word after `SET`.
    pub(crate) fn parse_set_statement(&mut self) -> Statement {
        self.advance();
        if self.check(TokenKind::Variable) {
            return Statement::SetVariable(self.lenient(Self::fill_set_variable));
        }
        if self.check_keyword(Keyword::Transaction) {
            return Statement::SetTransactionIsolationLevel(
                self.lenient(Self::fill_set_isolation_level),
            );
        }
        if self.check_keyword(Keyword::IdentityInsert) {
            return Statement::SetIdentityInsert(self.lenient(
                |p, stmt: &mut SetIdentityInsertStatement| {
                    p.advance();
                    stmt.table = p.parse_schema_object_name()?;
                    stmt.state = p.parse_option_state()?;
                    Ok(())
                },
            ));
        }
        if self.is_any_word(GENERAL_SET_COMMANDS) {
            return Statement::GeneralSet(self.lenient(Self::fill_general_set));
        }
        Statement::PredicateSet(self.lenient(Self::fill_predicate_set))
    }

    /// `@v op expr` or `@v = CURSOR ... FOR select`.
    fn fill_set_variable(&mut self, stmt: &mut SetVariableStatement) -> PResult<()> {
        stmt.variable = self.expect(TokenKind::Variable)?.literal;
        stmt.assignment = token_to_assignment(&self.kind())
            .ok_or_else(|| self.error_here("assignment operator"))?;
        self.advance();
        if self.eat_keyword(Keyword::Cursor) {
            let mut definition = CursorDefinition::default();
            self.fill_cursor_definition(&mut definition)?;
            stmt.cursor = Some(definition);
        } else {
            stmt.expression = Some(self.parse_scalar_expression()?);
        }
        Ok(())
    }

    /// `TRANSACTION ISOLATION LEVEL level`
    fn fill_set_isolation_level(
        &mut self,
        stmt: &mut SetTransactionIsolationLevelStatement,
    ) -> PResult<()> {
        self.expect_keyword(Keyword::Transaction)?;
        self.expect_word("ISOLATION")?;
        self.expect_word("LEVEL")?;
        let first = self.expect_any_word()?;
        stmt.level = match first.as_str() {
            "READ" => match self.expect_any_word()?.as_str() {
                "UNCOMMITTED" => Some(IsolationLevel::ReadUncommitted),
                "COMMITTED" => Some(IsolationLevel::ReadCommitted),
                _ => None,
            },
            "REPEATABLE" => {
                self.expect_keyword(Keyword::Read)?;
                Some(IsolationLevel::RepeatableRead)
            }
            "SNAPSHOT" => Some(IsolationLevel::Snapshot),
            "SERIALIZABLE" => Some(IsolationLevel::Serializable),
            _ => None,
        };
        Ok(())
    }

    /// `LANGUAGE us_english`, `DEADLOCK_PRIORITY LOW`, `ROWCOUNT @n`, ...
    fn fill_general_set(&mut self, stmt: &mut GeneralSetStatement) -> PResult<()> {
        stmt.option_kind = option_kind_from_name(&self.expect_any_word()?);
        stmt.value = Some(if self.check(TokenKind::Identifier) {
            ScalarExpression::Literal(Literal::Identifier(self.take_identifier()))
        } else {
            self.parse_scalar_expression()?
        });
        Ok(())
    }

    /// `opt [, opt ...] {ON|OFF}`; `STATISTICS IO` and friends are single options.
    fn fill_predicate_set(&mut self, stmt: &mut PredicateSetStatement) -> PResult<()> {
        stmt.options = self.comma_separated(|p| {
            let mut name = p.expect_any_word()?;
            if name == "STATISTICS" || name == "OFFSETS" {
                while p.at_word()
                    && !p.check_keyword(Keyword::On)
                    && !p.check_keyword(Keyword::Off)
                {
                    name.push('_');
                    name.push_str(&p.advance().literal.to_ascii_uppercase());
                }
            }
            Ok(option_kind_from_name(&name))
        })?;
        stmt.state = self.parse_option_state()?;
        Ok(())
    }

    pub(crate) fn fill_if(&mut self, stmt: &mut IfStatement) -> PResult<()> {
        self.expect_keyword(Keyword::If)?;
        stmt.predicate = Some(self.parse_boolean_expression()?);
        stmt.then_statement = Some(self.parse_required_statement()?);
        if self.eat_keyword(Keyword::Else) {
            stmt.else_statement = Some(self.parse_required_statement()?);
        }
        Ok(())
    }

    pub(crate) fn fill_while(&mut self, stmt: &mut WhileStatement) -> PResult<()> {
        self.expect_keyword(Keyword::While)?;
        stmt.predicate = Some(self.parse_boolean_expression()?);
        stmt.statement = Some(self.parse_required_statement()?);
        Ok(())
    }

    /// `BEGIN` starts a block, a `TRY`/`CATCH` pair or a transaction.
    pub(crate) fn parse_begin_statement(&mut self) -> Statement {
        let next = self.peek();
        if next.kind == TokenKind::Keyword(Keyword::Tran)
            || next.kind == TokenKind::Keyword(Keyword::Transaction)
            || next.kind == TokenKind::Keyword(Keyword::Distributed)
        {
            return Statement::BeginTransaction(self.lenient(Self::fill_begin_transaction));
        }
        if self.peek_is_word("TRY") {
            return Statement::TryCatch(self.lenient(Self::fill_try_catch));
        }
        Statement::BeginEndBlock(self.lenient(Self::fill_begin_end_block))
    }

    fn fill_begin_end_block(&mut self, stmt: &mut BeginEndBlockStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Begin)?;
        stmt.statements = self.parse_statement_list(at_end_keyword);
        self.expect_keyword(Keyword::End)?;
        Ok(())
    }

    /// `BEGIN TRY ... END TRY BEGIN CATCH ... END CATCH`
    fn fill_try_catch(&mut self, stmt: &mut TryCatchStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Begin)?;
        self.expect_word("TRY")?;
        stmt.try_statements = self.parse_statement_list(at_end_keyword);
        self.expect_keyword(Keyword::End)?;
        self.expect_word("TRY")?;
        self.expect_keyword(Keyword::Begin)?;
        self.expect_word("CATCH")?;
        stmt.catch_statements = self.parse_statement_list(at_end_keyword);
        self.expect_keyword(Keyword::End)?;
        self.expect_word("CATCH")?;
        Ok(())
    }

    /// `{TRAN | TRANSACTION}` and an optional name that is not the next statement.
    fn parse_transaction_name(&mut self) -> PResult<Option<IdentifierOrVariable>> {
        let has_word = self.eat_keyword(Keyword::Tran)
            || self.eat_keyword(Keyword::Transaction)
            || self.eat_word("WORK");
        if has_word && (self.check(TokenKind::Variable) || self.at_name()) {
            Ok(Some(self.parse_identifier_or_variable()?))
        } else {
            Ok(None)
        }
    }

    fn fill_begin_transaction(&mut self, stmt: &mut BeginTransactionStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Begin)?;
        stmt.distributed = self.eat_keyword(Keyword::Distributed);
        if !(self.check_keyword(Keyword::Tran) || self.check_keyword(Keyword::Transaction)) {
            return Err(self.error_here("TRAN or TRANSACTION"));
        }
        stmt.name = self.parse_transaction_name()?;
        if self.check_keyword(Keyword::With) && self.peek_is_word("MARK") {
            self.advance();
            self.advance();
            stmt.marked = true;
            if matches!(self.kind(), TokenKind::String | TokenKind::NationalString) {
                stmt.mark_description = Some(self.parse_primary()?);
            }
        }
        Ok(())
    }

    /// `COMMIT [TRAN [name]] [WITH (DELAYED_DURABILITY = ON|OFF)]`
    pub(crate) fn fill_commit(&mut self, stmt: &mut CommitTransactionStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Commit)?;
        stmt.name = self.parse_transaction_name()?;
        if self.check_keyword(Keyword::With) && self.peek().kind == TokenKind::LeftParen {
            self.advance();
            self.parenthesized(|p| {
                p.expect_word("DELAYED_DURABILITY")?;
                p.expect(TokenKind::Eq)?;
                stmt.delayed_durability = p.parse_option_state()?;
                Ok(())
            })?;
        }
        Ok(())
    }

    /// `ROLLBACK [TRAN [name]]` or `SAVE TRAN name`; the leading keyword is
    /// consumed by the caller.
    pub(crate) fn fill_transaction_name(
        &mut self,
        stmt: &mut TransactionNameStatement,
    ) -> PResult<()> {
        self.advance();
        stmt.name = self.parse_transaction_name()?;
        Ok(())
    }

    pub(crate) fn fill_return(&mut self, stmt: &mut ReturnStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Return)?;
        if self.can_start_expression() {
            stmt.expression = Some(self.parse_scalar_expression()?);
        }
        Ok(())
    }

    pub(crate) fn fill_goto(&mut self, stmt: &mut GotoStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Goto)?;
        stmt.label = self.expect_identifier()?;
        Ok(())
    }

    /// `name:`
    pub(crate) fn fill_label(&mut self, stmt: &mut LabelStatement) -> PResult<()> {
        stmt.label = self.parse_identifier().value;
        self.expect(TokenKind::Colon)?;
        Ok(())
    }

    pub(crate) fn fill_print(&mut self, stmt: &mut PrintStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Print)?;
        stmt.expression = self.parse_scalar_expression()?;
        Ok(())
    }

    /// `THROW [number, message, state]`
    pub(crate) fn fill_throw(&mut self, stmt: &mut ThrowStatement) -> PResult<()> {
        self.expect_word("THROW")?;
        if !self.can_start_expression() {
            return Ok(());
        }
        stmt.error_number = Some(self.parse_scalar_expression()?);
        self.expect(TokenKind::Comma)?;
        stmt.message = Some(self.parse_scalar_expression()?);
        self.expect(TokenKind::Comma)?;
        stmt.state = Some(self.parse_scalar_expression()?);
        Ok(())
    }

    /// `RAISERROR (msg, severity, state [, arg ...]) [WITH LOG|NOWAIT|SETERROR, ...]`
    pub(crate) fn fill_raise_error(&mut self, stmt: &mut RaiseErrorStatement) -> PResult<()> {
        self.expect_keyword(Keyword::RaisError)?;
        self.parenthesized(|p| {
            stmt.message = p.parse_scalar_expression()?;
            p.expect(TokenKind::Comma)?;
            stmt.severity = Some(p.parse_scalar_expression()?);
            p.expect(TokenKind::Comma)?;
            stmt.state = Some(p.parse_scalar_expression()?);
            while p.eat(TokenKind::Comma) {
                stmt.arguments.push(p.parse_scalar_expression()?);
            }
            Ok(())
        })?;
        if self.eat_keyword(Keyword::With) {
            stmt.options =
                self.comma_separated(|p| Ok(option_kind_from_name(&p.expect_any_word()?)))?;
        }
        Ok(())
    }

    /// `WAITFOR {DELAY | TIME} value`
    pub(crate) fn fill_wait_for(&mut self, stmt: &mut WaitForStatement) -> PResult<()> {
        self.expect_keyword(Keyword::WaitFor)?;
        stmt.kind = match self.expect_any_word()?.as_str() {
            "DELAY" => WaitForKind::Delay,
            "TIME" => WaitForKind::Time,
            _ => return Err(self.error_message("expected DELAY or TIME")),
        };
        stmt.parameter = Some(self.parse_scalar_expression()?);
        Ok(())
    }

    /// `OPEN`, `CLOSE` or `DEALLOCATE`, consumed by the caller's `advance`.
    pub(crate) fn fill_cursor_statement(&mut self, stmt: &mut CursorStatement) -> PResult<()> {
        self.advance();
        stmt.cursor = self.parse_cursor_id()?;
        Ok(())
    }

    /// `FETCH [orientation] [FROM] cursor [INTO @a, ...]`
    pub(crate) fn fill_fetch(&mut self, stmt: &mut FetchCursorStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Fetch)?;
        let orientation = match self.literal_upper().as_str() {
            "NEXT" => Some(FetchOrientation::Next),
            "PRIOR" => Some(FetchOrientation::Prior),
            "FIRST" => Some(FetchOrientation::First),
            "LAST" => Some(FetchOrientation::Last),
            "ABSOLUTE" => Some(FetchOrientation::Absolute),
            "RELATIVE" => Some(FetchOrientation::Relative),
            _ => None,
        };
        if let Some(orientation) = orientation {
            self.advance();
            if matches!(orientation, FetchOrientation::Absolute | FetchOrientation::Relative) {
                stmt.offset = Some(self.parse_scalar_expression()?);
            }
            stmt.orientation = Some(orientation);
            self.expect_keyword(Keyword::From)?;
        } else {
            self.eat_keyword(Keyword::From);
        }
        stmt.cursor = self.parse_cursor_id()?;
        if self.eat_keyword(Keyword::Into) {
            stmt.into =
                self.comma_separated(|p| Ok(p.expect(TokenKind::Variable)?.literal))?;
        }
        Ok(())
    }

    /// A statement that must follow `IF`, `ELSE` or `WHILE`.
    fn parse_required_statement(&mut self) -> PResult<Box<Statement>> {
        match self.parse_statement() {
            Some(statement) => Ok(Box::new(statement)),
            None => Err(self.error_here("statement")),
        }
    }
}

/// Stop condition for statement lists closed by `END`.
pub(crate) fn at_end_keyword(p: &Parser) -> bool {
    p.check_keyword(Keyword::End)
}
