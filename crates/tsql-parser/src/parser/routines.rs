//! Procedures, functions, triggers and views: a header, options and either
//! a statement-list body or an `EXTERNAL NAME`.

use super::cursor::Parser;
use super::error::PResult;
use crate::ast::{
    option_kind_from_name, CreateAggregateStatement, FunctionReturnType, FunctionStatement,
    MethodSpecifier, ProcedureParameter, ProcedureStatement, RoutineOption, SelectStatement,
    Statement, TriggerAction, TriggerKind, TriggerStatement, TriggerTarget, ViewStatement,
};
use crate::lexer::{Keyword, TokenKind};

fn never(_: &Parser) -> bool {
    false
}

impl Parser {
    /// `name [;n] [params] [WITH options] [FOR REPLICATION] AS body`
    pub(crate) fn fill_procedure(&mut self, stmt: &mut ProcedureStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        if self.check(TokenKind::Semicolon) && self.peek().kind == TokenKind::Integer {
            self.advance();
            stmt.number = Some(self.advance().literal);
        }
        if self.check(TokenKind::LeftParen) {
            stmt.parameters = self.parenthesized_list(Self::parse_procedure_parameter)?;
        } else if self.check(TokenKind::Variable) {
            stmt.parameters = self.comma_separated(Self::parse_procedure_parameter)?;
        }
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.comma_separated(Self::parse_routine_option)?;
        }
        if self.check_keyword(Keyword::For) && self.peek_keyword(Keyword::Replication) {
            self.advance();
            self.advance();
            stmt.for_replication = true;
        }
        self.expect_keyword(Keyword::As)?;
        if self.check_keyword(Keyword::External) {
            stmt.external_name = Some(self.parse_external_name()?);
        } else {
            stmt.body = self.parse_statement_list(never);
        }
        Ok(())
    }

    /// `@name [AS] type [VARYING] [NULL|NOT NULL] [= default] [OUT|OUTPUT] [READONLY]`
    fn parse_procedure_parameter(&mut self) -> PResult<ProcedureParameter> {
        let mut parameter = ProcedureParameter {
            variable: self.expect(TokenKind::Variable)?.literal,
            ..ProcedureParameter::default()
        };
        self.eat_keyword(Keyword::As);
        parameter.data_type = Some(self.parse_data_type()?);
        parameter.varying = self.eat_keyword(Keyword::Varying);
        parameter.nullable = self.parse_nullability();
        if self.eat(TokenKind::Eq) {
            parameter.default = Some(self.parse_scalar_expression()?);
        }
        loop {
            if self.eat_word("OUT") || self.eat_word("OUTPUT") {
                parameter.output = true;
            } else if self.eat_word("READONLY") {
                parameter.readonly = true;
            } else {
                return Ok(parameter);
            }
        }
    }

    /// One entry of a routine's `WITH` list.
    fn parse_routine_option(&mut self) -> PResult<RoutineOption> {
        if self.check_keyword(Keyword::Execute) || self.check_keyword(Keyword::Exec) {
            self.advance();
            self.expect_keyword(Keyword::As)?;
            return Ok(RoutineOption::ExecuteAs(self.parse_execute_as_clause()?));
        }
        let word = self.expect_any_word()?;
        match word.as_str() {
            "INLINE" => {
                self.expect(TokenKind::Eq)?;
                Ok(RoutineOption::Inline(self.parse_option_state()?))
            }
            "RETURNS" => {
                self.expect_keyword(Keyword::Null)?;
                self.expect_keyword(Keyword::On)?;
                self.expect_keyword(Keyword::Null)?;
                self.expect_word("INPUT")?;
                Ok(RoutineOption::Simple {
                    option_kind: "ReturnsNullOnNullInput".to_string(),
                })
            }
            "CALLED" => {
                self.expect_keyword(Keyword::On)?;
                self.expect_keyword(Keyword::Null)?;
                self.expect_word("INPUT")?;
                Ok(RoutineOption::Simple {
                    option_kind: "CalledOnNullInput".to_string(),
                })
            }
            _ => Ok(RoutineOption::Simple {
                option_kind: option_kind_from_name(&word),
            }),
        }
    }

    /// `EXTERNAL NAME assembly[.class[.method]]`
    pub(crate) fn parse_external_name(&mut self) -> PResult<MethodSpecifier> {
        self.expect_keyword(Keyword::External)?;
        self.expect_word("NAME")?;
        let mut method = MethodSpecifier {
            assembly: self.expect_identifier()?,
            ..MethodSpecifier::default()
        };
        if self.eat(TokenKind::Dot) {
            method.class = Some(self.expect_identifier_or_keyword()?);
            if self.eat(TokenKind::Dot) {
                method.method = Some(self.expect_identifier_or_keyword()?);
            }
        }
        Ok(method)
    }

    /// `name ( [params] ) RETURNS ... [WITH options] [AS] body`
    pub(crate) fn fill_function(&mut self, stmt: &mut FunctionStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        stmt.parameters = self.parenthesized_list(Self::parse_procedure_parameter)?;
        self.expect_word("RETURNS")?;
        stmt.returns = if self.eat_keyword(Keyword::Table) {
            FunctionReturnType::InlineTable(None)
        } else if self.check(TokenKind::Variable) {
            let variable = self.advance().literal;
            self.expect_keyword(Keyword::Table)?;
            FunctionReturnType::TableVariable {
                variable,
                definition: self.parse_table_definition()?,
            }
        } else {
            FunctionReturnType::Scalar(self.parse_data_type()?)
        };
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.comma_separated(Self::parse_routine_option)?;
        }
        self.eat_keyword(Keyword::As);
        if self.check_keyword(Keyword::External) {
            stmt.external_name = Some(self.parse_external_name()?);
            return Ok(());
        }
        if let FunctionReturnType::InlineTable(select) = &mut stmt.returns {
            self.expect_keyword(Keyword::Return)?;
            let query = select.insert(Box::default());
            if self.check(TokenKind::LeftParen) {
                self.parenthesized(|p| p.fill_select(query))?;
            } else {
                self.fill_select(query)?;
            }
            return Ok(());
        }
        stmt.body = self.parse_statement_list(never);
        Ok(())
    }

    /// `name (params) RETURNS type EXTERNAL NAME assembly[.class]`
    pub(crate) fn fill_create_aggregate(
        &mut self,
        stmt: &mut CreateAggregateStatement,
    ) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        stmt.parameters = self.parenthesized_list(Self::parse_procedure_parameter)?;
        self.expect_word("RETURNS")?;
        stmt.return_type = Some(self.parse_data_type()?);
        stmt.external_name = Some(self.parse_external_name()?);
        Ok(())
    }

    /// `name ON {object | DATABASE | ALL SERVER} [WITH options]
    /// {FOR | AFTER | INSTEAD OF} actions [WITH APPEND] [NOT FOR REPLICATION] AS body`
    pub(crate) fn fill_trigger(&mut self, stmt: &mut TriggerStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        self.expect_keyword(Keyword::On)?;
        stmt.target = if self.eat_keyword(Keyword::Database) {
            TriggerTarget::Database
        } else if self.eat_keyword(Keyword::All) {
            self.expect_word("SERVER")?;
            TriggerTarget::AllServer
        } else {
            TriggerTarget::Object(self.parse_schema_object_name()?)
        };
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.comma_separated(Self::parse_routine_option)?;
        }
        stmt.kind = if self.eat_keyword(Keyword::For) {
            TriggerKind::For
        } else if self.eat_word("AFTER") {
            TriggerKind::After
        } else {
            self.expect_word("INSTEAD")?;
            self.expect_keyword(Keyword::Of)?;
            TriggerKind::InsteadOf
        };
        stmt.actions = self.comma_separated(|p| {
            Ok(match p.kind() {
                TokenKind::Keyword(Keyword::Insert) => {
                    p.advance();
                    TriggerAction::Insert
                }
                TokenKind::Keyword(Keyword::Update) => {
                    p.advance();
                    TriggerAction::Update
                }
                TokenKind::Keyword(Keyword::Delete) => {
                    p.advance();
                    TriggerAction::Delete
                }
                _ => TriggerAction::Event(p.expect_identifier()?),
            })
        })?;
        if self.check_keyword(Keyword::With) && self.peek_is_word("APPEND") {
            self.advance();
            self.advance();
            stmt.with_append = true;
        }
        stmt.not_for_replication = self.eat_not_for_replication()?;
        self.expect_keyword(Keyword::As)?;
        if self.check_keyword(Keyword::External) {
            stmt.external_name = Some(self.parse_external_name()?);
        } else {
            stmt.body = self.parse_statement_list(never);
        }
        Ok(())
    }

    /// `name [(cols)] [WITH options] AS select [WITH CHECK OPTION]`
    pub(crate) fn fill_view(&mut self, stmt: &mut ViewStatement) -> PResult<()> {
        stmt.name = self.parse_schema_object_name()?;
        if self.check(TokenKind::LeftParen) {
            stmt.columns = self.parse_identifier_list()?;
        }
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.comma_separated(|p| {
                Ok(option_kind_from_name(&p.expect_any_word()?))
            })?;
        }
        self.expect_keyword(Keyword::As)?;
        self.fill_select(stmt.select.insert(SelectStatement::default()))?;
        if self.check_keyword(Keyword::With) && self.peek_keyword(Keyword::Check) {
            self.advance();
            self.advance();
            self.expect_keyword(Keyword::Option)?;
            stmt.with_check_option = true;
        }
        Ok(())
    }

    /// `PROC`, `FUNCTION`, `TRIGGER` or `VIEW` after `CREATE`, `CREATE OR
    /// ALTER` or `ALTER`. Returns `None` for any other kind.
    pub(crate) fn parse_routine(
        &mut self,
        kind: &str,
        or_alter: bool,
        alter: bool,
    ) -> Option<Statement> {
        let statement = match kind {
            "Procedure" => {
                let stmt = self.lenient(|p, stmt: &mut ProcedureStatement| {
                    stmt.or_alter = or_alter;
                    p.fill_procedure(stmt)
                });
                if alter {
                    Statement::AlterProcedure(stmt)
                } else {
                    Statement::CreateProcedure(stmt)
                }
            }
            "Function" => {
                let stmt = self.lenient(|p, stmt: &mut FunctionStatement| {
                    stmt.or_alter = or_alter;
                    p.fill_function(stmt)
                });
                if alter {
                    Statement::AlterFunction(stmt)
                } else {
                    Statement::CreateFunction(stmt)
                }
            }
            "Trigger" => {
                let stmt = self.lenient(|p, stmt: &mut TriggerStatement| {
                    stmt.or_alter = or_alter;
                    p.fill_trigger(stmt)
                });
                if alter {
                    Statement::AlterTrigger(stmt)
                } else {
                    Statement::CreateTrigger(stmt)
                }
            }
            "View" => {
                let stmt = self.lenient(|p, stmt: &mut ViewStatement| {
                    stmt.or_alter = or_alter;
                    p.fill_view(stmt)
                });
                if alter {
                    Statement::AlterView(stmt)
                } else {
                    Statement::CreateView(stmt)
                }
            }
            _ => return None,
        };
        Some(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExecuteAsKind, ScalarExpression, SqlDataTypeKind};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    #[test]
    fn procedure_with_parameters_and_body() {
        let mut p = parser(
            "dbo.usp_load @id INT, @name NVARCHAR(50) = N'x' OUTPUT, @rows dbo.RowList READONLY \
             WITH RECOMPILE, EXECUTE AS OWNER \
             AS SET NOCOUNT ON; SELECT @id; RETURN 0",
        );
        let mut stmt = ProcedureStatement::default();
        p.fill_procedure(&mut stmt).unwrap();
        assert!(p.diagnostics().is_empty(), "{:?}", p.diagnostics());
        assert_eq!(stmt.name.base_name(), "usp_load");
        assert_eq!(stmt.parameters.len(), 3);
        assert!(stmt.parameters[1].output);
        assert!(stmt.parameters[1].default.is_some());
        assert!(stmt.parameters[2].readonly);
        assert_eq!(stmt.options[0].option_kind(), "Recompile");
        assert!(matches!(
            &stmt.options[1],
            RoutineOption::ExecuteAs(clause) if clause.kind == ExecuteAsKind::Owner
        ));
        let tags: Vec<_> = stmt.body.iter().map(Statement::tag).collect();
        assert_eq!(tags, ["PredicateSet", "Select", "Return"]);
    }

    #[test]
    fn procedure_body_ends_at_batch_separator() {
        let mut p = parser("p (@a INT) AS BEGIN SELECT 1 END\nGO\nSELECT 2");
        let mut stmt = ProcedureStatement::default();
        p.fill_procedure(&mut stmt).unwrap();
        assert_eq!(stmt.body.len(), 1);
        assert!(p.is_batch_separator());
    }

    #[test]
    fn clr_procedure() {
        let mut p = parser("p @a INT AS EXTERNAL NAME asm.[Ns.Class].Method");
        let mut stmt = ProcedureStatement::default();
        p.fill_procedure(&mut stmt).unwrap();
        let external = stmt.external_name.unwrap();
        assert_eq!(external.assembly.value, "asm");
        assert_eq!(external.class.unwrap().value, "Ns.Class");
        assert_eq!(external.method.unwrap().value, "Method");
    }

    #[test]
    fn clr_aggregate() {
        let mut p = parser(
            "dbo.Concat (@value NVARCHAR(4000)) RETURNS NVARCHAR(MAX) \
             EXTERNAL NAME text_util.Concat",
        );
        let mut stmt = CreateAggregateStatement::default();
        p.fill_create_aggregate(&mut stmt).unwrap();
        assert!(p.at_eof());
        assert_eq!(stmt.name.base_name(), "Concat");
        assert_eq!(stmt.parameters[0].variable, "@value");
        assert!(stmt.return_type.is_some());
        let external = stmt.external_name.unwrap();
        assert_eq!(external.assembly.value, "text_util");
        assert_eq!(external.class.unwrap().value, "Concat");
        assert!(external.method.is_none());
    }

    #[test]
    fn function_return_shapes() {
        let mut p = parser(
            "dbo.add_one (@x INT) RETURNS INT WITH SCHEMABINDING, RETURNS NULL ON NULL INPUT \
             AS BEGIN RETURN @x + 1 END",
        );
        let mut scalar = FunctionStatement::default();
        p.fill_function(&mut scalar).unwrap();
        assert!(matches!(
            &scalar.returns,
            FunctionReturnType::Scalar(t) if t.sql_kind() == Some(SqlDataTypeKind::Int)
        ));
        let kinds: Vec<_> = scalar.options.iter().map(RoutineOption::option_kind).collect();
        assert_eq!(kinds, ["SchemaBinding", "ReturnsNullOnNullInput"]);
        assert_eq!(scalar.body.len(), 1);

        let mut p = parser("dbo.rows () RETURNS TABLE AS RETURN (SELECT 1 AS n)");
        let mut inline = FunctionStatement::default();
        p.fill_function(&mut inline).unwrap();
        assert!(p.at_eof());
        assert!(matches!(inline.returns, FunctionReturnType::InlineTable(Some(_))));

        let mut p = parser(
            "dbo.split (@s NVARCHAR(MAX)) RETURNS @out TABLE (part NVARCHAR(100)) \
             AS BEGIN RETURN END",
        );
        let mut multi = FunctionStatement::default();
        p.fill_function(&mut multi).unwrap();
        let FunctionReturnType::TableVariable { variable, definition } = &multi.returns else {
            panic!("expected a table variable return");
        };
        assert_eq!(variable, "@out");
        assert_eq!(definition.columns.len(), 1);
    }

    #[test]
    fn triggers() {
        let mut p = parser(
            "trg_audit ON dbo.orders AFTER INSERT, UPDATE NOT FOR REPLICATION AS PRINT 'x'",
        );
        let mut stmt = TriggerStatement::default();
        p.fill_trigger(&mut stmt).unwrap();
        assert_eq!(stmt.kind, TriggerKind::After);
        assert_eq!(stmt.actions, [TriggerAction::Insert, TriggerAction::Update]);
        assert!(stmt.not_for_replication);
        assert_eq!(stmt.body.len(), 1);

        let mut p = parser("ddl_guard ON DATABASE FOR DROP_TABLE, ALTER_TABLE AS ROLLBACK");
        let mut stmt = TriggerStatement::default();
        p.fill_trigger(&mut stmt).unwrap();
        assert_eq!(stmt.target, TriggerTarget::Database);
        assert_eq!(stmt.actions.len(), 2);

        let mut p = parser("t ON ALL SERVER INSTEAD OF LOGON AS RETURN");
        let mut stmt = TriggerStatement::default();
        p.fill_trigger(&mut stmt).unwrap();
        assert_eq!(stmt.target, TriggerTarget::AllServer);
        assert_eq!(stmt.kind, TriggerKind::InsteadOf);
    }

    #[test]
    fn views() {
        let mut p = parser(
            "dbo.v (a, b) WITH SCHEMABINDING, VIEW_METADATA AS SELECT x, y FROM dbo.t \
             WITH CHECK OPTION",
        );
        let mut stmt = ViewStatement::default();
        p.fill_view(&mut stmt).unwrap();
        assert!(p.at_eof());
        assert_eq!(stmt.columns.len(), 2);
        assert_eq!(stmt.options, ["SchemaBinding", "ViewMetadata"]);
        assert!(stmt.select.is_some());
        assert!(stmt.with_check_option);
    }

    #[test]
    fn dispatch_by_kind() {
        let mut p = parser("p AS RETURN 1");
        let statement = p.parse_routine("Procedure", true, false).unwrap();
        let Statement::CreateProcedure(stmt) = statement else {
            panic!("expected CreateProcedure");
        };
        assert!(stmt.or_alter);
        assert!(matches!(
            stmt.body.as_slice(),
            [Statement::Return(r)] if r.expression == Some(ScalarExpression::integer("1"))
        ));
        assert!(parser("x").parse_routine("Table", false, false).is_none());
    }
}
