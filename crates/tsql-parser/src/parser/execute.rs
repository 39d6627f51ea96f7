//! `EXEC` / `EXECUTE` calls and the `EXECUTE AS` principal clause.

use super::cursor::Parser;
use super::error::PResult;
use crate::ast::{
    BinaryOperator, ExecutableEntity, ExecuteAsClause, ExecuteAsKind, ExecuteOption,
    ExecuteParameter, ExecuteSpecification, ExecuteStatement, ResultColumnDefinition,
    ScalarExpression,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `EXEC[UTE] call [WITH option, ...]`
    pub(crate) fn fill_execute(&mut self, stmt: &mut ExecuteStatement) -> PResult<()> {
        if !self.eat_keyword(Keyword::Exec) {
            self.expect_keyword(Keyword::Execute)?;
        }
        stmt.execute = self.parse_execute_specification()?;
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.comma_separated(Self::parse_execute_option)?;
        }
        Ok(())
    }

    /// The call after `EXEC`: `[@rc =] proc [;n] [args]`, `@proc_var [args]`
    /// or `('sql' [+ ...] [, args]) [AS LOGIN|USER = 'x'] [AT server]`.
    pub(crate) fn parse_execute_specification(&mut self) -> PResult<ExecuteSpecification> {
        let mut spec = ExecuteSpecification::default();
        if self.check(TokenKind::Variable) && self.peek().kind == TokenKind::Eq {
            spec.return_variable = Some(self.advance().literal);
            self.advance();
        }

        if self.check(TokenKind::LeftParen) {
            self.parenthesized(|p| {
                let mut strings = Vec::new();
                flatten_concatenation(p.parse_scalar_expression()?, &mut strings);
                spec.entity = ExecutableEntity::Strings(strings);
                while p.eat(TokenKind::Comma) {
                    spec.parameters.push(p.parse_execute_parameter()?);
                }
                Ok(())
            })?;
            if self.check_keyword(Keyword::As)
                && (self.peek_keyword(Keyword::User) || self.peek_is_word("LOGIN"))
            {
                self.advance();
                spec.execute_context = Some(self.parse_execute_as_clause()?);
            }
            if self.eat_word("AT") {
                spec.linked_server = Some(self.expect_identifier()?);
            }
            return Ok(spec);
        }

        spec.entity = if self.check(TokenKind::Variable) {
            ExecutableEntity::ProcedureVariable(self.advance().literal)
        } else {
            let name = self.parse_schema_object_name()?;
            let number = if self.check(TokenKind::Semicolon)
                && self.peek().kind == TokenKind::Integer
            {
                self.advance();
                Some(self.advance().literal)
            } else {
                None
            };
            ExecutableEntity::Procedure { name, number }
        };
        if !self.at_statement_end() && !self.check_keyword(Keyword::With) {
            spec.parameters = self.comma_separated(Self::parse_execute_parameter)?;
        }
        Ok(spec)
    }

    fn parse_execute_parameter(&mut self) -> PResult<ExecuteParameter> {
        let mut param = ExecuteParameter::default();
        if self.check(TokenKind::Variable) && self.peek().kind == TokenKind::Eq {
            param.variable = Some(self.advance().literal);
            self.advance();
        }
        param.value = self.parse_scalar_expression()?;
        param.is_output = self.eat_word("OUTPUT") || self.eat_word("OUT");
        Ok(param)
    }

    fn parse_execute_option(&mut self) -> PResult<ExecuteOption> {
        if self.eat_word("RECOMPILE") {
            return Ok(ExecuteOption::Recompile);
        }
        self.expect_word("RESULT")?;
        self.expect_word("SETS")?;
        if self.eat_word("UNDEFINED") {
            return Ok(ExecuteOption::ResultSetsUndefined);
        }
        if self.eat_word("NONE") {
            return Ok(ExecuteOption::ResultSetsNone);
        }
        let sets = self.parenthesized_list(|p| {
            p.parenthesized_list(|p| {
                let name = p.expect_identifier_or_keyword()?;
                let data_type = Some(p.parse_data_type()?);
                let nullable = p.parse_nullability();
                Ok(ResultColumnDefinition {
                    name,
                    data_type,
                    nullable,
                })
            })
        })?;
        Ok(ExecuteOption::ResultSets(sets))
    }

    /// The principal after `EXECUTE AS` or `WITH EXECUTE AS`; `AS` is
    /// already consumed.
    pub(crate) fn parse_execute_as_clause(&mut self) -> PResult<ExecuteAsClause> {
        if self.eat_keyword(Keyword::User) {
            self.expect(TokenKind::Eq)?;
            return Ok(ExecuteAsClause {
                kind: ExecuteAsKind::User,
                principal: Some(self.parse_scalar_expression()?),
            });
        }
        let kind = match self.literal_upper().as_str() {
            "CALLER" => ExecuteAsKind::Caller,
            "SELF" => ExecuteAsKind::SelfPrincipal,
            "OWNER" => ExecuteAsKind::Owner,
            "LOGIN" => {
                self.advance();
                self.expect(TokenKind::Eq)?;
                return Ok(ExecuteAsClause {
                    kind: ExecuteAsKind::Login,
                    principal: Some(self.parse_scalar_expression()?),
                });
            }
            _ if matches!(self.kind(), TokenKind::String | TokenKind::NationalString) => {
                return Ok(ExecuteAsClause {
                    kind: ExecuteAsKind::User,
                    principal: Some(self.parse_primary()?),
                });
            }
            _ => return Err(self.error_here("CALLER, SELF, OWNER, USER, LOGIN or a name")),
        };
        self.advance();
        Ok(ExecuteAsClause {
            kind,
            principal: None,
        })
    }
}

/// Splits `'a' + @b + 'c'` into its operands.
fn flatten_concatenation(expr: ScalarExpression, out: &mut Vec<ScalarExpression>) {
    match expr {
        ScalarExpression::Binary {
            op: BinaryOperator::Add,
            left,
            right,
        } => {
            flatten_concatenation(*left, out);
            flatten_concatenation(*right, out);
        }
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, Nullability};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn execute(sql: &str) -> ExecuteStatement {
        let tokens = Lexer::new(sql).tokenize().unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        let mut stmt = ExecuteStatement::default();
        p.fill_execute(&mut stmt).unwrap();
        assert!(p.at_eof(), "trailing input after {sql}");
        stmt
    }

    #[test]
    fn procedure_call_with_parameters() {
        let stmt = execute("EXEC @rc = dbo.usp_load;2 @day = '2024-01-01', 5, @out = @v OUTPUT, \
                            DEFAULT");
        let spec = stmt.execute;
        assert_eq!(spec.return_variable.as_deref(), Some("@rc"));
        let ExecutableEntity::Procedure { name, number } = &spec.entity else {
            panic!("expected procedure");
        };
        assert_eq!(name.base_name(), "usp_load");
        assert_eq!(number.as_deref(), Some("2"));
        assert_eq!(spec.parameters.len(), 4);
        assert_eq!(spec.parameters[0].variable.as_deref(), Some("@day"));
        assert!(spec.parameters[1].variable.is_none());
        assert!(spec.parameters[2].is_output);
        assert_eq!(
            spec.parameters[3].value,
            ScalarExpression::Literal(Literal::Default)
        );
    }

    #[test]
    fn bare_procedure_and_variable_procedure() {
        let stmt = execute("EXECUTE sp_who");
        assert!(stmt.execute.parameters.is_empty());
        let stmt = execute("EXEC @proc 1");
        assert_eq!(
            stmt.execute.entity,
            ExecutableEntity::ProcedureVariable("@proc".into())
        );
    }

    #[test]
    fn string_batch_with_context_and_server() {
        let stmt = execute("EXEC ('SELECT ' + @cols + ' FROM t', @p) AS USER = 'bob' AT remote1");
        let spec = stmt.execute;
        let ExecutableEntity::Strings(parts) = &spec.entity else {
            panic!("expected string batch");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(spec.parameters.len(), 1);
        assert_eq!(spec.execute_context.unwrap().kind, ExecuteAsKind::User);
        assert_eq!(spec.linked_server.unwrap().value, "remote1");
    }

    #[test]
    fn result_sets_and_recompile() {
        let stmt = execute(
            "EXEC dbo.report WITH RECOMPILE, RESULT SETS ((id INT NOT NULL, name NVARCHAR(50)))",
        );
        assert_eq!(stmt.options[0], ExecuteOption::Recompile);
        let ExecuteOption::ResultSets(sets) = &stmt.options[1] else {
            panic!("expected result sets");
        };
        assert_eq!(sets[0].len(), 2);
        assert_eq!(sets[0][0].nullable, Some(Nullability::NotNull));

        let stmt = execute("EXEC p WITH RESULT SETS NONE");
        assert_eq!(stmt.options, [ExecuteOption::ResultSetsNone]);
    }
}
