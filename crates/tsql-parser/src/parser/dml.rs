//! `INSERT`, `UPDATE`, `DELETE`, `MERGE`, the bulk-load statements and
//! `TRUNCATE TABLE`.

use super::cursor::Parser;
use super::error::PResult;
use super::pratt::token_to_assignment;
use crate::ast::{
    AssignmentSetClause, BulkInsertStatement, DeleteStatement, InsertBulkColumnDefinition,
    InsertBulkStatement, InsertOption, InsertSource, InsertStatement, MergeAction,
    MergeActionClause, MergeCondition, MergeStatement, OutputClause, OutputIntoClause,
    ScalarExpression, SelectStatement, SetClause, TableReference, TruncateTableStatement,
    UpdateStatement, VariableTableReference,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// `INSERT [TOP (n)] [INTO|OVER] target [(cols)] [OUTPUT ...] source [OPTION (...)]`
    pub(crate) fn fill_insert(&mut self, stmt: &mut InsertStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Insert)?;
        if self.check_keyword(Keyword::Top) {
            stmt.top = Some(self.parse_top_row_filter()?);
        }
        stmt.insert_option = if self.eat_keyword(Keyword::Into) {
            InsertOption::Into
        } else if self.eat_keyword(Keyword::Over) {
            InsertOption::Over
        } else {
            InsertOption::None
        };
        stmt.target = self.parse_dml_target()?;
        if self.check(TokenKind::LeftParen) && !self.peek_keyword(Keyword::Select) {
            stmt.columns = self.parse_column_list()?;
        }
        self.parse_output_clauses(&mut stmt.output, &mut stmt.output_into)?;
        stmt.source = Some(self.parse_insert_source()?);
        stmt.option_hints = self.parse_option_clause()?;
        Ok(())
    }

    /// `DEFAULT VALUES`, `VALUES (...), ...`, `EXEC ...` or a query.
    fn parse_insert_source(&mut self) -> PResult<InsertSource> {
        if self.check_keyword(Keyword::Default) && self.peek_keyword(Keyword::Values) {
            self.advance();
            self.advance();
            return Ok(InsertSource::DefaultValues);
        }
        if self.eat_keyword(Keyword::Values) {
            return Ok(InsertSource::Values(
                self.comma_separated(Self::parse_row_value)?,
            ));
        }
        if self.check_keyword(Keyword::Exec) || self.check_keyword(Keyword::Execute) {
            self.advance();
            return Ok(InsertSource::Execute(Box::new(
                self.parse_execute_specification()?,
            )));
        }
        let mut select = SelectStatement::default();
        if self.check_keyword(Keyword::With) {
            select.ctes = Some(self.parse_with_ctes()?);
        }
        select.query = self.parse_query_expression()?;
        Ok(InsertSource::Select(Box::new(select)))
    }

    /// The target of a data modification statement: a table or view with
    /// its tail, a table variable, or a rowset function.
    pub(crate) fn parse_dml_target(&mut self) -> PResult<TableReference> {
        match self.kind() {
            TokenKind::Variable => {
                let variable = self.advance().literal;
                let alias = self.parse_optional_alias()?;
                Ok(TableReference::Variable(VariableTableReference {
                    variable,
                    alias,
                }))
            }
            TokenKind::Keyword(Keyword::OpenRowset) => self.parse_open_rowset(),
            TokenKind::Keyword(Keyword::OpenQuery) => self.parse_open_query(),
            _ => {
                let name = self.parse_schema_object_name()?;
                Ok(TableReference::Named(Box::new(
                    self.parse_named_table_tail(name)?,
                )))
            }
        }
    }

    /// `[OUTPUT cols INTO target [(cols)]] [OUTPUT cols]`
    fn parse_output_clauses(
        &mut self,
        output: &mut Option<OutputClause>,
        output_into: &mut Option<OutputIntoClause>,
    ) -> PResult<()> {
        while self.eat_word("OUTPUT") {
            let select_columns = self.comma_separated(Self::parse_select_element)?;
            if self.eat_keyword(Keyword::Into) {
                let into_table = self.parse_dml_target()?;
                let columns = if self.check(TokenKind::LeftParen) {
                    self.parse_column_list()?
                } else {
                    Vec::new()
                };
                *output_into = Some(OutputIntoClause {
                    select_columns,
                    into_table,
                    columns,
                });
            } else {
                *output = Some(OutputClause { select_columns });
            }
        }
        Ok(())
    }

    /// `UPDATE [TOP (n)] target SET ... [OUTPUT ...] [FROM ...] [WHERE ...] [OPTION (...)]`
    pub(crate) fn fill_update(&mut self, stmt: &mut UpdateStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Update)?;
        if self.check_keyword(Keyword::Top) {
            stmt.top = Some(self.parse_top_row_filter()?);
        }
        stmt.target = self.parse_dml_target()?;
        self.expect_keyword(Keyword::Set)?;
        stmt.set_clauses = self.comma_separated(Self::parse_set_clause)?;
        self.parse_output_clauses(&mut stmt.output, &mut stmt.output_into)?;
        if self.check_keyword(Keyword::From) {
            stmt.from = Some(self.parse_from_clause()?);
        }
        if self.check_keyword(Keyword::Where) {
            stmt.where_clause = Some(self.parse_where_clause()?);
        }
        stmt.option_hints = self.parse_option_clause()?;
        Ok(())
    }

    /// One `SET` item.
    ///
    /// The target is read as a scalar, which never contains `=`; only when an
    /// assignment operator follows is it taken as a column or variable. So
    /// `@v = col = expr` is the compound form, and a value can never begin
    /// with `col =`.
    pub(crate) fn parse_set_clause(&mut self) -> PResult<SetClause> {
        let target = self.parse_scalar_expression()?;
        let Some(assignment_kind) = token_to_assignment(&self.kind()) else {
            return match target {
                ScalarExpression::FunctionCall(call) => Ok(SetClause::FunctionCall(call)),
                _ => Err(self.error_here("assignment operator")),
            };
        };
        self.advance();
        let mut clause = AssignmentSetClause {
            assignment_kind,
            ..AssignmentSetClause::default()
        };
        match target {
            ScalarExpression::Variable(variable) => {
                clause.variable = Some(variable);
                let value = self.parse_scalar_expression()?;
                match value {
                    ScalarExpression::ColumnReference(column)
                        if token_to_assignment(&self.kind()).is_some() =>
                    {
                        self.advance();
                        clause.column = Some(column);
                        clause.new_value = Some(self.parse_scalar_expression()?);
                    }
                    value => clause.new_value = Some(value),
                }
            }
            ScalarExpression::ColumnReference(column) => {
                clause.column = Some(column);
                clause.new_value = Some(self.parse_scalar_expression()?);
            }
            _ => return Err(self.error_message("SET target must be a column or variable")),
        }
        Ok(SetClause::Assignment(clause))
    }

    /// `DELETE [TOP (n)] [FROM] target [OUTPUT ...] [FROM ...] [WHERE ...] [OPTION (...)]`
    pub(crate) fn fill_delete(&mut self, stmt: &mut DeleteStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Delete)?;
        if self.check_keyword(Keyword::Top) {
            stmt.top = Some(self.parse_top_row_filter()?);
        }
        self.eat_keyword(Keyword::From);
        stmt.target = self.parse_dml_target()?;
        self.parse_output_clauses(&mut stmt.output, &mut stmt.output_into)?;
        if self.check_keyword(Keyword::From) {
            stmt.from = Some(self.parse_from_clause()?);
        }
        if self.check_keyword(Keyword::Where) {
            stmt.where_clause = Some(self.parse_where_clause()?);
        }
        stmt.option_hints = self.parse_option_clause()?;
        Ok(())
    }

    /// `MERGE [TOP (n)] [INTO] target USING source ON cond WHEN ... [OUTPUT ...] [OPTION (...)]`
    pub(crate) fn fill_merge(&mut self, stmt: &mut MergeStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Merge)?;
        if self.check_keyword(Keyword::Top) {
            stmt.top = Some(self.parse_top_row_filter()?);
        }
        self.eat_keyword(Keyword::Into);
        stmt.target = self.parse_dml_target()?;
        self.expect_word("USING")?;
        stmt.using = Some(self.parse_table_reference()?);
        self.expect_keyword(Keyword::On)?;
        stmt.on = Some(self.parse_boolean_expression()?);
        while self.check_keyword(Keyword::When) {
            stmt.action_clauses.push(self.parse_merge_action_clause()?);
        }
        self.parse_output_clauses(&mut stmt.output, &mut stmt.output_into)?;
        stmt.option_hints = self.parse_option_clause()?;
        Ok(())
    }

    fn parse_merge_action_clause(&mut self) -> PResult<MergeActionClause> {
        self.expect_keyword(Keyword::When)?;
        let condition = if self.eat_keyword(Keyword::Not) {
            self.expect_word("MATCHED")?;
            if self.eat_keyword(Keyword::By) {
                if self.eat_word("SOURCE") {
                    MergeCondition::NotMatchedBySource
                } else {
                    self.expect_word("TARGET")?;
                    MergeCondition::NotMatched
                }
            } else {
                MergeCondition::NotMatched
            }
        } else {
            self.expect_word("MATCHED")?;
            MergeCondition::Matched
        };
        let search_condition = if self.eat_keyword(Keyword::And) {
            Some(self.parse_boolean_expression()?)
        } else {
            None
        };
        self.expect_keyword(Keyword::Then)?;

        let action = match self.kind() {
            TokenKind::Keyword(Keyword::Update) => {
                self.advance();
                self.expect_keyword(Keyword::Set)?;
                MergeAction::Update(self.comma_separated(Self::parse_set_clause)?)
            }
            TokenKind::Keyword(Keyword::Delete) => {
                self.advance();
                MergeAction::Delete
            }
            TokenKind::Keyword(Keyword::Insert) => {
                self.advance();
                let columns = if self.check(TokenKind::LeftParen) {
                    self.parse_column_list()?
                } else {
                    Vec::new()
                };
                let source = if self.eat_keyword(Keyword::Default) {
                    self.expect_keyword(Keyword::Values)?;
                    InsertSource::DefaultValues
                } else {
                    self.expect_keyword(Keyword::Values)?;
                    InsertSource::Values(vec![self.parse_row_value()?])
                };
                MergeAction::Insert { columns, source }
            }
            _ => return Err(self.error_here("UPDATE, DELETE or INSERT")),
        };
        Ok(MergeActionClause {
            condition,
            search_condition,
            action,
        })
    }

    /// `BULK INSERT table FROM 'file' [WITH (option, ...)]`
    pub(crate) fn fill_bulk_insert(&mut self, stmt: &mut BulkInsertStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Bulk)?;
        self.expect_keyword(Keyword::Insert)?;
        stmt.target = self.parse_schema_object_name()?;
        self.expect_keyword(Keyword::From)?;
        stmt.data_file = self.parse_primary()?;
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.parenthesized_list(Self::parse_bulk_option)?;
        }
        Ok(())
    }

    /// `INSERT BULK table [(col type [NULL|NOT NULL], ...)] [WITH (option, ...)]`
    pub(crate) fn fill_insert_bulk(&mut self, stmt: &mut InsertBulkStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Insert)?;
        self.expect_keyword(Keyword::Bulk)?;
        stmt.target = self.parse_schema_object_name()?;
        if self.check(TokenKind::LeftParen) {
            stmt.column_definitions = self.parenthesized_list(|p| {
                let name = p.expect_identifier()?;
                let data_type = Some(p.parse_data_type()?);
                let nullable = p.parse_nullability();
                Ok(InsertBulkColumnDefinition {
                    name,
                    data_type,
                    nullable,
                })
            })?;
        }
        if self.eat_keyword(Keyword::With) {
            stmt.options = self.parenthesized_list(Self::parse_bulk_option)?;
        }
        Ok(())
    }

    /// `TRUNCATE TABLE name [WITH (PARTITIONS (n [TO m], ...))]`
    pub(crate) fn fill_truncate_table(&mut self, stmt: &mut TruncateTableStatement) -> PResult<()> {
        self.expect_keyword(Keyword::Truncate)?;
        self.expect_keyword(Keyword::Table)?;
        stmt.name = self.parse_schema_object_name()?;
        if self.eat_keyword(Keyword::With) {
            self.parenthesized(|p| {
                p.expect_word("PARTITIONS")?;
                stmt.partitions = p.parse_partition_ranges()?;
                Ok(())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        AssignmentKind, BinaryOperator, BooleanExpression, BulkInsertOption, ColumnReference,
        Literal, Nullability, RowValue, SqlDataTypeKind,
    };
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    fn fill<T: Default>(sql: &str, f: impl FnOnce(&mut Parser, &mut T) -> PResult<()>) -> T {
        let mut p = parser(sql);
        let mut stmt = T::default();
        f(&mut p, &mut stmt).unwrap();
        assert!(p.at_eof(), "trailing input after {sql}");
        stmt
    }

    #[test]
    fn insert_values_rows() {
        let stmt: InsertStatement = fill(
            "INSERT INTO t (a, b) VALUES (1, 'x'), (2, 'y')",
            Parser::fill_insert,
        );
        assert_eq!(stmt.insert_option, InsertOption::Into);
        assert_eq!(stmt.columns.len(), 2);
        let Some(InsertSource::Values(rows)) = stmt.source else {
            panic!("expected VALUES source");
        };
        assert_eq!(
            rows[1],
            RowValue {
                values: vec![ScalarExpression::integer("2"), ScalarExpression::string("y")],
            }
        );
    }

    #[test]
    fn insert_sources() {
        let stmt: InsertStatement = fill("INSERT t DEFAULT VALUES", Parser::fill_insert);
        assert_eq!(stmt.insert_option, InsertOption::None);
        assert_eq!(stmt.source, Some(InsertSource::DefaultValues));

        let stmt: InsertStatement = fill(
            "INSERT INTO dbo.t WITH (TABLOCK) (a) SELECT a FROM s OPTION (MAXDOP 1)",
            Parser::fill_insert,
        );
        assert!(matches!(stmt.source, Some(InsertSource::Select(_))));
        assert_eq!(stmt.option_hints.len(), 1);
        let named = stmt.target.as_named().unwrap();
        assert_eq!(named.hints.len(), 1);

        let stmt: InsertStatement =
            fill("INSERT INTO #t EXEC dbo.load_day @day = 1", Parser::fill_insert);
        assert!(matches!(stmt.source, Some(InsertSource::Execute(_))));
    }

    #[test]
    fn insert_with_output_into() {
        let stmt: InsertStatement = fill(
            "INSERT INTO t (a) OUTPUT inserted.id, inserted.a INTO @ids (id, a) VALUES (1)",
            Parser::fill_insert,
        );
        let into = stmt.output_into.unwrap();
        assert_eq!(into.select_columns.len(), 2);
        assert!(matches!(into.into_table, TableReference::Variable(_)));
        assert_eq!(into.columns.len(), 2);
        assert!(stmt.output.is_none());
    }

    #[test]
    fn compound_set_clause() {
        let stmt: UpdateStatement = fill(
            "UPDATE t SET @v = col = col + 1 WHERE id = 7",
            Parser::fill_update,
        );
        let [SetClause::Assignment(clause)] = stmt.set_clauses.as_slice() else {
            panic!("expected one assignment");
        };
        assert_eq!(clause.variable.as_deref(), Some("@v"));
        assert_eq!(clause.column.as_ref().map(ColumnReference::column_name), Some("col"));
        assert!(matches!(
            clause.new_value,
            Some(ScalarExpression::Binary {
                op: BinaryOperator::Add,
                ..
            })
        ));
        let search = stmt.where_clause.unwrap().search_condition.unwrap();
        assert!(matches!(search, BooleanExpression::Comparison { .. }));
    }

    #[test]
    fn set_clause_forms() {
        let stmt: UpdateStatement = fill(
            "UPDATE TOP (10) u SET a += 1, @x = 5, doc.WRITE(N'x', 0, 1) FROM u \
             JOIN v ON u.id = v.id",
            Parser::fill_update,
        );
        assert!(stmt.top.is_some());
        assert_eq!(stmt.set_clauses.len(), 3);
        let SetClause::Assignment(first) = &stmt.set_clauses[0] else {
            panic!("expected assignment");
        };
        assert_eq!(first.assignment_kind, AssignmentKind::AddEquals);
        assert!(matches!(
            &stmt.set_clauses[1],
            SetClause::Assignment(a) if a.column.is_none() && a.variable.is_some()
        ));
        assert!(matches!(stmt.set_clauses[2], SetClause::FunctionCall(_)));
        assert!(stmt.from.is_some());
    }

    #[test]
    fn set_target_must_be_assignable() {
        let mut p = parser("1 = 2");
        assert!(p.parse_set_clause().is_err());
    }

    #[test]
    fn delete_forms() {
        let stmt: DeleteStatement = fill(
            "DELETE FROM t OUTPUT deleted.* WHERE CURRENT OF c",
            Parser::fill_delete,
        );
        assert!(stmt.output.is_some());
        assert!(stmt.where_clause.unwrap().cursor.is_some());

        let stmt: DeleteStatement = fill(
            "DELETE t FROM t INNER JOIN u ON t.id = u.id WHERE u.gone = 1",
            Parser::fill_delete,
        );
        assert_eq!(stmt.target.as_named().unwrap().name.base_name(), "t");
        assert!(stmt.from.is_some());
    }

    #[test]
    fn merge_arms() {
        let stmt: MergeStatement = fill(
            "MERGE INTO dbo.target AS t USING (SELECT id, v FROM src) AS s (id, v) ON t.id = s.id \
             WHEN MATCHED AND t.v <> s.v THEN UPDATE SET t.v = s.v \
             WHEN NOT MATCHED BY TARGET THEN INSERT (id, v) VALUES (s.id, s.v) \
             WHEN NOT MATCHED BY SOURCE THEN DELETE \
             OUTPUT $action, inserted.id",
            Parser::fill_merge,
        );
        let conditions: Vec<_> = stmt.action_clauses.iter().map(|c| c.condition).collect();
        assert_eq!(
            conditions,
            [
                MergeCondition::Matched,
                MergeCondition::NotMatched,
                MergeCondition::NotMatchedBySource
            ]
        );
        assert!(stmt.action_clauses[0].search_condition.is_some());
        assert!(matches!(
            stmt.action_clauses[1].action,
            MergeAction::Insert { ref columns, .. } if columns.len() == 2
        ));
        assert_eq!(stmt.action_clauses[2].action, MergeAction::Delete);
        assert!(matches!(stmt.using, Some(TableReference::Derived(_))));
        assert_eq!(stmt.output.unwrap().select_columns.len(), 2);
    }

    #[test]
    fn bulk_loads() {
        let stmt: BulkInsertStatement = fill(
            "BULK INSERT dbo.t FROM 'c:\\data.csv' WITH (FIELDTERMINATOR = ',', FIRSTROW = 2, \
             TABLOCK)",
            Parser::fill_bulk_insert,
        );
        assert_eq!(stmt.options.len(), 3);
        assert_eq!(
            stmt.data_file.as_literal().and_then(Literal::as_string),
            Some("c:\\data.csv")
        );

        let stmt: InsertBulkStatement = fill(
            "INSERT BULK t (id INT NOT NULL, name NVARCHAR(20)) WITH (CHECK_CONSTRAINTS)",
            Parser::fill_insert_bulk,
        );
        assert_eq!(stmt.column_definitions.len(), 2);
        assert_eq!(stmt.column_definitions[0].nullable, Some(Nullability::NotNull));
        assert_eq!(
            stmt.column_definitions[1]
                .data_type
                .as_ref()
                .and_then(|t| t.sql_kind()),
            Some(SqlDataTypeKind::NVarChar)
        );
        assert!(matches!(stmt.options[0], BulkInsertOption::Flag { .. }));
    }

    #[test]
    fn truncate_partitions() {
        let stmt: TruncateTableStatement = fill(
            "TRUNCATE TABLE dbo.t WITH (PARTITIONS (1, 4 TO 6))",
            Parser::fill_truncate_table,
        );
        assert_eq!(stmt.name.base_name(), "t");
        assert_eq!(stmt.partitions.len(), 2);
    }
}
