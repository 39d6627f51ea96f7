//! `SELECT` statements: query expressions, select lists, table sources and
//! the trailing `ORDER BY` / `OFFSET` / `FOR` clauses.

use super::cursor::Parser;
use super::error::PResult;
use super::pratt::token_to_assignment;
use crate::ast::{
    option_kind_from_name, BinaryQueryExpression, BinaryQueryKind, ColumnType,
    CommonTableExpression, CursorId, ExpressionWithSortOrder, ForClause, ForClauseOption,
    FromClause, FunctionTableReference, GroupByClause, GroupingSpecification, Identifier,
    InlineDerivedTable, JoinHint, JoinKind, JoinTableReference, MultiPartIdentifier,
    NamedTableReference, OffsetClause, OpenQueryTableReference, OpenRowsetTableReference,
    OrderByClause, PivotedTableReference, QueryDerivedTable, QueryExpression, QueryParenthesized,
    QuerySpecification, RowValue, ScalarExpression, SchemaObjectName, SelectElement,
    SelectStatement, SortOrder, TableReference, TableSample, TableSampleUnit, TemporalClause,
    TemporalClauseKind, TopRowFilter, UniqueRowFilter, UnpivotedTableReference,
    VariableTableReference, WhereClause, WithCtes,
};
use crate::lexer::{Keyword, TokenKind};

/// Unreserved words that follow a table or column without being its alias.
const NON_ALIAS_WORDS: &[&str] = &[
    "OUTPUT", "USING", "APPLY", "WINDOW", "SEND", "RECEIVE", "MOVE", "GET", "LOOP", "HASH",
    "REMOTE", "OFFSET", "MATCHED",
];

/// Reserved words that name rowset functions usable in `FROM`.
const ROWSET_FUNCTIONS: &[Keyword] = &[
    Keyword::ContainsTable,
    Keyword::FreeTextTable,
    Keyword::OpenXml,
    Keyword::OpenDataSource,
    Keyword::SemanticKeyPhraseTable,
    Keyword::SemanticSimilarityTable,
    Keyword::SemanticSimilarityDetailsTable,
];

impl Parser {
    /// `[WITH ctes] query [OPTION (...)]`
    pub(crate) fn fill_select(&mut self, stmt: &mut SelectStatement) -> PResult<()> {
        if self.check_keyword(Keyword::With) {
            stmt.ctes = Some(self.parse_with_ctes()?);
        }
        stmt.query = self.parse_query_expression()?;
        stmt.option_hints = self.parse_option_clause()?;
        Ok(())
    }

    /// `WITH [XMLNAMESPACES (...),] name [(cols)] AS (query), ...`
    pub(crate) fn parse_with_ctes(&mut self) -> PResult<WithCtes> {
        self.expect_keyword(Keyword::With)?;
        if self.eat_word("XMLNAMESPACES") {
            self.skip_parenthesized();
            if !self.eat(TokenKind::Comma) {
                return Ok(WithCtes::default());
            }
        }
        let ctes = self.comma_separated(|p| {
            let name = p.expect_identifier()?;
            let columns = if p.check(TokenKind::LeftParen) {
                p.parse_identifier_list()?
            } else {
                Vec::new()
            };
            p.expect_keyword(Keyword::As)?;
            let query = p.parenthesized(Self::parse_query_expression)?;
            Ok(CommonTableExpression {
                name,
                columns,
                query,
            })
        })?;
        Ok(WithCtes { ctes })
    }

    /// Parses a query with its set operators and trailing clauses.
    /// `UNION` and `EXCEPT` are left associative; `INTERSECT` binds tighter.
    pub(crate) fn parse_query_expression(&mut self) -> PResult<QueryExpression> {
        self.nested(|p| {
            let mut query = p.parse_intersect_chain()?;
            loop {
                let kind = if p.check_keyword(Keyword::Union) {
                    BinaryQueryKind::Union
                } else if p.check_keyword(Keyword::Except) {
                    BinaryQueryKind::Except
                } else {
                    break;
                };
                p.advance();
                let all = p.eat_keyword(Keyword::All);
                let second = p.parse_intersect_chain()?;
                query = binary_query(kind, all, query, second);
            }

            let order_by = if p.check_keyword(Keyword::Order) {
                Some(p.parse_order_by_clause()?)
            } else {
                None
            };
            let offset = p.parse_offset_clause()?;
            let for_clause = p.parse_for_clause()?;
            query.set_ordering(order_by, offset, for_clause);
            Ok(query)
        })
    }

    fn parse_intersect_chain(&mut self) -> PResult<QueryExpression> {
        let mut query = self.parse_query_primary()?;
        while self.eat_keyword(Keyword::Intersect) {
            let all = self.eat_keyword(Keyword::All);
            let second = self.parse_query_primary()?;
            query = binary_query(BinaryQueryKind::Intersect, all, query, second);
        }
        Ok(query)
    }

    fn parse_query_primary(&mut self) -> PResult<QueryExpression> {
        if self.check(TokenKind::LeftParen) {
            let query = self.parenthesized(Self::parse_query_expression)?;
            return Ok(QueryExpression::Parenthesized(Box::new(QueryParenthesized {
                query,
                ..QueryParenthesized::default()
            })));
        }
        Ok(QueryExpression::Specification(Box::new(
            self.parse_query_specification()?,
        )))
    }

    fn parse_query_specification(&mut self) -> PResult<QuerySpecification> {
        self.expect_keyword(Keyword::Select)?;
        let mut spec = QuerySpecification::default();
        if self.eat_keyword(Keyword::All) {
            spec.unique_row_filter = Some(UniqueRowFilter::All);
        } else if self.eat_keyword(Keyword::Distinct) {
            spec.unique_row_filter = Some(UniqueRowFilter::Distinct);
        }
        if self.check_keyword(Keyword::Top) {
            spec.top = Some(self.parse_top_row_filter()?);
        }
        spec.select_elements = self.comma_separated(Self::parse_select_element)?;
        if self.eat_keyword(Keyword::Into) {
            spec.into = Some(self.parse_schema_object_name()?);
        }
        if self.check_keyword(Keyword::From) {
            spec.from = Some(self.parse_from_clause()?);
        }
        if self.check_keyword(Keyword::Where) {
            spec.where_clause = Some(self.parse_where_clause()?);
        }
        if self.check_keyword(Keyword::Group) {
            spec.group_by = Some(self.parse_group_by_clause()?);
        }
        if self.eat_keyword(Keyword::Having) {
            spec.having = Some(self.parse_boolean_expression()?);
        }
        Ok(spec)
    }

    /// `TOP (expr) | TOP n` followed by `[PERCENT] [WITH TIES]`.
    pub(crate) fn parse_top_row_filter(&mut self) -> PResult<TopRowFilter> {
        self.expect_keyword(Keyword::Top)?;
        let expression = if self.check(TokenKind::LeftParen) && !self.peek_keyword(Keyword::Select)
        {
            self.parenthesized(Self::parse_scalar_expression)?
        } else {
            self.parse_primary()?
        };
        let percent = self.eat_keyword(Keyword::Percent);
        let with_ties = self.check_keyword(Keyword::With) && self.peek_is_word("TIES");
        if with_ties {
            self.advance();
            self.advance();
        }
        Ok(TopRowFilter {
            expression,
            percent,
            with_ties,
        })
    }

    /// One select-list item: `*`, `t.*`, `@v = expr`, `alias = expr` or
    /// `expr [[AS] alias]`.
    pub(crate) fn parse_select_element(&mut self) -> PResult<SelectElement> {
        if self.check(TokenKind::Variable) {
            if let Some(assignment) = token_to_assignment(&self.peek().kind) {
                let variable = self.advance().literal;
                self.advance();
                let expression = self.parse_scalar_expression()?;
                return Ok(SelectElement::SetVariable {
                    variable,
                    assignment,
                    expression,
                });
            }
        }

        let is_string = matches!(self.kind(), TokenKind::String | TokenKind::NationalString);
        if (self.at_identifier() || is_string) && self.peek().kind == TokenKind::Eq {
            let alias = if is_string {
                Identifier::new(self.expect_string()?)
            } else {
                self.take_identifier()
            };
            self.advance();
            let expression = self.parse_scalar_expression()?;
            return Ok(SelectElement::Expression {
                expression,
                alias: Some(alias),
            });
        }

        let expression = self.parse_scalar_expression()?;
        if let ScalarExpression::ColumnReference(column) = &expression {
            if column.column_type == ColumnType::Wildcard {
                let qualifier = (column.identifier.count > 0).then(|| column.identifier.clone());
                return Ok(SelectElement::Star { qualifier });
            }
        }
        let alias = if matches!(self.kind(), TokenKind::String | TokenKind::NationalString) {
            Some(Identifier::new(self.expect_string()?))
        } else {
            self.parse_optional_alias()?
        };
        Ok(SelectElement::Expression { expression, alias })
    }

    /// `[AS] alias`. Without `AS` only a word that cannot continue the
    /// statement is taken.
    pub(crate) fn parse_optional_alias(&mut self) -> PResult<Option<Identifier>> {
        if self.eat_keyword(Keyword::As) {
            if matches!(self.kind(), TokenKind::String | TokenKind::NationalString) {
                return Ok(Some(Identifier::new(self.expect_string()?)));
            }
            return self.expect_identifier().map(Some);
        }
        let implicit = match self.kind() {
            TokenKind::QuotedIdentifier | TokenKind::BracketedIdentifier => true,
            TokenKind::Identifier => {
                !self.at_statement_end()
                    && !self.is_any_word(NON_ALIAS_WORDS)
                    && self.peek().kind != TokenKind::Colon
            }
            _ => false,
        };
        Ok(implicit.then(|| self.take_identifier()))
    }

    /// `[AS] alias [(col, ...)]` after a derived table or rowset function.
    fn parse_alias_and_columns(&mut self) -> PResult<(Option<Identifier>, Vec<Identifier>)> {
        let alias = self.parse_optional_alias()?;
        let columns = if alias.is_some() && self.check(TokenKind::LeftParen) {
            self.parse_identifier_list()?
        } else {
            Vec::new()
        };
        Ok((alias, columns))
    }

    pub(crate) fn parse_from_clause(&mut self) -> PResult<FromClause> {
        self.expect_keyword(Keyword::From)?;
        let table_references = self.comma_separated(Self::parse_table_reference)?;
        Ok(FromClause { table_references })
    }

    /// A table source followed by any number of joins and applies.
    pub(crate) fn parse_table_reference(&mut self) -> PResult<TableReference> {
        self.nested(|p| {
            let mut reference = p.parse_table_primary()?;
            while let Some((kind, hint)) = p.parse_join_operator()? {
                let second = p.parse_table_primary()?;
                let search_condition = if kind.is_qualified() {
                    p.expect_keyword(Keyword::On)?;
                    Some(p.parse_boolean_expression()?)
                } else {
                    None
                };
                reference = TableReference::Join(Box::new(JoinTableReference {
                    kind,
                    hint,
                    first: reference,
                    second,
                    search_condition,
                }));
            }
            Ok(reference)
        })
    }

    fn parse_join_operator(&mut self) -> PResult<Option<(JoinKind, Option<JoinHint>)>> {
        let kind = match self.kind() {
            TokenKind::Keyword(Keyword::Cross) => {
                self.advance();
                if self.eat_keyword(Keyword::Join) {
                    return Ok(Some((JoinKind::Cross, None)));
                }
                self.expect_word("APPLY")?;
                return Ok(Some((JoinKind::CrossApply, None)));
            }
            TokenKind::Keyword(Keyword::Outer) if self.peek_is_word("APPLY") => {
                self.advance();
                self.advance();
                return Ok(Some((JoinKind::OuterApply, None)));
            }
            TokenKind::Keyword(Keyword::Join) => {
                self.advance();
                return Ok(Some((JoinKind::Inner, None)));
            }
            TokenKind::Keyword(Keyword::Inner) => JoinKind::Inner,
            TokenKind::Keyword(Keyword::Left) => JoinKind::LeftOuter,
            TokenKind::Keyword(Keyword::Right) => JoinKind::RightOuter,
            TokenKind::Keyword(Keyword::Full) => JoinKind::FullOuter,
            _ => return Ok(None),
        };
        self.advance();
        if kind != JoinKind::Inner {
            self.eat_keyword(Keyword::Outer);
        }
        let hint = if self.eat_word("LOOP") {
            Some(JoinHint::Loop)
        } else if self.eat_word("HASH") {
            Some(JoinHint::Hash)
        } else if self.eat_keyword(Keyword::Merge) {
            Some(JoinHint::Merge)
        } else if self.eat_word("REMOTE") {
            Some(JoinHint::Remote)
        } else {
            None
        };
        self.expect_keyword(Keyword::Join)?;
        Ok(Some((kind, hint)))
    }

    fn parse_table_primary(&mut self) -> PResult<TableReference> {
        let mut reference = match self.kind() {
            TokenKind::LeftParen => self.parse_parenthesized_table()?,
            TokenKind::Variable => {
                let variable = self.advance().literal;
                let alias = self.parse_optional_alias()?;
                TableReference::Variable(VariableTableReference { variable, alias })
            }
            TokenKind::Keyword(Keyword::OpenRowset) => self.parse_open_rowset()?,
            TokenKind::Keyword(Keyword::OpenQuery) => self.parse_open_query()?,
            TokenKind::Keyword(keyword) if ROWSET_FUNCTIONS.contains(&keyword) => {
                let name = self.take_identifier();
                let call = self.parse_function_call(None, name)?;
                let (alias, columns) = self.parse_alias_and_columns()?;
                TableReference::Function(Box::new(FunctionTableReference {
                    call,
                    alias,
                    columns,
                }))
            }
            _ => {
                let mut parts = self.parse_name_parts()?.parts;
                if self.check(TokenKind::LeftParen) {
                    let name = parts.pop().unwrap_or_default();
                    let call_target = (!parts.is_empty()).then(|| MultiPartIdentifier::new(parts));
                    let call = self.parse_function_call(call_target, name)?;
                    let (alias, columns) = self.parse_alias_and_columns()?;
                    TableReference::Function(Box::new(FunctionTableReference {
                        call,
                        alias,
                        columns,
                    }))
                } else {
                    let name = SchemaObjectName::from_parts(parts);
                    TableReference::Named(Box::new(self.parse_named_table_tail(name)?))
                }
            }
        };

        loop {
            if self.eat_keyword(Keyword::Pivot) {
                reference = self.parse_pivot(reference)?;
            } else if self.eat_keyword(Keyword::Unpivot) {
                reference = self.parse_unpivot(reference)?;
            } else {
                return Ok(reference);
            }
        }
    }

    /// `(SELECT ...)`, `(VALUES ...)` or a parenthesized join.
    fn parse_parenthesized_table(&mut self) -> PResult<TableReference> {
        if self.peek_keyword(Keyword::Select) {
            self.advance();
            let query = self.nested(Self::parse_query_expression)?;
            self.expect(TokenKind::RightParen)?;
            let (alias, columns) = self.parse_alias_and_columns()?;
            return Ok(TableReference::Derived(Box::new(QueryDerivedTable {
                query,
                alias,
                columns,
            })));
        }
        if self.peek_keyword(Keyword::Values) {
            self.advance();
            self.advance();
            let rows = self.nested(|p| p.comma_separated(Self::parse_row_value))?;
            self.expect(TokenKind::RightParen)?;
            let (alias, columns) = self.parse_alias_and_columns()?;
            return Ok(TableReference::InlineDerived(Box::new(InlineDerivedTable {
                rows,
                alias,
                columns,
            })));
        }
        let inner = self.parenthesized(Self::parse_table_reference)?;
        Ok(TableReference::JoinParenthesis(Box::new(inner)))
    }

    /// `( value [, value ...] )` in a `VALUES` list.
    pub(crate) fn parse_row_value(&mut self) -> PResult<RowValue> {
        let values = self.parenthesized_list(Self::parse_scalar_expression)?;
        Ok(RowValue { values })
    }

    /// `[FOR SYSTEM_TIME ...] [[AS] alias] [TABLESAMPLE ...] [WITH (hints)]`
    pub(crate) fn parse_named_table_tail(
        &mut self,
        name: SchemaObjectName,
    ) -> PResult<NamedTableReference> {
        let mut named = NamedTableReference {
            name,
            ..NamedTableReference::default()
        };
        if self.check_keyword(Keyword::For) && self.peek_is_word("SYSTEM_TIME") {
            self.advance();
            self.advance();
            named.temporal = Some(self.parse_temporal_clause()?);
        }
        named.alias = self.parse_optional_alias()?;
        if self.eat_keyword(Keyword::TableSample) {
            named.sample = Some(self.parse_table_sample()?);
        }
        if self.check_keyword(Keyword::With) && self.peek().kind == TokenKind::LeftParen {
            named.hints = self.parse_with_table_hints()?;
        }
        Ok(named)
    }

    fn parse_temporal_clause(&mut self) -> PResult<TemporalClause> {
        let mut clause = TemporalClause::default();
        if self.eat_keyword(Keyword::As) {
            self.expect_word("OF")?;
            clause.kind = TemporalClauseKind::AsOf;
            clause.start = Some(self.parse_scalar_expression()?);
        } else if self.eat_keyword(Keyword::From) {
            clause.kind = TemporalClauseKind::FromTo;
            clause.start = Some(self.parse_scalar_expression()?);
            self.expect_keyword(Keyword::To)?;
            clause.end = Some(self.parse_scalar_expression()?);
        } else if self.eat_keyword(Keyword::Between) {
            clause.kind = TemporalClauseKind::Between;
            clause.start = Some(self.parse_scalar_expression()?);
            self.expect_keyword(Keyword::And)?;
            clause.end = Some(self.parse_scalar_expression()?);
        } else if self.eat_word("CONTAINED") {
            self.expect_keyword(Keyword::In)?;
            clause.kind = TemporalClauseKind::ContainedIn;
            self.parenthesized(|p| {
                clause.start = Some(p.parse_scalar_expression()?);
                p.expect(TokenKind::Comma)?;
                clause.end = Some(p.parse_scalar_expression()?);
                Ok(())
            })?;
        } else {
            self.expect_keyword(Keyword::All)?;
            clause.kind = TemporalClauseKind::All;
        }
        Ok(clause)
    }

    /// `[SYSTEM] (n [PERCENT | ROWS]) [REPEATABLE (seed)]`, after `TABLESAMPLE`.
    fn parse_table_sample(&mut self) -> PResult<TableSample> {
        let mut sample = TableSample {
            system: self.eat_word("SYSTEM"),
            ..TableSample::default()
        };
        self.parenthesized(|p| {
            sample.value = p.parse_scalar_expression()?;
            if p.eat_keyword(Keyword::Percent) {
                sample.unit = TableSampleUnit::Percent;
            } else if p.eat_word("ROWS") {
                sample.unit = TableSampleUnit::Rows;
            }
            Ok(())
        })?;
        if self.eat_word("REPEATABLE") {
            sample.repeat_seed = Some(self.parenthesized(Self::parse_scalar_expression)?);
        }
        Ok(sample)
    }

    /// `OPENROWSET(BULK 'file', options)` or
    /// `OPENROWSET('provider', 'conn'[;'user';'pwd'], object | 'query')`.
    pub(crate) fn parse_open_rowset(&mut self) -> PResult<TableReference> {
        self.advance();
        let mut rowset = OpenRowsetTableReference::default();
        self.parenthesized(|p| {
            if p.eat_keyword(Keyword::Bulk) {
                rowset.bulk_file = Some(p.parse_scalar_expression()?);
                while p.eat(TokenKind::Comma) {
                    rowset.bulk_options.push(p.parse_bulk_option()?);
                }
                return Ok(());
            }
            rowset.arguments.push(p.parse_scalar_expression()?);
            p.expect(TokenKind::Comma)?;
            rowset.arguments.push(p.parse_scalar_expression()?);
            while p.eat(TokenKind::Semicolon) {
                rowset.arguments.push(p.parse_scalar_expression()?);
            }
            if p.eat(TokenKind::Comma) {
                if matches!(p.kind(), TokenKind::String | TokenKind::NationalString) {
                    rowset.arguments.push(p.parse_scalar_expression()?);
                } else {
                    rowset.object = Some(p.parse_schema_object_name()?);
                }
            }
            Ok(())
        })?;
        let (alias, columns) = self.parse_alias_and_columns()?;
        rowset.alias = alias;
        rowset.columns = columns;
        Ok(TableReference::OpenRowset(Box::new(rowset)))
    }

    /// `OPENQUERY(linked_server, 'query') [[AS] alias]`
    pub(crate) fn parse_open_query(&mut self) -> PResult<TableReference> {
        self.advance();
        let (linked_server, query) = self.parenthesized(|p| {
            let server = p.expect_identifier()?;
            p.expect(TokenKind::Comma)?;
            Ok((server, p.parse_scalar_expression()?))
        })?;
        let alias = self.parse_optional_alias()?;
        Ok(TableReference::OpenQuery(Box::new(OpenQueryTableReference {
            linked_server,
            query,
            alias,
        })))
    }

    /// `(agg(value) FOR column IN (a, b)) [AS] alias`, after `PIVOT`.
    fn parse_pivot(&mut self, source: TableReference) -> PResult<TableReference> {
        let mut pivot = PivotedTableReference {
            source,
            ..PivotedTableReference::default()
        };
        self.parenthesized(|p| {
            pivot.aggregate_function = p.parse_multi_part_identifier()?;
            pivot.value_columns = p.parse_column_list()?;
            p.expect_keyword(Keyword::For)?;
            pivot.pivot_column = p.parse_column_reference()?;
            p.expect_keyword(Keyword::In)?;
            pivot.in_columns = p.parse_identifier_list()?;
            Ok(())
        })?;
        pivot.alias = self.parse_optional_alias()?;
        Ok(TableReference::Pivoted(Box::new(pivot)))
    }

    /// `(value FOR column IN (a, b)) [AS] alias`, after `UNPIVOT`.
    fn parse_unpivot(&mut self, source: TableReference) -> PResult<TableReference> {
        let mut unpivot = UnpivotedTableReference {
            source,
            ..UnpivotedTableReference::default()
        };
        self.parenthesized(|p| {
            unpivot.value_column = p.expect_identifier()?;
            p.expect_keyword(Keyword::For)?;
            unpivot.pivot_column = p.expect_identifier()?;
            p.expect_keyword(Keyword::In)?;
            unpivot.in_columns = p.parse_column_list()?;
            Ok(())
        })?;
        unpivot.alias = self.parse_optional_alias()?;
        Ok(TableReference::Unpivoted(Box::new(unpivot)))
    }

    /// `WHERE condition` or `WHERE CURRENT OF [GLOBAL] cursor`.
    pub(crate) fn parse_where_clause(&mut self) -> PResult<WhereClause> {
        self.expect_keyword(Keyword::Where)?;
        if self.check_keyword(Keyword::Current) && self.peek_keyword(Keyword::Of) {
            self.advance();
            self.advance();
            let cursor = self.parse_cursor_id()?;
            return Ok(WhereClause {
                search_condition: None,
                cursor: Some(cursor),
            });
        }
        Ok(WhereClause {
            search_condition: Some(self.parse_boolean_expression()?),
            cursor: None,
        })
    }

    /// `[GLOBAL] cursor_name | @cursor_variable`
    pub(crate) fn parse_cursor_id(&mut self) -> PResult<CursorId> {
        let global = self.is_word("GLOBAL") && self.peek().kind.is_identifier();
        if global {
            self.advance();
        }
        Ok(CursorId {
            global,
            name: self.parse_identifier_or_variable()?,
        })
    }

    /// `GROUP BY [ALL] items [WITH ROLLUP | WITH CUBE]`
    fn parse_group_by_clause(&mut self) -> PResult<GroupByClause> {
        self.expect_keyword(Keyword::Group)?;
        self.expect_keyword(Keyword::By)?;
        let mut clause = GroupByClause {
            all: self.eat_keyword(Keyword::All),
            ..GroupByClause::default()
        };
        clause.items = self.comma_separated(Self::parse_grouping_specification)?;
        if self.check_keyword(Keyword::With) {
            if self.peek_is_word("ROLLUP") {
                self.advance();
                self.advance();
                clause.with_rollup = true;
            } else if self.peek_is_word("CUBE") {
                self.advance();
                self.advance();
                clause.with_cube = true;
            }
        }
        Ok(clause)
    }

    fn parse_grouping_specification(&mut self) -> PResult<GroupingSpecification> {
        let next_is_paren = self.peek().kind == TokenKind::LeftParen;
        if self.is_word("ROLLUP") && next_is_paren {
            self.advance();
            let items = self.parenthesized_list(Self::parse_grouping_specification)?;
            return Ok(GroupingSpecification::Rollup(items));
        }
        if self.is_word("CUBE") && next_is_paren {
            self.advance();
            let items = self.parenthesized_list(Self::parse_grouping_specification)?;
            return Ok(GroupingSpecification::Cube(items));
        }
        if self.is_word("GROUPING") && self.peek_is_word("SETS") {
            self.advance();
            self.advance();
            let items = self.parenthesized_list(Self::parse_grouping_specification)?;
            return Ok(GroupingSpecification::GroupingSets(items));
        }
        if self.check(TokenKind::LeftParen) && !self.peek_keyword(Keyword::Select) {
            let mut items = self.parenthesized_list(Self::parse_grouping_specification)?;
            return Ok(match items.len() {
                0 => GroupingSpecification::GrandTotal,
                1 => match items.remove(0) {
                    GroupingSpecification::Expression(inner) => {
                        let grouped = ScalarExpression::Parenthesized(Box::new(inner));
                        GroupingSpecification::Expression(self.parse_scalar_infix(grouped, 0)?)
                    }
                    other => GroupingSpecification::Composite(vec![other]),
                },
                _ => GroupingSpecification::Composite(items),
            });
        }
        Ok(GroupingSpecification::Expression(
            self.parse_scalar_expression()?,
        ))
    }

    /// `ORDER BY expr [ASC | DESC], ...`
    pub(crate) fn parse_order_by_clause(&mut self) -> PResult<OrderByClause> {
        self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;
        let elements = self.comma_separated(|p| {
            let expression = p.parse_scalar_expression()?;
            let sort_order = p.parse_sort_order();
            Ok(ExpressionWithSortOrder {
                expression,
                sort_order,
            })
        })?;
        Ok(OrderByClause { elements })
    }

    /// `[ASC | DESC]`
    pub(crate) fn parse_sort_order(&mut self) -> SortOrder {
        if self.eat_keyword(Keyword::Asc) {
            SortOrder::Ascending
        } else if self.eat_keyword(Keyword::Desc) {
            SortOrder::Descending
        } else {
            SortOrder::NotSpecified
        }
    }

    /// `OFFSET n ROW[S] [FETCH FIRST|NEXT m ROW[S] ONLY]`
    fn parse_offset_clause(&mut self) -> PResult<Option<OffsetClause>> {
        if !self.is_word("OFFSET") {
            return Ok(None);
        }
        self.advance();
        let offset = self.parse_scalar_expression()?;
        if !self.eat_word("ROWS") {
            self.expect_word("ROW")?;
        }
        let fetch = if self.eat_keyword(Keyword::Fetch) {
            if !self.eat_word("NEXT") {
                self.expect_word("FIRST")?;
            }
            let count = self.parse_scalar_expression()?;
            if !self.eat_word("ROWS") {
                self.expect_word("ROW")?;
            }
            self.expect_word("ONLY")?;
            Some(count)
        } else {
            None
        };
        Ok(Some(OffsetClause { offset, fetch }))
    }

    /// `FOR BROWSE | FOR XML ... | FOR JSON ... | FOR UPDATE [OF cols]`
    fn parse_for_clause(&mut self) -> PResult<Option<ForClause>> {
        if !self.check_keyword(Keyword::For) {
            return Ok(None);
        }
        if self.peek_keyword(Keyword::Browse) {
            self.advance();
            self.advance();
            return Ok(Some(ForClause::Browse));
        }
        if self.peek_is_word("XML") || self.peek_is_word("JSON") {
            self.advance();
            let xml = self.advance().literal.eq_ignore_ascii_case("XML");
            let options = self.comma_separated(Self::parse_for_clause_option)?;
            return Ok(Some(if xml {
                ForClause::Xml(options)
            } else {
                ForClause::Json(options)
            }));
        }
        if self.peek_keyword(Keyword::Update) {
            self.advance();
            self.advance();
            let columns = if self.eat_keyword(Keyword::Of) {
                self.comma_separated(Self::parse_column_reference)?
            } else {
                Vec::new()
            };
            return Ok(Some(ForClause::Update(columns)));
        }
        Ok(None)
    }

    /// `RAW('row')`, `PATH`, `ELEMENTS XSINIL`, `BINARY BASE64`, `ROOT('r')` ...
    fn parse_for_clause_option(&mut self) -> PResult<ForClauseOption> {
        let mut name = self.expect_any_word()?;
        if self.is_any_word(&["XSINIL", "ABSENT", "BASE64"]) {
            name.push('_');
            name.push_str(&self.advance().literal.to_ascii_uppercase());
        }
        let value = if self.check(TokenKind::LeftParen) {
            if self.peek().kind == TokenKind::RightParen {
                self.advance();
                self.advance();
                None
            } else {
                Some(self.parenthesized(Self::parse_scalar_expression)?)
            }
        } else {
            None
        };
        Ok(ForClauseOption {
            option_kind: option_kind_from_name(&name),
            value,
        })
    }
}

fn binary_query(
    kind: BinaryQueryKind,
    all: bool,
    first: QueryExpression,
    second: QueryExpression,
) -> QueryExpression {
    QueryExpression::Binary(Box::new(BinaryQueryExpression {
        kind,
        all,
        first,
        second,
        order_by: None,
        offset: None,
        for_clause: None,
    }))
}
