//! Query expressions, table references and the clauses of `SELECT`.

use serde::Serialize;

use super::{
    BooleanExpression, BulkInsertOption, ColumnReference, FunctionCall, Identifier,
    MultiPartIdentifier, OptimizerHint, ScalarExpression, SchemaObjectName, TableHint,
    UniqueRowFilter,
};

/// `WITH name [(cols)] AS (query), ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WithCtes {
    /// The common table expressions, in order.
    pub ctes: Vec<CommonTableExpression>,
}

/// One common table expression.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CommonTableExpression {
    /// The CTE name.
    pub name: Identifier,
    /// Optional column list.
    pub columns: Vec<Identifier>,
    /// The defining query.
    pub query: QueryExpression,
}

/// A complete `SELECT` statement: optional CTEs, a query expression and `OPTION`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SelectStatement {
    /// `WITH` clause.
    pub ctes: Option<WithCtes>,
    /// The query.
    pub query: QueryExpression,
    /// `OPTION (...)` hints.
    pub option_hints: Vec<OptimizerHint>,
}

/// Set operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryQueryKind {
    /// `UNION`
    Union,
    /// `EXCEPT`
    Except,
    /// `INTERSECT`
    Intersect,
}

/// A query: a single `SELECT`, a set operation, or a parenthesized query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryExpression {
    /// `SELECT ...`.
    Specification(Box<QuerySpecification>),
    /// `left UNION|EXCEPT|INTERSECT right`.
    Binary(Box<BinaryQueryExpression>),
    /// `(query)`.
    Parenthesized(Box<QueryParenthesized>),
}

impl Default for QueryExpression {
    fn default() -> Self {
        Self::Specification(Box::default())
    }
}

impl QueryExpression {
    /// Attaches the trailing ordering clauses to whichever node this is.
    pub fn set_ordering(
        &mut self,
        order_by: Option<OrderByClause>,
        offset: Option<OffsetClause>,
        for_clause: Option<ForClause>,
    ) {
        let (o, off, fc) = match self {
            Self::Specification(q) => (&mut q.order_by, &mut q.offset, &mut q.for_clause),
            Self::Binary(q) => (&mut q.order_by, &mut q.offset, &mut q.for_clause),
            Self::Parenthesized(q) => (&mut q.order_by, &mut q.offset, &mut q.for_clause),
        };
        if order_by.is_some() {
            *o = order_by;
        }
        if offset.is_some() {
            *off = offset;
        }
        if for_clause.is_some() {
            *fc = for_clause;
        }
    }

    /// Detaches a trailing `FOR UPDATE [OF cols]` and returns its columns.
    pub fn take_for_update(&mut self) -> Option<Vec<ColumnReference>> {
        let slot = match self {
            Self::Specification(q) => &mut q.for_clause,
            Self::Binary(q) => &mut q.for_clause,
            Self::Parenthesized(q) => &mut q.for_clause,
        };
        match slot.take() {
            Some(ForClause::Update(columns)) => Some(columns),
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Returns the `ORDER BY` attached to this node.
    #[must_use]
    pub fn order_by(&self) -> Option<&OrderByClause> {
        match self {
            Self::Specification(q) => q.order_by.as_ref(),
            Self::Binary(q) => q.order_by.as_ref(),
            Self::Parenthesized(q) => q.order_by.as_ref(),
        }
    }

    /// Returns the specification if this is a plain `SELECT`.
    #[must_use]
    pub fn as_specification(&self) -> Option<&QuerySpecification> {
        match self {
            Self::Specification(q) => Some(q),
            _ => None,
        }
    }
}

/// A single `SELECT ... FROM ... WHERE ...` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QuerySpecification {
    /// `ALL` / `DISTINCT`.
    pub unique_row_filter: Option<UniqueRowFilter>,
    /// `TOP (n) [PERCENT] [WITH TIES]`.
    pub top: Option<TopRowFilter>,
    /// The select list.
    pub select_elements: Vec<SelectElement>,
    /// `INTO new_table`.
    pub into: Option<SchemaObjectName>,
    /// `FROM`.
    pub from: Option<FromClause>,
    /// `WHERE`.
    pub where_clause: Option<WhereClause>,
    /// `GROUP BY`.
    pub group_by: Option<GroupByClause>,
    /// `HAVING`.
    pub having: Option<BooleanExpression>,
    /// `ORDER BY`.
    pub order_by: Option<OrderByClause>,
    /// `OFFSET ... FETCH ...`.
    pub offset: Option<OffsetClause>,
    /// `FOR XML|JSON|BROWSE`.
    pub for_clause: Option<ForClause>,
}

/// A set operation. Chains are left-associative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryQueryExpression {
    /// The operator.
    pub kind: BinaryQueryKind,
    /// True for `UNION ALL`; plain `UNION` is distinct.
    pub all: bool,
    /// Left query.
    pub first: QueryExpression,
    /// Right query.
    pub second: QueryExpression,
    /// `ORDER BY` applying to the whole result.
    pub order_by: Option<OrderByClause>,
    /// `OFFSET ... FETCH ...`.
    pub offset: Option<OffsetClause>,
    /// `FOR` clause.
    pub for_clause: Option<ForClause>,
}

/// `(query)` in a query position.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryParenthesized {
    /// The inner query.
    pub query: QueryExpression,
    /// `ORDER BY` after the parentheses.
    pub order_by: Option<OrderByClause>,
    /// `OFFSET ... FETCH ...`.
    pub offset: Option<OffsetClause>,
    /// `FOR` clause.
    pub for_clause: Option<ForClause>,
}

/// `TOP`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TopRowFilter {
    /// Row count or percentage.
    pub expression: ScalarExpression,
    /// `PERCENT`.
    pub percent: bool,
    /// `WITH TIES`.
    pub with_ties: bool,
}

/// One item of a select list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SelectElement {
    /// `*` or `qualifier.*`.
    Star {
        /// The qualifier, if any.
        qualifier: Option<MultiPartIdentifier>,
    },
    /// `expr [AS] alias` or `alias = expr`.
    Expression {
        /// The value.
        expression: ScalarExpression,
        /// The column alias.
        alias: Option<Identifier>,
    },
    /// `@v = expr` or `@v += expr`.
    SetVariable {
        /// The variable, including `@`.
        variable: String,
        /// The assignment operator.
        assignment: AssignmentKind,
        /// The assigned value.
        expression: ScalarExpression,
    },
}

/// `=` and compound assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AssignmentKind {
    /// `=`
    #[default]
    Equals,
    /// `+=`
    AddEquals,
    /// `-=`
    SubtractEquals,
    /// `*=`
    MultiplyEquals,
    /// `/=`
    DivideEquals,
    /// `%=`
    ModEquals,
    /// `&=`
    BitwiseAndEquals,
    /// `|=`
    BitwiseOrEquals,
    /// `^=`
    BitwiseXorEquals,
}

/// `FROM` clause.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FromClause {
    /// Comma-separated table sources.
    pub table_references: Vec<TableReference>,
}

/// `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WhereClause {
    /// The search condition. Absent for `WHERE CURRENT OF`.
    pub search_condition: Option<BooleanExpression>,
    /// `CURRENT OF [GLOBAL] cursor`.
    pub cursor: Option<CursorId>,
}

/// A cursor name, optionally `GLOBAL`, or a cursor variable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CursorId {
    /// `GLOBAL` was given.
    pub global: bool,
    /// The cursor name or variable.
    pub name: super::IdentifierOrVariable,
}

/// `GROUP BY`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GroupByClause {
    /// `GROUP BY ALL`.
    pub all: bool,
    /// Grouping items.
    pub items: Vec<GroupingSpecification>,
    /// Trailing `WITH ROLLUP`.
    pub with_rollup: bool,
    /// Trailing `WITH CUBE`.
    pub with_cube: bool,
}

/// One grouping item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GroupingSpecification {
    /// A plain expression.
    Expression(ScalarExpression),
    /// `ROLLUP (...)`.
    Rollup(Vec<GroupingSpecification>),
    /// `CUBE (...)`.
    Cube(Vec<GroupingSpecification>),
    /// `GROUPING SETS (...)`.
    GroupingSets(Vec<GroupingSpecification>),
    /// `(a, b)` inside a grouping construct.
    Composite(Vec<GroupingSpecification>),
    /// `()`.
    GrandTotal,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortOrder {
    /// No direction given.
    #[default]
    NotSpecified,
    /// `ASC`
    Ascending,
    /// `DESC`
    Descending,
}

/// `ORDER BY`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrderByClause {
    /// Sort keys.
    pub elements: Vec<ExpressionWithSortOrder>,
}

/// One sort key.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExpressionWithSortOrder {
    /// The key.
    pub expression: ScalarExpression,
    /// Direction.
    pub sort_order: SortOrder,
}

/// `OFFSET n ROWS [FETCH NEXT m ROWS ONLY]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OffsetClause {
    /// Rows to skip.
    pub offset: ScalarExpression,
    /// Rows to return.
    pub fetch: Option<ScalarExpression>,
}

/// `FOR BROWSE`, `FOR XML ...` or `FOR JSON ...`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForClause {
    /// `FOR BROWSE`.
    Browse,
    /// `FOR XML mode [, options]`.
    Xml(Vec<ForClauseOption>),
    /// `FOR JSON mode [, options]`.
    Json(Vec<ForClauseOption>),
    /// `FOR UPDATE [OF cols]` in a cursor declaration.
    Update(Vec<ColumnReference>),
}

/// One `FOR XML`/`FOR JSON` directive, e.g. `PATH('row')` or `ROOT`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ForClauseOption {
    /// Pascal-case directive name.
    pub option_kind: String,
    /// Optional argument.
    pub value: Option<ScalarExpression>,
}

/// Join kinds, including `APPLY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinKind {
    /// `[INNER] JOIN`
    Inner,
    /// `LEFT [OUTER] JOIN`
    LeftOuter,
    /// `RIGHT [OUTER] JOIN`
    RightOuter,
    /// `FULL [OUTER] JOIN`
    FullOuter,
    /// `CROSS JOIN`
    Cross,
    /// `CROSS APPLY`
    CrossApply,
    /// `OUTER APPLY`
    OuterApply,
}

impl JoinKind {
    /// Returns true for the forms that take an `ON` condition.
    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        matches!(
            self,
            Self::Inner | Self::LeftOuter | Self::RightOuter | Self::FullOuter
        )
    }
}

/// `LOOP`, `HASH`, `MERGE` or `REMOTE` between the join type and `JOIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinHint {
    /// `LOOP`
    Loop,
    /// `HASH`
    Hash,
    /// `MERGE`
    Merge,
    /// `REMOTE`
    Remote,
}

/// A table source in `FROM`, a DML target, or a join tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableReference {
    /// A named table or view.
    Named(Box<NamedTableReference>),
    /// `(subquery) alias`.
    Derived(Box<QueryDerivedTable>),
    /// `(VALUES (...), (...)) alias(cols)`.
    InlineDerived(Box<InlineDerivedTable>),
    /// Any join or apply.
    Join(Box<JoinTableReference>),
    /// `(join)`.
    JoinParenthesis(Box<TableReference>),
    /// Table-valued function.
    Function(Box<FunctionTableReference>),
    /// `OPENROWSET(...)`.
    OpenRowset(Box<OpenRowsetTableReference>),
    /// `OPENQUERY(server, 'query')`.
    OpenQuery(Box<OpenQueryTableReference>),
    /// `@table_variable`.
    Variable(VariableTableReference),
    /// `source PIVOT (...) alias`.
    Pivoted(Box<PivotedTableReference>),
    /// `source UNPIVOT (...) alias`.
    Unpivoted(Box<UnpivotedTableReference>),
}

impl Default for TableReference {
    fn default() -> Self {
        Self::Named(Box::default())
    }
}

impl TableReference {
    /// Returns the named table if this is one.
    #[must_use]
    pub fn as_named(&self) -> Option<&NamedTableReference> {
        match self {
            Self::Named(t) => Some(t),
            _ => None,
        }
    }
}

/// A table or view reference.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NamedTableReference {
    /// The object name.
    pub name: SchemaObjectName,
    /// Correlation name.
    pub alias: Option<Identifier>,
    /// `FOR SYSTEM_TIME ...`.
    pub temporal: Option<TemporalClause>,
    /// `TABLESAMPLE ...`.
    pub sample: Option<TableSample>,
    /// `WITH (hints)`.
    pub hints: Vec<TableHint>,
}

/// `FOR SYSTEM_TIME` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TemporalClauseKind {
    /// `AS OF t`
    #[default]
    AsOf,
    /// `FROM a TO b`
    FromTo,
    /// `BETWEEN a AND b`
    Between,
    /// `CONTAINED IN (a, b)`
    ContainedIn,
    /// `ALL`
    All,
}

/// `FOR SYSTEM_TIME ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TemporalClause {
    /// Which form.
    pub kind: TemporalClauseKind,
    /// First bound.
    pub start: Option<ScalarExpression>,
    /// Second bound.
    pub end: Option<ScalarExpression>,
}

/// `PERCENT` / `ROWS` in a table sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TableSampleUnit {
    /// No unit.
    #[default]
    NotSpecified,
    /// `PERCENT`
    Percent,
    /// `ROWS`
    Rows,
}

/// `TABLESAMPLE [SYSTEM] (n [PERCENT|ROWS]) [REPEATABLE (seed)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableSample {
    /// `SYSTEM` was given.
    pub system: bool,
    /// Sample size.
    pub value: ScalarExpression,
    /// Unit.
    pub unit: TableSampleUnit,
    /// `REPEATABLE` seed.
    pub repeat_seed: Option<ScalarExpression>,
}

/// `(subquery) [AS] alias [(cols)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryDerivedTable {
    /// The subquery.
    pub query: QueryExpression,
    /// The alias.
    pub alias: Option<Identifier>,
    /// Column aliases.
    pub columns: Vec<Identifier>,
}

/// `(VALUES ...) [AS] alias [(cols)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InlineDerivedTable {
    /// Row constructors.
    pub rows: Vec<RowValue>,
    /// The alias.
    pub alias: Option<Identifier>,
    /// Column aliases.
    pub columns: Vec<Identifier>,
}

/// One parenthesized row in `VALUES`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RowValue {
    /// The column values.
    pub values: Vec<ScalarExpression>,
}

/// A join or apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinTableReference {
    /// Join kind.
    pub kind: JoinKind,
    /// Optional join hint.
    pub hint: Option<JoinHint>,
    /// Left side.
    pub first: TableReference,
    /// Right side.
    pub second: TableReference,
    /// `ON` condition for qualified joins.
    pub search_condition: Option<BooleanExpression>,
}

/// A table-valued function call in `FROM`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FunctionTableReference {
    /// The call.
    pub call: FunctionCall,
    /// The alias.
    pub alias: Option<Identifier>,
    /// Column aliases.
    pub columns: Vec<Identifier>,
}

/// `OPENROWSET(...)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OpenRowsetTableReference {
    /// Provider, connection and query arguments.
    pub arguments: Vec<ScalarExpression>,
    /// Object name in the provider form.
    pub object: Option<SchemaObjectName>,
    /// `BULK 'file'` data file.
    pub bulk_file: Option<ScalarExpression>,
    /// `BULK` options such as `FORMATFILE = ...` or `SINGLE_CLOB`.
    pub bulk_options: Vec<BulkInsertOption>,
    /// The alias.
    pub alias: Option<Identifier>,
    /// Column aliases.
    pub columns: Vec<Identifier>,
}

/// `OPENQUERY(linked_server, 'query')`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OpenQueryTableReference {
    /// Linked server.
    pub linked_server: Identifier,
    /// Pass-through query text.
    pub query: ScalarExpression,
    /// The alias.
    pub alias: Option<Identifier>,
}

/// `@table_variable [alias]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct VariableTableReference {
    /// The variable, including `@`.
    pub variable: String,
    /// The alias.
    pub alias: Option<Identifier>,
}

/// `source PIVOT (agg(value) FOR column IN (a, b)) alias`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PivotedTableReference {
    /// The pivoted source.
    pub source: TableReference,
    /// Aggregate function name.
    pub aggregate_function: MultiPartIdentifier,
    /// Aggregated columns.
    pub value_columns: Vec<ColumnReference>,
    /// The column whose values become new columns.
    pub pivot_column: ColumnReference,
    /// The generated column names.
    pub in_columns: Vec<Identifier>,
    /// The alias.
    pub alias: Option<Identifier>,
}

/// `source UNPIVOT (value FOR column IN (a, b)) alias`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UnpivotedTableReference {
    /// The unpivoted source.
    pub source: TableReference,
    /// Output value column.
    pub value_column: Identifier,
    /// Output name column.
    pub pivot_column: Identifier,
    /// The source columns folded into rows.
    pub in_columns: Vec<ColumnReference>,
    /// The alias.
    pub alias: Option<Identifier>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ordering_reaches_every_node_kind() {
        let order = OrderByClause {
            elements: vec![ExpressionWithSortOrder::default()],
        };

        let mut spec = QueryExpression::default();
        spec.set_ordering(Some(order.clone()), None, None);
        assert!(spec.order_by().is_some());

        let mut binary = QueryExpression::Binary(Box::new(BinaryQueryExpression {
            kind: BinaryQueryKind::Union,
            all: false,
            first: QueryExpression::default(),
            second: QueryExpression::default(),
            order_by: None,
            offset: None,
            for_clause: None,
        }));
        binary.set_ordering(Some(order), None, None);
        assert!(binary.order_by().is_some());
    }

    #[test]
    fn qualified_join_kinds() {
        assert!(JoinKind::LeftOuter.is_qualified());
        assert!(!JoinKind::CrossApply.is_qualified());
    }
}
