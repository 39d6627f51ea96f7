//! Data modification statements and `EXECUTE`.

use serde::Serialize;

use super::{
    AssignmentKind, BooleanExpression, BulkInsertOption, ColumnReference, DataType, FromClause,
    FunctionCall, Identifier, Nullability, OptimizerHint, RowValue, ScalarExpression,
    SchemaObjectName, SelectElement, SelectStatement, TableReference, TopRowFilter, WhereClause,
    WithCtes,
};

/// `INSERT` / `INSERT INTO` / `INSERT OVER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InsertOption {
    /// Bare `INSERT`.
    #[default]
    None,
    /// `INSERT INTO`.
    Into,
    /// `INSERT OVER`.
    Over,
}

/// Where inserted rows come from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InsertSource {
    /// `VALUES (...), (...)`.
    Values(Vec<RowValue>),
    /// `DEFAULT VALUES`.
    DefaultValues,
    /// `SELECT ...`.
    Select(Box<SelectStatement>),
    /// `EXEC ...`.
    Execute(Box<ExecuteSpecification>),
}

/// `OUTPUT cols`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OutputClause {
    /// Output columns.
    pub select_columns: Vec<SelectElement>,
}

/// `OUTPUT cols INTO target [(cols)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OutputIntoClause {
    /// Output columns.
    pub select_columns: Vec<SelectElement>,
    /// Destination table or table variable.
    pub into_table: TableReference,
    /// Destination column list.
    pub columns: Vec<ColumnReference>,
}

/// `INSERT` statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InsertStatement {
    /// `WITH` clause.
    pub ctes: Option<WithCtes>,
    /// `TOP (n)`.
    pub top: Option<TopRowFilter>,
    /// `INTO` / `OVER`.
    pub insert_option: InsertOption,
    /// The target.
    pub target: TableReference,
    /// Column list.
    pub columns: Vec<ColumnReference>,
    /// `OUTPUT`.
    pub output: Option<OutputClause>,
    /// `OUTPUT ... INTO`.
    pub output_into: Option<OutputIntoClause>,
    /// Row source.
    pub source: Option<InsertSource>,
    /// `OPTION (...)`.
    pub option_hints: Vec<OptimizerHint>,
}

/// A column in an `INSERT BULK` column list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InsertBulkColumnDefinition {
    /// Column name.
    pub name: Identifier,
    /// Column type.
    pub data_type: Option<DataType>,
    /// `NULL` / `NOT NULL`.
    pub nullable: Option<Nullability>,
}

/// `INSERT BULK table (cols) [WITH (...)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InsertBulkStatement {
    /// Target table.
    pub target: SchemaObjectName,
    /// Column definitions.
    pub column_definitions: Vec<InsertBulkColumnDefinition>,
    /// Options.
    pub options: Vec<BulkInsertOption>,
}

/// `BULK INSERT table FROM 'file' [WITH (...)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BulkInsertStatement {
    /// Target table.
    pub target: SchemaObjectName,
    /// Data file.
    pub data_file: ScalarExpression,
    /// Options.
    pub options: Vec<BulkInsertOption>,
}

/// One `SET` item in `UPDATE` or `MERGE ... UPDATE SET`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SetClause {
    /// `col = expr`, `@v = expr`, or `@v = col = expr`.
    Assignment(AssignmentSetClause),
    /// `col.METHOD(...)`, such as `.WRITE`.
    FunctionCall(Box<FunctionCall>),
}

/// An assignment in a `SET` list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AssignmentSetClause {
    /// Target variable, including `@`.
    pub variable: Option<String>,
    /// Target column.
    pub column: Option<ColumnReference>,
    /// Assignment operator.
    pub assignment_kind: AssignmentKind,
    /// Assigned value.
    pub new_value: Option<ScalarExpression>,
}

/// `UPDATE` statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UpdateStatement {
    /// `WITH` clause.
    pub ctes: Option<WithCtes>,
    /// `TOP (n)`.
    pub top: Option<TopRowFilter>,
    /// The target.
    pub target: TableReference,
    /// `SET` list.
    pub set_clauses: Vec<SetClause>,
    /// `OUTPUT`.
    pub output: Option<OutputClause>,
    /// `OUTPUT ... INTO`.
    pub output_into: Option<OutputIntoClause>,
    /// `FROM`.
    pub from: Option<FromClause>,
    /// `WHERE`.
    pub where_clause: Option<WhereClause>,
    /// `OPTION (...)`.
    pub option_hints: Vec<OptimizerHint>,
}

/// `DELETE` statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeleteStatement {
    /// `WITH` clause.
    pub ctes: Option<WithCtes>,
    /// `TOP (n)`.
    pub top: Option<TopRowFilter>,
    /// The target.
    pub target: TableReference,
    /// `OUTPUT`.
    pub output: Option<OutputClause>,
    /// `OUTPUT ... INTO`.
    pub output_into: Option<OutputIntoClause>,
    /// `FROM`.
    pub from: Option<FromClause>,
    /// `WHERE`.
    pub where_clause: Option<WhereClause>,
    /// `OPTION (...)`.
    pub option_hints: Vec<OptimizerHint>,
}

/// `WHEN [NOT] MATCHED [BY SOURCE|TARGET]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MergeCondition {
    /// `WHEN MATCHED`
    #[default]
    Matched,
    /// `WHEN NOT MATCHED [BY TARGET]`
    NotMatched,
    /// `WHEN NOT MATCHED BY SOURCE`
    NotMatchedBySource,
}

/// What a `MERGE` arm does.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MergeAction {
    /// `UPDATE SET ...`.
    Update(Vec<SetClause>),
    /// `DELETE`.
    Delete,
    /// `INSERT [(cols)] VALUES (...)` or `INSERT DEFAULT VALUES`.
    Insert {
        /// Column list.
        columns: Vec<ColumnReference>,
        /// Row source.
        source: InsertSource,
    },
}

/// One `WHEN ... THEN ...` arm of `MERGE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeActionClause {
    /// Which rows the arm applies to.
    pub condition: MergeCondition,
    /// Extra `AND` condition.
    pub search_condition: Option<BooleanExpression>,
    /// The action.
    pub action: MergeAction,
}

/// `MERGE` statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MergeStatement {
    /// `WITH` clause.
    pub ctes: Option<WithCtes>,
    /// `TOP (n)`.
    pub top: Option<TopRowFilter>,
    /// The target.
    pub target: TableReference,
    /// `USING` source.
    pub using: Option<TableReference>,
    /// `ON` condition.
    pub on: Option<BooleanExpression>,
    /// `WHEN` arms.
    pub action_clauses: Vec<MergeActionClause>,
    /// `OUTPUT`.
    pub output: Option<OutputClause>,
    /// `OUTPUT ... INTO`.
    pub output_into: Option<OutputIntoClause>,
    /// `OPTION (...)`.
    pub option_hints: Vec<OptimizerHint>,
}

/// What an `EXECUTE` runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExecutableEntity {
    /// A procedure by name, optionally numbered (`proc;2`).
    Procedure {
        /// Procedure name.
        name: SchemaObjectName,
        /// Group number.
        number: Option<String>,
    },
    /// A procedure named by a variable.
    ProcedureVariable(String),
    /// `EXEC ('...' + @sql)`.
    Strings(Vec<ScalarExpression>),
}

impl Default for ExecutableEntity {
    fn default() -> Self {
        Self::Procedure {
            name: SchemaObjectName::default(),
            number: None,
        }
    }
}

/// One argument of a procedure call.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExecuteParameter {
    /// `@name =` prefix.
    pub variable: Option<String>,
    /// The value; `DEFAULT` is a literal.
    pub value: ScalarExpression,
    /// `OUTPUT` / `OUT`.
    pub is_output: bool,
}

/// Principal kinds in `EXECUTE AS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExecuteAsKind {
    /// `CALLER`
    #[default]
    Caller,
    /// `SELF`
    SelfPrincipal,
    /// `OWNER`
    Owner,
    /// `USER = 'name'`
    User,
    /// `LOGIN = 'name'`
    Login,
}

/// `EXECUTE AS ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExecuteAsClause {
    /// Principal kind.
    pub kind: ExecuteAsKind,
    /// Principal name for `USER` / `LOGIN`, or the name in a routine clause.
    pub principal: Option<ScalarExpression>,
}

/// The callable part of `EXECUTE`, also used as an `INSERT` source.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExecuteSpecification {
    /// `@rc =` prefix.
    pub return_variable: Option<String>,
    /// What to run.
    pub entity: ExecutableEntity,
    /// Arguments.
    pub parameters: Vec<ExecuteParameter>,
    /// `AS LOGIN|USER = ...` on a string batch.
    pub execute_context: Option<ExecuteAsClause>,
    /// `AT linked_server`.
    pub linked_server: Option<Identifier>,
}

/// Result-set column shape in `WITH RESULT SETS`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultColumnDefinition {
    /// Column name.
    pub name: Identifier,
    /// Column type.
    pub data_type: Option<DataType>,
    /// `NULL` / `NOT NULL`.
    pub nullable: Option<Nullability>,
}

/// `WITH` options of `EXECUTE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExecuteOption {
    /// `RECOMPILE`
    Recompile,
    /// `RESULT SETS UNDEFINED`
    ResultSetsUndefined,
    /// `RESULT SETS NONE`
    ResultSetsNone,
    /// `RESULT SETS ((cols), ...)`
    ResultSets(Vec<Vec<ResultColumnDefinition>>),
}

/// `EXEC` / `EXECUTE` statement.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExecuteStatement {
    /// The call.
    pub execute: ExecuteSpecification,
    /// `WITH` options.
    pub options: Vec<ExecuteOption>,
}
