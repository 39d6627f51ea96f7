//! Table bodies: columns, constraints and inline indexes.

use serde::Serialize;

use super::{
    BooleanExpression, ColumnWithSortOrder, DataType, FileGroupOrPartitionScheme, Identifier,
    IndexOption, ScalarExpression, SchemaObjectName,
};

/// `NULL` / `NOT NULL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Nullability {
    /// `NULL`
    Null,
    /// `NOT NULL`
    NotNull,
}

/// The parenthesized body of `CREATE TABLE`, a table type or a table variable.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableDefinition {
    /// Column definitions.
    pub columns: Vec<ColumnDefinition>,
    /// Table-level constraints.
    pub constraints: Vec<ConstraintDefinition>,
    /// Table-level inline indexes.
    pub indexes: Vec<IndexDefinition>,
    /// `PERIOD FOR SYSTEM_TIME (start, end)`.
    pub system_time_period: Option<SystemTimePeriod>,
}

/// `PERIOD FOR SYSTEM_TIME (start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SystemTimePeriod {
    /// Start column.
    pub start: Identifier,
    /// End column.
    pub end: Identifier,
}

/// `AS expr [PERSISTED [NOT NULL]]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ComputedColumn {
    /// The expression.
    pub expression: ScalarExpression,
    /// `PERSISTED`.
    pub persisted: bool,
}

/// `IDENTITY [(seed, increment)] [NOT FOR REPLICATION]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IdentityOptions {
    /// Seed.
    pub seed: Option<ScalarExpression>,
    /// Increment.
    pub increment: Option<ScalarExpression>,
    /// `NOT FOR REPLICATION`.
    pub not_for_replication: bool,
}

/// `[CONSTRAINT name] DEFAULT expr [WITH VALUES]` on a column.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ColumnDefault {
    /// Constraint name.
    pub name: Option<Identifier>,
    /// Default value.
    pub expression: ScalarExpression,
    /// `WITH VALUES`.
    pub with_values: bool,
}

/// `SPARSE` / `COLUMN_SET FOR ALL_SPARSE_COLUMNS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SparseKind {
    /// Neither.
    #[default]
    None,
    /// `SPARSE`
    Sparse,
    /// `COLUMN_SET FOR ALL_SPARSE_COLUMNS`
    ColumnSetForAllSparseColumns,
}

/// `GENERATED ALWAYS AS ROW|TRANSACTION_ID|SEQUENCE_NUMBER START|END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GeneratedAlwaysKind {
    /// `ROW START`
    RowStart,
    /// `ROW END`
    RowEnd,
    /// `TRANSACTION_ID START`
    TransactionIdStart,
    /// `TRANSACTION_ID END`
    TransactionIdEnd,
    /// `SEQUENCE_NUMBER START`
    SequenceNumberStart,
    /// `SEQUENCE_NUMBER END`
    SequenceNumberEnd,
}

/// `ENCRYPTED WITH (...)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnEncryption {
    /// `COLUMN_ENCRYPTION_KEY`.
    pub key: Option<Identifier>,
    /// `ENCRYPTION_TYPE`, e.g. `Deterministic`.
    pub encryption_type: Option<String>,
    /// `ALGORITHM`.
    pub algorithm: Option<String>,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: Identifier,
    /// Column type; absent for computed columns.
    pub data_type: Option<DataType>,
    /// `COLLATE`.
    pub collation: Option<Identifier>,
    /// `AS expr [PERSISTED]`.
    pub computed: Option<ComputedColumn>,
    /// `NULL` / `NOT NULL`, kept apart from other constraints.
    pub nullable: Option<Nullability>,
    /// `IDENTITY`.
    pub identity: Option<IdentityOptions>,
    /// `DEFAULT`.
    pub default: Option<ColumnDefault>,
    /// Inline constraints other than nullability and default.
    pub constraints: Vec<ConstraintDefinition>,
    /// `ROWGUIDCOL`.
    pub row_guid_col: bool,
    /// `FILESTREAM`.
    pub filestream: bool,
    /// `SPARSE` / column set.
    pub sparse: SparseKind,
    /// `GENERATED ALWAYS AS ...`.
    pub generated_always: Option<GeneratedAlwaysKind>,
    /// `HIDDEN`.
    pub hidden: bool,
    /// `MASKED WITH (FUNCTION = '...')`.
    pub masking_function: Option<ScalarExpression>,
    /// `ENCRYPTED WITH (...)`.
    pub encryption: Option<ColumnEncryption>,
    /// Inline `INDEX name ...`.
    pub index: Option<IndexDefinition>,
}

/// Referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ForeignKeyAction {
    /// Not given.
    #[default]
    NotSpecified,
    /// `NO ACTION`
    NoAction,
    /// `CASCADE`
    Cascade,
    /// `SET NULL`
    SetNull,
    /// `SET DEFAULT`
    SetDefault,
}

/// `PRIMARY KEY` / `UNIQUE` body.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct KeyConstraint {
    /// `CLUSTERED` (true) / `NONCLUSTERED` (false).
    pub clustered: Option<bool>,
    /// `HASH` index for memory-optimized tables.
    pub hash: bool,
    /// Key columns; empty for an inline column constraint.
    pub columns: Vec<ColumnWithSortOrder>,
    /// `WITH (...)` index options, including `FILLFACTOR = n`.
    pub options: Vec<IndexOption>,
    /// `ON filegroup`.
    pub on: Option<FileGroupOrPartitionScheme>,
    /// `NOT ENFORCED`.
    pub not_enforced: bool,
}

/// `FOREIGN KEY` / `REFERENCES` body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ForeignKeyConstraint {
    /// Referencing columns; empty for an inline column constraint.
    pub columns: Vec<Identifier>,
    /// Referenced table.
    pub referenced_table: SchemaObjectName,
    /// Referenced columns.
    pub referenced_columns: Vec<Identifier>,
    /// `ON DELETE`.
    pub delete_action: ForeignKeyAction,
    /// `ON UPDATE`.
    pub update_action: ForeignKeyAction,
    /// `NOT FOR REPLICATION`.
    pub not_for_replication: bool,
}

/// `CHECK [NOT FOR REPLICATION] (condition)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CheckConstraint {
    /// The condition.
    pub condition: Option<BooleanExpression>,
    /// `NOT FOR REPLICATION`.
    pub not_for_replication: bool,
}

/// `DEFAULT expr FOR column` as a table constraint.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DefaultConstraint {
    /// Default value.
    pub expression: ScalarExpression,
    /// Target column.
    pub column: Option<Identifier>,
    /// `WITH VALUES`.
    pub with_values: bool,
}

/// `CONNECTION (a TO b, ...)` on a graph edge table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ConnectionConstraint {
    /// Node pairs.
    pub connections: Vec<(SchemaObjectName, SchemaObjectName)>,
    /// `ON DELETE CASCADE`.
    pub on_delete_cascade: bool,
}

/// The five constraint kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ConstraintKind {
    /// `PRIMARY KEY`.
    PrimaryKey(KeyConstraint),
    /// `UNIQUE`.
    Unique(KeyConstraint),
    /// `FOREIGN KEY ... REFERENCES`.
    ForeignKey(ForeignKeyConstraint),
    /// `CHECK`.
    Check(CheckConstraint),
    /// `DEFAULT ... FOR`.
    Default(DefaultConstraint),
    /// `CONNECTION`.
    Connection(ConnectionConstraint),
}

impl ConstraintKind {
    /// Returns a short tag for the constraint kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryKey(_) => "PrimaryKey",
            Self::Unique(_) => "Unique",
            Self::ForeignKey(_) => "ForeignKey",
            Self::Check(_) => "Check",
            Self::Default(_) => "Default",
            Self::Connection(_) => "Connection",
        }
    }
}

/// A named or anonymous constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstraintDefinition {
    /// `CONSTRAINT name`.
    pub name: Option<Identifier>,
    /// The constraint body.
    pub kind: ConstraintKind,
}

/// An index declared inline in a table body or on a column.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IndexDefinition {
    /// Index name.
    pub name: Identifier,
    /// `UNIQUE`.
    pub unique: bool,
    /// `CLUSTERED` (true) / `NONCLUSTERED` (false).
    pub clustered: Option<bool>,
    /// `COLUMNSTORE`.
    pub columnstore: bool,
    /// `HASH`.
    pub hash: bool,
    /// Key columns.
    pub columns: Vec<ColumnWithSortOrder>,
    /// `INCLUDE (...)`.
    pub include: Vec<Identifier>,
    /// `WHERE` filter.
    pub filter: Option<BooleanExpression>,
    /// `WITH (...)`.
    pub options: Vec<IndexOption>,
    /// `ON filegroup`.
    pub on: Option<FileGroupOrPartitionScheme>,
    /// `FILESTREAM_ON`.
    pub filestream_on: Option<Identifier>,
}
