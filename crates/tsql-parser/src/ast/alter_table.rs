//! `ALTER TABLE` actions.

use serde::Serialize;

use super::{
    ColumnDefinition, ColumnEncryption, ConstraintDefinition, DataType, Identifier, IndexDefinition,
    IndexOption, LowPriorityLockWaitOption, Nullability, OptionState, ScalarExpression,
    SchemaObjectName, SparseKind, TableOption,
};

/// The element-kind tag of one `ALTER TABLE ... DROP` item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DropElementKind {
    /// No keyword given; defaults to a constraint.
    #[default]
    NotSpecified,
    /// `COLUMN`
    Column,
    /// `CONSTRAINT`
    Constraint,
    /// `INDEX`
    Index,
}

/// One item of `ALTER TABLE ... DROP`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterTableDropElement {
    /// Element kind.
    pub kind: DropElementKind,
    /// Element name.
    pub name: Identifier,
    /// `IF EXISTS`.
    pub if_exists: bool,
    /// `WITH (...)` options.
    pub options: Vec<IndexOption>,
}

/// `ALTER TABLE t DROP element, ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterTableDropStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// Elements in source order.
    pub elements: Vec<AlterTableDropElement>,
}

/// `ALTER TABLE t [WITH CHECK|NOCHECK] ADD ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterTableAddStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// `WITH CHECK` (true) / `WITH NOCHECK` (false).
    pub with_check: Option<bool>,
    /// Added columns.
    pub columns: Vec<ColumnDefinition>,
    /// Added table constraints.
    pub constraints: Vec<ConstraintDefinition>,
    /// Added indexes.
    pub indexes: Vec<IndexDefinition>,
    /// `PERIOD FOR SYSTEM_TIME (start, end)`.
    pub system_time_period: Option<super::SystemTimePeriod>,
}

/// Short `ALTER COLUMN c {ADD|DROP} ...` forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlterColumnFlag {
    /// `ROWGUIDCOL`
    RowGuidCol,
    /// `PERSISTED`
    Persisted,
    /// `NOT FOR REPLICATION`
    NotForReplication,
    /// `SPARSE`
    Sparse,
    /// `HIDDEN`
    Hidden,
    /// `MASKED`
    Masked,
}

/// `ALTER TABLE t ALTER COLUMN c ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterTableAlterColumnStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// Column name.
    pub column: Identifier,
    /// New type.
    pub data_type: Option<DataType>,
    /// `COLLATE`.
    pub collation: Option<Identifier>,
    /// `NULL` / `NOT NULL`.
    pub nullable: Option<Nullability>,
    /// `SPARSE` / `COLUMN_SET`.
    pub sparse: SparseKind,
    /// `FILESTREAM`.
    pub filestream: bool,
    /// `HIDDEN`.
    pub hidden: bool,
    /// `ENCRYPTED WITH (...)`.
    pub encryption: Option<ColumnEncryption>,
    /// `MASKED WITH (FUNCTION = '...')`.
    pub masking_function: Option<ScalarExpression>,
    /// `ADD flag`.
    pub add_flag: Option<AlterColumnFlag>,
    /// `DROP flag`.
    pub drop_flag: Option<AlterColumnFlag>,
    /// `WITH (ONLINE = ON)` and similar.
    pub options: Vec<IndexOption>,
}

/// `ALTER TABLE t ALTER INDEX ix REBUILD|DISABLE|REORGANIZE [WITH (...)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterTableAlterIndexStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// Index name.
    pub index: Identifier,
    /// Pascal-case action: `Rebuild`, `Disable` or `Reorganize`.
    pub action: String,
    /// Options.
    pub options: Vec<IndexOption>,
}

/// `ALTER TABLE t {ENABLE|DISABLE} TRIGGER {ALL | names}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterTableTriggerModificationStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// True for `ENABLE`.
    pub enable: bool,
    /// `ALL`.
    pub all: bool,
    /// Trigger names.
    pub triggers: Vec<Identifier>,
}

/// `ALTER TABLE t {ENABLE|DISABLE} FILETABLE_NAMESPACE`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterTableFileTableNamespaceStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// True for `ENABLE`.
    pub enable: bool,
}

/// `ALTER TABLE t {ENABLE|DISABLE} CHANGE_TRACKING [WITH (TRACK_COLUMNS_UPDATED = ...)]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterTableChangeTrackingStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// True for `ENABLE`.
    pub enable: bool,
    /// `TRACK_COLUMNS_UPDATED`.
    pub track_columns_updated: OptionState,
}

/// `WITH (...)` options of `SWITCH`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SwitchOption {
    /// `TRUNCATE_TARGET = ON|OFF`.
    TruncateTarget(OptionState),
    /// `WAIT_AT_LOW_PRIORITY (...)`.
    WaitAtLowPriority(Vec<LowPriorityLockWaitOption>),
}

/// `ALTER TABLE t SWITCH [PARTITION p] TO target [PARTITION q] [WITH (...)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterTableSwitchStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// Source partition.
    pub source_partition: Option<ScalarExpression>,
    /// Target table.
    pub target: SchemaObjectName,
    /// Target partition.
    pub target_partition: Option<ScalarExpression>,
    /// Options.
    pub options: Vec<SwitchOption>,
}

/// `ALTER TABLE t [WITH CHECK|NOCHECK] {CHECK|NOCHECK} CONSTRAINT {ALL | names}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterTableConstraintModificationStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// `WITH CHECK` (true) / `WITH NOCHECK` (false).
    pub with_check: Option<bool>,
    /// True for `CHECK`, false for `NOCHECK`.
    pub enable: bool,
    /// `ALL`.
    pub all: bool,
    /// Constraint names.
    pub constraints: Vec<Identifier>,
}

/// `ALTER TABLE t SET (options)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterTableSetStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// Options.
    pub options: Vec<TableOption>,
}

/// `ALTER TABLE t REBUILD [PARTITION = ALL|n] [WITH (...)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterTableRebuildStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// Partition number.
    pub partition: Option<ScalarExpression>,
    /// `PARTITION = ALL`.
    pub all_partitions: bool,
    /// Options.
    pub options: Vec<IndexOption>,
}
