//! Procedural statements: variables, blocks, flow control, transactions,
//! cursors and a few server commands.

use serde::Serialize;

use super::{
    AssignmentKind, BooleanExpression, ColumnReference, CursorId, DataType, Identifier,
    IdentifierOrValue, IdentifierOrVariable, OptionBag, OptionState, PartitionRange,
    ScalarExpression, SchemaObjectName, SelectStatement, Statement, TableDefinition,
};

/// One `@name [AS] type [= value]` in a `DECLARE` list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeclareVariableElement {
    /// Variable name, including `@`.
    pub variable: String,
    /// Declared type.
    pub data_type: Option<DataType>,
    /// Initial value.
    pub value: Option<ScalarExpression>,
}

/// `DECLARE @a INT = 1, @b VARCHAR(10)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeclareVariableStatement {
    /// Declarations in source order.
    pub declarations: Vec<DeclareVariableElement>,
}

/// `DECLARE @t TABLE (...)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeclareTableVariableStatement {
    /// Variable name, including `@`.
    pub variable: String,
    /// Table body.
    pub definition: TableDefinition,
}

/// The body of a cursor declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CursorDefinition {
    /// Option words such as `Local`, `FastForward`, `Scroll`, `Insensitive`.
    pub options: Vec<String>,
    /// `FOR select`.
    pub select: Option<Box<SelectStatement>>,
    /// `FOR READ ONLY`.
    pub read_only: bool,
    /// `FOR UPDATE [OF cols]`; `Some(vec![])` for a bare `FOR UPDATE`.
    pub update_columns: Option<Vec<ColumnReference>>,
}

/// `DECLARE name CURSOR ... FOR select`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeclareCursorStatement {
    /// Cursor name.
    pub name: Identifier,
    /// Cursor body.
    pub definition: CursorDefinition,
}

/// `SET @v = expr` and its compound forms, or `SET @cursor = CURSOR ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SetVariableStatement {
    /// Variable name, including `@`.
    pub variable: String,
    /// Assignment operator.
    pub assignment: AssignmentKind,
    /// Assigned value.
    pub expression: Option<ScalarExpression>,
    /// Cursor assigned with `CURSOR ... FOR`.
    pub cursor: Option<CursorDefinition>,
}

/// `SET NOCOUNT, XACT_ABORT ON`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PredicateSetStatement {
    /// Pascal-case option names.
    pub options: Vec<String>,
    /// The state applied to all of them.
    pub state: OptionState,
}

/// `SET` commands that take a value: `LANGUAGE`, `DATEFORMAT`, `DEADLOCK_PRIORITY`,
/// `LOCK_TIMEOUT`, `ROWCOUNT`, `TEXTSIZE`, `CONTEXT_INFO`, `DATEFIRST`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GeneralSetStatement {
    /// Pascal-case command name.
    pub option_kind: String,
    /// The value; word values become identifier literals.
    pub value: Option<ScalarExpression>,
}

/// Transaction isolation levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IsolationLevel {
    /// `READ UNCOMMITTED`
    ReadUncommitted,
    /// `READ COMMITTED`
    ReadCommitted,
    /// `REPEATABLE READ`
    RepeatableRead,
    /// `SNAPSHOT`
    Snapshot,
    /// `SERIALIZABLE`
    Serializable,
}

/// `SET TRANSACTION ISOLATION LEVEL ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SetTransactionIsolationLevelStatement {
    /// The level; `None` if unrecognized.
    pub level: Option<IsolationLevel>,
}

/// `SET IDENTITY_INSERT t ON|OFF`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SetIdentityInsertStatement {
    /// Table name.
    pub table: SchemaObjectName,
    /// The state.
    pub state: OptionState,
}

/// `IF condition statement [ELSE statement]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IfStatement {
    /// Condition.
    pub predicate: Option<BooleanExpression>,
    /// Statement run when the condition holds.
    pub then_statement: Option<Box<Statement>>,
    /// `ELSE` branch.
    pub else_statement: Option<Box<Statement>>,
}

/// `WHILE condition statement`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WhileStatement {
    /// Condition.
    pub predicate: Option<BooleanExpression>,
    /// Loop body.
    pub statement: Option<Box<Statement>>,
}

/// `BEGIN ... END`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BeginEndBlockStatement {
    /// Statements in the block.
    pub statements: Vec<Statement>,
}

/// `BEGIN TRY ... END TRY BEGIN CATCH ... END CATCH`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TryCatchStatement {
    /// `TRY` block.
    pub try_statements: Vec<Statement>,
    /// `CATCH` block.
    pub catch_statements: Vec<Statement>,
}

/// `BEGIN [DISTRIBUTED] TRAN[SACTION] [name [WITH MARK 'desc']]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BeginTransactionStatement {
    /// `DISTRIBUTED`.
    pub distributed: bool,
    /// Transaction name.
    pub name: Option<IdentifierOrVariable>,
    /// `WITH MARK`.
    pub marked: bool,
    /// Mark description.
    pub mark_description: Option<ScalarExpression>,
}

/// `COMMIT [TRAN[SACTION] [name]] [WITH (DELAYED_DURABILITY = ON|OFF)]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CommitTransactionStatement {
    /// Transaction name.
    pub name: Option<IdentifierOrVariable>,
    /// `DELAYED_DURABILITY`.
    pub delayed_durability: OptionState,
}

/// `ROLLBACK [TRAN[SACTION] [name]]` or `SAVE TRAN[SACTION] name`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TransactionNameStatement {
    /// Transaction or savepoint name.
    pub name: Option<IdentifierOrVariable>,
}

/// `RETURN [expr]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReturnStatement {
    /// Return value.
    pub expression: Option<ScalarExpression>,
}

/// `BREAK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BreakStatement;

/// `CONTINUE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ContinueStatement;

/// `GOTO label`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct GotoStatement {
    /// Target label.
    pub label: Identifier,
}

/// `label:`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LabelStatement {
    /// Label name, without the colon.
    pub label: String,
}

/// `PRINT expr`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PrintStatement {
    /// Printed value.
    pub expression: ScalarExpression,
}

/// `THROW [number, message, state]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ThrowStatement {
    /// Error number; absent for a rethrow.
    pub error_number: Option<ScalarExpression>,
    /// Message.
    pub message: Option<ScalarExpression>,
    /// State.
    pub state: Option<ScalarExpression>,
}

/// `RAISERROR (msg, severity, state [, args]) [WITH LOG|NOWAIT|SETERROR]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RaiseErrorStatement {
    /// Message id or text.
    pub message: ScalarExpression,
    /// Severity.
    pub severity: Option<ScalarExpression>,
    /// State.
    pub state: Option<ScalarExpression>,
    /// Format arguments.
    pub arguments: Vec<ScalarExpression>,
    /// Pascal-case `WITH` options.
    pub options: Vec<String>,
}

/// `WAITFOR DELAY|TIME`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WaitForKind {
    /// `DELAY 'hh:mm:ss'`
    #[default]
    Delay,
    /// `TIME 'hh:mm:ss'`
    Time,
}

/// `WAITFOR {DELAY|TIME} value`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WaitForStatement {
    /// Delay or time.
    pub kind: WaitForKind,
    /// The duration or time of day.
    pub parameter: Option<ScalarExpression>,
}

/// `USE database`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UseStatement {
    /// Database name.
    pub database: Identifier,
}

/// `TRUNCATE TABLE t [WITH (PARTITIONS (1, 3 TO 5))]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TruncateTableStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// Partition ranges.
    pub partitions: Vec<PartitionRange>,
}

/// `OPEN`, `CLOSE` or `DEALLOCATE` of a cursor.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CursorStatement {
    /// The cursor.
    pub cursor: CursorId,
}

/// `FETCH` direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchOrientation {
    /// `NEXT`
    Next,
    /// `PRIOR`
    Prior,
    /// `FIRST`
    First,
    /// `LAST`
    Last,
    /// `ABSOLUTE n`
    Absolute,
    /// `RELATIVE n`
    Relative,
}

/// `FETCH [orientation FROM] cursor [INTO @a, @b]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FetchCursorStatement {
    /// Direction.
    pub orientation: Option<FetchOrientation>,
    /// Row offset for `ABSOLUTE` / `RELATIVE`.
    pub offset: Option<ScalarExpression>,
    /// The cursor.
    pub cursor: CursorId,
    /// `INTO` variables.
    pub into: Vec<String>,
}

/// `CHECKPOINT [duration]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CheckpointStatement {
    /// Requested duration in seconds.
    pub duration: Option<ScalarExpression>,
}

/// `RECONFIGURE [WITH OVERRIDE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReconfigureStatement {
    /// `WITH OVERRIDE`.
    pub with_override: bool,
}

/// `KILL id [WITH STATUSONLY]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct KillStatement {
    /// Session id or unit of work.
    pub parameter: ScalarExpression,
    /// `WITH STATUSONLY`.
    pub status_only: bool,
}

/// A backup device: `DISK = 'path'`, `URL = '...'` or a logical device name.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BackupDevice {
    /// `Disk`, `Tape` or `Url`; `None` for a logical device.
    pub device_type: Option<String>,
    /// Path or logical name.
    pub name: IdentifierOrValue,
}

/// What a `BACKUP` copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BackupKind {
    /// `BACKUP DATABASE`
    #[default]
    Database,
    /// `BACKUP LOG`
    Log,
}

/// `BACKUP {DATABASE|LOG} db TO devices [WITH options]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BackupStatement {
    /// Database or log.
    pub kind: BackupKind,
    /// Database name.
    pub database: IdentifierOrVariable,
    /// `FILE = ...` / `FILEGROUP = ...` selections.
    pub files: OptionBag,
    /// `TO` devices.
    pub devices: Vec<BackupDevice>,
    /// `MIRROR TO` devices.
    pub mirror_devices: Vec<BackupDevice>,
    /// `WITH` options.
    pub options: OptionBag,
}

/// `RESTORE {DATABASE|LOG|FILELISTONLY|HEADERONLY|...} [db] FROM devices [WITH options]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RestoreStatement {
    /// Pascal-case restore kind, e.g. `Database`, `Log`, `FileListOnly`.
    pub kind: String,
    /// Database name.
    pub database: Option<IdentifierOrVariable>,
    /// `FILE = ...` / `FILEGROUP = ...` selections.
    pub files: OptionBag,
    /// `FROM` devices.
    pub devices: Vec<BackupDevice>,
    /// `WITH` options.
    pub options: OptionBag,
}
