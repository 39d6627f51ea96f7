//! Abstract syntax tree for T-SQL scripts.
//!
//! Every node derives `serde::Serialize`; enum variant names are the
//! pascal-case discriminator tags consumers switch on.

mod alter_table;
mod control;
mod database;
mod ddl;
mod dml;
mod expression;
mod hints;
mod identifier;
mod options;
mod query;
mod security;
mod statement;
mod table;
mod types;

pub use alter_table::{
    AlterColumnFlag, AlterTableAddStatement, AlterTableAlterColumnStatement,
    AlterTableAlterIndexStatement, AlterTableChangeTrackingStatement,
    AlterTableConstraintModificationStatement, AlterTableDropElement, AlterTableDropStatement,
    AlterTableFileTableNamespaceStatement, AlterTableRebuildStatement, AlterTableSetStatement,
    AlterTableSwitchStatement, AlterTableTriggerModificationStatement, DropElementKind,
    SwitchOption,
};
pub use control::{
    BackupDevice, BackupKind, BackupStatement, BeginEndBlockStatement, BeginTransactionStatement,
    BreakStatement, CheckpointStatement, CommitTransactionStatement, ContinueStatement,
    CursorDefinition, CursorStatement, DeclareCursorStatement, DeclareTableVariableStatement,
    DeclareVariableElement, DeclareVariableStatement, FetchCursorStatement, FetchOrientation,
    GeneralSetStatement, GotoStatement, IfStatement, IsolationLevel, KillStatement, LabelStatement,
    PredicateSetStatement, PrintStatement, RaiseErrorStatement, ReconfigureStatement,
    RestoreStatement, ReturnStatement, SetIdentityInsertStatement,
    SetTransactionIsolationLevelStatement, SetVariableStatement, ThrowStatement,
    TransactionNameStatement, TruncateTableStatement, TryCatchStatement, UseStatement, WaitForKind,
    WaitForStatement, WhileStatement,
};
pub use database::{
    AlterDatabaseAddFileGroupStatement, AlterDatabaseAddFileStatement,
    AlterDatabaseCollateStatement, AlterDatabaseModifyFileGroupStatement,
    AlterDatabaseModifyFileStatement, AlterDatabaseModifyNameStatement,
    AlterDatabaseRebuildLogStatement, AlterDatabaseRemoveStatement,
    AlterDatabaseScopedConfigurationClearStatement, AlterDatabaseScopedConfigurationSetStatement,
    AlterDatabaseSetStatement, AttachMode, AutomaticTuningSetting, AutomaticTuningState,
    ChangeTrackingSetting, Containment, CreateDatabaseStatement, CursorDefault,
    DatabaseEncryptionKeyStatement, DatabaseOption, DatabaseTermination, DelayedDurability,
    FileDeclaration, FileDeclarationOption, FileGroupDefinition, FileStreamSetting, HadrOption,
    ModifyFileGroupAction, NonTransactedAccess, OnOffPrimary, PageVerify, Parameterization,
    PartnerOption, QueryCaptureMode, QueryStoreOption, QueryStoreSetting, QueryStoreState,
    RecoveryModel, RemoteDataArchiveSetting, ScopedConfigurationOption, SizeBasedCleanupMode,
    SizeValue, WitnessOption,
};
pub use ddl::{
    AlterAuthorizationStatement, AlterIndexAction, AlterIndexStatement, AlterLoginAction,
    AlterLoginStatement, AlterPartitionFunctionStatement, AlterPartitionSchemeStatement,
    AlterRoleAction, AlterRoleStatement, AlterSchemaStatement, AlterUserStatement, ContractMessage,
    CreateAggregateStatement, CreateContractStatement, CreateDefaultStatement,
    CreateEventNotificationStatement, CreateFullTextIndexStatement, CreateIndexStatement,
    CreateLoginStatement, CreatePartitionFunctionStatement, CreatePartitionSchemeStatement,
    CreateRoleStatement, CreateRuleStatement, CreateSchemaStatement, CreateSpatialIndexStatement,
    CreateStatisticsStatement, CreateSynonymStatement, CreateTableStatement, CreateTypeStatement,
    CreateUserStatement, CreateXmlIndexStatement, DropIndexClause, DropIndexStatement,
    DropObjectsStatement, DropTriggerStatement, EventNotificationScope, FullTextIndexColumn,
    FunctionReturnType, FunctionStatement, LoginSource, MessageTypeStatement, MethodSpecifier,
    ObjectStatement, PartitionRangeKind, ProcedureParameter, ProcedureStatement, RoutineOption,
    SecondaryXmlIndexKind, SecurityPolicyStatement, SecurityPredicateAction,
    SecurityPredicateActionKind, SequenceStatement, ServiceStatement, TriggerAction, TriggerKind,
    TriggerStatement, TriggerTarget, TypeDefinition, UserLoginKind, ViewStatement,
    XmlSchemaCollectionStatement,
};
pub use dml::{
    AssignmentSetClause, BulkInsertStatement, DeleteStatement, ExecutableEntity, ExecuteAsClause,
    ExecuteAsKind, ExecuteOption, ExecuteParameter, ExecuteSpecification, ExecuteStatement,
    InsertBulkColumnDefinition, InsertBulkStatement, InsertOption, InsertSource, InsertStatement,
    MergeAction, MergeActionClause, MergeCondition, MergeStatement, OutputClause, OutputIntoClause,
    ResultColumnDefinition, SetClause, UpdateStatement,
};
pub use expression::{
    BinaryOperator, BooleanExpression, BooleanOperator, CastExpression, ColumnReference, ColumnType,
    ComparisonOperator, ConvertExpression, FullTextFunction, FunctionCall, IifExpression, Literal,
    OverClause, ParameterlessCall, ParseExpression, ScalarExpression, SearchedCaseExpression,
    SearchedWhenClause, SimpleCaseExpression, SimpleWhenClause, SubqueryQuantifier, UnaryOperator,
    UniqueRowFilter, WindowDelimiter, WindowFrame, WindowFrameKind,
};
pub use hints::{OptimizerHint, TableHint, VariableValuePair};
pub use identifier::{
    Identifier, IdentifierOrValue, IdentifierOrVariable, MultiPartIdentifier, QuoteKind,
    SchemaObjectName,
};
pub use options::{
    option_kind_from_name, AbortAfterWait, BulkInsertOption, ColumnWithSortOrder,
    DataCompressionLevel, DurabilityKind, FileGroupOrPartitionScheme, GenericOption, IndexOption,
    LockEscalationKind, LowPriorityLockWaitOption, OptionBag, OptionState, OptionValue,
    PartitionRange, RetentionPeriod, SequenceOption, TableOption, Unit,
};
pub use query::{
    AssignmentKind, BinaryQueryExpression, BinaryQueryKind, CommonTableExpression, CursorId,
    ExpressionWithSortOrder, ForClause, ForClauseOption, FromClause, FunctionTableReference,
    GroupByClause, GroupingSpecification, InlineDerivedTable, JoinHint, JoinKind,
    JoinTableReference, NamedTableReference, OffsetClause, OpenQueryTableReference,
    OpenRowsetTableReference, OrderByClause, PivotedTableReference, QueryDerivedTable,
    QueryExpression, QueryParenthesized, QuerySpecification, RowValue, SelectElement,
    SelectStatement, SortOrder, TableReference, TableSample, TableSampleUnit, TemporalClause,
    TemporalClauseKind, TopRowFilter, UnpivotedTableReference, VariableTableReference, WhereClause,
    WithCtes,
};
pub use security::{
    CryptoMechanism, DenyStatement, ExecuteAsStatement, GrantStatement, Permission, RevertStatement,
    RevokeStatement, SecurityTarget, SensitivityClassificationStatement, SignatureStatement,
};
pub use statement::{Statement, StatementFamily};
pub use table::{
    CheckConstraint, ColumnDefault, ColumnDefinition, ColumnEncryption, ComputedColumn,
    ConnectionConstraint, ConstraintDefinition, ConstraintKind, DefaultConstraint, ForeignKeyAction,
    ForeignKeyConstraint, GeneratedAlwaysKind, IdentityOptions, IndexDefinition, KeyConstraint,
    Nullability, SparseKind, SystemTimePeriod, TableDefinition,
};
pub use types::{DataType, SqlDataTypeKind, XmlContentKind};
