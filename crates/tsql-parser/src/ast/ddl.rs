//! Records for the CREATE, ALTER and DROP families (tables and databases aside).

use serde::Serialize;

use super::{
    BooleanExpression, ColumnWithSortOrder, DataType, ExecuteAsClause, FileGroupOrPartitionScheme,
    FunctionCall, GenericOption, Identifier, IndexOption, Nullability, OptionBag, OptionState,
    ScalarExpression, SchemaObjectName, SelectStatement, SequenceOption, Statement, TableDefinition,
    TableOption,
};

/// `CREATE TABLE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateTableStatement {
    /// Table name.
    pub name: SchemaObjectName,
    /// Column list, constraints and inline indexes.
    pub definition: TableDefinition,
    /// `AS NODE`.
    pub as_node: bool,
    /// `AS EDGE`.
    pub as_edge: bool,
    /// `AS FILETABLE`.
    pub as_file_table: bool,
    /// `ON filegroup` / `ON scheme(col)`.
    pub on: Option<FileGroupOrPartitionScheme>,
    /// `TEXTIMAGE_ON filegroup`.
    pub text_image_on: Option<Identifier>,
    /// `FILESTREAM_ON filegroup`.
    pub filestream_on: Option<Identifier>,
    /// `WITH (...)`.
    pub options: Vec<TableOption>,
    /// `AS SELECT ...` for a table created from a query.
    pub select: Option<Box<SelectStatement>>,
}

/// `CREATE [OR ALTER] VIEW` / `ALTER VIEW`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewStatement {
    /// `OR ALTER`.
    pub or_alter: bool,
    /// View name.
    pub name: SchemaObjectName,
    /// Column aliases.
    pub columns: Vec<Identifier>,
    /// `WITH SCHEMABINDING, ENCRYPTION, VIEW_METADATA`.
    pub options: Vec<String>,
    /// The defining query.
    pub select: Option<SelectStatement>,
    /// `WITH CHECK OPTION`.
    pub with_check_option: bool,
}

/// `CREATE [UNIQUE] [CLUSTERED|NONCLUSTERED] [COLUMNSTORE] INDEX`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateIndexStatement {
    /// Index name.
    pub name: Identifier,
    /// Indexed table or view.
    pub on_name: SchemaObjectName,
    /// `UNIQUE`.
    pub unique: bool,
    /// `CLUSTERED` (true) / `NONCLUSTERED` (false).
    pub clustered: Option<bool>,
    /// `COLUMNSTORE`.
    pub columnstore: bool,
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

/// Secondary XML index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SecondaryXmlIndexKind {
    /// `FOR VALUE`
    Value,
    /// `FOR PATH`
    Path,
    /// `FOR PROPERTY`
    Property,
}

/// `CREATE [PRIMARY] XML INDEX`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateXmlIndexStatement {
    /// `PRIMARY`.
    pub primary: bool,
    /// Index name.
    pub name: Identifier,
    /// Indexed table.
    pub on_name: SchemaObjectName,
    /// XML column.
    pub column: Identifier,
    /// `USING XML INDEX name`.
    pub using_index: Option<Identifier>,
    /// `FOR VALUE|PATH|PROPERTY`.
    pub secondary_kind: Option<SecondaryXmlIndexKind>,
    /// `WITH (...)`.
    pub options: Vec<IndexOption>,
}

/// `CREATE SPATIAL INDEX`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateSpatialIndexStatement {
    /// Index name.
    pub name: Identifier,
    /// Indexed table.
    pub on_name: SchemaObjectName,
    /// Spatial column.
    pub column: Identifier,
    /// `USING tessellation`.
    pub using: Option<Identifier>,
    /// `WITH (...)`, including `BOUNDING_BOX` and `GRIDS`.
    pub options: OptionBag,
    /// `ON filegroup`.
    pub on: Option<FileGroupOrPartitionScheme>,
}

/// `CREATE STATISTICS` / `UPDATE STATISTICS`-free form.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateStatisticsStatement {
    /// Statistics name.
    pub name: Identifier,
    /// Table or view.
    pub on_name: SchemaObjectName,
    /// Columns.
    pub columns: Vec<Identifier>,
    /// `WHERE` filter.
    pub filter: Option<BooleanExpression>,
    /// `WITH ...` options.
    pub options: OptionBag,
}

/// A procedure or function parameter.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProcedureParameter {
    /// The variable, including `@`.
    pub variable: String,
    /// Parameter type.
    pub data_type: Option<DataType>,
    /// `VARYING`.
    pub varying: bool,
    /// `NULL` / `NOT NULL`.
    pub nullable: Option<Nullability>,
    /// Default value.
    pub default: Option<ScalarExpression>,
    /// `OUTPUT` / `OUT`.
    pub output: bool,
    /// `READONLY`.
    pub readonly: bool,
}

/// `WITH` options of procedures, functions and triggers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RoutineOption {
    /// `ENCRYPTION`, `RECOMPILE`, `SCHEMABINDING`, `NATIVE_COMPILATION`,
    /// `RETURNS NULL ON NULL INPUT`, `CALLED ON NULL INPUT`.
    Simple {
        /// Pascal-case option name.
        option_kind: String,
    },
    /// `EXECUTE AS ...`.
    ExecuteAs(ExecuteAsClause),
    /// `INLINE = ON|OFF`.
    Inline(OptionState),
}

impl RoutineOption {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::Simple { option_kind } => option_kind,
            Self::ExecuteAs(_) => "ExecuteAs",
            Self::Inline(_) => "Inline",
        }
    }
}

/// `EXTERNAL NAME assembly.class.method`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MethodSpecifier {
    /// Assembly name.
    pub assembly: Identifier,
    /// Class name.
    pub class: Option<Identifier>,
    /// Method name.
    pub method: Option<Identifier>,
}

/// `CREATE [OR ALTER] PROCEDURE` / `ALTER PROCEDURE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ProcedureStatement {
    /// `OR ALTER`.
    pub or_alter: bool,
    /// Procedure name.
    pub name: SchemaObjectName,
    /// `;n` group number.
    pub number: Option<String>,
    /// Parameters.
    pub parameters: Vec<ProcedureParameter>,
    /// `WITH` options.
    pub options: Vec<RoutineOption>,
    /// `FOR REPLICATION`.
    pub for_replication: bool,
    /// Body statements.
    pub body: Vec<Statement>,
    /// `EXTERNAL NAME` for CLR procedures.
    pub external_name: Option<MethodSpecifier>,
}

/// What a function returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FunctionReturnType {
    /// `RETURNS type`.
    Scalar(DataType),
    /// `RETURNS TABLE AS RETURN (select)`.
    InlineTable(Option<Box<SelectStatement>>),
    /// `RETURNS @t TABLE (...)`.
    TableVariable {
        /// The variable, including `@`.
        variable: String,
        /// Its columns.
        definition: TableDefinition,
    },
}

impl Default for FunctionReturnType {
    fn default() -> Self {
        Self::InlineTable(None)
    }
}

/// `CREATE [OR ALTER] FUNCTION` / `ALTER FUNCTION`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FunctionStatement {
    /// `OR ALTER`.
    pub or_alter: bool,
    /// Function name.
    pub name: SchemaObjectName,
    /// Parameters.
    pub parameters: Vec<ProcedureParameter>,
    /// Return type.
    pub returns: FunctionReturnType,
    /// `WITH` options.
    pub options: Vec<RoutineOption>,
    /// Body statements for scalar and multi-statement functions.
    pub body: Vec<Statement>,
    /// `EXTERNAL NAME` for CLR functions.
    pub external_name: Option<MethodSpecifier>,
}

/// `CREATE AGGREGATE name (params) RETURNS type EXTERNAL NAME assembly[.class]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateAggregateStatement {
    /// Aggregate name.
    pub name: SchemaObjectName,
    /// Input parameters.
    pub parameters: Vec<ProcedureParameter>,
    /// `RETURNS` type.
    pub return_type: Option<DataType>,
    /// The implementing CLR class.
    pub external_name: Option<MethodSpecifier>,
}

/// What a trigger is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TriggerTarget {
    /// A table or view.
    Object(SchemaObjectName),
    /// `ON DATABASE`.
    Database,
    /// `ON ALL SERVER`.
    AllServer,
}

impl Default for TriggerTarget {
    fn default() -> Self {
        Self::Object(SchemaObjectName::default())
    }
}

/// `FOR` / `AFTER` / `INSTEAD OF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TriggerKind {
    /// `FOR`
    #[default]
    For,
    /// `AFTER`
    After,
    /// `INSTEAD OF`
    InsteadOf,
}

/// Triggering action or DDL event group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TriggerAction {
    /// `INSERT`
    Insert,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
    /// A DDL event or event group, e.g. `CREATE_TABLE` or `LOGON`.
    Event(Identifier),
}

/// `CREATE [OR ALTER] TRIGGER` / `ALTER TRIGGER`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TriggerStatement {
    /// `OR ALTER`.
    pub or_alter: bool,
    /// Trigger name.
    pub name: SchemaObjectName,
    /// Target.
    pub target: TriggerTarget,
    /// `WITH` options.
    pub options: Vec<RoutineOption>,
    /// Firing kind.
    pub kind: TriggerKind,
    /// Actions or events.
    pub actions: Vec<TriggerAction>,
    /// `WITH APPEND`.
    pub with_append: bool,
    /// `NOT FOR REPLICATION`.
    pub not_for_replication: bool,
    /// Body statements.
    pub body: Vec<Statement>,
    /// `EXTERNAL NAME` for CLR triggers.
    pub external_name: Option<MethodSpecifier>,
}

/// `CREATE SEQUENCE` / `ALTER SEQUENCE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SequenceStatement {
    /// Sequence name.
    pub name: SchemaObjectName,
    /// Options in source order.
    pub options: Vec<SequenceOption>,
}

/// Body of `CREATE TYPE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeDefinition {
    /// `FROM base_type [NULL|NOT NULL]`.
    Alias {
        /// Base type.
        data_type: DataType,
        /// Nullability.
        nullable: Option<Nullability>,
    },
    /// `AS TABLE (...)`.
    Table {
        /// Columns and constraints.
        definition: TableDefinition,
        /// `WITH (MEMORY_OPTIMIZED = ON)`.
        options: Vec<TableOption>,
    },
    /// `EXTERNAL NAME assembly.class`.
    External(MethodSpecifier),
}

/// `CREATE TYPE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateTypeStatement {
    /// Type name.
    pub name: SchemaObjectName,
    /// Definition.
    pub definition: Option<TypeDefinition>,
}

/// `CREATE SCHEMA name [AUTHORIZATION owner] [elements]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateSchemaStatement {
    /// Schema name; empty when only `AUTHORIZATION` is given.
    pub name: Identifier,
    /// Owner.
    pub authorization: Option<Identifier>,
    /// Nested `CREATE TABLE`, `CREATE VIEW`, `GRANT` ... elements.
    pub elements: Vec<Statement>,
}

/// `CREATE SYNONYM name FOR target`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CreateSynonymStatement {
    /// Synonym name.
    pub name: SchemaObjectName,
    /// Target object.
    pub for_name: SchemaObjectName,
}

/// `RANGE LEFT` / `RANGE RIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PartitionRangeKind {
    /// Not given (defaults to left).
    #[default]
    NotSpecified,
    /// `LEFT`
    Left,
    /// `RIGHT`
    Right,
}

/// `CREATE PARTITION FUNCTION name (type) AS RANGE [LEFT|RIGHT] FOR VALUES (...)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreatePartitionFunctionStatement {
    /// Function name.
    pub name: Identifier,
    /// Input parameter type.
    pub parameter_type: Option<DataType>,
    /// Range direction.
    pub range: PartitionRangeKind,
    /// Boundary values.
    pub boundary_values: Vec<ScalarExpression>,
}

/// `CREATE PARTITION SCHEME name AS PARTITION fn [ALL] TO (filegroups)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CreatePartitionSchemeStatement {
    /// Scheme name.
    pub name: Identifier,
    /// Partition function.
    pub function: Identifier,
    /// `ALL`.
    pub all: bool,
    /// Filegroups.
    pub file_groups: Vec<Identifier>,
}

/// `ALTER PARTITION FUNCTION name () SPLIT|MERGE RANGE (value)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterPartitionFunctionStatement {
    /// Function name.
    pub name: Identifier,
    /// True for `SPLIT`, false for `MERGE`.
    pub split: bool,
    /// Boundary value.
    pub boundary: Option<ScalarExpression>,
}

/// `ALTER PARTITION SCHEME name NEXT USED [filegroup]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterPartitionSchemeStatement {
    /// Scheme name.
    pub name: Identifier,
    /// Next-used filegroup.
    pub next_used: Option<Identifier>,
}

/// A full-text indexed column.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FullTextIndexColumn {
    /// Column name.
    pub name: Identifier,
    /// `TYPE COLUMN col`.
    pub type_column: Option<Identifier>,
    /// `LANGUAGE term`.
    pub language: Option<ScalarExpression>,
    /// `STATISTICAL_SEMANTICS`.
    pub statistical_semantics: bool,
}

/// `CREATE FULLTEXT INDEX ON table (cols) KEY INDEX ix [ON catalog] [WITH ...]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateFullTextIndexStatement {
    /// Indexed table.
    pub on_name: SchemaObjectName,
    /// Indexed columns.
    pub columns: Vec<FullTextIndexColumn>,
    /// `KEY INDEX`.
    pub key_index: Option<Identifier>,
    /// Catalog and filegroup in `ON (...)`.
    pub catalog_and_file_group: Vec<Identifier>,
    /// `WITH` options.
    pub options: OptionBag,
}

/// `CREATE XML SCHEMA COLLECTION name AS expr` / `ALTER ... ADD expr`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct XmlSchemaCollectionStatement {
    /// Collection name.
    pub name: SchemaObjectName,
    /// Schema document.
    pub expression: ScalarExpression,
}

/// `CREATE DEFAULT name AS expr` / `CREATE RULE name AS condition`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateDefaultStatement {
    /// Object name.
    pub name: SchemaObjectName,
    /// The default value.
    pub expression: ScalarExpression,
}

/// `CREATE RULE name AS condition`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateRuleStatement {
    /// Object name.
    pub name: SchemaObjectName,
    /// The rule condition.
    pub condition: Option<BooleanExpression>,
}

/// `CREATE|ALTER SERVICE name [AUTHORIZATION o] ON QUEUE q [(contracts)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ServiceStatement {
    /// Service name.
    pub name: Identifier,
    /// Owner.
    pub authorization: Option<Identifier>,
    /// Queue.
    pub queue: Option<SchemaObjectName>,
    /// Contract names, or `ADD|DROP CONTRACT` items for `ALTER`.
    pub contracts: Vec<Identifier>,
}

/// `msg SENT BY INITIATOR|TARGET|ANY`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContractMessage {
    /// Message type name.
    pub name: Identifier,
    /// Pascal-case sender, e.g. `Initiator`.
    pub sent_by: String,
}

/// `CREATE CONTRACT name [AUTHORIZATION o] (messages)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CreateContractStatement {
    /// Contract name.
    pub name: Identifier,
    /// Owner.
    pub authorization: Option<Identifier>,
    /// Messages.
    pub messages: Vec<ContractMessage>,
}

/// `CREATE|ALTER MESSAGE TYPE name [AUTHORIZATION o] [VALIDATION = ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MessageTypeStatement {
    /// Message type name.
    pub name: Identifier,
    /// Owner.
    pub authorization: Option<Identifier>,
    /// Pascal-case validation method, e.g. `WellFormedXml`.
    pub validation: Option<String>,
    /// `VALID_XML WITH SCHEMA COLLECTION name`.
    pub schema_collection: Option<SchemaObjectName>,
}

/// Scope of an event notification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum EventNotificationScope {
    /// `ON SERVER`
    #[default]
    Server,
    /// `ON DATABASE`
    Database,
    /// `ON QUEUE name`
    Queue(SchemaObjectName),
}

/// `CREATE EVENT NOTIFICATION`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateEventNotificationStatement {
    /// Notification name.
    pub name: Identifier,
    /// Scope.
    pub scope: EventNotificationScope,
    /// `WITH FAN_IN`.
    pub with_fan_in: bool,
    /// Event types or groups.
    pub events: Vec<Identifier>,
    /// Target service.
    pub broker_service: Option<ScalarExpression>,
    /// Target broker instance.
    pub broker_instance: Option<ScalarExpression>,
}

/// `ADD|DROP|ALTER` in a security policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SecurityPredicateActionKind {
    /// `ADD`
    Add,
    /// `DROP`
    Drop,
    /// `ALTER`
    Alter,
}

/// One predicate of a security policy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecurityPredicateAction {
    /// Add, drop or alter.
    pub action: SecurityPredicateActionKind,
    /// True for `BLOCK`, false for `FILTER`.
    pub block: bool,
    /// Predicate function call.
    pub function: Option<FunctionCall>,
    /// Target table.
    pub target: SchemaObjectName,
    /// Block operation, e.g. `AfterInsert`.
    pub operation: Option<String>,
}

/// `CREATE|ALTER SECURITY POLICY`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SecurityPolicyStatement {
    /// Policy name.
    pub name: SchemaObjectName,
    /// Predicates.
    pub predicates: Vec<SecurityPredicateAction>,
    /// `WITH (STATE = ON, SCHEMABINDING = ON)`.
    pub options: OptionBag,
    /// `NOT FOR REPLICATION`.
    pub not_for_replication: bool,
}

/// The shared record for long-tail objects: name, owner and an option bag.
///
/// Every clause after the name is captured as a [`GenericOption`] whose
/// `option_kind` is built from the clause's leading words, e.g.
/// `ENCRYPTION BY PASSWORD = 'x'` becomes `EncryptionByPassword`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ObjectStatement {
    /// Object name; empty for nameless objects such as `MASTER KEY`.
    pub name: SchemaObjectName,
    /// `AUTHORIZATION owner`.
    pub authorization: Option<Identifier>,
    /// Remaining clauses.
    pub options: OptionBag,
}

impl ObjectStatement {
    /// Finds an option by its pascal-case kind.
    #[must_use]
    pub fn option(&self, kind: &str) -> Option<&GenericOption> {
        self.options.iter().find(|o| o.option_kind == kind)
    }
}

/// `ALTER INDEX` actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AlterIndexAction {
    /// `REBUILD [PARTITION = n|ALL] [WITH (...)]`.
    Rebuild {
        /// Partition number; `None` with `all_partitions = false` means whole index.
        partition: Option<ScalarExpression>,
        /// `PARTITION = ALL`.
        all_partitions: bool,
        /// Options.
        options: Vec<IndexOption>,
    },
    /// `REORGANIZE [PARTITION = n] [WITH (...)]`.
    Reorganize {
        /// Partition number.
        partition: Option<ScalarExpression>,
        /// Options.
        options: Vec<IndexOption>,
    },
    /// `DISABLE`.
    Disable,
    /// `SET (...)`.
    Set(Vec<IndexOption>),
    /// `RESUME [WITH (...)]`.
    Resume(Vec<IndexOption>),
    /// `PAUSE`.
    Pause,
    /// `ABORT`.
    Abort,
}

impl Default for AlterIndexAction {
    fn default() -> Self {
        Self::Rebuild {
            partition: None,
            all_partitions: false,
            options: Vec::new(),
        }
    }
}

/// `ALTER INDEX {name|ALL} ON table action`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterIndexStatement {
    /// Index name; `None` for `ALL`.
    pub name: Option<Identifier>,
    /// Table or view.
    pub on_name: SchemaObjectName,
    /// Action.
    pub action: AlterIndexAction,
}

/// `ALTER SCHEMA name TRANSFER [class::]object`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterSchemaStatement {
    /// Schema name.
    pub name: Identifier,
    /// Securable class, e.g. `Object` or `Type`.
    pub class: Option<String>,
    /// Transferred object.
    pub object: SchemaObjectName,
}

/// Role membership changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AlterRoleAction {
    /// `ADD MEMBER name`.
    AddMember(Identifier),
    /// `DROP MEMBER name`.
    DropMember(Identifier),
    /// `WITH NAME = new`.
    Rename(Identifier),
}

/// `ALTER ROLE` / `ALTER SERVER ROLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterRoleStatement {
    /// Role name.
    pub name: Identifier,
    /// Action.
    pub action: Option<AlterRoleAction>,
}

/// `CREATE ROLE name [AUTHORIZATION owner]` / `CREATE SERVER ROLE`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CreateRoleStatement {
    /// Role name.
    pub name: Identifier,
    /// Owner.
    pub authorization: Option<Identifier>,
}

/// How a database user is tied to a login.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum UserLoginKind {
    /// Nothing given.
    #[default]
    NotSpecified,
    /// `FOR|FROM LOGIN name`.
    Login(Identifier),
    /// `WITHOUT LOGIN`.
    WithoutLogin,
    /// `FOR|FROM CERTIFICATE name`.
    Certificate(Identifier),
    /// `FOR|FROM ASYMMETRIC KEY name`.
    AsymmetricKey(Identifier),
    /// `FROM EXTERNAL PROVIDER`.
    ExternalProvider,
}

/// `CREATE USER`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateUserStatement {
    /// User name.
    pub name: Identifier,
    /// Login mapping.
    pub login: UserLoginKind,
    /// `WITH` options such as `DEFAULT_SCHEMA = dbo` or `PASSWORD = '...'`.
    pub options: OptionBag,
}

/// Source of a login.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum LoginSource {
    /// Nothing given.
    #[default]
    NotSpecified,
    /// `WITH PASSWORD = '...' [HASHED] [MUST_CHANGE]`.
    Password {
        /// The password.
        password: ScalarExpression,
        /// `HASHED`.
        hashed: bool,
        /// `MUST_CHANGE`.
        must_change: bool,
    },
    /// `FROM WINDOWS`.
    Windows,
    /// `FROM CERTIFICATE name`.
    Certificate(Identifier),
    /// `FROM ASYMMETRIC KEY name`.
    AsymmetricKey(Identifier),
    /// `FROM EXTERNAL PROVIDER`.
    ExternalProvider,
}

/// `CREATE LOGIN`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateLoginStatement {
    /// Login name.
    pub name: Identifier,
    /// Source.
    pub source: LoginSource,
    /// Remaining options such as `DEFAULT_DATABASE = db` or `CHECK_POLICY = OFF`.
    pub options: OptionBag,
}

/// `ALTER LOGIN` actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AlterLoginAction {
    /// `ENABLE`.
    Enable,
    /// `DISABLE`.
    Disable,
    /// `WITH ...`.
    Options(OptionBag),
    /// `ADD CREDENTIAL name`.
    AddCredential(Identifier),
    /// `DROP CREDENTIAL name`.
    DropCredential(Identifier),
}

/// `ALTER LOGIN name action`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterLoginStatement {
    /// Login name.
    pub name: Identifier,
    /// Action.
    pub action: Option<AlterLoginAction>,
}

/// `ALTER USER name WITH ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterUserStatement {
    /// User name.
    pub name: Identifier,
    /// Options such as `NAME = new` or `DEFAULT_SCHEMA = s`.
    pub options: OptionBag,
}

/// `ALTER AUTHORIZATION ON [class::]entity TO {principal | SCHEMA OWNER}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterAuthorizationStatement {
    /// Securable class.
    pub class: Option<String>,
    /// The entity.
    pub entity: SchemaObjectName,
    /// New owner; `None` for `SCHEMA OWNER`.
    pub principal: Option<Identifier>,
}

/// `DROP <kind> [IF EXISTS] name, ... [trailing clauses]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DropObjectsStatement {
    /// `IF EXISTS`.
    pub if_exists: bool,
    /// Dropped objects.
    pub objects: Vec<SchemaObjectName>,
    /// Trailing clauses such as `WITH NO_DEPENDENTS` or `ON DATABASE`.
    pub options: OptionBag,
}

/// One clause of `DROP INDEX`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DropIndexClause {
    /// Index name.
    pub index: Identifier,
    /// Owning table or view. For the legacy `table.index` form this is the
    /// name without its last part.
    pub object: Option<SchemaObjectName>,
    /// `WITH (...)`.
    pub options: Vec<IndexOption>,
}

/// `DROP INDEX [IF EXISTS] clause, ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DropIndexStatement {
    /// `IF EXISTS`.
    pub if_exists: bool,
    /// Clauses.
    pub clauses: Vec<DropIndexClause>,
}

/// `DROP TRIGGER [IF EXISTS] names [ON DATABASE | ON ALL SERVER]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DropTriggerStatement {
    /// `IF EXISTS`.
    pub if_exists: bool,
    /// Trigger names.
    pub objects: Vec<SchemaObjectName>,
    /// Scope for DDL triggers.
    pub scope: Option<TriggerTarget>,
}
