//! `CREATE DATABASE`, `ALTER DATABASE` and the database option vocabulary.

use serde::Serialize;

use super::{GenericOption, Identifier, IdentifierOrValue, OptionState, ScalarExpression, Unit};

/// `RECOVERY` model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecoveryModel {
    /// `FULL`
    Full,
    /// `BULK_LOGGED`
    BulkLogged,
    /// `SIMPLE`
    Simple,
}

/// `CURSOR_DEFAULT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CursorDefault {
    /// `LOCAL`
    Local,
    /// `GLOBAL`
    Global,
}

/// `PAGE_VERIFY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageVerify {
    /// `CHECKSUM`
    Checksum,
    /// `NONE`
    None,
    /// `TORN_PAGE_DETECTION`
    TornPageDetection,
}

/// `PARAMETERIZATION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Parameterization {
    /// `SIMPLE`
    Simple,
    /// `FORCED`
    Forced,
}

/// `CONTAINMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Containment {
    /// `NONE`
    None,
    /// `PARTIAL`
    Partial,
}

/// `DELAYED_DURABILITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DelayedDurability {
    /// `DISABLED`
    Disabled,
    /// `ALLOWED`
    Allowed,
    /// `FORCED`
    Forced,
}

/// `AUTOMATIC_TUNING = ...` state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum AutomaticTuningState {
    /// Only sub-options given.
    #[default]
    NotSet,
    /// `INHERIT`
    Inherit,
    /// `CUSTOM`
    Custom,
    /// `AUTO`
    Auto,
}

/// One `AUTOMATIC_TUNING (...)` sub-option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AutomaticTuningSetting {
    /// Pascal-case name, e.g. `ForceLastGoodPlan`.
    pub option_kind: String,
    /// The state.
    pub state: OptionState,
}

/// `REMOTE_DATA_ARCHIVE = ON (...)` settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RemoteDataArchiveSetting {
    /// `SERVER = 'name'`.
    Server(ScalarExpression),
    /// `CREDENTIAL = name`.
    Credential(Identifier),
    /// `FEDERATED_SERVICE_ACCOUNT = ON|OFF`.
    FederatedServiceAccount(OptionState),
}

/// `CHANGE_TRACKING = ON (...)` settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChangeTrackingSetting {
    /// `AUTO_CLEANUP = ON|OFF`.
    AutoCleanup(OptionState),
    /// `CHANGE_RETENTION = n DAYS|HOURS|MINUTES`.
    ChangeRetention {
        /// Period.
        value: ScalarExpression,
        /// Unit.
        unit: Option<Unit>,
    },
}

/// `PARTNER` actions for database mirroring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PartnerOption {
    /// `PARTNER = 'server'`.
    Server(ScalarExpression),
    /// `FAILOVER`
    Failover,
    /// `FORCE_SERVICE_ALLOW_DATA_LOSS`
    ForceServiceAllowDataLoss,
    /// `OFF`
    Off,
    /// `RESUME`
    Resume,
    /// `SAFETY FULL|OFF`; true for `FULL`.
    Safety(bool),
    /// `SUSPEND`
    Suspend,
    /// `TIMEOUT n`
    Timeout(ScalarExpression),
}

/// `WITNESS = 'server'` or `WITNESS OFF`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WitnessOption {
    /// `WITNESS = 'server'`.
    Server(ScalarExpression),
    /// `WITNESS OFF`.
    Off,
}

/// `SET HADR ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HadrOption {
    /// `SUSPEND`
    Suspend,
    /// `RESUME`
    Resume,
    /// `OFF`
    Off,
    /// `AVAILABILITY GROUP = name`.
    AvailabilityGroup(Identifier),
}

/// `NON_TRANSACTED_ACCESS` level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NonTransactedAccess {
    /// `OFF`
    Off,
    /// `READ_ONLY`
    ReadOnly,
    /// `FULL`
    Full,
}

/// `FILESTREAM (...)` settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FileStreamSetting {
    /// `NON_TRANSACTED_ACCESS = ...`.
    NonTransactedAccess(NonTransactedAccess),
    /// `DIRECTORY_NAME = 'dir' | NULL`.
    DirectoryName(ScalarExpression),
}

/// Query store desired and actual states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryStoreState {
    /// `OFF`
    Off,
    /// `READ_ONLY`
    ReadOnly,
    /// `READ_WRITE`
    ReadWrite,
}

/// `QUERY_CAPTURE_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryCaptureMode {
    /// `ALL`
    All,
    /// `AUTO`
    Auto,
    /// `NONE`
    None,
    /// `CUSTOM`
    Custom,
}

/// `SIZE_BASED_CLEANUP_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeBasedCleanupMode {
    /// `AUTO`
    Auto,
    /// `OFF`
    Off,
}

/// One setting inside `QUERY_STORE (...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryStoreSetting {
    /// `OPERATION_MODE = ...`.
    OperationMode(QueryStoreState),
    /// `DESIRED_STATE = ...`.
    DesiredState(QueryStoreState),
    /// `CLEANUP_POLICY = (STALE_QUERY_THRESHOLD_DAYS = n)`.
    CleanupPolicy {
        /// Days before a query is stale.
        stale_query_threshold: Option<ScalarExpression>,
    },
    /// `DATA_FLUSH_INTERVAL_SECONDS = n`.
    DataFlushInterval(ScalarExpression),
    /// `INTERVAL_LENGTH_MINUTES = n`.
    IntervalLength(ScalarExpression),
    /// `MAX_STORAGE_SIZE_MB = n`.
    MaxStorageSize(ScalarExpression),
    /// `MAX_PLANS_PER_QUERY = n`.
    MaxPlansPerQuery(ScalarExpression),
    /// `QUERY_CAPTURE_MODE = ...`.
    QueryCaptureMode(QueryCaptureMode),
    /// `SIZE_BASED_CLEANUP_MODE = ...`.
    SizeBasedCleanupMode(SizeBasedCleanupMode),
    /// `WAIT_STATS_CAPTURE_MODE = ON|OFF`.
    WaitStatsCaptureMode(OptionState),
    /// `QUERY_CAPTURE_POLICY = (...)`.
    QueryCapturePolicy(Vec<GenericOption>),
    /// Any other setting.
    Generic(GenericOption),
}

impl QueryStoreSetting {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::OperationMode(_) => "OperationMode",
            Self::DesiredState(_) => "DesiredState",
            Self::CleanupPolicy { .. } => "CleanupPolicy",
            Self::DataFlushInterval(_) => "DataFlushInterval",
            Self::IntervalLength(_) => "IntervalLength",
            Self::MaxStorageSize(_) => "MaxStorageSize",
            Self::MaxPlansPerQuery(_) => "MaxPlansPerQuery",
            Self::QueryCaptureMode(_) => "QueryCaptureMode",
            Self::SizeBasedCleanupMode(_) => "SizeBasedCleanupMode",
            Self::WaitStatsCaptureMode(_) => "WaitStatsCaptureMode",
            Self::QueryCapturePolicy(_) => "QueryCapturePolicy",
            Self::Generic(g) => &g.option_kind,
        }
    }
}

/// `QUERY_STORE [= ON|OFF] [(settings)]` or `QUERY_STORE CLEAR [ALL]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct QueryStoreOption {
    /// `= ON|OFF`.
    pub state: OptionState,
    /// `CLEAR`.
    pub clear: bool,
    /// `CLEAR ALL`.
    pub clear_all: bool,
    /// Parenthesized settings.
    pub settings: Vec<QueryStoreSetting>,
}

impl QueryStoreOption {
    /// `OPERATION_MODE`, if set.
    #[must_use]
    pub fn operation_mode(&self) -> Option<QueryStoreState> {
        self.settings.iter().find_map(|s| match s {
            QueryStoreSetting::OperationMode(m) => Some(*m),
            _ => None,
        })
    }

    /// `MAX_STORAGE_SIZE_MB`, if set.
    #[must_use]
    pub fn max_storage_size(&self) -> Option<&ScalarExpression> {
        self.settings.iter().find_map(|s| match s {
            QueryStoreSetting::MaxStorageSize(v) => Some(v),
            _ => None,
        })
    }

    /// `STALE_QUERY_THRESHOLD_DAYS` from the cleanup policy, if set.
    #[must_use]
    pub fn stale_query_threshold(&self) -> Option<&ScalarExpression> {
        self.settings.iter().find_map(|s| match s {
            QueryStoreSetting::CleanupPolicy {
                stale_query_threshold,
            } => stale_query_threshold.as_ref(),
            _ => None,
        })
    }
}

/// A database option in `ALTER DATABASE ... SET` or `CREATE DATABASE ... WITH`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DatabaseOption {
    /// A bare word option: `SINGLE_USER`, `READ_ONLY`, `ONLINE`, `ENABLE_BROKER` ...
    Simple {
        /// Pascal-case option name.
        option_kind: String,
    },
    /// A generic `NAME {ON|OFF}` or `NAME = ON|OFF` switch.
    OnOff {
        /// Pascal-case option name.
        option_kind: String,
        /// The state.
        state: OptionState,
    },
    /// `RECOVERY ...`.
    Recovery(RecoveryModel),
    /// `CURSOR_DEFAULT ...`.
    CursorDefault(CursorDefault),
    /// `PAGE_VERIFY ...`.
    PageVerify(PageVerify),
    /// `PARAMETERIZATION ...`.
    Parameterization(Parameterization),
    /// `CONTAINMENT = ...`.
    Containment(Containment),
    /// `DELAYED_DURABILITY = ...`.
    DelayedDurability(DelayedDurability),
    /// `COMPATIBILITY_LEVEL = n`.
    CompatibilityLevel(ScalarExpression),
    /// `TARGET_RECOVERY_TIME = n SECONDS|MINUTES`.
    TargetRecoveryTime {
        /// The time.
        value: ScalarExpression,
        /// Unit.
        unit: Option<Unit>,
    },
    /// `ACCELERATED_DATABASE_RECOVERY = ON|OFF [(PERSISTENT_VERSION_STORE_FILEGROUP = fg)]`.
    AcceleratedDatabaseRecovery {
        /// The state.
        state: OptionState,
        /// Version store filegroup.
        version_store_file_group: Option<Identifier>,
    },
    /// `TEMPORAL_HISTORY_RETENTION ON|OFF`.
    TemporalHistoryRetention(OptionState),
    /// `AUTOMATIC_TUNING [= state] [(settings)]`.
    AutomaticTuning {
        /// `INHERIT`, `CUSTOM` or `AUTO`.
        state: AutomaticTuningState,
        /// Sub-options.
        settings: Vec<AutomaticTuningSetting>,
    },
    /// `AUTO_CREATE_STATISTICS ON|OFF [(INCREMENTAL = ON|OFF)]`.
    AutoCreateStatistics {
        /// The state.
        state: OptionState,
        /// `INCREMENTAL`.
        incremental: Option<OptionState>,
    },
    /// `REMOTE_DATA_ARCHIVE = ON|OFF [(...)]`.
    RemoteDataArchive {
        /// The state.
        state: OptionState,
        /// Settings.
        settings: Vec<RemoteDataArchiveSetting>,
    },
    /// `CHANGE_TRACKING [= ON|OFF] [(...)]`.
    ChangeTracking {
        /// The state.
        state: OptionState,
        /// Settings.
        settings: Vec<ChangeTrackingSetting>,
    },
    /// `PARTNER ...`.
    Partner(PartnerOption),
    /// `WITNESS ...`.
    Witness(WitnessOption),
    /// `DEFAULT_LANGUAGE = ...` / `DEFAULT_FULLTEXT_LANGUAGE = ...`.
    Language {
        /// `DefaultLanguage` or `DefaultFullTextLanguage`.
        option_kind: String,
        /// Language name or LCID.
        value: IdentifierOrValue,
    },
    /// `HADR ...`.
    Hadr(HadrOption),
    /// `FILESTREAM (...)`.
    FileStream(Vec<FileStreamSetting>),
    /// `QUERY_STORE ...`.
    QueryStore(QueryStoreOption),
    /// Any other `NAME = value`.
    Generic(GenericOption),
}

impl DatabaseOption {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::Simple { option_kind }
            | Self::OnOff { option_kind, .. }
            | Self::Language { option_kind, .. } => option_kind,
            Self::Recovery(_) => "Recovery",
            Self::CursorDefault(_) => "CursorDefault",
            Self::PageVerify(_) => "PageVerify",
            Self::Parameterization(_) => "Parameterization",
            Self::Containment(_) => "Containment",
            Self::DelayedDurability(_) => "DelayedDurability",
            Self::CompatibilityLevel(_) => "CompatibilityLevel",
            Self::TargetRecoveryTime { .. } => "TargetRecoveryTime",
            Self::AcceleratedDatabaseRecovery { .. } => "AcceleratedDatabaseRecovery",
            Self::TemporalHistoryRetention(_) => "TemporalHistoryRetention",
            Self::AutomaticTuning { .. } => "AutomaticTuning",
            Self::AutoCreateStatistics { .. } => "AutoCreateStatistics",
            Self::RemoteDataArchive { .. } => "RemoteDataArchive",
            Self::ChangeTracking { .. } => "ChangeTracking",
            Self::Partner(_) => "Partner",
            Self::Witness(_) => "Witness",
            Self::Hadr(_) => "Hadr",
            Self::FileStream(_) => "FileStream",
            Self::QueryStore(_) => "QueryStore",
            Self::Generic(g) => &g.option_kind,
        }
    }
}

/// `WITH NO_WAIT | ROLLBACK IMMEDIATE | ROLLBACK AFTER n [SECONDS]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DatabaseTermination {
    /// `NO_WAIT`.
    pub no_wait: bool,
    /// `ROLLBACK IMMEDIATE`.
    pub rollback_immediate: bool,
    /// `ROLLBACK AFTER n`.
    pub rollback_after: Option<ScalarExpression>,
}

/// `n [KB|MB|GB|TB|%]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SizeValue {
    /// The number.
    pub value: ScalarExpression,
    /// Unit.
    pub unit: Option<Unit>,
}

/// One item of a `( NAME = ..., FILENAME = ..., ... )` file specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FileDeclarationOption {
    /// `NAME = logical`.
    Name(IdentifierOrValue),
    /// `NEWNAME = logical`.
    NewName(IdentifierOrValue),
    /// `FILENAME = 'path'`.
    FileName(ScalarExpression),
    /// `SIZE = n`.
    Size(SizeValue),
    /// `MAXSIZE = n | UNLIMITED`; `None` for unlimited.
    MaxSize(Option<SizeValue>),
    /// `FILEGROWTH = n`.
    FileGrowth(SizeValue),
    /// `OFFLINE`.
    Offline,
}

/// A parenthesized file specification.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FileDeclaration {
    /// `PRIMARY` in `CREATE DATABASE ... ON PRIMARY (...)`.
    pub is_primary: bool,
    /// The items.
    pub options: Vec<FileDeclarationOption>,
}

/// `FILEGROUP name [CONTAINS ...] [DEFAULT] (files)` in `CREATE DATABASE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FileGroupDefinition {
    /// Filegroup name; `None` for the primary group.
    pub name: Option<Identifier>,
    /// `DEFAULT`.
    pub is_default: bool,
    /// `CONTAINS FILESTREAM`.
    pub contains_filestream: bool,
    /// `CONTAINS MEMORY_OPTIMIZED_DATA`.
    pub contains_memory_optimized_data: bool,
    /// Files.
    pub files: Vec<FileDeclaration>,
}

/// `FOR ATTACH` / `FOR ATTACH_REBUILD_LOG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttachMode {
    /// `FOR ATTACH`
    Attach,
    /// `FOR ATTACH_REBUILD_LOG`
    AttachRebuildLog,
}

/// `CREATE DATABASE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CreateDatabaseStatement {
    /// Database name.
    pub name: Identifier,
    /// `CONTAINMENT = NONE|PARTIAL`.
    pub containment: Option<Containment>,
    /// `ON [PRIMARY] (...), FILEGROUP ...`.
    pub file_groups: Vec<FileGroupDefinition>,
    /// `LOG ON (...)`.
    pub log_on: Vec<FileDeclaration>,
    /// `COLLATE name`.
    pub collation: Option<Identifier>,
    /// `FOR ATTACH ...`.
    pub attach_mode: Option<AttachMode>,
    /// `WITH ...` options.
    pub options: Vec<DatabaseOption>,
    /// `AS SNAPSHOT OF source`.
    pub as_snapshot_of: Option<Identifier>,
    /// `AS COPY OF [server.]database`.
    pub as_copy_of: Option<super::MultiPartIdentifier>,
}

/// `ALTER DATABASE name SET options [WITH termination]`.
///
/// `ALTER DATABASE CURRENT` is represented by a name whose value is `CURRENT`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterDatabaseSetStatement {
    /// Database name.
    pub name: Identifier,
    /// Options in source order.
    pub options: Vec<DatabaseOption>,
    /// Termination clause.
    pub termination: Option<DatabaseTermination>,
}

/// `ALTER DATABASE name ADD [LOG] FILE (...) [TO FILEGROUP fg]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterDatabaseAddFileStatement {
    /// Database name.
    pub name: Identifier,
    /// `LOG FILE`.
    pub is_log: bool,
    /// File specifications.
    pub files: Vec<FileDeclaration>,
    /// `TO FILEGROUP`.
    pub file_group: Option<Identifier>,
}

/// `ALTER DATABASE name ADD FILEGROUP fg [CONTAINS ...]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterDatabaseAddFileGroupStatement {
    /// Database name.
    pub name: Identifier,
    /// Filegroup name.
    pub file_group: Identifier,
    /// `CONTAINS FILESTREAM`.
    pub contains_filestream: bool,
    /// `CONTAINS MEMORY_OPTIMIZED_DATA`.
    pub contains_memory_optimized_data: bool,
}

/// `ALTER DATABASE name MODIFY FILE (...)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterDatabaseModifyFileStatement {
    /// Database name.
    pub name: Identifier,
    /// The file specification.
    pub file: FileDeclaration,
}

/// What `MODIFY FILEGROUP` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ModifyFileGroupAction {
    /// `DEFAULT`
    Default,
    /// `READ_ONLY` / `READONLY`
    ReadOnly,
    /// `READ_WRITE` / `READWRITE`
    ReadWrite,
    /// `AUTOGROW_ALL_FILES`
    AutogrowAllFiles,
    /// `AUTOGROW_SINGLE_FILE`
    AutogrowSingleFile,
    /// `NAME = new`
    NewName(Identifier),
}

/// `ALTER DATABASE name MODIFY FILEGROUP fg action [WITH termination]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterDatabaseModifyFileGroupStatement {
    /// Database name.
    pub name: Identifier,
    /// Filegroup name.
    pub file_group: Identifier,
    /// Change.
    pub action: Option<ModifyFileGroupAction>,
    /// Termination clause.
    pub termination: Option<DatabaseTermination>,
}

/// `ALTER DATABASE name MODIFY NAME = new`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterDatabaseModifyNameStatement {
    /// Database name.
    pub name: Identifier,
    /// New name.
    pub new_name: Identifier,
}

/// `ALTER DATABASE name REMOVE FILE f` / `REMOVE FILEGROUP fg`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterDatabaseRemoveStatement {
    /// Database name.
    pub name: Identifier,
    /// File or filegroup name.
    pub target: Identifier,
}

/// `ALTER DATABASE name REBUILD LOG [ON (...)]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterDatabaseRebuildLogStatement {
    /// Database name.
    pub name: Identifier,
    /// New log file.
    pub file: Option<FileDeclaration>,
}

/// `ALTER DATABASE name COLLATE collation`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AlterDatabaseCollateStatement {
    /// Database name.
    pub name: Identifier,
    /// Collation.
    pub collation: Identifier,
}

/// `{CREATE|ALTER} DATABASE ENCRYPTION KEY ...`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DatabaseEncryptionKeyStatement {
    /// `REGENERATE`.
    pub regenerate: bool,
    /// `WITH ALGORITHM = ...`.
    pub algorithm: Option<String>,
    /// `Certificate` or `AsymmetricKey`.
    pub encryptor_kind: Option<String>,
    /// Encryptor name.
    pub encryptor: Option<Identifier>,
}

/// `ON` / `OFF` / `PRIMARY` for scoped configuration switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OnOffPrimary {
    /// `ON`
    On,
    /// `OFF`
    Off,
    /// `PRIMARY`
    Primary,
}

/// A `DATABASE SCOPED CONFIGURATION` setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScopedConfigurationOption {
    /// `MAXDOP = n | PRIMARY`; `None` for `PRIMARY`.
    MaxDop(Option<ScalarExpression>),
    /// `LEGACY_CARDINALITY_ESTIMATION`, `PARAMETER_SNIFFING`, `QUERY_OPTIMIZER_HOTFIXES`.
    OnOffPrimary {
        /// Pascal-case option name.
        option_kind: String,
        /// The value.
        value: OnOffPrimary,
    },
    /// Any other `NAME = value`.
    Generic(GenericOption),
}

impl ScopedConfigurationOption {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::MaxDop(_) => "MaxDop",
            Self::OnOffPrimary { option_kind, .. } => option_kind,
            Self::Generic(g) => &g.option_kind,
        }
    }
}

/// `ALTER DATABASE SCOPED CONFIGURATION [FOR SECONDARY] SET ...`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterDatabaseScopedConfigurationSetStatement {
    /// `FOR SECONDARY`.
    pub secondary: bool,
    /// The setting.
    pub option: Option<ScopedConfigurationOption>,
}

/// `ALTER DATABASE SCOPED CONFIGURATION [FOR SECONDARY] CLEAR PROCEDURE_CACHE [handle]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlterDatabaseScopedConfigurationClearStatement {
    /// `FOR SECONDARY`.
    pub secondary: bool,
    /// Plan handle.
    pub plan_handle: Option<ScalarExpression>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_store_accessors() {
        let qs = QueryStoreOption {
            settings: vec![
                QueryStoreSetting::OperationMode(QueryStoreState::ReadWrite),
                QueryStoreSetting::MaxStorageSize(ScalarExpression::integer("1024")),
                QueryStoreSetting::CleanupPolicy {
                    stale_query_threshold: Some(ScalarExpression::integer("30")),
                },
            ],
            ..QueryStoreOption::default()
        };
        assert_eq!(qs.operation_mode(), Some(QueryStoreState::ReadWrite));
        assert_eq!(qs.max_storage_size(), Some(&ScalarExpression::integer("1024")));
        assert_eq!(qs.stale_query_threshold(), Some(&ScalarExpression::integer("30")));
    }

    #[test]
    fn database_option_kinds() {
        assert_eq!(
            DatabaseOption::Recovery(RecoveryModel::BulkLogged).option_kind(),
            "Recovery"
        );
        assert_eq!(
            DatabaseOption::QueryStore(QueryStoreOption::default()).option_kind(),
            "QueryStore"
        );
        let generic = DatabaseOption::OnOff {
            option_kind: "DBChaining".into(),
            state: OptionState::On,
        };
        assert_eq!(generic.option_kind(), "DBChaining");
    }
}
