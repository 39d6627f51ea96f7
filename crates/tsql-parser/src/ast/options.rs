//! Option records shared by many statements.
//!
//! Every option node carries an `option_kind`: a pascal-case tag derived from
//! the option's SQL name (`PAD_INDEX` becomes `PadIndex`). Option families
//! with a dedicated shape are enums; anything else lands in [`GenericOption`].

use serde::Serialize;

use super::{ColumnReference, Identifier, ScalarExpression, SchemaObjectName, SortOrder};

/// `ON` / `OFF` state of a switch-like option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OptionState {
    /// Not given.
    #[default]
    NotSet,
    /// `ON`
    On,
    /// `OFF`
    Off,
}

/// Units that may follow a numeric option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    /// `SECONDS`
    Seconds,
    /// `MINUTES`
    Minutes,
    /// `HOURS`
    Hours,
    /// `DAYS`
    Days,
    /// `WEEKS`
    Weeks,
    /// `MONTHS`
    Months,
    /// `YEARS`
    Years,
    /// `KB`
    Kilobytes,
    /// `MB`
    Megabytes,
    /// `GB`
    Gigabytes,
    /// `TB`
    Terabytes,
    /// `PERCENT` or `%`
    Percent,
}

impl Unit {
    /// Maps a unit word to a unit (case-insensitive, singular or plural).
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        let unit = match word.to_ascii_uppercase().as_str() {
            "SECOND" | "SECONDS" => Self::Seconds,
            "MINUTE" | "MINUTES" => Self::Minutes,
            "HOUR" | "HOURS" => Self::Hours,
            "DAY" | "DAYS" => Self::Days,
            "WEEK" | "WEEKS" => Self::Weeks,
            "MONTH" | "MONTHS" => Self::Months,
            "YEAR" | "YEARS" => Self::Years,
            "KB" => Self::Kilobytes,
            "MB" => Self::Megabytes,
            "GB" => Self::Gigabytes,
            "TB" => Self::Terabytes,
            "PERCENT" => Self::Percent,
            _ => return None,
        };
        Some(unit)
    }
}

/// The value side of a generic option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OptionValue {
    /// `ON` / `OFF`.
    State(OptionState),
    /// A literal or other expression.
    Expression(ScalarExpression),
    /// A bare word such as `AUTO` or `SIMPLE`, or an object name.
    Identifier(SchemaObjectName),
    /// A parenthesized nested option list.
    List(Vec<GenericOption>),
    /// A number followed by a unit.
    Unit {
        /// The number.
        value: ScalarExpression,
        /// The unit.
        unit: Unit,
    },
}

/// An option without a dedicated shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GenericOption {
    /// Pascal-case name.
    pub option_kind: String,
    /// The value, if one was given.
    pub value: Option<OptionValue>,
}

impl GenericOption {
    /// Returns the value as an expression, if it is one.
    #[must_use]
    pub fn expression(&self) -> Option<&ScalarExpression> {
        match &self.value {
            Some(OptionValue::Expression(e)) => Some(e),
            _ => None,
        }
    }
}

/// `LOCATION = 'x'` style option bag, also used for whole clauses of the
/// long-tail statements.
pub type OptionBag = Vec<GenericOption>;

/// `ON filegroup` / `ON scheme(col)` / `ON "default"`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FileGroupOrPartitionScheme {
    /// Filegroup or partition scheme name.
    pub name: Identifier,
    /// Partitioning columns for a scheme.
    pub columns: Vec<Identifier>,
}

/// A column with optional direction in an index or key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnWithSortOrder {
    /// The column.
    pub column: ColumnReference,
    /// Direction.
    pub sort_order: SortOrder,
}

/// `ABORT_AFTER_WAIT` target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AbortAfterWait {
    /// `NONE`
    None,
    /// `SELF`
    SelfSession,
    /// `BLOCKERS`
    Blockers,
}

/// One setting inside `WAIT_AT_LOW_PRIORITY (...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LowPriorityLockWaitOption {
    /// `MAX_DURATION = n [MINUTES]`.
    MaxDuration {
        /// Duration.
        value: ScalarExpression,
        /// Unit, normally minutes.
        unit: Option<Unit>,
    },
    /// `ABORT_AFTER_WAIT = NONE|SELF|BLOCKERS`.
    AbortAfterWait(AbortAfterWait),
}

impl LowPriorityLockWaitOption {
    /// Pascal-case discriminator.
    #[must_use]
    pub const fn option_kind(&self) -> &'static str {
        match self {
            Self::MaxDuration { .. } => "MaxDuration",
            Self::AbortAfterWait(_) => "AbortAfterWait",
        }
    }
}

/// Compression levels for `DATA_COMPRESSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DataCompressionLevel {
    /// `NONE`
    #[default]
    None,
    /// `ROW`
    Row,
    /// `PAGE`
    Page,
    /// `COLUMNSTORE`
    ColumnStore,
    /// `COLUMNSTORE_ARCHIVE`
    ColumnStoreArchive,
}

/// `n` or `n TO m` in an `ON PARTITIONS (...)` list.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PartitionRange {
    /// First partition.
    pub from: ScalarExpression,
    /// Last partition of a range.
    pub to: Option<ScalarExpression>,
}

/// Index options, used by `CREATE INDEX`, `ALTER INDEX`, constraints and `DROP INDEX`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IndexOption {
    /// A switch such as `PAD_INDEX = ON`.
    State {
        /// Pascal-case option name.
        option_kind: String,
        /// The state.
        state: OptionState,
    },
    /// A valued option such as `FILLFACTOR = 80` or `MAXDOP = 4`.
    Expression {
        /// Pascal-case option name.
        option_kind: String,
        /// The value.
        value: ScalarExpression,
    },
    /// `ONLINE = ON [(WAIT_AT_LOW_PRIORITY (...))]`.
    Online {
        /// The state.
        state: OptionState,
        /// Low-priority wait settings.
        low_priority: Option<Vec<LowPriorityLockWaitOption>>,
    },
    /// `WAIT_AT_LOW_PRIORITY (...)` given on its own.
    WaitAtLowPriority(Vec<LowPriorityLockWaitOption>),
    /// `DATA_COMPRESSION = level [ON PARTITIONS (...)]`.
    DataCompression {
        /// The level.
        level: DataCompressionLevel,
        /// Partition ranges.
        partitions: Vec<PartitionRange>,
    },
    /// `XML_COMPRESSION = ON|OFF [ON PARTITIONS (...)]`.
    XmlCompression {
        /// The state.
        state: OptionState,
        /// Partition ranges.
        partitions: Vec<PartitionRange>,
    },
    /// `MOVE TO filegroup` in `DROP INDEX`.
    MoveTo(FileGroupOrPartitionScheme),
    /// `FILESTREAM_ON name`.
    FileStreamOn(Identifier),
    /// `MAX_DURATION = n [MINUTES]` for resumable operations.
    MaxDuration {
        /// Duration.
        value: ScalarExpression,
        /// Unit.
        unit: Option<Unit>,
    },
    /// Any other option.
    Generic(GenericOption),
}

impl IndexOption {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::State { option_kind, .. } | Self::Expression { option_kind, .. } => option_kind,
            Self::Online { .. } => "Online",
            Self::WaitAtLowPriority(_) => "WaitAtLowPriority",
            Self::DataCompression { .. } => "DataCompression",
            Self::XmlCompression { .. } => "XmlCompression",
            Self::MoveTo(_) => "MoveTo",
            Self::FileStreamOn(_) => "FileStreamOn",
            Self::MaxDuration { .. } => "MaxDuration",
            Self::Generic(g) => &g.option_kind,
        }
    }
}

/// `DURABILITY` setting of a memory-optimized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DurabilityKind {
    /// `SCHEMA_ONLY`
    SchemaOnly,
    /// `SCHEMA_AND_DATA`
    SchemaAndData,
}

/// `LOCK_ESCALATION` setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LockEscalationKind {
    /// `AUTO`
    Auto,
    /// `TABLE`
    Table,
    /// `DISABLE`
    Disable,
}

/// `HISTORY_RETENTION_PERIOD = n UNIT` or `INFINITE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RetentionPeriod {
    /// The count; `None` for `INFINITE`.
    pub value: Option<ScalarExpression>,
    /// The unit.
    pub unit: Option<Unit>,
}

/// Table options in `WITH (...)` of `CREATE TABLE` and `ALTER TABLE SET (...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableOption {
    /// `DATA_COMPRESSION = level [ON PARTITIONS (...)]`.
    DataCompression {
        /// The level.
        level: DataCompressionLevel,
        /// Partition ranges.
        partitions: Vec<PartitionRange>,
    },
    /// `SYSTEM_VERSIONING = ON [(HISTORY_TABLE = t, ...)]`.
    SystemVersioning {
        /// The state.
        state: OptionState,
        /// History table.
        history_table: Option<SchemaObjectName>,
        /// `DATA_CONSISTENCY_CHECK`.
        data_consistency_check: Option<OptionState>,
        /// `HISTORY_RETENTION_PERIOD`.
        history_retention: Option<RetentionPeriod>,
    },
    /// `MEMORY_OPTIMIZED = ON|OFF`.
    MemoryOptimized(OptionState),
    /// `DURABILITY = ...`.
    Durability(DurabilityKind),
    /// `LOCK_ESCALATION = ...`.
    LockEscalation(LockEscalationKind),
    /// `FILESTREAM_ON name`.
    FileStreamOn(Identifier),
    /// `REMOTE_DATA_ARCHIVE = ON|OFF [(...)]`.
    RemoteDataArchive {
        /// The state.
        state: OptionState,
        /// Nested settings.
        settings: Vec<GenericOption>,
    },
    /// Any other option.
    Generic(GenericOption),
}

impl TableOption {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::DataCompression { .. } => "DataCompression",
            Self::SystemVersioning { .. } => "SystemVersioning",
            Self::MemoryOptimized(_) => "MemoryOptimized",
            Self::Durability(_) => "Durability",
            Self::LockEscalation(_) => "LockEscalation",
            Self::FileStreamOn(_) => "FileStreamOn",
            Self::RemoteDataArchive { .. } => "RemoteDataArchive",
            Self::Generic(g) => &g.option_kind,
        }
    }
}

/// Options of `BULK INSERT`, `INSERT BULK` and `OPENROWSET(BULK ...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BulkInsertOption {
    /// A bare flag such as `TABLOCK` or `SINGLE_BLOB`.
    Flag {
        /// Pascal-case option name.
        option_kind: String,
    },
    /// A valued option such as `FIELDTERMINATOR = ','`.
    Value {
        /// Pascal-case option name.
        option_kind: String,
        /// The value.
        value: ScalarExpression,
    },
    /// `ORDER (col [ASC|DESC], ...) [UNIQUE]`.
    Order {
        /// The ordering columns.
        columns: Vec<ColumnWithSortOrder>,
        /// `UNIQUE`.
        unique: bool,
    },
}

impl BulkInsertOption {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::Flag { option_kind } | Self::Value { option_kind, .. } => option_kind,
            Self::Order { .. } => "Order",
        }
    }
}

/// Options of `CREATE SEQUENCE` and `ALTER SEQUENCE`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SequenceOption {
    /// `AS type`.
    As(super::DataType),
    /// `START WITH n`.
    StartWith(ScalarExpression),
    /// `RESTART [WITH n]`.
    Restart(Option<ScalarExpression>),
    /// `INCREMENT BY n`.
    IncrementBy(ScalarExpression),
    /// `MINVALUE n` or `NO MINVALUE`.
    MinValue(Option<ScalarExpression>),
    /// `MAXVALUE n` or `NO MAXVALUE`.
    MaxValue(Option<ScalarExpression>),
    /// `CYCLE` or `NO CYCLE`.
    Cycle(bool),
    /// `CACHE [n]` or `NO CACHE`.
    Cache {
        /// False for `NO CACHE`.
        enabled: bool,
        /// Cache size.
        size: Option<ScalarExpression>,
    },
}

impl SequenceOption {
    /// Pascal-case discriminator.
    #[must_use]
    pub const fn option_kind(&self) -> &'static str {
        match self {
            Self::As(_) => "As",
            Self::StartWith(_) => "StartWith",
            Self::Restart(_) => "Restart",
            Self::IncrementBy(_) => "IncrementBy",
            Self::MinValue(_) => "MinValue",
            Self::MaxValue(_) => "MaxValue",
            Self::Cycle(_) => "Cycle",
            Self::Cache { .. } => "Cache",
        }
    }
}

/// Converts an upper snake-case option name to its pascal-case tag.
///
/// Each `_`-separated segment is title-cased. A few names whose tag does not
/// follow the segment rule are special-cased.
#[must_use]
pub fn option_kind_from_name(name: &str) -> String {
    let upper = name.to_ascii_uppercase();
    let special = match upper.as_str() {
        "DB_CHAINING" => Some("DBChaining"),
        "ARITHABORT" => Some("ArithAbort"),
        "NUMERIC_ROUNDABORT" => Some("NumericRoundAbort"),
        "VARDECIMAL_STORAGE_FORMAT" => Some("VarDecimalStorageFormat"),
        "MAXDOP" => Some("MaxDop"),
        "FILLFACTOR" => Some("FillFactor"),
        "TABLOCK" => Some("TabLock"),
        "TABLOCKX" => Some("TabLockX"),
        "NOLOCK" => Some("NoLock"),
        "HOLDLOCK" => Some("HoldLock"),
        "UPDLOCK" => Some("UpdLock"),
        "PAGLOCK" => Some("PagLock"),
        "ROWLOCK" => Some("RowLock"),
        "XLOCK" => Some("XLock"),
        "NOWAIT" | "NO_WAIT" => Some("NoWait"),
        "READPAST" => Some("ReadPast"),
        "NOEXPAND" => Some("NoExpand"),
        "READCOMMITTED" => Some("ReadCommitted"),
        "READCOMMITTEDLOCK" => Some("ReadCommittedLock"),
        "READUNCOMMITTED" => Some("ReadUncommitted"),
        "REPEATABLEREAD" => Some("RepeatableRead"),
        "MAXRECURSION" => Some("MaxRecursion"),
        "QUERYTRACEON" => Some("QueryTraceOn"),
        "FIELDTERMINATOR" => Some("FieldTerminator"),
        "ROWTERMINATOR" => Some("RowTerminator"),
        "FORMATFILE" => Some("FormatFile"),
        "DATAFILETYPE" => Some("DataFileType"),
        "ERRORFILE" => Some("ErrorFile"),
        "FIRSTROW" => Some("FirstRow"),
        "LASTROW" => Some("LastRow"),
        "MAXERRORS" => Some("MaxErrors"),
        "BATCHSIZE" => Some("BatchSize"),
        "CODEPAGE" => Some("CodePage"),
        "FIELDQUOTE" => Some("FieldQuote"),
        "KILOBYTES_PER_BATCH" => Some("KilobytesPerBatch"),
        "ROWS_PER_BATCH" => Some("RowsPerBatch"),
        "SCHEMABINDING" => Some("SchemaBinding"),
        "DEFAULT_FULLTEXT_LANGUAGE" => Some("DefaultFullTextLanguage"),
        _ => None,
    };
    if let Some(tag) = special {
        return tag.to_string();
    }

    let mut out = String::with_capacity(upper.len());
    for segment in upper.split(['_', ' ']).filter(|s| !s.is_empty()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first);
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_kind_conversion() {
        assert_eq!(option_kind_from_name("PAD_INDEX"), "PadIndex");
        assert_eq!(option_kind_from_name("allow_row_locks"), "AllowRowLocks");
        assert_eq!(option_kind_from_name("ONLINE"), "Online");
        assert_eq!(option_kind_from_name("QUERY_STORE"), "QueryStore");
    }

    #[test]
    fn option_kind_special_cases() {
        assert_eq!(option_kind_from_name("DB_CHAINING"), "DBChaining");
        assert_eq!(option_kind_from_name("ARITHABORT"), "ArithAbort");
        assert_eq!(
            option_kind_from_name("VARDECIMAL_STORAGE_FORMAT"),
            "VarDecimalStorageFormat"
        );
        assert_eq!(option_kind_from_name("NUMERIC_ROUNDABORT"), "NumericRoundAbort");
        assert_eq!(option_kind_from_name("maxdop"), "MaxDop");
        assert_eq!(option_kind_from_name("FILLFACTOR"), "FillFactor");
    }

    #[test]
    fn unit_words() {
        assert_eq!(Unit::from_word("minutes"), Some(Unit::Minutes));
        assert_eq!(Unit::from_word("MINUTE"), Some(Unit::Minutes));
        assert_eq!(Unit::from_word("MB"), Some(Unit::Megabytes));
        assert_eq!(Unit::from_word("ROWS"), None);
    }

    #[test]
    fn option_kinds_of_index_options() {
        let online = IndexOption::Online {
            state: OptionState::On,
            low_priority: None,
        };
        assert_eq!(online.option_kind(), "Online");
        let pad = IndexOption::State {
            option_kind: option_kind_from_name("PAD_INDEX"),
            state: OptionState::Off,
        };
        assert_eq!(pad.option_kind(), "PadIndex");
    }
}
