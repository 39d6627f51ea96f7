//! Table hints and query-level optimizer hints.

use serde::Serialize;

use super::{IdentifierOrValue, ScalarExpression, SchemaObjectName};

/// A table hint inside `WITH (...)` after a table reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TableHint {
    /// A bare hint such as `NOLOCK` or `TABLOCK`.
    Simple {
        /// Pascal-case hint name.
        option_kind: String,
    },
    /// `INDEX (ix, ...)` or `INDEX = ix`.
    Index {
        /// Index names or ids.
        values: Vec<IdentifierOrValue>,
    },
    /// `FORCESEEK [(index (cols))]`.
    ForceSeek {
        /// Index name or id.
        index: Option<IdentifierOrValue>,
        /// Seek columns.
        columns: Vec<super::Identifier>,
    },
    /// A valued hint such as `SPATIAL_WINDOW_MAX_CELLS = 512`.
    Literal {
        /// Pascal-case hint name.
        option_kind: String,
        /// The value.
        value: ScalarExpression,
    },
}

impl TableHint {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::Simple { option_kind } | Self::Literal { option_kind, .. } => option_kind,
            Self::Index { .. } => "Index",
            Self::ForceSeek { .. } => "ForceSeek",
        }
    }
}

/// `@variable = value` or `@variable UNKNOWN` in `OPTIMIZE FOR`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VariableValuePair {
    /// The variable, including `@`.
    pub variable: String,
    /// The value; `None` means `UNKNOWN`.
    pub value: Option<ScalarExpression>,
}

/// One hint inside `OPTION (...)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum OptimizerHint {
    /// A bare hint such as `RECOMPILE` or `HASH JOIN`.
    Simple {
        /// Pascal-case hint name.
        option_kind: String,
    },
    /// A valued hint such as `MAXDOP 4` or `MAXRECURSION 0`.
    Literal {
        /// Pascal-case hint name.
        option_kind: String,
        /// The value.
        value: ScalarExpression,
    },
    /// `OPTIMIZE FOR (@v = 1, @w UNKNOWN)` or `OPTIMIZE FOR UNKNOWN`.
    OptimizeFor {
        /// Per-variable values.
        pairs: Vec<VariableValuePair>,
        /// `OPTIMIZE FOR UNKNOWN`.
        unknown: bool,
    },
    /// `USE HINT ('name', ...)`.
    UseHint(Vec<ScalarExpression>),
    /// `USE PLAN N'xml'`.
    UsePlan(ScalarExpression),
    /// `TABLE HINT (object, hints)`.
    TableHints {
        /// The exposed object name.
        object: SchemaObjectName,
        /// The hints.
        hints: Vec<TableHint>,
    },
}

impl OptimizerHint {
    /// Pascal-case discriminator.
    #[must_use]
    pub fn option_kind(&self) -> &str {
        match self {
            Self::Simple { option_kind } | Self::Literal { option_kind, .. } => option_kind,
            Self::OptimizeFor { .. } => "OptimizeFor",
            Self::UseHint(_) => "UseHint",
            Self::UsePlan(_) => "UsePlan",
            Self::TableHints { .. } => "TableHints",
        }
    }
}
