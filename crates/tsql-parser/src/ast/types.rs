//! T-SQL data type references.

use core::fmt;

use serde::Serialize;

use super::{Literal, SchemaObjectName};

/// Built-in SQL Server types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SqlDataTypeKind {
    // Exact numerics
    /// `BIGINT`
    BigInt,
    /// `INT`
    Int,
    /// `SMALLINT`
    SmallInt,
    /// `TINYINT`
    TinyInt,
    /// `BIT`
    Bit,
    /// `DECIMAL` / `DEC`
    Decimal,
    /// `NUMERIC`
    Numeric,
    /// `MONEY`
    Money,
    /// `SMALLMONEY`
    SmallMoney,

    // Approximate numerics
    /// `FLOAT` / `DOUBLE PRECISION`
    Float,
    /// `REAL`
    Real,

    // Date and time
    /// `DATE`
    Date,
    /// `TIME`
    Time,
    /// `DATETIME`
    DateTime,
    /// `DATETIME2`
    DateTime2,
    /// `DATETIMEOFFSET`
    DateTimeOffset,
    /// `SMALLDATETIME`
    SmallDateTime,

    // Character strings
    /// `CHAR` / `CHARACTER`
    Char,
    /// `VARCHAR` / `CHAR VARYING`
    VarChar,
    /// `TEXT`
    Text,
    /// `NCHAR` / `NATIONAL CHAR`
    NChar,
    /// `NVARCHAR` / `NATIONAL CHAR VARYING`
    NVarChar,
    /// `NTEXT`
    NText,

    // Binary strings
    /// `BINARY`
    Binary,
    /// `VARBINARY`
    VarBinary,
    /// `IMAGE`
    Image,

    // Other
    /// `CURSOR`
    Cursor,
    /// `SQL_VARIANT`
    SqlVariant,
    /// `TABLE`
    Table,
    /// `TIMESTAMP`
    Timestamp,
    /// `ROWVERSION`
    Rowversion,
    /// `UNIQUEIDENTIFIER`
    UniqueIdentifier,
}

impl SqlDataTypeKind {
    /// Looks up a single-word built-in type name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_uppercase().as_str() {
            "BIGINT" => Self::BigInt,
            "INT" | "INTEGER" => Self::Int,
            "SMALLINT" => Self::SmallInt,
            "TINYINT" => Self::TinyInt,
            "BIT" => Self::Bit,
            "DECIMAL" | "DEC" => Self::Decimal,
            "NUMERIC" => Self::Numeric,
            "MONEY" => Self::Money,
            "SMALLMONEY" => Self::SmallMoney,
            "FLOAT" => Self::Float,
            "REAL" => Self::Real,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "DATETIME" => Self::DateTime,
            "DATETIME2" => Self::DateTime2,
            "DATETIMEOFFSET" => Self::DateTimeOffset,
            "SMALLDATETIME" => Self::SmallDateTime,
            "CHAR" | "CHARACTER" => Self::Char,
            "VARCHAR" => Self::VarChar,
            "TEXT" => Self::Text,
            "NCHAR" => Self::NChar,
            "NVARCHAR" => Self::NVarChar,
            "NTEXT" => Self::NText,
            "BINARY" => Self::Binary,
            "VARBINARY" => Self::VarBinary,
            "IMAGE" => Self::Image,
            "CURSOR" => Self::Cursor,
            "SQL_VARIANT" => Self::SqlVariant,
            "TABLE" => Self::Table,
            "TIMESTAMP" => Self::Timestamp,
            "ROWVERSION" => Self::Rowversion,
            "UNIQUEIDENTIFIER" => Self::UniqueIdentifier,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the canonical SQL spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BigInt => "BIGINT",
            Self::Int => "INT",
            Self::SmallInt => "SMALLINT",
            Self::TinyInt => "TINYINT",
            Self::Bit => "BIT",
            Self::Decimal => "DECIMAL",
            Self::Numeric => "NUMERIC",
            Self::Money => "MONEY",
            Self::SmallMoney => "SMALLMONEY",
            Self::Float => "FLOAT",
            Self::Real => "REAL",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::DateTime => "DATETIME",
            Self::DateTime2 => "DATETIME2",
            Self::DateTimeOffset => "DATETIMEOFFSET",
            Self::SmallDateTime => "SMALLDATETIME",
            Self::Char => "CHAR",
            Self::VarChar => "VARCHAR",
            Self::Text => "TEXT",
            Self::NChar => "NCHAR",
            Self::NVarChar => "NVARCHAR",
            Self::NText => "NTEXT",
            Self::Binary => "BINARY",
            Self::VarBinary => "VARBINARY",
            Self::Image => "IMAGE",
            Self::Cursor => "CURSOR",
            Self::SqlVariant => "SQL_VARIANT",
            Self::Table => "TABLE",
            Self::Timestamp => "TIMESTAMP",
            Self::Rowversion => "ROWVERSION",
            Self::UniqueIdentifier => "UNIQUEIDENTIFIER",
        }
    }
}

/// `CONTENT` / `DOCUMENT` for typed XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum XmlContentKind {
    /// Not given.
    #[default]
    NotSpecified,
    /// `CONTENT`
    Content,
    /// `DOCUMENT`
    Document,
}

/// A data type reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DataType {
    /// A built-in type with optional parameters (`Literal::Max` for `MAX`).
    Sql {
        /// The type.
        kind: SqlDataTypeKind,
        /// Length, precision or scale.
        parameters: Vec<Literal>,
    },
    /// `XML` with an optional schema collection.
    Xml {
        /// `CONTENT` / `DOCUMENT`.
        content: XmlContentKind,
        /// Typed XML schema collection.
        schema_collection: Option<SchemaObjectName>,
    },
    /// Any other name: alias types, CLR types such as `geography`, `sysname`.
    UserDefined {
        /// The type name.
        name: SchemaObjectName,
        /// Optional parameters.
        parameters: Vec<Literal>,
    },
}

impl Default for DataType {
    fn default() -> Self {
        Self::UserDefined {
            name: SchemaObjectName::default(),
            parameters: Vec::new(),
        }
    }
}

impl DataType {
    /// Creates a built-in type without parameters.
    #[must_use]
    pub fn sql(kind: SqlDataTypeKind) -> Self {
        Self::Sql {
            kind,
            parameters: Vec::new(),
        }
    }

    /// Returns the built-in kind, if any.
    #[must_use]
    pub fn sql_kind(&self) -> Option<SqlDataTypeKind> {
        match self {
            Self::Sql { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the type parameters.
    #[must_use]
    pub fn parameters(&self) -> &[Literal] {
        match self {
            Self::Sql { parameters, .. } | Self::UserDefined { parameters, .. } => parameters,
            Self::Xml { .. } => &[],
        }
    }

    /// Returns the first parameter, which is the length for string types.
    #[must_use]
    pub fn length(&self) -> Option<&Literal> {
        self.parameters().first()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, parameters) = match self {
            Self::Sql { kind, parameters } => (kind.as_str().to_string(), parameters),
            Self::UserDefined { name, parameters } => (name.to_string(), parameters),
            Self::Xml {
                schema_collection, ..
            } => {
                return match schema_collection {
                    Some(coll) => write!(f, "XML({coll})"),
                    None => f.write_str("XML"),
                };
            }
        };
        f.write_str(&name)?;
        if !parameters.is_empty() {
            f.write_str("(")?;
            for (i, p) in parameters.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match p {
                    Literal::Max => f.write_str("MAX")?,
                    Literal::Integer(v) | Literal::Numeric(v) => f.write_str(v)?,
                    other => write!(f, "{other:?}")?,
                }
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(SqlDataTypeKind::from_name("nvarchar"), Some(SqlDataTypeKind::NVarChar));
        assert_eq!(SqlDataTypeKind::from_name("Integer"), Some(SqlDataTypeKind::Int));
        assert_eq!(SqlDataTypeKind::from_name("geography"), None);
    }

    #[test]
    fn display() {
        let dt = DataType::Sql {
            kind: SqlDataTypeKind::NVarChar,
            parameters: vec![Literal::Max],
        };
        assert_eq!(dt.to_string(), "NVARCHAR(MAX)");

        let dec = DataType::Sql {
            kind: SqlDataTypeKind::Decimal,
            parameters: vec![Literal::Integer("10".into()), Literal::Integer("2".into())],
        };
        assert_eq!(dec.to_string(), "DECIMAL(10, 2)");
        assert_eq!(dec.length(), Some(&Literal::Integer("10".into())));
    }
}
