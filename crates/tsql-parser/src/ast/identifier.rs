//! Identifier and multi-part name types.

use core::fmt;

use serde::Serialize;

use super::ScalarExpression;

/// How an identifier was delimited in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum QuoteKind {
    /// Plain identifier.
    #[default]
    NotQuoted,
    /// `[bracketed]`.
    Bracketed,
    /// `"double quoted"`.
    DoubleQuoted,
}

/// A single identifier with its delimiters stripped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Identifier {
    /// The identifier text, unescaped.
    pub value: String,
    /// How it was written.
    pub quote_kind: QuoteKind,
}

impl Identifier {
    /// Creates an unquoted identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quote_kind: QuoteKind::NotQuoted,
        }
    }

    /// Creates an identifier with an explicit quote kind.
    #[must_use]
    pub fn quoted(value: impl Into<String>, quote_kind: QuoteKind) -> Self {
        Self {
            value: value.into(),
            quote_kind,
        }
    }

    /// Returns true if the identifier has no text (an omitted part).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Case-insensitive comparison against plain text.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &str) -> bool {
        self.value.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// A dotted name of one or more parts. Omitted parts are empty identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MultiPartIdentifier {
    /// The parts, in source order.
    pub identifiers: Vec<Identifier>,
    /// Always equal to `identifiers.len()`.
    pub count: usize,
}

impl MultiPartIdentifier {
    /// Creates a multi-part identifier from its parts.
    #[must_use]
    pub fn new(identifiers: Vec<Identifier>) -> Self {
        let count = identifiers.len();
        Self { identifiers, count }
    }

    /// Appends a part, keeping `count` in sync.
    pub fn push(&mut self, identifier: Identifier) {
        self.identifiers.push(identifier);
        self.count = self.identifiers.len();
    }

    /// Returns the last part.
    #[must_use]
    pub fn last(&self) -> Option<&Identifier> {
        self.identifiers.last()
    }
}

impl fmt::Display for MultiPartIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.identifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// A `server.database.schema.base` name of one to four parts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SchemaObjectName {
    /// All parts, in source order.
    pub identifiers: Vec<Identifier>,
    /// Always equal to `identifiers.len()`.
    pub count: usize,
    /// Fourth-from-last part.
    pub server: Option<Identifier>,
    /// Third-from-last part.
    pub database: Option<Identifier>,
    /// Second-from-last part.
    pub schema: Option<Identifier>,
    /// Last part.
    pub base: Option<Identifier>,
}

impl SchemaObjectName {
    /// Builds a name from its parts, filling the positional fields from the right.
    #[must_use]
    pub fn from_parts(identifiers: Vec<Identifier>) -> Self {
        let count = identifiers.len();
        let from_end = |n: usize| {
            count
                .checked_sub(n)
                .and_then(|i| identifiers.get(i))
                .cloned()
        };
        Self {
            server: if count >= 4 { from_end(4) } else { None },
            database: from_end(3),
            schema: from_end(2),
            base: from_end(1),
            count,
            identifiers,
        }
    }

    /// Convenience constructor for a single-part name.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self::from_parts(vec![Identifier::new(name)])
    }

    /// Returns the base object name, or an empty string if absent.
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.base.as_ref().map_or("", |b| b.value.as_str())
    }

    /// Returns the schema name if present and non-empty.
    #[must_use]
    pub fn schema_name(&self) -> Option<&str> {
        self.schema
            .as_ref()
            .filter(|s| !s.is_empty())
            .map(|s| s.value.as_str())
    }

    /// Returns true when no parts were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Views the name as a plain multi-part identifier.
    #[must_use]
    pub fn to_multi_part(&self) -> MultiPartIdentifier {
        MultiPartIdentifier::new(self.identifiers.clone())
    }
}

impl From<MultiPartIdentifier> for SchemaObjectName {
    fn from(value: MultiPartIdentifier) -> Self {
        Self::from_parts(value.identifiers)
    }
}

impl fmt::Display for SchemaObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.identifiers.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Either a name or a literal/expression value, as in `DEFAULT_LANGUAGE = us_english`
/// versus `DEFAULT_LANGUAGE = 1033`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum IdentifierOrValue {
    /// A bare or quoted identifier.
    Identifier(Identifier),
    /// A literal or other scalar value.
    Value(ScalarExpression),
}

impl Default for IdentifierOrValue {
    fn default() -> Self {
        Self::Identifier(Identifier::default())
    }
}

/// Either a name or a `@variable`, as used for transaction and cursor names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IdentifierOrVariable {
    /// A bare or quoted identifier.
    Identifier(Identifier),
    /// A `@variable`, including the `@`.
    Variable(String),
}

impl Default for IdentifierOrVariable {
    fn default() -> Self {
        Self::Identifier(Identifier::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(names: &[&str]) -> Vec<Identifier> {
        names.iter().map(|n| Identifier::new(*n)).collect()
    }

    #[test]
    fn schema_object_name_fills_from_the_right() {
        let name = SchemaObjectName::from_parts(parts(&["srv", "db", "dbo", "t"]));
        assert_eq!(name.count, 4);
        assert_eq!(name.server.as_ref().map(|i| i.value.as_str()), Some("srv"));
        assert_eq!(name.database.as_ref().map(|i| i.value.as_str()), Some("db"));
        assert_eq!(name.schema_name(), Some("dbo"));
        assert_eq!(name.base_name(), "t");

        let two = SchemaObjectName::from_parts(parts(&["dbo", "t"]));
        assert!(two.server.is_none());
        assert!(two.database.is_none());
        assert_eq!(two.schema_name(), Some("dbo"));
    }

    #[test]
    fn empty_parts_are_kept() {
        let name = SchemaObjectName::from_parts(parts(&["", "", "a"]));
        assert_eq!(name.count, 3);
        assert_eq!(name.schema_name(), None);
        assert_eq!(name.to_string(), "..a");
    }

    #[test]
    fn multi_part_count_tracks_push() {
        let mut id = MultiPartIdentifier::default();
        id.push(Identifier::new("a"));
        id.push(Identifier::new("b"));
        assert_eq!(id.count, id.identifiers.len());
        assert_eq!(id.to_string(), "a.b");
    }
}
