//! Identifiers, multi-part names and literal unquoting.

use super::cursor::{is_word_token, Parser};
use super::error::{PResult, ParseError};
use crate::ast::{
    ColumnReference, ColumnType, Identifier, IdentifierOrValue, IdentifierOrVariable,
    MultiPartIdentifier, QuoteKind, SchemaObjectName,
};
use crate::lexer::{Token, TokenKind};

/// Converts an identifier-like token to an [`Identifier`], removing the
/// delimiters and collapsing doubled closing delimiters.
#[must_use]
pub fn identifier_from_token(token: &Token) -> Identifier {
    match token.kind {
        TokenKind::BracketedIdentifier => Identifier::quoted(
            strip_delimiters(&token.literal).replace("]]", "]"),
            QuoteKind::Bracketed,
        ),
        TokenKind::QuotedIdentifier => Identifier::quoted(
            strip_delimiters(&token.literal).replace("\"\"", "\""),
            QuoteKind::DoubleQuoted,
        ),
        _ => Identifier::new(token.literal.clone()),
    }
}

/// Returns the value of a `'...'` or `N'...'` literal.
#[must_use]
pub fn unquote_string(literal: &str) -> String {
    let body = literal
        .strip_prefix(&['N', 'n'][..])
        .filter(|rest| rest.starts_with('\''))
        .unwrap_or(literal);
    strip_delimiters(body).replace("''", "'")
}

fn strip_delimiters(literal: &str) -> &str {
    let mut chars = literal.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Most parts a schema-object name can carry: `server.database.schema.base`.
const MAX_NAME_PARTS: usize = 4;

/// Most words in a securable class such as `XML SCHEMA COLLECTION`.
const MAX_CLASS_WORDS: usize = 3;

/// Parts of a dotted name, and whether it ended in `.*`.
#[derive(Debug, Default)]
pub(crate) struct NameParts {
    pub(crate) parts: Vec<Identifier>,
    pub(crate) wildcard: bool,
}

impl Parser {
    /// True at a quoted, bracketed or plain identifier.
    pub(crate) fn at_identifier(&self) -> bool {
        self.kind().is_identifier()
    }

    /// True at an identifier that cannot be read as the start of the next
    /// statement, so an optional trailing name may be taken.
    pub(crate) fn at_name(&self) -> bool {
        self.at_identifier() && !self.at_statement_end()
    }

    pub(crate) fn take_identifier(&mut self) -> Identifier {
        let token = self.advance();
        identifier_from_token(&token)
    }

    /// Parses one identifier. At a non-identifier token an empty
    /// identifier is returned and nothing is consumed.
    pub(crate) fn parse_identifier(&mut self) -> Identifier {
        if self.at_identifier() {
            self.take_identifier()
        } else {
            Identifier::default()
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> PResult<Identifier> {
        if self.at_identifier() {
            Ok(self.take_identifier())
        } else {
            Err(self.error_here("identifier"))
        }
    }

    /// Like [`Self::expect_identifier`] but also accepts a reserved word,
    /// for positions where no keyword can follow.
    pub(crate) fn expect_identifier_or_keyword(&mut self) -> PResult<Identifier> {
        if self.at_identifier() || matches!(self.kind(), TokenKind::Keyword(_)) {
            Ok(self.take_identifier())
        } else {
            Err(self.error_here("identifier"))
        }
    }

    /// Parses `a[.b[.c...]]`. Empty parts such as `db..t` are kept; a
    /// trailing `.*` is consumed and reported. A reserved word is taken as
    /// the first part only when a `.` follows it.
    pub(crate) fn parse_name_parts(&mut self) -> PResult<NameParts> {
        let mut name = NameParts::default();
        if self.check(TokenKind::Dot) {
            name.parts.push(Identifier::default());
        } else if self.at_identifier() || self.at_qualifying_keyword() {
            name.parts.push(self.take_identifier());
        } else {
            return Err(self.error_here("identifier"));
        }
        while self.eat(TokenKind::Dot) {
            match self.kind() {
                TokenKind::Dot => name.parts.push(Identifier::default()),
                TokenKind::Star => {
                    self.advance();
                    name.wildcard = true;
                    break;
                }
                kind if kind.is_identifier() || matches!(kind, TokenKind::Keyword(_)) => {
                    name.parts.push(self.take_identifier());
                }
                _ => {
                    name.parts.push(Identifier::default());
                    break;
                }
            }
        }
        Ok(name)
    }

    /// True at a reserved word used as a name qualifier, as in `schema.t`.
    pub(crate) fn at_qualifying_keyword(&self) -> bool {
        matches!(self.kind(), TokenKind::Keyword(_)) && self.peek().kind == TokenKind::Dot
    }

    pub(crate) fn parse_multi_part_identifier(&mut self) -> PResult<MultiPartIdentifier> {
        Ok(MultiPartIdentifier::new(self.parse_name_parts()?.parts))
    }

    pub(crate) fn parse_schema_object_name(&mut self) -> PResult<SchemaObjectName> {
        let start = self.current().clone();
        let parts = self.parse_name_parts()?.parts;
        Ok(self.schema_object_name(parts, &start))
    }

    /// Builds a schema-object name from parsed parts. Past four parts a
    /// diagnostic is recorded and the leading extras are dropped.
    pub(crate) fn schema_object_name(
        &mut self,
        mut parts: Vec<Identifier>,
        start: &Token,
    ) -> SchemaObjectName {
        if parts.len() > MAX_NAME_PARTS {
            self.record(ParseError::new(
                format!(
                    "object name has {} parts, at most {MAX_NAME_PARTS} are allowed",
                    parts.len()
                ),
                start.span,
                start.location,
            ));
            parts.drain(..parts.len() - MAX_NAME_PARTS);
        }
        SchemaObjectName::from_parts(parts)
    }

    /// `name [, name ...]`
    pub(crate) fn parse_schema_object_names(&mut self) -> PResult<Vec<SchemaObjectName>> {
        self.comma_separated(Self::parse_schema_object_name)
    }

    pub(crate) fn parse_column_reference(&mut self) -> PResult<ColumnReference> {
        let name = self.parse_name_parts()?;
        Ok(ColumnReference {
            identifier: MultiPartIdentifier::new(name.parts),
            column_type: if name.wildcard {
                ColumnType::Wildcard
            } else {
                ColumnType::Regular
            },
        })
    }

    /// `( ident [, ident ...] )`
    pub(crate) fn parse_identifier_list(&mut self) -> PResult<Vec<Identifier>> {
        self.parenthesized_list(Self::expect_identifier)
    }

    /// `( column [, column ...] )`
    pub(crate) fn parse_column_list(&mut self) -> PResult<Vec<ColumnReference>> {
        self.parenthesized_list(Self::parse_column_reference)
    }

    pub(crate) fn parse_identifier_or_variable(&mut self) -> PResult<IdentifierOrVariable> {
        if self.check(TokenKind::Variable) {
            Ok(IdentifierOrVariable::Variable(self.advance().literal))
        } else {
            Ok(IdentifierOrVariable::Identifier(self.expect_identifier()?))
        }
    }

    pub(crate) fn parse_identifier_or_value(&mut self) -> PResult<IdentifierOrValue> {
        if self.at_identifier() {
            Ok(IdentifierOrValue::Identifier(self.take_identifier()))
        } else {
            Ok(IdentifierOrValue::Value(self.parse_scalar_expression()?))
        }
    }

    /// Consumes a string literal and returns its unquoted value.
    pub(crate) fn expect_string(&mut self) -> PResult<String> {
        match self.kind() {
            TokenKind::String | TokenKind::NationalString => {
                Ok(unquote_string(&self.advance().literal))
            }
            _ => Err(self.error_here("string")),
        }
    }

    /// Parses `class::name`, returning the class words in upper case and
    /// joined by `_`. Without `::` after at most three words the class is
    /// `None` and a plain schema-object name is read.
    pub(crate) fn parse_class_qualified_name(
        &mut self,
    ) -> PResult<(Option<String>, SchemaObjectName)> {
        let class_words = (1..=MAX_CLASS_WORDS).find(|&count| {
            (0..count).all(|i| is_word_token(self.nth(i)))
                && self.nth(count).kind == TokenKind::DoubleColon
        });
        let Some(count) = class_words else {
            return Ok((None, self.parse_schema_object_name()?));
        };
        let words: Vec<String> = (0..count)
            .map(|_| self.advance().literal.to_ascii_uppercase())
            .collect();
        self.advance();
        Ok((Some(words.join("_")), self.parse_schema_object_name()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn parser(sql: &str) -> Parser {
        Parser::new(Lexer::new(sql).tokenize().unwrap(), ParserOptions::default())
    }

    #[test]
    fn unquoting() {
        let tokens = Lexer::new("[my]]col] \"a\"\"b\" plain").tokenize().unwrap();
        let bracketed = identifier_from_token(&tokens[0]);
        assert_eq!(bracketed.value, "my]col");
        assert_eq!(bracketed.quote_kind, QuoteKind::Bracketed);
        assert_eq!(identifier_from_token(&tokens[1]).value, "a\"b");
        assert_eq!(identifier_from_token(&tokens[2]).quote_kind, QuoteKind::NotQuoted);
        assert_eq!(unquote_string("'it''s'"), "it's");
        assert_eq!(unquote_string("N'x'"), "x");
        assert_eq!(unquote_string("''"), "");
    }

    #[test]
    fn schema_object_name_parts() {
        let name = parser("srv.db.dbo.t").parse_schema_object_name().unwrap();
        assert_eq!(name.count, 4);
        assert_eq!(name.base_name(), "t");

        let name = parser("db..t").parse_schema_object_name().unwrap();
        assert_eq!(name.count, 3);
        assert!(name.schema.as_ref().unwrap().is_empty());

        let name = parser("..a").parse_schema_object_name().unwrap();
        assert_eq!(name.to_string(), "..a");
    }

    #[test]
    fn keywords_are_accepted_after_a_dot() {
        let column = parser("t.[key].file").parse_column_reference().unwrap();
        assert_eq!(column.identifier.count, 3);
        assert_eq!(column.column_name(), "file");
    }

    #[test]
    fn qualified_wildcard() {
        let column = parser("t.*").parse_column_reference().unwrap();
        assert_eq!(column.column_type, ColumnType::Wildcard);
        assert_eq!(column.identifier.count, 1);
    }

    #[test]
    fn missing_identifier_is_lenient() {
        let mut p = parser("(");
        assert!(p.parse_identifier().is_empty());
        assert!(p.check(TokenKind::LeftParen));
        assert!(p.expect_identifier().is_err());
    }

    #[test]
    fn class_qualified_names() {
        let (class, name) = parser("SCHEMA::sales").parse_class_qualified_name().unwrap();
        assert_eq!(class.as_deref(), Some("SCHEMA"));
        assert_eq!(name.base_name(), "sales");

        let (class, name) = parser("XML SCHEMA COLLECTION::c")
            .parse_class_qualified_name()
            .unwrap();
        assert_eq!(class.as_deref(), Some("XML_SCHEMA_COLLECTION"));
        assert_eq!(name.base_name(), "c");

        let (class, name) = parser("dbo.t TO u").parse_class_qualified_name().unwrap();
        assert!(class.is_none());
        assert_eq!(name.schema_name(), Some("dbo"));
    }

    #[test]
    fn unqualified_name_stops_before_the_next_word() {
        let mut p = parser("Proc_A BY CERTIFICATE c");
        let (class, name) = p.parse_class_qualified_name().unwrap();
        assert!(class.is_none());
        assert_eq!(name.base_name(), "Proc_A");
        assert!(p.is_word("BY"));
    }

    #[test]
    fn reserved_word_as_a_qualifier() {
        let name = parser("schema.t").parse_schema_object_name().unwrap();
        assert_eq!(name.schema_name(), Some("schema"));
        assert_eq!(name.base_name(), "t");

        let mut p = parser("schema t");
        assert!(p.parse_schema_object_name().is_err());
    }

    #[test]
    fn names_past_four_parts_are_reported() {
        let mut p = parser("a.b.c.d.e");
        let name = p.parse_schema_object_name().unwrap();
        assert_eq!(name.count, 4);
        assert_eq!(name.base_name(), "e");
        assert_eq!(name.to_string(), "b.c.d.e");
        assert_eq!(p.diagnostics().len(), 1);
    }
}
