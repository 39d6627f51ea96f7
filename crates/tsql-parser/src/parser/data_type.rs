//! Data type references such as `NVARCHAR(MAX)`, `DECIMAL(10, 2)` or
//! `XML(CONTENT dbo.schema)`.

use super::cursor::Parser;
use super::error::PResult;
use crate::ast::{DataType, Literal, Nullability, SqlDataTypeKind, XmlContentKind};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses a data type. Unknown names become [`DataType::UserDefined`].
    pub(crate) fn parse_data_type(&mut self) -> PResult<DataType> {
        if self.eat_keyword(Keyword::Cursor) {
            return Ok(DataType::sql(SqlDataTypeKind::Cursor));
        }
        if self.eat_keyword(Keyword::Table) {
            return Ok(DataType::sql(SqlDataTypeKind::Table));
        }
        if self.check_keyword(Keyword::Double) && self.peek_keyword(Keyword::Precision) {
            self.advance();
            self.advance();
            return Ok(DataType::sql(SqlDataTypeKind::Float));
        }
        if self.eat_keyword(Keyword::National) {
            let kind = if self.eat_word("TEXT") {
                SqlDataTypeKind::NText
            } else {
                if !self.eat_word("CHAR") {
                    self.expect_word("CHARACTER")?;
                }
                if self.eat_keyword(Keyword::Varying) {
                    SqlDataTypeKind::NVarChar
                } else {
                    SqlDataTypeKind::NChar
                }
            };
            return self.finish_sql_type(kind);
        }

        let name = self.parse_schema_object_name()?;
        if name.count == 1 {
            let base = name.base_name().to_ascii_uppercase();
            if base == "XML" {
                return self.parse_xml_type();
            }
            if let Some(kind) = SqlDataTypeKind::from_name(&base) {
                let kind = match kind {
                    SqlDataTypeKind::Char if self.eat_keyword(Keyword::Varying) => {
                        SqlDataTypeKind::VarChar
                    }
                    SqlDataTypeKind::NChar if self.eat_keyword(Keyword::Varying) => {
                        SqlDataTypeKind::NVarChar
                    }
                    other => other,
                };
                return self.finish_sql_type(kind);
            }
        }
        let parameters = self.parse_type_parameters()?;
        Ok(DataType::UserDefined { name, parameters })
    }

    /// `NULL` or `NOT NULL`, if present.
    pub(crate) fn parse_nullability(&mut self) -> Option<Nullability> {
        if self.eat_keyword(Keyword::Null) {
            Some(Nullability::Null)
        } else if self.check_keyword(Keyword::Not) && self.peek_keyword(Keyword::Null) {
            self.advance();
            self.advance();
            Some(Nullability::NotNull)
        } else {
            None
        }
    }

    fn finish_sql_type(&mut self, kind: SqlDataTypeKind) -> PResult<DataType> {
        let parameters = self.parse_type_parameters()?;
        Ok(DataType::Sql { kind, parameters })
    }

    /// `[( param [, param ...] )]` where a parameter is a number or `MAX`.
    fn parse_type_parameters(&mut self) -> PResult<Vec<Literal>> {
        if !self.check(TokenKind::LeftParen) {
            return Ok(Vec::new());
        }
        self.parenthesized(|p| {
            p.comma_separated(|p| match p.kind() {
                TokenKind::Integer => Ok(Literal::Integer(p.advance().literal)),
                TokenKind::Numeric => Ok(Literal::Numeric(p.advance().literal)),
                TokenKind::Minus if p.peek().kind == TokenKind::Integer => {
                    p.advance();
                    Ok(Literal::Integer(format!("-{}", p.advance().literal)))
                }
                TokenKind::Identifier if p.is_word("MAX") => {
                    p.advance();
                    Ok(Literal::Max)
                }
                _ => Err(p.error_here("type parameter")),
            })
        })
    }

    /// `XML [( [CONTENT | DOCUMENT] schema_collection )]`, after `XML`.
    fn parse_xml_type(&mut self) -> PResult<DataType> {
        if !self.check(TokenKind::LeftParen) {
            return Ok(DataType::Xml {
                content: XmlContentKind::NotSpecified,
                schema_collection: None,
            });
        }
        self.parenthesized(|p| {
            let content = if p.eat_word("CONTENT") {
                XmlContentKind::Content
            } else if p.eat_word("DOCUMENT") {
                XmlContentKind::Document
            } else {
                XmlContentKind::NotSpecified
            };
            let schema_collection = Some(p.parse_schema_object_name()?);
            Ok(DataType::Xml {
                content,
                schema_collection,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn data_type(sql: &str) -> DataType {
        let tokens = Lexer::new(sql).tokenize().unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        let dt = p.parse_data_type().unwrap();
        assert!(p.at_eof(), "trailing input after {sql}");
        dt
    }

    #[test]
    fn built_in_types_with_parameters() {
        let dt = data_type("nvarchar(max)");
        assert_eq!(dt.sql_kind(), Some(SqlDataTypeKind::NVarChar));
        assert_eq!(dt.length(), Some(&Literal::Max));
        assert_eq!(data_type("DECIMAL(18, 4)").parameters().len(), 2);
        assert_eq!(data_type("[int]").sql_kind(), Some(SqlDataTypeKind::Int));
    }

    #[test]
    fn multi_word_spellings() {
        assert_eq!(
            data_type("DOUBLE PRECISION").sql_kind(),
            Some(SqlDataTypeKind::Float)
        );
        assert_eq!(
            data_type("CHAR VARYING(20)").sql_kind(),
            Some(SqlDataTypeKind::VarChar)
        );
        assert_eq!(
            data_type("NATIONAL CHARACTER VARYING(10)").sql_kind(),
            Some(SqlDataTypeKind::NVarChar)
        );
    }

    #[test]
    fn user_defined_and_xml() {
        let DataType::UserDefined { name, .. } = data_type("dbo.Phone") else {
            panic!("expected user-defined type");
        };
        assert_eq!(name.schema_name(), Some("dbo"));
        assert!(matches!(
            data_type("sysname"),
            DataType::UserDefined { .. }
        ));
        assert_eq!(
            data_type("XML(DOCUMENT dbo.Orders)"),
            DataType::Xml {
                content: XmlContentKind::Document,
                schema_collection: Some(crate::ast::SchemaObjectName::from_parts(vec![
                    crate::ast::Identifier::new("dbo"),
                    crate::ast::Identifier::new("Orders"),
                ])),
            }
        );
    }

    #[test]
    fn bad_parameter_is_an_error() {
        let tokens = Lexer::new("VARCHAR(x)").tokenize().unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        assert!(p.parse_data_type().is_err());
    }
}
