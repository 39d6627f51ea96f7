//! `OPTION (...)` query hints and `WITH (...)` table hints.

use super::cursor::Parser;
use super::error::PResult;
use crate::ast::{option_kind_from_name, OptimizerHint, TableHint, VariableValuePair};
use crate::lexer::{Keyword, TokenKind};

/// Hints that take a bare number, as in `MAXDOP 4`.
const VALUED_HINTS: &[&str] = &["MAXDOP", "MAXRECURSION", "FAST", "QUERYTRACEON"];

impl Parser {
    /// `[OPTION ( hint [, hint ...] )]`
    pub(crate) fn parse_option_clause(&mut self) -> PResult<Vec<OptimizerHint>> {
        if !(self.check_keyword(Keyword::Option) && self.peek().kind == TokenKind::LeftParen) {
            return Ok(Vec::new());
        }
        self.advance();
        self.parenthesized(|p| p.comma_separated(Self::parse_optimizer_hint))
    }

    fn parse_optimizer_hint(&mut self) -> PResult<OptimizerHint> {
        if self.is_word("OPTIMIZE") && self.peek_keyword(Keyword::For) {
            self.advance();
            self.advance();
            if self.eat_word("UNKNOWN") {
                return Ok(OptimizerHint::OptimizeFor {
                    pairs: Vec::new(),
                    unknown: true,
                });
            }
            let pairs = self.parenthesized(|p| {
                p.comma_separated(|p| {
                    let variable = p.expect(TokenKind::Variable)?.literal;
                    let value = if p.eat_word("UNKNOWN") {
                        None
                    } else {
                        p.expect(TokenKind::Eq)?;
                        Some(p.parse_scalar_expression()?)
                    };
                    Ok(VariableValuePair { variable, value })
                })
            })?;
            return Ok(OptimizerHint::OptimizeFor {
                pairs,
                unknown: false,
            });
        }
        if self.check_keyword(Keyword::Use) && self.peek_is_word("HINT") {
            self.advance();
            self.advance();
            let names = self.parenthesized_list(Self::parse_scalar_expression)?;
            return Ok(OptimizerHint::UseHint(names));
        }
        if self.check_keyword(Keyword::Use) && self.peek_keyword(Keyword::Plan) {
            self.advance();
            self.advance();
            return Ok(OptimizerHint::UsePlan(self.parse_scalar_expression()?));
        }
        if self.check_keyword(Keyword::Table) && self.peek_is_word("HINT") {
            self.advance();
            self.advance();
            return self.parenthesized(|p| {
                let object = p.parse_schema_object_name()?;
                let mut hints = Vec::new();
                while p.eat(TokenKind::Comma) {
                    hints.push(p.parse_table_hint()?);
                }
                Ok(OptimizerHint::TableHints { object, hints })
            });
        }

        let first = self.expect_any_word()?;
        if self.eat(TokenKind::Eq) {
            return Ok(OptimizerHint::Literal {
                option_kind: option_kind_from_name(&first),
                value: self.parse_scalar_expression()?,
            });
        }
        if VALUED_HINTS.contains(&first.as_str()) {
            return Ok(OptimizerHint::Literal {
                option_kind: option_kind_from_name(&first),
                value: self.parse_scalar_expression()?,
            });
        }
        let mut words = vec![first];
        while self.at_word() {
            words.push(self.advance().literal.to_ascii_uppercase());
        }
        Ok(OptimizerHint::Simple {
            option_kind: option_kind_from_name(&words.join("_")),
        })
    }

    /// `WITH ( hint [[,] hint ...] )` after a table reference.
    pub(crate) fn parse_with_table_hints(&mut self) -> PResult<Vec<TableHint>> {
        self.expect_keyword(Keyword::With)?;
        self.parenthesized(|p| {
            let mut hints = vec![p.parse_table_hint()?];
            loop {
                p.eat(TokenKind::Comma);
                if p.check(TokenKind::RightParen) || p.at_eof() {
                    return Ok(hints);
                }
                hints.push(p.parse_table_hint()?);
            }
        })
    }

    pub(crate) fn parse_table_hint(&mut self) -> PResult<TableHint> {
        if self.eat_keyword(Keyword::Index) {
            let values = if self.eat(TokenKind::Eq) {
                vec![self.parse_identifier_or_value()?]
            } else {
                self.parenthesized_list(Self::parse_identifier_or_value)?
            };
            return Ok(TableHint::Index { values });
        }
        if self.eat_word("FORCESEEK") {
            if !self.check(TokenKind::LeftParen) {
                return Ok(TableHint::ForceSeek {
                    index: None,
                    columns: Vec::new(),
                });
            }
            return self.parenthesized(|p| {
                let index = Some(p.parse_identifier_or_value()?);
                let columns = if p.check(TokenKind::LeftParen) {
                    p.parse_identifier_list()?
                } else {
                    Vec::new()
                };
                Ok(TableHint::ForceSeek { index, columns })
            });
        }
        let name = self.expect_any_word()?;
        let option_kind = option_kind_from_name(&name);
        if self.eat(TokenKind::Eq) {
            return Ok(TableHint::Literal {
                option_kind,
                value: self.parse_scalar_expression()?,
            });
        }
        Ok(TableHint::Simple { option_kind })
    }
}
