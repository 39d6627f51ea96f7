//! Search conditions: predicates joined by `NOT`, `AND` and `OR`.
//!
//! A parenthesized group may hold either a search condition or a scalar
//! operand, so operands are parsed as [`Operand`] and only forced into a
//! boolean once the context demands one.

use super::cursor::Parser;
use super::error::PResult;
use super::pratt::{
    boolean_binding_power, token_to_boolean_op, token_to_comparison_op, NOT_BINDING_POWER,
};
use crate::ast::{
    BooleanExpression, ColumnReference, ColumnType, FullTextFunction, ScalarExpression,
    SubqueryQuantifier,
};
use crate::lexer::{Keyword, TokenKind};

/// A parsed operand that is either already boolean or still scalar.
enum Operand {
    Boolean(BooleanExpression),
    Scalar(ScalarExpression),
}

impl Operand {
    fn into_boolean(self) -> BooleanExpression {
        match self {
            Self::Boolean(b) => b,
            Self::Scalar(s) => BooleanExpression::Scalar(s),
        }
    }
}

impl Parser {
    /// Parses a search condition. `AND` binds tighter than `OR`; both are
    /// left associative.
    pub(crate) fn parse_boolean_expression(&mut self) -> PResult<BooleanExpression> {
        Ok(self.parse_operand_bp(0)?.into_boolean())
    }

    fn parse_operand_bp(&mut self, min_bp: u8) -> PResult<Operand> {
        self.nested(|p| {
            let mut lhs = if p.eat_keyword(Keyword::Not) {
                let inner = p.parse_operand_bp(NOT_BINDING_POWER)?.into_boolean();
                Operand::Boolean(BooleanExpression::Not(Box::new(inner)))
            } else {
                p.parse_predicate()?
            };
            loop {
                let kind = p.kind();
                let (Some((left_bp, right_bp)), Some(op)) =
                    (boolean_binding_power(&kind), token_to_boolean_op(&kind))
                else {
                    break;
                };
                if left_bp < min_bp {
                    break;
                }
                p.advance();
                let rhs = p.parse_operand_bp(right_bp)?.into_boolean();
                lhs = Operand::Boolean(BooleanExpression::binary(lhs.into_boolean(), op, rhs));
            }
            Ok(lhs)
        })
    }

    fn parse_predicate(&mut self) -> PResult<Operand> {
        if self.check_keyword(Keyword::Exists) {
            self.advance();
            let query = self.parenthesized(Self::parse_query_expression)?;
            return Ok(Operand::Boolean(BooleanExpression::Exists(Box::new(query))));
        }
        if (self.check_keyword(Keyword::Contains) || self.check_keyword(Keyword::FreeText))
            && self.peek().kind == TokenKind::LeftParen
        {
            return Ok(Operand::Boolean(self.parse_full_text_predicate()?));
        }

        let lhs = if self.check(TokenKind::LeftParen) && !self.peek_keyword(Keyword::Select) {
            self.advance();
            let inner = self.parse_operand_bp(0)?;
            self.expect(TokenKind::RightParen)?;
            match inner {
                Operand::Boolean(b) => {
                    return Ok(Operand::Boolean(BooleanExpression::Parenthesized(Box::new(b))));
                }
                Operand::Scalar(s) => {
                    self.parse_scalar_infix(ScalarExpression::Parenthesized(Box::new(s)), 0)?
                }
            }
        } else {
            self.parse_scalar_expression()?
        };
        self.parse_predicate_tail(lhs)
    }

    /// Parses what may follow a scalar operand: a comparison, `BETWEEN`,
    /// `IN`, `LIKE` or `IS [NOT] ...`. Without one the operand stays scalar.
    fn parse_predicate_tail(&mut self, lhs: ScalarExpression) -> PResult<Operand> {
        if let Some(op) = token_to_comparison_op(&self.kind()) {
            self.advance();
            let quantifier = if self.check_keyword(Keyword::All) {
                Some(SubqueryQuantifier::All)
            } else if self.check_keyword(Keyword::Any) || self.check_keyword(Keyword::Some) {
                Some(SubqueryQuantifier::Any)
            } else {
                None
            };
            if let Some(quantifier) = quantifier {
                self.advance();
                let subquery = self.parenthesized(Self::parse_query_expression)?;
                return Ok(Operand::Boolean(BooleanExpression::SubqueryComparison {
                    op,
                    quantifier,
                    expression: lhs,
                    subquery: Box::new(subquery),
                }));
            }
            let right = self.parse_scalar_expression()?;
            return Ok(Operand::Boolean(BooleanExpression::compare(lhs, op, right)));
        }

        if self.eat_keyword(Keyword::Is) {
            let negated = self.eat_keyword(Keyword::Not);
            if self.eat_keyword(Keyword::Null) {
                return Ok(Operand::Boolean(BooleanExpression::IsNull {
                    expression: lhs,
                    negated,
                }));
            }
            self.expect_keyword(Keyword::Distinct)?;
            self.expect_keyword(Keyword::From)?;
            let right = self.parse_scalar_expression()?;
            return Ok(Operand::Boolean(BooleanExpression::IsDistinctFrom {
                left: lhs,
                right,
                negated,
            }));
        }

        let negated = self.check_keyword(Keyword::Not)
            && (self.peek_keyword(Keyword::Between)
                || self.peek_keyword(Keyword::In)
                || self.peek_keyword(Keyword::Like));
        if negated {
            self.advance();
        }

        if self.eat_keyword(Keyword::Between) {
            let low = self.parse_scalar_expression()?;
            self.expect_keyword(Keyword::And)?;
            let high = self.parse_scalar_expression()?;
            return Ok(Operand::Boolean(BooleanExpression::Between {
                expression: lhs,
                low,
                high,
                negated,
            }));
        }
        if self.eat_keyword(Keyword::In) {
            self.expect(TokenKind::LeftParen)?;
            let (values, subquery) = if self.check_keyword(Keyword::Select) {
                (Vec::new(), Some(Box::new(self.nested(Self::parse_query_expression)?)))
            } else {
                (self.nested(|p| p.comma_separated(Self::parse_scalar_expression))?, None)
            };
            self.expect(TokenKind::RightParen)?;
            return Ok(Operand::Boolean(BooleanExpression::In {
                expression: lhs,
                values,
                subquery,
                negated,
            }));
        }
        if self.eat_keyword(Keyword::Like) {
            let pattern = self.parse_scalar_expression()?;
            let escape = if self.eat_keyword(Keyword::Escape) {
                Some(self.parse_scalar_expression()?)
            } else {
                None
            };
            return Ok(Operand::Boolean(BooleanExpression::Like {
                expression: lhs,
                pattern,
                escape,
                negated,
            }));
        }
        Ok(Operand::Scalar(lhs))
    }

    /// `CONTAINS | FREETEXT ( columns, value [, LANGUAGE term] )`
    fn parse_full_text_predicate(&mut self) -> PResult<BooleanExpression> {
        let function = if self.advance().kind == TokenKind::Keyword(Keyword::Contains) {
            FullTextFunction::Contains
        } else {
            FullTextFunction::FreeText
        };
        self.parenthesized(|p| {
            let columns = if p.check(TokenKind::LeftParen) {
                p.parse_column_list()?
            } else if p.eat(TokenKind::Star) {
                vec![ColumnReference {
                    column_type: ColumnType::Wildcard,
                    ..ColumnReference::default()
                }]
            } else {
                vec![p.parse_column_reference()?]
            };
            p.expect(TokenKind::Comma)?;
            let value = p.parse_scalar_expression()?;
            let language = if p.eat(TokenKind::Comma) {
                p.expect_word("LANGUAGE")?;
                Some(p.parse_scalar_expression()?)
            } else {
                None
            };
            Ok(BooleanExpression::FullText {
                function,
                columns,
                value,
                language,
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BooleanOperator, ComparisonOperator};
    use crate::config::ParserOptions;
    use crate::lexer::Lexer;

    fn cond(sql: &str) -> BooleanExpression {
        let tokens = Lexer::new(sql).tokenize().unwrap();
        let mut p = Parser::new(tokens, ParserOptions::default());
        let b = p.parse_boolean_expression().unwrap();
        assert!(p.at_eof(), "trailing input after {sql}");
        b
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let BooleanExpression::Binary { op, left, right } = cond("a = b AND c OR d") else {
            panic!("expected binary");
        };
        assert_eq!(op, BooleanOperator::Or);
        assert!(matches!(
            *left,
            BooleanExpression::Binary {
                op: BooleanOperator::And,
                ..
            }
        ));
        assert!(matches!(*right, BooleanExpression::Scalar(_)));
    }

    #[test]
    fn not_applies_to_one_predicate() {
        let BooleanExpression::Binary { op, left, .. } = cond("NOT a = 1 AND b = 2") else {
            panic!("expected binary");
        };
        assert_eq!(op, BooleanOperator::And);
        assert!(matches!(*left, BooleanExpression::Not(_)));
    }

    #[test]
    fn parentheses_hold_conditions_or_scalars() {
        assert!(matches!(
            cond("(a = 1 OR b = 2) AND c = 3"),
            BooleanExpression::Binary {
                op: BooleanOperator::And,
                ..
            }
        ));
        let BooleanExpression::Comparison { op, left, .. } = cond("(a + b) * 2 > 10") else {
            panic!("expected comparison");
        };
        assert_eq!(op, ComparisonOperator::GreaterThan);
        assert!(matches!(left, ScalarExpression::Binary { .. }));
    }

    #[test]
    fn negated_predicates() {
        assert!(matches!(
            cond("x NOT BETWEEN 1 AND 5"),
            BooleanExpression::Between { negated: true, .. }
        ));
        assert!(matches!(
            cond("x NOT IN (1, 2, 3)"),
            BooleanExpression::In { negated: true, ref values, .. } if values.len() == 3
        ));
        assert!(matches!(
            cond("name NOT LIKE 'a%' ESCAPE '!'"),
            BooleanExpression::Like {
                negated: true,
                escape: Some(_),
                ..
            }
        ));
        assert!(matches!(
            cond("x IS NOT NULL"),
            BooleanExpression::IsNull { negated: true, .. }
        ));
        assert!(matches!(
            cond("x IS DISTINCT FROM y"),
            BooleanExpression::IsDistinctFrom { negated: false, .. }
        ));
    }

    #[test]
    fn subquery_predicates() {
        assert!(matches!(
            cond("EXISTS (SELECT 1 FROM t)"),
            BooleanExpression::Exists(_)
        ));
        assert!(matches!(
            cond("x IN (SELECT id FROM t)"),
            BooleanExpression::In {
                subquery: Some(_),
                ..
            }
        ));
        assert!(matches!(
            cond("x > ALL (SELECT id FROM t)"),
            BooleanExpression::SubqueryComparison {
                quantifier: SubqueryQuantifier::All,
                ..
            }
        ));
        assert!(matches!(
            cond("(SELECT COUNT(*) FROM t) > 0"),
            BooleanExpression::Comparison { .. }
        ));
    }

    #[test]
    fn full_text_predicates() {
        let BooleanExpression::FullText {
            function, columns, ..
        } = cond("CONTAINS((title, body), 'rust')")
        else {
            panic!("expected full-text predicate");
        };
        assert_eq!(function, FullTextFunction::Contains);
        assert_eq!(columns.len(), 2);
        assert!(matches!(
            cond("FREETEXT(*, 'x', LANGUAGE 1033)"),
            BooleanExpression::FullText {
                language: Some(_),
                ..
            }
        ));
    }
}
