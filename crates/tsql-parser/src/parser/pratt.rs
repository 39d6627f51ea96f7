//! Pratt binding powers for scalar and boolean operators.

use crate::ast::{
    AssignmentKind, BinaryOperator, BooleanOperator, ComparisonOperator, UnaryOperator,
};
use crate::lexer::{Keyword, TokenKind};

/// Binding power of prefix operators; tighter than any binary operator.
pub const PREFIX_BINDING_POWER: u8 = 5;

/// Binding power of `NOT`, which binds tighter than `AND` and `OR`.
pub const NOT_BINDING_POWER: u8 = 5;

/// Returns the prefix binding power for a token.
///
/// Returns `None` if the token is not a prefix operator.
#[must_use]
pub const fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Plus | TokenKind::Minus | TokenKind::BitNot => Some(PREFIX_BINDING_POWER),
        _ => None,
    }
}

/// Returns the infix binding power for a scalar operator.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not a scalar infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Additive, string concatenation and the bitwise operators share a level
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::BitAnd
        | TokenKind::BitOr
        | TokenKind::BitXor => Some((1, 2)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((3, 4)),

        _ => None,
    }
}

/// Returns the binding power for `AND` / `OR`.
#[must_use]
pub const fn boolean_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Keyword(Keyword::Or) => Some((1, 2)),
        TokenKind::Keyword(Keyword::And) => Some((3, 4)),
        _ => None,
    }
}

/// Converts a token to a binary operator.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        TokenKind::Star => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::Percent => Some(BinaryOperator::Modulo),
        TokenKind::BitAnd => Some(BinaryOperator::BitwiseAnd),
        TokenKind::BitOr => Some(BinaryOperator::BitwiseOr),
        TokenKind::BitXor => Some(BinaryOperator::BitwiseXor),
        _ => None,
    }
}

/// Converts a token to a unary operator.
#[must_use]
pub const fn token_to_unary_op(kind: &TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Plus => Some(UnaryOperator::Positive),
        TokenKind::Minus => Some(UnaryOperator::Negative),
        TokenKind::BitNot => Some(UnaryOperator::BitwiseNot),
        _ => None,
    }
}

/// Converts a token to a comparison operator.
#[must_use]
pub const fn token_to_comparison_op(kind: &TokenKind) -> Option<ComparisonOperator> {
    match kind {
        TokenKind::Eq => Some(ComparisonOperator::Equals),
        TokenKind::NotEq => Some(ComparisonOperator::NotEquals),
        TokenKind::Lt => Some(ComparisonOperator::LessThan),
        TokenKind::LtEq => Some(ComparisonOperator::LessThanOrEqual),
        TokenKind::Gt => Some(ComparisonOperator::GreaterThan),
        TokenKind::GtEq => Some(ComparisonOperator::GreaterThanOrEqual),
        TokenKind::NotLt => Some(ComparisonOperator::NotLessThan),
        TokenKind::NotGt => Some(ComparisonOperator::NotGreaterThan),
        _ => None,
    }
}

/// Converts a token to a boolean connective.
#[must_use]
pub const fn token_to_boolean_op(kind: &TokenKind) -> Option<BooleanOperator> {
    match kind {
        TokenKind::Keyword(Keyword::And) => Some(BooleanOperator::And),
        TokenKind::Keyword(Keyword::Or) => Some(BooleanOperator::Or),
        _ => None,
    }
}

/// Converts `=` or a compound assignment token to its assignment kind.
#[must_use]
pub const fn token_to_assignment(kind: &TokenKind) -> Option<AssignmentKind> {
    match kind {
        TokenKind::Eq => Some(AssignmentKind::Equals),
        TokenKind::PlusEq => Some(AssignmentKind::AddEquals),
        TokenKind::MinusEq => Some(AssignmentKind::SubtractEquals),
        TokenKind::StarEq => Some(AssignmentKind::MultiplyEquals),
        TokenKind::SlashEq => Some(AssignmentKind::DivideEquals),
        TokenKind::PercentEq => Some(AssignmentKind::ModEquals),
        TokenKind::AndEq => Some(AssignmentKind::BitwiseAndEquals),
        TokenKind::OrEq => Some(AssignmentKind::BitwiseOrEquals),
        TokenKind::XorEq => Some(AssignmentKind::BitwiseXorEquals),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        // Multiplication should bind tighter than addition
        let add_bp = infix_binding_power(&TokenKind::Plus).unwrap();
        let mul_bp = infix_binding_power(&TokenKind::Star).unwrap();
        assert!(mul_bp.0 > add_bp.0);

        // Bitwise operators sit with addition
        assert_eq!(infix_binding_power(&TokenKind::BitXor), Some(add_bp));

        // AND should bind tighter than OR
        let and_bp = boolean_binding_power(&TokenKind::Keyword(Keyword::And)).unwrap();
        let or_bp = boolean_binding_power(&TokenKind::Keyword(Keyword::Or)).unwrap();
        assert!(and_bp.0 > or_bp.0);
        assert!(NOT_BINDING_POWER > and_bp.1);

        // Unary binds tighter than any binary operator
        assert!(prefix_binding_power(&TokenKind::Minus).unwrap() > mul_bp.1);
    }

    #[test]
    fn test_left_associativity() {
        for kind in [TokenKind::Plus, TokenKind::Star, TokenKind::BitOr] {
            let (left, right) = infix_binding_power(&kind).unwrap();
            assert!(left < right);
        }
    }

    #[test]
    fn test_token_to_binary_op() {
        assert_eq!(token_to_binary_op(&TokenKind::Plus), Some(BinaryOperator::Add));
        assert_eq!(token_to_binary_op(&TokenKind::Minus), Some(BinaryOperator::Subtract));
        assert_eq!(token_to_binary_op(&TokenKind::Eq), None);
        assert_eq!(token_to_binary_op(&TokenKind::LeftParen), None);
    }

    #[test]
    fn test_token_to_unary_op() {
        assert_eq!(token_to_unary_op(&TokenKind::Minus), Some(UnaryOperator::Negative));
        assert_eq!(token_to_unary_op(&TokenKind::BitNot), Some(UnaryOperator::BitwiseNot));
        assert_eq!(token_to_unary_op(&TokenKind::Star), None);
    }

    #[test]
    fn test_comparison_and_assignment_tokens() {
        assert_eq!(
            token_to_comparison_op(&TokenKind::NotLt),
            Some(ComparisonOperator::NotLessThan)
        );
        assert_eq!(token_to_comparison_op(&TokenKind::PlusEq), None);
        assert_eq!(
            token_to_assignment(&TokenKind::XorEq),
            Some(AssignmentKind::BitwiseXorEquals)
        );
        assert_eq!(token_to_assignment(&TokenKind::NotEq), None);
    }
}
