//! Scalar and boolean expression AST types.

use serde::Serialize;

use super::{
    DataType, Identifier, MultiPartIdentifier, OrderByClause, QueryExpression, SchemaObjectName,
};

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Literal {
    /// Integer literal, verbatim.
    Integer(String),
    /// Decimal literal, verbatim.
    Numeric(String),
    /// Literal with an exponent, verbatim.
    Real(String),
    /// Money literal including the `$`.
    Money(String),
    /// String literal with quotes removed and `''` unescaped.
    String {
        /// The unescaped text.
        value: String,
        /// True for `N'...'`.
        national: bool,
    },
    /// `0x...` literal, verbatim.
    Binary(String),
    /// `NULL`.
    Null,
    /// `DEFAULT`.
    Default,
    /// `MAX`, as in `VARCHAR(MAX)`.
    Max,
    /// A bare word used where a value is expected, e.g. `ON` in an option.
    Identifier(Identifier),
}

impl Literal {
    /// Creates a non-national string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
            national: false,
        }
    }

    /// Returns the integer text if this is an integer literal.
    #[must_use]
    pub fn as_integer(&self) -> Option<&str> {
        match self {
            Self::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the string contents if this is a string literal.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Arithmetic and bitwise binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOperator {
    /// `+`, also string concatenation.
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
}

impl BinaryOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::BitwiseAnd => "&",
            Self::BitwiseOr => "|",
            Self::BitwiseXor => "^",
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOperator {
    /// `+`
    Positive,
    /// `-`
    Negative,
    /// `~`
    BitwiseNot,
}

impl UnaryOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
            Self::BitwiseNot => "~",
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComparisonOperator {
    /// `=`
    Equals,
    /// `<>` or `!=`
    NotEquals,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `!<`
    NotLessThan,
    /// `!>`
    NotGreaterThan,
}

impl ComparisonOperator {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::NotLessThan => "!<",
            Self::NotGreaterThan => "!>",
        }
    }
}

/// `AND` / `OR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BooleanOperator {
    /// `AND`
    And,
    /// `OR`
    Or,
}

/// `ALL` / `ANY` / `SOME` in a subquery comparison. `SOME` is folded into `Any`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubqueryQuantifier {
    /// `ALL`
    All,
    /// `ANY` or `SOME`
    Any,
}

/// What a column reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ColumnType {
    /// An ordinary column.
    #[default]
    Regular,
    /// `*` or `t.*`.
    Wildcard,
    /// `$IDENTITY` or `IDENTITYCOL`.
    IdentityCol,
    /// `$ROWGUID` or `ROWGUIDCOL`.
    RowGuidCol,
    /// `$action` and similar pseudo columns.
    PseudoColumn,
}

/// A reference to a column by a possibly qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ColumnReference {
    /// The qualified name. Empty for a bare `*`.
    pub identifier: MultiPartIdentifier,
    /// What kind of column this is.
    pub column_type: ColumnType,
}

impl ColumnReference {
    /// Creates a regular column reference from dotted parts.
    #[must_use]
    pub fn new(identifier: MultiPartIdentifier) -> Self {
        Self {
            identifier,
            column_type: ColumnType::Regular,
        }
    }

    /// Returns the final name part, or an empty string.
    #[must_use]
    pub fn column_name(&self) -> &str {
        self.identifier.last().map_or("", |id| id.value.as_str())
    }
}

/// `ALL` / `DISTINCT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UniqueRowFilter {
    /// `ALL`
    All,
    /// `DISTINCT`
    Distinct,
}

/// A function invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FunctionCall {
    /// Qualifier before the function name, e.g. `dbo` in `dbo.fn(1)`.
    pub call_target: Option<MultiPartIdentifier>,
    /// The function name.
    pub name: Identifier,
    /// Arguments. `COUNT(*)` carries a wildcard column reference.
    pub parameters: Vec<ScalarExpression>,
    /// `DISTINCT` / `ALL` inside the argument list.
    pub unique_row_filter: Option<UniqueRowFilter>,
    /// `WITHIN GROUP (ORDER BY ...)`.
    pub within_group: Option<OrderByClause>,
    /// `OVER (...)`.
    pub over: Option<OverClause>,
}

/// `OVER ([PARTITION BY ...] [ORDER BY ...] [frame])`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OverClause {
    /// Partition expressions.
    pub partitions: Vec<ScalarExpression>,
    /// Window ordering.
    pub order_by: Option<OrderByClause>,
    /// `ROWS` / `RANGE` frame.
    pub window_frame: Option<WindowFrame>,
}

/// `ROWS` or `RANGE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WindowFrameKind {
    /// `ROWS`
    #[default]
    Rows,
    /// `RANGE`
    Range,
}

/// A window frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WindowFrame {
    /// `ROWS` or `RANGE`.
    pub kind: WindowFrameKind,
    /// Start bound, or the only bound.
    pub top: WindowDelimiter,
    /// End bound for `BETWEEN ... AND ...`.
    pub bottom: Option<WindowDelimiter>,
}

/// A window frame bound.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum WindowDelimiter {
    /// `UNBOUNDED PRECEDING`
    UnboundedPreceding,
    /// `n PRECEDING`
    ValuePreceding(ScalarExpression),
    /// `CURRENT ROW`
    #[default]
    CurrentRow,
    /// `n FOLLOWING`
    ValueFollowing(ScalarExpression),
    /// `UNBOUNDED FOLLOWING`
    UnboundedFollowing,
}

/// `CASE input WHEN value THEN result ... END`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SimpleCaseExpression {
    /// The value being switched on.
    pub input: ScalarExpression,
    /// `WHEN value THEN result` pairs.
    pub when_clauses: Vec<SimpleWhenClause>,
    /// `ELSE` result.
    pub else_expression: Option<ScalarExpression>,
}

/// One arm of a simple `CASE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SimpleWhenClause {
    /// The compared value.
    pub when: ScalarExpression,
    /// The result.
    pub then: ScalarExpression,
}

/// `CASE WHEN condition THEN result ... END`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchedCaseExpression {
    /// `WHEN condition THEN result` pairs.
    pub when_clauses: Vec<SearchedWhenClause>,
    /// `ELSE` result.
    pub else_expression: Option<ScalarExpression>,
}

/// One arm of a searched `CASE`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchedWhenClause {
    /// The condition.
    pub when: BooleanExpression,
    /// The result.
    pub then: ScalarExpression,
}

/// `CAST(expr AS type)` / `TRY_CAST(...)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CastExpression {
    /// The converted value.
    pub expression: ScalarExpression,
    /// The target type.
    pub data_type: DataType,
    /// True for `TRY_CAST`.
    pub is_try: bool,
}

/// `CONVERT(type, expr [, style])` / `TRY_CONVERT(...)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConvertExpression {
    /// The target type.
    pub data_type: DataType,
    /// The converted value.
    pub expression: ScalarExpression,
    /// Optional style code.
    pub style: Option<ScalarExpression>,
    /// True for `TRY_CONVERT`.
    pub is_try: bool,
}

/// `PARSE(expr AS type [USING culture])` / `TRY_PARSE(...)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ParseExpression {
    /// The string being parsed.
    pub string_value: ScalarExpression,
    /// The target type.
    pub data_type: DataType,
    /// `USING` culture.
    pub culture: Option<ScalarExpression>,
    /// True for `TRY_PARSE`.
    pub is_try: bool,
}

/// `IIF(condition, then, else)`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct IifExpression {
    /// The condition.
    pub predicate: BooleanExpression,
    /// Value when true.
    pub then_expression: ScalarExpression,
    /// Value otherwise.
    pub else_expression: ScalarExpression,
}

/// Built-ins called without parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParameterlessCall {
    /// `CURRENT_TIMESTAMP`
    CurrentTimestamp,
    /// `CURRENT_DATE`
    CurrentDate,
    /// `CURRENT_TIME`
    CurrentTime,
    /// `CURRENT_USER`
    CurrentUser,
    /// `SESSION_USER`
    SessionUser,
    /// `SYSTEM_USER`
    SystemUser,
    /// `USER`
    User,
}

/// A scalar-valued expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScalarExpression {
    /// A literal value.
    Literal(Literal),
    /// A column reference.
    ColumnReference(ColumnReference),
    /// A `@local` variable, including the `@`.
    Variable(String),
    /// A `@@global` variable, including the `@@`.
    GlobalVariable(String),
    /// Unary operation.
    Unary {
        /// The operator.
        op: UnaryOperator,
        /// The operand.
        expression: Box<ScalarExpression>,
    },
    /// Binary arithmetic or bitwise operation.
    Binary {
        /// The operator.
        op: BinaryOperator,
        /// Left operand.
        left: Box<ScalarExpression>,
        /// Right operand.
        right: Box<ScalarExpression>,
    },
    /// Function call.
    FunctionCall(Box<FunctionCall>),
    /// Parameterless built-in such as `CURRENT_TIMESTAMP`.
    ParameterlessCall(ParameterlessCall),
    /// Simple `CASE`.
    SimpleCase(Box<SimpleCaseExpression>),
    /// Searched `CASE`.
    SearchedCase(Box<SearchedCaseExpression>),
    /// `CAST` / `TRY_CAST`.
    Cast(Box<CastExpression>),
    /// `CONVERT` / `TRY_CONVERT`.
    Convert(Box<ConvertExpression>),
    /// `PARSE` / `TRY_PARSE`.
    Parse(Box<ParseExpression>),
    /// `IIF(...)`.
    Iif(Box<IifExpression>),
    /// `COALESCE(...)`.
    Coalesce(Vec<ScalarExpression>),
    /// `NULLIF(a, b)`.
    NullIf {
        /// First argument.
        first: Box<ScalarExpression>,
        /// Second argument.
        second: Box<ScalarExpression>,
    },
    /// `(expr)`.
    Parenthesized(Box<ScalarExpression>),
    /// `(SELECT ...)` used as a value.
    Subquery(Box<QueryExpression>),
    /// `expr COLLATE name`.
    Collate {
        /// The collated expression.
        expression: Box<ScalarExpression>,
        /// The collation name.
        collation: Identifier,
    },
    /// `expr AT TIME ZONE zone`.
    AtTimeZone {
        /// The converted value.
        expression: Box<ScalarExpression>,
        /// The target zone.
        time_zone: Box<ScalarExpression>,
    },
    /// `NEXT VALUE FOR sequence [OVER (...)]`.
    NextValueFor {
        /// The sequence.
        sequence: SchemaObjectName,
        /// Optional ordering.
        over: Option<Box<OverClause>>,
    },
}

impl Default for ScalarExpression {
    fn default() -> Self {
        Self::Literal(Literal::Null)
    }
}

impl ScalarExpression {
    /// Creates an integer literal expression.
    #[must_use]
    pub fn integer(value: impl Into<String>) -> Self {
        Self::Literal(Literal::Integer(value.into()))
    }

    /// Creates a string literal expression.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::string(value))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(left: Self, op: BinaryOperator, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Returns the literal if this is a literal expression.
    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Self::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Returns true for a column reference or variable, the forms that may be
    /// assigned to.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        matches!(self, Self::ColumnReference(_) | Self::Variable(_))
    }
}

/// `CONTAINS` or `FREETEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FullTextFunction {
    /// `CONTAINS`
    Contains,
    /// `FREETEXT`
    FreeText,
}

/// A boolean-valued expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BooleanExpression {
    /// `left op right`.
    Comparison {
        /// The operator.
        op: ComparisonOperator,
        /// Left side.
        left: ScalarExpression,
        /// Right side.
        right: ScalarExpression,
    },
    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        /// The tested value.
        expression: ScalarExpression,
        /// Lower bound.
        low: ScalarExpression,
        /// Upper bound.
        high: ScalarExpression,
        /// True for `NOT BETWEEN`.
        negated: bool,
    },
    /// `expr [NOT] IN (values)` or `expr [NOT] IN (subquery)`.
    In {
        /// The tested value.
        expression: ScalarExpression,
        /// Value list; empty when a subquery is given.
        values: Vec<ScalarExpression>,
        /// The subquery form.
        subquery: Option<Box<QueryExpression>>,
        /// True for `NOT IN`.
        negated: bool,
    },
    /// `expr [NOT] LIKE pattern [ESCAPE esc]`.
    Like {
        /// The tested value.
        expression: ScalarExpression,
        /// The pattern.
        pattern: ScalarExpression,
        /// Escape character.
        escape: Option<ScalarExpression>,
        /// True for `NOT LIKE`.
        negated: bool,
    },
    /// `expr IS [NOT] NULL`.
    IsNull {
        /// The tested value.
        expression: ScalarExpression,
        /// True for `IS NOT NULL`.
        negated: bool,
    },
    /// `left IS [NOT] DISTINCT FROM right`.
    IsDistinctFrom {
        /// Left side.
        left: ScalarExpression,
        /// Right side.
        right: ScalarExpression,
        /// True for `IS NOT DISTINCT FROM`.
        negated: bool,
    },
    /// `expr op ALL|ANY|SOME (subquery)`.
    SubqueryComparison {
        /// The operator.
        op: ComparisonOperator,
        /// The quantifier.
        quantifier: SubqueryQuantifier,
        /// Left side.
        expression: ScalarExpression,
        /// The subquery.
        subquery: Box<QueryExpression>,
    },
    /// `EXISTS (subquery)`.
    Exists(Box<QueryExpression>),
    /// `CONTAINS(...)` / `FREETEXT(...)`.
    FullText {
        /// Which predicate.
        function: FullTextFunction,
        /// Searched columns; a single wildcard for `*`.
        columns: Vec<ColumnReference>,
        /// Search condition.
        value: ScalarExpression,
        /// Optional `LANGUAGE` term.
        language: Option<ScalarExpression>,
    },
    /// `NOT expr`.
    Not(Box<BooleanExpression>),
    /// `left AND|OR right`.
    Binary {
        /// The operator.
        op: BooleanOperator,
        /// Left operand.
        left: Box<BooleanExpression>,
        /// Right operand.
        right: Box<BooleanExpression>,
    },
    /// `(condition)`.
    Parenthesized(Box<BooleanExpression>),
    /// A scalar operand used as a truth value, kept as-is.
    Scalar(ScalarExpression),
}

impl Default for BooleanExpression {
    fn default() -> Self {
        Self::Scalar(ScalarExpression::default())
    }
}

impl BooleanExpression {
    /// Creates a comparison.
    #[must_use]
    pub fn compare(
        left: ScalarExpression,
        op: ComparisonOperator,
        right: ScalarExpression,
    ) -> Self {
        Self::Comparison { op, left, right }
    }

    /// Joins two conditions with `AND` or `OR`.
    #[must_use]
    pub fn binary(left: Self, op: BooleanOperator, right: Self) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_text() {
        assert_eq!(BinaryOperator::BitwiseXor.as_str(), "^");
        assert_eq!(UnaryOperator::BitwiseNot.as_str(), "~");
        assert_eq!(ComparisonOperator::NotGreaterThan.as_str(), "!>");
    }

    #[test]
    fn literal_accessors() {
        assert_eq!(Literal::Integer("7".into()).as_integer(), Some("7"));
        assert_eq!(Literal::string("x").as_string(), Some("x"));
        assert_eq!(Literal::Null.as_string(), None);
    }

    #[test]
    fn assignable_forms() {
        assert!(ScalarExpression::Variable("@v".into()).is_assignable());
        assert!(ScalarExpression::ColumnReference(ColumnReference::default()).is_assignable());
        assert!(!ScalarExpression::integer("1").is_assignable());
    }

    #[test]
    fn column_name_is_last_part() {
        let col = ColumnReference::new(MultiPartIdentifier::new(vec![
            Identifier::new("t"),
            Identifier::new("c"),
        ]));
        assert_eq!(col.column_name(), "c");
    }
}
