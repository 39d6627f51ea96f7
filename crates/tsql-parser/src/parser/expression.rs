//! Scalar expression parsing.
//!
//! Operands are parsed by [`Parser::parse_primary`]; binary operators are
//! folded by a Pratt loop driven by the tables in [`super::pratt`].

use super::cursor::Parser;
use super::error::PResult;
use super::names::{identifier_from_token, unquote_string};
use super::pratt::{
    infix_binding_power, prefix_binding_power, token_to_binary_op, token_to_unary_op,
    PREFIX_BINDING_POWER,
};
use crate::ast::{
    CastExpression, ColumnReference, ColumnType, ConvertExpression, FunctionCall, Identifier,
    IifExpression, Literal, MultiPartIdentifier, OverClause, ParameterlessCall, ParseExpression,
    ScalarExpression, SearchedCaseExpression, SearchedWhenClause, SimpleCaseExpression,
    SimpleWhenClause, UniqueRowFilter, WindowDelimiter, WindowFrame, WindowFrameKind,
};
use crate::lexer::{Keyword, TokenKind};

/// Reserved words that are also function names when followed by `(`.
const FUNCTION_KEYWORDS: &[Keyword] = &[
    Keyword::Left,
    Keyword::Right,
    Keyword::Identity,
    Keyword::Update,
    Keyword::OpenDataSource,
    Keyword::OpenXml,
    Keyword::ContainsTable,
    Keyword::FreeTextTable,
    Keyword::SemanticKeyPhraseTable,
    Keyword::SemanticSimilarityTable,
    Keyword::SemanticSimilarityDetailsTable,
];

impl Parser {
    /// Parses a full scalar expression.
    pub(crate) fn parse_scalar_expression(&mut self) -> PResult<ScalarExpression> {
        self.parse_scalar_bp(0)
    }

    /// Parses a scalar expression whose operators bind at least `min_bp`.
    pub(crate) fn parse_scalar_bp(&mut self, min_bp: u8) -> PResult<ScalarExpression> {
        self.nested(|p| {
            let lhs = p.parse_scalar_prefix()?;
            p.parse_scalar_infix(lhs, min_bp)
        })
    }

    fn parse_scalar_prefix(&mut self) -> PResult<ScalarExpression> {
        let kind = self.kind();
        if let (Some(op), Some(bp)) = (token_to_unary_op(&kind), prefix_binding_power(&kind)) {
            self.advance();
            let expression = self.parse_scalar_bp(bp)?;
            return Ok(ScalarExpression::Unary {
                op,
                expression: Box::new(expression),
            });
        }
        self.parse_primary()
    }

    /// Continues a scalar expression from an already parsed left operand.
    pub(crate) fn parse_scalar_infix(
        &mut self,
        mut lhs: ScalarExpression,
        min_bp: u8,
    ) -> PResult<ScalarExpression> {
        loop {
            if self.eat_keyword(Keyword::Collate) {
                let collation = self.expect_identifier_or_keyword()?;
                lhs = ScalarExpression::Collate {
                    expression: Box::new(lhs),
                    collation,
                };
                continue;
            }
            if self.is_word("AT") && self.peek_is_word("TIME") {
                self.advance();
                self.advance();
                self.expect_word("ZONE")?;
                let time_zone = self.parse_scalar_bp(PREFIX_BINDING_POWER)?;
                lhs = ScalarExpression::AtTimeZone {
                    expression: Box::new(lhs),
                    time_zone: Box::new(time_zone),
                };
                continue;
            }

            let kind = self.kind();
            let (Some((left_bp, right_bp)), Some(op)) =
                (infix_binding_power(&kind), token_to_binary_op(&kind))
            else {
                break;
            };
            if left_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_scalar_bp(right_bp)?;
            lhs = ScalarExpression::binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    /// True if the current token can begin a scalar expression.
    pub(crate) fn can_start_expression(&self) -> bool {
        match self.kind() {
            TokenKind::Integer
            | TokenKind::Numeric
            | TokenKind::Real
            | TokenKind::Money
            | TokenKind::String
            | TokenKind::NationalString
            | TokenKind::Binary
            | TokenKind::Variable
            | TokenKind::LeftParen
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::BitNot
            | TokenKind::QuotedIdentifier
            | TokenKind::BracketedIdentifier => true,
            TokenKind::Identifier => {
                !self.at_statement_end() && self.peek().kind != TokenKind::Colon
            }
            TokenKind::Keyword(keyword) => matches!(
                keyword,
                Keyword::Null
                    | Keyword::Default
                    | Keyword::Case
                    | Keyword::Convert
                    | Keyword::TryConvert
                    | Keyword::Coalesce
                    | Keyword::NullIf
                    | Keyword::CurrentTimestamp
                    | Keyword::CurrentDate
                    | Keyword::CurrentTime
                    | Keyword::CurrentUser
                    | Keyword::SessionUser
                    | Keyword::SystemUser
                    | Keyword::User
                    | Keyword::Left
                    | Keyword::Right
                    | Keyword::IdentityCol
                    | Keyword::RowGuidCol
            ),
            _ => false,
        }
    }

    /// Parses a literal, name, call, parenthesized expression or subquery.
    pub(crate) fn parse_primary(&mut self) -> PResult<ScalarExpression> {
        let token = self.current().clone();
        let literal =
            |lit: Literal| -> PResult<ScalarExpression> { Ok(ScalarExpression::Literal(lit)) };
        match token.kind {
            TokenKind::Integer => {
                self.advance();
                literal(Literal::Integer(token.literal))
            }
            TokenKind::Numeric => {
                self.advance();
                literal(Literal::Numeric(token.literal))
            }
            TokenKind::Real => {
                self.advance();
                literal(Literal::Real(token.literal))
            }
            TokenKind::Money => {
                self.advance();
                literal(Literal::Money(token.literal))
            }
            TokenKind::Binary => {
                self.advance();
                literal(Literal::Binary(token.literal))
            }
            TokenKind::String | TokenKind::NationalString => {
                self.advance();
                literal(Literal::String {
                    value: unquote_string(&token.literal),
                    national: token.kind == TokenKind::NationalString,
                })
            }
            TokenKind::Variable => {
                self.advance();
                if token.literal.starts_with("@@") {
                    Ok(ScalarExpression::GlobalVariable(token.literal))
                } else {
                    Ok(ScalarExpression::Variable(token.literal))
                }
            }
            TokenKind::LeftParen => self.parse_parenthesized_scalar(),
            TokenKind::Star => {
                self.advance();
                Ok(ScalarExpression::ColumnReference(ColumnReference {
                    identifier: MultiPartIdentifier::default(),
                    column_type: ColumnType::Wildcard,
                }))
            }
            TokenKind::Keyword(_) if self.at_qualifying_keyword() => self.parse_name_or_call(),
            TokenKind::Keyword(keyword) => self.parse_keyword_primary(keyword),
            TokenKind::Identifier if self.peek().kind == TokenKind::LeftParen => {
                match token.literal.to_ascii_uppercase().as_str() {
                    "CAST" | "TRY_CAST" => self.parse_cast(),
                    "PARSE" | "TRY_PARSE" => self.parse_parse(),
                    "IIF" => self.parse_iif(),
                    _ => self.parse_name_or_call(),
                }
            }
            TokenKind::Identifier if self.is_word("NEXT") && self.peek_is_word("VALUE") => {
                self.parse_next_value_for()
            }
            kind if kind.is_identifier() || kind == TokenKind::Dot => self.parse_name_or_call(),
            _ => Err(self.error_here("expression")),
        }
    }

    fn parse_parenthesized_scalar(&mut self) -> PResult<ScalarExpression> {
        if self.peek_keyword(Keyword::Select) {
            self.advance();
            let query = self.nested(Self::parse_query_expression)?;
            self.expect(TokenKind::RightParen)?;
            return Ok(ScalarExpression::Subquery(Box::new(query)));
        }
        let inner = self.parenthesized(Self::parse_scalar_expression)?;
        Ok(ScalarExpression::Parenthesized(Box::new(inner)))
    }

    fn parse_keyword_primary(&mut self, keyword: Keyword) -> PResult<ScalarExpression> {
        let parameterless = |call: ParameterlessCall| -> PResult<ScalarExpression> {
            Ok(ScalarExpression::ParameterlessCall(call))
        };
        match keyword {
            Keyword::Null => {
                self.advance();
                Ok(ScalarExpression::Literal(Literal::Null))
            }
            Keyword::Default => {
                self.advance();
                Ok(ScalarExpression::Literal(Literal::Default))
            }
            Keyword::Case => self.parse_case(),
            Keyword::Convert | Keyword::TryConvert => self.parse_convert(),
            Keyword::Coalesce => {
                self.advance();
                let values = self.parenthesized_list(Self::parse_scalar_expression)?;
                Ok(ScalarExpression::Coalesce(values))
            }
            Keyword::NullIf => {
                self.advance();
                self.expect(TokenKind::LeftParen)?;
                let first = self.parse_scalar_expression()?;
                self.expect(TokenKind::Comma)?;
                let second = self.parse_scalar_expression()?;
                self.expect(TokenKind::RightParen)?;
                Ok(ScalarExpression::NullIf {
                    first: Box::new(first),
                    second: Box::new(second),
                })
            }
            Keyword::CurrentTimestamp => {
                self.advance();
                parameterless(ParameterlessCall::CurrentTimestamp)
            }
            Keyword::CurrentDate => {
                self.advance();
                parameterless(ParameterlessCall::CurrentDate)
            }
            Keyword::CurrentTime => {
                self.advance();
                parameterless(ParameterlessCall::CurrentTime)
            }
            Keyword::CurrentUser => {
                self.advance();
                parameterless(ParameterlessCall::CurrentUser)
            }
            Keyword::SessionUser => {
                self.advance();
                parameterless(ParameterlessCall::SessionUser)
            }
            Keyword::SystemUser => {
                self.advance();
                parameterless(ParameterlessCall::SystemUser)
            }
            Keyword::User => {
                self.advance();
                parameterless(ParameterlessCall::User)
            }
            Keyword::IdentityCol | Keyword::RowGuidCol => {
                let token = self.advance();
                Ok(ScalarExpression::ColumnReference(ColumnReference {
                    identifier: MultiPartIdentifier::new(vec![Identifier::new(token.literal)]),
                    column_type: if keyword == Keyword::IdentityCol {
                        ColumnType::IdentityCol
                    } else {
                        ColumnType::RowGuidCol
                    },
                }))
            }
            kw if FUNCTION_KEYWORDS.contains(&kw) && self.peek().kind == TokenKind::LeftParen => {
                let name = identifier_from_token(&self.advance());
                let call = self.parse_function_call(None, name)?;
                Ok(ScalarExpression::FunctionCall(Box::new(call)))
            }
            _ => Err(self.error_here("expression")),
        }
    }

    /// A column reference, or a function call if the name is followed by `(`.
    fn parse_name_or_call(&mut self) -> PResult<ScalarExpression> {
        let name = self.parse_name_parts()?;
        if name.wildcard {
            return Ok(ScalarExpression::ColumnReference(ColumnReference {
                identifier: MultiPartIdentifier::new(name.parts),
                column_type: ColumnType::Wildcard,
            }));
        }
        if self.check(TokenKind::LeftParen) {
            let mut parts = name.parts;
            let function = parts.pop().unwrap_or_default();
            let call_target = (!parts.is_empty()).then(|| MultiPartIdentifier::new(parts));
            let call = self.parse_function_call(call_target, function)?;
            return Ok(ScalarExpression::FunctionCall(Box::new(call)));
        }
        let pseudo = name.parts.len() == 1 && name.parts[0].value.starts_with('$');
        Ok(ScalarExpression::ColumnReference(ColumnReference {
            identifier: MultiPartIdentifier::new(name.parts),
            column_type: if pseudo {
                ColumnType::PseudoColumn
            } else {
                ColumnType::Regular
            },
        }))
    }

    /// Parses `( [ALL | DISTINCT] args ) [WITHIN GROUP (...)] [OVER (...)]`
    /// after the function name.
    pub(crate) fn parse_function_call(
        &mut self,
        call_target: Option<MultiPartIdentifier>,
        name: Identifier,
    ) -> PResult<FunctionCall> {
        let mut call = FunctionCall {
            call_target,
            name,
            ..FunctionCall::default()
        };
        self.expect(TokenKind::LeftParen)?;
        if !self.check(TokenKind::RightParen) {
            if self.eat_keyword(Keyword::All) {
                call.unique_row_filter = Some(UniqueRowFilter::All);
            } else if self.eat_keyword(Keyword::Distinct) {
                call.unique_row_filter = Some(UniqueRowFilter::Distinct);
            }
            call.parameters = self.nested(|p| p.comma_separated(Self::parse_scalar_expression))?;
        }
        self.expect(TokenKind::RightParen)?;

        if self.is_word("WITHIN") && self.peek_keyword(Keyword::Group) {
            self.advance();
            self.advance();
            call.within_group = Some(self.parenthesized(Self::parse_order_by_clause)?);
        }
        if self.check_keyword(Keyword::Over) {
            call.over = Some(self.parse_over_clause()?);
        }
        Ok(call)
    }

    /// `OVER ( [PARTITION BY ...] [ORDER BY ...] [ROWS | RANGE frame] )`
    pub(crate) fn parse_over_clause(&mut self) -> PResult<OverClause> {
        self.expect_keyword(Keyword::Over)?;
        self.parenthesized(|p| {
            let mut over = OverClause::default();
            if p.eat_word("PARTITION") {
                p.expect_keyword(Keyword::By)?;
                over.partitions = p.comma_separated(Self::parse_scalar_expression)?;
            }
            if p.check_keyword(Keyword::Order) {
                over.order_by = Some(p.parse_order_by_clause()?);
            }
            let kind = if p.eat_word("ROWS") {
                Some(WindowFrameKind::Rows)
            } else if p.eat_word("RANGE") {
                Some(WindowFrameKind::Range)
            } else {
                None
            };
            if let Some(kind) = kind {
                let mut frame = WindowFrame {
                    kind,
                    ..WindowFrame::default()
                };
                if p.eat_keyword(Keyword::Between) {
                    frame.top = p.parse_window_delimiter()?;
                    p.expect_keyword(Keyword::And)?;
                    frame.bottom = Some(p.parse_window_delimiter()?);
                } else {
                    frame.top = p.parse_window_delimiter()?;
                }
                over.window_frame = Some(frame);
            }
            Ok(over)
        })
    }

    fn parse_window_delimiter(&mut self) -> PResult<WindowDelimiter> {
        if self.eat_word("UNBOUNDED") {
            if self.eat_word("PRECEDING") {
                return Ok(WindowDelimiter::UnboundedPreceding);
            }
            self.expect_word("FOLLOWING")?;
            return Ok(WindowDelimiter::UnboundedFollowing);
        }
        if self.eat_keyword(Keyword::Current) {
            self.expect_word("ROW")?;
            return Ok(WindowDelimiter::CurrentRow);
        }
        let value = self.parse_scalar_bp(PREFIX_BINDING_POWER)?;
        if self.eat_word("PRECEDING") {
            return Ok(WindowDelimiter::ValuePreceding(value));
        }
        self.expect_word("FOLLOWING")?;
        Ok(WindowDelimiter::ValueFollowing(value))
    }

    fn parse_case(&mut self) -> PResult<ScalarExpression> {
        self.expect_keyword(Keyword::Case)?;
        if self.check_keyword(Keyword::When) {
            let mut case = SearchedCaseExpression::default();
            while self.eat_keyword(Keyword::When) {
                let when = self.parse_boolean_expression()?;
                self.expect_keyword(Keyword::Then)?;
                let then = self.parse_scalar_expression()?;
                case.when_clauses.push(SearchedWhenClause { when, then });
            }
            if self.eat_keyword(Keyword::Else) {
                case.else_expression = Some(self.parse_scalar_expression()?);
            }
            self.expect_keyword(Keyword::End)?;
            return Ok(ScalarExpression::SearchedCase(Box::new(case)));
        }

        let mut case = SimpleCaseExpression {
            input: self.parse_scalar_expression()?,
            ..SimpleCaseExpression::default()
        };
        if !self.check_keyword(Keyword::When) {
            return Err(self.error_here("WHEN"));
        }
        while self.eat_keyword(Keyword::When) {
            let when = self.parse_scalar_expression()?;
            self.expect_keyword(Keyword::Then)?;
            let then = self.parse_scalar_expression()?;
            case.when_clauses.push(SimpleWhenClause { when, then });
        }
        if self.eat_keyword(Keyword::Else) {
            case.else_expression = Some(self.parse_scalar_expression()?);
        }
        self.expect_keyword(Keyword::End)?;
        Ok(ScalarExpression::SimpleCase(Box::new(case)))
    }

    /// `CAST(expr AS type)` / `TRY_CAST(...)`
    fn parse_cast(&mut self) -> PResult<ScalarExpression> {
        let is_try = self.advance().literal.eq_ignore_ascii_case("TRY_CAST");
        self.parenthesized(|p| {
            let expression = p.parse_scalar_expression()?;
            p.expect_keyword(Keyword::As)?;
            let data_type = p.parse_data_type()?;
            Ok(ScalarExpression::Cast(Box::new(CastExpression {
                expression,
                data_type,
                is_try,
            })))
        })
    }

    /// `CONVERT(type, expr [, style])` / `TRY_CONVERT(...)`
    fn parse_convert(&mut self) -> PResult<ScalarExpression> {
        let is_try = self.advance().kind == TokenKind::Keyword(Keyword::TryConvert);
        self.parenthesized(|p| {
            let data_type = p.parse_data_type()?;
            p.expect(TokenKind::Comma)?;
            let expression = p.parse_scalar_expression()?;
            let style = if p.eat(TokenKind::Comma) {
                Some(p.parse_scalar_expression()?)
            } else {
                None
            };
            Ok(ScalarExpression::Convert(Box::new(ConvertExpression {
                data_type,
                expression,
                style,
                is_try,
            })))
        })
    }

    /// `PARSE(string AS type [USING culture])` / `TRY_PARSE(...)`
    fn parse_parse(&mut self) -> PResult<ScalarExpression> {
        let is_try = self.advance().literal.eq_ignore_ascii_case("TRY_PARSE");
        self.parenthesized(|p| {
            let string_value = p.parse_scalar_expression()?;
            p.expect_keyword(Keyword::As)?;
            let data_type = p.parse_data_type()?;
            let culture = if p.eat_word("USING") {
                Some(p.parse_scalar_expression()?)
            } else {
                None
            };
            Ok(ScalarExpression::Parse(Box::new(ParseExpression {
                string_value,
                data_type,
                culture,
                is_try,
            })))
        })
    }

    /// `IIF(predicate, then, else)`
    fn parse_iif(&mut self) -> PResult<ScalarExpression> {
        self.advance();
        self.parenthesized(|p| {
            let predicate = p.parse_boolean_expression()?;
            p.expect(TokenKind::Comma)?;
            let then_expression = p.parse_scalar_expression()?;
            p.expect(TokenKind::Comma)?;
            let else_expression = p.parse_scalar_expression()?;
            Ok(ScalarExpression::Iif(Box::new(IifExpression {
                predicate,
                then_expression,
                else_expression,
            })))
        })
    }

    /// `NEXT VALUE FOR sequence [OVER (ORDER BY ...)]`
    fn parse_next_value_for(&mut self) -> PResult<ScalarExpression> {
        self.expect_word("NEXT")?;
        self.expect_word("VALUE")?;
        self.expect_keyword(Keyword::For)?;
        let sequence = self.parse_schema_object_name()?;
        let over = if self.check_keyword(Keyword::Over) {
            Some(Box::new(self.parse_over_clause()?))
        } else {
            None
        };
        Ok(ScalarExpression::NextValueFor { sequence, over })
    }
}
