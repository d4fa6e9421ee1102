//! Expression parsing and literal decoding.
//!
//! One method per grammar layer; binary operators associate left within a
//! layer. Dotted chains build access or call nodes with the left-hand
//! side as the receiver.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use plcc_util::ParseError;

use crate::ast::{BinaryOp, ExprKind, Expression, Literal};
use crate::Parser;
use plcc_lex::{Token, TokenKind};

impl<'src> Parser<'src> {
    /// Parse an expression (the `logical` layer).
    pub fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        self.parse_logical()
    }

    /// `equality (('&&'|'||') equality)*`
    fn parse_logical(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_equality()?;
        while let Some(op) = self.match_binary_op(&["&&", "||"]) {
            let right = self.parse_equality()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `additive (('<'|'<='|'>'|'>='|'=='|'!=') additive)*`
    fn parse_equality(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_binary_op(&["<", "<=", ">", ">=", "==", "!="]) {
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `multiplicative (('+'|'-') multiplicative)*`
    fn parse_additive(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_binary_op(&["+", "-"]) {
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `secondary (('*'|'/') secondary)*`
    fn parse_multiplicative(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_secondary()?;
        while let Some(op) = self.match_binary_op(&["*", "/"]) {
            let right = self.parse_secondary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    /// `primary ('.' ID ('(' args? ')')?)*`
    fn parse_secondary(&mut self) -> Result<Expression, ParseError> {
        let mut expression = self.parse_primary()?;

        while self.match_operator(".") {
            let name = self.expect_identifier("member name")?;
            expression = if self.match_operator("(") {
                let arguments = self.parse_arguments()?;
                Expression::new(ExprKind::Function {
                    receiver: Some(Box::new(expression)),
                    name,
                    arguments,
                    function: None,
                })
            } else {
                Expression::new(ExprKind::Access {
                    receiver: Some(Box::new(expression)),
                    name,
                    variable: None,
                })
            };
        }

        Ok(expression)
    }

    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        if self.match_keyword("NIL") {
            return Ok(literal(Literal::Nil));
        }
        if self.match_keyword("TRUE") {
            return Ok(literal(Literal::Bool(true)));
        }
        if self.match_keyword("FALSE") {
            return Ok(literal(Literal::Bool(false)));
        }

        if self.check_kind(TokenKind::Integer) {
            let token = self.advance();
            return decode_integer(&token).map(literal);
        }
        if self.check_kind(TokenKind::Decimal) {
            let token = self.advance();
            return decode_decimal(&token).map(literal);
        }
        if self.check_kind(TokenKind::Character) {
            let token = self.advance();
            return decode_character(&token).map(literal);
        }
        if self.check_kind(TokenKind::String) {
            let token = self.advance();
            return decode_string(&token).map(literal);
        }

        if self.match_operator("(") {
            let inner = self.parse_expression()?;
            self.expect_operator(")")?;
            return Ok(Expression::new(ExprKind::Group(Box::new(inner))));
        }

        if self.check_kind(TokenKind::Identifier) {
            let name = self.advance().lexeme.to_string();
            if self.match_operator("(") {
                let arguments = self.parse_arguments()?;
                return Ok(Expression::new(ExprKind::Function {
                    receiver: None,
                    name,
                    arguments,
                    function: None,
                }));
            }
            return Ok(Expression::new(ExprKind::Access {
                receiver: None,
                name,
                variable: None,
            }));
        }

        Err(self.error("expected expression"))
    }

    /// `(expr (',' expr)*)? ')'` — the opening paren is already consumed.
    fn parse_arguments(&mut self) -> Result<Vec<Expression>, ParseError> {
        let mut arguments = Vec::new();
        if !self.check_operator(")") {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.match_operator(",") {
                    break;
                }
            }
        }
        self.expect_operator(")")?;
        Ok(arguments)
    }

    fn match_binary_op(&mut self, operators: &[&str]) -> Option<BinaryOp> {
        for operator in operators {
            if self.check_operator(operator) {
                self.advance();
                return BinaryOp::from_lexeme(operator);
            }
        }
        None
    }
}

fn literal(payload: Literal) -> Expression {
    Expression::new(ExprKind::Literal(payload))
}

fn binary(op: BinaryOp, left: Expression, right: Expression) -> Expression {
    Expression::new(ExprKind::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn decode_integer(token: &Token<'_>) -> Result<Literal, ParseError> {
    BigInt::from_str(token.lexeme)
        .map(Literal::Integer)
        .map_err(|_| ParseError::new("invalid integer literal", token.start()))
}

fn decode_decimal(token: &Token<'_>) -> Result<Literal, ParseError> {
    BigDecimal::from_str(token.lexeme)
        .map(Literal::Decimal)
        .map_err(|_| ParseError::new("invalid decimal literal", token.start()))
}

/// Strip the outer quotes and decode escapes; the result must be exactly
/// one code point.
fn decode_character(token: &Token<'_>) -> Result<Literal, ParseError> {
    let content = unquote(token.lexeme);
    let decoded = decode_escapes(content, token.start() + 1)?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Literal::Character(c)),
        _ => Err(ParseError::new(
            "character literal must contain exactly one character",
            token.start(),
        )),
    }
}

fn decode_string(token: &Token<'_>) -> Result<Literal, ParseError> {
    let content = unquote(token.lexeme);
    decode_escapes(content, token.start() + 1).map(Literal::String)
}

fn unquote(lexeme: &str) -> &str {
    &lexeme[1..lexeme.len() - 1]
}

/// Decode `\b \n \r \t \" \' \\`. `base_index` is the source offset of
/// the first content character, for error attribution.
fn decode_escapes(raw: &str, base_index: usize) -> Result<String, ParseError> {
    let mut decoded = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        let escaped = match chars.next() {
            Some((_, 'b')) => '\u{0008}',
            Some((_, 'n')) => '\n',
            Some((_, 'r')) => '\r',
            Some((_, 't')) => '\t',
            Some((_, '\'')) => '\'',
            Some((_, '"')) => '"',
            Some((_, '\\')) => '\\',
            _ => {
                return Err(ParseError::new(
                    "invalid escape sequence",
                    base_index + offset,
                ))
            }
        };
        decoded.push(escaped);
    }

    Ok(decoded)
}
