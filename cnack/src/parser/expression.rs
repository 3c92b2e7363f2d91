// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{DiagnosticKind, Keyword, Punctuator, StructField, TokenKind, Value};

use super::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Or,
    And,

    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,

    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    /// The operator a compound assignment such as `+=` applies.
    #[must_use]
    pub const fn from_compound(punctuator: Punctuator) -> Option<Self> {
        match punctuator {
            Punctuator::AddAssign => Some(Self::Add),
            Punctuator::SubtractAssign => Some(Self::Subtract),
            Punctuator::MultiplyAssign => Some(Self::Multiply),
            Punctuator::DivideAssign => Some(Self::Divide),
            Punctuator::ModuloAssign => Some(Self::Modulo),
            _ => None,
        }
    }

    #[must_use]
    pub fn apply(self, lhs: Value, rhs: Value) -> Value {
        if self == Self::Add && (lhs.is_text() || rhs.is_text()) {
            return Value::Text(lhs.display_text() + &rhs.display_text());
        }

        if lhs.is_text() && rhs.is_text() {
            match self {
                Self::Equal => return Value::from_bool(lhs == rhs),
                Self::NotEqual => return Value::from_bool(lhs != rhs),
                _ => (),
            }
        }

        let (a, b) = (lhs.as_number(), rhs.as_number());

        match self {
            Self::Or => Value::from_bool(a != 0.0 || b != 0.0),
            Self::And => Value::from_bool(a != 0.0 && b != 0.0),

            Self::Equal => Value::from_bool(a == b),
            Self::NotEqual => Value::from_bool(a != b),
            Self::Greater => Value::from_bool(a > b),
            Self::GreaterOrEqual => Value::from_bool(a >= b),
            Self::Less => Value::from_bool(a < b),
            Self::LessOrEqual => Value::from_bool(a <= b),

            Self::Add => Value::Number(a + b),
            Self::Subtract => Value::Number(a - b),
            Self::Multiply => Value::Number(a * b),

            Self::Divide | Self::Modulo if b == 0.0 => {
                log::debug!("Skipping {self:?} by zero, keeping {lhs}");
                return lhs;
            }
            Self::Divide => Value::Number(a / b),
            Self::Modulo => Value::Number(a % b),
        }
    }
}

impl<'source_code> Parser<'source_code> {
    pub(super) fn expression(&mut self) -> Value {
        self.logical_or_expression()
    }

    fn logical_or_expression(&mut self) -> Value {
        let mut value = self.logical_and_expression();

        while self.current.is(Punctuator::LogicalOr) {
            self.advance();

            let short_circuit = value.is_truthy();
            let rhs = self.with_exec(!short_circuit, Self::logical_and_expression);
            value = BinaryOperator::Or.apply(value, rhs);
        }

        value
    }

    fn logical_and_expression(&mut self) -> Value {
        let mut value = self.equality_expression();

        while self.current.is(Punctuator::LogicalAnd) {
            self.advance();

            let short_circuit = !value.is_truthy();
            let rhs = self.with_exec(!short_circuit, Self::equality_expression);
            value = BinaryOperator::And.apply(value, rhs);
        }

        value
    }

    fn equality_expression(&mut self) -> Value {
        self.bi_expression(Self::relational_expression, &[
            (Punctuator::Equals, BinaryOperator::Equal),
            (Punctuator::NotEquals, BinaryOperator::NotEqual),
        ])
    }

    fn relational_expression(&mut self) -> Value {
        self.bi_expression(Self::additive_expression, &[
            (Punctuator::GreaterThan, BinaryOperator::Greater),
            (Punctuator::GreaterThanOrEqual, BinaryOperator::GreaterOrEqual),
            (Punctuator::LessThan, BinaryOperator::Less),
            (Punctuator::LessThanOrEqual, BinaryOperator::LessOrEqual),
        ])
    }

    fn additive_expression(&mut self) -> Value {
        self.bi_expression(Self::multiplicative_expression, &[
            (Punctuator::PlusSign, BinaryOperator::Add),
            (Punctuator::HyphenMinus, BinaryOperator::Subtract),
        ])
    }

    fn multiplicative_expression(&mut self) -> Value {
        self.bi_expression(Self::unary_expression, &[
            (Punctuator::Asterisk, BinaryOperator::Multiply),
            (Punctuator::Solidus, BinaryOperator::Divide),
            (Punctuator::PercentageSign, BinaryOperator::Modulo),
        ])
    }

    fn bi_expression<F>(&mut self, mut operand: F, operators: &[(Punctuator, BinaryOperator)]) -> Value
            where F: FnMut(&mut Self) -> Value {
        let mut value = operand(self);

        loop {
            let Some((_, operator)) = operators.iter().find(|(p, _)| self.current.is(*p)).copied() else {
                break;
            };

            self.advance();

            let rhs = operand(self);
            value = operator.apply(value, rhs);
        }

        value
    }

    fn unary_expression(&mut self) -> Value {
        match self.current.kind {
            TokenKind::Punctuator(Punctuator::HyphenMinus) => {
                self.advance();
                Value::Number(-self.unary_expression().as_number())
            }

            TokenKind::Punctuator(Punctuator::Not) => {
                self.advance();
                Value::from_bool(!self.unary_expression().is_truthy())
            }

            // Dereferencing and taking an address are name aliasing only.
            TokenKind::Punctuator(Punctuator::Asterisk | Punctuator::Ampersand) => {
                self.advance();
                self.unary_expression()
            }

            _ => self.factor(),
        }
    }

    fn factor(&mut self) -> Value {
        let token = self.current;

        match token.kind {
            TokenKind::Integer | TokenKind::Float => {
                self.advance();
                Value::Number(token.lexeme.parse().unwrap_or(0.0))
            }

            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Value::TRUE
            }

            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Value::FALSE
            }

            TokenKind::StringLiteral => {
                self.advance();
                Value::from(token.string_contents())
            }

            TokenKind::FormatString => {
                self.advance();
                Value::Text(self.interpolate(token.string_contents()))
            }

            TokenKind::Punctuator(Punctuator::LeftParenthesis) => {
                self.advance();
                let value = self.expression();
                self.consume(Punctuator::RightParenthesis, "Expected ')'");
                value
            }

            TokenKind::Punctuator(Punctuator::LeftSquareBracket) => self.array_literal(),
            TokenKind::Punctuator(Punctuator::LeftCurlyBracket) => self.struct_literal(),

            TokenKind::Keyword(Keyword::AutoRef) => self.auto_ref(),
            TokenKind::Keyword(Keyword::Ask) => self.ask_call(),

            TokenKind::Identifier => self.variable(),

            _ => {
                self.error(DiagnosticKind::InvalidExpressionFactor);

                let at_boundary = matches!(token.kind,
                    TokenKind::EndOfInput
                        | TokenKind::Punctuator(Punctuator::Semicolon
                            | Punctuator::RightCurlyBracket
                            | Punctuator::RightParenthesis)
                );

                if !at_boundary {
                    self.advance();
                }

                Value::ZERO
            }
        }
    }

    fn array_literal(&mut self) -> Value {
        self.advance();

        let mut elements = Vec::new();
        while !self.current.is(Punctuator::RightSquareBracket) && !self.current.is(TokenKind::EndOfInput) {
            elements.push(self.expression());

            if !self.current.is(Punctuator::Comma) {
                break;
            }
            self.advance();
        }

        self.consume(Punctuator::RightSquareBracket, "Expected ']'");
        Value::Array(elements)
    }

    /// `{ e, ... }` or `{ name: e, ... }`.
    fn struct_literal(&mut self) -> Value {
        self.advance();

        let mut fields = Vec::new();
        while !self.current.is(Punctuator::RightCurlyBracket) && !self.current.is(TokenKind::EndOfInput) {
            let name = if self.current.is(TokenKind::Identifier) && self.lookahead.is(Punctuator::Colon) {
                let name = self.current.lexeme.to_string();
                self.advance();
                self.advance();
                Some(name)
            } else {
                None
            };

            fields.push(StructField {
                name,
                value: self.expression(),
            });

            if !self.current.is(Punctuator::Comma) {
                break;
            }
            self.advance();
        }

        self.consume(Punctuator::RightCurlyBracket, "Expected '}'");
        Value::Struct(fields)
    }

    /// `auto_ref ( type , value )` evaluates to the value. The type is
    /// skipped without validation.
    fn auto_ref(&mut self) -> Value {
        self.state.features.auto_ref = true;
        self.advance();

        if !self.consume(Punctuator::LeftParenthesis, "Expected '(' after auto_ref") {
            return Value::ZERO;
        }

        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::EndOfInput => break,
                TokenKind::Punctuator(Punctuator::Comma | Punctuator::RightParenthesis) if depth == 0 => break,
                TokenKind::Punctuator(Punctuator::LeftParenthesis | Punctuator::LeftSquareBracket) => depth += 1,
                TokenKind::Punctuator(Punctuator::RightParenthesis | Punctuator::RightSquareBracket) => depth = depth.saturating_sub(1),
                _ => (),
            }
            self.advance();
        }

        self.consume(Punctuator::Comma, "Expected ',' after auto_ref type");
        let value = self.expression();
        self.consume(Punctuator::RightParenthesis, "Expected ')'");
        value
    }

    /// `ask ( [prompt] )` yields the next pre-supplied answer. The current
    /// token is `ask` or one of its confusable spellings.
    pub(super) fn ask_call(&mut self) -> Value {
        self.advance();
        self.consume(Punctuator::LeftParenthesis, "Expected '(' after ask");

        if self.current.is(TokenKind::StringLiteral) || self.current.is(TokenKind::Identifier) {
            self.advance();
        }

        self.consume(Punctuator::RightParenthesis, "Expected ')'");

        if self.executing() {
            self.next_answer()
        } else {
            Value::Text(String::new())
        }
    }

    fn variable(&mut self) -> Value {
        let name = self.current.lexeme;

        if self.lookahead.is(Punctuator::LeftParenthesis) {
            if super::statement::confusable_command(name) == Some(Keyword::Ask) {
                self.hint(DiagnosticKind::ConfusableCommand { suggestion: Keyword::Ask.spelling() });
                return self.ask_call();
            }

            self.error(DiagnosticKind::UnknownFunctionCall);
            self.advance();
            return Value::ZERO;
        }

        self.advance();

        let mut value = match self.state.symbols.value(name) {
            Some(value) => value.clone(),
            None => {
                log::debug!("Reading undeclared `{name}` as 0");
                Value::ZERO
            }
        };

        loop {
            match self.current.kind {
                TokenKind::Punctuator(Punctuator::LeftSquareBracket) => {
                    self.advance();
                    let index = self.expression().as_number();
                    self.consume(Punctuator::RightSquareBracket, "Expected ']'");
                    value = value.element(index).cloned().unwrap_or_default();
                }

                TokenKind::Punctuator(Punctuator::Arrow) => {
                    self.advance();
                    let Some(field) = self.consume_identifier("Expected field name after '->'") else {
                        return Value::ZERO;
                    };
                    value = value.field(field).cloned().unwrap_or_default();
                }

                _ => break,
            }
        }

        value
    }

    /// Replaces every `{name}` with the display text of that symbol. Unknown
    /// names render as `<name>`.
    pub(super) fn interpolate(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];

            let Some(close) = after.find('}') else {
                result.push_str(&rest[open..]);
                rest = "";
                break;
            };

            let name = after[..close].trim();
            match self.state.symbols.value(name) {
                Some(value) => result.push_str(&value.display_text()),
                None => {
                    result.push('<');
                    result.push_str(name);
                    result.push('>');
                }
            }

            rest = &after[close + 1..];
        }

        result.push_str(rest);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InterpreterConfig;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn evaluate(source: &str) -> Value {
        let mut parser = Parser::new(source, InterpreterConfig::default());
        parser.expression()
    }

    #[rstest]
    #[case("1 + 2 * 3", "7")]
    #[case("(1 + 2) * 3", "9")]
    #[case("10 - 4 - 3", "3")]
    #[case("7 % 3", "1")]
    #[case("7 / 2", "3.5")]
    #[case("5 / 0", "5")]
    #[case("5 % 0", "5")]
    #[case("-3 + 1", "-2")]
    #[case("!0", "1")]
    #[case("2 < 3 && 3 < 2", "0")]
    #[case("0 || 4 >= 4", "1")]
    #[case("1 + 1 == 2", "1")]
    #[case("\"ab\" == \"ab\"", "1")]
    #[case("\"ab\" != \"ab\"", "0")]
    #[case("\"n = \" + 4", "\"n = 4\"")]
    #[case("[1, 2, 3]", "[1, 2, 3]")]
    #[case("{x: 1, y: \"a\"}", "{x: 1, y: \"a\"}")]
    #[case("auto_ref(int[], [4, 5])", "[4, 5]")]
    #[case("auto_ref(int, 3 * 2)", "6")]
    #[case("*&4", "4")]
    #[case("true + true", "2")]
    #[case("unknown", "0")]
    fn evaluation(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(evaluate(source).serialize(), expected);
    }

    #[test]
    fn element_and_field_access() {
        let mut parser = Parser::new("a[1] + p->y + a[9]", InterpreterConfig::default());
        parser.state.symbols.set("a", Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]));

        let mut point = Value::Struct(Vec::new());
        point.set_field("y", Value::Number(40.0));
        parser.state.symbols.set("p", point);

        assert_eq!(parser.expression(), Value::Number(42.0));
    }

    #[test]
    fn interpolation_replaces_known_names() {
        let mut parser = Parser::new("", InterpreterConfig::default());
        parser.state.symbols.set("name", Value::from("Ada"));
        parser.state.symbols.set("n", Value::Number(3.0));

        assert_eq!(parser.interpolate("{name} has {n} and {missing}"), "Ada has 3 and <missing>");
        assert_eq!(parser.interpolate("open { brace"), "open { brace");
    }

    #[test]
    fn short_circuit_skips_ask() {
        let config = InterpreterConfig::default().with_answers(["7"]);
        let mut parser = Parser::new("0 && ask()", config);

        assert_eq!(parser.expression(), Value::FALSE);
        assert_eq!(parser.next_answer(), Value::Number(7.0));
    }

    #[test]
    fn invalid_factor_is_reported() {
        let mut parser = Parser::new("+", InterpreterConfig::default());
        parser.expression();

        assert!(!parser.state.success);
        assert_eq!(parser.state.diagnostics[0].kind, DiagnosticKind::InvalidExpressionFactor);
    }
}
