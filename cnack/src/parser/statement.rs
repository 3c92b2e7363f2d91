// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{
    DiagnosticKind, DiagnosticSeverity, Keyword, Punctuator, StructDefinition,
    Symbol, TokenKind, Value, format_number,
};

use super::{BinaryOperator, Flow, Parser};

/// Commands from other languages that beginners reach for, and the keyword
/// they most likely meant.
pub(super) fn confusable_command(name: &str) -> Option<Keyword> {
    match name {
        "print" | "printf" | "println" | "cout" | "console" => Some(Keyword::Display),
        "input" | "scanf" | "cin" => Some(Keyword::Ask),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
enum DeclaredType<'source_code> {
    Primitive(Keyword),
    Struct(&'source_code str),
}

/// The part of a symbol an assignment writes to.
#[derive(Debug, Clone, Copy)]
pub(super) enum Place<'source_code> {
    Whole,
    Element(f64),
    Field(&'source_code str),
}

impl<'source_code> Parser<'source_code> {
    /// Parses statements until the end of the enclosing block.
    pub(super) fn statement_list(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::EndOfInput
                    | TokenKind::Punctuator(Punctuator::RightCurlyBracket)
                    | TokenKind::Keyword(Keyword::Exit) => break,
                _ => (),
            }

            let before = self.consumed;
            self.statement();

            if self.state.panic_mode {
                self.synchronize();
            }

            if self.consumed == before {
                self.advance();
            }
        }
    }

    fn statement(&mut self) {
        self.resolve_confusable_keyword();

        match self.current.kind {
            TokenKind::Keyword(Keyword::Const) => self.declaration(),
            TokenKind::Keyword(keyword) if keyword.is_primitive_type() => self.declaration(),
            TokenKind::Identifier => self.identifier_statement(),

            TokenKind::Keyword(Keyword::Display) => self.display_statement(),
            TokenKind::Keyword(Keyword::Ask) => self.ask_statement(),
            TokenKind::Keyword(Keyword::Assign) => self.conditional_assignment_block(),
            TokenKind::Keyword(Keyword::If) => self.if_statement(),
            TokenKind::Keyword(Keyword::While) => self.while_statement(),
            TokenKind::Keyword(Keyword::Do) => self.do_while_statement(),
            TokenKind::Keyword(Keyword::For) => self.for_statement(),
            TokenKind::Keyword(Keyword::Fn) => self.function_declaration(),
            TokenKind::Keyword(Keyword::Struct) => self.struct_declaration(),
            TokenKind::Keyword(keyword @ (Keyword::Break | Keyword::Continue)) => self.loop_control(keyword),

            TokenKind::Punctuator(Punctuator::Asterisk | Punctuator::QuantumPointer) => self.pointer_operation(),

            TokenKind::Keyword(Keyword::Else) => self.stray_else(),

            _ => {
                self.error(DiagnosticKind::UnexpectedStatementStart);
                self.advance();
            }
        }
    }

    /// Rewrites a misspelled keyword at the start of a statement into the
    /// keyword it most likely meant, after hinting about it.
    fn resolve_confusable_keyword(&mut self) {
        if !self.current.is(TokenKind::Identifier) {
            return;
        }

        let name = self.current.lexeme;
        if self.state.symbols.contains(name) || self.state.types.contains(name) {
            return;
        }

        let keyword = match confusable_command(name) {
            Some(keyword) if self.lookahead.is(Punctuator::LeftParenthesis) => {
                self.hint(DiagnosticKind::ConfusableCommand { suggestion: keyword.spelling() });
                keyword
            }

            _ => {
                let Some(keyword) = Keyword::parse_ignoring_case(name) else {
                    return;
                };

                self.hint(DiagnosticKind::KeywordCase { keyword: keyword.spelling() });
                keyword
            }
        };

        self.current.kind = TokenKind::Keyword(keyword);
    }

    fn identifier_statement(&mut self) {
        let name = self.current.lexeme;

        if self.state.types.contains(name) {
            self.declaration();
            return;
        }

        if self.lookahead.is(TokenKind::Identifier) {
            self.error(DiagnosticKind::UnknownType { name: name.to_string() });
            self.advance();
            return;
        }

        self.assignment(true);
    }

    pub(super) fn declaration(&mut self) {
        let is_const = self.current.is(Keyword::Const);
        if is_const {
            self.advance();
        }

        let Some(ty) = self.declared_type() else {
            return;
        };

        loop {
            self.declarator(ty, is_const);
            if self.state.panic_mode {
                return;
            }

            if !self.current.is(Punctuator::Comma) {
                break;
            }
            self.advance();
        }

        self.consume(Punctuator::Semicolon, "Expected ';'");
    }

    fn declared_type(&mut self) -> Option<DeclaredType<'source_code>> {
        let ty = match self.current.kind {
            TokenKind::Keyword(keyword) if keyword.is_primitive_type() => {
                if keyword.is_string_type() {
                    self.state.features.string_type = true;
                }

                DeclaredType::Primitive(keyword)
            }

            TokenKind::Identifier if self.state.types.contains(self.current.lexeme) => {
                DeclaredType::Struct(self.current.lexeme)
            }

            _ => {
                self.error(DiagnosticKind::Expected { message: "Expected type" });
                return None;
            }
        };

        self.advance();
        Some(ty)
    }

    fn declarator(&mut self, ty: DeclaredType<'source_code>, is_const: bool) {
        let is_alias = match self.current.kind {
            TokenKind::Punctuator(Punctuator::Asterisk) => true,
            TokenKind::Punctuator(Punctuator::QuantumPointer) => {
                self.state.features.quantum_pointer = true;
                true
            }
            _ => false,
        };

        if is_alias {
            self.advance();
        }

        let Some(name) = self.consume_identifier("Expected identifier") else {
            return;
        };

        let array_len = self.array_length();

        if is_alias {
            let targets = if self.current.is(Punctuator::Assignment) {
                self.advance();
                self.alias_targets()
            } else {
                Vec::new()
            };

            if self.executing() && !self.state.panic_mode {
                self.state.symbols.set_alias(name, targets);
            }
            return;
        }

        let value = if self.current.is(Punctuator::Assignment) {
            self.advance();
            let value = self.expression();

            match ty {
                DeclaredType::Struct(ty) => match self.state.types.get(ty) {
                    Some(definition) => value.with_field_names(definition.field_names()),
                    None => value,
                },
                DeclaredType::Primitive(..) => value,
            }
        } else {
            self.default_value(ty, array_len)
        };

        if !self.executing() || self.state.panic_mode {
            return;
        }

        self.state.symbols.declare(Symbol {
            name: name.to_string(),
            value,
            is_array: array_len.is_some(),
            is_const,
            alias_targets: None,
        });
    }

    /// An optional `[length]` suffix. `[]` has length zero.
    fn array_length(&mut self) -> Option<usize> {
        if !self.current.is(Punctuator::LeftSquareBracket) {
            return None;
        }
        self.advance();

        let mut len = 0;
        if !self.current.is(Punctuator::RightSquareBracket) {
            let size = self.expression().as_number();
            if size >= Value::MAX_ARRAY_LEN as f64 {
                self.error(DiagnosticKind::ArraySizeTooLarge { max: Value::MAX_ARRAY_LEN });
                return Some(0);
            }
            len = size.max(0.0) as usize;
        }

        self.consume(Punctuator::RightSquareBracket, "Expected ']'");
        Some(len)
    }

    fn default_value(&self, ty: DeclaredType<'_>, array_len: Option<usize>) -> Value {
        if let Some(len) = array_len {
            return Value::zeroed_array(len);
        }

        match ty {
            DeclaredType::Primitive(keyword) if keyword.is_string_type() || keyword == Keyword::Char => {
                Value::Text(String::new())
            }
            DeclaredType::Primitive(..) => Value::ZERO,
            DeclaredType::Struct(name) => self.state.types.get(name)
                .map(StructDefinition::instantiate)
                .unwrap_or_default(),
        }
    }

    /// `&a` or `{ &a, b, ... }`.
    fn alias_targets(&mut self) -> Vec<String> {
        if !self.current.is(Punctuator::LeftCurlyBracket) {
            return self.alias_target().into_iter().collect();
        }
        self.advance();

        let mut targets = Vec::new();
        while !self.current.is(Punctuator::RightCurlyBracket) && !self.current.is(TokenKind::EndOfInput) {
            let Some(target) = self.alias_target() else {
                return targets;
            };
            targets.push(target);

            if !self.current.is(Punctuator::Comma) {
                break;
            }
            self.advance();
        }

        self.consume(Punctuator::RightCurlyBracket, "Expected '}'");
        targets
    }

    fn alias_target(&mut self) -> Option<String> {
        if self.current.is(Punctuator::Ampersand) {
            self.advance();
        }

        self.consume_identifier("Expected alias target").map(ToString::to_string)
    }

    pub(super) fn struct_declaration(&mut self) {
        self.advance();

        let Some(name) = self.consume_identifier("Expected struct name") else {
            return;
        };

        if !self.consume(Punctuator::LeftCurlyBracket, "Expected '{'") {
            return;
        }

        let mut fields = Vec::new();
        while !self.current.is(Punctuator::RightCurlyBracket) && !self.current.is(TokenKind::EndOfInput) {
            self.struct_fields(&mut fields);

            if self.state.panic_mode {
                self.synchronize();
            }
        }

        self.consume(Punctuator::RightCurlyBracket, "Expected '}'");
        if self.current.is(Punctuator::Semicolon) {
            self.advance();
        }

        self.state.types.register(StructDefinition {
            name: name.to_string(),
            fields,
        });
    }

    fn struct_fields(&mut self, fields: &mut Vec<(String, Value)>) {
        let Some(ty) = self.declared_type() else {
            return;
        };

        loop {
            let Some(name) = self.consume_identifier("Expected field name") else {
                return;
            };

            let array_len = self.array_length();
            let default = if self.current.is(Punctuator::Assignment) {
                self.advance();
                self.expression()
            } else {
                self.default_value(ty, array_len)
            };

            fields.push((name.to_string(), default));

            if !self.current.is(Punctuator::Comma) {
                break;
            }
            self.advance();
        }

        self.consume(Punctuator::Semicolon, "Expected ';'");
    }

    /// `name [place] op value`, optionally followed by `;`.
    pub(super) fn assignment(&mut self, terminated: bool) {
        let Some(name) = self.consume_identifier("Expected identifier") else {
            return;
        };

        let place = match self.current.kind {
            TokenKind::Punctuator(Punctuator::LeftSquareBracket) => {
                self.advance();
                let index = self.expression().as_number();
                self.consume(Punctuator::RightSquareBracket, "Expected ']'");
                Place::Element(index)
            }

            TokenKind::Punctuator(Punctuator::Arrow) => {
                self.advance();
                let Some(field) = self.consume_identifier("Expected field name after '->'") else {
                    return;
                };
                Place::Field(field)
            }

            _ => Place::Whole,
        };

        let (operator, value) = match self.current.kind {
            TokenKind::Punctuator(Punctuator::Increment) => {
                self.advance();
                (Punctuator::AddAssign, Value::Number(1.0))
            }

            TokenKind::Punctuator(Punctuator::Decrement) => {
                self.advance();
                (Punctuator::SubtractAssign, Value::Number(1.0))
            }

            TokenKind::Punctuator(punctuator) if punctuator.is_assignment() => {
                self.advance();
                (punctuator, self.expression())
            }

            TokenKind::Punctuator(Punctuator::LeftParenthesis) => {
                self.error(DiagnosticKind::UnknownFunctionCallOrMissingAssignment);
                return;
            }

            _ => {
                self.error(DiagnosticKind::ExpectedAssignmentOperator);
                return;
            }
        };

        if self.state.panic_mode {
            return;
        }

        if self.executing() {
            self.assign(name, place, operator, value);
        }

        if terminated {
            self.consume(Punctuator::Semicolon, "Expected ';'");
        }
    }

    pub(super) fn assign(&mut self, name: &str, place: Place<'_>, operator: Punctuator, value: Value) {
        if self.state.symbols.get(name).is_some_and(|symbol| symbol.is_const) {
            let kind = DiagnosticKind::ConstantAssignment { name: name.to_string() };
            self.emit(self.current.line, kind, DiagnosticSeverity::Hint, Some(name));
            return;
        }

        let value = match BinaryOperator::from_compound(operator) {
            Some(operator) => operator.apply(self.read_place(name, place), value),
            None => value,
        };

        match place {
            Place::Whole => self.state.symbols.set(name, value),

            Place::Element(index) => {
                let mut whole = self.state.symbols.value(name).cloned()
                    .unwrap_or_else(|| Value::Array(Vec::new()));

                if whole.set_element(index, value) {
                    self.state.symbols.set(name, whole);
                } else {
                    log::debug!("Refusing write to `{name}[{index}]`");
                    let kind = DiagnosticKind::ArrayIndexOutOfRange { index: format_number(index) };
                    self.emit(self.current.line, kind, DiagnosticSeverity::Error, Some(name));
                }
            }

            Place::Field(field) => {
                let mut whole = self.state.symbols.value(name).cloned()
                    .unwrap_or_else(|| Value::Struct(Vec::new()));

                whole.set_field(field, value);
                self.state.symbols.set(name, whole);
            }
        }
    }

    fn read_place(&self, name: &str, place: Place<'_>) -> Value {
        let Some(value) = self.state.symbols.value(name) else {
            return Value::ZERO;
        };

        match place {
            Place::Whole => value.clone(),
            Place::Element(index) => value.element(index).cloned().unwrap_or_default(),
            Place::Field(field) => value.field(field).cloned().unwrap_or_default(),
        }
    }

    /// `*| name = { &a, &b } ;`, `* name = &a ;` or `* name = value ;`.
    fn pointer_operation(&mut self) {
        let quantum = self.current.is(Punctuator::QuantumPointer);
        if quantum {
            self.state.features.quantum_pointer = true;
        }
        self.advance();

        let Some(name) = self.consume_identifier("Expected identifier after pointer operator") else {
            return;
        };

        if !self.current.is(Punctuator::Assignment) {
            self.error(DiagnosticKind::ExpectedQuantumAssignment);
            return;
        }
        self.advance();

        let declares_alias = quantum
            || self.current.is(Punctuator::Ampersand)
            || self.current.is(Punctuator::LeftCurlyBracket);

        if declares_alias {
            let targets = self.alias_targets();

            if self.executing() && !self.state.panic_mode {
                self.state.symbols.set_alias(name, targets);
            }
        } else {
            let value = self.expression();

            if self.executing() && !self.state.panic_mode {
                let targets = self.state.symbols.get(name).and_then(|symbol| symbol.alias_targets.clone());

                match targets {
                    Some(targets) => {
                        for target in targets {
                            self.assign(&target, Place::Whole, Punctuator::Assignment, value.clone());
                        }
                    }
                    None => self.assign(name, Place::Whole, Punctuator::Assignment, value),
                }
            }
        }

        self.consume(Punctuator::Semicolon, "Expected ';'");
    }

    fn display_statement(&mut self) {
        self.advance();

        if !self.consume(Punctuator::LeftParenthesis, "Expected '(' after display") {
            return;
        }

        let mut text = String::new();
        while !self.current.is(Punctuator::RightParenthesis) && !self.current.is(TokenKind::EndOfInput) {
            let token = self.current;
            let bare_string = token.is(TokenKind::StringLiteral)
                && (self.lookahead.is(Punctuator::Comma) || self.lookahead.is(Punctuator::RightParenthesis));

            if bare_string {
                self.advance();
                text += &self.interpolate(token.string_contents());
            } else {
                text += &self.expression().display_text();
            }

            if !self.current.is(Punctuator::Comma) {
                break;
            }
            self.advance();
        }

        if !self.consume(Punctuator::RightParenthesis, "Expected ')'") {
            return;
        }

        if self.executing() {
            self.write_output(&text);
            self.end_output_line();
        }

        self.consume(Punctuator::Semicolon, "Expected ';'");
    }

    /// `ask ( name ) ;` stores the next answer in `name`.
    fn ask_statement(&mut self) {
        self.advance();

        if !self.consume(Punctuator::LeftParenthesis, "Expected '(' after ask") {
            return;
        }

        let target = if self.current.is(TokenKind::StringLiteral) {
            self.advance();
            None
        } else {
            let Some(name) = self.consume_identifier("Expected identifier") else {
                return;
            };
            Some(name)
        };

        if !self.consume(Punctuator::RightParenthesis, "Expected ')'") {
            return;
        }

        if self.executing() {
            let answer = self.next_answer();
            if let Some(target) = target {
                self.assign(target, Place::Whole, Punctuator::Assignment, answer);
            }
        }

        self.consume(Punctuator::Semicolon, "Expected ';'");
    }

    fn loop_control(&mut self, keyword: Keyword) {
        if self.state.loop_depth == 0 {
            self.error(DiagnosticKind::OutsideOfLoop { keyword: keyword.spelling() });
            self.advance();
            return;
        }

        self.advance();

        if self.executing() {
            self.state.flow = match keyword {
                Keyword::Break => Flow::Break,
                _ => Flow::Continue,
            };
        }

        self.consume(Punctuator::Semicolon, "Expected ';'");
    }

    fn stray_else(&mut self) {
        self.error(DiagnosticKind::UnexpectedElse);
        self.advance();

        if self.current.is(Punctuator::LeftCurlyBracket) {
            self.state.panic_mode = false;
            self.with_exec(false, Self::block);
        }
    }

    /// Functions are checked for syntax only; nothing ever calls them.
    fn function_declaration(&mut self) {
        self.advance();

        let Some(name) = self.consume_identifier("Expected function name") else {
            return;
        };

        if !self.consume(Punctuator::LeftParenthesis, "Expected '('") {
            return;
        }

        while !self.current.is(Punctuator::RightParenthesis) && !self.current.is(TokenKind::EndOfInput) {
            self.advance();
        }

        if !self.consume(Punctuator::RightParenthesis, "Expected ')'") {
            return;
        }

        log::debug!("Parsing function `{name}` without running it");
        self.with_exec(false, Self::block);
    }
}
