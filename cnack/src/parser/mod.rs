// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod cab;
mod control;
mod expression;
mod state;
mod statement;
mod stream;

use std::collections::VecDeque;

use crate::{
    Diagnostic, DiagnosticKind, DiagnosticSeverity, InterpreterConfig, Keyword,
    LexerErrorKind, Punctuator, RunReport, Token, TokenKind, Value,
};

pub use self::{
    expression::BinaryOperator,
    stream::{Checkpoint, TokenSpan, TokenStream},
};

use self::state::{Flow, InterpreterState};

/// Recursive-descent parser that evaluates every construct as soon as it
/// has been recognized. No syntax tree is built; loops are realized by
/// replaying captured token spans.
pub struct Parser<'source_code> {
    stream: TokenStream<'source_code>,
    current: Token<'source_code>,
    lookahead: Token<'source_code>,
    consumed: usize,

    config: InterpreterConfig,
    answers: VecDeque<String>,
    state: InterpreterState,
}

impl<'source_code> Parser<'source_code> {
    pub fn new(source: &'source_code str, config: InterpreterConfig) -> Self {
        let mut parser = Self {
            stream: TokenStream::new(source),
            current: Token::end_of_input(0, 1),
            lookahead: Token::end_of_input(0, 1),
            consumed: 0,

            answers: config.answers.iter().cloned().collect(),
            state: InterpreterState::new(&config),
            config,
        };

        parser.lookahead = parser.pull();
        parser.advance();
        parser
    }

    /// Parses and runs every executable unit in the source, producing one
    /// report per unit.
    pub fn parse_program(mut self) -> Vec<RunReport> {
        let mut reports = Vec::new();

        while !self.current.is(TokenKind::EndOfInput) {
            reports.push(self.parse_unit());
        }

        if !self.state.diagnostics.is_empty() {
            reports.push(self.finish_unit());
        }

        reports
    }

    fn parse_unit(&mut self) -> RunReport {
        let start = self.consumed;

        while self.current.is(Keyword::Struct) {
            self.struct_declaration();
            if self.state.panic_mode {
                self.synchronize();
            }
        }

        if !self.consume(Keyword::Execute, "Expected 'execute' to start program") {
            self.synchronize();
            return self.close_unit(start);
        }

        self.consume(Punctuator::LeftParenthesis, "Expected '('");
        self.consume(Punctuator::RightParenthesis, "Expected ')'");
        self.consume(Punctuator::LeftCurlyBracket, "Expected '{'");

        self.statement_list();

        if self.current.is(Keyword::Exit) {
            self.advance();
            self.consume(Punctuator::LeftParenthesis, "Expected '('");
            self.consume(Punctuator::RightParenthesis, "Expected ')'");
            self.consume(Punctuator::Semicolon, "Expected ';'");
        }

        if !self.current.is(Punctuator::RightCurlyBracket) {
            self.error(DiagnosticKind::Expected { message: "Expected '}'" });
        }

        self.close_unit(start)
    }

    /// Finishes the unit before stepping past its closing brace, so that
    /// problems in the next token belong to the next unit.
    fn close_unit(&mut self, start: usize) -> RunReport {
        let closed = self.current.is(Punctuator::RightCurlyBracket);
        let report = self.finish_unit();

        if closed || self.consumed == start {
            self.advance();
        }

        report
    }

    fn finish_unit(&mut self) -> RunReport {
        let fresh = InterpreterState::new(&self.config);
        let report = std::mem::replace(&mut self.state, fresh).into_report();

        log::info!("Unit finished: success={}, {} diagnostic(s), {} symbol(s)",
            report.success, report.diagnostics.len(), report.symbols.len());

        report
    }

    /// Next token that is not a comment.
    fn pull(&mut self) -> Token<'source_code> {
        loop {
            let token = self.stream.next_token();
            if !token.kind.is_comment() {
                return token;
            }
        }
    }

    fn advance(&mut self) {
        self.current = self.lookahead;
        self.lookahead = self.pull();
        self.consumed += 1;

        while let TokenKind::Error(error) = self.current.kind {
            self.report_lexical_error(error);
            self.current = self.lookahead;
            self.lookahead = self.pull();
        }
    }

    fn consume(&mut self, kind: impl Into<TokenKind>, message: &'static str) -> bool {
        if self.current.kind == kind.into() {
            self.advance();
            true
        } else {
            self.error(DiagnosticKind::Expected { message });
            false
        }
    }

    fn consume_identifier(&mut self, message: &'static str) -> Option<&'source_code str> {
        if self.current.kind != TokenKind::Identifier {
            self.error(DiagnosticKind::Expected { message });
            return None;
        }

        let name = self.current.lexeme;
        self.advance();
        Some(name)
    }

    /// Skips tokens until a statement boundary: a `;` (consumed), a `}` or
    /// an `otherwise` (both left in place).
    fn synchronize(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::EndOfInput => break,
                TokenKind::Punctuator(Punctuator::Semicolon) => {
                    self.advance();
                    break;
                }
                TokenKind::Punctuator(Punctuator::RightCurlyBracket) => break,
                TokenKind::Keyword(Keyword::Otherwise) => break,
                _ => self.advance(),
            }
        }

        self.state.panic_mode = false;
    }

    fn checkpoint(&self) -> Checkpoint<'source_code> {
        Checkpoint {
            current: self.current,
            lookahead: self.lookahead,
            panic_mode: self.state.panic_mode,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint<'source_code>) {
        self.current = checkpoint.current;
        self.lookahead = checkpoint.lookahead;
        self.state.panic_mode = checkpoint.panic_mode;
    }

    /// Reports a syntax error and enters panic mode. While panicking,
    /// further errors are swallowed.
    fn error(&mut self, kind: DiagnosticKind) {
        if self.state.panic_mode {
            return;
        }

        self.state.panic_mode = true;
        self.emit(self.current.line, kind, DiagnosticSeverity::Error, Some(self.current.lexeme));
    }

    /// Reports a recoverable mistake without entering panic mode.
    fn hint(&mut self, kind: DiagnosticKind) {
        self.emit(self.current.line, kind, DiagnosticSeverity::Hint, Some(self.current.lexeme));
    }

    fn report_lexical_error(&mut self, error: LexerErrorKind) {
        self.emit(self.current.line, DiagnosticKind::Lexical(error), DiagnosticSeverity::Error, None);
    }

    fn emit(&mut self, line: usize, kind: DiagnosticKind, severity: DiagnosticSeverity, found: Option<&str>) {
        self.state.success = false;

        let diagnostic = Diagnostic {
            line,
            kind,
            severity,
            found: found.map(ToString::to_string),
        };

        // Replayed spans repeat the diagnostics of their first pass.
        if self.stream.is_replaying() && self.state.diagnostics.contains(&diagnostic) {
            return;
        }

        log::debug!("{diagnostic}");
        self.state.diagnostics.push(diagnostic);
    }

    fn error_count(&self) -> usize {
        self.state.diagnostics.iter()
            .filter(|diagnostic| diagnostic.severity == DiagnosticSeverity::Error)
            .count()
    }

    fn executing(&self) -> bool {
        self.state.exec && self.state.flow == Flow::Normal
    }

    /// Runs `f` with side effects switched off, unless `enabled`.
    fn with_exec<R>(&mut self, enabled: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.state.exec;
        self.state.exec = saved && enabled;
        let result = f(self);
        self.state.exec = saved;
        result
    }

    fn next_answer(&mut self) -> Value {
        match self.answers.pop_front() {
            Some(answer) => Value::from_answer(&answer),
            None => {
                log::debug!("No answers left, `ask` yields an empty string");
                Value::Text(String::new())
            }
        }
    }

    fn write_output(&mut self, text: &str) {
        let was_truncated = self.state.output.is_truncated();

        if let Err(e) = self.state.output.push_str(text) {
            if !was_truncated {
                log::warn!("{e}, the rest is dropped");
            }
        }
    }

    fn end_output_line(&mut self) {
        let was_truncated = self.state.output.is_truncated();

        if let Err(e) = self.state.output.end_line() {
            if !was_truncated {
                log::warn!("{e}, the rest is dropped");
            }
        }
    }
}
