// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{DiagnosticKind, DiagnosticSeverity, Keyword, Punctuator, TokenKind};

use super::{Flow, Parser, TokenSpan};

/// The captured parts of a loop.
struct LoopSpans<'source_code> {
    /// `None` for a `for` without condition, which always holds.
    condition: Option<TokenSpan<'source_code>>,
    update: Option<TokenSpan<'source_code>>,
    body: TokenSpan<'source_code>,
    /// `false` for `do`-`while`, whose body runs before the first check.
    checks_first: bool,
    line: usize,
}

impl<'source_code> Parser<'source_code> {
    pub(super) fn block(&mut self) {
        if !self.consume(Punctuator::LeftCurlyBracket, "Expected '{'") {
            return;
        }

        self.statement_list();
        self.consume(Punctuator::RightCurlyBracket, "Expected '}'");
    }

    pub(super) fn if_statement(&mut self) {
        self.advance();
        let mut taken = self.conditional_branch(false);

        loop {
            match self.current.kind {
                TokenKind::Keyword(Keyword::Elif) => {
                    self.advance();
                }

                TokenKind::Keyword(Keyword::Else) if self.lookahead.is(Keyword::If) => {
                    self.hint(DiagnosticKind::ElseIf);
                    self.advance();
                    self.advance();
                }

                TokenKind::Keyword(Keyword::Else) => {
                    self.advance();
                    self.with_exec(!taken, Self::block);
                    return;
                }

                _ => return,
            }

            taken |= self.conditional_branch(taken);
        }
    }

    /// `( condition ) block`. Returns whether the block was chosen.
    fn conditional_branch(&mut self, already_taken: bool) -> bool {
        if !self.consume(Punctuator::LeftParenthesis, "Expected '(' after condition keyword") {
            return false;
        }

        let condition = self.with_exec(!already_taken, Self::expression);
        self.consume(Punctuator::RightParenthesis, "Expected ')'");

        let take = !already_taken && condition.is_truthy();
        self.with_exec(take, Self::block);
        take
    }

    pub(super) fn while_statement(&mut self) {
        let line = self.current.line;
        let errors = self.error_count();
        self.advance();

        if !self.consume(Punctuator::LeftParenthesis, "Expected '(' after while") {
            return;
        }

        let condition = self.capture(Punctuator::RightParenthesis);
        self.consume(Punctuator::RightParenthesis, "Expected ')'");

        let Some(body) = self.capture_block() else {
            return;
        };

        self.run_loop(LoopSpans {
            condition: Some(condition),
            update: None,
            body,
            checks_first: true,
            line,
        }, errors);
    }

    pub(super) fn do_while_statement(&mut self) {
        let line = self.current.line;
        let errors = self.error_count();
        self.advance();

        let Some(body) = self.capture_block() else {
            return;
        };

        self.consume(Keyword::While, "Expected 'while' after do block");
        if !self.consume(Punctuator::LeftParenthesis, "Expected '(' after while") {
            return;
        }

        let condition = self.capture(Punctuator::RightParenthesis);
        self.consume(Punctuator::RightParenthesis, "Expected ')'");
        self.consume(Punctuator::Semicolon, "Expected ';'");

        self.run_loop(LoopSpans {
            condition: Some(condition),
            update: None,
            body,
            checks_first: false,
            line,
        }, errors);
    }

    pub(super) fn for_statement(&mut self) {
        let line = self.current.line;
        let errors = self.error_count();
        self.advance();

        if !self.consume(Punctuator::LeftParenthesis, "Expected '(' after for") {
            return;
        }

        // The initializer runs exactly once, before the loop is captured.
        match self.current.kind {
            TokenKind::Punctuator(Punctuator::Semicolon) => self.advance(),
            TokenKind::Keyword(Keyword::Const) => self.declaration(),
            TokenKind::Keyword(keyword) if keyword.is_primitive_type() => self.declaration(),
            TokenKind::Identifier if self.state.types.contains(self.current.lexeme) => self.declaration(),
            TokenKind::Identifier => self.assignment(true),
            _ => self.error(DiagnosticKind::InvalidForInit),
        }

        if self.state.panic_mode {
            self.synchronize();
        }

        let condition = Some(self.capture(Punctuator::Semicolon))
            .filter(|condition| !condition.is_empty());
        self.consume(Punctuator::Semicolon, "Expected ';'");

        let update = self.capture(Punctuator::RightParenthesis);
        self.consume(Punctuator::RightParenthesis, "Expected ')'");

        let Some(body) = self.capture_block() else {
            return;
        };

        self.run_loop(LoopSpans {
            condition,
            update: Some(update),
            body,
            checks_first: true,
            line,
        }, errors);
    }

    fn capture_block(&mut self) -> Option<TokenSpan<'source_code>> {
        if !self.consume(Punctuator::LeftCurlyBracket, "Expected '{'") {
            return None;
        }

        let body = self.capture(Punctuator::RightCurlyBracket);
        self.consume(Punctuator::RightCurlyBracket, "Expected '}'");
        Some(body)
    }

    /// Collects the tokens up to the `closer` at nesting depth zero, leaving
    /// the closer as the current token. Clauses also end at any depth-zero
    /// `;`, `)` or brace.
    fn capture(&mut self, closer: Punctuator) -> TokenSpan<'source_code> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;

        loop {
            let token = self.current;

            match token.kind {
                TokenKind::EndOfInput => break,

                TokenKind::Punctuator(punctuator) if depth == 0 => {
                    let is_clause_end = closer != Punctuator::RightCurlyBracket && matches!(punctuator,
                        Punctuator::Semicolon
                            | Punctuator::RightParenthesis
                            | Punctuator::LeftCurlyBracket
                            | Punctuator::RightCurlyBracket
                    );

                    if punctuator == closer || is_clause_end {
                        break;
                    }
                }

                _ => (),
            }

            match token.kind {
                TokenKind::Punctuator(Punctuator::LeftParenthesis
                    | Punctuator::LeftCurlyBracket
                    | Punctuator::LeftSquareBracket) => depth += 1,

                TokenKind::Punctuator(Punctuator::RightParenthesis
                    | Punctuator::RightCurlyBracket
                    | Punctuator::RightSquareBracket) => depth = depth.saturating_sub(1),

                _ => (),
            }

            tokens.push(token);
            self.advance();
        }

        TokenSpan::new(tokens, closer, self.current)
    }

    /// Runs `routine` over the tokens of `span`, then puts the parser back
    /// where it was.
    fn replay<R>(&mut self, span: &TokenSpan<'source_code>, routine: impl FnOnce(&mut Self) -> R) -> R {
        let checkpoint = self.checkpoint();
        self.stream.push(span.clone());
        self.state.panic_mode = false;

        self.lookahead = self.pull();
        self.advance();

        let result = routine(self);

        if !self.current.is(TokenKind::EndOfInput) {
            let message = match span.closer() {
                Punctuator::RightParenthesis => "Expected ')'",
                Punctuator::Semicolon => "Expected ';'",
                _ => "Expected '}'",
            };
            self.error(DiagnosticKind::Expected { message });
        }

        self.stream.pop();
        self.restore(checkpoint);
        result
    }

    fn evaluate_condition(&mut self, condition: Option<&TokenSpan<'source_code>>) -> bool {
        let Some(condition) = condition else {
            return true;
        };

        self.replay(condition, Self::expression).is_truthy()
    }

    fn run_update(&mut self, update: Option<&TokenSpan<'source_code>>) {
        if let Some(update) = update.filter(|update| !update.is_empty()) {
            self.replay(update, |this| this.assignment(false));
        }
    }

    /// Validates every part once with side effects disabled, in source
    /// order, and then iterates if nothing was wrong.
    fn run_loop(&mut self, spans: LoopSpans<'source_code>, errors_before: usize) {
        self.state.panic_mode = false;
        self.state.loop_depth += 1;

        self.with_exec(false, |this| {
            if spans.checks_first {
                this.evaluate_condition(spans.condition.as_ref());
                this.run_update(spans.update.as_ref());
                this.replay(&spans.body, Self::statement_list);
            } else {
                this.replay(&spans.body, Self::statement_list);
                this.evaluate_condition(spans.condition.as_ref());
            }
        });

        if self.error_count() != errors_before {
            log::debug!("Not running malformed loop on line {}", spans.line);
        } else if self.executing() {
            self.iterate(&spans);
        }

        self.state.loop_depth -= 1;
    }

    fn iterate(&mut self, spans: &LoopSpans<'source_code>) {
        let limit = self.config.max_iterations;
        let mut iterations = 0;
        let mut check = spans.checks_first;

        loop {
            if check && !self.evaluate_condition(spans.condition.as_ref()) {
                break;
            }
            check = true;

            if iterations == limit {
                log::warn!("Loop on line {} stopped after {limit} iterations", spans.line);
                self.emit(spans.line, DiagnosticKind::IterationLimit { limit }, DiagnosticSeverity::Error, None);
                break;
            }
            iterations += 1;

            self.replay(&spans.body, Self::statement_list);

            if std::mem::replace(&mut self.state.flow, Flow::Normal) == Flow::Break {
                break;
            }

            self.run_update(spans.update.as_ref());
        }

        log::debug!("Loop on line {} ran {iterations} iteration(s)", spans.line);
    }
}
