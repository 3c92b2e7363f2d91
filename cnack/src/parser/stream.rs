// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::rc::Rc;

use crate::{Lexer, Punctuator, Token};

/// An immutable run of tokens captured once (a loop condition, update
/// clause or body) and replayed as often as needed.
#[derive(Debug, Clone)]
pub struct TokenSpan<'source_code> {
    tokens: Rc<[Token<'source_code>]>,
    closer: Punctuator,
    end: Token<'source_code>,
}

impl<'source_code> TokenSpan<'source_code> {
    /// Creates a span that ends where `closer_token` starts. Replaying the
    /// span yields an end-of-input token at that position.
    #[must_use]
    pub fn new(tokens: Vec<Token<'source_code>>, closer: Punctuator, closer_token: Token<'source_code>) -> Self {
        Self {
            tokens: tokens.into(),
            closer,
            end: Token::end_of_input(closer_token.start, closer_token.line),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub const fn closer(&self) -> Punctuator {
        self.closer
    }
}

#[derive(Debug)]
struct ReplayFrame<'source_code> {
    span: TokenSpan<'source_code>,
    cursor: usize,
}

/// Hands out tokens from the lexer, or from the innermost span being
/// replayed.
#[derive(Debug)]
pub struct TokenStream<'source_code> {
    lexer: Lexer<'source_code>,
    frames: Vec<ReplayFrame<'source_code>>,
}

impl<'source_code> TokenStream<'source_code> {
    pub fn new(source: &'source_code str) -> Self {
        Self {
            lexer: Lexer::new(source),
            frames: Vec::new(),
        }
    }

    pub fn next_token(&mut self) -> Token<'source_code> {
        let Some(frame) = self.frames.last_mut() else {
            return self.lexer.next_token();
        };

        match frame.span.tokens.get(frame.cursor) {
            Some(token) => {
                frame.cursor += 1;
                *token
            }
            None => frame.span.end,
        }
    }

    pub fn push(&mut self, span: TokenSpan<'source_code>) {
        log::trace!("Replaying {} token(s) at depth {}", span.len(), self.frames.len() + 1);
        self.frames.push(ReplayFrame {
            span,
            cursor: 0,
        });
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    #[must_use]
    pub fn is_replaying(&self) -> bool {
        !self.frames.is_empty()
    }
}

/// The parser state a replay must put back once it is done.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'source_code> {
    pub current: Token<'source_code>,
    pub lookahead: Token<'source_code>,
    pub panic_mode: bool,
}
