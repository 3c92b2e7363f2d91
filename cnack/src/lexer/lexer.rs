// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::AsRefStr;
use thiserror::Error;

use super::{Keyword, Punctuator, Token, TokenKind};

/// Pull-based scanner over an immutable source buffer.
///
/// The lexer is `Copy`: a copy taken between two calls to [`Lexer::next_token`]
/// is a checkpoint that resumes scanning from exactly the same position.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'source_code> {
    source: &'source_code str,
    cursor: usize,
    token_start: usize,
    line: usize,
}

impl<'source_code> Lexer<'source_code> {
    pub fn new(source: &'source_code str) -> Self {
        Self {
            source,
            cursor: 0,
            token_start: 0,
            line: 1,
        }
    }

    /// Scans the next token. At the end of the input this keeps returning
    /// [`TokenKind::EndOfInput`].
    pub fn next_token(&mut self) -> Token<'source_code> {
        self.skip_whitespace();

        self.token_start = self.cursor;
        let line = self.line;

        let Some(ch) = self.peek_char() else {
            return Token::end_of_input(self.cursor, line);
        };

        let kind = match ch {
            '"' | '\'' => self.consume_string(ch, TokenKind::StringLiteral),
            'f' if self.peek_second_char() == Some('"') => {
                self.consume_char();
                self.consume_string('"', TokenKind::FormatString)
            }

            'a'..='z' | 'A'..='Z' | '_' => self.consume_identifier_or_keyword(),
            '0'..='9' => self.consume_number(),

            ',' => self.consume_single_char_token(Punctuator::Comma),
            ';' => self.consume_single_char_token(Punctuator::Semicolon),
            ':' => self.consume_single_char_token(Punctuator::Colon),
            '(' => self.consume_single_char_token(Punctuator::LeftParenthesis),
            ')' => self.consume_single_char_token(Punctuator::RightParenthesis),
            '{' => self.consume_single_char_token(Punctuator::LeftCurlyBracket),
            '}' => self.consume_single_char_token(Punctuator::RightCurlyBracket),
            '[' => self.consume_single_char_token(Punctuator::LeftSquareBracket),
            ']' => self.consume_single_char_token(Punctuator::RightSquareBracket),
            '^' => self.consume_single_char_token(Punctuator::Caret),

            '+' => self.consume_doubled_or_assign_token(Punctuator::PlusSign, Punctuator::Increment, Punctuator::AddAssign),
            '-' => self.consume_minus(),
            '*' => self.consume_asterisk(),
            '/' => self.handle_solidus(),
            '%' => self.consume_assign_or_normal_token(Punctuator::PercentageSign, Punctuator::ModuloAssign),
            '=' => self.consume_assign_or_normal_token(Punctuator::Assignment, Punctuator::Equals),
            '!' => self.consume_assign_or_normal_token(Punctuator::Not, Punctuator::NotEquals),
            '<' => self.consume_assign_or_normal_token(Punctuator::LessThan, Punctuator::LessThanOrEqual),
            '>' => self.consume_assign_or_normal_token(Punctuator::GreaterThan, Punctuator::GreaterThanOrEqual),
            '&' => self.consume_single_or_double_char_token(Punctuator::Ampersand, Punctuator::LogicalAnd),
            '|' => {
                self.consume_char();
                if self.peek_char() == Some('|') {
                    self.consume_char();
                    TokenKind::Punctuator(Punctuator::LogicalOr)
                } else {
                    TokenKind::Error(LexerErrorKind::UnexpectedCharacter('|'))
                }
            }

            _ => {
                self.consume_char();
                TokenKind::Error(LexerErrorKind::UnexpectedCharacter(ch))
            }
        };

        let token = Token {
            kind,
            lexeme: &self.source[self.token_start..self.cursor],
            start: self.token_start,
            line,
        };

        log::trace!("Scanned {} `{}` on line {}", token.kind.name(), token.lexeme, token.line);
        token
    }

    #[must_use]
    fn consume_single_char_token(&mut self, punctuator: Punctuator) -> TokenKind {
        self.consume_char();
        TokenKind::Punctuator(punctuator)
    }

    fn consume_single_or_double_char_token(&mut self, single: Punctuator, double: Punctuator) -> TokenKind {
        let Some(ch) = self.next_char() else {
            return TokenKind::EndOfInput;
        };

        if self.peek_char() == Some(ch) {
            self.consume_char();
            TokenKind::Punctuator(double)
        } else {
            TokenKind::Punctuator(single)
        }
    }

    fn consume_assign_or_normal_token(&mut self, normal: Punctuator, assign: Punctuator) -> TokenKind {
        self.consume_char();

        if self.peek_char() == Some('=') {
            self.consume_char();
            TokenKind::Punctuator(assign)
        } else {
            TokenKind::Punctuator(normal)
        }
    }

    fn consume_doubled_or_assign_token(&mut self, normal: Punctuator, double: Punctuator, assign: Punctuator) -> TokenKind {
        let Some(ch) = self.next_char() else {
            return TokenKind::EndOfInput;
        };

        let punctuator = match self.peek_char() {
            Some(next) if next == ch => double,
            Some('=') => assign,
            _ => return TokenKind::Punctuator(normal),
        };

        self.consume_char();
        TokenKind::Punctuator(punctuator)
    }

    fn consume_minus(&mut self) -> TokenKind {
        self.consume_char();

        let punctuator = match self.peek_char() {
            Some('-') => Punctuator::Decrement,
            Some('=') => Punctuator::SubtractAssign,
            Some('>') => Punctuator::Arrow,
            _ => return TokenKind::Punctuator(Punctuator::HyphenMinus),
        };

        self.consume_char();
        TokenKind::Punctuator(punctuator)
    }

    fn consume_asterisk(&mut self) -> TokenKind {
        self.consume_char();

        let punctuator = match self.peek_char() {
            Some('|') => Punctuator::QuantumPointer,
            Some('=') => Punctuator::MultiplyAssign,
            _ => return TokenKind::Punctuator(Punctuator::Asterisk),
        };

        self.consume_char();
        TokenKind::Punctuator(punctuator)
    }

    fn handle_solidus(&mut self) -> TokenKind {
        self.consume_char();

        match self.peek_char() {
            Some('/') => {
                self.consume_until_end_of_line();
                TokenKind::SingleLineComment
            }

            Some('*') => {
                self.consume_char();
                self.consume_block_comment()
            }

            Some('=') => {
                self.consume_char();
                TokenKind::Punctuator(Punctuator::DivideAssign)
            }

            _ => TokenKind::Punctuator(Punctuator::Solidus),
        }
    }

    fn consume_until_end_of_line(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }

            self.consume_char();
        }
    }

    fn consume_block_comment(&mut self) -> TokenKind {
        while let Some(c) = self.next_char() {
            if c == '*' && self.peek_char() == Some('/') {
                self.consume_char();
                return TokenKind::MultiLineComment;
            }
        }

        TokenKind::Error(LexerErrorKind::UnterminatedComment)
    }

    fn consume_string(&mut self, quote: char, kind: TokenKind) -> TokenKind {
        self.consume_char();

        loop {
            let Some(c) = self.next_char() else {
                return TokenKind::Error(LexerErrorKind::UnterminatedString);
            };

            if c == quote {
                return kind;
            }
        }
    }

    fn consume_identifier_or_keyword(&mut self) -> TokenKind {
        while let Some(c) = self.peek_char() {
            if !is_identifier_char(c) {
                break;
            }

            self.consume_char();
        }

        match Keyword::parse(&self.source[self.token_start..self.cursor]) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        }
    }

    fn consume_number(&mut self) -> TokenKind {
        self.consume_digits();

        let is_fraction = self.peek_char() == Some('.')
            && self.peek_second_char().is_some_and(|c| c.is_ascii_digit());

        if !is_fraction {
            return TokenKind::Integer;
        }

        self.consume_char();
        self.consume_digits();
        TokenKind::Float
    }

    fn consume_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.consume_char();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }

            self.consume_char();
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.cursor..].chars().next()
    }

    fn peek_second_char(&self) -> Option<char> {
        self.source[self.cursor..].chars().nth(1)
    }

    fn next_char(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.consume_char();
        Some(c)
    }

    fn consume_char(&mut self) {
        let Some(c) = self.peek_char() else {
            return;
        };

        if c == '\n' {
            self.line += 1;
        }

        self.cursor += c.len_utf8();
    }
}

impl<'source_code> Iterator for Lexer<'source_code> {
    type Item = Token<'source_code>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();

        if token.kind == TokenKind::EndOfInput {
            None
        } else {
            Some(token)
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, AsRefStr)]
pub enum LexerErrorKind {
    #[error("Unterminated string")]
    UnterminatedString,

    #[error("Unterminated comment")]
    UnterminatedComment,

    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

impl LexerErrorKind {
    #[must_use]
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}
