// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use super::TokenKind;

/// A classified slice of the source buffer. The lexeme borrows from the
/// source, so a token can never outlive the text it was scanned from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'source_code> {
    pub kind: TokenKind,
    pub lexeme: &'source_code str,
    /// Byte offset of the first character.
    pub start: usize,
    /// The line the token starts on, counting from 1.
    pub line: usize,
}

impl<'source_code> Token<'source_code> {
    #[must_use]
    pub const fn end_of_input(start: usize, line: usize) -> Self {
        Self {
            kind: TokenKind::EndOfInput,
            lexeme: "",
            start,
            line,
        }
    }

    #[must_use]
    pub fn is(&self, kind: impl Into<TokenKind>) -> bool {
        self.kind == kind.into()
    }

    /// The contents of a string literal, without its quotes or `f` prefix.
    #[must_use]
    pub fn string_contents(&self) -> &'source_code str {
        let lexeme = self.lexeme.strip_prefix('f').unwrap_or(self.lexeme);
        let mut chars = lexeme.chars();

        match chars.next() {
            Some(quote @ ('"' | '\'')) => {
                let inner = chars.as_str();
                inner.strip_suffix(quote).unwrap_or(inner)
            }
            _ => lexeme,
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.lexeme)
    }
}
