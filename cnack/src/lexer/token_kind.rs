// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use super::{Keyword, LexerErrorKind, Punctuator};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Punctuator(Punctuator),

    Identifier,
    Integer,
    Float,
    StringLiteral,
    /// A string literal prefixed with `f`, interpolated wherever it is used.
    FormatString,

    SingleLineComment,
    MultiLineComment,

    Error(LexerErrorKind),
    EndOfInput,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keyword(keyword) => keyword.token_name(),
            Self::Punctuator(punctuator) => punctuator.token_name(),

            Self::Identifier => "IDENTIFIER",
            Self::Integer => "NUMBER_INT",
            Self::Float => "NUMBER_FLOAT",
            Self::StringLiteral | Self::FormatString => "STRING",

            Self::SingleLineComment => "SINGLE_COMMENT",
            Self::MultiLineComment => "MULTI_COMMENT",

            Self::Error(..) => "ERROR",
            Self::EndOfInput => "EOF",
        }
    }

    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::SingleLineComment | Self::MultiLineComment)
    }
}

impl From<Keyword> for TokenKind {
    fn from(value: Keyword) -> Self {
        Self::Keyword(value)
    }
}

impl From<Punctuator> for TokenKind {
    fn from(value: Punctuator) -> Self {
        Self::Punctuator(value)
    }
}
