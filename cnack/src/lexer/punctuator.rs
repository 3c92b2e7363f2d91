// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use strum::IntoStaticStr;

/// Separators and operators. The `strum` name is the category shown in the
/// token table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum Punctuator {
    #[strum(serialize = "COMMA")]
    Comma,
    #[strum(serialize = "SEMICOLON")]
    Semicolon,
    #[strum(serialize = "COLON")]
    Colon,
    #[strum(serialize = "L_PAREN")]
    LeftParenthesis,
    #[strum(serialize = "R_PAREN")]
    RightParenthesis,
    #[strum(serialize = "L_BRACE")]
    LeftCurlyBracket,
    #[strum(serialize = "R_BRACE")]
    RightCurlyBracket,
    #[strum(serialize = "L_BRACKET")]
    LeftSquareBracket,
    #[strum(serialize = "R_BRACKET")]
    RightSquareBracket,

    #[strum(serialize = "ADD_OP")]
    PlusSign,
    #[strum(serialize = "SUB_OP")]
    HyphenMinus,
    #[strum(serialize = "MULT_OP")]
    Asterisk,
    #[strum(serialize = "DIV_OP")]
    Solidus,
    #[strum(serialize = "MOD_OP")]
    PercentageSign,
    #[strum(serialize = "EXPO_OP")]
    Caret,

    #[strum(serialize = "ASSIGN_OP")]
    Assignment,
    #[strum(serialize = "ADD_ASSIGN_OP")]
    AddAssign,
    #[strum(serialize = "SUB_ASSIGN_OP")]
    SubtractAssign,
    #[strum(serialize = "MULT_ASSIGN_OP")]
    MultiplyAssign,
    #[strum(serialize = "DIV_ASSIGN_OP")]
    DivideAssign,
    #[strum(serialize = "MOD_ASSIGN_OP")]
    ModuloAssign,

    #[strum(serialize = "INCREMENT_OP")]
    Increment,
    #[strum(serialize = "DECREMENT_OP")]
    Decrement,
    #[strum(serialize = "ADDRESS_OF_OP")]
    Ampersand,

    #[strum(serialize = "EQUAL_TO_OP")]
    Equals,
    #[strum(serialize = "NOT_EQUAL_TO_OP")]
    NotEquals,
    #[strum(serialize = "GREATER_OP")]
    GreaterThan,
    #[strum(serialize = "GREATER_EQUAL_OP")]
    GreaterThanOrEqual,
    #[strum(serialize = "LESS_OP")]
    LessThan,
    #[strum(serialize = "LESS_EQUAL_OP")]
    LessThanOrEqual,

    #[strum(serialize = "LOGICAL_NOT_OP")]
    Not,
    #[strum(serialize = "LOGICAL_AND_OP")]
    LogicalAnd,
    #[strum(serialize = "LOGICAL_OR_OP")]
    LogicalOr,

    #[strum(serialize = "ARROW_OP")]
    Arrow,
    #[strum(serialize = "QUANTUM_POINTER_OP")]
    QuantumPointer,
}

impl Punctuator {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::LeftParenthesis => "(",
            Self::RightParenthesis => ")",
            Self::LeftCurlyBracket => "{",
            Self::RightCurlyBracket => "}",
            Self::LeftSquareBracket => "[",
            Self::RightSquareBracket => "]",
            Self::PlusSign => "+",
            Self::HyphenMinus => "-",
            Self::Asterisk => "*",
            Self::Solidus => "/",
            Self::PercentageSign => "%",
            Self::Caret => "^",
            Self::Assignment => "=",
            Self::AddAssign => "+=",
            Self::SubtractAssign => "-=",
            Self::MultiplyAssign => "*=",
            Self::DivideAssign => "/=",
            Self::ModuloAssign => "%=",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Ampersand => "&",
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Not => "!",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::Arrow => "->",
            Self::QuantumPointer => "*|",
        }
    }

    #[must_use]
    pub const fn is_assignment(&self) -> bool {
        matches!(self,
            Self::Assignment | Self::AddAssign | Self::SubtractAssign
                | Self::MultiplyAssign | Self::DivideAssign | Self::ModuloAssign
        )
    }

    #[must_use]
    pub fn token_name(&self) -> &'static str {
        self.into()
    }
}

impl Display for Punctuator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
