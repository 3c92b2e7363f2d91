// Copyright (C) 2023 - 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::AsRefStr, strum::IntoStaticStr, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Keyword {
    Int,
    Float,
    Char,
    Bool,
    Boolean,
    String,
    #[strum(serialize = "String")]
    CapitalString,

    Const,
    If,
    Else,
    Elif,
    Switch,
    Case,
    Default,
    Assign,
    Struct,
    For,
    While,
    Do,
    Break,
    Continue,
    Ask,
    Display,
    True,
    False,
    Fn,

    Execute,
    Exit,
    Fetch,
    When,
    Otherwise,
    AutoRef,
}

impl Keyword {
    /// Exact, case-sensitive lookup of a spelling.
    pub fn parse(input: &str) -> Option<Self> {
        Self::iter().find(|x| x.as_ref() == input)
    }

    /// Finds the keyword that differs from `input` only in letter case.
    pub fn parse_ignoring_case(input: &str) -> Option<Self> {
        if Self::parse(input).is_some() {
            return None;
        }

        Self::iter().find(|x| x.as_ref() != input && x.as_ref().eq_ignore_ascii_case(input))
    }

    #[must_use]
    pub fn spelling(&self) -> &'static str {
        self.into()
    }

    #[must_use]
    pub const fn is_primitive_type(&self) -> bool {
        matches!(self,
            Self::Int | Self::Float | Self::Char | Self::Bool
                | Self::Boolean | Self::String | Self::CapitalString
        )
    }

    #[must_use]
    pub const fn is_string_type(&self) -> bool {
        matches!(self, Self::String | Self::CapitalString)
    }

    /// The category name shown in the token table.
    #[must_use]
    pub const fn token_name(&self) -> &'static str {
        match self {
            Self::Int => "TYPE_INT",
            Self::Float => "TYPE_FLOAT",
            Self::Char => "TYPE_CHAR",
            Self::Bool | Self::Boolean => "TYPE_BOOL",
            Self::String | Self::CapitalString => "TYPE_STRING",

            Self::Const => "KW_CONST",
            Self::If => "KW_IF",
            Self::Else => "KW_ELSE",
            Self::Elif => "KW_ELIF",
            Self::Switch => "KW_SWITCH",
            Self::Case => "KW_CASE",
            Self::Default => "KW_DEFAULT",
            Self::Assign => "KW_ASSIGN",
            Self::Struct => "KW_STRUCT",
            Self::For => "KW_FOR",
            Self::While => "KW_WHILE",
            Self::Do => "KW_DO",
            Self::Break => "KW_BREAK",
            Self::Continue => "KW_CONTINUE",
            Self::Ask => "KW_ASK",
            Self::Display => "KW_DISPLAY",
            Self::True => "KW_TRUE",
            Self::False => "KW_FALSE",
            Self::Fn => "KW_FN",

            Self::Execute => "RW_EXECUTE",
            Self::Exit => "RW_EXIT",
            Self::Fetch => "RW_FETCH",
            Self::When => "RW_WHEN",
            Self::Otherwise => "RW_OTHERWISE",
            Self::AutoRef => "RW_AUTO_REF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("int", Some(Keyword::Int))]
    #[case("string", Some(Keyword::String))]
    #[case("String", Some(Keyword::CapitalString))]
    #[case("boolean", Some(Keyword::Boolean))]
    #[case("auto_ref", Some(Keyword::AutoRef))]
    #[case("otherwise", Some(Keyword::Otherwise))]
    #[case("Display", None)]
    #[case("integer", None)]
    fn parse(#[case] input: &str, #[case] expected: Option<Keyword>) {
        assert_eq!(Keyword::parse(input), expected);
    }

    #[rstest]
    #[case("Display", Some(Keyword::Display))]
    #[case("WHILE", Some(Keyword::While))]
    #[case("Int", Some(Keyword::Int))]
    #[case("display", None)]
    #[case("String", None)]
    #[case("counter", None)]
    fn parse_ignoring_case(#[case] input: &str, #[case] expected: Option<Keyword>) {
        assert_eq!(Keyword::parse_ignoring_case(input), expected);
    }
}
