// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{borrow::Cow, fmt::{Display, Formatter}};

use cnack::{Lexer, Token, TokenKind};

const BANNER: &str = "================================================";

/// The `LINE | TOKEN TYPE | LEXEME` table of every token in a source file,
/// end of input included.
pub struct TokenTable<'source_code> {
    source_code: &'source_code str,
}

impl<'source_code> TokenTable<'source_code> {
    #[must_use]
    pub const fn new(source_code: &'source_code str) -> Self {
        Self { source_code }
    }
}

impl Display for TokenTable<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{BANNER}")?;
        writeln!(f, "     LEXICAL ANALYSIS RESULTS")?;
        writeln!(f, "{BANNER}")?;
        writeln!(f, "LINE   | TOKEN TYPE           | LEXEME")?;
        writeln!(f, "-------|----------------------|----------------------------------")?;

        let mut lexer = Lexer::new(self.source_code);
        loop {
            let token = lexer.next_token();
            writeln!(f, "{:<6} | {:<20} | {}", token.line, token.kind.name(), printable_lexeme(&token))?;

            if token.kind == TokenKind::EndOfInput {
                break;
            }
        }

        writeln!(f, "{BANNER}")?;
        writeln!(f, "     END OF ANALYSIS")?;
        writeln!(f, "{BANNER}")
    }
}

/// Lexemes that may span lines are flattened onto one row.
fn printable_lexeme<'source_code>(token: &Token<'source_code>) -> Cow<'source_code, str> {
    match token.kind {
        TokenKind::StringLiteral | TokenKind::FormatString | TokenKind::MultiLineComment | TokenKind::Error(..) => {
            Cow::Owned(token.lexeme.replace(|c: char| matches!(c, '\n' | '\r' | '\t'), " "))
        }
        _ => Cow::Borrowed(token.lexeme),
    }
}
