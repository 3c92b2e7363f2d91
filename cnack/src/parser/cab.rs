// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{DiagnosticKind, Keyword, Punctuator, Value};

use super::{statement::Place, Parser};

impl<'source_code> Parser<'source_code> {
    /// `assign ( t1, ... ) { when cond : action ; ... otherwise : action ; }`
    ///
    /// Every branch is parsed, but only the first one whose condition holds
    /// has any effect. `otherwise` applies when no branch matched.
    pub(super) fn conditional_assignment_block(&mut self) {
        self.state.features.conditional_assignment = true;
        self.advance();

        if !self.consume(Punctuator::LeftParenthesis, "Expected '(' after assign") {
            return;
        }

        let mut targets = Vec::new();
        loop {
            let Some(target) = self.consume_identifier("Expected identifier") else {
                return;
            };
            targets.push(target);

            if !self.current.is(Punctuator::Comma) {
                break;
            }
            self.advance();
        }

        if !self.consume(Punctuator::RightParenthesis, "Expected ')'") {
            return;
        }

        if !self.consume(Punctuator::LeftCurlyBracket, "Expected '{'") {
            return;
        }

        let mut matched = false;
        while self.current.is(Keyword::When) {
            self.advance();

            let condition = self.with_exec(!matched, Self::expression);
            let take = !matched && condition.is_truthy();

            if self.consume(Punctuator::Colon, "Expected ':' after condition") {
                self.conditional_action(&targets, take);
                self.consume(Punctuator::Semicolon, "Expected ';'");
            }

            if self.state.panic_mode {
                self.synchronize();
            }

            matched |= take;
        }

        if !self.consume(Keyword::Otherwise, "Expected 'otherwise' in assign block") {
            return;
        }

        if !self.consume(Punctuator::Colon, "Expected ':' after otherwise") {
            return;
        }

        self.conditional_action(&targets, !matched);
        self.consume(Punctuator::Semicolon, "Expected ';'");
        self.consume(Punctuator::RightCurlyBracket, "Expected '}'");
    }

    fn conditional_action(&mut self, targets: &[&'source_code str], take: bool) {
        let values = self.with_exec(take, Self::action_values);

        if !values.is_empty() && values.len() != targets.len() {
            self.hint(DiagnosticKind::ConditionalAssignmentArity {
                values: values.len(),
                targets: targets.len(),
            });
        }

        if !take || !self.executing() || self.state.panic_mode {
            return;
        }

        for (target, value) in targets.iter().zip(values) {
            self.assign(target, Place::Whole, Punctuator::Assignment, value);
        }
    }

    /// `( element, ... )` or a single element. Nested blocks run in place
    /// and contribute no value.
    fn action_values(&mut self) -> Vec<Value> {
        let mut values = Vec::new();

        if !self.current.is(Punctuator::LeftParenthesis) {
            self.action_element(&mut values);
            return values;
        }
        self.advance();

        loop {
            self.action_element(&mut values);

            if !self.current.is(Punctuator::Comma) {
                break;
            }
            self.advance();
        }

        self.consume(Punctuator::RightParenthesis, "Expected ')'");
        values
    }

    fn action_element(&mut self, values: &mut Vec<Value>) {
        if self.current.is(Keyword::Assign) {
            self.conditional_assignment_block();
        } else {
            values.push(self.expression());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{DiagnosticKind, InterpreterConfig, Parser, Value};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run_statements(source: &str) -> Parser<'_> {
        let mut parser = Parser::new(source, InterpreterConfig::default());
        parser.statement_list();
        parser
    }

    fn number(parser: &Parser<'_>, name: &str) -> Option<f64> {
        parser.state.symbols.value(name).map(Value::as_number)
    }

    #[rstest]
    #[case("assign(x){ when 0: (1); when 1: (2); otherwise: (3); }", 2.0)]
    #[case("assign(x){ when 1: (1); when 1: (2); otherwise: (3); }", 1.0)]
    #[case("assign(x){ when 0: (1); otherwise: (3); }", 3.0)]
    #[case("assign(x){ when 0: 1; otherwise: 4 + 1; }", 5.0)]
    fn first_match_wins(#[case] source: &str, #[case] expected: f64) {
        let parser = run_statements(source);

        assert_eq!(parser.state.diagnostics, Vec::new());
        assert!(parser.state.features.conditional_assignment);
        assert_eq!(number(&parser, "x"), Some(expected));
    }

    #[test]
    fn multiple_targets_are_positional() {
        let parser = run_statements("assign(a, b){ when 1: (1, 2); otherwise: (3, 4); }");

        assert_eq!(number(&parser, "a"), Some(1.0));
        assert_eq!(number(&parser, "b"), Some(2.0));
    }

    #[test]
    fn nested_blocks_run_only_when_taken() {
        let parser = run_statements("\
            assign(a){\
                when 0: (assign(b){ when 1: (10); otherwise: (20); }, 1);\
                otherwise: (assign(c){ when 1: (30); otherwise: (40); }, 2);\
            }");

        assert_eq!(parser.state.diagnostics, Vec::new());
        assert_eq!(number(&parser, "a"), Some(2.0));
        assert_eq!(number(&parser, "b"), None);
        assert_eq!(number(&parser, "c"), Some(30.0));
    }

    #[test]
    fn arity_mismatch_is_a_hint() {
        let parser = run_statements("assign(a, b){ when 1: (1); otherwise: (3, 4); }");

        assert_eq!(parser.state.diagnostics.len(), 1);
        assert_eq!(parser.state.diagnostics[0].kind, DiagnosticKind::ConditionalAssignmentArity { values: 1, targets: 2 });
        assert_eq!(number(&parser, "a"), Some(1.0));
    }

    #[test]
    fn otherwise_is_mandatory() {
        let parser = run_statements("assign(x){ when 1: (1); }");

        assert_eq!(parser.state.diagnostics.len(), 1);
        assert!(!parser.state.success);
    }
}
