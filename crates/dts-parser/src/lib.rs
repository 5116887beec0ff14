//! Declaration-file parser
//!
//! A grammar-driven backtracking matcher over a character buffer. Matched
//! rules are appended to a flat token log; on success the log is folded into
//! a nested tree (and a gap-filling pre-order walk), on failure it is mined
//! for a diagnostic trail.
//!
//! ```text
//! source → Parser (Cursor + TokenLog) → SyntaxTree → Node / PreOrder / walk()
//!                                     ↘ ParseError (diagnostic trail)
//! ```
//!
//! # Example
//!
//! ```
//! let tree = dts_parser::parse("module Foo { var x: number; }").unwrap();
//! let root = tree.root().unwrap();
//! assert_eq!(root.span().end, tree.source_len());
//! ```

pub mod diagnostics;
pub mod grammar;
pub mod log;
pub mod parser;
pub mod tree;
pub mod walk;

pub use diagnostics::Diagnostic;
pub use dts_syntax::{Gap, Position, Rule, Span, Token};
pub use log::TokenLog;
pub use parser::{Match, NoMatch, ParseState, Parser};
pub use tree::{build_tree, DepthGroups, Node, Ordered, PreOrder, Step, StepKind, SyntaxTree};
pub use walk::{BlockKind, DeclarationVisitor};

/// The start rule did not match the whole input.
///
/// Displays as the full diagnostic trail. No partial tree accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", diagnostics::render(.diagnostics))]
pub struct ParseError {
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }
}

/// Parse a declaration file in one go.
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    Parser::new(source).into_tree()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_error_display_is_trail() {
        let err = parse("module Foo { var x number; }").unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("parse error near TypeSeparator (line 1, column 19 - line 1, column 20):\n \n"));
        assert_eq!(message.matches("parse error near ").count(), err.diagnostics.len());
    }

    #[test]
    fn test_missing_colon_trail() {
        let err = parse("module Foo { var x number; }").unwrap_err();
        let rules: Vec<Rule> = err.diagnostics.iter().map(|d| d.rule).collect();
        assert_eq!(
            rules,
            vec![
                Rule::TypeSeparator,
                Rule::Space,
                Rule::Space,
                Rule::Modifier,
                Rule::BlockStart,
                Rule::Space,
                Rule::Space,
            ]
        );
        assert_eq!(err.diagnostics[0].span, Span::new(18, 19));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(parse("").is_err());
        assert!(parse("   // nothing here\n").is_err());
    }

    #[test]
    fn test_parser_state_transitions() {
        let mut parser = Parser::new("module Foo {}");
        assert_eq!(parser.state(), ParseState::Fresh);
        assert!(parser.parse().is_ok());
        assert_eq!(parser.state(), ParseState::Accepted);
        assert_eq!(parser.diagnostics(), "");

        let mut parser = Parser::new("module {}");
        assert!(parser.parse().is_err());
        assert_eq!(parser.state(), ParseState::Rejected);
        assert!(parser.diagnostics().starts_with("parse error near "));
    }

    #[test]
    fn test_reset_then_reparse_is_identical() {
        let mut parser = Parser::new("class A { b(c: number): void; }");
        parser.parse().unwrap();
        let first = parser.tokens().to_vec();

        parser.reset();
        assert_eq!(parser.state(), ParseState::Fresh);
        assert!(parser.tokens().is_empty());
        assert_eq!(parser.cursor().position(), 0);

        parser.parse().unwrap();
        assert_eq!(parser.tokens(), first.as_slice());
    }

    #[test]
    fn test_into_tree_after_rejection() {
        let mut parser = Parser::new("class {");
        let expected = parser.parse().unwrap_err();
        assert_eq!(parser.into_tree().unwrap_err(), expected);
    }
}
