//! Error locator for rejected input.
//!
//! A rejected parse rolls the live log back to nothing, but every entry ever
//! written is still readable. Those entries are grouped by depth; from the
//! deepest level up to the root, the second-to-last token of each level (the
//! last rule entered there before the one that finally matched) becomes one
//! diagnostic block. A level holding a single token contributes that token.
//!
//! Failed rules leave nothing in the log, so the parser separately remembers
//! the non-trivia rule whose failure reached furthest into the input. When
//! present it opens the trail, ahead of the per-level blocks.

use std::fmt;

use dts_syntax::{translate_positions, Position, Rule, Span, Token};

use crate::tree::DepthGroups;

/// One block of the diagnostic trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule: Rule,
    pub span: Span,
    pub start: Position,
    pub end: Position,
    /// Source text under `span`.
    pub text: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "parse error near {} ({} - {}):",
            self.rule, self.start, self.end
        )?;
        writeln!(f, "{}", self.text)
    }
}

/// Pick one token per depth level, deepest first.
pub fn select(written: &[Token]) -> Vec<Token> {
    DepthGroups::new(written)
        .levels()
        .iter()
        .rev()
        .filter_map(|level| match level.len() {
            0 => None,
            1 => Some(level[0].token),
            n => Some(level[n - 2].token),
        })
        .collect()
}

/// Build the diagnostic trail for a rejected parse over `chars`.
pub fn locate(written: &[Token], furthest: Option<Token>, chars: &[char]) -> Vec<Diagnostic> {
    let picked: Vec<Token> = furthest.into_iter().chain(select(written)).collect();
    let offsets: Vec<usize> = picked
        .iter()
        .flat_map(|t| [t.span.start, t.span.end])
        .collect();
    let positions = translate_positions(chars, &offsets);

    picked
        .into_iter()
        .map(|token| Diagnostic {
            rule: token.rule,
            span: token.span,
            start: positions.get(token.span.start).unwrap_or_default(),
            end: positions.get(token.span.end).unwrap_or_default(),
            text: chars
                .get(token.span.start..token.span.end)
                .map(|s| s.iter().collect())
                .unwrap_or_default(),
        })
        .collect()
}

/// Concatenate the blocks of a trail.
pub fn render(diagnostics: &[Diagnostic]) -> String {
    if diagnostics.is_empty() {
        return "parse error: nothing matched\n".to_string();
    }
    diagnostics.iter().map(Diagnostic::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(rule: Rule, start: usize, end: usize, depth: usize) -> Token {
        Token::new(rule, Span::new(start, end), depth)
    }

    #[test]
    fn test_select_second_to_last_deepest_first() {
        let written = vec![
            token(Rule::Space, 0, 0, 1),
            token(Rule::Keyword, 0, 6, 2),
            token(Rule::Space, 6, 7, 2),
            token(Rule::Identifier, 7, 10, 2),
            token(Rule::Space, 10, 11, 3),
        ];
        assert_eq!(
            select(&written),
            vec![
                token(Rule::Space, 10, 11, 3),
                token(Rule::Space, 6, 7, 2),
                token(Rule::Space, 0, 0, 1),
            ]
        );
    }

    #[test]
    fn test_select_skips_empty_levels() {
        let written = vec![token(Rule::Space, 0, 1, 0), token(Rule::Eol, 1, 2, 2)];
        let picked: Vec<Rule> = select(&written).iter().map(|t| t.rule).collect();
        assert_eq!(picked, vec![Rule::Eol, Rule::Space]);
    }

    #[test]
    fn test_locate_translates_positions_and_text() {
        let chars: Vec<char> = "module Foo\n{ x }".chars().collect();
        let written = vec![
            token(Rule::Identifier, 7, 10, 1),
            token(Rule::BlockStart, 10, 13, 1),
        ];
        let trail = locate(&written, None, &chars);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].rule, Rule::Identifier);
        assert_eq!(trail[0].start, Position::new(1, 8));
        assert_eq!(trail[0].end, Position::new(1, 11));
        assert_eq!(trail[0].text, "Foo");
    }

    #[test]
    fn test_furthest_failure_opens_trail() {
        let chars: Vec<char> = "x number".chars().collect();
        let written = vec![token(Rule::Identifier, 0, 1, 2), token(Rule::Space, 1, 2, 3)];
        let furthest = token(Rule::TypeSeparator, 1, 2, 2);
        let trail = locate(&written, Some(furthest), &chars);
        let rules: Vec<Rule> = trail.iter().map(|d| d.rule).collect();
        assert_eq!(rules, vec![Rule::TypeSeparator, Rule::Space, Rule::Identifier]);
        assert_eq!(trail[0].start, Position::new(1, 2));
        assert_eq!(trail[0].end, Position::new(1, 3));
        assert_eq!(trail[0].text, " ");
    }

    #[test]
    fn test_display_block() {
        let diagnostic = Diagnostic {
            rule: Rule::TypeSeparator,
            span: Span::new(3, 5),
            start: Position::new(2, 4),
            end: Position::new(2, 6),
            text: " x".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "parse error near TypeSeparator (line 2, column 4 - line 2, column 6):\n x\n"
        );
    }

    #[test]
    fn test_render_concatenates() {
        let block = Diagnostic {
            rule: Rule::Space,
            span: Span::new(0, 0),
            start: Position::new(1, 1),
            end: Position::new(1, 1),
            text: String::new(),
        };
        let trail = render(&[block.clone(), block.clone()]);
        assert_eq!(trail, format!("{block}{block}"));
        assert!(render(&[]).starts_with("parse error"));
    }
}
