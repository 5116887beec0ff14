use std::fmt;

use crate::rule::Rule;

/// A half-open range `[start, end)` of character offsets into the source.
///
/// Offsets count `char`s, not bytes, so spans stay valid on multi-byte input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies within this span (bounds inclusive).
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two spans share no character.
    pub fn is_disjoint(&self, other: Span) -> bool {
        self.end <= other.start || other.end <= self.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A matched rule, recorded when the rule exits successfully.
///
/// `depth` is the nesting depth that was active when the rule was entered;
/// the outermost rule is recorded at depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub rule: Rule,
    pub span: Span,
    pub depth: usize,
}

impl Token {
    pub fn new(rule: Rule, span: Span, depth: usize) -> Self {
        Self { rule, span, depth }
    }

    /// Zero-width tokens mark successful empty matches.
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @{}", self.rule, self.span, self.depth)
    }
}

/// Position of a synthesized gap relative to the children of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gap {
    /// Before the first child.
    Prefix,
    /// Between two consecutive children.
    Infix,
    /// After the last child.
    Suffix,
}

impl Gap {
    pub fn name(self) -> &'static str {
        match self {
            Gap::Prefix => "Prefix",
            Gap::Infix => "Infix",
            Gap::Suffix => "Suffix",
        }
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
