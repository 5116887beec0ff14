//! Tree reconstruction over the flat token log.
//!
//! Tokens are recorded in completion order, so a parent always follows its
//! descendants. Two views are derived from that order, each recomputed on
//! request and never cached:
//!
//! - [`build_tree`] folds the log into nested [`Node`]s with a stack.
//! - [`PreOrder`] groups tokens by depth and walks them parent-first,
//!   synthesizing [`Gap`] leaves for input no child claims.

use std::collections::VecDeque;

use dts_syntax::{Cursor, Gap, Rule, Span, Token};

use crate::walk::{walk, DeclarationVisitor};

/// An element of the direct node tree. Owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub token: Token,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            children: Vec::new(),
        }
    }

    pub fn rule(&self) -> Rule {
        self.token.rule
    }

    pub fn span(&self) -> Span {
        self.token.span
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// First direct child recorded for `rule`.
    pub fn child(&self, rule: Rule) -> Option<&Node> {
        self.children.iter().find(|c| c.rule() == rule)
    }

    /// Direct children recorded for `rule`, in source order.
    pub fn children_of(&self, rule: Rule) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |c| c.rule() == rule)
    }
}

/// Fold tokens in completion order into a node tree.
///
/// Zero-width tokens are skipped. Each token adopts the run of open nodes on
/// top of the stack whose spans it contains; the last node standing is the
/// root.
pub fn build_tree(tokens: &[Token]) -> Option<Node> {
    let mut stack: Vec<Node> = Vec::new();
    for token in tokens.iter().filter(|t| !t.is_empty()) {
        let keep = stack
            .iter()
            .rposition(|open| !token.span.contains(open.span()))
            .map_or(0, |i| i + 1);
        let mut node = Node::new(*token);
        node.children = stack.split_off(keep);
        stack.push(node);
    }
    stack.pop()
}

// =============================================================================
// Depth grouping
// =============================================================================

/// A token tagged with its position in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ordered {
    pub token: Token,
    /// Index of the token in completion order.
    pub index: usize,
}

/// Tokens partitioned by recording depth, each level in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthGroups {
    levels: Vec<Vec<Ordered>>,
}

impl DepthGroups {
    pub fn new(tokens: &[Token]) -> Self {
        let mut counts: Vec<usize> = Vec::new();
        for token in tokens {
            if token.depth >= counts.len() {
                counts.resize(token.depth + 1, 0);
            }
            counts[token.depth] += 1;
        }
        let mut levels: Vec<Vec<Ordered>> = counts.into_iter().map(Vec::with_capacity).collect();
        for (index, token) in tokens.iter().enumerate() {
            levels[token.depth].push(Ordered {
                token: *token,
                index,
            });
        }
        Self { levels }
    }

    pub fn levels(&self) -> &[Vec<Ordered>] {
        &self.levels
    }

    /// Tokens at `depth`; empty past the deepest level.
    pub fn level(&self, depth: usize) -> &[Ordered] {
        self.levels.get(depth).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }
}

// =============================================================================
// Pre-order traversal with gaps
// =============================================================================

/// What a pre-order step denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// A token with children; its children follow.
    Open(Rule),
    /// A token without children.
    Leaf(Rule),
    /// Input inside a parent that no child covers.
    Gap(Gap),
}

/// One state of the pre-order traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub span: Span,
    pub depth: usize,
}

impl Step {
    pub fn rule(&self) -> Option<Rule> {
        match self.kind {
            StepKind::Open(rule) | StepKind::Leaf(rule) => Some(rule),
            StepKind::Gap(_) => None,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self.kind, StepKind::Gap(_))
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self.kind, StepKind::Open(_))
    }

    pub fn name(&self) -> &'static str {
        match self.kind {
            StepKind::Open(rule) | StepKind::Leaf(rule) => rule.name(),
            StepKind::Gap(gap) => gap.name(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    span: Span,
    depth: usize,
    index: usize,
    /// Offset up to which this token's span has been emitted.
    covered: usize,
    has_children: bool,
}

/// Lazy depth-first walk over a depth-grouped token set.
///
/// The children of a token at depth `d` are the unclaimed tokens at depth
/// `d + 1` recorded before it; since a rule records after everything it
/// contains, the most recent candidate parent always wins. Each level keeps a
/// cursor that only moves forward, so the walk is linear in the token count.
///
/// Single pass: request a new traversal to walk again.
#[derive(Debug, Clone)]
pub struct PreOrder {
    groups: DepthGroups,
    cursors: Vec<usize>,
    stack: Vec<Frame>,
    pending: VecDeque<Step>,
}

impl PreOrder {
    pub fn new(tokens: &[Token]) -> Self {
        let groups = DepthGroups::new(tokens);
        let cursors = vec![0; groups.depth() + 1];
        Self {
            groups,
            cursors,
            stack: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    fn next_child(&self, depth: usize, parent_index: usize) -> Option<Ordered> {
        let cursor = self.cursors.get(depth).copied()?;
        self.groups
            .level(depth)
            .get(cursor)
            .copied()
            .filter(|child| child.index < parent_index)
    }

    fn enter(&mut self, ordered: Ordered, depth: usize) -> Step {
        let span = ordered.token.span;
        let rule = ordered.token.rule;
        if self.next_child(depth + 1, ordered.index).is_some() {
            self.stack.push(Frame {
                span,
                depth,
                index: ordered.index,
                covered: span.start,
                has_children: false,
            });
            Step {
                kind: StepKind::Open(rule),
                span,
                depth,
            }
        } else {
            Step {
                kind: StepKind::Leaf(rule),
                span,
                depth,
            }
        }
    }
}

impl Iterator for PreOrder {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        loop {
            if let Some(step) = self.pending.pop_front() {
                return Some(step);
            }

            let Some(&frame) = self.stack.last() else {
                let root = self.groups.level(0).get(self.cursors[0]).copied()?;
                self.cursors[0] += 1;
                return Some(self.enter(root, 0));
            };

            let child_depth = frame.depth + 1;
            match self.next_child(child_depth, frame.index) {
                Some(child) => {
                    let child_span = child.token.span;
                    debug_assert!(
                        frame.span.contains(child_span),
                        "child {child_span} escapes parent {}",
                        frame.span
                    );
                    self.cursors[child_depth] += 1;
                    if child_span.start > frame.covered {
                        let gap = if frame.has_children {
                            Gap::Infix
                        } else {
                            Gap::Prefix
                        };
                        self.pending.push_back(Step {
                            kind: StepKind::Gap(gap),
                            span: Span::new(frame.covered, child_span.start),
                            depth: child_depth,
                        });
                    }
                    if let Some(top) = self.stack.last_mut() {
                        top.covered = child_span.end;
                        top.has_children = true;
                    }
                    let step = self.enter(child, child_depth);
                    self.pending.push_back(step);
                }
                None => {
                    self.stack.pop();
                    if frame.covered < frame.span.end {
                        return Some(Step {
                            kind: StepKind::Gap(Gap::Suffix),
                            span: Span::new(frame.covered, frame.span.end),
                            depth: child_depth,
                        });
                    }
                }
            }
        }
    }
}

// =============================================================================
// Accepted tree
// =============================================================================

/// The outcome of a successful parse: the source buffer plus the trimmed
/// token log.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    cursor: Cursor,
    tokens: Vec<Token>,
}

impl SyntaxTree {
    pub(crate) fn new(cursor: Cursor, tokens: Vec<Token>) -> Self {
        Self { cursor, tokens }
    }

    /// Accepted tokens in completion order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of source characters.
    pub fn source_len(&self) -> usize {
        self.cursor.len()
    }

    /// Source text under `span`, by character offset.
    pub fn text(&self, span: Span) -> String {
        self.cursor.text(span)
    }

    /// Build the direct node tree.
    pub fn root(&self) -> Option<Node> {
        let root = build_tree(&self.tokens);
        tracing::trace!(tokens = self.tokens.len(), "node tree rebuilt");
        root
    }

    pub fn depth_groups(&self) -> DepthGroups {
        DepthGroups::new(&self.tokens)
    }

    /// Start a fresh pre-order traversal with gaps.
    pub fn pre_order(&self) -> PreOrder {
        PreOrder::new(&self.tokens)
    }

    /// Indented listing of the pre-order traversal, one step per line.
    pub fn render_tree(&self) -> String {
        let mut out = String::new();
        for step in self.pre_order() {
            out.push_str(&"  ".repeat(step.depth));
            out.push_str(step.name());
            out.push(' ');
            out.push_str(&format!("{:?}", self.text(step.span)));
            out.push('\n');
        }
        out
    }

    /// Drive `visitor` with one event per declaration boundary.
    pub fn walk<V: DeclarationVisitor>(&self, visitor: &mut V) {
        if let Some(root) = self.root() {
            walk(self, &root, visitor);
        }
    }
}
