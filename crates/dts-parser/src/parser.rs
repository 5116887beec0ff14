//! Backtracking rule engine.
//!
//! Rules are methods on [`Parser`] returning [`Match`]. Sequences chain with
//! `?`; every combinator that can fail restores the cursor position, the
//! live log length and the nesting depth it captured on entry, so a failed
//! attempt never leaves a partially recorded token behind.

use dts_syntax::{Cursor, Rule, Span, Token};

use crate::diagnostics::locate;
use crate::log::TokenLog;
use crate::tree::SyntaxTree;
use crate::ParseError;

/// Outcome of a matcher. Sequences propagate failure with `?`.
pub type Match = Result<(), NoMatch>;

/// A matcher did not match at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoMatch;

/// A matcher usable as an alternative in [`Parser::choice`].
pub(crate) type Parselet = fn(&mut Parser) -> Match;

pub(crate) fn matched(ok: bool) -> Match {
    if ok {
        Ok(())
    } else {
        Err(NoMatch)
    }
}

/// Engine state captured on entry to a matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    position: usize,
    log_len: usize,
    depth: usize,
}

/// Where the parser stands relative to its last run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Not run since construction or the last reset.
    Fresh,
    Accepted,
    Rejected,
}

/// Declaration-file parser.
///
/// Owns one cursor and one token log for the lifetime of a parse attempt.
/// Call [`Parser::reset`] before parsing the same buffer again.
#[derive(Debug, Clone)]
pub struct Parser {
    pub(crate) cursor: Cursor,
    log: TokenLog,
    depth: usize,
    state: ParseState,
    /// Non-trivia rule whose failure left the cursor furthest ahead, spanning
    /// from where it was entered to where it gave up.
    furthest: Option<Token>,
}

impl Parser {
    /// Create a parser over `source`.
    pub fn new(source: &str) -> Self {
        Self {
            cursor: Cursor::new(source),
            log: TokenLog::new(),
            depth: 0,
            state: ParseState::Fresh,
            furthest: None,
        }
    }

    /// Run the start rule over the whole buffer.
    ///
    /// On success the log is trimmed to exactly the accepted tokens. On
    /// failure the returned error carries the diagnostic trail.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        if self.start().is_ok() {
            self.log.trim();
            self.state = ParseState::Accepted;
            tracing::debug!(
                chars = self.cursor.len(),
                tokens = self.log.len(),
                "declaration source accepted"
            );
            Ok(())
        } else {
            self.state = ParseState::Rejected;
            tracing::debug!(
                chars = self.cursor.len(),
                written = self.log.written().len(),
                "declaration source rejected"
            );
            Err(self.error())
        }
    }

    /// Rewind to the start of the buffer and forget every recorded token.
    pub fn reset(&mut self) {
        self.cursor.reset();
        self.log.clear();
        self.depth = 0;
        self.state = ParseState::Fresh;
        self.furthest = None;
        tracing::trace!("parser reset");
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Live tokens in completion order.
    pub fn tokens(&self) -> &[Token] {
        self.log.tokens()
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The rendered diagnostic trail of the last failed parse, or an empty
    /// string when the last parse did not fail.
    pub fn diagnostics(&self) -> String {
        match self.state {
            ParseState::Rejected => self.error().to_string(),
            ParseState::Fresh | ParseState::Accepted => String::new(),
        }
    }

    /// Parse if not already done and hand over the accepted tree.
    pub fn into_tree(mut self) -> Result<SyntaxTree, ParseError> {
        if self.state == ParseState::Fresh {
            self.parse()?;
        }
        match self.state {
            ParseState::Accepted => Ok(SyntaxTree::new(self.cursor, self.log.tokens().to_vec())),
            ParseState::Fresh | ParseState::Rejected => Err(self.error()),
        }
    }

    fn error(&self) -> ParseError {
        ParseError::new(locate(self.log.written(), self.furthest, self.cursor.chars()))
    }

    // =========================================================================
    // Backtracking
    // =========================================================================

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.cursor.position(),
            log_len: self.log.len(),
            depth: self.depth,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.cursor.set_position(snapshot.position);
        self.log.truncate(snapshot.log_len);
        self.depth = snapshot.depth;
    }

    /// Run `f`; if it fails, undo everything it did.
    pub(crate) fn attempt(&mut self, f: impl FnOnce(&mut Self) -> Match) -> Match {
        let snapshot = self.snapshot();
        let result = f(self);
        if result.is_err() {
            self.restore(snapshot);
        }
        result
    }

    /// Run `f` one level deeper and record `rule` over what it consumed.
    pub(crate) fn rule(&mut self, rule: Rule, f: impl FnOnce(&mut Self) -> Match) -> Match {
        let snapshot = self.snapshot();
        self.depth += 1;
        match f(self) {
            Ok(()) => {
                self.depth -= 1;
                let span = Span::new(snapshot.position, self.cursor.position());
                self.log.push(rule, span, self.depth);
                Ok(())
            }
            Err(no_match) => {
                self.note_failure(rule, snapshot);
                self.restore(snapshot);
                Err(no_match)
            }
        }
    }

    /// Keep the first non-trivia failure that reached further than any before.
    fn note_failure(&mut self, rule: Rule, snapshot: Snapshot) {
        let reached = self.cursor.position();
        if rule.is_trivia() || self.furthest.is_some_and(|f| f.span.end >= reached) {
            return;
        }
        let span = Span::new(snapshot.position, reached);
        self.furthest = Some(Token::new(rule, span, snapshot.depth));
    }

    /// Ordered choice: the first alternative that matches wins.
    pub(crate) fn choice(&mut self, alternatives: &[Parselet]) -> Match {
        for alternative in alternatives {
            if self.attempt(|p| alternative(p)).is_ok() {
                return Ok(());
            }
        }
        Err(NoMatch)
    }

    /// Try `f` once; succeed either way.
    pub(crate) fn optional(&mut self, f: impl FnOnce(&mut Self) -> Match) -> Match {
        let _ = self.attempt(f);
        Ok(())
    }

    /// Repeat `f` greedily. Only the failing iteration is rolled back.
    ///
    /// An iteration that matches without consuming input ends the loop.
    pub(crate) fn zero_or_more(&mut self, mut f: impl FnMut(&mut Self) -> Match) -> Match {
        loop {
            let before = self.cursor.position();
            if self.attempt(&mut f).is_err() || self.cursor.position() == before {
                return Ok(());
            }
        }
    }

    pub(crate) fn one_or_more(&mut self, mut f: impl FnMut(&mut Self) -> Match) -> Match {
        self.attempt(&mut f)?;
        self.zero_or_more(f)
    }

    /// Positive lookahead. Never consumes.
    pub(crate) fn lookahead(&mut self, f: impl FnOnce(&mut Self) -> Match) -> Match {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// Negative lookahead. Never consumes.
    pub(crate) fn not(&mut self, f: impl FnOnce(&mut Self) -> Match) -> Match {
        match self.lookahead(f) {
            Ok(()) => Err(NoMatch),
            Err(NoMatch) => Ok(()),
        }
    }

    // =========================================================================
    // Terminals
    // =========================================================================

    pub(crate) fn char(&mut self, expected: char) -> Match {
        matched(self.cursor.eat(expected))
    }

    pub(crate) fn char_if(&mut self, pred: impl Fn(char) -> bool) -> Match {
        matched(self.cursor.eat_if(pred))
    }

    pub(crate) fn literal(&mut self, literal: &str) -> Match {
        matched(self.cursor.eat_str(literal))
    }

    pub(crate) fn literal_ignore_case(&mut self, literal: &str) -> Match {
        matched(self.cursor.eat_str_ignore_case(literal))
    }

    /// Any single character short of the sentinel.
    pub(crate) fn any(&mut self) -> Match {
        matched(self.cursor.eat_any())
    }
}
