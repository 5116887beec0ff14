//! Append-only log of recorded tokens.

use dts_syntax::{Rule, Span, Token};

/// Tokens recorded during one parse attempt, in completion order.
///
/// The log separates its *live* length from the entries physically written.
/// Rolling back only shortens the live length; later records overwrite the
/// abandoned slots. The written entries up to the high-water mark stay
/// readable so a failed parse can still be diagnosed.
#[derive(Debug, Clone)]
pub struct TokenLog {
    entries: Vec<Token>,
    len: usize,
}

impl TokenLog {
    /// Slots reserved up front. Growth doubles the reservation.
    pub const INITIAL_CAPACITY: usize = i16::MAX as usize;

    pub fn new() -> Self {
        Self::with_capacity(Self::INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.max(1)),
            len: 0,
        }
    }

    /// Live length.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Record a token at the live end, overwriting any abandoned entry there.
    pub fn push(&mut self, rule: Rule, span: Span, depth: usize) {
        let token = Token::new(rule, span, depth);
        if self.len < self.entries.len() {
            self.entries[self.len] = token;
        } else {
            if self.entries.len() == self.entries.capacity() {
                let additional = self.entries.capacity();
                self.entries.reserve_exact(additional);
                tracing::trace!(capacity = self.entries.capacity(), "token log grown");
            }
            self.entries.push(token);
        }
        self.len += 1;
    }

    /// Roll the live length back to `len`.
    pub fn truncate(&mut self, len: usize) {
        debug_assert!(len <= self.len, "truncate to {len} beyond live length {}", self.len);
        self.len = len;
    }

    /// Drop everything past the live length so the log holds exactly the
    /// accepted tokens.
    pub fn trim(&mut self) {
        self.entries.truncate(self.len);
    }

    /// Forget all entries, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }

    /// Live tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.entries[..self.len]
    }

    /// Every entry written since the last clear, including abandoned ones.
    pub fn written(&self) -> &[Token] {
        &self.entries
    }
}

impl Default for TokenLog {
    fn default() -> Self {
        Self::new()
    }
}
