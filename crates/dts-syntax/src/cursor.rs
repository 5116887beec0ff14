use crate::token::Span;

/// Character appended once after the source text.
///
/// An interior `'\0'` is told apart from the sentinel by comparing the
/// position against the source length, so end-of-input never depends on the
/// character value alone.
pub const SENTINEL: char = '\0';

/// Character cursor over a decoded source buffer.
///
/// Owns the `Vec<char>` form of the source (with [`SENTINEL`] appended
/// exactly once) and the current scan position. All offsets are character
/// offsets.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    len: usize,
    pos: usize,
}

impl Cursor {
    /// Decode `source` and append the sentinel.
    pub fn new(source: &str) -> Self {
        let mut chars: Vec<char> = source.chars().collect();
        let len = chars.len();
        chars.push(SENTINEL);
        Self { chars, len, pos: 0 }
    }

    /// Number of source characters, sentinel excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The source characters, sentinel excluded.
    pub fn chars(&self) -> &[char] {
        &self.chars[..self.len]
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move back (or forward) to a previously observed position.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.len, "position {pos} past end {}", self.len);
        self.pos = pos;
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.len
    }

    /// Current character, or the sentinel at end of input.
    pub fn peek(&self) -> char {
        self.chars[self.pos]
    }

    /// Consume one character of any kind. Fails only at end of input.
    pub fn eat_any(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.pos += 1;
        true
    }

    pub fn eat(&mut self, expected: char) -> bool {
        self.eat_if(|c| c == expected)
    }

    pub fn eat_if(&mut self, pred: impl Fn(char) -> bool) -> bool {
        if self.is_at_end() || !pred(self.peek()) {
            return false;
        }
        self.pos += 1;
        true
    }

    /// Consume `literal` exactly. On mismatch nothing is consumed.
    pub fn eat_str(&mut self, literal: &str) -> bool {
        self.eat_literal(literal, |a, b| a == b)
    }

    /// Consume `literal`, comparing each ASCII letter without regard to case.
    pub fn eat_str_ignore_case(&mut self, literal: &str) -> bool {
        self.eat_literal(literal, |a, b| a.eq_ignore_ascii_case(&b))
    }

    fn eat_literal(&mut self, literal: &str, same: impl Fn(char, char) -> bool) -> bool {
        let start = self.pos;
        for expected in literal.chars() {
            if self.is_at_end() || !same(self.peek(), expected) {
                self.pos = start;
                return false;
            }
            self.pos += 1;
        }
        true
    }

    /// Text covered by `span`, sliced by character offset.
    pub fn text(&self, span: Span) -> String {
        let end = span.end.min(self.len);
        let start = span.start.min(end);
        self.chars[start..end].iter().collect()
    }
}
