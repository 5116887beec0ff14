//! Character offset to line/column translation.

use std::collections::HashMap;
use std::fmt;

/// A 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Offsets translated by [`translate_positions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    positions: HashMap<usize, Position>,
}

impl PositionMap {
    pub fn get(&self, offset: usize) -> Option<Position> {
        self.positions.get(&offset).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Translate a set of character offsets into line/column pairs with a single
/// scan of `chars`.
///
/// A newline belongs to the line it terminates. Offsets at or past the end of
/// the text map to the position just after the last character.
pub fn translate_positions(chars: &[char], offsets: &[usize]) -> PositionMap {
    let mut wanted = offsets.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    let mut positions = HashMap::with_capacity(wanted.len());
    let mut pending = wanted.into_iter().peekable();
    let mut here = Position::default();

    for (offset, &c) in chars.iter().enumerate() {
        while let Some(target) = pending.next_if_eq(&offset) {
            positions.insert(target, here);
        }
        if pending.peek().is_none() {
            break;
        }
        if c == '\n' {
            here.line += 1;
            here.column = 1;
        } else {
            here.column += 1;
        }
    }
    for target in pending {
        positions.insert(target, here);
    }

    PositionMap { positions }
}
