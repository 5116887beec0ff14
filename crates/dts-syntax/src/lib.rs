//! Declaration-file syntax primitives
//!
//! Shared building blocks for the declaration-file parser: character spans,
//! the grammar's rule identifiers, recorded tokens, the sentinel-terminated
//! character cursor, and offset to line/column translation.
//!
//! # Example
//!
//! ```
//! use dts_syntax::{Cursor, Span};
//!
//! let cursor = Cursor::new("module Foo {}");
//! assert_eq!(cursor.text(Span::new(7, 10)), "Foo");
//! ```

pub mod cursor;
pub mod position;
pub mod rule;
pub mod token;

pub use cursor::Cursor;
pub use position::{translate_positions, Position, PositionMap};
pub use rule::Rule;
pub use token::{Gap, Span, Token};
