//! Declaration-file object model
//!
//! Turns a parsed declaration file into nested [`Object`]s: the file itself
//! at the top, with its modules, classes and interfaces, their variables and
//! their function signatures.
//!
//! ```text
//! source → dts_parser::parse() → SyntaxTree → walk(Builder) → Object
//! ```
//!
//! # Example
//!
//! ```
//! let file = dts_model::from_source("lib.d.ts", "module Foo { var x: number; }").unwrap();
//! let foo = &file.modules["Foo"];
//! assert_eq!(foo.vars["x"].types, vec!["number"]);
//! ```

pub mod builder;
pub mod model;

pub use builder::Builder;
pub use model::{Function, Identifier, Kind, Object, Variable};

use dts_parser::{ParseError, SyntaxTree};

/// Model construction error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Declaration events arrived out of order.
    #[error("unbalanced declaration events at {0}")]
    Unbalanced(&'static str),
}

/// Build the model of an accepted tree. `name` names the top-level object.
pub fn build(name: &str, tree: &SyntaxTree) -> Result<Object, ModelError> {
    let mut builder = Builder::new(name);
    tree.walk(&mut builder);
    let object = builder.finish()?;
    tracing::debug!(
        name,
        modules = object.modules.len(),
        classes = object.classes.len(),
        interfaces = object.interfaces.len(),
        "model built"
    );
    Ok(object)
}

/// Parse `source` and build its model.
pub fn from_source(name: &str, source: &str) -> Result<Object, ModelError> {
    let tree = dts_parser::parse(source)?;
    build(name, &tree)
}
