//! Grammar rule identifiers.
//!
//! Every recorded token carries one of these. Display names come from a
//! static table indexed by the discriminant and never change at runtime.

use std::fmt;

/// A named production of the declaration grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rule {
    Start,
    ModuleDeclaration,
    ModuleBody,
    ClassDeclaration,
    ClassBody,
    ExtendClause,
    ImplementClause,
    VariableDeclaration,
    FuncDeclaration,
    Type,
    BasicType,
    PrimitiveType,
    FuncType,
    ArrayType,
    ObjectType,
    LiteralType,
    VariableDefinition,
    TypeSeparator,
    FuncReturn,
    ArgumentSeparator,
    DeclarationSeparator,
    Keyword,
    Modifier,
    Identifier,
    Comment,
    LineComment,
    BlockComment,
    BlockStart,
    BlockEnd,
    ParenStart,
    ParenEnd,
    Space,
    Eol,
    Eof,
}

const NAMES: [&str; Rule::COUNT] = [
    "Start",
    "ModuleDeclaration",
    "ModuleBody",
    "ClassDeclaration",
    "ClassBody",
    "ExtendClause",
    "ImplementClause",
    "VariableDeclaration",
    "FuncDeclaration",
    "Type",
    "BasicType",
    "PrimitiveType",
    "FuncType",
    "ArrayType",
    "ObjectType",
    "LiteralType",
    "VariableDefinition",
    "TypeSeparator",
    "FuncReturn",
    "ArgumentSeparator",
    "DeclarationSeparator",
    "Keyword",
    "Modifier",
    "Identifier",
    "Comment",
    "LineComment",
    "BlockComment",
    "BlockStart",
    "BlockEnd",
    "ParenStart",
    "ParenEnd",
    "Space",
    "Eol",
    "Eof",
];

impl Rule {
    pub const COUNT: usize = Rule::Eof as usize + 1;

    /// Display name used in diagnostics and tree listings.
    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Rules that only consume layout (whitespace, comments, end of input).
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Rule::Space
                | Rule::Comment
                | Rule::LineComment
                | Rule::BlockComment
                | Rule::Eol
                | Rule::Eof
        )
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
