//! Declaration grammar.
//!
//! ```text
//! Start               <- Space (ModuleDeclaration / ClassDeclaration)+ Eof
//! ModuleDeclaration   <- Modifier? "module" Space Identifier ModuleBody
//! ModuleBody          <- BlockStart (ClassDeclaration / ModuleDeclaration
//!                        / VariableDeclaration / FuncDeclaration)* BlockEnd
//! ClassDeclaration    <- Modifier? ("class" / "interface") Space Identifier
//!                        ExtendClause? ImplementClause? ClassBody
//! ClassBody           <- BlockStart (VariableDeclaration / FuncDeclaration)* BlockEnd
//! ExtendClause        <- Space "extends" Space Identifier
//! ImplementClause     <- Space "implements" Space Identifier
//! VariableDeclaration <- Modifier? VariableDefinition DeclarationSeparator
//! FuncDeclaration     <- Modifier? Identifier FuncType DeclarationSeparator
//! Type                <- BasicType (Space '|' Space BasicType)*
//! BasicType           <- ObjectType / ArrayType / PrimitiveType / LiteralType
//!                        / FuncType / Identifier
//! PrimitiveType       <- ("number" / "boolean" / "string" / "function" / "any")
//!                        !IdentChar, letters matched case-insensitively
//! FuncType            <- ParenStart VariableDefinition? (ArgumentSeparator
//!                        VariableDefinition)* ParenEnd ((FuncReturn / TypeSeparator) Type)?
//! ArrayType           <- (PrimitiveType / Identifier) '[' ']'
//! ObjectType          <- BlockStart VariableDeclaration* BlockEnd
//! LiteralType         <- '\'' Identifier '\''
//! VariableDefinition  <- Identifier TypeSeparator Type
//! TypeSeparator       <- Space ':' Space
//! FuncReturn          <- Space "=>" Space
//! ArgumentSeparator   <- Space ',' Space
//! DeclarationSeparator <- ((';' / Eol)? Space)?
//! Modifier            <- (Keyword(declare / export / private / static / var / function) Space)+
//! Keyword(w)          <- w !IdentChar
//! Identifier          <- [_.A-Za-z] [_.?0-9A-Za-z]*
//! Comment             <- LineComment / BlockComment
//! LineComment         <- "//" (!Eol .)*
//! BlockComment        <- "/*" (!"*/" .)* "*/"
//! BlockStart / BlockEnd / ParenStart / ParenEnd <- Space ('{' / '}' / '(' / ')') Space
//! Space               <- (Comment / [ \t\r\n])*
//! Eol                 <- '\n'
//! Eof                 <- !.
//! ```

use dts_syntax::Rule;

use crate::parser::{Match, NoMatch, Parser};

/// Words accepted as declaration modifiers.
pub const MODIFIERS: [&str; 6] = ["declare", "export", "private", "static", "var", "function"];

/// Built-in type names, matched without regard to ASCII case.
pub const PRIMITIVES: [&str; 5] = ["number", "boolean", "string", "function", "any"];

pub fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '.' || c.is_ascii_alphabetic()
}

pub fn is_identifier_continue(c: char) -> bool {
    matches!(c, '_' | '.' | '?') || c.is_ascii_alphanumeric()
}

fn is_layout(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

impl Parser {
    pub(crate) fn start(&mut self) -> Match {
        self.rule(Rule::Start, |p| {
            p.space()?;
            p.one_or_more(|p| p.choice(&[Self::module_declaration, Self::class_declaration]))?;
            p.eof()
        })
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn module_declaration(&mut self) -> Match {
        self.rule(Rule::ModuleDeclaration, |p| {
            p.optional(Self::modifier)?;
            p.keyword("module")?;
            p.space()?;
            p.identifier()?;
            p.module_body()
        })
    }

    fn module_body(&mut self) -> Match {
        self.rule(Rule::ModuleBody, |p| {
            p.block_start()?;
            p.zero_or_more(|p| {
                p.choice(&[
                    Self::class_declaration,
                    Self::module_declaration,
                    Self::variable_declaration,
                    Self::func_declaration,
                ])
            })?;
            p.block_end()
        })
    }

    fn class_declaration(&mut self) -> Match {
        self.rule(Rule::ClassDeclaration, |p| {
            p.optional(Self::modifier)?;
            p.keyword_of(&["class", "interface"])?;
            p.space()?;
            p.identifier()?;
            p.optional(Self::extend_clause)?;
            p.optional(Self::implement_clause)?;
            p.class_body()
        })
    }

    fn class_body(&mut self) -> Match {
        self.rule(Rule::ClassBody, |p| {
            p.block_start()?;
            p.zero_or_more(|p| p.choice(&[Self::variable_declaration, Self::func_declaration]))?;
            p.block_end()
        })
    }

    fn extend_clause(&mut self) -> Match {
        self.rule(Rule::ExtendClause, |p| {
            p.space()?;
            p.keyword("extends")?;
            p.space()?;
            p.identifier()
        })
    }

    fn implement_clause(&mut self) -> Match {
        self.rule(Rule::ImplementClause, |p| {
            p.space()?;
            p.keyword("implements")?;
            p.space()?;
            p.identifier()
        })
    }

    fn variable_declaration(&mut self) -> Match {
        self.rule(Rule::VariableDeclaration, |p| {
            p.optional(Self::modifier)?;
            p.variable_definition()?;
            p.declaration_separator()
        })
    }

    fn func_declaration(&mut self) -> Match {
        self.rule(Rule::FuncDeclaration, |p| {
            p.optional(Self::modifier)?;
            p.identifier()?;
            p.func_type()?;
            p.declaration_separator()
        })
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn type_(&mut self) -> Match {
        self.rule(Rule::Type, |p| {
            p.basic_type()?;
            p.zero_or_more(|p| {
                p.space()?;
                p.char('|')?;
                p.space()?;
                p.basic_type()
            })
        })
    }

    fn basic_type(&mut self) -> Match {
        self.rule(Rule::BasicType, |p| {
            p.choice(&[
                Self::object_type,
                Self::array_type,
                Self::primitive_type,
                Self::literal_type,
                Self::func_type,
                Self::identifier,
            ])
        })
    }

    fn primitive_type(&mut self) -> Match {
        self.rule(Rule::PrimitiveType, |p| {
            for name in PRIMITIVES {
                if p.literal_ignore_case(name).is_ok() {
                    return p.not(|p| p.char_if(is_identifier_continue));
                }
            }
            Err(NoMatch)
        })
    }

    fn func_type(&mut self) -> Match {
        self.rule(Rule::FuncType, |p| {
            p.paren_start()?;
            p.optional(Self::variable_definition)?;
            p.zero_or_more(|p| {
                p.argument_separator()?;
                p.variable_definition()
            })?;
            p.paren_end()?;
            p.optional(|p| {
                p.choice(&[Self::func_return, Self::type_separator])?;
                p.type_()
            })
        })
    }

    fn array_type(&mut self) -> Match {
        self.rule(Rule::ArrayType, |p| {
            p.choice(&[Self::primitive_type, Self::identifier])?;
            p.char('[')?;
            p.char(']')
        })
    }

    fn object_type(&mut self) -> Match {
        self.rule(Rule::ObjectType, |p| {
            p.block_start()?;
            p.zero_or_more(Self::variable_declaration)?;
            p.block_end()
        })
    }

    fn literal_type(&mut self) -> Match {
        self.rule(Rule::LiteralType, |p| {
            p.char('\'')?;
            p.identifier()?;
            p.char('\'')
        })
    }

    fn variable_definition(&mut self) -> Match {
        self.rule(Rule::VariableDefinition, |p| {
            p.identifier()?;
            p.type_separator()?;
            p.type_()
        })
    }

    // =========================================================================
    // Separators
    // =========================================================================

    fn type_separator(&mut self) -> Match {
        self.rule(Rule::TypeSeparator, |p| p.padded(|p| p.char(':')))
    }

    fn func_return(&mut self) -> Match {
        self.rule(Rule::FuncReturn, |p| p.padded(|p| p.literal("=>")))
    }

    fn argument_separator(&mut self) -> Match {
        self.rule(Rule::ArgumentSeparator, |p| p.padded(|p| p.char(',')))
    }

    fn declaration_separator(&mut self) -> Match {
        self.rule(Rule::DeclarationSeparator, |p| {
            p.optional(|p| {
                p.optional(|p| p.char(';').or_else(|_| p.eol()))?;
                p.space()
            })
        })
    }

    fn block_start(&mut self) -> Match {
        self.rule(Rule::BlockStart, |p| p.padded(|p| p.char('{')))
    }

    fn block_end(&mut self) -> Match {
        self.rule(Rule::BlockEnd, |p| p.padded(|p| p.char('}')))
    }

    fn paren_start(&mut self) -> Match {
        self.rule(Rule::ParenStart, |p| p.padded(|p| p.char('(')))
    }

    fn paren_end(&mut self) -> Match {
        self.rule(Rule::ParenEnd, |p| p.padded(|p| p.char(')')))
    }

    /// `Space f Space`
    fn padded(&mut self, f: impl FnOnce(&mut Self) -> Match) -> Match {
        self.space()?;
        f(self)?;
        self.space()
    }

    // =========================================================================
    // Words
    // =========================================================================

    fn modifier(&mut self) -> Match {
        self.rule(Rule::Modifier, |p| {
            p.one_or_more(|p| {
                p.keyword_of(&MODIFIERS)?;
                p.space()
            })
        })
    }

    /// A case-sensitive word that does not run on into an identifier.
    fn keyword(&mut self, word: &str) -> Match {
        self.rule(Rule::Keyword, |p| {
            p.literal(word)?;
            p.not(|p| p.char_if(is_identifier_continue))
        })
    }

    fn keyword_of(&mut self, words: &[&str]) -> Match {
        for word in words {
            if self.keyword(word).is_ok() {
                return Ok(());
            }
        }
        Err(NoMatch)
    }

    fn identifier(&mut self) -> Match {
        self.rule(Rule::Identifier, |p| {
            p.char_if(is_identifier_start)?;
            p.zero_or_more(|p| p.char_if(is_identifier_continue))
        })
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn space(&mut self) -> Match {
        self.rule(Rule::Space, |p| {
            p.zero_or_more(|p| p.comment().or_else(|_| p.char_if(is_layout)))
        })
    }

    fn comment(&mut self) -> Match {
        self.rule(Rule::Comment, |p| p.choice(&[Self::line_comment, Self::block_comment]))
    }

    fn line_comment(&mut self) -> Match {
        self.rule(Rule::LineComment, |p| {
            p.literal("//")?;
            p.zero_or_more(|p| {
                p.not(Self::eol)?;
                p.any()
            })
        })
    }

    fn block_comment(&mut self) -> Match {
        self.rule(Rule::BlockComment, |p| {
            p.literal("/*")?;
            p.zero_or_more(|p| {
                p.not(|p| p.literal("*/"))?;
                p.any()
            })?;
            p.literal("*/")
        })
    }

    fn eol(&mut self) -> Match {
        self.rule(Rule::Eol, |p| p.char('\n'))
    }

    fn eof(&mut self) -> Match {
        self.rule(Rule::Eof, |p| p.not(Self::any))
    }
}
