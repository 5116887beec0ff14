//! Declaration events for semantic builders.
//!
//! [`walk`] visits the direct node tree in source order and reports each
//! module, class, interface, variable, function and argument boundary to a
//! [`DeclarationVisitor`]. What the visitor builds from them is its own
//! business.

use dts_syntax::Rule;

use crate::tree::{Node, SyntaxTree};

/// Kind of a brace-delimited declaration block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Module,
    Class,
    Interface,
}

impl BlockKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "module" => Some(BlockKind::Module),
            "class" => Some(BlockKind::Class),
            "interface" => Some(BlockKind::Interface),
            _ => None,
        }
    }
}

/// Receiver of declaration boundary events. Every method defaults to a no-op.
///
/// Names ending in `?` are reported without it and with `is_optional` set.
/// Type lists hold one entry per union member.
#[allow(unused_variables)]
pub trait DeclarationVisitor {
    fn open_block(&mut self, kind: BlockKind, modifiers: &[String]) {}
    fn block_identifier(&mut self, name: &str) {}
    fn extends(&mut self, name: &str) {}
    fn implements(&mut self, name: &str) {}
    fn close_block(&mut self) {}

    fn open_variable(&mut self, modifiers: &[String]) {}
    fn variable_identifier(&mut self, name: &str, is_optional: bool) {}
    fn variable_type(&mut self, types: &[String]) {}
    fn close_variable(&mut self) {}

    fn open_function(&mut self, modifiers: &[String]) {}
    fn function_identifier(&mut self, name: &str) {}
    fn function_return_type(&mut self, types: &[String]) {}
    fn open_argument(&mut self, name: &str, is_optional: bool) {}
    fn argument_type(&mut self, types: &[String]) {}
    fn close_argument(&mut self) {}
    fn close_function(&mut self) {}
}

/// Visit every declaration below `node`.
pub(crate) fn walk<V: DeclarationVisitor>(tree: &SyntaxTree, node: &Node, visitor: &mut V) {
    Walker { tree, visitor }.declarations(node);
}

struct Walker<'a, V> {
    tree: &'a SyntaxTree,
    visitor: &'a mut V,
}

impl<V: DeclarationVisitor> Walker<'_, V> {
    fn declarations(&mut self, node: &Node) {
        for child in node.children() {
            match child.rule() {
                Rule::ModuleDeclaration | Rule::ClassDeclaration => self.block(child),
                Rule::VariableDeclaration => self.variable(child),
                Rule::FuncDeclaration => self.function(child),
                Rule::ModuleBody | Rule::ClassBody => self.declarations(child),
                _ => {}
            }
        }
    }

    fn block(&mut self, node: &Node) {
        let Some(kind) = node
            .child(Rule::Keyword)
            .and_then(|k| BlockKind::from_keyword(&self.text(k)))
        else {
            return;
        };
        tracing::trace!(?kind, span = %node.span(), "block");

        let modifiers = self.modifiers(node);
        self.visitor.open_block(kind, &modifiers);
        if let Some(name) = node.child(Rule::Identifier) {
            let name = self.text(name);
            self.visitor.block_identifier(&name);
        }
        if let Some(name) = self.clause_identifier(node, Rule::ExtendClause) {
            self.visitor.extends(&name);
        }
        if let Some(name) = self.clause_identifier(node, Rule::ImplementClause) {
            self.visitor.implements(&name);
        }
        for body in node.children_of(Rule::ModuleBody).chain(node.children_of(Rule::ClassBody)) {
            self.declarations(body);
        }
        self.visitor.close_block();
    }

    fn variable(&mut self, node: &Node) {
        let modifiers = self.modifiers(node);
        self.visitor.open_variable(&modifiers);
        if let Some(definition) = node.child(Rule::VariableDefinition) {
            if let Some(name) = definition.child(Rule::Identifier) {
                let (name, is_optional) = split_optional(&self.text(name));
                self.visitor.variable_identifier(&name, is_optional);
            }
            if let Some(ty) = definition.child(Rule::Type) {
                let types = self.types(ty);
                self.visitor.variable_type(&types);
            }
        }
        self.visitor.close_variable();
    }

    fn function(&mut self, node: &Node) {
        let modifiers = self.modifiers(node);
        self.visitor.open_function(&modifiers);
        if let Some(name) = node.child(Rule::Identifier) {
            let name = self.text(name);
            self.visitor.function_identifier(&name);
        }
        if let Some(signature) = node.child(Rule::FuncType) {
            for argument in signature.children_of(Rule::VariableDefinition) {
                let (name, is_optional) = argument
                    .child(Rule::Identifier)
                    .map(|n| split_optional(&self.text(n)))
                    .unwrap_or_default();
                self.visitor.open_argument(&name, is_optional);
                if let Some(ty) = argument.child(Rule::Type) {
                    let types = self.types(ty);
                    self.visitor.argument_type(&types);
                }
                self.visitor.close_argument();
            }
            if let Some(ty) = signature.child(Rule::Type) {
                let types = self.types(ty);
                self.visitor.function_return_type(&types);
            }
        }
        self.visitor.close_function();
    }

    // --- Helpers ---

    fn text(&self, node: &Node) -> String {
        self.tree.text(node.span())
    }

    fn modifiers(&self, node: &Node) -> Vec<String> {
        node.child(Rule::Modifier)
            .map(|m| m.children_of(Rule::Keyword).map(|k| self.text(k)).collect())
            .unwrap_or_default()
    }

    fn clause_identifier(&self, node: &Node, clause: Rule) -> Option<String> {
        node.child(clause)
            .and_then(|c| c.child(Rule::Identifier))
            .map(|n| self.text(n))
    }

    fn types(&self, ty: &Node) -> Vec<String> {
        ty.children_of(Rule::BasicType)
            .map(|b| self.text(b).trim().to_string())
            .collect()
    }
}

/// `name?` → (`name`, true)
fn split_optional(text: &str) -> (String, bool) {
    match text.strip_suffix('?') {
        Some(name) => (name.to_string(), true),
        None => (text.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records every event as a line of text.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Recorder {
        fn push(&mut self, event: String) {
            self.events.push(event);
        }
    }

    impl DeclarationVisitor for Recorder {
        fn open_block(&mut self, kind: BlockKind, modifiers: &[String]) {
            self.push(format!("open_block {kind:?} {modifiers:?}"));
        }
        fn block_identifier(&mut self, name: &str) {
            self.push(format!("block_identifier {name}"));
        }
        fn extends(&mut self, name: &str) {
            self.push(format!("extends {name}"));
        }
        fn implements(&mut self, name: &str) {
            self.push(format!("implements {name}"));
        }
        fn close_block(&mut self) {
            self.push("close_block".to_string());
        }
        fn open_variable(&mut self, modifiers: &[String]) {
            self.push(format!("open_variable {modifiers:?}"));
        }
        fn variable_identifier(&mut self, name: &str, is_optional: bool) {
            self.push(format!("variable_identifier {name} {is_optional}"));
        }
        fn variable_type(&mut self, types: &[String]) {
            self.push(format!("variable_type {types:?}"));
        }
        fn close_variable(&mut self) {
            self.push("close_variable".to_string());
        }
        fn open_function(&mut self, modifiers: &[String]) {
            self.push(format!("open_function {modifiers:?}"));
        }
        fn function_identifier(&mut self, name: &str) {
            self.push(format!("function_identifier {name}"));
        }
        fn function_return_type(&mut self, types: &[String]) {
            self.push(format!("function_return_type {types:?}"));
        }
        fn open_argument(&mut self, name: &str, is_optional: bool) {
            self.push(format!("open_argument {name} {is_optional}"));
        }
        fn argument_type(&mut self, types: &[String]) {
            self.push(format!("argument_type {types:?}"));
        }
        fn close_argument(&mut self) {
            self.push("close_argument".to_string());
        }
        fn close_function(&mut self) {
            self.push("close_function".to_string());
        }
    }

    fn events(source: &str) -> Vec<String> {
        let tree = crate::parse(source).unwrap();
        let mut recorder = Recorder::default();
        tree.walk(&mut recorder);
        recorder.events
    }

    #[test]
    fn test_module_variable() {
        assert_eq!(
            events("module Foo { var x: number; }"),
            vec![
                "open_block Module []",
                "block_identifier Foo",
                "open_variable [\"var\"]",
                "variable_identifier x false",
                "variable_type [\"number\"]",
                "close_variable",
                "close_block",
            ]
        );
    }

    #[test]
    fn test_class_members() {
        let source = "class C extends B implements I {\n  \
                      constructor(options?: {});\n  \
                      get(key: string, fallback?: any): string | number;\n  \
                      static create(): C;\n}";
        assert_eq!(
            events(source),
            vec![
                "open_block Class []",
                "block_identifier C",
                "extends B",
                "implements I",
                "open_function []",
                "function_identifier constructor",
                "open_argument options true",
                "argument_type [\"{}\"]",
                "close_argument",
                "close_function",
                "open_function []",
                "function_identifier get",
                "open_argument key false",
                "argument_type [\"string\"]",
                "close_argument",
                "open_argument fallback true",
                "argument_type [\"any\"]",
                "close_argument",
                "function_return_type [\"string\", \"number\"]",
                "close_function",
                "open_function [\"static\"]",
                "function_identifier create",
                "function_return_type [\"C\"]",
                "close_function",
                "close_block",
            ]
        );
    }

    #[test]
    fn test_nested_blocks() {
        assert_eq!(
            events("declare module A { export class B { } module C { } }"),
            vec![
                "open_block Module [\"declare\"]",
                "block_identifier A",
                "open_block Class [\"export\"]",
                "block_identifier B",
                "close_block",
                "open_block Module []",
                "block_identifier C",
                "close_block",
                "close_block",
            ]
        );
    }

    #[test]
    fn test_interface_optional_member() {
        assert_eq!(
            events("interface Options { limit?: number }"),
            vec![
                "open_block Interface []",
                "block_identifier Options",
                "open_variable []",
                "variable_identifier limit true",
                "variable_type [\"number\"]",
                "close_variable",
                "close_block",
            ]
        );
    }

    #[test]
    fn test_function_modifier() {
        let events = events("module M { function f(): void; }");
        assert_eq!(events[2], "open_function [\"function\"]");
        assert_eq!(events[3], "function_identifier f");
        assert_eq!(events[4], "function_return_type [\"void\"]");
    }

    #[test]
    fn test_default_visitor_ignores_events() {
        struct Silent;
        impl DeclarationVisitor for Silent {}
        let tree = crate::parse("class A { b: number; }").unwrap();
        tree.walk(&mut Silent);
    }

    #[test]
    fn test_block_kind_from_keyword() {
        assert_eq!(BlockKind::from_keyword("interface"), Some(BlockKind::Interface));
        assert_eq!(BlockKind::from_keyword("enum"), None);
    }

    #[test]
    fn test_split_optional() {
        assert_eq!(split_optional("name?"), ("name".to_string(), true));
        assert_eq!(split_optional("name"), ("name".to_string(), false));
    }
}
