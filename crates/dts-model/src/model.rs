//! Semantic object model of a declaration file.
//!
//! The file itself is the top-level [`Object`]; modules, classes and
//! interfaces nest inside their enclosing block.

use std::collections::BTreeMap;

/// What a declaration block is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The whole file.
    TopLevel,
    Module,
    Class,
    Interface,
}

/// A declared name with the modifier words in front of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub modifiers: Vec<String>,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
        }
    }

    pub fn is_private(&self) -> bool {
        self.has_modifier("private")
    }

    pub fn has_modifier(&self, word: &str) -> bool {
        self.modifiers.iter().any(|m| m == word)
    }
}

/// A variable, property or function argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variable {
    pub ident: Identifier,
    /// Declared as `name?`.
    pub is_optional: bool,
    /// One entry per union member.
    pub types: Vec<String>,
}

/// A function or method signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Function {
    pub ident: Identifier,
    pub args: Vec<Variable>,
    /// Empty when no return type is declared.
    pub return_type: Vec<String>,
}

impl Function {
    pub fn is_constructor(&self) -> bool {
        self.ident.name == "constructor"
    }
}

/// A module, class, interface or the file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Object {
    pub ident: Identifier,
    pub kind: Kind,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    /// Keyed by name; a later declaration replaces an earlier one.
    pub vars: BTreeMap<String, Variable>,
    /// Every signature in declaration order, overloads included.
    pub funcs: Vec<Function>,
    /// The last signature named `constructor`.
    pub constructor: Option<Function>,
    pub modules: BTreeMap<String, Object>,
    pub classes: BTreeMap<String, Object>,
    pub interfaces: BTreeMap<String, Object>,
}

impl Object {
    pub fn new(kind: Kind, ident: Identifier) -> Self {
        Self {
            ident,
            kind,
            extends: Vec::new(),
            implements: Vec::new(),
            vars: BTreeMap::new(),
            funcs: Vec::new(),
            constructor: None,
            modules: BTreeMap::new(),
            classes: BTreeMap::new(),
            interfaces: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.ident.name
    }

    /// All signatures declared under `name`, in order.
    pub fn overloads<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Function> {
        self.funcs.iter().filter(move |f| f.ident.name == name)
    }

    /// Attach a nested block under the map for its kind.
    ///
    /// Returns the block back when its kind cannot nest.
    pub fn adopt(&mut self, child: Object) -> Result<(), Object> {
        let map = match child.kind {
            Kind::Module => &mut self.modules,
            Kind::Class => &mut self.classes,
            Kind::Interface => &mut self.interfaces,
            Kind::TopLevel => return Err(child),
        };
        map.insert(child.ident.name.clone(), child);
        Ok(())
    }

    pub fn add_variable(&mut self, variable: Variable) {
        self.vars.insert(variable.ident.name.clone(), variable);
    }

    pub fn add_function(&mut self, function: Function) {
        if function.is_constructor() {
            self.constructor = Some(function.clone());
        }
        self.funcs.push(function);
    }
}
