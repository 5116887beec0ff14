//! Assembles an [`Object`] tree from declaration events.

use dts_parser::{BlockKind, DeclarationVisitor};

use crate::model::{Function, Identifier, Kind, Object, Variable};
use crate::ModelError;

impl From<BlockKind> for Kind {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Module => Kind::Module,
            BlockKind::Class => Kind::Class,
            BlockKind::Interface => Kind::Interface,
        }
    }
}

/// Event-driven builder. The bottom of the stack is the file object; each
/// open block sits above its parent until closed.
#[derive(Debug)]
pub struct Builder {
    stack: Vec<Object>,
    variable: Option<Variable>,
    function: Option<Function>,
    argument: Option<Variable>,
    /// First event that arrived out of order.
    fault: Option<&'static str>,
}

impl Builder {
    /// Start a model for the file called `name`.
    pub fn new(name: &str) -> Self {
        Self {
            stack: vec![Object::new(Kind::TopLevel, Identifier::new(name))],
            variable: None,
            function: None,
            argument: None,
            fault: None,
        }
    }

    /// The finished file object.
    pub fn finish(mut self) -> Result<Object, ModelError> {
        if let Some(event) = self.fault {
            return Err(ModelError::Unbalanced(event));
        }
        if self.variable.is_some() || self.function.is_some() || self.argument.is_some() {
            return Err(ModelError::Unbalanced("declaration left open"));
        }
        match (self.stack.pop(), self.stack.is_empty()) {
            (Some(top), true) => Ok(top),
            _ => Err(ModelError::Unbalanced("block left open")),
        }
    }

    fn fail(&mut self, event: &'static str) {
        tracing::trace!(event, "out-of-order declaration event");
        self.fault.get_or_insert(event);
    }

    fn current(&mut self) -> Option<&mut Object> {
        self.stack.last_mut()
    }
}

impl DeclarationVisitor for Builder {
    fn open_block(&mut self, kind: BlockKind, modifiers: &[String]) {
        let ident = Identifier {
            name: String::new(),
            modifiers: modifiers.to_vec(),
        };
        self.stack.push(Object::new(kind.into(), ident));
    }

    fn block_identifier(&mut self, name: &str) {
        match self.current() {
            Some(object) => object.ident.name = name.to_string(),
            None => self.fail("block_identifier"),
        }
    }

    fn extends(&mut self, name: &str) {
        match self.current() {
            Some(object) => object.extends.push(name.to_string()),
            None => self.fail("extends"),
        }
    }

    fn implements(&mut self, name: &str) {
        match self.current() {
            Some(object) => object.implements.push(name.to_string()),
            None => self.fail("implements"),
        }
    }

    fn close_block(&mut self) {
        if self.stack.len() < 2 {
            return self.fail("close_block");
        }
        let Some(child) = self.stack.pop() else {
            return self.fail("close_block");
        };
        tracing::trace!(name = %child.ident.name, kind = ?child.kind, "block closed");
        let adopted = match self.current() {
            Some(parent) => parent.adopt(child).is_ok(),
            None => false,
        };
        if !adopted {
            self.fail("close_block");
        }
    }

    fn open_variable(&mut self, modifiers: &[String]) {
        let mut variable = Variable::default();
        variable.ident.modifiers = modifiers.to_vec();
        self.variable = Some(variable);
    }

    fn variable_identifier(&mut self, name: &str, is_optional: bool) {
        match self.variable.as_mut() {
            Some(variable) => {
                variable.ident.name = name.to_string();
                variable.is_optional = is_optional;
            }
            None => self.fail("variable_identifier"),
        }
    }

    fn variable_type(&mut self, types: &[String]) {
        match self.variable.as_mut() {
            Some(variable) => variable.types = types.to_vec(),
            None => self.fail("variable_type"),
        }
    }

    fn close_variable(&mut self) {
        let Some(variable) = self.variable.take() else {
            return self.fail("close_variable");
        };
        match self.current() {
            Some(object) => object.add_variable(variable),
            None => self.fail("close_variable"),
        }
    }

    fn open_function(&mut self, modifiers: &[String]) {
        let mut function = Function::default();
        function.ident.modifiers = modifiers.to_vec();
        self.function = Some(function);
    }

    fn function_identifier(&mut self, name: &str) {
        match self.function.as_mut() {
            Some(function) => function.ident.name = name.to_string(),
            None => self.fail("function_identifier"),
        }
    }

    fn function_return_type(&mut self, types: &[String]) {
        match self.function.as_mut() {
            Some(function) => function.return_type = types.to_vec(),
            None => self.fail("function_return_type"),
        }
    }

    fn open_argument(&mut self, name: &str, is_optional: bool) {
        self.argument = Some(Variable {
            ident: Identifier::new(name),
            is_optional,
            types: Vec::new(),
        });
    }

    fn argument_type(&mut self, types: &[String]) {
        match self.argument.as_mut() {
            Some(argument) => argument.types = types.to_vec(),
            None => self.fail("argument_type"),
        }
    }

    fn close_argument(&mut self) {
        let Some(argument) = self.argument.take() else {
            return self.fail("close_argument");
        };
        match self.function.as_mut() {
            Some(function) => function.args.push(argument),
            None => self.fail("close_argument"),
        }
    }

    fn close_function(&mut self) {
        let Some(function) = self.function.take() else {
            return self.fail("close_function");
        };
        match self.current() {
            Some(object) => object.add_function(function),
            None => self.fail("close_function"),
        }
    }
}
