use std::{collections::HashMap, rc::Rc};

use crate::parser::prelude::{Block, FunctionDecl};

/// Saved copy of every variable binding, taken before a function call.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint(HashMap<String, String>);

/// Interpreter state for one program run: a single flat variable namespace,
/// the declared functions and the registered event listeners.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    variables: HashMap<String, String>,
    functions: HashMap<String, Rc<FunctionDecl>>,
    events: HashMap<String, Vec<Block>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a variable; unknown names read as the empty string.
    pub fn get(&self, name: &str) -> &str {
        self.variables.get(name).map(String::as_str).unwrap_or_default()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: String) {
        self.variables.insert(name.into(), value);
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.variables.clone())
    }

    /// Replaces every binding with the checkpointed ones, dropping anything
    /// created since.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.variables = checkpoint.0;
    }

    /// Declares a function; a later declaration with the same name wins.
    pub fn declare_function(&mut self, function: FunctionDecl) {
        self.functions.insert(function.identifier.value.clone(), Rc::new(function));
    }

    pub fn function(&self, name: &str) -> Option<Rc<FunctionDecl>> {
        self.functions.get(name).cloned()
    }

    pub fn register_listener(&mut self, event: impl Into<String>, body: Block) {
        self.events.entry(event.into()).or_default().push(body);
    }

    pub fn listeners(&self, event: &str) -> &[Block] {
        self.events.get(event).map(Vec::as_slice).unwrap_or_default()
    }
}
