//! A single scope node in the environment's scope tree.

use rustc_hash::FxHashMap;
use plcc_util::{FunctionId, ScopeId, VariableId};

/// One node in the scope tree: a parent pointer plus binding maps.
///
/// Lookup semantics live on the environment, which walks the parent chain;
/// a scope only answers for its own bindings.
#[derive(Debug, Default)]
pub struct Scope {
    /// The enclosing scope, `None` for the root.
    pub parent: Option<ScopeId>,
    variables: FxHashMap<String, VariableId>,
    functions: FxHashMap<(String, usize), FunctionId>,
}

impl Scope {
    /// A fresh scope under the given parent.
    pub fn new(parent: Option<ScopeId>) -> Self {
        Self {
            parent,
            variables: FxHashMap::default(),
            functions: FxHashMap::default(),
        }
    }

    pub(crate) fn variable(&self, name: &str) -> Option<VariableId> {
        self.variables.get(name).copied()
    }

    pub(crate) fn declare_variable(&mut self, name: String, id: VariableId) {
        self.variables.insert(name, id);
    }

    pub(crate) fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub(crate) fn function(&self, name: &str, arity: usize) -> Option<FunctionId> {
        self.functions.get(&(name.to_string(), arity)).copied()
    }

    pub(crate) fn declare_function(&mut self, name: String, arity: usize, id: FunctionId) {
        self.functions.insert((name, arity), id);
    }

    pub(crate) fn has_function(&self, name: &str, arity: usize) -> bool {
        self.functions.contains_key(&(name.to_string(), arity))
    }
}
