//! Environment entities: types, variables, and functions.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use plcc_par::Statement;
use plcc_util::{FunctionId, ScopeId, SemanticError, TypeId, VariableId};

use crate::value::Value;

/// A named type with its member tables.
///
/// `jvm_name` is the name used when emitting the target-language program;
/// it differs from `name` only for host aliases (e.g. `Any` emits as
/// `Object`). Member maps preserve registration order.
#[derive(Debug, Clone)]
pub struct Type {
    pub name: String,
    pub jvm_name: String,
    pub fields: IndexMap<String, VariableId>,
    pub methods: IndexMap<(String, usize), FunctionId>,
}

impl Type {
    /// A type with empty member tables.
    pub fn new(name: impl Into<String>, jvm_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jvm_name: jvm_name.into(),
            fields: IndexMap::new(),
            methods: IndexMap::new(),
        }
    }
}

/// A named binding with a type and, during interpretation, a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    pub jvm_name: String,
    pub ty: TypeId,
    pub constant: bool,
    /// Runtime payload; the analyzer leaves this at `Value::Nil`.
    pub value: Value,
}

impl Variable {
    /// A binding whose jvm name equals its source name, holding `Nil`.
    pub fn new(name: impl Into<String>, ty: TypeId, constant: bool) -> Self {
        let name = name.into();
        Self {
            jvm_name: name.clone(),
            name,
            ty,
            constant,
            value: Value::Nil,
        }
    }

    /// Same binding with an initial value.
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }
}

/// A host-provided function implementation.
pub type HostFn = Rc<dyn Fn(&[Value]) -> Result<Value, SemanticError>>;

/// How a function is implemented.
#[derive(Clone)]
pub enum FunctionBody {
    /// Binding only — resolvable by the analyzer, never invoked.
    Declared,
    /// Native implementation injected by the embedder.
    Host(HostFn),
    /// A user method: parameter names, body statements, and the scope the
    /// method was defined in (its lexical closure).
    Method {
        params: Vec<String>,
        body: Rc<[Statement]>,
        scope: ScopeId,
    },
}

impl fmt::Debug for FunctionBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionBody::Declared => f.write_str("Declared"),
            FunctionBody::Host(_) => f.write_str("Host(..)"),
            FunctionBody::Method { params, scope, .. } => f
                .debug_struct("Method")
                .field("params", params)
                .field("scope", scope)
                .finish_non_exhaustive(),
        }
    }
}

/// A named callable with its signature.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub jvm_name: String,
    pub param_types: Vec<TypeId>,
    pub return_type: TypeId,
    pub body: FunctionBody,
}

impl Function {
    /// The number of parameters; functions are keyed by `(name, arity)`.
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_defaults() {
        let variable = Variable::new("count", TypeId::new(4), false);
        assert_eq!(variable.jvm_name, "count");
        assert_eq!(variable.value, Value::Nil);
        assert!(!variable.constant);
    }

    #[test]
    fn test_function_arity() {
        let function = Function {
            name: "add".into(),
            jvm_name: "add".into(),
            param_types: vec![TypeId::new(4), TypeId::new(4)],
            return_type: TypeId::new(4),
            body: FunctionBody::Declared,
        };
        assert_eq!(function.arity(), 2);
    }
}
