//! The environment: entity arenas, the scope tree, and assignability.

use rustc_hash::FxHashMap;

use plcc_util::{FunctionId, ScopeId, SemanticError, TypeId, VariableId};

use crate::scope::Scope;
use crate::types::{Function, FunctionBody, Type, Variable};
use crate::value::Value;

/// Built-in types, registered in this order by [`Environment::new`] so the
/// associated `TypeId` constants stay valid.
const BUILTIN_TYPES: [(&str, &str); 8] = [
    ("Any", "Object"),
    ("Nil", "Void"),
    ("Comparable", "Comparable"),
    ("Boolean", "Boolean"),
    ("Integer", "Integer"),
    ("Decimal", "Decimal"),
    ("Character", "Character"),
    ("String", "String"),
];

/// Entity arenas plus the scope tree and the current-scope pointer.
///
/// Ids handed out by an environment are only meaningful to that
/// environment; indexing with a foreign id is a logic error.
///
/// # Example
///
/// ```
/// use plcc_env::{Environment, Value};
///
/// let mut env = Environment::new();
/// env.define_host_function("print", "System.out.println",
///     vec![Environment::ANY], Environment::NIL,
///     |args| {
///         println!("{}", args[0]);
///         Ok(Value::Nil)
///     })
///     .unwrap();
/// assert!(env.lookup_function("print", 1).is_ok());
/// ```
#[derive(Debug)]
pub struct Environment {
    types: Vec<Type>,
    type_ids: FxHashMap<String, TypeId>,
    variables: Vec<Variable>,
    functions: Vec<Function>,
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Environment {
    pub const ANY: TypeId = TypeId(0);
    pub const NIL: TypeId = TypeId(1);
    pub const COMPARABLE: TypeId = TypeId(2);
    pub const BOOLEAN: TypeId = TypeId(3);
    pub const INTEGER: TypeId = TypeId(4);
    pub const DECIMAL: TypeId = TypeId(5);
    pub const CHARACTER: TypeId = TypeId(6);
    pub const STRING: TypeId = TypeId(7);

    /// An environment with the built-in types and an empty root scope.
    pub fn new() -> Self {
        let mut env = Self {
            types: Vec::new(),
            type_ids: FxHashMap::default(),
            variables: Vec::new(),
            functions: Vec::new(),
            scopes: vec![Scope::new(None)],
            current: ScopeId::new(0),
        };
        for (name, jvm_name) in BUILTIN_TYPES {
            env.insert_type(Type::new(name, jvm_name));
        }
        env
    }

    // ------------------------------------------------------------------
    // Scope tree
    // ------------------------------------------------------------------

    /// The root scope (host bindings live here).
    pub fn root_scope(&self) -> ScopeId {
        ScopeId::new(0)
    }

    /// The scope definitions and lookups currently apply to.
    pub fn current_scope(&self) -> ScopeId {
        self.current
    }

    /// Point definitions and lookups at the given scope. Callers pair
    /// this with [`Environment::current_scope`] to restore the previous
    /// scope on every exit path.
    pub fn set_current(&mut self, scope: ScopeId) {
        self.current = scope;
    }

    /// Allocate a child of `parent` without entering it.
    pub fn push_child_of(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope::new(Some(parent)));
        id
    }

    /// Allocate a scope with no parent chain beyond `parent`, for object
    /// payloads.
    pub fn new_object_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope::new(parent));
        id
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    /// Register an embedder-provided type.
    pub fn register_type(&mut self, ty: Type) -> Result<TypeId, SemanticError> {
        if self.type_ids.contains_key(&ty.name) {
            return Err(SemanticError::Redefinition {
                name: ty.name.clone(),
            });
        }
        Ok(self.insert_type(ty))
    }

    fn insert_type(&mut self, ty: Type) -> TypeId {
        let id = TypeId::new(self.types.len());
        self.type_ids.insert(ty.name.clone(), id);
        self.types.push(ty);
        id
    }

    /// Resolve a type by source name.
    pub fn lookup_type(&self, name: &str) -> Result<TypeId, SemanticError> {
        self.type_ids
            .get(name)
            .copied()
            .ok_or_else(|| SemanticError::undefined(name))
    }

    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    /// `target ← actual`: `Any` accepts anything, `Comparable` accepts the
    /// four primitive ordered types, and otherwise assignability is
    /// nominal equality.
    pub fn require_assignable(&self, target: TypeId, actual: TypeId) -> Result<(), SemanticError> {
        let comparable = matches!(
            actual,
            Self::INTEGER | Self::DECIMAL | Self::CHARACTER | Self::STRING
        );
        if target == Self::ANY || target == actual || (target == Self::COMPARABLE && comparable) {
            Ok(())
        } else {
            Err(SemanticError::type_mismatch(
                &self.ty(target).name,
                &self.ty(actual).name,
            ))
        }
    }

    // ------------------------------------------------------------------
    // Variables
    // ------------------------------------------------------------------

    /// Define a variable in the current scope.
    pub fn define_variable(&mut self, variable: Variable) -> Result<VariableId, SemanticError> {
        self.define_variable_in(self.current, variable)
    }

    /// Define a variable in the given scope; a same-scope duplicate is a
    /// redefinition error (shadowing an outer scope is not).
    pub fn define_variable_in(
        &mut self,
        scope: ScopeId,
        variable: Variable,
    ) -> Result<VariableId, SemanticError> {
        if self.scopes[scope.index()].has_variable(&variable.name) {
            return Err(SemanticError::Redefinition {
                name: variable.name.clone(),
            });
        }
        let id = VariableId::new(self.variables.len());
        self.scopes[scope.index()].declare_variable(variable.name.clone(), id);
        self.variables.push(variable);
        Ok(id)
    }

    /// Look a variable up from the current scope, walking parents.
    pub fn lookup_variable(&self, name: &str) -> Result<VariableId, SemanticError> {
        self.lookup_variable_in(self.current, name)
    }

    /// Look a variable up from the given scope, walking parents.
    pub fn lookup_variable_in(
        &self,
        scope: ScopeId,
        name: &str,
    ) -> Result<VariableId, SemanticError> {
        let mut next = Some(scope);
        while let Some(id) = next {
            let scope = &self.scopes[id.index()];
            if let Some(variable) = scope.variable(name) {
                return Ok(variable);
            }
            next = scope.parent;
        }
        Err(SemanticError::undefined(name))
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.index()]
    }

    pub fn variable_mut(&mut self, id: VariableId) -> &mut Variable {
        &mut self.variables[id.index()]
    }

    // ------------------------------------------------------------------
    // Functions
    // ------------------------------------------------------------------

    /// Define a function in the current scope, keyed by `(name, arity)`.
    pub fn define_function(&mut self, function: Function) -> Result<FunctionId, SemanticError> {
        self.define_function_in(self.current, function)
    }

    /// Define a function in the given scope.
    pub fn define_function_in(
        &mut self,
        scope: ScopeId,
        function: Function,
    ) -> Result<FunctionId, SemanticError> {
        let arity = function.arity();
        if self.scopes[scope.index()].has_function(&function.name, arity) {
            return Err(SemanticError::Redefinition {
                name: format!("{}/{}", function.name, arity),
            });
        }
        let id = FunctionId::new(self.functions.len());
        self.scopes[scope.index()].declare_function(function.name.clone(), arity, id);
        self.functions.push(function);
        Ok(id)
    }

    /// Register a host function in the current scope.
    pub fn define_host_function(
        &mut self,
        name: impl Into<String>,
        jvm_name: impl Into<String>,
        param_types: Vec<TypeId>,
        return_type: TypeId,
        implementation: impl Fn(&[Value]) -> Result<Value, SemanticError> + 'static,
    ) -> Result<FunctionId, SemanticError> {
        self.define_function(Function {
            name: name.into(),
            jvm_name: jvm_name.into(),
            param_types,
            return_type,
            body: FunctionBody::Host(std::rc::Rc::new(implementation)),
        })
    }

    /// Look a function up from the current scope, walking parents.
    pub fn lookup_function(&self, name: &str, arity: usize) -> Result<FunctionId, SemanticError> {
        self.lookup_function_in(self.current, name, arity)
    }

    /// Look a function up from the given scope, walking parents.
    pub fn lookup_function_in(
        &self,
        scope: ScopeId,
        name: &str,
        arity: usize,
    ) -> Result<FunctionId, SemanticError> {
        let mut next = Some(scope);
        while let Some(id) = next {
            let scope = &self.scopes[id.index()];
            if let Some(function) = scope.function(name, arity) {
                return Ok(function);
            }
            next = scope.parent;
        }
        Err(SemanticError::undefined(format!("{name}/{arity}")))
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.index()]
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
