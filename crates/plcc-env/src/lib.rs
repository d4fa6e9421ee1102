//! plcc-env - Types, variables, functions, values, and the scope tree.
//!
//! The [`Environment`] owns four arenas (types, variables, functions,
//! scopes) and a current-scope pointer. Name lookup walks parent scopes
//! toward the root; definition writes into a single scope and rejects
//! same-scope duplicates (shadowing across parent/child is fine).
//!
//! Embedders pre-populate the root scope through the builder API
//! ([`Environment::register_type`], [`Environment::define_host_function`])
//! before handing the environment to the analyzer or interpreter.

mod environment;
mod scope;
mod types;
mod value;

pub use environment::Environment;
pub use scope::Scope;
pub use types::{Function, FunctionBody, HostFn, Type, Variable};
pub use value::Value;

pub use plcc_util::{FunctionId, ScopeId, SemanticError, TypeId, VariableId};
