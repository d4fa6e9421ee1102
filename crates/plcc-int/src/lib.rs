//! plcc-int - Tree-walking interpreter.
//!
//! The interpreter walks a (possibly un-annotated) AST against an
//! [`Environment`](plcc_env::Environment), producing runtime
//! [`Value`](plcc_env::Value)s. Static types play no role here: every
//! requirement is re-checked dynamically against the payloads.
//!
//! Non-local return is a dedicated control-flow channel, never an error:
//! statement evaluation yields a [`Flow`] that is either `Normal` or
//! `Return(value)`, and the method call boundary consumes the latter. The
//! previously-current scope is restored on every exit path, including
//! error propagation.

mod interp;

#[cfg(test)]
mod edge_cases;

pub use interp::{Flow, Interpreter};
pub use plcc_util::SemanticError;
