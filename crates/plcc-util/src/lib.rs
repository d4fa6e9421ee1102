//! plcc-util - Shared leaf types for the PLC compiler.
//!
//! This crate holds the types every stage needs without depending on any
//! other stage: source spans, arena ids for environment entities, and the
//! error taxonomy shared by the lexer/parser (`ParseError`) and the
//! analyzer/interpreter (`SemanticError`).

pub mod error;
pub mod ids;
pub mod span;

pub use error::{ParseError, SemanticError};
pub use ids::{FunctionId, ScopeId, TypeId, VariableId};
pub use span::Span;
