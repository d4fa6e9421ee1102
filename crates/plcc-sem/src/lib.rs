//! plcc-sem - Semantic analysis.
//!
//! The analyzer walks a parsed [`Source`](plcc_par::Source), attaches a
//! type to every expression and a resolved binding to every field, method,
//! declaration, access, and call, and rejects ill-typed programs. It
//! mutates the tree in place; afterwards the tree is read-only for the
//! interpreter and the generator.
//!
//! Analysis is idempotent: running it twice (against fresh environments)
//! produces the same annotated tree, because ids are assigned in visit
//! order and the built-in type ids are fixed.

mod analysis;

#[cfg(test)]
mod edge_cases;

pub use analysis::{analyze, Analyzer};
pub use plcc_util::SemanticError;
