//! Error taxonomy shared by the compiler stages.
//!
//! Two failure classes cross crate boundaries: [`ParseError`] from the
//! lexer and parser (carries a source index), and [`SemanticError`] from
//! the analyzer and interpreter (message only). Every error aborts its
//! pipeline stage and bubbles to the embedder.

use thiserror::Error;

/// A lexical or syntactic failure at a known source position.
///
/// `index` is the 0-based byte offset of the offending character or token;
/// when the token stream has run out it points one past the final lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at index {index}")]
pub struct ParseError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Byte offset the failure is attributed to.
    pub index: usize,
}

impl ParseError {
    /// Create a parse error at the given source index.
    pub fn new(message: impl Into<String>, index: usize) -> Self {
        Self {
            message: message.into(),
            index,
        }
    }
}

/// A semantic failure from analysis or interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A value or expression did not satisfy the required type.
    #[error("expected {expected}, found {found}")]
    Type { expected: String, found: String },

    /// A variable, function, field, method, or type name failed to resolve.
    #[error("'{name}' is not defined")]
    Undefined { name: String },

    /// A call supplied the wrong number of arguments.
    #[error("{function}: expected {expected} argument(s), got {actual}")]
    Arity {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// A name was defined twice in the same scope.
    #[error("'{name}' is already defined in this scope")]
    Redefinition { name: String },

    /// A construct that is well-formed syntactically but not permitted
    /// semantically (bare non-call statement expression, constant field
    /// without initializer, redundant grouping, unrepresentable literal).
    #[error("{0}")]
    Invalid(String),

    /// A failure only detectable while evaluating the program.
    #[error("{0}")]
    Runtime(String),
}

impl SemanticError {
    /// Type failure with the expected type name and the offending one.
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        SemanticError::Type {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Unresolved-name failure.
    pub fn undefined(name: impl Into<String>) -> Self {
        SemanticError::Undefined { name: name.into() }
    }

    /// Disallowed-construct failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        SemanticError::Invalid(message.into())
    }

    /// Runtime failure with a preformatted message.
    pub fn runtime(message: impl Into<String>) -> Self {
        SemanticError::Runtime(message.into())
    }
}
