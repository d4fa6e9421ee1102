//! Emitter error types.

use thiserror::Error;

/// A failure while emitting target-language text.
#[derive(Debug, Error)]
pub enum GenError {
    /// The character sink reported a failure.
    #[error("emit failed: {0}")]
    Emit(#[from] std::fmt::Error),

    /// The tree carries an empty annotation slot; only analyzed trees can
    /// be emitted.
    #[error("unresolved binding '{0}'")]
    Unresolved(String),
}
