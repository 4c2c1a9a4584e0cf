//! Error types for the measurement engine.

use qdice_compile::CompileError;
use qdice_hal::HalError;
use qdice_ir::IrError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad category of a [`MeasureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller supplied something unusable.
    InvalidInput,
    /// Building, compiling or running the circuit failed.
    Execution,
}

/// Errors that can occur while producing a measurement.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MeasureError {
    /// Probability is not a finite number in `[0, 1]`.
    #[error("probability must be a finite number in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),

    /// A request field has the wrong type or the body cannot be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Circuit construction failed.
    #[error("circuit construction failed: {0}")]
    Circuit(#[from] IrError),

    /// Compilation failed.
    #[error("compilation failed: {0}")]
    Compile(#[from] CompileError),

    /// The backend failed to run the circuit.
    #[error("backend error: {0}")]
    Backend(#[from] HalError),

    /// The backend returned something other than one single-shot outcome.
    #[error("unexpected measurement result: {0}")]
    UnexpectedResult(String),
}

impl MeasureError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MeasureError::ProbabilityOutOfRange(_) | MeasureError::InvalidRequest(_) => {
                ErrorKind::InvalidInput
            }
            MeasureError::Circuit(_)
            | MeasureError::Compile(_)
            | MeasureError::Backend(_)
            | MeasureError::UnexpectedResult(_) => ErrorKind::Execution,
        }
    }
}

/// Result type for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;
