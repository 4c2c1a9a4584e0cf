//! Error types for the compilation crate.

use qdice_ir::{ClbitId, IrError, QubitId};
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A translation pass ran without target basis gates.
    #[error("No basis gates set in the property set")]
    MissingBasisGates,

    /// A gate cannot be expressed in the target basis.
    #[error("Gate '{0}' cannot be translated to the target basis")]
    GateNotInBasis(String),

    /// A rotation angle did not evaluate to a finite number.
    #[error("Parameter of gate '{gate}' cannot be evaluated: {expression}")]
    UnevaluableParameter {
        /// Name of the gate.
        gate: String,
        /// The offending expression.
        expression: String,
    },

    /// A qubit is acted on after it was measured.
    #[error("Operation '{operation}' on {qubit} follows its measurement")]
    OperationAfterMeasurement {
        /// The measured qubit.
        qubit: QubitId,
        /// Name of the offending operation.
        operation: String,
    },

    /// A classical bit is written by more than one measurement.
    #[error("Classical bit {0} is written more than once")]
    ClbitOverwritten(ClbitId),

    /// Error from the IR layer while rebuilding a circuit.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
