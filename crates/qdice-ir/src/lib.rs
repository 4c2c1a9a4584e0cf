//! qdice Circuit Intermediate Representation
//!
//! This crate provides the data structures used to describe the small quantum
//! programs that qdice prepares, compiles and executes.
//!
//! # Overview
//!
//! A [`Circuit`] is an ordered list of [`Instruction`]s over a fixed set of
//! qubits and classical bits. Instructions are validated against the circuit's
//! registers when they are appended, so a built circuit never refers to a
//! qubit or classical bit it does not own.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] for the single-qubit gates qdice uses
//! - **Parameters**: [`ParameterExpression`] for rotation angles
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder API
//!
//! # Example: A Biased Coin
//!
//! ```rust
//! use qdice_ir::{Circuit, ClbitId, QubitId};
//!
//! // P(1) = sin^2(theta / 2) = 0.25
//! let theta = 2.0 * 0.25_f64.sqrt().asin();
//!
//! let mut circuit = Circuit::with_size("coin", 1, 1);
//! circuit
//!     .ry(theta, QubitId(0))
//!     .unwrap()
//!     .measure(QubitId(0), ClbitId(0))
//!     .unwrap();
//!
//! assert_eq!(circuit.num_ops(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Description |
//! |------|-------------|
//! | `I` | Identity |
//! | `X`, `Y`, `Z` | Pauli gates |
//! | `H` | Hadamard gate |
//! | `S`, `Sdg` | S and S-dagger gates |
//! | `SX`, `SXdg` | sqrt(X) and its inverse |
//! | `Rx`, `Ry`, `Rz` | Rotation gates |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::{ClbitId, QubitId};
