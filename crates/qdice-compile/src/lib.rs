//! qdice Compilation Framework
//!
//! This crate lowers qdice circuits onto a backend's native gate set. It
//! uses a pass-based architecture: each [`Pass`] performs one analysis or
//! rewrite, and a [`PassManager`] runs them in order over a shared
//! [`PropertySet`].
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       │
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (basis gates, stats)
//! └─────────────┘
//!       │
//!       ├── BasisTranslation
//!       ├── CombineRotations
//!       ├── RemoveTrivialRotations
//!       └── MeasurementVerification
//!       │
//!       ▼
//! Output Circuit (backend-compatible)
//! ```
//!
//! Every rewrite preserves the circuit's unitary up to global phase, so the
//! outcome probabilities of the compiled circuit equal those of the input.
//!
//! # Example: Basic Compilation
//!
//! ```rust
//! use qdice_compile::{BasisGates, PassManagerBuilder};
//! use qdice_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_size("coin", 1, 1);
//! circuit.h(QubitId(0)).unwrap().measure(QubitId(0), ClbitId(0)).unwrap();
//!
//! let (pm, mut props) = PassManagerBuilder::new()
//!     .with_optimization_level(1)
//!     .with_basis_gates(BasisGates::native())
//!     .build();
//!
//! pm.run(&mut circuit, &mut props).unwrap();
//! assert!(circuit.instructions().iter().all(|i| i.name() != "h"));
//! ```
//!
//! # Optimization Levels
//!
//! | Level | Passes Included |
//! |-------|-----------------|
//! | 0 | Basis translation + measurement verification |
//! | 1 | + identity removal |
//! | 2, 3 | + rotation merging |
//!
//! # Custom Passes
//!
//! ```rust
//! use qdice_compile::{CompileResult, Pass, PassKind, PropertySet};
//! use qdice_ir::Circuit;
//!
//! struct CountOps;
//!
//! impl Pass for CountOps {
//!     fn name(&self) -> &str { "count_ops" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, circuit: &mut Circuit, props: &mut PropertySet) -> CompileResult<()> {
//!         props.insert(circuit.num_ops());
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod manager;
pub mod pass;
pub mod property;
pub mod unitary;

// Built-in passes
pub mod passes;

pub use error::{CompileError, CompileResult};
pub use manager::{PassManager, PassManagerBuilder};
pub use pass::{Pass, PassKind};
pub use property::{BasisGates, OptimizationStats, PropertySet};
pub use unitary::Unitary2x2;
