//! qdice Measurement Engine
//!
//! Turns a requested probability into a single random bit by preparing a
//! one-qubit circuit, compiling it for a backend and collapsing the
//! one-shot measurement.
//!
//! ```text
//! (mode, p) ──→ prepare_circuit ──→ compile ──→ Backend::run ──→ collapse ──→ 0 | 1
//! ```
//!
//! | Mode | Preparation | P(1) |
//! |------|-------------|------|
//! | `superposition` | `h` | 0.5 |
//! | `navigation`, `tunneling` | `ry(2·asin(√p))` | `p` |
//! | anything else | none | 0 |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use qdice_adapter_sim::SimulatorBackend;
//! use qdice_engine::{MeasurementEngine, Mode};
//!
//! let engine = MeasurementEngine::new(Arc::new(SimulatorBackend::new()));
//! let bit = engine.measure(&Mode::Navigation, 0.8).await?;
//! ```

pub mod circuit;
pub mod engine;
pub mod error;
pub mod mode;

pub use circuit::{prepare_circuit, rotation_angle};
pub use engine::{
    DEFAULT_PROBABILITY, MeasurementEngine, MeasurementOutcome, MeasurementRequest, collapse,
};
pub use error::{ErrorKind, MeasureError, MeasureResult};
pub use mode::Mode;
