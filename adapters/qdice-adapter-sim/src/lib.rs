//! qdice Local Statevector Simulator
//!
//! This crate provides the backend the measurement service runs on. It
//! evolves an exact statevector and draws measurement outcomes from it.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation
//! - **All Standard Gates**: Supports every gate in `qdice-ir`
//! - **Pluggable Randomness**: Outcomes come from a [`Sampler`], so tests can
//!   seed or pin them
//!
//! # Example
//!
//! ```ignore
//! use qdice_adapter_sim::SimulatorBackend;
//! use qdice_hal::Backend;
//! use qdice_ir::{Circuit, ClbitId, QubitId};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = SimulatorBackend::new();
//!
//!     let mut circuit = Circuit::with_size("coin", 1, 1);
//!     circuit.h(QubitId(0))?.measure(QubitId(0), ClbitId(0))?;
//!
//!     let result = backend.run(&circuit, 1000).await?;
//!     // Expect ~50% "0" and ~50% "1"
//!     println!("Results: {:?}", result.counts);
//!
//!     Ok(())
//! }
//! ```

mod sampler;
mod simulator;
mod statevector;

pub use sampler::{QuantileSampler, Sampler, SeededSampler, ThreadRngSampler};
pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
