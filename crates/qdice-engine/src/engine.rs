//! The measurement engine.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use qdice_compile::{BasisGates, PassManagerBuilder};
use qdice_hal::{Backend, ExecutionResult};
use qdice_ir::Circuit;

use crate::circuit::prepare_circuit;
use crate::error::{MeasureError, MeasureResult};
use crate::mode::Mode;

/// Probability used when a request does not supply one.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Every measurement runs exactly one shot.
const SHOTS: u32 = 1;

/// A decoded measurement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRequest {
    /// Preparation mode.
    #[serde(default)]
    pub mode: Mode,
    /// Requested probability of measuring `1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

impl MeasurementRequest {
    /// Create a request.
    pub fn new(mode: impl Into<Mode>, probability: Option<f64>) -> Self {
        Self {
            mode: mode.into(),
            probability,
        }
    }

    /// The requested probability, or [`DEFAULT_PROBABILITY`].
    pub fn probability(&self) -> f64 {
        self.probability.unwrap_or(DEFAULT_PROBABILITY)
    }
}

/// A collapsed measurement together with the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementOutcome {
    /// The mode, as requested.
    pub mode: Mode,
    /// The probability that was targeted.
    pub probability_target: f64,
    /// The collapsed bit.
    pub result: u8,
}

/// Produces single biased bits by running one-qubit circuits on a backend.
///
/// The engine holds no mutable state; one instance is built at startup and
/// shared across requests.
pub struct MeasurementEngine {
    backend: Arc<dyn Backend>,
    optimization_level: u8,
}

impl MeasurementEngine {
    /// Create an engine on top of `backend`.
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            optimization_level: 1,
        }
    }

    /// Set the compiler optimization level (clamped to 0-3).
    #[must_use]
    pub fn with_optimization_level(mut self, level: u8) -> Self {
        self.optimization_level = level.min(3);
        self
    }

    /// The backend measurements run on.
    pub fn backend(&self) -> &Arc<dyn Backend> {
        &self.backend
    }

    /// The configured optimization level.
    pub fn optimization_level(&self) -> u8 {
        self.optimization_level
    }

    /// Basis the backend accepts, plus the non-unitary operations.
    fn basis_gates(&self) -> BasisGates {
        let gate_set = &self.backend.capabilities().gate_set;
        BasisGates::new(
            gate_set
                .single_qubit
                .iter()
                .map(String::as_str)
                .chain(["measure", "barrier"]),
        )
    }

    /// Compile a circuit for the backend.
    pub fn compile(&self, mut circuit: Circuit) -> MeasureResult<Circuit> {
        let (pm, mut props) = PassManagerBuilder::new()
            .with_optimization_level(self.optimization_level)
            .with_basis_gates(self.basis_gates())
            .build();
        pm.run(&mut circuit, &mut props)?;
        Ok(circuit)
    }

    /// Prepare, compile and run one measurement, returning the collapsed bit.
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn measure(&self, mode: &Mode, probability: f64) -> MeasureResult<u8> {
        let circuit = prepare_circuit(mode, probability)?;
        let compiled = self.compile(circuit)?;
        debug!(
            "Compiled circuit: {} ops, depth {}",
            compiled.num_ops(),
            compiled.depth()
        );

        let result = self.backend.run(&compiled, SHOTS).await?;
        let bit = collapse(&result)?;
        info!(result = bit, "Measurement collapsed");
        Ok(bit)
    }

    /// Run a decoded request and echo its inputs alongside the result.
    pub async fn measure_request(
        &self,
        request: &MeasurementRequest,
    ) -> MeasureResult<MeasurementOutcome> {
        let probability = request.probability();
        let result = self.measure(&request.mode, probability).await?;
        Ok(MeasurementOutcome {
            mode: request.mode.clone(),
            probability_target: probability,
            result,
        })
    }
}

/// Extract the single observed bit from a one-shot result.
///
/// The counts must hold exactly one bit-string, `"0"` or `"1"`, seen once.
pub fn collapse(result: &ExecutionResult) -> MeasureResult<u8> {
    let mut outcomes = result.counts.iter();
    match (outcomes.next(), outcomes.next()) {
        (Some((bits, 1)), None) if bits.len() == 1 => u8::from_str_radix(bits, 2)
            .map_err(|_| MeasureError::UnexpectedResult(format!("invalid bit-string '{bits}'"))),
        (Some((bits, count)), None) => Err(MeasureError::UnexpectedResult(format!(
            "expected one single-bit outcome, got '{bits}' x{count}"
        ))),
        _ => Err(MeasureError::UnexpectedResult(format!(
            "expected exactly one outcome, got {}",
            result.counts.len()
        ))),
    }
}
