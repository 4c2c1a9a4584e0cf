//! Verification passes for ensuring compilation correctness.
//!
//! These passes validate that earlier passes have not produced a circuit
//! whose measurements no longer mean what the caller asked for.

use rustc_hash::FxHashSet;
use tracing::debug;

use qdice_ir::{Circuit, QubitId};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Result of measurement verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the verification passed.
    pub passed: bool,
    /// Number of measurements found.
    pub measurements_found: usize,
}

/// Analysis pass that checks measurement integrity.
///
/// Fails if a qubit is acted on by a gate or another measurement after it
/// was measured, or if two measurements write the same classical bit.
/// Barriers after a measurement are allowed.
pub struct MeasurementVerification;

impl Pass for MeasurementVerification {
    fn name(&self) -> &'static str {
        "measurement_verification"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut measured: FxHashSet<QubitId> = FxHashSet::default();
        let mut written = FxHashSet::default();

        for inst in circuit.instructions() {
            if inst.is_barrier() {
                continue;
            }
            for &qubit in &inst.qubits {
                if measured.contains(&qubit) {
                    return Err(CompileError::OperationAfterMeasurement {
                        qubit,
                        operation: inst.name().to_string(),
                    });
                }
            }
            if inst.is_measure() {
                for &clbit in &inst.clbits {
                    if !written.insert(clbit) {
                        return Err(CompileError::ClbitOverwritten(clbit));
                    }
                }
                for &qubit in &inst.qubits {
                    measured.insert(qubit);
                }
            }
        }

        debug!(
            "Measurement verification passed: {} measurements",
            measured.len()
        );
        properties.insert(VerificationResult {
            passed: true,
            measurements_found: measured.len(),
        });
        Ok(())
    }
}
