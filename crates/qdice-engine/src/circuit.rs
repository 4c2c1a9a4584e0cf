//! Circuit preparation for a single measurement.

use qdice_ir::{Circuit, ClbitId, QubitId};

use crate::error::{MeasureError, MeasureResult};
use crate::mode::Mode;

/// Y-rotation angle whose measurement yields `1` with `probability`.
///
/// Uses `P(1) = sin²(θ/2)`, so `θ = 2·asin(√p)`.
pub fn rotation_angle(probability: f64) -> MeasureResult<f64> {
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(MeasureError::ProbabilityOutOfRange(probability));
    }
    Ok(2.0 * probability.sqrt().asin())
}

/// Build the one-qubit circuit for `mode`.
///
/// `probability` is only read for modes that bias the coin, so an
/// out-of-range value is accepted for every other mode.
pub fn prepare_circuit(mode: &Mode, probability: f64) -> MeasureResult<Circuit> {
    let q = QubitId(0);
    let mut circuit = Circuit::with_size(format!("qdice_{mode}"), 1, 1);

    match mode {
        Mode::Superposition => {
            circuit.h(q)?;
        }
        Mode::Navigation | Mode::Tunneling => {
            circuit.ry(rotation_angle(probability)?, q)?;
        }
        Mode::Other(_) => {}
    }

    circuit.measure(q, ClbitId(0))?;
    Ok(circuit)
}
