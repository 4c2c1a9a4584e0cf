//! Statevector simulation engine.

use num_complex::Complex64;
use std::f64::consts::PI;

use qdice_hal::{HalError, HalResult};
use qdice_ir::{ClbitId, Instruction, InstructionKind, QubitId, StandardGate};

use crate::sampler::Sampler;

/// Probabilities below this are rounding noise from gate decompositions.
const PROBABILITY_FLOOR: f64 = 1e-12;

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements and barriers leave the state untouched; measurement is
    /// deferred to [`sample`](Self::sample).
    pub fn apply(&mut self, instruction: &Instruction) -> HalResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubit = match instruction.qubits.first() {
                    Some(q) if q.index() < self.num_qubits => q.index(),
                    _ => {
                        return Err(HalError::InvalidCircuit(format!(
                            "'{}' targets a qubit outside the register",
                            gate.name()
                        )));
                    }
                };
                self.apply_standard_gate(gate, qubit)
            }
            InstructionKind::Measure | InstructionKind::Barrier => Ok(()),
        }
    }

    /// Apply a standard gate.
    fn apply_standard_gate(&mut self, gate: &StandardGate, qubit: usize) -> HalResult<()> {
        let angle = || {
            gate.angle().and_then(|a| a.as_f64()).ok_or_else(|| {
                HalError::InvalidCircuit(format!("angle of '{}' cannot be evaluated", gate.name()))
            })
        };

        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubit),
            StandardGate::Y => self.apply_y(qubit),
            StandardGate::Z => self.apply_phase(qubit, PI),
            StandardGate::H => self.apply_h(qubit),
            StandardGate::S => self.apply_phase(qubit, PI / 2.0),
            StandardGate::Sdg => self.apply_phase(qubit, -PI / 2.0),
            StandardGate::SX => self.apply_rx(qubit, PI / 2.0),
            StandardGate::SXdg => self.apply_rx(qubit, -PI / 2.0),
            StandardGate::Rx(_) => self.apply_rx(qubit, angle()?),
            StandardGate::Ry(_) => self.apply_ry(qubit, angle()?),
            StandardGate::Rz(_) => self.apply_rz(qubit, angle()?),
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        let neg_i_s = Complex64::new(0.0, -s);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a + neg_i_s * b;
                self.amplitudes[j] = neg_i_s * a + c * b;
            }
        }
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = c * a - s * b;
                self.amplitudes[j] = s * a + c * b;
            }
        }
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Probability of each basis state, with rounding noise flushed to zero.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes
            .iter()
            .map(|amp| {
                let p = amp.norm_sqr();
                if p < PROBABILITY_FLOOR { 0.0 } else { p }
            })
            .collect()
    }

    /// Draw `shots` basis-state indices from the final distribution.
    pub fn sample(&self, sampler: &dyn Sampler, shots: u32) -> Vec<usize> {
        let probabilities = self.probabilities();
        (0..shots).map(|_| sampler.sample(&probabilities)).collect()
    }

    /// Write the measured qubits of `outcome` into a classical bit-string.
    ///
    /// Classical bit 0 is the leftmost character. Bits no measurement
    /// writes read as `0`.
    pub fn outcome_to_bitstring(
        outcome: usize,
        measurements: &[(QubitId, ClbitId)],
        num_clbits: usize,
    ) -> String {
        let mut bits = vec!['0'; num_clbits];
        for &(qubit, clbit) in measurements {
            if let Some(bit) = bits.get_mut(clbit.index()) {
                *bit = if outcome >> qubit.index() & 1 == 1 { '1' } else { '0' };
            }
        }
        bits.into_iter().collect()
    }
}
