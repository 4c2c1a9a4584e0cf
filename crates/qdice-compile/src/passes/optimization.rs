//! Rotation optimization passes.

use std::f64::consts::PI;

use rustc_hash::FxHashMap;
use tracing::debug;

use qdice_ir::{Circuit, Instruction, InstructionKind, QubitId, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{OptimizationStats, PropertySet};

/// Tolerance for floating point comparisons.
const EPSILON: f64 = 1e-10;

/// Evaluate a rotation angle, failing on expressions that have no value.
fn evaluate(gate: &StandardGate) -> CompileResult<Option<f64>> {
    match gate.angle() {
        None => Ok(None),
        Some(expr) => expr
            .as_f64()
            .map(Some)
            .ok_or_else(|| CompileError::UnevaluableParameter {
                gate: gate.name().to_string(),
                expression: expr.to_string(),
            }),
    }
}

/// Merge two rotations about the same axis into one.
fn merge(a: &StandardGate, b: &StandardGate, angle: f64) -> Option<StandardGate> {
    match (a, b) {
        (StandardGate::Rx(_), StandardGate::Rx(_)) => Some(StandardGate::Rx(angle.into())),
        (StandardGate::Ry(_), StandardGate::Ry(_)) => Some(StandardGate::Ry(angle.into())),
        (StandardGate::Rz(_), StandardGate::Rz(_)) => Some(StandardGate::Rz(angle.into())),
        _ => None,
    }
}

/// Fold consecutive rotations about the same axis on a qubit into one.
///
/// Rx(a) followed by Rx(b) becomes Rx(a + b), and likewise for Ry and Rz.
/// A measurement or barrier on the qubit ends the run.
pub struct CombineRotations;

impl Pass for CombineRotations {
    fn name(&self) -> &'static str {
        "CombineRotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut out: Vec<Instruction> = Vec::with_capacity(circuit.num_ops());
        // Index into `out` of the latest instruction touching each qubit.
        let mut last: FxHashMap<QubitId, usize> = FxHashMap::default();
        let mut merged = 0;

        for inst in circuit.instructions() {
            if let (Some(gate), [qubit]) = (inst.as_gate(), inst.qubits.as_slice()) {
                if let Some(&idx) = last.get(qubit) {
                    if let Some(prev) = out[idx].as_gate() {
                        if let (Some(a), Some(b)) = (evaluate(prev)?, evaluate(gate)?) {
                            if let Some(combined) = merge(prev, gate, a + b) {
                                out[idx].kind = InstructionKind::Gate(combined);
                                merged += 1;
                                continue;
                            }
                        }
                    }
                }
            }

            for &qubit in &inst.qubits {
                last.insert(qubit, out.len());
            }
            out.push(inst.clone());
        }

        if merged > 0 {
            debug!("Merged {} rotations", merged);
            let mut rebuilt = circuit.empty_like();
            for inst in out {
                rebuilt.apply(inst)?;
            }
            *circuit = rebuilt;
        }
        properties.update(|stats: &mut OptimizationStats| stats.rotations_merged += merged);
        Ok(())
    }
}

/// Drop gates that act as the identity.
///
/// Removes `id` gates and rotations whose angle is a multiple of 4π, which
/// are exactly the identity matrix.
pub struct RemoveTrivialRotations;

impl RemoveTrivialRotations {
    fn is_trivial(gate: &StandardGate) -> CompileResult<bool> {
        if matches!(gate, StandardGate::I) {
            return Ok(true);
        }
        Ok(match evaluate(gate)? {
            Some(angle) => {
                let turns = angle / (4.0 * PI);
                (turns - turns.round()).abs() < EPSILON
            }
            None => false,
        })
    }
}

impl Pass for RemoveTrivialRotations {
    fn name(&self) -> &'static str {
        "RemoveTrivialRotations"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut kept = circuit.empty_like();
        let mut removed = 0;

        for inst in circuit.instructions() {
            if let Some(gate) = inst.as_gate() {
                if Self::is_trivial(gate)? {
                    removed += 1;
                    continue;
                }
            }
            kept.apply(inst.clone())?;
        }

        if removed > 0 {
            debug!("Removed {} identity gates", removed);
            *circuit = kept;
        }
        properties.update(|stats: &mut OptimizationStats| stats.gates_removed += removed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unitary::Unitary2x2;
    use qdice_ir::{ClbitId, ParameterExpression};

    #[test]
    fn test_remove_trivial_rotations() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit
            .rz(0.0, QubitId(0))
            .unwrap()
            .ry(1.2, QubitId(0))
            .unwrap()
            .rx(4.0 * PI, QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();
        circuit
            .apply(Instruction::single_qubit_gate(StandardGate::I, QubitId(0)))
            .unwrap();

        let mut props = PropertySet::new();
        RemoveTrivialRotations.run(&mut circuit, &mut props).unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, ["ry", "measure"]);
        assert_eq!(props.get::<OptimizationStats>().unwrap().gates_removed, 3);
    }

    #[test]
    fn test_two_pi_rotation_is_kept() {
        // Rz(2π) = -I: only the identity up to phase, not exactly.
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.rz(2.0 * PI, QubitId(0)).unwrap();

        RemoveTrivialRotations
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();
        assert_eq!(circuit.num_ops(), 1);
    }

    #[test]
    fn test_unevaluable_angle_is_an_error() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit
            .ry(ParameterExpression::pi() / ParameterExpression::constant(0.0), QubitId(0))
            .unwrap();

        let err = RemoveTrivialRotations
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap_err();
        assert!(matches!(err, CompileError::UnevaluableParameter { ref gate, .. } if gate == "ry"));
    }

    #[test]
    fn test_combine_rotations() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit
            .rz(0.5, QubitId(0))
            .unwrap()
            .rz(0.25, QubitId(0))
            .unwrap()
            .sx(QubitId(0))
            .unwrap()
            .rz(1.0, QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();
        let before = Unitary2x2::from_sequence(circuit.instructions()).unwrap();

        let mut props = PropertySet::new();
        CombineRotations.run(&mut circuit, &mut props).unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, ["rz", "sx", "rz", "measure"]);
        let angle = circuit.instructions()[0].as_gate().unwrap().angle().unwrap().as_f64();
        assert_eq!(angle, Some(0.75));
        assert_eq!(props.get::<OptimizationStats>().unwrap().rotations_merged, 1);

        let after = Unitary2x2::from_sequence(circuit.instructions()).unwrap();
        assert!(before.equivalent(&after));
    }

    #[test]
    fn test_combine_stops_at_barrier_and_axis_change() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit
            .rz(0.5, QubitId(0))
            .unwrap()
            .barrier_all()
            .unwrap()
            .rz(0.5, QubitId(0))
            .unwrap()
            .rx(0.5, QubitId(0))
            .unwrap();

        CombineRotations
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap();
        assert_eq!(circuit.num_ops(), 4);
    }
}
