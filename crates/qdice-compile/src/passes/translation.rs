//! Basis translation pass.

use std::f64::consts::{FRAC_PI_2, PI};

use qdice_ir::{Circuit, Instruction, ParameterExpression, QubitId, StandardGate};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::{BasisGates, PropertySet};

/// Basis translation pass.
///
/// Rewrites every gate outside the target basis into the native
/// superconducting basis (RZ + SX + SXdg + X). Each rewrite equals the
/// original gate up to global phase, so outcome probabilities are unchanged.
pub struct BasisTranslation;

impl Pass for BasisTranslation {
    fn name(&self) -> &'static str {
        "BasisTranslation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let basis = properties
            .basis_gates
            .as_ref()
            .ok_or(CompileError::MissingBasisGates)?;

        let mut translated = circuit.empty_like();
        for inst in circuit.instructions() {
            match inst.as_gate() {
                Some(gate) if !basis.contains(gate.name()) => {
                    let replacement = translate_gate(gate, inst.qubits[0], basis)?;
                    debug!(
                        "Translated {} into {} native gates",
                        gate.name(),
                        replacement.len()
                    );
                    for r in replacement {
                        translated.apply(r)?;
                    }
                }
                _ => {
                    translated.apply(inst.clone())?;
                }
            }
        }

        *circuit = translated;
        Ok(())
    }

    fn should_run(&self, _circuit: &Circuit, properties: &PropertySet) -> bool {
        properties.basis_gates.is_some()
    }
}

/// Translate a gate and check the result lands in the basis.
fn translate_gate(
    gate: &StandardGate,
    qubit: QubitId,
    basis: &BasisGates,
) -> CompileResult<Vec<Instruction>> {
    let replacement = translate_to_native(gate, qubit);
    let fits = replacement
        .iter()
        .filter_map(Instruction::as_gate)
        .all(|g| basis.contains(g.name()));
    if fits {
        Ok(replacement)
    } else {
        Err(CompileError::GateNotInBasis(gate.name().to_string()))
    }
}

/// Translate a standard gate to the native basis (RZ + SX + SXdg + X).
///
/// Sequences are listed in program order.
fn translate_to_native(gate: &StandardGate, q0: QubitId) -> Vec<Instruction> {
    let rz = |theta: ParameterExpression| Instruction::single_qubit_gate(StandardGate::Rz(theta), q0);
    let sx = || Instruction::single_qubit_gate(StandardGate::SX, q0);
    let sxdg = || Instruction::single_qubit_gate(StandardGate::SXdg, q0);

    match gate {
        // Identity
        StandardGate::I => vec![],

        // Y = Rz(π) · X
        StandardGate::Y => vec![
            Instruction::single_qubit_gate(StandardGate::X, q0),
            rz(PI.into()),
        ],

        // Z = Rz(π)
        StandardGate::Z => vec![rz(PI.into())],

        // S = Rz(π/2), Sdg = Rz(-π/2)
        StandardGate::S => vec![rz(FRAC_PI_2.into())],
        StandardGate::Sdg => vec![rz((-FRAC_PI_2).into())],

        // H = Rz(π/2) · SX · Rz(π/2)
        StandardGate::H => vec![rz(FRAC_PI_2.into()), sx(), rz(FRAC_PI_2.into())],

        // Ry(θ) = SXdg · Rz(θ) · SX
        StandardGate::Ry(theta) => vec![sx(), rz(theta.clone()), sxdg()],

        // Rx(θ) = Rz(-π/2) · Ry(θ) · Rz(π/2)
        StandardGate::Rx(theta) => vec![
            rz(FRAC_PI_2.into()),
            sx(),
            rz(theta.clone()),
            sxdg(),
            rz((-FRAC_PI_2).into()),
        ],

        // Already native
        StandardGate::X | StandardGate::SX | StandardGate::SXdg | StandardGate::Rz(_) => {
            vec![Instruction::single_qubit_gate(gate.clone(), q0)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unitary::Unitary2x2;
    use qdice_ir::ClbitId;

    fn native_props() -> PropertySet {
        PropertySet::new().with_basis_gates(BasisGates::native())
    }

    #[test]
    fn test_every_gate_translates_up_to_phase() {
        let gates = [
            StandardGate::I,
            StandardGate::X,
            StandardGate::Y,
            StandardGate::Z,
            StandardGate::H,
            StandardGate::S,
            StandardGate::Sdg,
            StandardGate::SX,
            StandardGate::SXdg,
            StandardGate::Rx(0.73.into()),
            StandardGate::Ry(1.91.into()),
            StandardGate::Rz((-2.2).into()),
        ];

        for gate in gates {
            let expected = Unitary2x2::from_gate(&gate).unwrap();
            let translated = translate_to_native(&gate, QubitId(0));
            let got = Unitary2x2::from_sequence(&translated).unwrap();
            assert!(
                expected.equivalent(&got),
                "translation of {} is not equivalent up to global phase",
                gate.name()
            );
            assert!(
                translated
                    .iter()
                    .all(|i| BasisGates::native().contains(i.name()))
            );
        }
    }

    #[test]
    fn test_translation_h() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit
            .h(QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();

        BasisTranslation.run(&mut circuit, &mut native_props()).unwrap();

        // H = Rz · SX · Rz, then the measurement
        let names: Vec<_> = circuit.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, ["rz", "sx", "rz", "measure"]);
    }

    #[test]
    fn test_translation_ry() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.ry(1.0, QubitId(0)).unwrap();

        BasisTranslation.run(&mut circuit, &mut native_props()).unwrap();

        let names: Vec<_> = circuit.instructions().iter().map(Instruction::name).collect();
        assert_eq!(names, ["sx", "rz", "sxdg"]);
    }

    #[test]
    fn test_universal_basis_is_untouched() {
        let mut circuit = Circuit::with_size("test", 1, 1);
        circuit
            .ry(1.0, QubitId(0))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap();
        let before = circuit.clone();

        let mut props = PropertySet::new().with_basis_gates(BasisGates::universal());
        BasisTranslation.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_missing_basis_gates() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        let err = BasisTranslation
            .run(&mut circuit, &mut PropertySet::new())
            .unwrap_err();
        assert!(matches!(err, CompileError::MissingBasisGates));
        assert!(!BasisTranslation.should_run(&circuit, &PropertySet::new()));
    }

    #[test]
    fn test_gate_outside_reachable_basis() {
        let mut circuit = Circuit::with_size("test", 1, 0);
        circuit.h(QubitId(0)).unwrap();

        let mut props = PropertySet::new().with_basis_gates(BasisGates::new(["x", "measure"]));
        let err = BasisTranslation.run(&mut circuit, &mut props).unwrap_err();
        assert!(matches!(err, CompileError::GateNotInBasis(ref g) if g == "h"));
    }
}
