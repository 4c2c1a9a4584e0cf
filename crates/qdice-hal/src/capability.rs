//! Backend capability introspection.
//!
//! [`Capabilities`] describes what a backend can execute: how many qubits it
//! has, which gates it accepts, and how many shots a job may request. The
//! measurement engine reads the gate set to pick its compilation target.

use serde::{Deserialize, Serialize};

/// Hardware capabilities of a quantum backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set (OpenQASM 3 naming convention).
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator (`true`) or real hardware (`false`).
    pub is_simulator: bool,
    /// Additional capability flags, e.g. `"statevector"`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a simulator.
    pub fn simulator(num_qubits: u32, gate_set: GateSet) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set,
            max_shots: 100_000,
            is_simulator: true,
            features: vec!["statevector".into()],
        }
    }

    /// Set the backend name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Gates a backend accepts.
///
/// The `native` list identifies gates that execute without decomposition.
/// If `native` is empty, all supported gates are considered native
/// (typical for simulators).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Single-qubit gates supported.
    pub single_qubit: Vec<String>,
    /// Native gates (execute without decomposition on this backend).
    pub native: Vec<String>,
}

impl GateSet {
    /// Every single-qubit gate the IR can express.
    pub fn universal() -> Self {
        Self {
            single_qubit: ["id", "x", "y", "z", "h", "s", "sdg", "sx", "sxdg", "rx", "ry", "rz"]
                .into_iter()
                .map(Into::into)
                .collect(),
            native: vec![],
        }
    }

    /// Superconducting-style native set: RZ + SX + SXdg + X.
    pub fn native() -> Self {
        let gates: Vec<String> = ["rz", "sx", "sxdg", "x"].into_iter().map(Into::into).collect();
        Self {
            single_qubit: gates.clone(),
            native: gates,
        }
    }

    /// Check if a gate is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.single_qubit.iter().any(|g| g == gate)
    }

    /// Check if a gate is native (executes without decomposition).
    pub fn is_native(&self, gate: &str) -> bool {
        if self.native.is_empty() {
            self.contains(gate)
        } else {
            self.native.iter().any(|g| g == gate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(4, GateSet::universal()).with_name("sim");
        assert_eq!(caps.name, "sim");
        assert_eq!(caps.num_qubits, 4);
        assert!(caps.is_simulator);
        assert!(caps.gate_set.contains("h"));
    }

    #[test]
    fn test_gate_sets() {
        let universal = GateSet::universal();
        assert!(universal.contains("ry"));
        assert!(universal.is_native("ry"));

        let native = GateSet::native();
        assert!(native.contains("sxdg"));
        assert!(!native.contains("h"));
        assert!(!native.is_native("ry"));
    }

    #[test]
    fn test_capabilities_serialize() {
        let caps = Capabilities::simulator(1, GateSet::native());
        let json = serde_json::to_value(&caps).unwrap();
        assert_eq!(json["num_qubits"], 1);
        assert_eq!(json["gate_set"]["native"][0], "rz");
    }
}
