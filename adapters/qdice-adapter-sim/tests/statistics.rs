//! Sampling statistics and submission errors of the simulator backend.

use std::sync::Arc;

use qdice_adapter_sim::{SeededSampler, SimulatorBackend};
use qdice_hal::{Backend, GateSet, HalError};
use qdice_ir::{Circuit, ClbitId, QubitId};

const SHOTS: u32 = 2000;
const TOLERANCE: f64 = 0.05;

fn seeded(seed: u64) -> SimulatorBackend {
    SimulatorBackend::new().with_sampler(Arc::new(SeededSampler::new(seed)))
}

fn frequency_of_one(counts: &qdice_hal::Counts) -> f64 {
    counts.get("1") as f64 / counts.total_shots() as f64
}

#[tokio::test]
async fn test_ry_coin_frequency() {
    let p = 0.3_f64;
    let mut circuit = Circuit::with_size("biased", 1, 1);
    circuit
        .ry(2.0 * p.sqrt().asin(), QubitId(0))
        .unwrap()
        .measure(QubitId(0), ClbitId(0))
        .unwrap();

    let result = seeded(11).run(&circuit, SHOTS).await.unwrap();
    assert_eq!(result.counts.total_shots(), u64::from(SHOTS));
    assert!((frequency_of_one(&result.counts) - p).abs() < TOLERANCE);
}

#[tokio::test]
async fn test_hadamard_frequency() {
    let mut circuit = Circuit::with_size("fair", 1, 1);
    circuit
        .h(QubitId(0))
        .unwrap()
        .measure(QubitId(0), ClbitId(0))
        .unwrap();

    let result = seeded(5).run(&circuit, SHOTS).await.unwrap();
    assert!((frequency_of_one(&result.counts) - 0.5).abs() < TOLERANCE);
}

#[tokio::test]
async fn test_unmeasured_clbits_read_zero() {
    let mut circuit = Circuit::with_size("wide", 2, 2);
    circuit
        .x(QubitId(1))
        .unwrap()
        .measure(QubitId(1), ClbitId(0))
        .unwrap();

    let result = seeded(1).run(&circuit, 10).await.unwrap();
    assert_eq!(result.counts.get("10"), 10);
}

#[tokio::test]
async fn test_circuit_too_large() {
    let backend = SimulatorBackend::new().with_max_qubits(1);
    let circuit = Circuit::with_size("wide", 2, 2);

    let err = backend.submit(&circuit, 1).await.unwrap_err();
    assert!(matches!(err, HalError::CircuitTooLarge(_)));
}

#[tokio::test]
async fn test_invalid_shots() {
    let backend = SimulatorBackend::new();
    let circuit = Circuit::with_size("empty", 1, 1);

    let err = backend.submit(&circuit, 0).await.unwrap_err();
    assert!(matches!(err, HalError::InvalidShots(_)));

    let too_many = backend.capabilities().max_shots + 1;
    let err = backend.submit(&circuit, too_many).await.unwrap_err();
    assert!(matches!(err, HalError::InvalidShots(_)));
}

#[tokio::test]
async fn test_unsupported_gate_rejected() {
    let backend = SimulatorBackend::new().with_gate_set(GateSet::native());
    let mut circuit = Circuit::with_size("fair", 1, 1);
    circuit.h(QubitId(0)).unwrap();

    let err = backend.submit(&circuit, 1).await.unwrap_err();
    assert!(matches!(err, HalError::Unsupported(ref msg) if msg.contains('h')));
}

#[tokio::test]
async fn test_mid_circuit_measurement_rejected() {
    let backend = SimulatorBackend::new();
    let mut circuit = Circuit::with_size("mid", 1, 1);
    circuit
        .measure(QubitId(0), ClbitId(0))
        .unwrap()
        .x(QubitId(0))
        .unwrap();

    let err = backend.submit(&circuit, 1).await.unwrap_err();
    assert!(matches!(err, HalError::InvalidCircuit(_)));
}

#[tokio::test]
async fn test_result_handed_out_once() {
    let backend = SimulatorBackend::new();
    let circuit = Circuit::with_size("empty", 1, 1);

    let job_id = backend.submit(&circuit, 1).await.unwrap();
    backend.wait(&job_id).await.unwrap();

    let err = backend.status(&job_id).await.unwrap_err();
    assert!(matches!(err, HalError::JobNotFound(_)));
}
