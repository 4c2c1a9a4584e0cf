//! Simulator backend implementation.

use async_trait::async_trait;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use qdice_hal::{
    Backend, BackendAvailability, Capabilities, Counts, ExecutionResult, GateSet, HalError,
    HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qdice_ir::{Circuit, InstructionKind};

use crate::sampler::{Sampler, ThreadRngSampler};
use crate::statevector::Statevector;

/// Default register limit; a 20-qubit state takes ~16 MB.
const DEFAULT_MAX_QUBITS: u32 = 20;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Circuits run on an exact statevector. Each job evolves the state once
/// and draws every shot from the final distribution, so measurements must
/// be terminal.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    sampler: Arc<dyn Sampler>,
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self {
            capabilities: Capabilities::simulator(DEFAULT_MAX_QUBITS, GateSet::universal()),
            sampler: Arc::new(ThreadRngSampler),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// Limit the number of qubits a circuit may use.
    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.capabilities.num_qubits = max_qubits;
        self
    }

    /// Restrict the gates the simulator accepts.
    #[must_use]
    pub fn with_gate_set(mut self, gate_set: GateSet) -> Self {
        self.capabilities.gate_set = gate_set;
        self
    }

    /// Replace the randomness source.
    #[must_use]
    pub fn with_sampler(mut self, sampler: Arc<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    /// Number of jobs whose results have not been collected.
    pub fn pending_jobs(&self) -> usize {
        self.lock_jobs().len()
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn check_circuit(&self, circuit: &Circuit) -> ValidationResult {
        let mut reasons = Vec::new();
        let max_qubits = self.capabilities.num_qubits as usize;
        if circuit.num_qubits() > max_qubits {
            reasons.push(format!(
                "circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                max_qubits
            ));
        }

        let mut measured = FxHashSet::default();
        let mut unsupported = Vec::new();
        for inst in circuit.instructions() {
            match &inst.kind {
                InstructionKind::Measure => measured.extend(inst.qubits.iter().copied()),
                InstructionKind::Barrier => {}
                InstructionKind::Gate(gate) => {
                    if let Some(q) = inst.qubits.iter().find(|q| measured.contains(*q)) {
                        reasons.push(format!("'{}' acts on {q} after it was measured", gate.name()));
                    }
                    if !self.capabilities.gate_set.contains(gate.name())
                        && !unsupported.contains(&gate.name())
                    {
                        unsupported.push(gate.name());
                    }
                }
            }
        }

        if !reasons.is_empty() {
            ValidationResult::Invalid { reasons }
        } else if !unsupported.is_empty() {
            ValidationResult::RequiresTranspilation {
                details: format!("gates not in the gate set: {}", unsupported.join(", ")),
            }
        } else {
            ValidationResult::Valid
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit_name = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!(
            "Starting simulation: {} qubits, {} shots",
            num_qubits, shots
        );

        let mut sv = Statevector::new(num_qubits);
        let mut measurements = Vec::new();
        for inst in circuit.instructions() {
            if inst.is_measure() {
                measurements.extend(inst.qubits.iter().copied().zip(inst.clbits.iter().copied()));
            }
            sv.apply(inst)?;
        }

        let mut counts = Counts::new();
        for outcome in sv.sample(self.sampler.as_ref(), shots) {
            let bitstring =
                Statevector::outcome_to_bitstring(outcome, &measurements, circuit.num_clbits());
            counts.insert(bitstring, 1);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)))
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(self.check_circuit(circuit))
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 || shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} is outside 1..={}",
                self.capabilities.max_shots
            )));
        }

        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }

        match self.check_circuit(circuit) {
            ValidationResult::Valid => {}
            ValidationResult::Invalid { reasons } => {
                return Err(HalError::InvalidCircuit(reasons.join("; ")));
            }
            ValidationResult::RequiresTranspilation { details } => {
                return Err(HalError::Unsupported(details));
            }
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let mut job = Job::queued();
        job.transition(JobStatus::Running);
        self.lock_jobs()
            .insert(job_id.0.clone(), SimJob { job, result: None });

        debug!("Submitted job: {}", job_id);

        let outcome = self.run_simulation(circuit, shots);

        let mut jobs = self.lock_jobs();
        if let Some(sim_job) = jobs.get_mut(&job_id.0) {
            match outcome {
                Ok(result) => {
                    sim_job.result = Some(result);
                    sim_job.job.transition(JobStatus::Completed);
                    debug!("Job {} settled in {:?}", job_id, sim_job.job.turnaround());
                }
                Err(e) => {
                    warn!("Job {} failed: {}", job_id, e);
                    sim_job.job.transition(JobStatus::Failed(e.to_string()));
                }
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let mut jobs = self.lock_jobs();
        let status = jobs
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        // Failed jobs have no result to collect.
        if matches!(status, JobStatus::Failed(_)) {
            jobs.remove(&job_id.0);
        }
        Ok(status)
    }

    /// Hand out a completed job's result. Each result is returned once.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let mut jobs = self.lock_jobs();
        let status = jobs
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;

        match status {
            JobStatus::Completed => jobs
                .remove(&job_id.0)
                .and_then(|j| j.result)
                .ok_or_else(|| HalError::JobNotFound(job_id.0.clone())),
            JobStatus::Failed(msg) => {
                jobs.remove(&job_id.0);
                Err(HalError::JobFailed(msg))
            }
            JobStatus::Queued | JobStatus::Running => Err(HalError::Backend(format!(
                "job {job_id} has not finished"
            ))),
        }
    }
}
