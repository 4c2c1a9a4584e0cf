//! Application state for the measurement server.

use std::sync::Arc;

use qdice_adapter_sim::SimulatorBackend;
use qdice_engine::MeasurementEngine;

use crate::config::ServerConfig;

/// Shared application state.
///
/// Built once at startup; handlers only read it.
pub struct AppState {
    /// The measurement engine and its backend.
    pub engine: MeasurementEngine,
    /// Server configuration.
    pub config: ServerConfig,
}

impl AppState {
    /// Create state backed by the local simulator.
    pub fn new(config: ServerConfig) -> Self {
        let backend = SimulatorBackend::new().with_gate_set(config.gate_set.gate_set());
        let engine = MeasurementEngine::new(Arc::new(backend))
            .with_optimization_level(config.optimization_level);
        Self { engine, config }
    }

    /// Create state around an existing engine.
    pub fn with_engine(config: ServerConfig, engine: MeasurementEngine) -> Self {
        Self { engine, config }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}
