//! qdice Server - HTTP front end for the measurement engine.
//!
//! Serves single quantum coin flips to a browser game:
//!
//! | Route | Method | Purpose |
//! |-------|--------|---------|
//! | `/api/measure` | POST | `{"mode", "probability"}` → `{"success", "mode", "probability_target", "result"}` |
//! | `/api/health` | GET | liveness and backend name |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use qdice_server::{AppState, ServerConfig, create_router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let state = Arc::new(AppState::new(config.clone()));
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind(config.bind_address).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod api;
pub mod config;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;

pub use config::{Cli, GateSetChoice, ServerConfig};
pub use dto::{FailureResponse, HealthResponse, MeasureRequestBody, MeasureResponse};
pub use error::ApiError;
pub use server::create_router;
pub use state::AppState;
