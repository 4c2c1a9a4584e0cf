//! Measurement endpoint.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::dto::{MeasureRequestBody, MeasureResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/measure - Collapse one qubit into a bit.
pub async fn measure(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MeasureRequestBody>, JsonRejection>,
) -> Response {
    match run_measurement(&state, payload).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => {
            error!(kind = ?err.kind(), "Measurement failed: {err}");
            err.into_response_with(state.config.split_error_status)
        }
    }
}

async fn run_measurement(
    state: &AppState,
    payload: Result<Json<MeasureRequestBody>, JsonRejection>,
) -> Result<MeasureResponse, ApiError> {
    let Json(body) = payload?;
    let (request, probability_target) = body.decode()?;
    debug!(mode = %request.mode, probability = ?request.probability, "Measuring");

    let outcome = state.engine.measure_request(&request).await?;

    Ok(MeasureResponse {
        success: true,
        mode: outcome.mode.to_string(),
        probability_target,
        result: outcome.result,
    })
}
