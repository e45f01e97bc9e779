//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use super::dto::{
    CompareParametersResponse, DataResponse, EmulatorResponse, HealthResponse, VersionResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::models::request::EmulatorRequest;
use crate::services::{get_compare_parameters, run_emulator_model};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<DataResponse<T>>, AppError>;

fn ok<T>(data: T) -> HandlerResult<T> {
    Ok(Json(DataResponse::new(data)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /version
///
/// Server version and the version of the emulator in use.
pub async fn get_version(State(state): State<AppState>) -> HandlerResult<VersionResponse> {
    ok(VersionResponse::current(state.emulator.version()))
}

// =============================================================================
// Form options
// =============================================================================

/// GET /options
///
/// The dynamic form options document exactly as loaded.
pub async fn get_form_options(State(state): State<AppState>) -> HandlerResult<Value> {
    ok(state.form_options.raw.clone())
}

/// GET /compare-parameters
pub async fn get_compare_parameters_handler(
    State(state): State<AppState>,
) -> HandlerResult<CompareParametersResponse> {
    ok(get_compare_parameters(&state.form_options.options)?)
}

// =============================================================================
// Emulator
// =============================================================================

/// POST /emulator/run
///
/// The body is parsed here rather than through the `Json` extractor so that
/// shape errors come back as field-scoped validation errors.
pub async fn run_emulator(
    State(state): State<AppState>,
    body: Bytes,
) -> HandlerResult<EmulatorResponse> {
    let request = EmulatorRequest::from_json_slice(&body)?;
    ok(run_emulator_model(state.emulator.as_ref(), &request).await?)
}
