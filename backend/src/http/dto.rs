//! Data Transfer Objects for the HTTP API.
//!
//! Domain DTOs are re-exported from [`crate::api`]; only the
//! transport-specific types live here.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    CompareParametersResponse, EmulatorResponse, Response as DataResponse, Version as VersionResponse,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
