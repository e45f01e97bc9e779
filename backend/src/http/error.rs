//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;

/// Message returned for every server-side failure other than a missing result.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Error raised by the service layer
    Service(ServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Service(err) = self;

        if !err.is_client_error() {
            log::error!("Request failed: {}", err);
            // Only the missing-result message reaches the client verbatim.
            let message = match &err {
                ServiceError::MissingResult => err.to_string(),
                _ => INTERNAL_ERROR_MESSAGE.to_string(),
            };
            let error = ApiError::new(err.code(), message);
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response();
        }

        let mut error = ApiError::new(err.code(), err.to_string());
        if let ServiceError::Validation(errors) = &err {
            error.message = errors.to_string();
            error.details = serde_json::to_value(errors).ok();
        }

        (StatusCode::BAD_REQUEST, Json(error)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Service(err)
    }
}

impl From<crate::error::ValidationErrors> for AppError {
    fn from(errors: crate::error::ValidationErrors) -> Self {
        AppError::Service(ServiceError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::error::ValidationErrors;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_is_bad_request_with_details() {
        let response =
            AppError::from(ValidationErrors::single("lsm", "field required")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["details"][0]["field"], "lsm");
        assert_eq!(body["message"], "lsm: field required");
    }

    #[tokio::test]
    async fn test_server_fault_is_not_echoed() {
        let response =
            AppError::from(ServiceError::emulator("secret stderr")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["code"], "EMULATOR_ERROR");
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_status_follows_client_classification() {
        let errors = vec![
            ServiceError::from(ValidationErrors::single("prev", "field required")),
            ServiceError::MissingResult,
            ServiceError::parameter_not_found("lsm_cost"),
            ServiceError::configuration("bad port"),
        ];

        for err in errors {
            let expected = if err.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            assert_eq!(AppError::from(err).into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_missing_result_message() {
        let response = AppError::from(ServiceError::MissingResult).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(
            body["message"],
            "Emulator model did not return prevalence or cases results"
        );
    }
}
