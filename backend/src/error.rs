//! Error types for the emulator pipeline.
//!
//! Every failure the core can raise is one of the [`ServiceError`] variants.
//! None of them is retried internally: they are deterministic for a given
//! input, so the enclosing layer decides how each one is surfaced.

use serde::{Deserialize, Serialize};

/// Result type for pipeline and resource operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// One field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name (or JSON path) of the offending field
    pub field: String,
    /// Human-readable reason
    pub message: String,
}

/// Every validation failure found in a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", self.summary())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding exactly one failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether any failure was recorded against `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `field: message` pairs joined with `; `.
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Error type for the request pipeline, parameter metadata and resources.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Client input was out of range, missing or malformed.
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// The emulator returned no prevalence or cases table.
    #[error("Emulator model did not return prevalence or cases results")]
    MissingResult,

    /// A result table does not carry the column layout this service expects.
    #[error("Schema mismatch in {table} table: column '{column}' {details}")]
    SchemaMismatch {
        table: String,
        column: String,
        details: String,
    },

    /// The emulator returned rows for a scenario that was never submitted.
    #[error("Emulator returned unknown scenario '{tag}' in {table} table")]
    UnknownScenario { table: String, tag: String },

    /// A compare parameter or linked cost id is absent from the form options.
    #[error("Parameter '{name}' not found in form options.")]
    ParameterNotFound { name: String },

    /// The external emulator call itself failed.
    #[error("Emulator error: {message}")]
    Emulator { message: String },

    /// A static resource could not be read or parsed.
    #[error("Resource error: {message}")]
    Resource { message: String },

    /// Invalid or missing service configuration.
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ServiceError {
    /// A required column is absent from a result table.
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            table: table.into(),
            column: column.into(),
            details: "is missing".to_string(),
        }
    }

    pub fn schema_mismatch(
        table: impl Into<String>,
        column: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::SchemaMismatch {
            table: table.into(),
            column: column.into(),
            details: details.into(),
        }
    }

    pub fn unknown_scenario(table: impl Into<String>, tag: impl Into<String>) -> Self {
        Self::UnknownScenario {
            table: table.into(),
            tag: tag.into(),
        }
    }

    pub fn parameter_not_found(name: impl Into<String>) -> Self {
        Self::ParameterNotFound { name: name.into() }
    }

    pub fn emulator(message: impl Into<String>) -> Self {
        Self::Emulator {
            message: message.into(),
        }
    }

    pub fn resource(message: impl Into<String>) -> Self {
        Self::Resource {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the caller's input caused the failure.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Short machine-readable code for logs and API bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingResult => "MISSING_RESULT",
            Self::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            Self::UnknownScenario { .. } => "UNKNOWN_SCENARIO",
            Self::ParameterNotFound { .. } => "PARAMETER_NOT_FOUND",
            Self::Emulator { .. } => "EMULATOR_ERROR",
            Self::Resource { .. } => "RESOURCE_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
