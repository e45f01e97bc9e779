//! Public API surface for the MINT backend.
//!
//! This file consolidates the request and response types exchanged with
//! clients. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::error::{FieldError, ValidationErrors};
pub use crate::models::parameters::CompareParameter;
pub use crate::models::parameters::CompareParametersResponse;
pub use crate::models::parameters::FormField;
pub use crate::models::parameters::FormOptions;
pub use crate::models::parameters::InterventionCompareCost;
pub use crate::models::parameters::InterventionCompareParameter;
pub use crate::models::request::EmulatorRequest;
pub use crate::models::request::NetType;
pub use crate::models::request::RawEmulatorRequest;
pub use crate::models::results::Cases;
pub use crate::models::results::EmulatorResponse;
pub use crate::models::results::Prevalence;

use serde::{Deserialize, Serialize};

/// Envelope wrapping every successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub data: T,
}

impl<T> Response<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Server and emulator versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub server: String,
    pub minte: String,
}

impl Version {
    /// Version of this crate paired with the given emulator version.
    pub fn current(minte: impl Into<String>) -> Self {
        Self {
            server: env!("CARGO_PKG_VERSION").to_string(),
            minte: minte.into(),
        }
    }
}
