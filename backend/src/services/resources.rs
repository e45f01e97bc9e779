//! Static resource loading.
//!
//! The dynamic form options asset is served verbatim to clients and also
//! parsed into the [`FormOptions`] tree used for compare-parameter lookups.

use std::fs;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::error::{ServiceError, ServiceResult};
use crate::models::parameters::FormOptions;

/// Default location of the dynamic form options asset.
pub const DEFAULT_FORM_OPTIONS_PATH: &str = "resources/dynamicFormOptions.json";

/// The form options asset in both raw and parsed form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormOptionsDocument {
    /// Document as stored on disk
    pub raw: Value,
    /// Field tree used for parameter lookups
    pub options: FormOptions,
}

/// Read and parse the dynamic form options from `path`.
pub fn get_dynamic_form_options<P: AsRef<Path>>(path: P) -> ServiceResult<FormOptionsDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        ServiceError::resource(format!(
            "Failed to read form options {}: {}",
            path.display(),
            e
        ))
    })?;

    let document = parse_dynamic_form_options(&content)?;
    debug!(
        "Loaded form options from {} ({} fields)",
        path.display(),
        document.options.fields().count()
    );
    Ok(document)
}

/// Parse the dynamic form options from a JSON string.
pub fn parse_dynamic_form_options(content: &str) -> ServiceResult<FormOptionsDocument> {
    let raw: Value = serde_json::from_str(content)
        .map_err(|e| ServiceError::resource(format!("Invalid form options JSON: {}", e)))?;

    if !raw.is_object() {
        return Err(ServiceError::resource(
            "Form options must be a JSON object",
        ));
    }

    let options: FormOptions = serde_path_to_error::deserialize(raw.clone()).map_err(|e| {
        ServiceError::resource(format!(
            "Invalid form options at {}: {}",
            e.path(),
            e.inner()
        ))
    })?;

    Ok(FormOptionsDocument { raw, options })
}
