//! Intervention request model.
//!
//! [`RawEmulatorRequest`] mirrors the JSON body posted by the client, with
//! percentages in `[0, 100]` and loosely typed switches. [`EmulatorRequest`]
//! is the validated form consumed by the scenario builder: every percentage
//! has been range-checked and divided by 100, and the seasonality and
//! routine-coverage switches are stored as `1.0`/`0.0`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationErrors;

/// Insecticide-treated net formulations available for future distribution.
///
/// The derived ordering follows declaration order and is the canonical
/// order in which net scenarios are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetType {
    /// Pyrethroid-only net
    PyOnly,
    /// Pyrethroid-pyrrole net
    PyPyrrole,
    /// Pyrethroid-pyriproxyfen net
    PyPpf,
    /// Pyrethroid-PBO net
    PyPbo,
}

impl NetType {
    pub const ALL: [NetType; 4] = [
        NetType::PyOnly,
        NetType::PyPyrrole,
        NetType::PyPpf,
        NetType::PyPbo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetType::PyOnly => "py_only",
            NetType::PyPyrrole => "py_pyrrole",
            NetType::PyPpf => "py_ppf",
            NetType::PyPbo => "py_pbo",
        }
    }
}

impl fmt::Display for NetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NetType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unrecognised net type '{}'", s))
    }
}

/// A boolean switch as sent by clients: either a JSON bool or `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Switch {
    Flag(bool),
    Number(f64),
}

/// Request body exactly as received, before validation.
///
/// Every field is optional here so that a missing field is reported
/// alongside every other problem instead of aborting at the first one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEmulatorRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_seasonal: Option<Switch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_malaria_prevalence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_for_biting_in_bed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference_for_biting: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pyrethroid_resistance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub py_only: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub py_pbo: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub py_pyrrole: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub py_ppf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irs_coverage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itn_future: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itn_future_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine_coverage: Option<Switch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irs_future: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lsm: Option<f64>,
}

impl RawEmulatorRequest {
    /// Decode a JSON body field by field.
    ///
    /// Returns whatever decoded together with one error for every field of
    /// the wrong shape. Only a body that is not a JSON object fails outright.
    pub fn decode(body: &[u8]) -> Result<(Self, ValidationErrors), ValidationErrors> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ValidationErrors::single("body", e.to_string()))?;
        let Value::Object(mut map) = value else {
            return Err(ValidationErrors::single("body", "expected a JSON object"));
        };

        let mut errors = ValidationErrors::new();
        let e = &mut errors;
        let raw = RawEmulatorRequest {
            is_seasonal: take_field(&mut map, "is_seasonal", e),
            current_malaria_prevalence: take_field(&mut map, "current_malaria_prevalence", e),
            preference_for_biting_in_bed: take_field(&mut map, "preference_for_biting_in_bed", e),
            preference_for_biting: take_field(&mut map, "preference_for_biting", e),
            pyrethroid_resistance: take_field(&mut map, "pyrethroid_resistance", e),
            py_only: take_field(&mut map, "py_only", e),
            py_pbo: take_field(&mut map, "py_pbo", e),
            py_pyrrole: take_field(&mut map, "py_pyrrole", e),
            py_ppf: take_field(&mut map, "py_ppf", e),
            irs_coverage: take_field(&mut map, "irs_coverage", e),
            itn_future: take_field(&mut map, "itn_future", e),
            itn_future_types: take_field(&mut map, "itn_future_types", e),
            routine_coverage: take_field(&mut map, "routine_coverage", e),
            irs_future: take_field(&mut map, "irs_future", e),
            lsm: take_field(&mut map, "lsm", e),
        };
        Ok((raw, errors))
    }

    /// Decode a JSON body, failing if any field has the wrong shape.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, ValidationErrors> {
        let (raw, errors) = Self::decode(body)?;
        if errors.is_empty() {
            Ok(raw)
        } else {
            Err(errors)
        }
    }
}

/// Remove `field` from the body and decode it on its own.
///
/// `null` and an absent key both yield `None`. A shape error is recorded
/// under the field name, with the nested path (e.g. `[1]`) in the message.
fn take_field<T: DeserializeOwned>(
    map: &mut Map<String, Value>,
    field: &str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    let value = map.remove(field)?;
    match serde_path_to_error::deserialize::<_, Option<T>>(value) {
        Ok(decoded) => decoded,
        Err(err) => {
            let path = err.path().to_string();
            let message = err.into_inner().to_string();
            if path == "." {
                errors.push(field, message);
            } else {
                errors.push(field, format!("{} at {}", message, path));
            }
            None
        }
    }
}

/// Validated intervention request. Percentages are stored as fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct EmulatorRequest {
    pub season: f64,
    pub prev: f64,
    pub phi: f64,
    pub q0: f64,
    pub res_use: f64,
    pub py_only: f64,
    pub py_pbo: f64,
    pub py_pyrrole: f64,
    pub py_ppf: f64,
    pub irs: f64,
    pub itn_future: f64,
    pub net_type_future: BTreeSet<NetType>,
    pub routine: f64,
    pub irs_future: f64,
    pub lsm: f64,
}

impl EmulatorRequest {
    /// Decode and validate a JSON request body in one step.
    ///
    /// Shape errors, missing fields and range errors are all reported
    /// together.
    pub fn from_json_slice(body: &[u8]) -> Result<Self, ValidationErrors> {
        let (raw, errors) = RawEmulatorRequest::decode(body)?;
        Self::validate(raw, errors)
    }

    /// Validate `raw`, adding to the failures already found while decoding.
    fn validate(
        raw: RawEmulatorRequest,
        mut errors: ValidationErrors,
    ) -> Result<Self, ValidationErrors> {
        let request = EmulatorRequest {
            season: switch(&mut errors, "is_seasonal", raw.is_seasonal),
            prev: percentage(
                &mut errors,
                "current_malaria_prevalence",
                raw.current_malaria_prevalence,
            ),
            phi: percentage(
                &mut errors,
                "preference_for_biting_in_bed",
                raw.preference_for_biting_in_bed,
            ),
            q0: percentage(&mut errors, "preference_for_biting", raw.preference_for_biting),
            res_use: percentage(&mut errors, "pyrethroid_resistance", raw.pyrethroid_resistance),
            py_only: percentage(&mut errors, "py_only", raw.py_only),
            py_pbo: percentage(&mut errors, "py_pbo", raw.py_pbo),
            py_pyrrole: percentage(&mut errors, "py_pyrrole", raw.py_pyrrole),
            py_ppf: percentage(&mut errors, "py_ppf", raw.py_ppf),
            irs: percentage(&mut errors, "irs_coverage", raw.irs_coverage),
            itn_future: percentage(&mut errors, "itn_future", raw.itn_future),
            net_type_future: net_types(&mut errors, "itn_future_types", raw.itn_future_types),
            routine: switch(&mut errors, "routine_coverage", raw.routine_coverage),
            irs_future: percentage(&mut errors, "irs_future", raw.irs_future),
            lsm: percentage(&mut errors, "lsm", raw.lsm),
        };

        if errors.is_empty() {
            Ok(request)
        } else {
            Err(errors)
        }
    }
}

impl TryFrom<RawEmulatorRequest> for EmulatorRequest {
    type Error = ValidationErrors;

    fn try_from(raw: RawEmulatorRequest) -> Result<Self, Self::Error> {
        Self::validate(raw, ValidationErrors::new())
    }
}

/// Report an absent field, unless decoding already rejected it.
fn required<T>(errors: &mut ValidationErrors, field: &str, value: Option<T>) -> Option<T> {
    if value.is_none() && !errors.has_field(field) {
        errors.push(field, "field required");
    }
    value
}

/// Range-check a percentage and convert it to a fraction.
///
/// The bounds apply to the input percentage, not the derived fraction.
fn percentage(errors: &mut ValidationErrors, field: &str, value: Option<f64>) -> f64 {
    let Some(v) = required(errors, field, value) else {
        return 0.0;
    };
    if !(0.0..=100.0).contains(&v) {
        errors.push(field, format!("must be between 0 and 100, got {}", v));
        return 0.0;
    }
    v / 100.0
}

fn switch(errors: &mut ValidationErrors, field: &str, value: Option<Switch>) -> f64 {
    match required(errors, field, value) {
        None => 0.0,
        Some(Switch::Flag(flag)) => {
            if flag {
                1.0
            } else {
                0.0
            }
        }
        Some(Switch::Number(n)) if n == 0.0 || n == 1.0 => n,
        Some(Switch::Number(n)) => {
            errors.push(field, format!("must be a boolean, got {}", n));
            0.0
        }
    }
}

fn net_types(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Vec<String>>,
) -> BTreeSet<NetType> {
    let Some(tags) = required(errors, field, value) else {
        return BTreeSet::new();
    };

    if tags.is_empty() {
        errors.push(field, "must contain at least one net type");
        return BTreeSet::new();
    }

    let mut parsed = BTreeSet::new();
    for tag in &tags {
        match tag.parse::<NetType>() {
            Ok(net_type) => {
                parsed.insert(net_type);
            }
            Err(message) => errors.push(field, message),
        }
    }
    parsed
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod request_tests;
