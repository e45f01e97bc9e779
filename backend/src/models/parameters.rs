//! Form-option tree and compare-parameter DTOs.

use serde::{Deserialize, Serialize};

/// Lower bound reported for a field that declares no `min`.
pub const DEFAULT_MIN: f64 = 0.0;
/// Upper bound reported for a field that declares no `max`.
pub const DEFAULT_MAX: f64 = 100.0;

/// Parsed `groups[].subGroups[].fields[]` tree of the dynamic form options.
///
/// Only the keys the resolver needs are kept; everything else in the asset
/// is served verbatim from the raw JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormOptions {
    #[serde(default)]
    pub groups: Vec<FormGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormGroup {
    #[serde(default, rename = "subGroups")]
    pub sub_groups: Vec<FormSubGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSubGroup {
    #[serde(default)]
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FormField {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            min: None,
            max: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// `(min, max)` with the defaults applied.
    pub fn bounds(&self) -> (f64, f64) {
        (
            self.min.unwrap_or(DEFAULT_MIN),
            self.max.unwrap_or(DEFAULT_MAX),
        )
    }
}

impl FormOptions {
    /// Single-group, single-subgroup tree holding `fields`.
    pub fn from_fields(fields: Vec<FormField>) -> Self {
        Self {
            groups: vec![FormGroup {
                sub_groups: vec![FormSubGroup { fields }],
            }],
        }
    }

    /// All fields in depth-first order.
    pub fn fields(&self) -> impl Iterator<Item = &FormField> {
        self.groups
            .iter()
            .flat_map(|g| g.sub_groups.iter())
            .flat_map(|s| s.fields.iter())
    }
}

/// A parameter the compare view lets users vary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareParameter {
    pub parameter_name: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
}

/// A cost input linked to an intervention parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionCompareCost {
    pub cost_name: String,
    pub cost_label: String,
}

/// An intervention parameter together with its linked cost inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionCompareParameter {
    #[serde(flatten)]
    pub parameter: CompareParameter,
    pub linked_costs: Vec<InterventionCompareCost>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareParametersResponse {
    pub baseline_parameters: Vec<CompareParameter>,
    pub intervention_parameters: Vec<InterventionCompareParameter>,
}
