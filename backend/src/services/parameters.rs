//! Compare-parameter metadata resolved from the dynamic form options.
//!
//! Each lookup walks the form-option tree afresh; nothing is cached between
//! calls.

use crate::error::{ServiceError, ServiceResult};
use crate::models::parameters::{
    CompareParameter, CompareParametersResponse, FormField, FormOptions,
    InterventionCompareCost, InterventionCompareParameter,
};

/// A baseline parameter offered for comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec<'a> {
    pub name: &'a str,
    pub label: &'a str,
}

/// An intervention parameter and the ids of its linked cost fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterventionParameterSpec<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub linked_costs: &'a [&'a str],
}

pub const BASELINE_PARAMETERS: &[ParameterSpec<'static>] = &[ParameterSpec {
    name: "current_malaria_prevalence",
    label: "Baseline prevalence",
}];

pub const INTERVENTION_PARAMETERS: &[InterventionParameterSpec<'static>] = &[
    InterventionParameterSpec {
        name: "itn_future",
        label: "ITN usage",
        linked_costs: &[
            "people_per_bednet",
            "mass_distribution_cost",
            "continuous_itn_distribution_cost",
        ],
    },
    InterventionParameterSpec {
        name: "irs_future",
        label: "IRS coverage",
        linked_costs: &[
            "irs_household_annual_cost_product",
            "irs_household_annual_cost_deployment",
        ],
    },
    InterventionParameterSpec {
        name: "lsm",
        label: "LSM coverage",
        linked_costs: &["lsm_cost"],
    },
];

/// First field, depth-first, whose id is `name`.
pub fn get_form_field<'o>(name: &str, options: &'o FormOptions) -> ServiceResult<&'o FormField> {
    options
        .fields()
        .find(|field| field.id == name)
        .ok_or_else(|| ServiceError::parameter_not_found(name))
}

/// Label and bounds of a baseline parameter. Bounds default to `0..100`.
pub fn create_compare_parameter(
    spec: &ParameterSpec<'_>,
    options: &FormOptions,
) -> ServiceResult<CompareParameter> {
    let field = get_form_field(spec.name, options)?;
    let (min, max) = field.bounds();

    Ok(CompareParameter {
        parameter_name: spec.name.to_string(),
        label: spec.label.to_string(),
        min,
        max,
    })
}

/// Intervention parameter plus its linked costs, in the requested order.
///
/// A linked cost id missing from the tree fails the whole resolution.
pub fn create_intervention_compare_parameter(
    spec: &InterventionParameterSpec<'_>,
    options: &FormOptions,
) -> ServiceResult<InterventionCompareParameter> {
    let parameter = create_compare_parameter(
        &ParameterSpec {
            name: spec.name,
            label: spec.label,
        },
        options,
    )?;

    let linked_costs = spec
        .linked_costs
        .iter()
        .map(|&cost_name| -> ServiceResult<InterventionCompareCost> {
            let field = get_form_field(cost_name, options)?;
            Ok(InterventionCompareCost {
                cost_name: cost_name.to_string(),
                cost_label: field.label.clone().unwrap_or_default(),
            })
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(InterventionCompareParameter {
        parameter,
        linked_costs,
    })
}

/// Resolve the full compare-parameter catalogue against `options`.
pub fn get_compare_parameters(options: &FormOptions) -> ServiceResult<CompareParametersResponse> {
    let baseline_parameters = BASELINE_PARAMETERS
        .iter()
        .map(|spec| create_compare_parameter(spec, options))
        .collect::<ServiceResult<Vec<_>>>()?;

    let intervention_parameters = INTERVENTION_PARAMETERS
        .iter()
        .map(|spec| create_intervention_compare_parameter(spec, options))
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(CompareParametersResponse {
        baseline_parameters,
        intervention_parameters,
    })
}
