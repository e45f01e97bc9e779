//! Scenario enumeration.
//!
//! Expands one validated request into the ordered list of scenarios sent to
//! the emulator:
//!
//! 1. `no_intervention` (always present, always first)
//! 2. `irs_only` when future IRS coverage is non-zero
//! 3. `lsm_only` when LSM coverage is non-zero
//! 4. for each selected net type, in [`NetType`] declaration order:
//!    `{net}_only`, then `{net}_with_lsm` when LSM coverage is non-zero
//!
//! Every derived scenario is a new value built from the baseline plus the
//! overrides of its intervention axis.

use log::debug;

use crate::models::request::{EmulatorRequest, NetType};
use crate::models::scenario::{
    net_only_tag, net_with_lsm_tag, Scenario, IRS_ONLY, LSM_ONLY, NO_INTERVENTION,
};

/// Build every scenario for `request`, baseline first.
pub fn build_scenarios(request: &EmulatorRequest) -> Vec<Scenario> {
    let base = build_base_scenario(request);
    let mut scenarios = vec![base.clone()];
    scenarios.extend(build_intervention_scenarios(request, &base));

    debug!(
        "Built {} scenarios: {:?}",
        scenarios.len(),
        scenarios.iter().map(|s| s.scenario_tag.as_str()).collect::<Vec<_>>()
    );

    scenarios
}

/// Baseline scenario: the request's biological and behavioural parameters
/// with every future intervention switched off.
pub fn build_base_scenario(request: &EmulatorRequest) -> Scenario {
    Scenario {
        scenario_tag: NO_INTERVENTION.to_string(),
        res_use: request.res_use,
        py_only: request.py_only,
        py_pbo: request.py_pbo,
        py_pyrrole: request.py_pyrrole,
        py_ppf: request.py_ppf,
        prev: request.prev,
        q0: request.q0,
        phi: request.phi,
        season: request.season,
        irs: request.irs,
        itn_future: 0.0,
        net_type_future: None,
        irs_future: 0.0,
        routine: 0.0,
        lsm: 0.0,
    }
}

/// IRS, LSM and net scenarios, in enumeration order.
pub fn build_intervention_scenarios(request: &EmulatorRequest, base: &Scenario) -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    if request.irs_future > 0.0 {
        scenarios.push(irs_only_scenario(request, base));
    }

    if request.lsm > 0.0 {
        scenarios.push(lsm_only_scenario(request, base));
    }

    scenarios.extend(build_net_scenarios(request, base));
    scenarios
}

/// One `{net}_only` scenario per selected net type, each followed by its
/// `{net}_with_lsm` variant when LSM coverage is non-zero.
pub fn build_net_scenarios(request: &EmulatorRequest, base: &Scenario) -> Vec<Scenario> {
    let mut scenarios = Vec::new();

    // BTreeSet iteration follows NetType's declaration order
    for &net_type in &request.net_type_future {
        let net_only = net_only_scenario(request, base, net_type);

        let with_lsm = if request.lsm > 0.0 {
            Some(net_with_lsm_scenario(request, &net_only, net_type))
        } else {
            None
        };

        scenarios.push(net_only);
        scenarios.extend(with_lsm);
    }

    scenarios
}

fn irs_only_scenario(request: &EmulatorRequest, base: &Scenario) -> Scenario {
    Scenario {
        scenario_tag: IRS_ONLY.to_string(),
        irs_future: request.irs_future,
        ..base.clone()
    }
}

fn lsm_only_scenario(request: &EmulatorRequest, base: &Scenario) -> Scenario {
    Scenario {
        scenario_tag: LSM_ONLY.to_string(),
        lsm: request.lsm,
        ..base.clone()
    }
}

fn net_only_scenario(request: &EmulatorRequest, base: &Scenario, net_type: NetType) -> Scenario {
    Scenario {
        scenario_tag: net_only_tag(net_type),
        net_type_future: Some(net_type),
        itn_future: request.itn_future,
        routine: request.routine,
        ..base.clone()
    }
}

fn net_with_lsm_scenario(
    request: &EmulatorRequest,
    net_only: &Scenario,
    net_type: NetType,
) -> Scenario {
    Scenario {
        scenario_tag: net_with_lsm_tag(net_type),
        lsm: request.lsm,
        ..net_only.clone()
    }
}
