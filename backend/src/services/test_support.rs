//! Shared fixtures for service unit tests.

use std::collections::BTreeSet;

use crate::models::request::{EmulatorRequest, NetType};

/// Request with IRS, LSM and two net types switched on.
pub(crate) fn emulator_request() -> EmulatorRequest {
    EmulatorRequest {
        season: 1.0,
        prev: 0.5,
        phi: 0.79,
        q0: 0.82,
        res_use: 0.3,
        py_only: 0.05,
        py_pbo: 0.1,
        py_pyrrole: 0.05,
        py_ppf: 0.05,
        irs: 0.1,
        itn_future: 0.4,
        net_type_future: BTreeSet::from([NetType::PyOnly, NetType::PyPbo]),
        routine: 1.0,
        irs_future: 0.15,
        lsm: 0.15,
    }
}
