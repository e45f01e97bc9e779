//! End-to-end emulator run: build scenarios, encode, call the emulator,
//! reconcile the results.

use std::collections::HashSet;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::emulator::Emulator;
use crate::error::{ServiceError, ServiceResult};
use crate::models::request::EmulatorRequest;
use crate::models::results::EmulatorResponse;

use super::batch::encode_scenarios;
use super::reconcile::{post_process_results, CASES_TABLE, PREVALENCE_TABLE};
use super::scenarios::build_scenarios;

/// Run one validated request through the emulator.
///
/// Every scenario in the reconciled output must have been submitted. A
/// submitted scenario with no rows is logged and tolerated.
pub async fn run_emulator_model(
    emulator: &dyn Emulator,
    request: &EmulatorRequest,
) -> ServiceResult<EmulatorResponse> {
    let run_id = Uuid::new_v4();
    let scenarios = build_scenarios(request);
    let batch = encode_scenarios(&scenarios);

    info!(
        "Emulator run {} started with {} scenarios",
        run_id,
        batch.len()
    );

    let output = emulator.run(&batch).await?;
    let response = post_process_results(output)?;

    let submitted: HashSet<&str> = batch.tags().into_iter().collect();
    check_scenarios(
        PREVALENCE_TABLE,
        response.prevalence.iter().map(|p| p.scenario.as_str()),
        &submitted,
    )?;
    check_scenarios(
        CASES_TABLE,
        response.cases.iter().map(|c| c.scenario.as_str()),
        &submitted,
    )?;

    info!(
        "Emulator run {} finished: {} prevalence rows, {} cases rows, eir_valid={}",
        run_id,
        response.prevalence.len(),
        response.cases.len(),
        response.eir_valid
    );

    Ok(response)
}

fn check_scenarios<'a>(
    table: &str,
    returned: impl Iterator<Item = &'a str>,
    submitted: &HashSet<&str>,
) -> ServiceResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for tag in returned {
        if !submitted.contains(tag) {
            return Err(ServiceError::unknown_scenario(table, tag));
        }
        seen.insert(tag);
    }

    let mut missing: Vec<&str> = submitted.difference(&seen).copied().collect();
    if !missing.is_empty() {
        missing.sort_unstable();
        warn!(
            "Emulator returned no {} rows for scenarios: {}",
            table,
            missing.join(", ")
        );
    } else {
        debug!("All submitted scenarios present in {} table", table);
    }

    Ok(())
}
