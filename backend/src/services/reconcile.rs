//! Reconciliation of the emulator's flat tables into per-scenario series.
//!
//! Time indices are derived from row position within each scenario group,
//! in the order the emulator returned the rows. The emulator reports
//! prevalence fortnightly and cases yearly and returns each group in
//! chronological order; rows are never re-sorted here.

use std::collections::{HashMap, HashSet};

use log::{error, warn};
use serde_json::Value;

use crate::error::{ServiceError, ServiceResult};
use crate::models::results::{Cases, EmulatorOutput, EmulatorResponse, Prevalence, ResultTable};

/// Days between two prevalence rows of the same scenario.
pub const FORTNIGHT_DAYS: u32 = 14;

pub const PREVALENCE_TABLE: &str = "prevalence";
pub const CASES_TABLE: &str = "cases";

/// Column names of the emulator's result tables.
pub mod columns {
    pub const SCENARIO: &str = "scenario";
    /// Duplicate of `scenario`, used only for emulator-side bookkeeping
    pub const SCENARIO_TAG: &str = "scenario_tag";
    /// Per-row copy of the batch validity flag
    pub const EIR_VALID: &str = "eir_valid";
    pub const PREVALENCE: &str = "prevalence";
    pub const CASES_PER_1000: &str = "cases_per_1000";
}

/// Reconcile a complete emulator output.
pub fn post_process_results(output: EmulatorOutput) -> ServiceResult<EmulatorResponse> {
    reconcile(
        output.prevalence.as_ref(),
        output.cases.as_ref(),
        output.eir_valid,
    )
}

/// Build the response from the prevalence and cases tables.
///
/// The validity flag is the emulator's batch-level result and is passed
/// through unchanged.
pub fn reconcile(
    prevalence: Option<&ResultTable>,
    cases: Option<&ResultTable>,
    eir_valid: bool,
) -> ServiceResult<EmulatorResponse> {
    let (Some(prevalence), Some(cases)) = (prevalence, cases) else {
        error!("Emulator returned no prevalence or cases table");
        return Err(ServiceError::MissingResult);
    };

    Ok(EmulatorResponse {
        prevalence: process_prevalence(prevalence)?,
        cases: process_cases(cases)?,
        eir_valid,
    })
}

/// Prevalence rows with `days = ordinal within scenario * 14`.
pub fn process_prevalence(table: &ResultTable) -> ServiceResult<Vec<Prevalence>> {
    // Bookkeeping columns are dropped, but their absence still signals
    // a table layout this service does not know.
    require_columns(
        table,
        PREVALENCE_TABLE,
        &[columns::SCENARIO_TAG, columns::EIR_VALID],
    )?;

    let scenarios = text_column(table, PREVALENCE_TABLE, columns::SCENARIO)?;
    let values = number_column(table, PREVALENCE_TABLE, columns::PREVALENCE)?;
    check_length(PREVALENCE_TABLE, columns::PREVALENCE, values.len(), scenarios.len())?;
    warn_if_interleaved(PREVALENCE_TABLE, &scenarios);

    let rows = scenarios
        .iter()
        .zip(group_ordinals(&scenarios))
        .zip(values)
        .map(|((scenario, ordinal), prevalence)| Prevalence {
            scenario: scenario.to_string(),
            days: ordinal * FORTNIGHT_DAYS,
            prevalence,
        })
        .collect();

    Ok(rows)
}

/// Cases rows with the incidence column renamed and `year = ordinal + 1`.
pub fn process_cases(table: &ResultTable) -> ServiceResult<Vec<Cases>> {
    let scenarios = text_column(table, CASES_TABLE, columns::SCENARIO)?;
    let values = number_column(table, CASES_TABLE, columns::CASES_PER_1000)?;
    check_length(CASES_TABLE, columns::CASES_PER_1000, values.len(), scenarios.len())?;
    warn_if_interleaved(CASES_TABLE, &scenarios);

    let rows = scenarios
        .iter()
        .zip(group_ordinals(&scenarios))
        .zip(values)
        .map(|((scenario, ordinal), cases_per_1000)| Cases {
            scenario: scenario.to_string(),
            year: ordinal + 1,
            cases_per_1000,
        })
        .collect();

    Ok(rows)
}

/// 0-based position of each row within its scenario group.
pub fn group_ordinals(scenarios: &[&str]) -> Vec<u32> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    scenarios
        .iter()
        .map(|scenario| {
            let count = counts.entry(*scenario).or_insert(0);
            let ordinal = *count;
            *count += 1;
            ordinal
        })
        .collect()
}

/// True when a scenario's rows are split by rows of another scenario.
pub fn is_interleaved(scenarios: &[&str]) -> bool {
    let mut finished: HashSet<&str> = HashSet::new();
    let mut current: Option<&str> = None;

    for &scenario in scenarios {
        if current == Some(scenario) {
            continue;
        }
        if finished.contains(scenario) {
            return true;
        }
        if let Some(previous) = current {
            finished.insert(previous);
        }
        current = Some(scenario);
    }

    false
}

fn warn_if_interleaved(table: &str, scenarios: &[&str]) {
    // Ordinals are still per scenario; interleaving only hints at a changed
    // emulator output layout.
    if is_interleaved(scenarios) {
        warn!(
            "Rows of the {} table are interleaved across scenarios; time indices assume emulator row order is chronological",
            table
        );
    }
}

fn require_columns(table: &ResultTable, table_name: &str, names: &[&str]) -> ServiceResult<()> {
    match names.iter().find(|name| !table.has_column(name)) {
        Some(missing) => Err(ServiceError::missing_column(table_name, *missing)),
        None => Ok(()),
    }
}

fn column<'a>(table: &'a ResultTable, table_name: &str, name: &str) -> ServiceResult<&'a [Value]> {
    table
        .column(name)
        .ok_or_else(|| ServiceError::missing_column(table_name, name))
}

fn text_column<'a>(
    table: &'a ResultTable,
    table_name: &str,
    name: &str,
) -> ServiceResult<Vec<&'a str>> {
    column(table, table_name, name)?
        .iter()
        .enumerate()
        .map(|(row, value)| {
            value.as_str().ok_or_else(|| {
                ServiceError::schema_mismatch(
                    table_name,
                    name,
                    format!("has non-text value {} at row {}", value, row),
                )
            })
        })
        .collect()
}

fn number_column(table: &ResultTable, table_name: &str, name: &str) -> ServiceResult<Vec<f64>> {
    column(table, table_name, name)?
        .iter()
        .enumerate()
        .map(|(row, value)| {
            value.as_f64().ok_or_else(|| {
                ServiceError::schema_mismatch(
                    table_name,
                    name,
                    format!("has non-numeric value {} at row {}", value, row),
                )
            })
        })
        .collect()
}

fn check_length(table_name: &str, name: &str, actual: usize, expected: usize) -> ServiceResult<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(ServiceError::schema_mismatch(
            table_name,
            name,
            format!("has {} rows, expected {}", actual, expected),
        ))
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod reconcile_tests;
