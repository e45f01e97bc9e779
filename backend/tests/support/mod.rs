#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use mint_server::emulator::Emulator;
use mint_server::models::results::{EmulatorOutput, ResultTable};
use mint_server::models::scenario::ScenarioBatch;
use mint_server::services::resources::{get_dynamic_form_options, FormOptionsDocument};
use mint_server::ServiceResult;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment across tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Request body with IRS, LSM and two net types switched on.
pub fn request_json() -> Value {
    json!({
        "is_seasonal": true,
        "current_malaria_prevalence": 50,
        "preference_for_biting_in_bed": 79,
        "preference_for_biting": 82,
        "pyrethroid_resistance": 30,
        "py_only": 5,
        "py_pbo": 10,
        "py_pyrrole": 5,
        "py_ppf": 5,
        "irs_coverage": 10,
        "itn_future": 40,
        "itn_future_types": ["py_only", "py_pbo"],
        "routine_coverage": true,
        "irs_future": 15,
        "lsm": 15
    })
}

/// Path of the form options asset shipped with the crate.
pub fn form_options_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources/dynamicFormOptions.json")
}

pub fn form_options() -> FormOptionsDocument {
    get_dynamic_form_options(form_options_path()).unwrap()
}

/// How [`ScriptedEmulator`] answers a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Two fortnights of prevalence and three years of cases per scenario
    Answer,
    /// No tables at all
    Empty,
    /// Prevalence table without the `prevalence` column
    DropPrevalenceColumn,
    /// An extra scenario that was never submitted
    ExtraScenario,
}

/// In-process emulator that answers every batch according to a [`Script`]
/// and records the batches it received.
pub struct ScriptedEmulator {
    script: Script,
    eir_valid: bool,
    batches: Mutex<Vec<Value>>,
}

impl ScriptedEmulator {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            eir_valid: true,
            batches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_eir_valid(mut self, eir_valid: bool) -> Self {
        self.eir_valid = eir_valid;
        self
    }

    /// Batches received so far, as the JSON sent on the wire.
    pub fn batches(&self) -> Vec<Value> {
        self.batches.lock().unwrap().clone()
    }
}

pub const PREVALENCE_STEPS: usize = 2;
pub const CASES_YEARS: usize = 3;

#[async_trait]
impl Emulator for ScriptedEmulator {
    async fn run(&self, batch: &ScenarioBatch) -> ServiceResult<EmulatorOutput> {
        self.batches
            .lock()
            .unwrap()
            .push(serde_json::to_value(batch).unwrap());

        if self.script == Script::Empty {
            return Ok(EmulatorOutput::default());
        }

        let mut tags: Vec<String> = batch.tags().into_iter().map(String::from).collect();
        if self.script == Script::ExtraScenario {
            tags.push("unexpected".to_string());
        }

        let mut prevalence_rows = Vec::new();
        for (i, tag) in tags.iter().enumerate() {
            for step in 0..PREVALENCE_STEPS {
                let mut row = serde_json::Map::new();
                row.insert("scenario".into(), json!(tag));
                row.insert("scenario_tag".into(), json!(tag));
                row.insert("eir_valid".into(), json!(self.eir_valid));
                if self.script != Script::DropPrevalenceColumn {
                    row.insert("prevalence".into(), json!(0.5 - 0.01 * (i + step) as f64));
                }
                prevalence_rows.push(row);
            }
        }

        let mut scenario_col = Vec::new();
        let mut cases_col = Vec::new();
        for tag in &tags {
            for year in 0..CASES_YEARS {
                scenario_col.push(json!(tag));
                cases_col.push(json!(100.0 + year as f64));
            }
        }
        let cases = ResultTable::new()
            .with_column("scenario", scenario_col)
            .with_column("cases_per_1000", cases_col);

        Ok(EmulatorOutput {
            prevalence: Some(ResultTable::from_rows(prevalence_rows)),
            cases: Some(cases),
            eir_valid: self.eir_valid,
        })
    }

    fn version(&self) -> String {
        "0.0.0-test".to_string()
    }
}
