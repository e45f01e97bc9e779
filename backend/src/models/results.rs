//! Emulator output tables and the reconciled response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Flat table returned by the emulator.
///
/// Stored column-wise. Accepts either a column mapping
/// (`{"scenario": [...], "prevalence": [...]}`) or a list of row records
/// (`[{"scenario": "...", "prevalence": 0.1}, ...]`) on input; cells missing
/// from a row record become `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "TableRepr")]
pub struct ResultTable {
    columns: BTreeMap<String, Vec<Value>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableRepr {
    Columns(BTreeMap<String, Vec<Value>>),
    Rows(Vec<Map<String, Value>>),
}

impl From<TableRepr> for ResultTable {
    fn from(repr: TableRepr) -> Self {
        match repr {
            TableRepr::Columns(columns) => Self { columns },
            TableRepr::Rows(rows) => Self::from_rows(rows),
        }
    }
}

impl Serialize for ResultTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.columns.serialize(serializer)
    }
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insertion, replacing any column of the same name.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Value>) -> Self {
        self.columns.insert(name.into(), values);
        self
    }

    /// Convert row records into columns.
    pub fn from_rows(rows: Vec<Map<String, Value>>) -> Self {
        let mut names: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !names.contains(key) {
                    names.push(key.clone());
                }
            }
        }

        let columns = names
            .into_iter()
            .map(|name| {
                let values = rows
                    .iter()
                    .map(|row| row.get(&name).cloned().unwrap_or(Value::Null))
                    .collect();
                (name, values)
            })
            .collect();

        Self { columns }
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Length of the longest column.
    pub fn row_count(&self) -> usize {
        self.columns.values().map(Vec::len).max().unwrap_or(0)
    }
}

/// Raw result of one batch emulator call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmulatorOutput {
    #[serde(default)]
    pub prevalence: Option<ResultTable>,
    #[serde(default)]
    pub cases: Option<ResultTable>,
    /// Whether the exposure-rate input was within the emulator's valid range.
    /// Required on the wire.
    pub eir_valid: bool,
}

/// Prevalence at one fortnightly time step of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prevalence {
    pub scenario: String,
    pub days: u32,
    pub prevalence: f64,
}

/// Clinical incidence for one year of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cases {
    pub scenario: String,
    pub year: u32,
    #[serde(rename = "casesPer1000")]
    pub cases_per_1000: f64,
}

/// Reconciled per-scenario series returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmulatorResponse {
    pub prevalence: Vec<Prevalence>,
    pub cases: Vec<Cases>,
    #[serde(rename = "eirValid")]
    pub eir_valid: bool,
}
