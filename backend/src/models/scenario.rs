//! Scenario records and their columnar batch encoding.
//!
//! A [`Scenario`] is one fully specified simulation unit. The set of fields
//! sent to the emulator is fixed by [`ScenarioField::ALL`]; both the scenario
//! accessor and the batch encoder go through that list, so a batch always
//! has one column per field and one value per scenario.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::request::NetType;

/// Tag of the baseline scenario. Always first in a scenario list.
pub const NO_INTERVENTION: &str = "no_intervention";
/// Tag of the IRS-only scenario.
pub const IRS_ONLY: &str = "irs_only";
/// Tag of the LSM-only scenario.
pub const LSM_ONLY: &str = "lsm_only";

/// Tag of the scenario distributing `net_type` nets.
pub fn net_only_tag(net_type: NetType) -> String {
    format!("{}_only", net_type.as_str())
}

/// Tag of the scenario distributing `net_type` nets combined with LSM.
pub fn net_with_lsm_tag(net_type: NetType) -> String {
    format!("{}_with_lsm", net_type.as_str())
}

/// One simulation unit submitted to the emulator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    pub scenario_tag: String,
    pub res_use: f64,
    pub py_only: f64,
    pub py_pbo: f64,
    pub py_pyrrole: f64,
    pub py_ppf: f64,
    pub prev: f64,
    #[serde(rename = "Q0")]
    pub q0: f64,
    pub phi: f64,
    pub season: f64,
    pub irs: f64,
    pub itn_future: f64,
    pub net_type_future: Option<NetType>,
    pub irs_future: f64,
    pub routine: f64,
    pub lsm: f64,
}

impl Scenario {
    /// Value of `field` in batch form.
    pub fn value(&self, field: ScenarioField) -> BatchValue {
        match field {
            ScenarioField::ScenarioTag => BatchValue::Text(self.scenario_tag.clone()),
            ScenarioField::ResUse => BatchValue::Number(self.res_use),
            ScenarioField::PyOnly => BatchValue::Number(self.py_only),
            ScenarioField::PyPbo => BatchValue::Number(self.py_pbo),
            ScenarioField::PyPyrrole => BatchValue::Number(self.py_pyrrole),
            ScenarioField::PyPpf => BatchValue::Number(self.py_ppf),
            ScenarioField::Prev => BatchValue::Number(self.prev),
            ScenarioField::Q0 => BatchValue::Number(self.q0),
            ScenarioField::Phi => BatchValue::Number(self.phi),
            ScenarioField::Season => BatchValue::Number(self.season),
            ScenarioField::Irs => BatchValue::Number(self.irs),
            ScenarioField::ItnFuture => BatchValue::Number(self.itn_future),
            ScenarioField::NetTypeFuture => match self.net_type_future {
                Some(net_type) => BatchValue::Text(net_type.as_str().to_string()),
                None => BatchValue::Null,
            },
            ScenarioField::IrsFuture => BatchValue::Number(self.irs_future),
            ScenarioField::Routine => BatchValue::Number(self.routine),
            ScenarioField::Lsm => BatchValue::Number(self.lsm),
        }
    }
}

/// Emulator input fields, in the order they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioField {
    ScenarioTag,
    ResUse,
    PyOnly,
    PyPbo,
    PyPyrrole,
    PyPpf,
    Prev,
    Q0,
    Phi,
    Season,
    Irs,
    ItnFuture,
    NetTypeFuture,
    IrsFuture,
    Routine,
    Lsm,
}

impl ScenarioField {
    pub const ALL: [ScenarioField; 16] = [
        ScenarioField::ScenarioTag,
        ScenarioField::ResUse,
        ScenarioField::PyOnly,
        ScenarioField::PyPbo,
        ScenarioField::PyPyrrole,
        ScenarioField::PyPpf,
        ScenarioField::Prev,
        ScenarioField::Q0,
        ScenarioField::Phi,
        ScenarioField::Season,
        ScenarioField::Irs,
        ScenarioField::ItnFuture,
        ScenarioField::NetTypeFuture,
        ScenarioField::IrsFuture,
        ScenarioField::Routine,
        ScenarioField::Lsm,
    ];

    /// Argument name the emulator expects for this field.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioField::ScenarioTag => "scenario_tag",
            ScenarioField::ResUse => "res_use",
            ScenarioField::PyOnly => "py_only",
            ScenarioField::PyPbo => "py_pbo",
            ScenarioField::PyPyrrole => "py_pyrrole",
            ScenarioField::PyPpf => "py_ppf",
            ScenarioField::Prev => "prev",
            ScenarioField::Q0 => "Q0",
            ScenarioField::Phi => "phi",
            ScenarioField::Season => "season",
            ScenarioField::Irs => "irs",
            ScenarioField::ItnFuture => "itn_future",
            ScenarioField::NetTypeFuture => "net_type_future",
            ScenarioField::IrsFuture => "irs_future",
            ScenarioField::Routine => "routine",
            ScenarioField::Lsm => "lsm",
        }
    }
}

/// A single cell of a batch column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchValue {
    Number(f64),
    Text(String),
    Null,
}

/// One column of a [`ScenarioBatch`].
#[derive(Debug, Clone, PartialEq)]
pub struct BatchColumn {
    pub field: ScenarioField,
    pub values: Vec<BatchValue>,
}

/// Columnar encoding of a scenario list: field name to per-scenario values.
///
/// Serializes as a JSON object whose keys follow [`ScenarioField::ALL`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioBatch {
    columns: Vec<BatchColumn>,
    len: usize,
}

impl ScenarioBatch {
    pub(crate) fn from_columns(columns: Vec<BatchColumn>, len: usize) -> Self {
        Self { columns, len }
    }

    /// Number of scenarios in the batch.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[BatchColumn] {
        &self.columns
    }

    pub fn column(&self, field: ScenarioField) -> Option<&[BatchValue]> {
        self.columns
            .iter()
            .find(|c| c.field == field)
            .map(|c| c.values.as_slice())
    }

    /// Value of `field` for the scenario at `index`.
    pub fn get(&self, field: ScenarioField, index: usize) -> Option<&BatchValue> {
        self.column(field).and_then(|values| values.get(index))
    }

    /// Scenario tags in batch order.
    pub fn tags(&self) -> Vec<&str> {
        self.column(ScenarioField::ScenarioTag)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| match v {
                        BatchValue::Text(tag) => Some(tag.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Serialize for ScenarioBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for column in &self.columns {
            map.serialize_entry(column.field.name(), &column.values)?;
        }
        map.end()
    }
}
