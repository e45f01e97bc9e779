//! Columnar batch encoding of a scenario list.

use crate::models::scenario::{BatchColumn, Scenario, ScenarioBatch, ScenarioField};

/// Encode `scenarios` into the emulator's batch shape.
///
/// One column per [`ScenarioField`], each holding one value per scenario in
/// scenario order. An empty list encodes to an empty batch.
pub fn encode_scenarios(scenarios: &[Scenario]) -> ScenarioBatch {
    if scenarios.is_empty() {
        return ScenarioBatch::default();
    }

    let columns = ScenarioField::ALL
        .iter()
        .map(|&field| BatchColumn {
            field,
            values: scenarios.iter().map(|s| s.value(field)).collect(),
        })
        .collect();

    ScenarioBatch::from_columns(columns, scenarios.len())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::request::NetType;
    use crate::models::scenario::BatchValue;
    use crate::services::scenarios::{build_base_scenario, build_scenarios};
    use crate::services::test_support::emulator_request;

    #[test]
    fn test_no_scenarios() {
        let batch = encode_scenarios(&[]);
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
        assert!(batch.columns().is_empty());
    }

    #[test]
    fn test_with_scenarios() {
        let request = emulator_request();
        let base = build_base_scenario(&request);
        let scenarios = vec![
            Scenario {
                scenario_tag: "test1".into(),
                ..base.clone()
            },
            Scenario {
                scenario_tag: "test2".into(),
                net_type_future: Some(NetType::PyOnly),
                ..base.clone()
            },
            Scenario {
                scenario_tag: "test3".into(),
                net_type_future: Some(NetType::PyPbo),
                ..base.clone()
            },
        ];

        let batch = encode_scenarios(&scenarios);

        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value["scenario_tag"], json!(["test1", "test2", "test3"]));
        assert_eq!(value["net_type_future"], json!([null, "py_only", "py_pbo"]));
        assert_eq!(value["Q0"], json!([0.82, 0.82, 0.82]));
        assert_eq!(value["lsm"], json!([0.0, 0.0, 0.0]));
        assert_eq!(value.as_object().unwrap().len(), ScenarioField::ALL.len());
    }

    #[test]
    fn test_columns_follow_field_order() {
        let scenarios = build_scenarios(&emulator_request());

        let batch = encode_scenarios(&scenarios);
        let names: Vec<&str> = batch.columns().iter().map(|c| c.field.name()).collect();

        let expected: Vec<&str> = ScenarioField::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, expected);
        assert_eq!(
            serde_json::to_string(&batch).unwrap().find("\"scenario_tag\""),
            Some(1)
        );
    }

    #[test]
    fn test_columns_align_with_scenarios() {
        let scenarios = build_scenarios(&emulator_request());

        let batch = encode_scenarios(&scenarios);

        assert_eq!(batch.len(), scenarios.len());
        for column in batch.columns() {
            assert_eq!(column.values.len(), scenarios.len());
        }
        for (i, scenario) in scenarios.iter().enumerate() {
            for field in ScenarioField::ALL {
                assert_eq!(batch.get(field, i), Some(&scenario.value(field)));
            }
        }
        assert_eq!(
            batch.get(ScenarioField::ScenarioTag, 0),
            Some(&BatchValue::Text("no_intervention".into()))
        );
        assert_eq!(batch.tags()[1], "irs_only");
    }
}
