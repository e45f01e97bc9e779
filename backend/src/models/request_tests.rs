use super::*;
use serde_json::json;

fn valid_body() -> serde_json::Value {
    json!({
        "is_seasonal": true,
        "current_malaria_prevalence": 50,
        "preference_for_biting_in_bed": 75,
        "preference_for_biting": 80,
        "pyrethroid_resistance": 60,
        "py_only": 20,
        "py_pbo": 30,
        "py_pyrrole": 40,
        "py_ppf": 10,
        "irs_coverage": 25,
        "itn_future": 35,
        "itn_future_types": ["py_only", "py_pbo"],
        "routine_coverage": false,
        "irs_future": 15,
        "lsm": 5
    })
}

fn parse(body: &serde_json::Value) -> Result<EmulatorRequest, ValidationErrors> {
    EmulatorRequest::from_json_slice(body.to_string().as_bytes())
}

#[test]
fn test_net_type_wire_names() {
    assert_eq!(NetType::PyOnly.as_str(), "py_only");
    assert_eq!(NetType::PyPyrrole.as_str(), "py_pyrrole");
    assert_eq!(NetType::PyPpf.as_str(), "py_ppf");
    assert_eq!(NetType::PyPbo.as_str(), "py_pbo");
    assert_eq!(serde_json::to_value(NetType::PyPbo).unwrap(), json!("py_pbo"));
    assert_eq!("py_ppf".parse::<NetType>().unwrap(), NetType::PyPpf);
    assert!("py_unknown".parse::<NetType>().is_err());
}

#[test]
fn test_valid_request_converts_percentages() {
    let request = parse(&valid_body()).unwrap();

    assert_eq!(request.season, 1.0);
    assert_eq!(request.prev, 0.5);
    assert_eq!(request.phi, 0.75);
    assert_eq!(request.q0, 0.8);
    assert_eq!(request.res_use, 0.6);
    assert_eq!(request.py_only, 0.2);
    assert_eq!(request.irs, 0.25);
    assert_eq!(request.itn_future, 0.35);
    assert_eq!(request.irs_future, 0.15);
    assert_eq!(request.lsm, 0.05);
    assert_eq!(request.routine, 0.0);
    assert_eq!(
        request.net_type_future.iter().copied().collect::<Vec<_>>(),
        vec![NetType::PyOnly, NetType::PyPbo]
    );
}

#[test]
fn test_bounds_are_inclusive() {
    let mut body = valid_body();
    body["current_malaria_prevalence"] = json!(100);
    body["preference_for_biting_in_bed"] = json!(0);
    body["is_seasonal"] = json!(0);
    body["routine_coverage"] = json!(1);

    let request = parse(&body).unwrap();
    assert_eq!(request.prev, 1.0);
    assert_eq!(request.phi, 0.0);
    assert_eq!(request.season, 0.0);
    assert_eq!(request.routine, 1.0);
}

#[test]
fn test_out_of_range_percentage_rejected() {
    let mut body = valid_body();
    body["current_malaria_prevalence"] = json!(101);

    let errors = parse(&body).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.has_field("current_malaria_prevalence"));
}

#[test]
fn test_negative_percentage_rejected() {
    let mut body = valid_body();
    body["lsm"] = json!(-1);

    let errors = parse(&body).unwrap_err();
    assert!(errors.has_field("lsm"));
}

#[test]
fn test_every_failing_field_is_reported() {
    let mut body = valid_body();
    body["py_pbo"] = json!(150);
    body["irs_future"] = json!(-5);
    body.as_object_mut().unwrap().remove("itn_future");

    let errors = parse(&body).unwrap_err();
    assert_eq!(errors.len(), 3);
    assert!(errors.has_field("py_pbo"));
    assert!(errors.has_field("irs_future"));
    assert!(errors.has_field("itn_future"));
}

#[test]
fn test_empty_net_types_rejected() {
    let mut body = valid_body();
    body["itn_future_types"] = json!([]);

    let errors = parse(&body).unwrap_err();
    assert!(errors.has_field("itn_future_types"));
}

#[test]
fn test_unrecognised_net_type_rejected() {
    let mut body = valid_body();
    body["itn_future_types"] = json!(["py_only", "mosquito_repellent"]);

    let errors = parse(&body).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.errors()[0].message.contains("mosquito_repellent"));
}

#[test]
fn test_duplicate_net_types_collapse() {
    let mut body = valid_body();
    body["itn_future_types"] = json!(["py_pbo", "py_only", "py_pbo"]);

    let request = parse(&body).unwrap();
    assert_eq!(request.net_type_future.len(), 2);
    assert_eq!(request.net_type_future.iter().next(), Some(&NetType::PyOnly));
}

#[test]
fn test_non_boolean_switch_rejected() {
    let mut body = valid_body();
    body["is_seasonal"] = json!(0.5);

    let errors = parse(&body).unwrap_err();
    assert!(errors.has_field("is_seasonal"));
}

#[test]
fn test_wrong_json_type_reports_path() {
    let mut body = valid_body();
    body["pyrethroid_resistance"] = json!("sixty");

    let errors = parse(&body).unwrap_err();
    assert!(errors.has_field("pyrethroid_resistance"));
}

#[test]
fn test_malformed_body_is_validation_error() {
    let errors = EmulatorRequest::from_json_slice(b"{not json").unwrap_err();
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_shape_errors_reported_with_missing_fields() {
    let mut body = valid_body();
    body["current_malaria_prevalence"] = json!("x");
    body["lsm"] = json!("y");
    body.as_object_mut().unwrap().remove("irs_future");

    let errors = parse(&body).unwrap_err();

    assert_eq!(errors.len(), 3, "{errors}");
    assert!(errors.has_field("current_malaria_prevalence"));
    assert!(errors.has_field("lsm"));
    assert!(errors.has_field("irs_future"));
}

#[test]
fn test_shape_and_range_errors_reported_together() {
    let mut body = valid_body();
    body["is_seasonal"] = json!("yes");
    body["py_pbo"] = json!(150);

    let errors = parse(&body).unwrap_err();

    assert_eq!(errors.len(), 2, "{errors}");
    assert!(errors.has_field("is_seasonal"));
    assert!(errors.has_field("py_pbo"));
}

#[test]
fn test_nested_shape_error_names_position() {
    let mut body = valid_body();
    body["itn_future_types"] = json!(["py_only", 7]);

    let errors = parse(&body).unwrap_err();

    assert_eq!(errors.len(), 1, "{errors}");
    assert_eq!(errors.errors()[0].field, "itn_future_types");
    assert!(errors.errors()[0].message.ends_with("at [1]"), "{errors}");
}

#[test]
fn test_non_object_body_rejected() {
    let errors = EmulatorRequest::from_json_slice(b"[1, 2]").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors.has_field("body"));
}

#[test]
fn test_raw_decode_keeps_well_formed_fields() {
    let mut body = valid_body();
    body["lsm"] = json!(false);

    let (raw, errors) = RawEmulatorRequest::decode(body.to_string().as_bytes()).unwrap();

    assert!(errors.has_field("lsm"));
    assert_eq!(raw.lsm, None);
    assert_eq!(raw.irs_future, Some(15.0));
    assert!(RawEmulatorRequest::from_json_slice(body.to_string().as_bytes()).is_err());
}
