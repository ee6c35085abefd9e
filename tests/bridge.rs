//! The JSON command interface end to end.

use approx::assert_abs_diff_eq;
use serde_json::Value;
use u_spc::bridge::run;
use u_spc::BridgeError;

fn run_value(kind: &str, input: &str) -> Value {
    serde_json::to_value(run(kind, input).unwrap()).unwrap()
}

#[test]
fn forecast_request_round_trip() {
    let out = run_value("forecast", r#"{"values": [1, 2, 3, 4, 5], "periods": 3}"#);
    assert_eq!(out["analysis_type"], "forecast");
    assert_eq!(out["input_size"], 5);
    assert_eq!(out["result"]["trend"], "increasing");
    let forecasts = out["result"]["forecasts"].as_array().unwrap();
    assert_eq!(forecasts.len(), 3);
    assert_abs_diff_eq!(forecasts[2]["forecast"].as_f64().unwrap(), 8.0, epsilon = 1e-3);
}

#[test]
fn loosely_typed_values_are_coerced() {
    let out = run_value(
        "spc",
        r#"{"values": [" 9 ", {"value": 11, "date": "2024-05-01"}, 9, "11", true]}"#,
    );
    assert_eq!(out["input_size"], 5);
    assert_eq!(out["result"]["n"], 4);
    assert_eq!(out["result"]["mean"], 10.0);
}

#[test]
fn capability_with_limits() {
    let out = run_value(
        "capability",
        r#"{"values": [9, 11, 9, 11], "spec_limits": {"min_value": 7, "max_value": 13}}"#,
    );
    assert_eq!(out["result"]["status"], "computed");
    assert_eq!(out["result"]["cp"], 1.0);
    assert_eq!(out["result"]["cpk"], 1.0);
}

#[test]
fn degenerate_data_keeps_envelope() {
    let out = run_value("capability", r#"{"values": [], "spec_limits": {"lsl": 0, "usl": 1}}"#);
    assert_eq!(out["analysis_type"], "capability");
    assert_eq!(out["input_size"], 0);
    assert_eq!(out["code"], "no_usable_data");
    assert!(out.get("result").is_none());
}

#[test]
fn full_precision_config() {
    let out = run_value(
        "spc",
        r#"{"values": [1, 2, 2], "config": {"precision": "full"}}"#,
    );
    assert_abs_diff_eq!(out["result"]["mean"].as_f64().unwrap(), 5.0 / 3.0, epsilon = 1e-15);
}

#[test]
fn malformed_input_is_a_hard_failure() {
    assert!(matches!(
        run("spc", "[1, 2, 3]").unwrap_err(),
        BridgeError::MalformedInput(_)
    ));
}

#[test]
fn unknown_kind_keeps_envelope() {
    let out = run_value("Trend", r#"{"values": [1, 2, 3]}"#);
    assert_eq!(out["analysis_type"], "Trend");
    assert_eq!(out["input_size"], 3);
    assert_eq!(out["error"], "Unknown analysis type: Trend");
    assert_eq!(out["code"], "unknown_analysis");
    assert!(out.get("result").is_none());
}

#[test]
fn oversized_forecast_horizon_does_not_panic() {
    let out = run_value(
        "forecast",
        r#"{"values": [1, 2], "periods": 18446744073709551615}"#,
    );
    assert_eq!(out["code"], "horizon_too_long");
    assert!(out.get("result").is_none());
}

#[test]
fn output_is_byte_identical_across_calls() {
    let input = r#"{"values": [10.2, 9.8, 10.1, 9.9, 10.0, 13.5], "spec_limits": {"min_value": 9, "max_value": 11}}"#;
    let first = run("spc", input).unwrap().to_json_pretty().unwrap();
    for _ in 0..5 {
        assert_eq!(run("spc", input).unwrap().to_json_pretty().unwrap(), first);
    }
}
