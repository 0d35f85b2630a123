#![cfg(target_arch = "wasm32")]

use cbdc_engine::CbdcSimulation;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

#[wasm_bindgen_test]
fn preset_runs_to_completion() {
    let sim = CbdcSimulation::preset("trade_war").expect("preset exists");
    assert_eq!(sim.time_horizon(), 40);
    let report = sim.run();
    let completed = field(&report, "completed");
    assert_eq!(completed.as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn unknown_preset_is_an_error() {
    assert!(CbdcSimulation::preset("hyperinflation").is_err());
}

#[wasm_bindgen_test]
fn constructor_rejects_bad_schedule() {
    let doc = serde_wasm_bindgen::to_value(&serde_json::json!({
        "time_horizon": 4,
        "policy_changes": { "2": { "no_such_parameter": 1.0 } }
    }))
    .unwrap();
    assert!(CbdcSimulation::new(doc).is_err());
}

#[wasm_bindgen_test]
fn failed_run_reports_partial_history() {
    let doc = serde_wasm_bindgen::to_value(&serde_json::json!({
        "time_horizon": 4,
        "macro_parameters": { "marginal_propensity_to_consume": 1.0 },
        "cbdc_parameters": { "conditional_spending_constraint": 1.0 }
    }))
    .unwrap();
    let report = CbdcSimulation::new(doc).expect("valid document").run();
    assert_eq!(field(&report, "completed").as_bool(), Some(false));
    assert!(!field(&report, "error").is_null());
}

fn field(obj: &JsValue, key: &str) -> JsValue {
    let report: serde_json::Value = serde_wasm_bindgen::from_value(obj.clone()).unwrap();
    serde_wasm_bindgen::to_value(&report[key]).unwrap()
}
