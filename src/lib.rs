// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine

pub mod types;
pub mod params;
pub mod config;
pub mod equations;
pub mod guard;
pub mod trace;
pub mod result;
pub mod engine;
pub mod scenarios;
pub mod simulation;

pub use config::{
    Configuration, ConfigurationBuilder, PolicyPath, PolicyValue, RawConfiguration, ValidationError,
};
pub use engine::{advance, run, StepOutcome};
#[cfg(not(target_arch = "wasm32"))]
pub use engine::run_batch;
pub use guard::SimulationError;
pub use params::{BankingParameters, CbdcParameters, MacroParameters, ParameterSet, TradeParameters};
pub use result::{RunFailure, RunResult};
pub use simulation::{CbdcSimulation, RunReport};
pub use trace::StepTrace;
pub use types::{EconomicState, ExchangeRateRegime, StateField};

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

#[wasm_bindgen]
impl CbdcSimulation {
    /// Build from a plain JS object shaped like a configuration document.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CbdcSimulation, JsValue> {
        install_panic_hook();
        let config: Configuration = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(CbdcSimulation::from_config(config))
    }

    /// One of `baseline`, `cbdc_adoption`, `trade_war`, `banking_crisis`.
    pub fn preset(name: &str) -> Result<CbdcSimulation, JsValue> {
        install_panic_hook();
        match scenarios::by_name(name) {
            Some(Ok(config)) => Ok(CbdcSimulation::from_config(config)),
            Some(Err(e)) => Err(JsValue::from_str(&e.to_string())),
            None => Err(JsValue::from_str(&format!("unknown preset `{name}`"))),
        }
    }

    pub fn preset_names() -> JsValue {
        serde_wasm_bindgen::to_value(scenarios::PRESET_NAMES).unwrap_or(JsValue::NULL)
    }

    pub fn column_names() -> JsValue {
        serde_wasm_bindgen::to_value(&RunResult::column_names()).unwrap_or(JsValue::NULL)
    }

    pub fn time_horizon(&self) -> u32 {
        self.configuration().time_horizon()
    }

    pub fn get_config(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.configuration()).unwrap_or(JsValue::NULL)
    }

    /// Run to the horizon. Never throws: a failed run reports `completed: false`
    /// with the partial trajectory and the error.
    pub fn run(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.report()).unwrap_or(JsValue::NULL)
    }
}
