// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Simulation Handle

use crate::config::Configuration;
use crate::engine;
use crate::guard::FailureSummary;
use crate::result::{RunFailure, RunResult};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A configuration ready to run, as handed to a UI. Each call to `run`
/// starts from scratch with a fresh generator, so repeated runs agree.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct CbdcSimulation {
    config: Configuration,
}

/// Outcome of one run in a shape a UI can render directly: the (possibly
/// partial) trajectory plus a failure summary when the run stopped early.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub completed: bool,
    pub result: RunResult,
    pub error: Option<FailureSummary>,
}

impl From<Result<RunResult, RunFailure>> for RunReport {
    fn from(outcome: Result<RunResult, RunFailure>) -> Self {
        match outcome {
            Ok(result) => RunReport { completed: true, result, error: None },
            Err(failure) => RunReport {
                completed: false,
                error: Some(FailureSummary::from(&failure.error)),
                result: *failure.partial,
            },
        }
    }
}

impl CbdcSimulation {
    pub fn from_config(config: Configuration) -> Self {
        Self { config }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn report(&self) -> RunReport {
        RunReport::from(engine::run(&self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{CbdcParameters, MacroParameters};

    #[test]
    fn test_completed_report() {
        let sim = CbdcSimulation::from_config(Configuration::builder().time_horizon(4).build().unwrap());
        let report = sim.report();
        assert!(report.completed);
        assert!(report.error.is_none());
        assert_eq!(report.result.history().len(), 5);
    }

    #[test]
    fn test_failed_report_keeps_partial_history() {
        let config = Configuration::builder()
            .time_horizon(4)
            .macro_parameters(MacroParameters { marginal_propensity_to_consume: 1.0, ..Default::default() })
            .cbdc_parameters(CbdcParameters { conditional_spending_constraint: 1.0, ..Default::default() })
            .build()
            .unwrap();
        let report = CbdcSimulation::from_config(config).report();
        assert!(!report.completed);
        let error = report.error.expect("test: failure summary present");
        assert_eq!(error.kind, "unstable_multiplier");
        assert_eq!(error.step, 1);
        assert_eq!(report.result.history().len(), 1, "only the initial state survives");
    }
}
