// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Run Result

use crate::config::Configuration;
use crate::guard::SimulationError;
use crate::trace::StepTrace;
use crate::types::{EconomicState, StateField};
use serde::Serialize;

/// Time-ordered trajectory of one run: `history[0]` is the initial state and
/// `history[t]` the state after `t` transitions. `traces[t - 1]` explains
/// `history[t]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    config: Configuration,
    history: Vec<EconomicState>,
    traces: Vec<StepTrace>,
}

impl RunResult {
    pub(crate) fn new(config: Configuration, history: Vec<EconomicState>, traces: Vec<StepTrace>) -> Self {
        debug_assert_eq!(traces.len() + 1, history.len());
        Self { config, history, traces }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn history(&self) -> &[EconomicState] {
        &self.history
    }

    pub fn traces(&self) -> &[StepTrace] {
        &self.traces
    }

    pub fn state(&self, index: usize) -> Option<&EconomicState> {
        self.history.get(index)
    }

    /// Last committed state. A result always holds at least the initial state.
    pub fn final_state(&self) -> &EconomicState {
        &self.history[self.history.len() - 1]
    }

    /// Number of committed transitions.
    pub fn steps(&self) -> usize {
        self.history.len() - 1
    }

    /// Whether every scheduled step was committed.
    pub fn is_complete(&self) -> bool {
        self.steps() == self.config.time_horizon() as usize
    }

    /// One column of the trajectory.
    pub fn series(&self, field: StateField) -> Vec<f64> {
        self.history.iter().map(|s| s.get(field)).collect()
    }

    /// Column header for [`rows`](Self::rows): `period` then every state field
    /// in declaration order.
    pub fn column_names() -> Vec<&'static str> {
        std::iter::once("period")
            .chain(StateField::ALL.iter().map(|f| f.name()))
            .collect()
    }

    /// Tabular view, one row per time index, columns as in [`column_names`](Self::column_names).
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.history
            .iter()
            .map(|state| {
                std::iter::once(f64::from(state.period))
                    .chain(StateField::ALL.iter().map(|&f| state.get(f)))
                    .collect()
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// A run that stopped early. `partial` holds every state committed before
/// the failing step, which is never included.
#[derive(Debug, Clone, thiserror::Error)]
#[error("run stopped after {} committed steps: {error}", .partial.steps())]
pub struct RunFailure {
    #[source]
    pub error: SimulationError,
    pub partial: Box<RunResult>,
}
