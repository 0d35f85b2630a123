// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Divergence Guard

//! Run-time failure taxonomy and the plausibility check every candidate
//! state must pass before it is committed.
//!
//! A failed check is fatal to the run. The guard never substitutes a
//! clamped or "recovered" value: the offending field, step and value are
//! reported as they were computed.

use crate::config::ValidationError;
use crate::types::{EconomicState, StateField};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationError {
    /// A state field became non-finite or left its plausible range.
    #[error("simulation diverged at step {step}: {field} = {value}")]
    Diverged {
        field: StateField,
        step: u32,
        value: f64,
    },

    /// The IS-identity denominator could not be kept away from zero.
    #[error("unstable multiplier at step {step}: denominator {denominator}")]
    UnstableMultiplier { step: u32, denominator: f64 },

    /// A scheduled policy change pushed the live parameters out of range.
    #[error("policy change at step {step} rejected: {source}")]
    InvalidPolicy {
        step: u32,
        #[source]
        source: ValidationError,
    },
}

impl SimulationError {
    pub fn step(&self) -> u32 {
        match self {
            SimulationError::Diverged { step, .. }
            | SimulationError::UnstableMultiplier { step, .. }
            | SimulationError::InvalidPolicy { step, .. } => *step,
        }
    }

    /// Short machine-readable kind, stable across releases.
    pub fn kind(&self) -> &'static str {
        match self {
            SimulationError::Diverged { .. } => "diverged",
            SimulationError::UnstableMultiplier { .. } => "unstable_multiplier",
            SimulationError::InvalidPolicy { .. } => "invalid_policy",
        }
    }
}

/// Serializable summary of a failure, for callers across the WASM boundary.
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub kind: &'static str,
    pub step: u32,
    pub message: String,
}

impl From<&SimulationError> for FailureSummary {
    fn from(err: &SimulationError) -> Self {
        FailureSummary {
            kind: err.kind(),
            step: err.step(),
            message: err.to_string(),
        }
    }
}

/// Reject `state` if any field is non-finite or implausible.
pub fn check_state(state: &EconomicState, step: u32) -> Result<(), SimulationError> {
    match state.first_violation() {
        None => Ok(()),
        Some((field, value)) => {
            let (min, max) = field.plausible_range();
            warn!(step, field = %field, value, min, max, "state left plausible range");
            Err(SimulationError::Diverged { field, step, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plausible_state_passes() {
        check_state(&EconomicState::default(), 3).expect("test: default state is plausible");
    }

    #[test]
    fn test_negative_deposits_diverge() {
        let mut state = EconomicState::default();
        state.bank_deposits = -1.0;
        let err = check_state(&state, 7).expect_err("test: negative deposits");
        assert_eq!(
            err,
            SimulationError::Diverged { field: StateField::BankDeposits, step: 7, value: -1.0 }
        );
        assert_eq!(err.step(), 7);
        assert_eq!(err.kind(), "diverged");
    }

    #[test]
    fn test_infinite_output_diverges() {
        let mut state = EconomicState::default();
        state.output = f64::INFINITY;
        let err = check_state(&state, 1).expect_err("test: infinite output");
        assert!(matches!(err, SimulationError::Diverged { field: StateField::Output, .. }));
    }

    #[test]
    fn test_failure_summary_carries_message() {
        let err = SimulationError::UnstableMultiplier { step: 1, denominator: 0.0 };
        let summary = FailureSummary::from(&err);
        assert_eq!(summary.kind, "unstable_multiplier");
        assert!(summary.message.contains("denominator"));
    }
}
