// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Step Calculation Log

use crate::config::PolicyPath;
use crate::types::StateField;
use serde::{Deserialize, Serialize};

/// Intermediate quantities behind one committed state, for auditing a run
/// without re-deriving the equations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTrace {
    pub step: u32,
    pub trend_scale: f64,
    pub consumption: f64,
    pub investment: f64,
    pub government_spending: f64,
    pub net_exports: f64,
    pub raw_multiplier_denominator: f64,
    pub multiplier_denominator: f64,
    pub multiplier_clamped: bool,
    /// Uniform draw applied to potential-output growth.
    pub potential_disturbance: f64,
    pub money_supply: f64,
    pub velocity_adjustment: f64,
    pub implied_exchange_rate: f64,
    pub reserve_intervention: f64,
    /// Quarterly growth of nominal output driving deposit and loan growth.
    pub nominal_growth: f64,
    /// Deposits moved to CBDC by the rate channel.
    pub deposit_outflow: f64,
    /// Deposits moved to CBDC by new adoption.
    pub deposit_substitution: f64,
    pub adoption_ceiling: f64,
    /// CBDC issued through central-bank asset purchases.
    pub cbdc_issuance: f64,
    pub emergency_override: bool,
    /// Policy changes merged before this step.
    pub policy_applied: Vec<String>,
    /// Shocks added after this step was computed.
    pub shocks_applied: Vec<StateField>,
}

impl StepTrace {
    pub(crate) fn record_policy(&mut self, paths: impl IntoIterator<Item = PolicyPath>) {
        self.policy_applied.extend(paths.into_iter().map(|p| p.to_string()));
    }

    /// Whether a shock touched `field` at this step.
    pub fn shocked(&self, field: StateField) -> bool {
        self.shocks_applied.contains(&field)
    }
}
