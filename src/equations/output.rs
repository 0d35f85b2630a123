// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Output, Potential and Labour Market

use super::demand::DemandComponents;
use crate::params::{CbdcParameters, MacroParameters};

/// Below this the multiplier is treated as unbounded and the step fails.
pub const UNSTABLE_DENOMINATOR: f64 = 1.0e-6;
/// Smallest denominator actually used; caps the multiplier at 20.
pub const DENOMINATOR_FLOOR: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("multiplier denominator {denominator} is not bounded away from zero")]
pub struct UnstableMultiplier {
    pub denominator: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputSolution {
    pub output: f64,
    /// Denominator as implied by the parameters.
    pub raw_denominator: f64,
    /// Denominator used after the floor clamp.
    pub denominator: f64,
}

impl OutputSolution {
    pub fn clamped(&self) -> bool {
        self.denominator != self.raw_denominator
    }
}

/// `1 − mpc·((1 − constraint)·f + constraint)`
///
/// Only the share `f` of discretionary current income is spent within the
/// quarter, while balances under a spending constraint must be spent and
/// recirculate in full.
pub fn multiplier_denominator(m: &MacroParameters, c: &CbdcParameters) -> f64 {
    let constraint = c.conditional_spending_constraint;
    let recirculating = (1.0 - constraint) * m.income_share_feedback + constraint;
    1.0 - m.marginal_propensity_to_consume * recirculating
}

/// Closed-form extended IS identity: `Y = (C + I + G + NX) / denominator`.
pub fn solve_output(
    demand: &DemandComponents,
    m: &MacroParameters,
    c: &CbdcParameters,
) -> Result<OutputSolution, UnstableMultiplier> {
    let raw_denominator = multiplier_denominator(m, c);
    if raw_denominator.is_nan() || raw_denominator < UNSTABLE_DENOMINATOR {
        return Err(UnstableMultiplier { denominator: raw_denominator });
    }
    let denominator = raw_denominator.max(DENOMINATOR_FLOOR);
    Ok(OutputSolution {
        output: demand.autonomous_total() / denominator,
        raw_denominator,
        denominator,
    })
}

/// Potential output grows at trend plus a bounded quarterly disturbance.
pub fn potential_output(prev_potential: f64, annual_growth: f64, disturbance: f64) -> f64 {
    prev_potential * (1.0 + annual_growth / 4.0 + disturbance)
}

/// Output gap in percent of potential.
pub fn output_gap(output: f64, potential: f64) -> f64 {
    (output - potential) / potential * 100.0
}

/// Okun's law: `u = u_prev − okun·gap`, with the gap taken as a fraction of
/// potential. A persistent gap keeps moving unemployment.
pub fn unemployment(prev_rate: f64, okun: f64, gap_percent: f64) -> f64 {
    prev_rate - okun * gap_percent / 100.0
}

/// Perpetual-inventory capital stock with quarterly depreciation.
pub fn capital_stock(prev: f64, annual_depreciation: f64, investment: f64) -> f64 {
    prev * (1.0 - annual_depreciation / 4.0) + investment
}

pub fn technology_level(prev: f64, productivity_growth: f64) -> f64 {
    prev * (1.0 + productivity_growth / 4.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(total: f64) -> DemandComponents {
        DemandComponents {
            consumption: total,
            investment: 0.0,
            government_spending: 0.0,
            net_exports: 0.0,
        }
    }

    #[test]
    fn test_default_multiplier() {
        let d = multiplier_denominator(&MacroParameters::default(), &CbdcParameters::default());
        assert!((d - 0.85).abs() < 1e-12);
        let solved = solve_output(&demand(17000.0), &MacroParameters::default(), &CbdcParameters::default())
            .expect("test: default denominator is stable");
        assert!((solved.output - 20000.0).abs() < 1e-6);
        assert!(!solved.clamped());
    }

    #[test]
    fn test_small_denominator_is_clamped() {
        let m = MacroParameters { marginal_propensity_to_consume: 0.97, ..Default::default() };
        let c = CbdcParameters { conditional_spending_constraint: 1.0, ..Default::default() };
        let solved = solve_output(&demand(100.0), &m, &c).expect("test: 0.03 is above epsilon");
        assert!(solved.clamped());
        assert_eq!(solved.denominator, DENOMINATOR_FLOOR);
        assert!((solved.output - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_constraint_with_unit_mpc_is_unstable() {
        let m = MacroParameters { marginal_propensity_to_consume: 1.0, ..Default::default() };
        let c = CbdcParameters { conditional_spending_constraint: 1.0, ..Default::default() };
        let err = solve_output(&demand(100.0), &m, &c).expect_err("test: denominator is zero");
        assert_eq!(err.denominator, 0.0);
    }

    #[test]
    fn test_okun_level_form() {
        assert_eq!(unemployment(4.0, 0.5, 0.0), 4.0);
        // 2% below potential: 0.5 × 0.02 points per quarter.
        assert!((unemployment(4.0, 0.5, -2.0) - 4.01).abs() < 1e-12);
        assert!(unemployment(5.0, 0.5, 1.0) < 5.0);
    }

    #[test]
    fn test_steady_negative_gap_keeps_raising_unemployment() {
        let mut u = 4.0;
        for _ in 0..8 {
            let next = unemployment(u, 0.5, -2.0);
            assert!(next > u);
            u = next;
        }
        assert!((u - 4.08).abs() < 1e-9);
    }

    #[test]
    fn test_gap_and_potential() {
        assert!((output_gap(20200.0, 20000.0) - 1.0).abs() < 1e-12);
        assert!((potential_output(20000.0, 0.04, 0.0) - 20200.0).abs() < 1e-9);
        assert!((capital_stock(1000.0, 0.1, 10.0) - 985.0).abs() < 1e-9);
    }
}
