// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Money Market

//! Money supply, CBDC velocity and the clearing interest rate.
//!
//! The market clears on `M/P = k·Y − h·r + velocityAdjustment`, solved
//! algebraically for `r` once `Y` and `P` are known for the step.

use crate::params::{BankingParameters, MacroParameters};
use crate::types::EconomicState;

pub const MIN_VALIDITY_DAYS: f64 = 30.0;
pub const MAX_VALIDITY_DAYS: f64 = 365.0;
/// Money demand shed per unit of CBDC per log-unit of forced velocity.
const VELOCITY_DEMAND_WEIGHT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyMarket {
    pub base_money: f64,
    pub money_supply: f64,
    pub velocity: f64,
    pub velocity_adjustment: f64,
    pub interest_rate: f64,
}

/// Quarterly nominal trend: real potential growth plus target inflation.
fn nominal_trend(m: &MacroParameters) -> f64 {
    1.0 + m.potential_output_growth / 4.0 + m.inflation_target / 400.0
}

/// Central bank money grows with nominal trend plus quantitative easing.
pub fn base_money(prev: &EconomicState, m: &MacroParameters, b: &BankingParameters) -> f64 {
    prev.base_money * nominal_trend(m) + b.quantitative_easing * prev.output / 100.0
}

/// `M = base · (1 + bankingMultiplier) + CBDC`, with the banking multiplier
/// measured as trend-grown deposits per unit of base money.
pub fn money_supply(base: f64, prev: &EconomicState, m: &MacroParameters) -> f64 {
    base + prev.bank_deposits * nominal_trend(m) + prev.cbdc_supply
}

/// Turnover forced by expiring balances: once a year at 365 days of
/// validity, about twelve times at the 30-day minimum.
pub fn cbdc_velocity(validity_days: f64) -> f64 {
    MAX_VALIDITY_DAYS / validity_days.clamp(MIN_VALIDITY_DAYS, MAX_VALIDITY_DAYS)
}

/// Reduction in money demand from CBDC that must circulate faster.
pub fn velocity_adjustment(velocity: f64, prev_cbdc_supply: f64) -> f64 {
    -VELOCITY_DEMAND_WEIGHT * velocity.ln() * prev_cbdc_supply
}

/// `r = (k·Y + adjustment − M/P) / (h·s)`
pub fn interest_rate(
    output: f64,
    price_level: f64,
    money_supply: f64,
    adjustment: f64,
    m: &MacroParameters,
    scale: f64,
) -> f64 {
    let real_balances = money_supply / price_level;
    (m.money_demand_income_elasticity * output + adjustment - real_balances)
        / (m.money_demand_interest_sensitivity * scale)
}

pub fn clear_money_market(
    prev: &EconomicState,
    output: f64,
    price_level: f64,
    validity_days: f64,
    m: &MacroParameters,
    b: &BankingParameters,
    scale: f64,
) -> MoneyMarket {
    let base = base_money(prev, m, b);
    let supply = money_supply(base, prev, m);
    let velocity = cbdc_velocity(validity_days);
    let adjustment = velocity_adjustment(velocity, prev.cbdc_supply);
    MoneyMarket {
        base_money: base,
        money_supply: supply,
        velocity,
        velocity_adjustment: adjustment,
        interest_rate: interest_rate(output, price_level, supply, adjustment, m, scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_bounds() {
        assert_eq!(cbdc_velocity(365.0), 1.0);
        assert_eq!(cbdc_velocity(3650.0), 1.0, "validity beyond a year adds nothing");
        assert!((cbdc_velocity(30.0) - 365.0 / 30.0).abs() < 1e-12);
        assert_eq!(cbdc_velocity(1.0), cbdc_velocity(30.0));
    }

    #[test]
    fn test_no_adjustment_without_cbdc_or_at_unit_velocity() {
        assert_eq!(velocity_adjustment(12.0, 0.0), 0.0);
        assert_eq!(velocity_adjustment(1.0, 5000.0), 0.0);
        assert!(velocity_adjustment(4.0, 1000.0) < 0.0);
    }

    #[test]
    fn test_more_money_lowers_the_rate() {
        let m = MacroParameters::default();
        let r1 = interest_rate(20000.0, 1.0, 20000.0, 0.0, &m, 1.0);
        let r2 = interest_rate(20000.0, 1.0, 20400.0, 0.0, &m, 1.0);
        assert!((r1 - 2.5).abs() < 1e-12);
        assert!((r1 - r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_calibrated_market_clears_near_initial_rate() {
        let prev = EconomicState::default();
        let m = MacroParameters::default();
        let s = 1.0 + m.potential_output_growth / 4.0;
        let market = clear_money_market(
            &prev, 20000.0 * s, 1.005, 365.0, &m, &BankingParameters::default(), s,
        );
        assert!((market.interest_rate - 2.5).abs() < 0.1, "rate was {}", market.interest_rate);
        assert!(market.money_supply > prev.money_supply);
    }

    #[test]
    fn test_quantitative_easing_adds_base_money() {
        let prev = EconomicState::default();
        let m = MacroParameters::default();
        let plain = base_money(&prev, &m, &BankingParameters::default());
        let eased = base_money(&prev, &m, &BankingParameters { quantitative_easing: 0.5, ..Default::default() });
        assert!((eased - plain - 100.0).abs() < 1e-9);
    }
}
