// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Aggregate Demand

//! Consumption, investment, government spending and net exports.
//!
//! All four components use lagged state only, so they are known before
//! current output is solved.

use super::banking::capital_ratio;
use crate::params::{BankingParameters, CbdcParameters, MacroParameters, ParameterSet, TradeParameters};
use crate::types::EconomicState;

/// Investment financed per unit of spare loan capacity when smart-contract lending is on.
const SMART_LENDING_CAPACITY_WEIGHT: f64 = 100.0;
/// Extra counter-cyclical lending per point of unemployment above its natural rate.
const SMART_LENDING_SLACK_WEIGHT: f64 = 10.0;
/// Maximum export loss from tariffs (retaliation and diverted trade), at trend scale 1.
const TARIFF_DRAG_CEILING: f64 = 400.0;
const TARIFF_DRAG_CURVATURE: f64 = 3.0;
/// Maximum trade loss from foreign-exchange controls, at trend scale 1.
const FX_CONTROL_DRAG_CEILING: f64 = 100.0;
const FX_CONTROL_DRAG_CURVATURE: f64 = 2.0;
/// Export gain per unit of CBDC trade-settlement share (cheaper settlement).
const SETTLEMENT_EXPORT_GAIN: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandComponents {
    pub consumption: f64,
    pub investment: f64,
    pub government_spending: f64,
    pub net_exports: f64,
}

impl DemandComponents {
    pub fn autonomous_total(&self) -> f64 {
        self.consumption + self.investment + self.government_spending + self.net_exports
    }
}

/// `C = s·C0·confidence + mpc·(Y_prev − T_prev)·(1 − constraint)`
///
/// Balances under a conditional-spending constraint are committed to
/// qualifying purchases and leave the discretionary channel.
pub fn consumption(prev: &EconomicState, m: &MacroParameters, c: &CbdcParameters, scale: f64) -> f64 {
    let disposable = prev.output - prev.tax_revenue;
    scale * m.autonomous_consumption * prev.consumer_confidence / 100.0
        + m.marginal_propensity_to_consume * disposable * (1.0 - c.conditional_spending_constraint)
}

/// Unused share of the banks' capital-constrained loan capacity, in [0, 1].
pub fn credit_availability(prev: &EconomicState, b: &BankingParameters, c: &CbdcParameters) -> f64 {
    let capacity = prev.bank_capital / capital_ratio(b, c);
    if capacity <= 0.0 {
        return 0.0;
    }
    (1.0 - prev.bank_loans / capacity).clamp(0.0, 1.0)
}

/// `I = s·I0·confidence − s·b·r_prev + smartLending·availability + innovation`
pub fn investment(prev: &EconomicState, p: &ParameterSet, scale: f64) -> f64 {
    let m = &p.macro_parameters;
    let c = &p.cbdc_parameters;
    let slack = (prev.unemployment_rate - m.natural_unemployment).max(0.0);
    let smart_lending = c.smart_contract_lending
        * scale
        * (SMART_LENDING_CAPACITY_WEIGHT * credit_availability(prev, &p.banking_parameters, c)
            + SMART_LENDING_SLACK_WEIGHT * slack);
    let innovation = m.innovation_sensitivity * m.productivity_growth / 4.0 * prev.output;

    scale * m.autonomous_investment * prev.business_confidence / 100.0
        - scale * m.investment_interest_sensitivity * prev.interest_rate
        + smart_lending
        + innovation
}

pub fn government_spending(m: &MacroParameters, c: &CbdcParameters, scale: f64) -> f64 {
    scale * m.government_spending + c.automatic_fiscal_transfer
}

/// Export loss from tariffs. Saturating in the tariff rate, so a prohibitive
/// tariff costs at most `ceiling · (1.5 − 0.5·efficiency)`.
pub fn tariff_effect(scale: f64, tariff_rate: f64, customs_efficiency: f64) -> f64 {
    scale
        * TARIFF_DRAG_CEILING
        * (1.0 - (-TARIFF_DRAG_CURVATURE * tariff_rate).exp())
        * (1.5 - 0.5 * customs_efficiency)
}

/// Trade loss from foreign-exchange controls, saturating in intensity.
pub fn fx_control_effect(scale: f64, intensity: f64) -> f64 {
    scale * FX_CONTROL_DRAG_CEILING * (1.0 - (-FX_CONTROL_DRAG_CURVATURE * intensity).exp())
}

/// `NX = s·X0 − m·Y_prev − tariffs − fxControls + settlement + competitiveness`
///
/// A depreciated currency (exchange rate above its initial level) raises exports.
pub fn net_exports(
    prev: &EconomicState,
    initial_exchange_rate: f64,
    m: &MacroParameters,
    c: &CbdcParameters,
    t: &TradeParameters,
    scale: f64,
) -> f64 {
    let exports = scale * m.autonomous_exports;
    let competitiveness =
        exports * m.export_exchange_elasticity * (prev.exchange_rate / initial_exchange_rate - 1.0);
    let settlement = exports * SETTLEMENT_EXPORT_GAIN * t.cbdc_trade_settlement;

    exports - m.import_propensity * prev.output
        - tariff_effect(scale, t.tariff_rate, t.customs_efficiency)
        - fx_control_effect(scale, c.fx_control_intensity)
        + settlement
        + competitiveness
}

pub fn aggregate_demand(
    prev: &EconomicState,
    initial_exchange_rate: f64,
    p: &ParameterSet,
    scale: f64,
) -> DemandComponents {
    let m = &p.macro_parameters;
    let c = &p.cbdc_parameters;
    DemandComponents {
        consumption: consumption(prev, m, c, scale),
        investment: investment(prev, p, scale),
        government_spending: government_spending(m, c, scale),
        net_exports: net_exports(prev, initial_exchange_rate, m, c, &p.trade_parameters, scale),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spending_constraint_removes_discretionary_consumption() {
        let prev = EconomicState::default();
        let m = MacroParameters::default();
        let free = consumption(&prev, &m, &CbdcParameters::default(), 1.0);
        let bound = consumption(
            &prev,
            &m,
            &CbdcParameters { conditional_spending_constraint: 1.0, ..Default::default() },
            1.0,
        );
        assert!((bound - m.autonomous_consumption).abs() < 1e-9, "only autonomous part remains");
        assert!(free > bound);
    }

    #[test]
    fn test_tariff_and_fx_effects_are_bounded_and_monotone() {
        let low = tariff_effect(1.0, 0.05, 0.8);
        let high = tariff_effect(1.0, 0.5, 0.8);
        let extreme = tariff_effect(1.0, 5.0, 0.8);
        assert!(low < high && high < extreme);
        assert!(extreme < TARIFF_DRAG_CEILING * 1.1 + 1e-9);
        assert_eq!(tariff_effect(1.0, 0.0, 0.8), 0.0);

        assert!(fx_control_effect(1.0, 1.0) < FX_CONTROL_DRAG_CEILING);
        assert!(fx_control_effect(1.0, 0.5) > fx_control_effect(1.0, 0.2));
    }

    #[test]
    fn test_higher_lagged_rate_lowers_investment() {
        let params = ParameterSet::default();
        let mut prev = EconomicState::default();
        let base = investment(&prev, &params, 1.0);
        prev.interest_rate += 1.0;
        let tighter = investment(&prev, &params, 1.0);
        assert!((base - tighter - params.macro_parameters.investment_interest_sensitivity).abs() < 1e-9);
    }

    #[test]
    fn test_smart_lending_uses_spare_capacity() {
        let mut params = ParameterSet::default();
        let prev = EconomicState::default();
        let without = investment(&prev, &params, 1.0);
        params.cbdc_parameters.smart_contract_lending = 1.0;
        let with = investment(&prev, &params, 1.0);
        let availability = credit_availability(&prev, &params.banking_parameters, &params.cbdc_parameters);
        assert!(availability > 0.0 && availability < 1.0);
        assert!((with - without - 100.0 * availability).abs() < 1e-9);
    }

    #[test]
    fn test_depreciation_improves_net_exports() {
        let params = ParameterSet::default();
        let mut prev = EconomicState::default();
        let at_par = net_exports(
            &prev, 1.0, &params.macro_parameters, &params.cbdc_parameters, &params.trade_parameters, 1.0,
        );
        prev.exchange_rate = 1.1;
        let weaker = net_exports(
            &prev, 1.0, &params.macro_parameters, &params.cbdc_parameters, &params.trade_parameters, 1.0,
        );
        assert!(weaker > at_par);
    }

    #[test]
    fn test_transfer_adds_to_government_spending() {
        let m = MacroParameters::default();
        let c = CbdcParameters { automatic_fiscal_transfer: 250.0, ..Default::default() };
        assert_eq!(government_spending(&m, &c, 1.0), 4250.0);
    }
}
