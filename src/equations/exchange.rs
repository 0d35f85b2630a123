// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Exchange Rate

use crate::params::{MacroParameters, TradeParameters};
use crate::types::ExchangeRateRegime;

/// Appreciation per point of interest differential (uncovered parity, damped).
const RATE_DIFFERENTIAL_SENSITIVITY: f64 = 0.02;
/// Response of the implied rate to the trade balance as a share of output.
const TRADE_BALANCE_SENSITIVITY: f64 = 0.3;
/// Fraction of the gap to the implied rate closed each quarter by the market.
const MARKET_ADJUSTMENT_SPEED: f64 = 0.5;
/// Fraction of a band excursion the central bank corrects under a managed regime.
const MANAGED_CORRECTION: f64 = 0.5;
/// Reserves spent per unit of exchange-rate correction, as a share of output.
const MANAGED_INTERVENTION_COST: f64 = 0.1;
/// Reserves spent per unit of peg pressure, as a share of output.
const PEG_DEFENCE_COST: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeOutcome {
    pub exchange_rate: f64,
    /// Rate the market would move toward without intervention.
    pub implied_rate: f64,
    /// Foreign reserves spent this quarter.
    pub intervention: f64,
}

/// Value the currency is pulled toward. A domestic rate above the foreign
/// rate appreciates it (lower `e`) unless capital controls block the flow; a
/// trade surplus depreciates it.
pub fn implied_exchange_rate(
    interest_rate: f64,
    net_exports: f64,
    output: f64,
    m: &MacroParameters,
    t: &TradeParameters,
) -> f64 {
    let differential = interest_rate - m.foreign_interest_rate;
    t.exchange_rate_target
        * (1.0 - RATE_DIFFERENTIAL_SENSITIVITY * differential * (1.0 - t.capital_flow_control)
            + TRADE_BALANCE_SENSITIVITY * net_exports / output)
}

pub fn update_exchange_rate(
    prev_rate: f64,
    implied_rate: f64,
    output: f64,
    t: &TradeParameters,
) -> ExchangeOutcome {
    let market = prev_rate + MARKET_ADJUSTMENT_SPEED * (implied_rate - prev_rate);
    let target = t.exchange_rate_target;

    let (exchange_rate, intervention) = match t.exchange_rate_regime {
        ExchangeRateRegime::Floating => (market, 0.0),
        ExchangeRateRegime::Managed => {
            let deviation = market - target;
            if deviation.abs() > t.intervention_band {
                let excess = deviation - t.intervention_band.copysign(deviation);
                let correction = MANAGED_CORRECTION * excess;
                (market - correction, correction.abs() * output * MANAGED_INTERVENTION_COST)
            } else {
                (market, 0.0)
            }
        }
        ExchangeRateRegime::Fixed => {
            (target, (implied_rate - target).abs() * output * PEG_DEFENCE_COST)
        }
    };

    ExchangeOutcome { exchange_rate, implied_rate, intervention }
}
