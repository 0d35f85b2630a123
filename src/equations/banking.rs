// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Banking Sector

//! Aggregate commercial-bank balance sheet.
//!
//! Deposits grow with nominal output and leak toward CBDC when the CBDC
//! rate beats the deposit rate. Lending is capped by capital, reserves are
//! kept at or above the requirement, and capital accumulates retained
//! earnings net of stress-related losses.

use crate::params::{BankingParameters, CbdcParameters};
use crate::types::EconomicState;

/// Deposit rate sits this many points below the money-market rate, floored at zero.
pub const DEPOSIT_SPREAD: f64 = 2.0;
/// Lending rate sits this many points above the money-market rate.
pub const LENDING_SPREAD: f64 = 2.0;
/// Extra capital ratio demanded per unit of macroprudential intensity.
const MACROPRUDENTIAL_SURCHARGE: f64 = 0.02;
/// Largest share of deposits that can leave for CBDC through the rate channel in one quarter.
const MAX_QUARTERLY_OUTFLOW: f64 = 0.25;
const OUTFLOW_SENSITIVITY: f64 = 0.1;
/// Lending growth per unit of risk appetite above neutral (0.5).
const APPETITE_SENSITIVITY: f64 = 0.01;
/// Lending growth lost per unit of macroprudential intensity.
const MACROPRUDENTIAL_DRAG: f64 = 0.005;
/// Net-interest-margin points absorbed by operating costs.
const OPERATING_COST: f64 = 3.0;
const RETENTION_RATIO: f64 = 0.4;
/// Quarterly loan loss per unit of financial stress.
const STRESS_LOSS_RATE: f64 = 0.002;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BankingOutcome {
    /// Deposits after the rate-channel outflow, before adoption-driven substitution.
    pub deposits: f64,
    /// Deposits moved to CBDC through the rate channel.
    pub outflow: f64,
    pub loans: f64,
    pub reserves: f64,
    pub required_reserves: f64,
    pub capital: f64,
    pub deposit_rate: f64,
    pub nominal_growth: f64,
}

/// Effective capital requirement including the macroprudential surcharge.
pub fn capital_ratio(b: &BankingParameters, c: &CbdcParameters) -> f64 {
    b.capital_requirement + MACROPRUDENTIAL_SURCHARGE * c.macroprudential_intensity
}

pub fn deposit_rate(interest_rate: f64) -> f64 {
    (interest_rate - DEPOSIT_SPREAD).max(0.0)
}

/// Share of deposits leaving for CBDC this quarter through the rate channel.
pub fn outflow_share(cbdc_rate: f64, deposit_rate: f64, disintermediation: f64) -> f64 {
    let advantage = (cbdc_rate - deposit_rate).max(0.0);
    (advantage * disintermediation * OUTFLOW_SENSITIVITY).min(MAX_QUARTERLY_OUTFLOW)
}

pub fn update_balance_sheet(
    prev: &EconomicState,
    output: f64,
    price_level: f64,
    interest_rate: f64,
    b: &BankingParameters,
    c: &CbdcParameters,
) -> BankingOutcome {
    let nominal_growth = (output * price_level) / (prev.output * prev.price_level) - 1.0;
    let deposit_rate = deposit_rate(interest_rate);

    let grown = prev.bank_deposits * (1.0 + nominal_growth);
    let outflow = grown * outflow_share(c.cbdc_interest_rate, deposit_rate, b.cbdc_disintermediation);
    let deposits = grown - outflow;

    let ratio = capital_ratio(b, c);
    let desired = prev.bank_loans
        * (1.0 + nominal_growth + (b.lending_risk_appetite - 0.5) * APPETITE_SENSITIVITY
            - MACROPRUDENTIAL_DRAG * c.macroprudential_intensity);
    let loans = if ratio > 0.0 {
        desired.min(prev.bank_capital / ratio)
    } else {
        desired
    };

    let required_reserves = b.reserve_requirement * deposits;
    let reserves = required_reserves.max(prev.bank_reserves * (1.0 + nominal_growth))
        + b.quantitative_easing * prev.output / 100.0;

    let margin = (interest_rate + LENDING_SPREAD) - deposit_rate - OPERATING_COST;
    let earnings = loans * margin / 400.0;
    let losses = loans * STRESS_LOSS_RATE * prev.financial_stress_index;
    let capital = prev.bank_capital + RETENTION_RATIO * earnings - losses;

    BankingOutcome {
        deposits,
        outflow,
        loans,
        reserves,
        required_reserves,
        capital,
        deposit_rate,
        nominal_growth,
    }
}
