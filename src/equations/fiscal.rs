// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Fiscal Accounts

use crate::params::{MacroParameters, TradeParameters};

/// Income tax plus tariff revenue on imports.
pub fn tax_revenue(output: f64, m: &MacroParameters, t: &TradeParameters) -> f64 {
    m.tax_rate * output + t.tariff_rate * m.import_propensity * output
}

/// New debt stock after financing this quarter's deficit.
pub fn government_debt(prev_debt: f64, spending: f64, revenue: f64) -> f64 {
    prev_debt + (spending - revenue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_revenue_matches_calibration() {
        let revenue = tax_revenue(20000.0, &MacroParameters::default(), &TradeParameters::default());
        assert!((revenue - 3700.0).abs() < 1e-9);
    }

    #[test]
    fn test_deficit_accumulates() {
        assert_eq!(government_debt(20000.0, 4000.0, 3700.0), 20300.0);
        assert_eq!(government_debt(20000.0, 3000.0, 3700.0), 19300.0);
    }
}
