// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - CBDC Adoption and Supply

use crate::params::CbdcParameters;

/// Adoption ceiling with no rate advantage and no programmable features.
const BASE_CEILING: f64 = 0.10;
const MAX_CEILING: f64 = 0.95;
/// Ceiling gained per point of CBDC rate over the deposit rate.
const RATE_ATTRACTIVENESS: f64 = 0.1;
/// Ceiling gained per unit of programmable-feature intensity (averaged).
const FEATURE_ATTRACTIVENESS: f64 = 0.3;
/// Ceiling gained per 1000 of trend-scaled transfers paid into wallets.
const TRANSFER_ATTRACTIVENESS: f64 = 0.05;
/// Innovation and imitation coefficients of the diffusion process.
const INNOVATION_RATE: f64 = 0.02;
const IMITATION_RATE: f64 = 0.3;
/// Deposits converted per unit of new adoption share.
const SUBSTITUTION_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CbdcOutcome {
    pub adoption: f64,
    pub ceiling: f64,
    /// Deposits converted because of new adoption.
    pub substitution: f64,
    /// Central-bank issuance through asset purchases.
    pub issuance: f64,
    pub supply: f64,
    /// Deposits left after substitution.
    pub deposits: f64,
}

/// Long-run adoption share implied by rate advantage and programmable features.
pub fn adoption_ceiling(c: &CbdcParameters, deposit_rate: f64, scale: f64) -> f64 {
    let features = (c.conditional_spending_constraint + c.smart_contract_lending) / 2.0;
    let transfers = c.automatic_fiscal_transfer / (1000.0 * scale);
    (BASE_CEILING
        + RATE_ATTRACTIVENESS * (c.cbdc_interest_rate - deposit_rate)
        + FEATURE_ATTRACTIVENESS * features
        + TRANSFER_ATTRACTIVENESS * transfers)
        .clamp(0.0, MAX_CEILING)
}

/// Bass-style diffusion toward the ceiling. For adoption and ceiling in
/// [0, 1] the step is a convex combination of the two, so it stays in [0, 1].
pub fn adoption(prev: f64, ceiling: f64) -> f64 {
    let speed = INNOVATION_RATE + IMITATION_RATE * prev;
    prev + speed * (ceiling - prev)
}

#[allow(clippy::too_many_arguments)]
pub fn update_cbdc(
    prev_adoption: f64,
    prev_supply: f64,
    prev_output: f64,
    deposits: f64,
    rate_outflow: f64,
    deposit_rate: f64,
    c: &CbdcParameters,
    scale: f64,
) -> CbdcOutcome {
    let ceiling = adoption_ceiling(c, deposit_rate, scale);
    let adoption = adoption(prev_adoption, ceiling);
    let substitution = (SUBSTITUTION_RATIO * (adoption - prev_adoption).max(0.0) * deposits).min(deposits);
    let issuance = c.asset_purchase_intensity * prev_output / 100.0;

    CbdcOutcome {
        adoption,
        ceiling,
        substitution,
        issuance,
        supply: prev_supply + rate_outflow + substitution + issuance,
        deposits: deposits - substitution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_ceiling() {
        let c = CbdcParameters::default();
        assert!((adoption_ceiling(&c, 0.5, 1.0) - 0.05).abs() < 1e-12);
        assert_eq!(adoption_ceiling(&c, 5.0, 1.0), 0.0, "ceiling never goes negative");
    }

    #[test]
    fn test_features_and_rate_raise_ceiling() {
        let plain = adoption_ceiling(&CbdcParameters::default(), 0.0, 1.0);
        let rich = adoption_ceiling(
            &CbdcParameters { cbdc_interest_rate: 1.0, smart_contract_lending: 1.0, ..Default::default() },
            0.0,
            1.0,
        );
        assert!((rich - plain - 0.25).abs() < 1e-12);
        let maxed = adoption_ceiling(
            &CbdcParameters { cbdc_interest_rate: 20.0, ..Default::default() },
            0.0,
            1.0,
        );
        assert_eq!(maxed, MAX_CEILING);
    }

    #[test]
    fn test_adoption_stays_in_unit_interval() {
        for &(a, ceiling) in &[(0.0, 0.95), (0.9, 0.95), (1.0, 0.0), (0.5, 0.0), (1.0, 0.95)] {
            let next = adoption(a, ceiling);
            assert!((0.0..=1.0).contains(&next), "adoption({a}, {ceiling}) = {next}");
        }
    }

    #[test]
    fn test_substitution_moves_deposits_into_cbdc() {
        let c = CbdcParameters { cbdc_interest_rate: 2.0, ..Default::default() };
        let out = update_cbdc(0.0, 100.0, 20000.0, 18000.0, 50.0, 0.0, &c, 1.0);
        assert!(out.substitution > 0.0);
        assert!((out.deposits + out.substitution - 18000.0).abs() < 1e-9);
        assert!((out.supply - (100.0 + 50.0 + out.substitution)).abs() < 1e-9);
    }

    #[test]
    fn test_asset_purchases_issue_cbdc() {
        let c = CbdcParameters { asset_purchase_intensity: 0.5, ..Default::default() };
        let out = update_cbdc(0.0, 0.0, 20000.0, 18000.0, 0.0, 0.5, &c, 1.0);
        assert!((out.issuance - 100.0).abs() < 1e-9);
    }
}
