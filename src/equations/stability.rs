// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Financial Stability and Confidence

const LEVERAGE_WEIGHT: f64 = 0.4;
const LIQUIDITY_WEIGHT: f64 = 0.3;
const FLIGHT_WEIGHT: f64 = 0.3;
/// Leverage component saturates at 1.5x the permitted leverage.
const LEVERAGE_CAP: f64 = 1.5;
/// A 10% quarterly deposit loss saturates the flight component.
const FLIGHT_SCALE: f64 = 10.0;
/// Fraction of the distance to the confidence target closed each quarter.
const CONFIDENCE_ADJUSTMENT: f64 = 0.3;
const CONFIDENCE_UNEMPLOYMENT_WEIGHT: f64 = 2.0;
const CONFIDENCE_GAP_WEIGHT: f64 = 2.0;
/// Confidence lost per unit of stress above the emergency threshold.
const CONFIDENCE_STRESS_PENALTY: f64 = 20.0;

/// Inputs to the composite stress index, all taken after this step's banking update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressInputs {
    pub loans: f64,
    pub capital: f64,
    pub capital_ratio: f64,
    pub reserves: f64,
    pub required_reserves: f64,
    pub prev_deposits: f64,
    pub deposits: f64,
}

/// Leverage relative to the permitted maximum (1.0 = at the requirement).
pub fn leverage_pressure(loans: f64, capital: f64, capital_ratio: f64) -> f64 {
    (loans / capital) * capital_ratio
}

/// How far reserves fall short of twice the requirement, in [0, 1].
pub fn liquidity_shortfall(reserves: f64, required: f64) -> f64 {
    if required <= 0.0 {
        return 0.0;
    }
    (1.0 - reserves / (2.0 * required)).max(0.0)
}

/// Fractional deposit loss over the quarter, zero when deposits grew.
pub fn deposit_flight(prev_deposits: f64, deposits: f64) -> f64 {
    if prev_deposits <= 0.0 {
        return 0.0;
    }
    ((prev_deposits - deposits) / prev_deposits).max(0.0)
}

/// Weighted composite of leverage, liquidity shortfall and deposit flight.
pub fn financial_stress_index(inputs: &StressInputs) -> f64 {
    let leverage = leverage_pressure(inputs.loans, inputs.capital, inputs.capital_ratio).min(LEVERAGE_CAP);
    let liquidity = liquidity_shortfall(inputs.reserves, inputs.required_reserves);
    let flight = (FLIGHT_SCALE * deposit_flight(inputs.prev_deposits, inputs.deposits)).min(1.0);
    LEVERAGE_WEIGHT * leverage + LIQUIDITY_WEIGHT * liquidity + FLIGHT_WEIGHT * flight
}

fn stress_penalty(prev_stress: f64, threshold: f64) -> f64 {
    CONFIDENCE_STRESS_PENALTY * (prev_stress - threshold).max(0.0)
}

pub fn consumer_confidence(
    prev: f64,
    unemployment: f64,
    natural_unemployment: f64,
    prev_stress: f64,
    threshold: f64,
) -> f64 {
    let target = 100.0
        - CONFIDENCE_UNEMPLOYMENT_WEIGHT * (unemployment - natural_unemployment)
        - stress_penalty(prev_stress, threshold);
    prev + CONFIDENCE_ADJUSTMENT * (target - prev)
}

pub fn business_confidence(prev: f64, output_gap: f64, prev_stress: f64, threshold: f64) -> f64 {
    let target = 100.0 + CONFIDENCE_GAP_WEIGHT * output_gap - stress_penalty(prev_stress, threshold);
    prev + CONFIDENCE_ADJUSTMENT * (target - prev)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calm() -> StressInputs {
        StressInputs {
            loans: 15000.0,
            capital: 1800.0,
            capital_ratio: 0.08,
            reserves: 1000.0,
            required_reserves: 360.0,
            prev_deposits: 18000.0,
            deposits: 18100.0,
        }
    }

    #[test]
    fn test_calm_banking_sector_has_only_leverage_stress() {
        let fsi = financial_stress_index(&calm());
        assert!((fsi - 0.4 * 15000.0 / 1800.0 * 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_deposit_run_saturates_flight_component() {
        let mut inputs = calm();
        inputs.deposits = 12000.0;
        let fsi = financial_stress_index(&inputs);
        assert!((fsi - financial_stress_index(&calm()) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_reserve_shortfall_adds_stress() {
        let mut inputs = calm();
        inputs.reserves = 360.0;
        let fsi = financial_stress_index(&inputs);
        assert!((fsi - financial_stress_index(&calm()) - 0.15).abs() < 1e-12);
        assert_eq!(liquidity_shortfall(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_confidence_moves_toward_target() {
        assert_eq!(consumer_confidence(100.0, 4.0, 4.0, 0.3, 0.5), 100.0);
        assert!((consumer_confidence(100.0, 6.0, 4.0, 0.3, 0.5) - 98.8).abs() < 1e-12);
        assert!((business_confidence(100.0, 0.0, 1.0, 0.5) - 97.0).abs() < 1e-12);
    }
}
