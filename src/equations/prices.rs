// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Prices, Expectations and Wages

/// Inflation response (points) per unit of potential-output disturbance.
/// A positive supply disturbance lowers inflation.
const SUPPLY_SHOCK_PASS_THROUGH: f64 = 50.0;
/// Wage growth lost per point of unemployment above the natural rate.
const WAGE_SLACK_SENSITIVITY: f64 = 0.001;

/// Expectations-augmented Phillips curve.
pub fn inflation(
    prev_expected: f64,
    slope: f64,
    unemployment: f64,
    natural_unemployment: f64,
    supply_disturbance: f64,
) -> f64 {
    prev_expected - slope * (unemployment - natural_unemployment)
        - SUPPLY_SHOCK_PASS_THROUGH * supply_disturbance
}

/// Adaptive expectations, partially anchored to the inflation target.
pub fn expected_inflation(
    prev_expected: f64,
    realized: f64,
    adaptive_weight: f64,
    anchoring: f64,
    target: f64,
) -> f64 {
    let adaptive = adaptive_weight * prev_expected + (1.0 - adaptive_weight) * realized;
    (1.0 - anchoring) * adaptive + anchoring * target
}

pub fn price_level(prev: f64, inflation: f64) -> f64 {
    prev * (1.0 + inflation / 400.0)
}

pub fn wage_level(
    prev: f64,
    inflation: f64,
    productivity_growth: f64,
    unemployment: f64,
    natural_unemployment: f64,
) -> f64 {
    prev * (1.0 + inflation / 400.0 + productivity_growth / 4.0
        - WAGE_SLACK_SENSITIVITY * (unemployment - natural_unemployment))
}
