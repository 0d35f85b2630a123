// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Equation Modules

//! Pure economic relationships, one function per equation.
//!
//! Every function reads the previous state and the parameters in force for
//! the step and returns a new value. Nothing here touches the random
//! generator or the run history; the engine decides the evaluation order.
//!
//! Conventions: one step is one quarter, so annual rates enter as `g / 4`
//! for fractions and `π / 400` for percentages. Level parameters are
//! calibrated for the initial economy and are rescaled by the trend factor
//! returned from [`trend_scale`].

pub mod banking;
pub mod cbdc;
pub mod demand;
pub mod exchange;
pub mod fiscal;
pub mod money;
pub mod output;
pub mod prices;
pub mod stability;

/// Size of the economy's trend path this quarter relative to the initial
/// potential output.
pub fn trend_scale(prev_potential: f64, initial_potential: f64, potential_growth: f64) -> f64 {
    prev_potential * (1.0 + potential_growth / 4.0) / initial_potential
}
