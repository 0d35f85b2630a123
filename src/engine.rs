// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - State Transition Engine

//! Advances the economy one quarter at a time.
//!
//! Order within a step is fixed: policy merge, lagged demand, output,
//! potential and unemployment, inflation, interest rate, exchange rate,
//! banking, CBDC, financial stress, shocks, validation. Each quantity is
//! computed from the previous state or from values already produced earlier
//! in the same step, so no simultaneous solve is needed.

use crate::config::{apply_shocks, Configuration, PolicyPath};
use crate::equations::{
    banking, cbdc, demand, exchange, fiscal, money, output, prices, stability, trend_scale,
};
use crate::guard::{check_state, SimulationError};
use crate::params::ParameterSet;
use crate::result::{RunFailure, RunResult};
use crate::trace::StepTrace;
use crate::types::EconomicState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
#[cfg(not(target_arch = "wasm32"))]
use rayon::prelude::*;
use std::borrow::Cow;
use tracing::{debug, info, warn};

/// One committed transition.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub state: EconomicState,
    pub trace: StepTrace,
}

/// Compute the state at `index` from `prev`.
///
/// Policy changes scheduled at `index` are merged into `params` first and
/// stay there for later steps. Shocks scheduled at `index` are added to the
/// computed state only. The random generator is drawn exactly once.
pub fn advance<R: Rng>(
    prev: &EconomicState,
    index: u32,
    params: &mut ParameterSet,
    config: &Configuration,
    rng: &mut R,
) -> Result<StepOutcome, SimulationError> {
    let mut policy_applied = Vec::new();
    if let Some(changes) = config.policy_changes_at(index) {
        params
            .apply_policy(changes)
            .map_err(|source| SimulationError::InvalidPolicy { step: index, source })?;
        debug!(step = index, changes = changes.len(), "policy changes merged");
        policy_applied.extend(changes.keys().map(|p| p.to_string()));
    }

    let live = &params.cbdc_parameters;
    let emergency = live.emergency_override && prev.financial_stress_index > live.stress_threshold;
    let p: Cow<'_, ParameterSet> = if emergency {
        warn!(
            step = index,
            stress = prev.financial_stress_index,
            threshold = live.stress_threshold,
            "emergency override engaged for this step"
        );
        Cow::Owned(params.with_emergency_tools())
    } else {
        Cow::Borrowed(&*params)
    };
    let m = &p.macro_parameters;
    let c = &p.cbdc_parameters;
    let t = &p.trade_parameters;
    let b = &p.banking_parameters;
    let opening = config.opening_state();

    // Demand from lagged state
    let scale = trend_scale(prev.potential_output, opening.potential_output, m.potential_output_growth);
    let components = demand::aggregate_demand(prev, config.initial_state().exchange_rate, &p, scale);

    // Output
    let solved = output::solve_output(&components, m, c).map_err(|e| {
        warn!(step = index, denominator = e.denominator, "multiplier denominator collapsed");
        SimulationError::UnstableMultiplier { step: index, denominator: e.denominator }
    })?;
    if solved.clamped() {
        warn!(
            step = index,
            raw = solved.raw_denominator,
            used = solved.denominator,
            "multiplier denominator clamped"
        );
    }
    let y = solved.output;

    // Supply side and labour market
    let disturbance = m.potential_output_volatility * (2.0 * rng.gen::<f64>() - 1.0);
    let potential = output::potential_output(prev.potential_output, m.potential_output_growth, disturbance);
    let gap = output::output_gap(y, potential);
    let unemployment = output::unemployment(prev.unemployment_rate, m.okun_coefficient, gap);

    // Prices
    let inflation = prices::inflation(
        prev.expected_inflation,
        m.phillips_curve_slope,
        unemployment,
        m.natural_unemployment,
        disturbance,
    );
    let expected_inflation = prices::expected_inflation(
        prev.expected_inflation,
        inflation,
        m.adaptive_expectations_weight,
        m.expectations_anchoring,
        m.inflation_target,
    );
    let price_level = prices::price_level(prev.price_level, inflation);
    let wage_level = prices::wage_level(
        prev.wage_level,
        inflation,
        m.productivity_growth,
        unemployment,
        m.natural_unemployment,
    );

    // Money market
    let market = money::clear_money_market(prev, y, price_level, c.validity_period_days, m, b, scale);
    let r = market.interest_rate;

    // Exchange rate
    let implied = exchange::implied_exchange_rate(r, components.net_exports, y, m, t);
    let fx = exchange::update_exchange_rate(prev.exchange_rate, implied, y, t);

    // Banking and CBDC
    let bank = banking::update_balance_sheet(prev, y, price_level, r, b, c);
    let digital = cbdc::update_cbdc(
        prev.cbdc_adoption,
        prev.cbdc_supply,
        prev.output,
        bank.deposits,
        bank.outflow,
        bank.deposit_rate,
        c,
        scale,
    );

    // Stability and sentiment
    let fsi = stability::financial_stress_index(&stability::StressInputs {
        loans: bank.loans,
        capital: bank.capital,
        capital_ratio: banking::capital_ratio(b, c),
        reserves: bank.reserves,
        required_reserves: bank.required_reserves,
        prev_deposits: prev.bank_deposits,
        deposits: digital.deposits,
    });
    let consumer_confidence = stability::consumer_confidence(
        prev.consumer_confidence,
        unemployment,
        m.natural_unemployment,
        prev.financial_stress_index,
        c.stress_threshold,
    );
    let business_confidence = stability::business_confidence(
        prev.business_confidence,
        gap,
        prev.financial_stress_index,
        c.stress_threshold,
    );

    // Accounts
    let tax_revenue = fiscal::tax_revenue(y, m, t);

    let mut state = EconomicState {
        period: index,
        output: y,
        potential_output: potential,
        output_gap: gap,
        price_level,
        inflation_rate: inflation,
        expected_inflation,
        unemployment_rate: unemployment,
        interest_rate: r,
        exchange_rate: fx.exchange_rate,
        wage_level,
        capital_stock: output::capital_stock(prev.capital_stock, m.capital_depreciation, components.investment),
        technology_level: output::technology_level(prev.technology_level, m.productivity_growth),
        consumer_confidence,
        business_confidence,
        financial_stress_index: fsi,
        cbdc_supply: digital.supply,
        cbdc_adoption: digital.adoption,
        cbdc_velocity: market.velocity,
        bank_deposits: digital.deposits,
        bank_loans: bank.loans,
        bank_reserves: bank.reserves,
        bank_capital: bank.capital,
        deposit_rate: bank.deposit_rate,
        money_supply: market.money_supply,
        base_money: market.base_money,
        foreign_reserves: prev.foreign_reserves - fx.intervention,
        consumption: components.consumption,
        investment: components.investment,
        government_spending: components.government_spending,
        net_exports: components.net_exports,
        tax_revenue,
        budget_deficit: components.government_spending - tax_revenue,
        government_debt: fiscal::government_debt(
            prev.government_debt,
            components.government_spending,
            tax_revenue,
        ),
    };

    let mut shocks_applied = Vec::new();
    if let Some(shocks) = config.shocks_at(index) {
        apply_shocks(&mut state, shocks);
        debug!(step = index, fields = shocks.len(), "shocks applied");
        shocks_applied.extend(shocks.keys().copied());
    }

    check_state(&state, index)?;

    let trace = StepTrace {
        step: index,
        trend_scale: scale,
        consumption: components.consumption,
        investment: components.investment,
        government_spending: components.government_spending,
        net_exports: components.net_exports,
        raw_multiplier_denominator: solved.raw_denominator,
        multiplier_denominator: solved.denominator,
        multiplier_clamped: solved.clamped(),
        potential_disturbance: disturbance,
        money_supply: market.money_supply,
        velocity_adjustment: market.velocity_adjustment,
        implied_exchange_rate: fx.implied_rate,
        reserve_intervention: fx.intervention,
        nominal_growth: bank.nominal_growth,
        deposit_outflow: bank.outflow,
        deposit_substitution: digital.substitution,
        adoption_ceiling: digital.ceiling,
        cbdc_issuance: digital.issuance,
        emergency_override: emergency,
        policy_applied,
        shocks_applied,
    };

    Ok(StepOutcome { state, trace })
}

/// Run a configuration to its horizon with a generator seeded from it.
///
/// On failure the returned [`RunFailure`] carries every state committed
/// before the failing step.
pub fn run(config: &Configuration) -> Result<RunResult, RunFailure> {
    info!(
        horizon = config.time_horizon(),
        seed = config.random_seed(),
        policy_batches = config.policy_changes().len(),
        shock_batches = config.shocks().len(),
        regime = %config.parameters().trade_parameters.exchange_rate_regime,
        "starting run"
    );
    let mut rng = ChaCha8Rng::seed_from_u64(config.random_seed());
    let mut params = config.parameters().clone();

    let initial = config.opening_state().clone();
    if let Some(shocks) = config.shocks_at(0) {
        debug!(fields = shocks.len(), "shocks applied to initial state");
    }

    let mut history = Vec::with_capacity(config.time_horizon() as usize + 1);
    let mut traces: Vec<StepTrace> = Vec::with_capacity(config.time_horizon() as usize);
    history.push(initial);

    let opening_policy: Vec<PolicyPath> = match config.policy_changes_at(0) {
        Some(changes) => {
            if let Err(source) = params.apply_policy(changes) {
                return Err(failure(
                    SimulationError::InvalidPolicy { step: 0, source },
                    config,
                    history,
                    traces,
                ));
            }
            changes.keys().copied().collect()
        }
        None => Vec::new(),
    };

    for index in 1..=config.time_horizon() {
        let prev = &history[history.len() - 1];
        match advance(prev, index, &mut params, config, &mut rng) {
            Ok(StepOutcome { state, mut trace }) => {
                if index == 1 {
                    trace.record_policy(opening_policy.iter().copied());
                }
                history.push(state);
                traces.push(trace);
            }
            Err(error) => {
                warn!(step = index, kind = error.kind(), %error, "run stopped");
                return Err(failure(error, config, history, traces));
            }
        }
    }

    let last = &history[history.len() - 1];
    info!(
        steps = traces.len(),
        output = last.output,
        unemployment = last.unemployment_rate,
        adoption = last.cbdc_adoption,
        "run complete"
    );
    Ok(RunResult::new(config.clone(), history, traces))
}

fn failure(
    error: SimulationError,
    config: &Configuration,
    history: Vec<EconomicState>,
    traces: Vec<StepTrace>,
) -> RunFailure {
    RunFailure {
        error,
        partial: Box::new(RunResult::new(config.clone(), history, traces)),
    }
}

/// Run independent configurations on the rayon worker pool. Each run owns
/// its own generator; results come back in input order.
#[cfg(not(target_arch = "wasm32"))]
pub fn run_batch(configs: &[Configuration]) -> Vec<Result<RunResult, RunFailure>> {
    configs.par_iter().map(run).collect()
}
