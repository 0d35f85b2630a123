// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Run Configuration

//! Validated run configuration.
//!
//! A [`Configuration`] can only be obtained through [`ConfigurationBuilder::build`]
//! or by deserializing a [`RawConfiguration`], and both paths run the same
//! checks: parameter ranges, a plausible initial state, recognized policy and
//! shock keys, and schedule indices within the time horizon. A run therefore
//! never aborts partway because of a scheduling typo.

use crate::params::{
    BankingParameters, CbdcParameters, MacroParameters, ParameterSet, TradeParameters,
};
use crate::types::{EconomicState, ExchangeRateRegime, StateField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TIME_HORIZON: u32 = 20;
pub const DEFAULT_RANDOM_SEED: u64 = 42;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("time horizon must be at least one step")]
    ZeroHorizon,

    #[error("unknown policy parameter `{0}`")]
    UnknownPolicyPath(String),

    #[error("unknown state field `{0}` in shock schedule")]
    UnknownStateField(String),

    #[error("{path} expects a {expected} value")]
    PolicyValueType { path: String, expected: &'static str },

    #[error("{kind} scheduled at index {index} is beyond the time horizon {horizon}")]
    BeyondHorizon {
        kind: &'static str,
        index: u32,
        horizon: u32,
    },

    #[error("shock to {field} at index {index} is not finite")]
    NonFiniteShock { field: String, index: u32 },

    #[error("initial state field {field} = {value} is not plausible")]
    InitialState { field: String, value: f64 },

    #[error("policy change at index {index}: {source}")]
    PolicyChange {
        index: u32,
        #[source]
        source: Box<ValidationError>,
    },
}

// ─── Policy values ───────────────────────────────────────────────────────────

/// New value for one parameter. Most parameters are numeric; the emergency
/// override is a flag and the exchange-rate regime is an enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicyValue {
    Number(f64),
    Flag(bool),
    Regime(ExchangeRateRegime),
}

impl PolicyValue {
    fn number(&self, path: PolicyPath) -> Result<f64, ValidationError> {
        match self {
            PolicyValue::Number(v) => Ok(*v),
            _ => Err(path.type_error("number")),
        }
    }

    fn flag(&self, path: PolicyPath) -> Result<bool, ValidationError> {
        match self {
            PolicyValue::Flag(v) => Ok(*v),
            _ => Err(path.type_error("boolean")),
        }
    }

    fn regime(&self, path: PolicyPath) -> Result<ExchangeRateRegime, ValidationError> {
        match self {
            PolicyValue::Regime(v) => Ok(*v),
            _ => Err(path.type_error("regime")),
        }
    }
}

impl From<f64> for PolicyValue {
    fn from(v: f64) -> Self {
        PolicyValue::Number(v)
    }
}

impl From<bool> for PolicyValue {
    fn from(v: bool) -> Self {
        PolicyValue::Flag(v)
    }
}

impl From<ExchangeRateRegime> for PolicyValue {
    fn from(v: ExchangeRateRegime) -> Self {
        PolicyValue::Regime(v)
    }
}

// ─── Policy paths ────────────────────────────────────────────────────────────

macro_rules! policy_paths {
    ($( $variant:ident => $group:ident . $field:ident : $kind:ident ),+ $(,)?) => {
        /// Closed set of parameters a scheduled policy change may target.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum PolicyPath {
            $( $variant, )+
        }

        impl PolicyPath {
            pub const ALL: &'static [PolicyPath] = &[$( PolicyPath::$variant, )+];

            /// Parameter group, e.g. `cbdc_parameters`.
            pub fn group(self) -> &'static str {
                match self {
                    $( PolicyPath::$variant => stringify!($group), )+
                }
            }

            /// Field within the group, e.g. `cbdc_interest_rate`.
            pub fn field(self) -> &'static str {
                match self {
                    $( PolicyPath::$variant => stringify!($field), )+
                }
            }

            fn assign(self, params: &mut ParameterSet, value: &PolicyValue) -> Result<(), ValidationError> {
                match self {
                    $( PolicyPath::$variant => params.$group.$field = value.$kind(self)?, )+
                }
                Ok(())
            }
        }
    };
}

policy_paths! {
    AutonomousConsumption => macro_parameters.autonomous_consumption: number,
    MarginalPropensityToConsume => macro_parameters.marginal_propensity_to_consume: number,
    IncomeShareFeedback => macro_parameters.income_share_feedback: number,
    AutonomousInvestment => macro_parameters.autonomous_investment: number,
    InvestmentInterestSensitivity => macro_parameters.investment_interest_sensitivity: number,
    InnovationSensitivity => macro_parameters.innovation_sensitivity: number,
    MoneyDemandIncomeElasticity => macro_parameters.money_demand_income_elasticity: number,
    MoneyDemandInterestSensitivity => macro_parameters.money_demand_interest_sensitivity: number,
    PhillipsCurveSlope => macro_parameters.phillips_curve_slope: number,
    OkunCoefficient => macro_parameters.okun_coefficient: number,
    NaturalUnemployment => macro_parameters.natural_unemployment: number,
    PotentialOutputGrowth => macro_parameters.potential_output_growth: number,
    ProductivityGrowth => macro_parameters.productivity_growth: number,
    PotentialOutputVolatility => macro_parameters.potential_output_volatility: number,
    AdaptiveExpectationsWeight => macro_parameters.adaptive_expectations_weight: number,
    InflationTarget => macro_parameters.inflation_target: number,
    ExpectationsAnchoring => macro_parameters.expectations_anchoring: number,
    ForeignInterestRate => macro_parameters.foreign_interest_rate: number,
    ImportPropensity => macro_parameters.import_propensity: number,
    AutonomousExports => macro_parameters.autonomous_exports: number,
    ExportExchangeElasticity => macro_parameters.export_exchange_elasticity: number,
    GovernmentSpending => macro_parameters.government_spending: number,
    TaxRate => macro_parameters.tax_rate: number,
    CapitalDepreciation => macro_parameters.capital_depreciation: number,

    CbdcInterestRate => cbdc_parameters.cbdc_interest_rate: number,
    ValidityPeriodDays => cbdc_parameters.validity_period_days: number,
    ConditionalSpendingConstraint => cbdc_parameters.conditional_spending_constraint: number,
    AutomaticFiscalTransfer => cbdc_parameters.automatic_fiscal_transfer: number,
    SmartContractLending => cbdc_parameters.smart_contract_lending: number,
    FxControlIntensity => cbdc_parameters.fx_control_intensity: number,
    MacroprudentialIntensity => cbdc_parameters.macroprudential_intensity: number,
    EmergencyOverride => cbdc_parameters.emergency_override: flag,
    AssetPurchaseIntensity => cbdc_parameters.asset_purchase_intensity: number,
    StressThreshold => cbdc_parameters.stress_threshold: number,

    TariffRate => trade_parameters.tariff_rate: number,
    CustomsEfficiency => trade_parameters.customs_efficiency: number,
    ExchangeRateRegime => trade_parameters.exchange_rate_regime: regime,
    ExchangeRateTarget => trade_parameters.exchange_rate_target: number,
    CapitalFlowControl => trade_parameters.capital_flow_control: number,
    CbdcTradeSettlement => trade_parameters.cbdc_trade_settlement: number,
    InterventionBand => trade_parameters.intervention_band: number,

    CapitalRequirement => banking_parameters.capital_requirement: number,
    ReserveRequirement => banking_parameters.reserve_requirement: number,
    LendingRiskAppetite => banking_parameters.lending_risk_appetite: number,
    CbdcDisintermediation => banking_parameters.cbdc_disintermediation: number,
    QuantitativeEasing => banking_parameters.quantitative_easing: number,
}

impl PolicyPath {
    fn type_error(self, expected: &'static str) -> ValidationError {
        ValidationError::PolicyValueType {
            path: self.to_string(),
            expected,
        }
    }
}

impl fmt::Display for PolicyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.group(), self.field())
    }
}

impl FromStr for PolicyPath {
    type Err = ValidationError;

    /// Accepts `group.field` or a bare `field` (field names are unique across groups).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let found = match key.split_once('.') {
            Some((group, field)) => PolicyPath::ALL
                .iter()
                .find(|p| p.group() == group && p.field() == field),
            None => PolicyPath::ALL.iter().find(|p| p.field() == key),
        };
        found
            .copied()
            .ok_or_else(|| ValidationError::UnknownPolicyPath(s.to_string()))
    }
}

impl ParameterSet {
    /// Merge one batch of policy changes and re-validate the result.
    pub fn apply_policy(
        &mut self,
        changes: &BTreeMap<PolicyPath, PolicyValue>,
    ) -> Result<(), ValidationError> {
        for (path, value) in changes {
            path.assign(self, value)?;
        }
        self.validate()
    }
}

// ─── Configuration ───────────────────────────────────────────────────────────

/// Policy changes keyed by time index, then by parameter.
pub type PolicySchedule = BTreeMap<u32, BTreeMap<PolicyPath, PolicyValue>>;
/// Additive state perturbations keyed by time index, then by field.
pub type ShockSchedule = BTreeMap<u32, BTreeMap<StateField, f64>>;

/// Everything one run needs. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration", into = "RawConfiguration")]
pub struct Configuration {
    time_horizon: u32,
    random_seed: u64,
    initial_state: EconomicState,
    /// `initial_state` with the index-0 shocks applied.
    opening_state: EconomicState,
    parameters: ParameterSet,
    policy_changes: PolicySchedule,
    shocks: ShockSchedule,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    pub fn time_horizon(&self) -> u32 {
        self.time_horizon
    }

    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }

    pub fn initial_state(&self) -> &EconomicState {
        &self.initial_state
    }

    /// State at index 0 of every run. Level parameters are scaled against
    /// its potential output.
    pub fn opening_state(&self) -> &EconomicState {
        &self.opening_state
    }

    /// Parameter groups in force before any policy change.
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    pub fn policy_changes(&self) -> &PolicySchedule {
        &self.policy_changes
    }

    pub fn shocks(&self) -> &ShockSchedule {
        &self.shocks
    }

    pub fn policy_changes_at(&self, index: u32) -> Option<&BTreeMap<PolicyPath, PolicyValue>> {
        self.policy_changes.get(&index)
    }

    pub fn shocks_at(&self, index: u32) -> Option<&BTreeMap<StateField, f64>> {
        self.shocks.get(&index)
    }

    /// Same configuration with a different seed.
    pub fn with_seed(&self, random_seed: u64) -> Configuration {
        Configuration {
            random_seed,
            ..self.clone()
        }
    }

    pub fn from_json(json: &str) -> Result<Configuration, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Adds one batch of shocks to a state.
pub(crate) fn apply_shocks(state: &mut EconomicState, shocks: &BTreeMap<StateField, f64>) {
    for (&field, &delta) in shocks {
        *state.get_mut(field) += delta;
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ConfigurationBuilder {
    time_horizon: u32,
    random_seed: u64,
    initial_state: EconomicState,
    parameters: ParameterSet,
    policy_changes: PolicySchedule,
    shocks: ShockSchedule,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self {
            time_horizon: DEFAULT_TIME_HORIZON,
            random_seed: DEFAULT_RANDOM_SEED,
            initial_state: EconomicState::default(),
            parameters: ParameterSet::default(),
            policy_changes: BTreeMap::new(),
            shocks: BTreeMap::new(),
        }
    }

    pub fn time_horizon(mut self, steps: u32) -> Self {
        self.time_horizon = steps;
        self
    }

    pub fn random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn initial_state(mut self, state: EconomicState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn parameters(mut self, parameters: ParameterSet) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn macro_parameters(mut self, p: MacroParameters) -> Self {
        self.parameters.macro_parameters = p;
        self
    }

    pub fn cbdc_parameters(mut self, p: CbdcParameters) -> Self {
        self.parameters.cbdc_parameters = p;
        self
    }

    pub fn trade_parameters(mut self, p: TradeParameters) -> Self {
        self.parameters.trade_parameters = p;
        self
    }

    pub fn banking_parameters(mut self, p: BankingParameters) -> Self {
        self.parameters.banking_parameters = p;
        self
    }

    /// Schedule `path = value` from `index` onward. A later call for the same
    /// index and path replaces the earlier one.
    pub fn policy_change(mut self, index: u32, path: PolicyPath, value: impl Into<PolicyValue>) -> Self {
        self.policy_changes
            .entry(index)
            .or_default()
            .insert(path, value.into());
        self
    }

    /// Schedule an additive perturbation of `field` for step `index` only.
    /// Repeated calls for the same index and field accumulate.
    pub fn shock(mut self, index: u32, field: StateField, delta: f64) -> Self {
        *self.shocks.entry(index).or_default().entry(field).or_insert(0.0) += delta;
        self
    }

    pub fn build(self) -> Result<Configuration, ValidationError> {
        if self.time_horizon == 0 {
            return Err(ValidationError::ZeroHorizon);
        }
        self.parameters.validate()?;

        let mut initial_state = self.initial_state;
        initial_state.period = 0;
        check_initial_state(&initial_state)?;

        let mut scratch = self.parameters.clone();
        for (&index, changes) in &self.policy_changes {
            check_index("policy change", index, self.time_horizon)?;
            scratch
                .apply_policy(changes)
                .map_err(|source| ValidationError::PolicyChange {
                    index,
                    source: Box::new(source),
                })?;
        }

        for (&index, deltas) in &self.shocks {
            check_index("shock", index, self.time_horizon)?;
            if let Some((field, _)) = deltas.iter().find(|(_, d)| !d.is_finite()) {
                return Err(ValidationError::NonFiniteShock {
                    field: field.name().to_string(),
                    index,
                });
            }
        }
        let mut opening_state = initial_state.clone();
        if let Some(deltas) = self.shocks.get(&0) {
            apply_shocks(&mut opening_state, deltas);
            check_initial_state(&opening_state)?;
        }

        Ok(Configuration {
            time_horizon: self.time_horizon,
            random_seed: self.random_seed,
            initial_state,
            opening_state,
            parameters: self.parameters,
            policy_changes: self.policy_changes,
            shocks: self.shocks,
        })
    }
}

fn check_index(kind: &'static str, index: u32, horizon: u32) -> Result<(), ValidationError> {
    if index > horizon {
        Err(ValidationError::BeyondHorizon { kind, index, horizon })
    } else {
        Ok(())
    }
}

fn check_initial_state(state: &EconomicState) -> Result<(), ValidationError> {
    match state.first_violation() {
        Some((field, value)) => Err(ValidationError::InitialState {
            field: field.name().to_string(),
            value,
        }),
        None => Ok(()),
    }
}

// ─── Serialized form ─────────────────────────────────────────────────────────

/// Document form of a configuration, as produced by a config file or UI form.
/// Policy keys are dotted parameter paths and shock keys are state field
/// names; both are checked when converting into a [`Configuration`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfiguration {
    #[serde(default = "default_time_horizon")]
    pub time_horizon: u32,
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    #[serde(default)]
    pub initial_state: EconomicState,
    #[serde(default)]
    pub macro_parameters: MacroParameters,
    #[serde(default)]
    pub cbdc_parameters: CbdcParameters,
    #[serde(default)]
    pub trade_parameters: TradeParameters,
    #[serde(default)]
    pub banking_parameters: BankingParameters,
    #[serde(default)]
    pub policy_changes: BTreeMap<u32, BTreeMap<String, PolicyValue>>,
    #[serde(default)]
    pub shocks: BTreeMap<u32, BTreeMap<String, f64>>,
}

fn default_time_horizon() -> u32 {
    DEFAULT_TIME_HORIZON
}

fn default_random_seed() -> u64 {
    DEFAULT_RANDOM_SEED
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = ValidationError;

    fn try_from(raw: RawConfiguration) -> Result<Self, Self::Error> {
        let mut builder = ConfigurationBuilder::new()
            .time_horizon(raw.time_horizon)
            .random_seed(raw.random_seed)
            .initial_state(raw.initial_state)
            .parameters(ParameterSet {
                macro_parameters: raw.macro_parameters,
                cbdc_parameters: raw.cbdc_parameters,
                trade_parameters: raw.trade_parameters,
                banking_parameters: raw.banking_parameters,
            });

        for (index, changes) in raw.policy_changes {
            for (key, value) in changes {
                let path: PolicyPath = key.parse()?;
                builder = builder.policy_change(index, path, value);
            }
        }
        for (index, deltas) in raw.shocks {
            for (key, delta) in deltas {
                let field: StateField = key
                    .parse()
                    .map_err(|_| ValidationError::UnknownStateField(key.clone()))?;
                builder = builder.shock(index, field, delta);
            }
        }
        builder.build()
    }
}

impl From<Configuration> for RawConfiguration {
    fn from(config: Configuration) -> Self {
        let ParameterSet {
            macro_parameters,
            cbdc_parameters,
            trade_parameters,
            banking_parameters,
        } = config.parameters;
        RawConfiguration {
            time_horizon: config.time_horizon,
            random_seed: config.random_seed,
            initial_state: config.initial_state,
            macro_parameters,
            cbdc_parameters,
            trade_parameters,
            banking_parameters,
            policy_changes: config
                .policy_changes
                .into_iter()
                .map(|(i, changes)| {
                    (i, changes.into_iter().map(|(p, v)| (p.to_string(), v)).collect())
                })
                .collect(),
            shocks: config
                .shocks
                .into_iter()
                .map(|(i, deltas)| {
                    (i, deltas.into_iter().map(|(f, d)| (f.name().to_string(), d)).collect())
                })
                .collect(),
        }
    }
}
