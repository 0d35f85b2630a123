// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Parameter Groups

//! Typed parameter bundles for the four policy domains.
//!
//! Each group carries calibrated defaults and a `validate()` that rejects
//! values outside their economically meaningful range. Groups are plain
//! data; the engine reads them and only policy changes write them.

use crate::config::ValidationError;
use crate::types::ExchangeRateRegime;
use serde::{Deserialize, Serialize};

/// Upper bound for levels with no natural ceiling.
const OPEN: f64 = 1.0e12;
/// Floor for any interest-rate style parameter (percent).
const RATE_FLOOR: f64 = -10.0;
/// Ceiling for any interest-rate style parameter (percent).
const RATE_CEILING: f64 = 50.0;

fn check(group: &str, name: &str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: format!("{group}.{name}"),
            value,
            min,
            max,
        })
    }
}

// ---------------------------------------------------------------------------
// MacroParameters
// ---------------------------------------------------------------------------

/// Behavioural coefficients of the aggregate-demand, labour and money blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroParameters {
    pub autonomous_consumption: f64,
    pub marginal_propensity_to_consume: f64,
    /// Share of current-period income that feeds back into spending within the quarter.
    pub income_share_feedback: f64,
    pub autonomous_investment: f64,
    /// Investment lost per point of the lagged interest rate.
    pub investment_interest_sensitivity: f64,
    pub innovation_sensitivity: f64,
    /// Money demand `k` in `M/P = kY - hr`.
    pub money_demand_income_elasticity: f64,
    /// Money demand `h` in `M/P = kY - hr`.
    pub money_demand_interest_sensitivity: f64,
    pub phillips_curve_slope: f64,
    pub okun_coefficient: f64,
    pub natural_unemployment: f64,
    /// Annual trend growth of potential output (fraction).
    pub potential_output_growth: f64,
    /// Annual labour productivity growth (fraction).
    pub productivity_growth: f64,
    /// Half-width of the uniform quarterly disturbance to potential output.
    pub potential_output_volatility: f64,
    /// Weight on last period's expectation when updating expected inflation.
    pub adaptive_expectations_weight: f64,
    pub inflation_target: f64,
    /// Pull of expectations toward the inflation target, [0, 1].
    pub expectations_anchoring: f64,
    pub foreign_interest_rate: f64,
    pub import_propensity: f64,
    pub autonomous_exports: f64,
    pub export_exchange_elasticity: f64,
    pub government_spending: f64,
    pub tax_rate: f64,
    /// Annual depreciation rate of the capital stock.
    pub capital_depreciation: f64,
}

impl Default for MacroParameters {
    fn default() -> Self {
        Self {
            autonomous_consumption: 1500.0,
            marginal_propensity_to_consume: 0.6,
            income_share_feedback: 0.25,
            autonomous_investment: 1970.0,
            investment_interest_sensitivity: 100.0,
            innovation_sensitivity: 1.0,
            money_demand_income_elasticity: 1.05,
            money_demand_interest_sensitivity: 400.0,
            phillips_curve_slope: 0.5,
            okun_coefficient: 0.5,
            natural_unemployment: 4.0,
            potential_output_growth: 0.025,
            productivity_growth: 0.02,
            potential_output_volatility: 0.001,
            adaptive_expectations_weight: 0.7,
            inflation_target: 2.0,
            expectations_anchoring: 0.1,
            foreign_interest_rate: 2.5,
            import_propensity: 0.2,
            autonomous_exports: 4000.0,
            export_exchange_elasticity: 0.3,
            government_spending: 4000.0,
            tax_rate: 0.175,
            capital_depreciation: 0.1,
        }
    }
}

impl MacroParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let g = "macro_parameters";
        check(g, "autonomous_consumption", self.autonomous_consumption, 0.0, OPEN)?;
        check(g, "marginal_propensity_to_consume", self.marginal_propensity_to_consume, 0.0, 1.0)?;
        check(g, "income_share_feedback", self.income_share_feedback, 0.0, 1.0)?;
        check(g, "autonomous_investment", self.autonomous_investment, 0.0, OPEN)?;
        check(g, "investment_interest_sensitivity", self.investment_interest_sensitivity, 0.0, OPEN)?;
        check(g, "innovation_sensitivity", self.innovation_sensitivity, 0.0, 10.0)?;
        check(g, "money_demand_income_elasticity", self.money_demand_income_elasticity, 0.01, 10.0)?;
        // h divides the money-market solution, so zero is excluded.
        check(g, "money_demand_interest_sensitivity", self.money_demand_interest_sensitivity, 1.0, OPEN)?;
        check(g, "phillips_curve_slope", self.phillips_curve_slope, 0.0, 5.0)?;
        check(g, "okun_coefficient", self.okun_coefficient, 0.0, 5.0)?;
        check(g, "natural_unemployment", self.natural_unemployment, 0.0, 100.0)?;
        check(g, "potential_output_growth", self.potential_output_growth, -0.2, 0.5)?;
        check(g, "productivity_growth", self.productivity_growth, -0.2, 0.5)?;
        check(g, "potential_output_volatility", self.potential_output_volatility, 0.0, 0.05)?;
        check(g, "adaptive_expectations_weight", self.adaptive_expectations_weight, 0.0, 1.0)?;
        check(g, "inflation_target", self.inflation_target, RATE_FLOOR, RATE_CEILING)?;
        check(g, "expectations_anchoring", self.expectations_anchoring, 0.0, 1.0)?;
        check(g, "foreign_interest_rate", self.foreign_interest_rate, RATE_FLOOR, RATE_CEILING)?;
        check(g, "import_propensity", self.import_propensity, 0.0, 1.0)?;
        check(g, "autonomous_exports", self.autonomous_exports, 0.0, OPEN)?;
        check(g, "export_exchange_elasticity", self.export_exchange_elasticity, 0.0, 5.0)?;
        check(g, "government_spending", self.government_spending, 0.0, OPEN)?;
        check(g, "tax_rate", self.tax_rate, 0.0, 1.0)?;
        check(g, "capital_depreciation", self.capital_depreciation, 0.0, 1.0)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CbdcParameters
// ---------------------------------------------------------------------------

/// Programmable-money features of the central bank digital currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CbdcParameters {
    /// Remuneration paid on CBDC holdings (percent).
    pub cbdc_interest_rate: f64,
    /// Days before programmable balances expire.
    pub validity_period_days: f64,
    /// Share of balances that must be spent on qualifying purchases, [0, 1].
    pub conditional_spending_constraint: f64,
    /// Transfer paid into CBDC wallets each quarter.
    pub automatic_fiscal_transfer: f64,
    pub smart_contract_lending: f64,
    pub fx_control_intensity: f64,
    pub macroprudential_intensity: f64,
    /// Allows the engine to force tighter tools for a step when stress is high.
    pub emergency_override: bool,
    /// Central bank CBDC issuance per quarter, as percent of output.
    pub asset_purchase_intensity: f64,
    /// Financial-stress level above which the emergency override engages.
    pub stress_threshold: f64,
}

impl Default for CbdcParameters {
    fn default() -> Self {
        Self {
            cbdc_interest_rate: 0.0,
            validity_period_days: 365.0,
            conditional_spending_constraint: 0.0,
            automatic_fiscal_transfer: 0.0,
            smart_contract_lending: 0.0,
            fx_control_intensity: 0.0,
            macroprudential_intensity: 0.0,
            emergency_override: false,
            asset_purchase_intensity: 0.0,
            stress_threshold: 0.5,
        }
    }
}

impl CbdcParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let g = "cbdc_parameters";
        check(g, "cbdc_interest_rate", self.cbdc_interest_rate, RATE_FLOOR, RATE_CEILING)?;
        check(g, "validity_period_days", self.validity_period_days, 1.0, 3650.0)?;
        check(g, "conditional_spending_constraint", self.conditional_spending_constraint, 0.0, 1.0)?;
        check(g, "automatic_fiscal_transfer", self.automatic_fiscal_transfer, 0.0, OPEN)?;
        check(g, "smart_contract_lending", self.smart_contract_lending, 0.0, 1.0)?;
        check(g, "fx_control_intensity", self.fx_control_intensity, 0.0, 1.0)?;
        check(g, "macroprudential_intensity", self.macroprudential_intensity, 0.0, 1.0)?;
        check(g, "asset_purchase_intensity", self.asset_purchase_intensity, 0.0, 1.0)?;
        check(g, "stress_threshold", self.stress_threshold, 0.0, 10.0)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TradeParameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradeParameters {
    /// Ad-valorem tariff on imports (fraction).
    pub tariff_rate: f64,
    pub customs_efficiency: f64,
    pub exchange_rate_regime: ExchangeRateRegime,
    pub exchange_rate_target: f64,
    pub capital_flow_control: f64,
    /// Share of trade settled in CBDC.
    pub cbdc_trade_settlement: f64,
    /// Tolerated deviation from target under the managed regime.
    pub intervention_band: f64,
}

impl Default for TradeParameters {
    fn default() -> Self {
        Self {
            tariff_rate: 0.05,
            customs_efficiency: 0.8,
            exchange_rate_regime: ExchangeRateRegime::Floating,
            exchange_rate_target: 1.0,
            capital_flow_control: 0.0,
            cbdc_trade_settlement: 0.0,
            intervention_band: 0.1,
        }
    }
}

impl TradeParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let g = "trade_parameters";
        check(g, "tariff_rate", self.tariff_rate, 0.0, 5.0)?;
        check(g, "customs_efficiency", self.customs_efficiency, 0.0, 1.0)?;
        check(g, "exchange_rate_target", self.exchange_rate_target, 1.0e-6, 100.0)?;
        check(g, "capital_flow_control", self.capital_flow_control, 0.0, 1.0)?;
        check(g, "cbdc_trade_settlement", self.cbdc_trade_settlement, 0.0, 1.0)?;
        check(g, "intervention_band", self.intervention_band, 0.0, 10.0)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BankingParameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankingParameters {
    pub capital_requirement: f64,
    pub reserve_requirement: f64,
    /// 0.5 is neutral; higher values expand lending beyond nominal growth.
    pub lending_risk_appetite: f64,
    /// How strongly deposits react to a CBDC rate above the deposit rate.
    pub cbdc_disintermediation: f64,
    /// Reserve injection per quarter, as percent of output.
    pub quantitative_easing: f64,
}

impl Default for BankingParameters {
    fn default() -> Self {
        Self {
            capital_requirement: 0.08,
            reserve_requirement: 0.02,
            lending_risk_appetite: 0.5,
            cbdc_disintermediation: 0.2,
            quantitative_easing: 0.0,
        }
    }
}

impl BankingParameters {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let g = "banking_parameters";
        check(g, "capital_requirement", self.capital_requirement, 0.0, 1.0)?;
        check(g, "reserve_requirement", self.reserve_requirement, 0.0, 1.0)?;
        check(g, "lending_risk_appetite", self.lending_risk_appetite, 0.0, 1.0)?;
        check(g, "cbdc_disintermediation", self.cbdc_disintermediation, 0.0, 1.0)?;
        check(g, "quantitative_easing", self.quantitative_easing, 0.0, 1.0)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ParameterSet
// ---------------------------------------------------------------------------

/// The four live parameter groups of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSet {
    pub macro_parameters: MacroParameters,
    pub cbdc_parameters: CbdcParameters,
    pub trade_parameters: TradeParameters,
    pub banking_parameters: BankingParameters,
}

impl ParameterSet {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.macro_parameters.validate()?;
        self.cbdc_parameters.validate()?;
        self.trade_parameters.validate()?;
        self.banking_parameters.validate()
    }

    /// Step-local copy with the emergency toolset forced on.
    pub fn with_emergency_tools(&self) -> ParameterSet {
        let mut forced = self.clone();
        forced.cbdc_parameters.macroprudential_intensity = 1.0;
        forced.cbdc_parameters.smart_contract_lending =
            forced.cbdc_parameters.smart_contract_lending.max(0.5);
        forced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        ParameterSet::default().validate().expect("test: defaults are in range");
    }

    #[test]
    fn test_out_of_range_names_dotted_field() {
        let mut params = ParameterSet::default();
        params.cbdc_parameters.conditional_spending_constraint = 1.5;
        let err = params.validate().expect_err("test: 1.5 exceeds intensity range");
        match err {
            ValidationError::OutOfRange { field, value, .. } => {
                assert_eq!(field, "cbdc_parameters.conditional_spending_constraint");
                assert_eq!(value, 1.5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_interest_rate_floor_enforced() {
        let mut params = ParameterSet::default();
        params.cbdc_parameters.cbdc_interest_rate = -12.0;
        assert!(params.validate().is_err(), "-12% is below the rate floor");
        params.cbdc_parameters.cbdc_interest_rate = -10.0;
        assert!(params.validate().is_ok(), "the floor itself is allowed");
    }

    #[test]
    fn test_nan_rejected() {
        let mut params = ParameterSet::default();
        params.banking_parameters.reserve_requirement = f64::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_emergency_tools_leave_original_untouched() {
        let mut params = ParameterSet::default();
        params.cbdc_parameters.smart_contract_lending = 0.8;
        let forced = params.with_emergency_tools();
        assert_eq!(forced.cbdc_parameters.macroprudential_intensity, 1.0);
        assert_eq!(forced.cbdc_parameters.smart_contract_lending, 0.8, "higher setting is kept");
        assert_eq!(params.cbdc_parameters.macroprudential_intensity, 0.0);
    }
}
