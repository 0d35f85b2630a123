// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Economic State

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound used for stock and flow quantities that have no natural ceiling.
const OPEN: f64 = 1.0e12;

// ---------------------------------------------------------------------------
// EconomicState + StateField
// ---------------------------------------------------------------------------

/// Declares every real-valued state field exactly once, together with its
/// plausible range, and derives both the `EconomicState` struct and the
/// closed `StateField` enumeration from that list.
macro_rules! economic_state {
    ($( $(#[$doc:meta])* $field:ident => $variant:ident [$min:expr, $max:expr] ),+ $(,)?) => {
        /// One snapshot of the simulated economy at the end of a quarter.
        ///
        /// Rates (inflation, unemployment, interest) are in percent; stocks
        /// and flows are in model currency units.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct EconomicState {
            /// Number of transitions that produced this state (0 = initial).
            pub period: u32,
            $( $(#[$doc])* pub $field: f64, )+
        }

        /// Closed set of state field names. Used for shock keys, divergence
        /// reports and column access on a run result.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum StateField {
            $( $variant, )+
        }

        impl StateField {
            /// Every field, in declaration (column) order.
            pub const ALL: &'static [StateField] = &[$( StateField::$variant, )+];

            pub fn name(self) -> &'static str {
                match self {
                    $( StateField::$variant => stringify!($field), )+
                }
            }

            /// Inclusive range a committed value must fall in.
            pub fn plausible_range(self) -> (f64, f64) {
                match self {
                    $( StateField::$variant => ($min, $max), )+
                }
            }
        }

        impl EconomicState {
            pub fn get(&self, field: StateField) -> f64 {
                match field {
                    $( StateField::$variant => self.$field, )+
                }
            }

            pub fn get_mut(&mut self, field: StateField) -> &mut f64 {
                match field {
                    $( StateField::$variant => &mut self.$field, )+
                }
            }
        }
    };
}

economic_state! {
    /// Real output (GDP).
    output => Output [1.0, OPEN],
    potential_output => PotentialOutput [1.0, OPEN],
    /// (output - potential) / potential, in percent.
    output_gap => OutputGap [-100.0, 1000.0],
    price_level => PriceLevel [1.0e-3, 1.0e3],
    inflation_rate => InflationRate [-50.0, 100.0],
    expected_inflation => ExpectedInflation [-50.0, 100.0],
    unemployment_rate => UnemploymentRate [0.0, 100.0],
    /// Short-term money-market rate.
    interest_rate => InterestRate [-10.0, 50.0],
    /// Domestic currency per unit of foreign currency.
    exchange_rate => ExchangeRate [1.0e-6, 100.0],
    wage_level => WageLevel [1.0e-3, 1.0e3],
    capital_stock => CapitalStock [0.0, OPEN],
    technology_level => TechnologyLevel [1.0e-3, 1.0e3],
    consumer_confidence => ConsumerConfidence [0.0, 200.0],
    business_confidence => BusinessConfidence [0.0, 200.0],
    financial_stress_index => FinancialStressIndex [0.0, 10.0],
    cbdc_supply => CbdcSupply [0.0, OPEN],
    /// Share of the public holding CBDC, [0, 1].
    cbdc_adoption => CbdcAdoption [0.0, 1.0],
    /// Forced turnover implied by the programmable validity period.
    cbdc_velocity => CbdcVelocity [1.0, 365.0 / 30.0],
    bank_deposits => BankDeposits [0.0, OPEN],
    bank_loans => BankLoans [0.0, OPEN],
    bank_reserves => BankReserves [0.0, OPEN],
    bank_capital => BankCapital [0.0, OPEN],
    deposit_rate => DepositRate [0.0, 50.0],
    money_supply => MoneySupply [0.0, OPEN],
    base_money => BaseMoney [0.0, OPEN],
    foreign_reserves => ForeignReserves [0.0, OPEN],
    consumption => Consumption [0.0, OPEN],
    investment => Investment [-OPEN, OPEN],
    government_spending => GovernmentSpending [0.0, OPEN],
    net_exports => NetExports [-OPEN, OPEN],
    tax_revenue => TaxRevenue [0.0, OPEN],
    budget_deficit => BudgetDeficit [-OPEN, OPEN],
    government_debt => GovernmentDebt [-OPEN, OPEN],
}

impl Default for EconomicState {
    /// Calibrated starting point: an economy on its trend path with no CBDC.
    fn default() -> Self {
        Self {
            period: 0,
            output: 20000.0,
            potential_output: 20000.0,
            output_gap: 0.0,
            price_level: 1.0,
            inflation_rate: 2.0,
            expected_inflation: 2.0,
            unemployment_rate: 4.0,
            interest_rate: 2.5,
            exchange_rate: 1.0,
            wage_level: 1.0,
            capital_stock: 60000.0,
            technology_level: 1.0,
            consumer_confidence: 100.0,
            business_confidence: 100.0,
            financial_stress_index: 0.27,
            cbdc_supply: 0.0,
            cbdc_adoption: 0.0,
            cbdc_velocity: 1.0,
            bank_deposits: 18000.0,
            bank_loans: 15000.0,
            bank_reserves: 1000.0,
            bank_capital: 1800.0,
            deposit_rate: 0.5,
            money_supply: 20000.0,
            base_money: 2000.0,
            foreign_reserves: 5000.0,
            consumption: 11290.0,
            investment: 1830.0,
            government_spending: 4000.0,
            net_exports: -40.0,
            // 17.5% income tax plus 5% tariff on imports of 20% of output.
            tax_revenue: 3700.0,
            budget_deficit: 300.0,
            government_debt: 20000.0,
        }
    }
}

impl EconomicState {
    /// First field that is non-finite or outside its plausible range.
    pub fn first_violation(&self) -> Option<(StateField, f64)> {
        StateField::ALL.iter().find_map(|&field| {
            let value = self.get(field);
            let (min, max) = field.plausible_range();
            if value.is_finite() && value >= min && value <= max {
                None
            } else {
                Some((field, value))
            }
        })
    }
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a string that names no state field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown state field `{0}`")]
pub struct UnknownStateField(pub String);

impl FromStr for StateField {
    type Err = UnknownStateField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key == "gdp" {
            return Ok(StateField::Output);
        }
        StateField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == key)
            .ok_or_else(|| UnknownStateField(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ExchangeRateRegime
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeRateRegime {
    #[default]
    Floating,
    /// Floating inside a band around the target; excursions are partially corrected.
    Managed,
    /// Pegged to the target; the central bank absorbs pressure with reserves.
    Fixed,
}

impl fmt::Display for ExchangeRateRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExchangeRateRegime::Floating => "floating",
            ExchangeRateRegime::Managed => "managed",
            ExchangeRateRegime::Fixed => "fixed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_plausible() {
        let state = EconomicState::default();
        assert_eq!(state.first_violation(), None, "calibrated initial state must be in range");
    }

    #[test]
    fn test_field_names_round_trip_through_from_str() {
        for &field in StateField::ALL {
            let parsed: StateField = field.name().parse().expect("test: declared name parses");
            assert_eq!(parsed, field);
        }
    }

    #[test]
    fn test_gdp_alias_maps_to_output() {
        assert_eq!("gdp".parse::<StateField>(), Ok(StateField::Output));
        assert!("gross_domestic_happiness".parse::<StateField>().is_err());
    }

    #[test]
    fn test_serde_name_matches_field_name() {
        let json = serde_json::to_string(&StateField::FinancialStressIndex).unwrap();
        assert_eq!(json, "\"financial_stress_index\"");
    }

    #[test]
    fn test_first_violation_reports_nan_and_out_of_range() {
        let mut state = EconomicState::default();
        state.cbdc_adoption = 1.2;
        assert_eq!(state.first_violation(), Some((StateField::CbdcAdoption, 1.2)));

        let mut state = EconomicState::default();
        state.interest_rate = f64::NAN;
        let (field, value) = state.first_violation().expect("test: NaN is a violation");
        assert_eq!(field, StateField::InterestRate);
        assert!(value.is_nan());
    }

    #[test]
    fn test_get_mut_writes_through() {
        let mut state = EconomicState::default();
        *state.get_mut(StateField::BankDeposits) -= 500.0;
        assert_eq!(state.bank_deposits, 17500.0);
    }

    #[test]
    fn test_partial_json_state_fills_defaults() {
        let state: EconomicState = serde_json::from_str(r#"{"output": 25000.0}"#).unwrap();
        assert_eq!(state.output, 25000.0);
        assert_eq!(state.unemployment_rate, 4.0);
    }

    #[test]
    fn test_regime_names_match_serde() {
        for regime in [ExchangeRateRegime::Floating, ExchangeRateRegime::Managed, ExchangeRateRegime::Fixed] {
            let json = serde_json::to_string(&regime).unwrap();
            assert_eq!(json, format!("\"{regime}\""));
            assert_eq!(serde_json::from_str::<ExchangeRateRegime>(&json).unwrap(), regime);
        }
        assert!(serde_json::from_str::<ExchangeRateRegime>("\"Managed\"").is_err());
        assert!(serde_json::from_str::<ExchangeRateRegime>("\"crawling\"").is_err());
    }
}
