// Copyright 2026 Hypermesh Foundation. All rights reserved.
// CBDC Policy Simulation Engine - Preset Scenarios

//! Ready-made configurations for the standard policy experiments.

use crate::config::{Configuration, ConfigurationBuilder, PolicyPath, ValidationError};
use crate::types::StateField;

/// Horizon of the preset experiments: ten years of quarters.
pub const PRESET_HORIZON: u32 = 40;
pub const PRESET_SEED: u64 = 42;

fn preset() -> ConfigurationBuilder {
    Configuration::builder()
        .time_horizon(PRESET_HORIZON)
        .random_seed(PRESET_SEED)
}

/// No CBDC remuneration, no programmable features, no schedule.
pub fn baseline(horizon: u32) -> Result<Configuration, ValidationError> {
    Configuration::builder().time_horizon(horizon).build()
}

/// Phased CBDC rollout: launch, programmable features, fiscal use, then
/// emergency tooling after a recession shock.
pub fn cbdc_adoption() -> Result<Configuration, ValidationError> {
    preset()
        // Launch
        .policy_change(1, PolicyPath::CbdcInterestRate, 0.5)
        .shock(1, StateField::CbdcSupply, 500.0)
        // Programmable features
        .policy_change(4, PolicyPath::ValidityPeriodDays, 180.0)
        .policy_change(4, PolicyPath::ConditionalSpendingConstraint, 0.1)
        .policy_change(4, PolicyPath::SmartContractLending, 0.2)
        // Full deployment
        .policy_change(8, PolicyPath::CbdcInterestRate, 1.0)
        .policy_change(8, PolicyPath::AutomaticFiscalTransfer, 200.0)
        .policy_change(8, PolicyPath::AssetPurchaseIntensity, 0.3)
        .policy_change(8, PolicyPath::FxControlIntensity, 0.3)
        // Recession
        .shock(10, StateField::Output, -1000.0)
        .shock(10, StateField::InflationRate, 1.5)
        .shock(10, StateField::UnemploymentRate, 2.0)
        // Crisis response
        .policy_change(12, PolicyPath::EmergencyOverride, true)
        .policy_change(12, PolicyPath::MacroprudentialIntensity, 0.5)
        .policy_change(12, PolicyPath::AutomaticFiscalTransfer, 500.0)
        .build()
}

/// Escalating tariffs and capital controls, CBDC trade settlement as a
/// workaround, then partial de-escalation.
pub fn trade_war() -> Result<Configuration, ValidationError> {
    preset()
        .policy_change(2, PolicyPath::TariffRate, 0.15)
        .policy_change(2, PolicyPath::FxControlIntensity, 0.2)
        .shock(4, StateField::NetExports, -500.0)
        .policy_change(6, PolicyPath::TariffRate, 0.25)
        .policy_change(6, PolicyPath::FxControlIntensity, 0.4)
        .policy_change(10, PolicyPath::CbdcTradeSettlement, 0.5)
        .policy_change(14, PolicyPath::TariffRate, 0.1)
        .policy_change(14, PolicyPath::FxControlIntensity, 0.1)
        .build()
}

/// Credit boom, macroprudential tightening, a bank-run shock, then
/// emergency CBDC measures.
pub fn banking_crisis() -> Result<Configuration, ValidationError> {
    preset()
        .policy_change(2, PolicyPath::LendingRiskAppetite, 0.7)
        .policy_change(5, PolicyPath::MacroprudentialIntensity, 0.2)
        .shock(8, StateField::BankLoans, -2000.0)
        .shock(8, StateField::BankDeposits, -1500.0)
        .shock(8, StateField::FinancialStressIndex, 0.3)
        .policy_change(9, PolicyPath::EmergencyOverride, true)
        .policy_change(9, PolicyPath::CbdcInterestRate, 1.0)
        .policy_change(9, PolicyPath::SmartContractLending, 0.8)
        .policy_change(9, PolicyPath::QuantitativeEasing, 0.05)
        .policy_change(12, PolicyPath::CbdcInterestRate, 0.5)
        .policy_change(12, PolicyPath::AutomaticFiscalTransfer, 300.0)
        .build()
}

/// Preset by name, as offered to a UI.
pub fn by_name(name: &str) -> Option<Result<Configuration, ValidationError>> {
    match name {
        "baseline" => Some(baseline(PRESET_HORIZON)),
        "cbdc_adoption" => Some(cbdc_adoption()),
        "trade_war" => Some(trade_war()),
        "banking_crisis" => Some(banking_crisis()),
        _ => None,
    }
}

pub const PRESET_NAMES: &[&str] = &["baseline", "cbdc_adoption", "trade_war", "banking_crisis"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for name in PRESET_NAMES {
            let config = by_name(name)
                .expect("test: listed preset exists")
                .unwrap_or_else(|e| panic!("{name} failed validation: {e}"));
            assert!(config.time_horizon() >= 1);
        }
        assert!(by_name("hyperinflation").is_none());
    }

    #[test]
    fn test_adoption_preset_schedules_emergency_tools() {
        let config = cbdc_adoption().unwrap();
        let at12 = config.policy_changes_at(12).unwrap();
        assert!(at12.contains_key(&PolicyPath::EmergencyOverride));
        assert_eq!(config.shocks_at(10).map(|s| s.len()), Some(3));
    }
}
