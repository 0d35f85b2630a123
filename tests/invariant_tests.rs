use cbdc_engine::{run, BankingParameters, CbdcParameters, Configuration, PolicyPath, RunResult, TradeParameters};
use proptest::prelude::*;

fn committed(outcome: &Result<RunResult, cbdc_engine::RunFailure>) -> &RunResult {
    match outcome {
        Ok(result) => result,
        Err(failure) => &failure.partial,
    }
}

prop_compose! {
    fn cbdc_params()(
        rate in 0.0..3.0f64,
        validity in prop::sample::select(vec![30.0, 90.0, 180.0, 365.0]),
        constraint in 0.0..0.6f64,
        smart in 0.0..1.0f64,
        fx in 0.0..1.0f64,
        assets in 0.0..0.5f64,
        macroprudential in 0.0..1.0f64,
        emergency in any::<bool>(),
    ) -> CbdcParameters {
        CbdcParameters {
            cbdc_interest_rate: rate,
            validity_period_days: validity,
            conditional_spending_constraint: constraint,
            smart_contract_lending: smart,
            fx_control_intensity: fx,
            asset_purchase_intensity: assets,
            macroprudential_intensity: macroprudential,
            emergency_override: emergency,
            ..Default::default()
        }
    }
}

prop_compose! {
    fn banking_params()(
        disintermediation in 0.0..1.0f64,
        qe in 0.0..0.5f64,
        appetite in 0.0..1.0f64,
    ) -> BankingParameters {
        BankingParameters {
            cbdc_disintermediation: disintermediation,
            quantitative_easing: qe,
            lending_risk_appetite: appetite,
            ..Default::default()
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn committed_states_are_always_plausible(
        c in cbdc_params(),
        b in banking_params(),
        tariff in 0.0..0.3f64,
        seed in any::<u64>(),
    ) {
        let config = Configuration::builder()
            .time_horizon(24)
            .random_seed(seed)
            .cbdc_parameters(c)
            .banking_parameters(b)
            .trade_parameters(TradeParameters { tariff_rate: tariff, ..Default::default() })
            .build()
            .unwrap();
        let outcome = run(&config);
        let result = committed(&outcome);

        prop_assert_eq!(result.traces().len() + 1, result.history().len());
        for state in result.history() {
            prop_assert_eq!(state.first_violation(), None);
            prop_assert!((0.0..=1.0).contains(&state.cbdc_adoption));
            prop_assert!(state.bank_deposits >= 0.0);
        }
        if let Err(failure) = &outcome {
            prop_assert_eq!(failure.error.step() as usize, result.history().len());
        }
    }

    #[test]
    fn reruns_agree(seed in any::<u64>(), rate in 0.0..2.0f64, at in 1u32..12) {
        let config = Configuration::builder()
            .time_horizon(12)
            .random_seed(seed)
            .policy_change(at, PolicyPath::CbdcInterestRate, rate)
            .build()
            .unwrap();
        let a = run(&config);
        let b = run(&config);
        prop_assert_eq!(committed(&a), committed(&b));
    }
}
