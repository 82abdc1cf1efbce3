//! Property tests for the valuation run loop
//!
//! Invariants checked over generated schedules:
//! - Volume stays within [0, total_capacity] after every event
//! - Accepted injections minus accepted withdrawals equals final volume
//! - Input list order does not change the result
//! - Raising capacity never turns an accepted injection into a rejection

use chrono::{Duration, NaiveDate};
use gas_storage_core_rs::{
    value_contract, ContractEvent, ContractParameters, PriceSchedule, Valuation,
};
use proptest::prelude::*;

type Pairs = Vec<(NaiveDate, f64)>;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
}

/// Disjoint injection and withdrawal dates within two years
fn schedules() -> impl Strategy<Value = (Pairs, Pairs)> {
    prop::collection::btree_map(0i64..730, (any::<bool>(), 1u32..1000), 0..40).prop_map(
        |events| {
            let mut injections = Vec::new();
            let mut withdrawals = Vec::new();
            for (offset, (is_injection, cents)) in events {
                let pair = (base_date() + Duration::days(offset), cents as f64 / 100.0);
                if is_injection {
                    injections.push(pair);
                } else {
                    withdrawals.push(pair);
                }
            }
            (injections, withdrawals)
        },
    )
}

fn params(rate: f64, slots: u32) -> ContractParameters {
    ContractParameters {
        rate,
        total_capacity: rate * slots as f64,
        storage_cost_rate: 0.001,
        transfer_cost_rate: 0.01,
        ..Default::default()
    }
}

fn run(injections: &Pairs, withdrawals: &Pairs, params: ContractParameters) -> Valuation {
    value_contract(
        &PriceSchedule::from_pairs(injections.iter().copied()).unwrap(),
        &PriceSchedule::from_pairs(withdrawals.iter().copied()).unwrap(),
        params,
    )
    .unwrap()
}

fn accepted_injection_dates(valuation: &Valuation) -> Vec<NaiveDate> {
    valuation
        .event_log
        .events_of_type("Injection")
        .iter()
        .map(|e| e.date())
        .collect()
}

proptest! {
    #[test]
    fn prop_volume_within_capacity(
        (injections, withdrawals) in schedules(),
        rate in 1u32..2000,
        slots in 1u32..5,
    ) {
        let params = params(rate as f64, slots);
        let capacity = params.total_capacity;
        let valuation = run(&injections, &withdrawals, params);

        for event in valuation.event_log.events() {
            match event {
                ContractEvent::Injection { volume_after, .. }
                | ContractEvent::Withdrawal { volume_after, .. } => {
                    prop_assert!(*volume_after >= 0.0 && *volume_after <= capacity);
                }
                ContractEvent::InjectionRejected { volume, .. }
                | ContractEvent::WithdrawalRejected { volume, .. }
                | ContractEvent::HoldingCost { volume, .. } => {
                    prop_assert!(*volume >= 0.0 && *volume <= capacity);
                }
            }
        }
        prop_assert!(valuation.peak_volume <= capacity);
    }

    #[test]
    fn prop_volume_is_conserved(
        (injections, withdrawals) in schedules(),
        rate in 1u32..2000,
        slots in 1u32..5,
    ) {
        let rate = rate as f64;
        let valuation = run(&injections, &withdrawals, params(rate, slots));

        let injected = valuation.count("Injection") as f64 * rate;
        let withdrawn = valuation.count("Withdrawal") as f64 * rate;
        prop_assert_eq!(injected - withdrawn, valuation.final_volume);
    }

    #[test]
    fn prop_input_order_does_not_matter(
        ((injections, withdrawals), shuffled_injections, shuffled_withdrawals) in schedules()
            .prop_flat_map(|(inj, wd)| {
                (
                    Just((inj.clone(), wd.clone())),
                    Just(inj).prop_shuffle(),
                    Just(wd).prop_shuffle(),
                )
            }),
    ) {
        let original = run(&injections, &withdrawals, params(1000.0, 3));
        let shuffled = run(&shuffled_injections, &shuffled_withdrawals, params(1000.0, 3));

        prop_assert_eq!(original.contract_value, shuffled.contract_value);
        prop_assert_eq!(original.event_log, shuffled.event_log);
    }

    #[test]
    fn prop_more_capacity_never_rejects_more_injections(
        (injections, withdrawals) in schedules(),
        slots in 1u32..4,
        extra in 1u32..4,
    ) {
        let smaller = run(&injections, &withdrawals, params(1000.0, slots));
        let larger = run(&injections, &withdrawals, params(1000.0, slots + extra));

        let accepted_large = accepted_injection_dates(&larger);
        for date in accepted_injection_dates(&smaller) {
            prop_assert!(accepted_large.contains(&date));
        }
    }
}

#[test]
fn test_zero_events_value_zero() {
    let valuation = run(&Vec::new(), &Vec::new(), params(1000.0, 2));
    assert_eq!(valuation.contract_value, 0.0);
    assert_eq!(valuation.final_volume, 0.0);
}
