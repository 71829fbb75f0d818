//! Property tests for ledger invariants.
//!
//! Uses proptest to verify, over random price/dividend series and policies:
//! 1. Running totals: `total_shares` and `cumulative_dividends` never decrease
//! 2. Valuation: `current_value` is `total_shares * price` at 2dp on every row
//! 3. Ordering: ledger dates are strictly increasing
//! 4. Summary: percentage and annualized returns are always finite decimals

use analytics::AnalyticsEngine;
use chrono::{Duration, NaiveDate};
use core_types::money::round_currency;
use core_types::{DividendAccounting, Frequency, InvestmentPolicy, PriceObservation};
use proptest::prelude::*;
use rust_decimal::Decimal;
use scheduler::build_schedule;

// ── Strategies (proptest) ────────────────────────────────────────────

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn arb_price() -> impl Strategy<Value = Decimal> {
    (100i64..50_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_dividend() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        4 => Just(Decimal::ZERO),
        1 => (1i64..300).prop_map(|cents| Decimal::new(cents, 2)),
    ]
}

fn arb_observations() -> impl Strategy<Value = Vec<PriceObservation>> {
    prop::collection::vec((0i64..500, arb_price(), arb_dividend()), 0..200).prop_map(|rows| {
        rows.into_iter()
            .map(|(offset, price, dividend)| {
                PriceObservation::new(base_date() + Duration::days(offset), price)
                    .with_dividend(dividend)
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = InvestmentPolicy> {
    (
        0i64..100,
        0i64..500,
        prop_oneof![
            Just(Frequency::Daily),
            Just(Frequency::Weekly),
            Just(Frequency::Monthly)
        ],
        (1i64..100_000).prop_map(|cents| Decimal::new(cents, 2)),
        any::<bool>(),
        prop_oneof![Just(DividendAccounting::Principal), Just(DividendAccounting::Growth)],
    )
        .prop_map(|(start, span, frequency, amount, reinvest, accounting)| {
            let start_date = base_date() + Duration::days(start);
            let end_date = start_date + Duration::days(span);
            InvestmentPolicy::new("PROP", start_date, end_date, frequency, amount)
                .reinvesting(reinvest)
                .with_accounting(accounting)
        })
}

proptest! {
    #[test]
    fn running_totals_never_decrease(policy in arb_policy(), obs in arb_observations()) {
        let ledger = build_schedule(&policy, &obs);
        for w in ledger.windows(2) {
            prop_assert!(w[1].total_shares >= w[0].total_shares);
            prop_assert!(w[1].cumulative_dividends >= w[0].cumulative_dividends);
            prop_assert!(w[1].total_invested >= w[0].total_invested);
        }
    }

    #[test]
    fn current_value_matches_holdings(policy in arb_policy(), obs in arb_observations()) {
        for entry in build_schedule(&policy, &obs) {
            prop_assert_eq!(entry.current_value, round_currency(entry.total_shares * entry.price));
        }
    }

    #[test]
    fn dates_strictly_increase_within_policy(policy in arb_policy(), obs in arb_observations()) {
        let ledger = build_schedule(&policy, &obs);
        for w in ledger.windows(2) {
            prop_assert!(w[0].date < w[1].date);
        }
        for entry in &ledger {
            prop_assert!(entry.date >= policy.start_date && entry.date <= policy.end_date);
        }
    }

    #[test]
    fn building_is_deterministic(policy in arb_policy(), obs in arb_observations()) {
        prop_assert_eq!(build_schedule(&policy, &obs), build_schedule(&policy, &obs));
    }

    #[test]
    fn summary_is_well_defined(policy in arb_policy(), obs in arb_observations()) {
        let ledger = build_schedule(&policy, &obs);
        let summary = AnalyticsEngine::new().summarize(&ledger);
        match ledger.last() {
            None => prop_assert!(summary.is_zero()),
            Some(last) => {
                prop_assert_eq!(summary.total_invested, last.total_invested);
                prop_assert_eq!(summary.final_value, last.current_value);
                prop_assert!(summary.total_invested > Decimal::ZERO);
                prop_assert!(summary.annualized_return >= Decimal::from(-100));
            }
        }
    }
}
