use crate::series::PriceSeries;
use cadence::CadenceDates;
use chrono::NaiveDate;
use core_types::money::{round_currency, round_shares};
use core_types::{DividendAccounting, InvestmentPolicy, LedgerEntry, PriceObservation};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A regular contribution on a cadence date, sized at that day's price.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Purchase {
    date: NaiveDate,
    price: Decimal,
    amount: Decimal,
    shares: Decimal,
}

/// Everything that happens on one trading day of the ledger.
#[derive(Debug, Clone, Default)]
struct DayEvents {
    price: Decimal,
    purchase: Option<Purchase>,
    /// Per-share dividend paid on the day.
    dividend: Option<Decimal>,
}

/// Running position state carried from one ledger row to the next.
#[derive(Debug, Clone, Default)]
struct Holdings {
    total_shares: Decimal,
    total_invested: Decimal,
    cumulative_dividends: Decimal,
}

/// Builds the chronological investment ledger for `policy` over `observations`.
///
/// `observations` may be unsorted and may repeat dates (see [`PriceSeries`]).
/// The ledger is empty when the policy is invalid or when no observation
/// exists on or after the policy's start date.
///
/// The ledger is produced in two passes. Pass one turns every cadence date
/// that has a price into an immutable [`Purchase`]. Pass two walks the union
/// of purchase dates and dividend dates in ascending order and folds them into
/// running totals, emitting one row per date.
#[tracing::instrument(
    name = "build_schedule",
    skip_all,
    fields(symbol = %policy.symbol, frequency = %policy.frequency)
)]
pub fn build_schedule(
    policy: &InvestmentPolicy,
    observations: &[PriceObservation],
) -> Vec<LedgerEntry> {
    if let Err(e) = policy.validate() {
        tracing::warn!(error = %e, "Invalid investment policy; returning an empty ledger");
        return Vec::new();
    }

    let series = PriceSeries::from_observations(observations);

    // The requested start may be a holiday or weekend with no quote.
    let Some(effective_start) = series.first_on_or_after(policy.start_date).map(|o| o.date) else {
        tracing::debug!(start = %policy.start_date, "No price data on or after the start date");
        return Vec::new();
    };

    let purchases = scheduled_purchases(policy, &series, effective_start);
    let ledger = replay(policy, &series, effective_start, purchases);

    tracing::debug!(
        %effective_start,
        observations = series.len(),
        entries = ledger.len(),
        "Built investment ledger"
    );
    ledger
}

/// Pass one: a purchase for every cadence date with an exact price match.
fn scheduled_purchases(
    policy: &InvestmentPolicy,
    series: &PriceSeries,
    effective_start: NaiveDate,
) -> Vec<Purchase> {
    CadenceDates::new(effective_start, policy.end_date, policy.frequency)
        .filter_map(|date| {
            // Dates without a quote are skipped, never substituted.
            let obs = series.get(date)?;
            let Some(shares) = policy.amount.checked_div(obs.price) else {
                tracing::warn!(
                    %date,
                    price = %obs.price,
                    "Share count overflows; skipping purchase"
                );
                return None;
            };
            Some(Purchase {
                date,
                price: obs.price,
                amount: policy.amount,
                shares: round_shares(shares),
            })
        })
        .collect()
}

/// Pass two: merges purchases and dividends by date and folds the running totals.
fn replay(
    policy: &InvestmentPolicy,
    series: &PriceSeries,
    effective_start: NaiveDate,
    purchases: Vec<Purchase>,
) -> Vec<LedgerEntry> {
    let mut days: BTreeMap<NaiveDate, DayEvents> = BTreeMap::new();

    for purchase in purchases {
        let day = days.entry(purchase.date).or_default();
        day.price = purchase.price;
        day.purchase = Some(purchase);
    }
    for obs in series
        .range(effective_start, policy.end_date)
        .filter(|o| o.dividend > Decimal::ZERO)
    {
        let day = days.entry(obs.date).or_default();
        day.price = obs.price;
        day.dividend = Some(obs.dividend);
    }

    let mut ledger: Vec<LedgerEntry> = Vec::with_capacity(days.len());
    let mut holdings = Holdings::default();

    for (date, day) in days {
        let has_prior_entry = !ledger.is_empty();
        match settle(policy, &holdings, has_prior_entry, date, &day) {
            Ok(Some((next, entry))) => {
                holdings = next;
                ledger.push(entry);
            }
            Ok(None) => {}
            Err(Overflow) => {
                tracing::warn!(%date, "Running totals overflow; skipping the day's events");
            }
        }
    }

    ledger
}

/// Decimal arithmetic left the representable range.
#[derive(Debug)]
struct Overflow;

fn add(a: Decimal, b: Decimal) -> Result<Decimal, Overflow> {
    a.checked_add(b).ok_or(Overflow)
}

/// Applies one day's events to `holdings`.
///
/// Returns `Ok(None)` when the day produces no row: there is no purchase and
/// no dividend was paid. `holdings` is only replaced when a row is emitted.
fn settle(
    policy: &InvestmentPolicy,
    holdings: &Holdings,
    has_prior_entry: bool,
    date: NaiveDate,
    day: &DayEvents,
) -> Result<Option<(Holdings, LedgerEntry)>, Overflow> {
    // Shares held at the close of the most recent earlier row.
    let shares_before = holdings.total_shares;
    let mut next = holdings.clone();

    let mut amount = Decimal::ZERO;
    let mut shares_purchased = Decimal::ZERO;

    if let Some(purchase) = &day.purchase {
        amount = add(amount, purchase.amount)?;
        shares_purchased = add(shares_purchased, purchase.shares)?;
        next.total_shares = add(next.total_shares, purchase.shares)?;
        next.total_invested = add(next.total_invested, purchase.amount)?;
    }

    let mut dividend_paid = Decimal::ZERO;
    if let Some(per_share) = day.dividend.filter(|_| has_prior_entry) {
        let payment = round_currency(shares_before.checked_mul(per_share).ok_or(Overflow)?);
        if payment > Decimal::ZERO {
            dividend_paid = per_share;
            next.cumulative_dividends = add(next.cumulative_dividends, payment)?;

            if policy.reinvest_dividends {
                let reinvested = round_shares(payment.checked_div(day.price).ok_or(Overflow)?);
                amount = add(amount, payment)?;
                shares_purchased = add(shares_purchased, reinvested)?;
                next.total_shares = add(next.total_shares, reinvested)?;
                if policy.dividend_accounting == DividendAccounting::Principal {
                    next.total_invested = add(next.total_invested, payment)?;
                }
            }

            tracing::debug!(
                %date,
                %per_share,
                %payment,
                reinvested = policy.reinvest_dividends,
                "Applied dividend"
            );
        }
    }

    if day.purchase.is_none() && dividend_paid.is_zero() {
        return Ok(None);
    }

    let current_value = next.total_shares.checked_mul(day.price).ok_or(Overflow)?;
    let entry = LedgerEntry {
        date,
        amount,
        shares_purchased,
        price: day.price,
        total_shares: next.total_shares,
        total_invested: next.total_invested,
        current_value: round_currency(current_value),
        dividend: dividend_paid,
        cumulative_dividends: next.cumulative_dividends,
    };
    Ok(Some((next, entry)))
}
