use chrono::NaiveDate;
use core_types::PriceObservation;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// A date-keyed, ascending view of raw observations.
///
/// Normalization rules:
/// - duplicate dates keep the observation that appears last in the input;
/// - observations with a non-positive price are dropped;
/// - a negative dividend is treated as no dividend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceSeries {
    by_date: BTreeMap<NaiveDate, PriceObservation>,
}

impl PriceSeries {
    pub fn from_observations(observations: &[PriceObservation]) -> Self {
        let mut by_date = BTreeMap::new();
        let mut dropped = 0usize;

        for obs in observations {
            if obs.price <= Decimal::ZERO {
                dropped += 1;
                continue;
            }
            let mut obs = obs.clone();
            if obs.dividend < Decimal::ZERO {
                obs.dividend = Decimal::ZERO;
            }
            by_date.insert(obs.date, obs);
        }

        if dropped > 0 {
            tracing::warn!(dropped, "Skipped observations with a non-positive price");
        }

        Self { by_date }
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&PriceObservation> {
        self.by_date.get(&date)
    }

    /// The first observation dated on or after `date`.
    pub fn first_on_or_after(&self, date: NaiveDate) -> Option<&PriceObservation> {
        self.by_date.range(date..).next().map(|(_, obs)| obs)
    }

    /// Observations in `[from, to]`, ascending. Empty when `from > to`.
    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = &PriceObservation> {
        let bounds = (from <= to).then_some(from..=to);
        bounds
            .into_iter()
            .flat_map(move |r| self.by_date.range(r).map(|(_, obs)| obs))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceObservation> {
        self.by_date.values()
    }
}
