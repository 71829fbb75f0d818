use crate::MarketDataProvider;
use crate::error::MarketDataError;
use async_trait::async_trait;
use cadence::calendar::is_weekend;
use chrono::{Datelike, NaiveDate};
use core_types::PriceObservation;
use core_types::money::round_currency;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Upward drift of the random walk: a uniform draw below this moves the price down.
const DRIFT_PIVOT: f64 = 0.48;
/// Largest single-day move as a fraction of price.
const DAILY_VOLATILITY: f64 = 0.03;
const PRICE_FLOOR: f64 = 1.0;

/// A deterministic stand-in for a live market-data feed.
///
/// Produces one observation per weekday from a seeded random walk. The seed
/// and the starting price are derived from the symbol, so the same request
/// always yields the same series and different symbols diverge.
#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    /// Annual dividend yield paid in four quarterly instalments (0.02 = 2%).
    dividend_yield: Decimal,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dividend_yield(mut self, dividend_yield: Decimal) -> Self {
        self.dividend_yield = dividend_yield;
        self
    }

    fn symbol_seed(symbol: &str) -> u64 {
        symbol.chars().map(|c| c as u64).sum()
    }

    /// Starting price: `50 + (seed / 100) mod 200`.
    fn initial_price(seed: u64) -> f64 {
        50.0 + (seed as f64 / 100.0) % 200.0
    }

    pub fn generate(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<PriceObservation> {
        let seed = Self::symbol_seed(symbol);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut price = Self::initial_price(seed);
        let mut last_dividend_month: Option<(i32, u32)> = None;
        let mut observations = Vec::new();

        for date in start.iter_days().take_while(|d| *d <= end) {
            if is_weekend(date) {
                continue;
            }

            let draw: f64 = rng.gen_range(0.0..1.0);
            price += (draw - DRIFT_PIVOT) * 2.0 * (price * DAILY_VOLATILITY);
            price = price.max(PRICE_FLOOR);

            let Some(quoted) = Decimal::from_f64(price).map(round_currency) else {
                continue;
            };

            let mut observation = PriceObservation::new(date, quoted);

            // Quarterly payout on the first trading day of Mar/Jun/Sep/Dec.
            let month = (date.year(), date.month());
            if self.dividend_yield > Decimal::ZERO
                && date.month() % 3 == 0
                && last_dividend_month != Some(month)
            {
                observation.dividend =
                    round_currency(quoted * self.dividend_yield / Decimal::from(4));
                last_dividend_month = Some(month);
            }

            observations.push(observation);
        }

        observations
    }
}

#[async_trait]
impl MarketDataProvider for SyntheticProvider {
    async fn fetch_observations(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceObservation>, MarketDataError> {
        let observations = self.generate(symbol, start, end);
        tracing::info!(
            symbol,
            %start,
            %end,
            count = observations.len(),
            "Generated synthetic price observations"
        );
        Ok(observations)
    }
}
