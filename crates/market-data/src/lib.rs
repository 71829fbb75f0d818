//! # Market Data Suppliers
//!
//! The analysis engine never fetches data itself; it is handed an already
//! resolved series of [`PriceObservation`]s. This crate defines the
//! [`MarketDataProvider`] contract for that hand-off and ships the suppliers
//! the command-line tool uses.

use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::PriceObservation;

pub mod error;
pub mod file;
pub mod synthetic;

// --- Public API ---
pub use error::MarketDataError;
pub use file::JsonFileProvider;
pub use synthetic::SyntheticProvider;

/// The generic, abstract interface for a historical price/dividend source.
///
/// Implementations may return observations in any order and may include
/// duplicate dates; consumers normalize the series themselves.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches daily observations for `symbol` between `start` and `end` inclusive.
    async fn fetch_observations(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceObservation>, MarketDataError>;
}

/// A provider backed by a fixed, in-memory series. Useful for tests and for
/// callers that already hold the data.
#[derive(Debug, Clone, Default)]
pub struct StaticProvider {
    observations: Vec<PriceObservation>,
}

impl StaticProvider {
    pub fn new(observations: Vec<PriceObservation>) -> Self {
        Self { observations }
    }
}

#[async_trait]
impl MarketDataProvider for StaticProvider {
    async fn fetch_observations(
        &self,
        _symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceObservation>, MarketDataError> {
        Ok(self
            .observations
            .iter()
            .filter(|o| o.date >= start && o.date <= end)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn static_provider_filters_to_range() {
        let provider = StaticProvider::new(vec![
            PriceObservation::new(date(2023, 1, 2), dec!(10)),
            PriceObservation::new(date(2023, 1, 3), dec!(11)),
            PriceObservation::new(date(2023, 1, 4), dec!(12)),
        ]);
        let got = provider
            .fetch_observations("ANY", date(2023, 1, 3), date(2023, 1, 4))
            .await
            .unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].price, dec!(11));
    }
}
