use crate::MarketDataProvider;
use crate::error::MarketDataError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::PriceObservation;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Reads observations from a JSON array of `{ "date", "price", "dividend"? }` records.
///
/// The file is read on every fetch, so edits between runs are picked up.
/// The `symbol` argument is ignored: a file holds a single security.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

// Intermediate struct for deserializing records from the price file.
#[derive(Deserialize)]
struct RawObservation {
    date: String,
    price: Decimal,
    #[serde(default)]
    dividend: Option<Decimal>,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the JSON text of a price file into observations.
    pub fn parse(text: &str) -> Result<Vec<PriceObservation>, MarketDataError> {
        let raw: Vec<RawObservation> = serde_json::from_str(text)
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        raw.into_iter()
            .map(|r| {
                let date = NaiveDate::parse_from_str(&r.date, "%Y-%m-%d").map_err(|e| {
                    MarketDataError::InvalidData(format!("Invalid date '{}': {}", r.date, e))
                })?;
                Ok(PriceObservation {
                    date,
                    price: r.price,
                    dividend: r.dividend.unwrap_or(Decimal::ZERO),
                })
            })
            .collect()
    }
}

#[async_trait]
impl MarketDataProvider for JsonFileProvider {
    async fn fetch_observations(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceObservation>, MarketDataError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let observations: Vec<PriceObservation> = Self::parse(&text)?
            .into_iter()
            .filter(|o| o.date >= start && o.date <= end)
            .collect();

        tracing::info!(
            symbol,
            path = %self.path.display(),
            count = observations.len(),
            "Loaded price observations from file"
        );
        Ok(observations)
    }
}
