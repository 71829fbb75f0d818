use crate::error::ConfigError;
use core_types::InvestmentPolicy;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The dollar-cost-averaging run to analyze.
    pub policy: InvestmentPolicy,
    #[serde(default)]
    pub data: DataSource,
    #[serde(default)]
    pub logging: Logging,
}

/// Where historical prices come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// A seeded random walk; useful for demos and when no data file exists.
    #[default]
    Synthetic,
    /// A JSON array of `{ date, price, dividend? }` records.
    File,
}

/// Contains parameters for the market-data supplier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataSource {
    #[serde(default)]
    pub source: DataSourceKind,
    /// Path to the price file. Required when `source = "file"`.
    pub path: Option<PathBuf>,
    /// Annual dividend yield of the synthetic series (0.02 = 2%).
    #[serde(default)]
    pub dividend_yield: Decimal,
}

/// Contains parameters for log output.
#[derive(Debug, Clone, Deserialize)]
pub struct Logging {
    /// Default filter directive, overridden by `RUST_LOG` when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

impl Config {
    /// Rejects configurations that would make the analysis meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy.validate()?;

        if self.data.source == DataSourceKind::File && self.data.path.is_none() {
            return Err(ConfigError::ValidationError(
                "data.path is required when data.source = \"file\"".to_string(),
            ));
        }
        if self.data.dividend_yield < Decimal::ZERO {
            return Err(ConfigError::ValidationError(format!(
                "data.dividend_yield must not be negative, got {}",
                self.data.dividend_yield
            )));
        }
        Ok(())
    }
}
