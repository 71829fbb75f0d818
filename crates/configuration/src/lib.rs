use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{Config, DataSource, DataSourceKind, Logging};

/// Prefix of environment variables that override file settings,
/// e.g. `DCA__POLICY__AMOUNT=250`.
pub const ENV_PREFIX: &str = "DCA";

/// Loads the application configuration from a TOML file plus environment overrides.
///
/// This function is the primary entry point for this crate. It reads the configuration file,
/// layers `DCA__SECTION__KEY` environment variables on top, deserializes the result into our
/// strongly-typed `Config` struct and validates it.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    load_config_with(path.as_ref(), environment())
}

/// `DCA__SECTION__KEY` variables, with values parsed as numbers or booleans where possible.
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_config_with(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        path = %path.display(),
        symbol = %config.policy.symbol,
        "Configuration loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{DividendAccounting, Frequency};
    use rust_decimal_macros::dec;
    use std::io::Write;

    /// Loads `path` with an explicit variable set instead of the process environment.
    fn load_with_vars(path: &Path, vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_config_with(path, environment().source(Some(vars)))
    }

    fn load(path: &Path) -> Result<Config, ConfigError> {
        load_with_vars(path, &[])
    }

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_full_configuration() {
        let file = write_config(
            r#"
            [policy]
            symbol = "VTI"
            start_date = "2020-01-01"
            end_date = "2023-12-31"
            frequency = "weekly"
            amount = 250
            reinvest_dividends = true
            dividend_accounting = "growth"

            [data]
            source = "file"
            path = "data/vti.json"

            [logging]
            level = "debug"
            "#,
        );

        let config = load(file.path()).unwrap();
        assert_eq!(config.policy.symbol, "VTI");
        assert_eq!(config.policy.start_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(config.policy.frequency, Frequency::Weekly);
        assert_eq!(config.policy.amount, dec!(250));
        assert!(config.policy.reinvest_dividends);
        assert_eq!(config.policy.dividend_accounting, DividendAccounting::Growth);
        assert_eq!(config.data.source, DataSourceKind::File);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn optional_sections_use_defaults() {
        let file = write_config(
            r#"
            [policy]
            symbol = "AAPL"
            start_date = "2022-01-03"
            end_date = "2022-12-30"
            frequency = "monthly"
            amount = 100.5
            "#,
        );

        let config = load(file.path()).unwrap();
        assert!(!config.policy.reinvest_dividends);
        assert_eq!(config.policy.dividend_accounting, DividendAccounting::Principal);
        assert_eq!(config.policy.amount, dec!(100.5));
        assert_eq!(config.data.source, DataSourceKind::Synthetic);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_source_requires_path() {
        let file = write_config(
            r#"
            [policy]
            symbol = "AAPL"
            start_date = "2022-01-03"
            end_date = "2022-12-30"
            frequency = "monthly"
            amount = 100

            [data]
            source = "file"
            "#,
        );

        assert!(matches!(load(file.path()), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn invalid_policy_is_rejected() {
        let file = write_config(
            r#"
            [policy]
            symbol = "AAPL"
            start_date = "2022-12-30"
            end_date = "2022-01-03"
            frequency = "monthly"
            amount = 100
            "#,
        );

        assert!(matches!(load(file.path()), Err(ConfigError::Policy(_))));
    }

    #[test]
    fn missing_file_is_load_error() {
        assert!(matches!(
            load(Path::new("/no/such/config.toml")),
            Err(ConfigError::LoadError(_))
        ));
    }

    #[test]
    fn environment_overrides_file_values() {
        let file = write_config(
            r#"
            [policy]
            symbol = "AAPL"
            start_date = "2022-01-03"
            end_date = "2022-12-30"
            frequency = "monthly"
            amount = 100
            "#,
        );

        let config = load_with_vars(
            file.path(),
            &[
                ("DCA__POLICY__AMOUNT", "250"),
                ("DCA__POLICY__START_DATE", "2022-02-01"),
                ("DCA__POLICY__REINVEST_DIVIDENDS", "true"),
                ("DCA__DATA__DIVIDEND_YIELD", "0.02"),
                ("OTHER__POLICY__AMOUNT", "999"),
            ],
        )
        .unwrap();
        assert_eq!(config.policy.amount, dec!(250));
        assert_eq!(config.policy.start_date, NaiveDate::from_ymd_opt(2022, 2, 1).unwrap());
        assert!(config.policy.reinvest_dividends);
        assert_eq!(config.data.dividend_yield, dec!(0.02));
        assert_eq!(config.policy.symbol, "AAPL");
    }

    #[test]
    fn environment_override_is_validated() {
        let file = write_config(
            r#"
            [policy]
            symbol = "AAPL"
            start_date = "2022-01-03"
            end_date = "2022-12-30"
            frequency = "monthly"
            amount = 100
            "#,
        );

        let result = load_with_vars(file.path(), &[("DCA__POLICY__AMOUNT", "0")]);
        assert!(matches!(result, Err(ConfigError::Policy(_))));
    }
}
