use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a regular contribution is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(CoreError::InvalidInput(
                "frequency".to_string(),
                format!("'{}' is not one of daily, weekly, monthly", other),
            )),
        }
    }
}

/// Decides whether reinvested dividend cash counts as contributed principal.
///
/// `Principal` adds every reinvested dividend to `total_invested`, so the
/// return figures measure growth on everything that went into the position.
/// `Growth` keeps `total_invested` at out-of-pocket cash only, so reinvested
/// dividends show up as return instead of principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividendAccounting {
    #[default]
    Principal,
    Growth,
}

impl FromStr for DividendAccounting {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "principal" => Ok(DividendAccounting::Principal),
            "growth" => Ok(DividendAccounting::Growth),
            other => Err(CoreError::InvalidInput(
                "dividend_accounting".to_string(),
                format!("'{}' is not one of principal, growth", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_parses_case_insensitively() {
        assert_eq!("Monthly".parse::<Frequency>(), Ok(Frequency::Monthly));
        assert_eq!(" weekly ".parse::<Frequency>(), Ok(Frequency::Weekly));
        assert!("yearly".parse::<Frequency>().is_err());
    }

    #[test]
    fn frequency_serializes_lowercase() {
        let json = serde_json::to_string(&Frequency::Daily).unwrap();
        assert_eq!(json, "\"daily\"");
        assert_eq!(Frequency::Weekly.to_string(), "weekly");
    }

    #[test]
    fn dividend_accounting_defaults_to_principal() {
        assert_eq!(DividendAccounting::default(), DividendAccounting::Principal);
        assert_eq!("growth".parse::<DividendAccounting>(), Ok(DividendAccounting::Growth));
    }
}
