use crate::enums::{DividendAccounting, Frequency};
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One trading day of market data for a single symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub price: Decimal,
    /// Per-share cash dividend paid on this day. Absent in the source data means none.
    #[serde(default)]
    pub dividend: Decimal,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self {
            date,
            price,
            dividend: Decimal::ZERO,
        }
    }

    pub fn with_dividend(mut self, dividend: Decimal) -> Self {
        self.dividend = dividend;
        self
    }
}

/// The parameters of a single dollar-cost-averaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentPolicy {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub frequency: Frequency,
    /// The regular contribution made on every cadence date.
    pub amount: Decimal,
    #[serde(default)]
    pub reinvest_dividends: bool,
    #[serde(default)]
    pub dividend_accounting: DividendAccounting,
}

impl InvestmentPolicy {
    pub fn new(
        symbol: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        frequency: Frequency,
        amount: Decimal,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            start_date,
            end_date,
            frequency,
            amount,
            reinvest_dividends: false,
            dividend_accounting: DividendAccounting::default(),
        }
    }

    pub fn reinvesting(mut self, reinvest: bool) -> Self {
        self.reinvest_dividends = reinvest;
        self
    }

    pub fn with_accounting(mut self, accounting: DividendAccounting) -> Self {
        self.dividend_accounting = accounting;
        self
    }

    /// Checks the preconditions every calculation run relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbol.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "symbol".to_string(),
                "must not be blank".to_string(),
            ));
        }
        if self.amount <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "amount".to_string(),
                format!("must be positive, got {}", self.amount),
            ));
        }
        if self.start_date > self.end_date {
            return Err(CoreError::InvalidInput(
                "date range".to_string(),
                format!(
                    "start date {} is after end date {}",
                    self.start_date, self.end_date
                ),
            ));
        }
        Ok(())
    }
}

/// One dated row of the investment ledger.
///
/// Running totals (`total_shares`, `total_invested`, `cumulative_dividends`)
/// describe the position immediately after every event on `date` was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub date: NaiveDate,
    /// Cash deployed into purchases on this date.
    pub amount: Decimal,
    pub shares_purchased: Decimal,
    pub price: Decimal,
    pub total_shares: Decimal,
    pub total_invested: Decimal,
    pub current_value: Decimal,
    /// Per-share dividend paid on this date.
    pub dividend: Decimal,
    pub cumulative_dividends: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy() -> InvestmentPolicy {
        InvestmentPolicy::new(
            "VTI",
            date(2023, 1, 1),
            date(2023, 12, 31),
            Frequency::Monthly,
            dec!(100),
        )
    }

    #[test]
    fn valid_policy_passes() {
        assert!(policy().validate().is_ok());
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let mut p = policy();
        p.amount = Decimal::ZERO;
        assert!(matches!(
            p.validate(),
            Err(CoreError::InvalidInput(field, _)) if field == "amount"
        ));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let mut p = policy();
        p.end_date = date(2022, 12, 31);
        assert!(p.validate().is_err());
    }

    #[test]
    fn single_day_range_is_allowed() {
        let mut p = policy();
        p.end_date = p.start_date;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn observation_without_dividend_deserializes_to_zero() {
        let obs: PriceObservation =
            serde_json::from_str(r#"{"date":"2023-01-03","price":"12.5"}"#).unwrap();
        assert_eq!(obs.dividend, Decimal::ZERO);
        assert_eq!(obs.price, dec!(12.5));
    }

    #[test]
    fn ledger_entry_uses_camel_case_fields() {
        let entry = LedgerEntry {
            date: date(2023, 1, 3),
            amount: dec!(100),
            shares_purchased: dec!(10),
            price: dec!(10),
            total_shares: dec!(10),
            total_invested: dec!(100),
            current_value: dec!(100),
            dividend: Decimal::ZERO,
            cumulative_dividends: Decimal::ZERO,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("sharesPurchased").is_some());
        assert!(json.get("cumulativeDividends").is_some());
    }
}
