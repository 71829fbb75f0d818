use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The headline results of a dollar-cost-averaging run.
///
/// Every field is derived from the final ledger entry (plus the first entry's
/// date for the annualized figure). Percentages are expressed in percent, so
/// `12.5` means 12.5%.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSummary {
    pub total_invested: Decimal,
    pub final_value: Decimal,
    pub total_return: Decimal,
    pub percentage_return: Decimal,
    /// Compound annual growth rate of `final_value` over `total_invested`.
    pub annualized_return: Decimal,
    pub dividends_received: Decimal,
}

impl PerformanceSummary {
    /// Creates a new, zeroed-out summary. This is what an empty ledger reduces to.
    pub fn new() -> Self {
        Self {
            total_invested: Decimal::ZERO,
            final_value: Decimal::ZERO,
            total_return: Decimal::ZERO,
            percentage_return: Decimal::ZERO,
            annualized_return: Decimal::ZERO,
            dividends_received: Decimal::ZERO,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::new()
    }
}

impl Default for PerformanceSummary {
    fn default() -> Self {
        Self::new()
    }
}
