//! Rounding rules shared by the ledger and the performance summary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for share quantities.
pub const SHARE_DP: u32 = 6;
/// Decimal places kept for currency amounts and percentages.
pub const CURRENCY_DP: u32 = 2;

pub fn round_shares(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(SHARE_DP, RoundingStrategy::MidpointAwayFromZero)
}

pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}
