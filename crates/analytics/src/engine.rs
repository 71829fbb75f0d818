use crate::report::PerformanceSummary;
use core_types::LedgerEntry;
use core_types::money::round_currency;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

const DAYS_PER_YEAR: f64 = 365.0;

/// A stateless calculator for deriving performance metrics from an investment ledger.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating performance metrics.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The date-ordered ledger produced by the schedule builder.
    ///
    /// # Returns
    ///
    /// The `PerformanceSummary` of the ledger's final state. An empty ledger
    /// yields the all-zero summary.
    pub fn summarize(&self, ledger: &[LedgerEntry]) -> PerformanceSummary {
        let (Some(first), Some(last)) = (ledger.first(), ledger.last()) else {
            return PerformanceSummary::new();
        };

        let mut summary = PerformanceSummary::new();
        summary.total_invested = last.total_invested;
        summary.final_value = last.current_value;
        summary.dividends_received = last.cumulative_dividends;

        self.calculate_returns(&mut summary);
        self.calculate_annualized(first, last, &mut summary);

        tracing::debug!(
            total_invested = %summary.total_invested,
            final_value = %summary.final_value,
            annualized_return = %summary.annualized_return,
            "Summarized ledger of {} entries",
            ledger.len()
        );

        summary
    }

    /// Calculates absolute and percentage return on principal.
    fn calculate_returns(&self, summary: &mut PerformanceSummary) {
        summary.total_return = round_currency(summary.final_value - summary.total_invested);

        // A ledger with no principal has no meaningful ratio.
        if summary.total_invested > Decimal::ZERO {
            summary.percentage_return = round_currency(
                summary.total_return / summary.total_invested * Decimal::ONE_HUNDRED,
            );
        }
    }

    /// Calculates the compound annual growth rate between the first and last entry.
    ///
    /// A ledger spanning zero days reports its percentage return as the annualized figure.
    fn calculate_annualized(
        &self,
        first: &LedgerEntry,
        last: &LedgerEntry,
        summary: &mut PerformanceSummary,
    ) {
        if summary.total_invested <= Decimal::ZERO {
            return;
        }

        let elapsed_days = (last.date - first.date).num_days();
        if elapsed_days <= 0 {
            summary.annualized_return = summary.percentage_return;
            return;
        }
        let years = elapsed_days as f64 / DAYS_PER_YEAR;

        let growth = (summary.final_value / summary.total_invested).to_f64();
        let cagr = growth
            .map(|g| (g.powf(1.0 / years) - 1.0) * 100.0)
            .filter(|v| v.is_finite())
            .and_then(Decimal::from_f64);

        summary.annualized_return = match cagr {
            Some(value) => round_currency(value),
            None => {
                tracing::warn!(
                    final_value = %summary.final_value,
                    total_invested = %summary.total_invested,
                    years,
                    "Annualized return is not representable; reporting 0"
                );
                Decimal::ZERO
            }
        };
    }
}
