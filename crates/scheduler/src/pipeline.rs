use crate::builder::build_schedule;
use crate::error::AnalysisError;
use analytics::{AnalyticsEngine, PerformanceSummary};
use core_types::{InvestmentPolicy, LedgerEntry};
use market_data::MarketDataProvider;
use serde::Serialize;

/// The complete outcome of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DcaAnalysis {
    pub policy: InvestmentPolicy,
    pub ledger: Vec<LedgerEntry>,
    pub summary: PerformanceSummary,
}

impl DcaAnalysis {
    /// `false` when no price data matched the policy; callers should present
    /// a "no data" outcome rather than an all-zero result.
    pub fn has_data(&self) -> bool {
        !self.ledger.is_empty()
    }
}

/// Fetches the price series for `policy`, builds the ledger and summarizes it.
///
/// An empty ledger is a valid outcome and is returned as `Ok`. Errors are
/// limited to an invalid policy and a failing provider.
pub async fn run_analysis(
    provider: &dyn MarketDataProvider,
    policy: &InvestmentPolicy,
) -> Result<DcaAnalysis, AnalysisError> {
    policy.validate()?;

    let observations = provider
        .fetch_observations(&policy.symbol, policy.start_date, policy.end_date)
        .await?;

    let ledger = build_schedule(policy, &observations);
    let summary = AnalyticsEngine::new().summarize(&ledger);

    if ledger.is_empty() {
        tracing::warn!(
            symbol = %policy.symbol,
            start = %policy.start_date,
            end = %policy.end_date,
            "No price data matched the investment schedule"
        );
    } else {
        tracing::info!(
            symbol = %policy.symbol,
            entries = ledger.len(),
            final_value = %summary.final_value,
            "Analysis complete"
        );
    }

    Ok(DcaAnalysis {
        policy: policy.clone(),
        ledger,
        summary,
    })
}
