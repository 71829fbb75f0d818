use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Investment policy rejected: {0}")]
    Policy(#[from] core_types::CoreError),

    #[error("Market data error occurred during analysis: {0}")]
    MarketData(#[from] market_data::MarketDataError),
}
