use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Failed to read price data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse price data: {0}")]
    Parse(String),

    #[error("Invalid data format in price data: {0}")]
    InvalidData(String),
}
