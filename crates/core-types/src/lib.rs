pub mod enums;
pub mod error;
pub mod money;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{DividendAccounting, Frequency};
pub use error::CoreError;
pub use structs::{InvestmentPolicy, LedgerEntry, PriceObservation};
