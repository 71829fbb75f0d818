//! # DCA Schedule Builder
//!
//! This crate turns an investment policy and a raw price/dividend series into
//! the chronological investment ledger, and wires that ledger into a complete
//! analysis run.
//!
//! ## Architectural Principles
//!
//! - **Pure core:** `build_schedule` is a deterministic function of its inputs.
//!   It performs no I/O, holds no state between calls and never fails; data
//!   anomalies (unsorted input, duplicate dates, missing quotes) are normalized
//!   or skipped.
//! - **Orchestration at the edge:** `run_analysis` is the only async entry
//!   point. It resolves the data through a `MarketDataProvider` first and only
//!   then invokes the pure core.
//!
//! ## Public API
//!
//! - `build_schedule`: Policy + observations -> ledger.
//! - `PriceSeries`: The normalized, date-keyed view of the observations.
//! - `run_analysis` / `DcaAnalysis`: Fetch, build and summarize in one call.
//! - `AnalysisError`: The error types that can be returned from the pipeline.

pub mod builder;
pub mod error;
pub mod pipeline;
pub mod series;

pub use builder::build_schedule;
pub use error::AnalysisError;
pub use pipeline::{DcaAnalysis, run_analysis};
pub use series::PriceSeries;
