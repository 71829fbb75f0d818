//! # DCA Analytics Engine
//!
//! This crate reduces a completed investment ledger to its headline
//! performance figures.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator. It takes
//!   a ledger as input and produces a `PerformanceSummary` as output. Degenerate inputs
//!   (empty ledger, zero principal, zero elapsed time) resolve to documented fallbacks
//!   instead of errors.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `PerformanceSummary`: The standardized struct that holds the summary metrics.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use report::PerformanceSummary;
