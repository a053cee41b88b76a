//! engine-harness
//!
//! Synthetic load generator for a single-symbol order book: concurrent
//! writers submitting random limit orders, concurrent readers polling
//! prices, and periodic throughput reports.

pub mod config;
pub mod generator;
pub mod harness;
pub mod report;

pub use config::{ConfigError, HarnessConfig};
pub use generator::{GeneratorConfig, OrderGenerator};
pub use harness::{run, RunSummary};
pub use report::Report;
