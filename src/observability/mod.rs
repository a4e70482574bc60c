//! # Observability
//!
//! Structured logging setup and Prometheus metrics for upstream calls and reads.

pub mod logging;
pub mod metrics;
