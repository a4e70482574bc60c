//! # Metrics
//!
//! Prometheus metrics for ARM requests and data source reads.
//!
//! Metrics live in a crate-level registry and are registered lazily on first
//! use, so library consumers never need an explicit setup call.

use prometheus::{Encoder, HistogramVec, IntCounterVec, Registry, TextEncoder};
use std::sync::{LazyLock, Once};
use tracing::warn;

/// Global Prometheus metrics registry
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static REGISTER: Once = Once::new();

static UPSTREAM_REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "hcs_upstream_requests_total",
            "Total number of ARM requests by operation and outcome",
        ),
        &["operation", "outcome"],
    )
    .expect("Failed to create UPSTREAM_REQUESTS_TOTAL metric - this should never happen")
});

static UPSTREAM_REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "hcs_upstream_request_duration_seconds",
            "Duration of ARM requests in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .expect("Failed to create UPSTREAM_REQUEST_DURATION metric - this should never happen")
});

static READS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "hcs_reads_total",
            "Total number of agent Helm config reads by outcome",
        ),
        &["outcome"],
    )
    .expect("Failed to create READS_TOTAL metric - this should never happen")
});

fn ensure_registered() {
    REGISTER.call_once(|| {
        let collectors: [Box<dyn prometheus::core::Collector>; 3] = [
            Box::new(UPSTREAM_REQUESTS_TOTAL.clone()),
            Box::new(UPSTREAM_REQUEST_DURATION.clone()),
            Box::new(READS_TOTAL.clone()),
        ];
        for collector in collectors {
            if let Err(e) = REGISTRY.register(collector) {
                warn!("Failed to register metric: {}", e);
            }
        }
    });
}

/// Record one ARM request
pub fn record_upstream_request(operation: &str, outcome: &str, duration_secs: f64) {
    ensure_registered();
    UPSTREAM_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    UPSTREAM_REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(duration_secs);
}

/// Record the outcome of one data source read
pub fn record_read(outcome: &str) {
    ensure_registered();
    READS_TOTAL.with_label_values(&[outcome]).inc();
}

/// Current value of the upstream request counter
pub fn upstream_request_count(operation: &str, outcome: &str) -> u64 {
    UPSTREAM_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .get()
}

/// Current value of the read counter
pub fn read_count(outcome: &str) -> u64 {
    READS_TOTAL.with_label_values(&[outcome]).get()
}

/// Render all metrics in the Prometheus text exposition format
pub fn gather_metrics() -> String {
    ensure_registered();
    let mut buffer = Vec::new();
    if let Err(e) = TextEncoder::new().encode(&REGISTRY.gather(), &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
