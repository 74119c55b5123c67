//! # Growth Strategy Metrics
//!
//! ## Metrics Exported
//!
//! - `relay_growth_last_committed_epoch` - Gauge of the canonical last committed epoch
//! - `relay_growth_failures_total` - Counter of strategy failures (by kind)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, register_int_gauge, IntCounterVec, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Canonical last committed epoch
    pub static ref LAST_COMMITTED_EPOCH: IntGauge = register_int_gauge!(
        "relay_growth_last_committed_epoch",
        "Last committed epoch selected by the growth strategy"
    )
    .expect("Failed to create LAST_COMMITTED_EPOCH metric");

    /// Strategy failures, labeled by kind
    pub static ref GROWTH_FAILURES: IntCounterVec = register_int_counter_vec!(
        "relay_growth_failures_total",
        "Total number of growth strategy failures",
        &["kind"]
    )
    .expect("Failed to create GROWTH_FAILURES metric");
}

#[cfg(feature = "metrics")]
pub fn record_last_committed_epoch(epoch: u64) {
    LAST_COMMITTED_EPOCH.set(epoch as i64);
}

/// `kind` is `stale_commit`, `divergence` or `chain_read`.
#[cfg(feature = "metrics")]
pub fn record_failure(kind: &str) {
    GROWTH_FAILURES.with_label_values(&[kind]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_last_committed_epoch(_epoch: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_failure(_kind: &str) {}
