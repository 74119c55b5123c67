//! # Aggregator Metrics
//!
//! Prometheus metrics for proof aggregation and verification.
//!
//! ## Metrics Exported
//!
//! - `relay_aggregator_proofs_aggregated_total` - Proofs built (by scheme, outcome)
//! - `relay_aggregator_proofs_verified_total` - Proof checks (by scheme, outcome)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Aggregation attempts
    pub static ref PROOFS_AGGREGATED: IntCounterVec = register_int_counter_vec!(
        "relay_aggregator_proofs_aggregated_total",
        "Total number of aggregation attempts",
        &["scheme", "outcome"]
    )
    .expect("Failed to create PROOFS_AGGREGATED metric");

    /// Verification attempts
    pub static ref PROOFS_VERIFIED: IntCounterVec = register_int_counter_vec!(
        "relay_aggregator_proofs_verified_total",
        "Total number of proof verifications",
        &["scheme", "outcome"]
    )
    .expect("Failed to create PROOFS_VERIFIED metric");
}

/// Record an aggregation attempt. `outcome` is `ok` or `error`.
#[cfg(feature = "metrics")]
pub fn record_aggregation(scheme: &str, outcome: &str) {
    PROOFS_AGGREGATED.with_label_values(&[scheme, outcome]).inc();
}

/// Record a verification. `outcome` is `valid`, `invalid` or `error`.
#[cfg(feature = "metrics")]
pub fn record_verification(scheme: &str, outcome: &str) {
    PROOFS_VERIFIED.with_label_values(&[scheme, outcome]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_aggregation(_scheme: &str, _outcome: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_verification(_scheme: &str, _outcome: &str) {}
