//! # Deriver Metrics
//!
//! Prometheus metrics for validator set derivation.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! rl-01-valset-deriver = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `relay_deriver_valsets_derived_total` - Counter of derived validator sets
//! - `relay_deriver_active_validators` - Gauge of active validators in the last set
//! - `relay_deriver_failures_total` - Counter of failed derivations (by reason)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_counter_vec, register_int_counter, register_int_gauge, CounterVec, IntCounter, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total validator sets derived
    pub static ref VALSETS_DERIVED: IntCounter = register_int_counter!(
        "relay_deriver_valsets_derived_total",
        "Total number of validator sets derived"
    )
    .expect("Failed to create VALSETS_DERIVED metric");

    /// Active validators in the last derived set
    pub static ref ACTIVE_VALIDATORS: IntGauge = register_int_gauge!(
        "relay_deriver_active_validators",
        "Number of active validators in the last derived set"
    )
    .expect("Failed to create ACTIVE_VALIDATORS metric");

    /// Failed derivations, labeled by reason
    pub static ref DERIVATION_FAILURES: CounterVec = register_counter_vec!(
        "relay_deriver_failures_total",
        "Total number of failed validator set derivations",
        &["reason"]
    )
    .expect("Failed to create DERIVATION_FAILURES metric");
}

/// Record a derived validator set
#[cfg(feature = "metrics")]
pub fn record_valset_derived(active_validators: usize) {
    VALSETS_DERIVED.inc();
    ACTIVE_VALIDATORS.set(active_validators as i64);
}

/// Record a failed derivation
#[cfg(feature = "metrics")]
pub fn record_derivation_failure(reason: &str) {
    DERIVATION_FAILURES.with_label_values(&[reason]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_valset_derived(_active_validators: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_derivation_failure(_reason: &str) {}
