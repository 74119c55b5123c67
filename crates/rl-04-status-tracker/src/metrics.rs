//! # Tracker Metrics
//!
//! ## Metrics Exported
//!
//! - `relay_tracker_status_transitions_total` - Status transitions (by target status)
//! - `relay_tracker_first_uncommitted_epoch` - Gauge of the commit cursor
//! - `relay_tracker_integrity_violations_total` - Replica headers that differ from the local one
//! - `relay_tracker_valsets_loaded_total` - Validator sets stored by the listener

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{
    register_int_counter, register_int_counter_vec, register_int_gauge, IntCounter, IntCounterVec,
    IntGauge,
};

#[cfg(feature = "metrics")]
lazy_static! {
    pub static ref STATUS_TRANSITIONS: IntCounterVec = register_int_counter_vec!(
        "relay_tracker_status_transitions_total",
        "Total number of validator set status transitions",
        &["status"]
    )
    .expect("Failed to create STATUS_TRANSITIONS metric");

    pub static ref FIRST_UNCOMMITTED_EPOCH: IntGauge = register_int_gauge!(
        "relay_tracker_first_uncommitted_epoch",
        "Lowest epoch not yet observed committed"
    )
    .expect("Failed to create FIRST_UNCOMMITTED_EPOCH metric");

    pub static ref INTEGRITY_VIOLATIONS: IntCounter = register_int_counter!(
        "relay_tracker_integrity_violations_total",
        "Total number of replica headers differing from the local header"
    )
    .expect("Failed to create INTEGRITY_VIOLATIONS metric");

    pub static ref VALSETS_LOADED: IntCounter = register_int_counter!(
        "relay_tracker_valsets_loaded_total",
        "Total number of validator sets stored by the listener"
    )
    .expect("Failed to create VALSETS_LOADED metric");
}

#[cfg(feature = "metrics")]
pub fn record_status_transition(status: &str) {
    STATUS_TRANSITIONS.with_label_values(&[status]).inc();
}

#[cfg(feature = "metrics")]
pub fn record_cursor(epoch: u64) {
    FIRST_UNCOMMITTED_EPOCH.set(epoch as i64);
}

#[cfg(feature = "metrics")]
pub fn record_integrity_violation() {
    INTEGRITY_VIOLATIONS.inc();
}

#[cfg(feature = "metrics")]
pub fn record_valset_loaded() {
    VALSETS_LOADED.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_status_transition(_status: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_cursor(_epoch: u64) {}

#[cfg(not(feature = "metrics"))]
pub fn record_integrity_violation() {}

#[cfg(not(feature = "metrics"))]
pub fn record_valset_loaded() {}
