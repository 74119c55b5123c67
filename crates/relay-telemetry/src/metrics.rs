//! Prometheus exposition.
//!
//! Subsystems register their counters in the default registry when built
//! with their `metrics` feature; this module only renders it.

use prometheus::{Encoder, TextEncoder};

use crate::TelemetryError;

/// Renders every metric in the default registry in the text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsEncode(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsEncode(e.to_string()))
}
