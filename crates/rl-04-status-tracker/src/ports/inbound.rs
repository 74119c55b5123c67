//! # Inbound Ports

use async_trait::async_trait;
use shared_types::ProofAggregatedMessage;

use crate::domain::TrackerError;

/// Status Tracker API - inbound port.
#[async_trait]
pub trait StatusTrackerApi: Send + Sync {
    /// Marks the message's epoch Aggregated. Returns whether the status
    /// changed.
    async fn handle_proof_aggregated(
        &self,
        msg: &ProofAggregatedMessage,
    ) -> Result<bool, TrackerError>;

    /// One commit tracking pass. Returns the epochs newly marked Committed.
    async fn track_committed_epochs(&self) -> Result<Vec<u64>, TrackerError>;
}
