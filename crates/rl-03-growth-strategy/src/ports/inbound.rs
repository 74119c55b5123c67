//! # Inbound Ports
//!
//! API the status tracker and the validator set listener use to ask about
//! settlement state.

use async_trait::async_trait;
use shared_types::{Hash, NetworkConfig};

use crate::domain::{GrowthError, HeaderCommitStatus};

/// Growth Strategy API - inbound port.
///
/// The strategy is chosen from each call's `NetworkConfig`.
#[async_trait]
pub trait GrowthStrategyApi: Send + Sync {
    /// Canonical last committed header hash and its epoch.
    async fn last_committed_header_hash(
        &self,
        config: &NetworkConfig,
    ) -> Result<(Hash, u64), GrowthError>;

    /// Hash the next header links to.
    async fn previous_hash(&self, config: &NetworkConfig) -> Result<Hash, GrowthError>;

    async fn is_valset_header_committed(
        &self,
        config: &NetworkConfig,
        epoch: u64,
    ) -> Result<bool, GrowthError>;

    async fn valset_status(
        &self,
        config: &NetworkConfig,
        epoch: u64,
    ) -> Result<HeaderCommitStatus, GrowthError>;
}
