//! # Inbound Ports
//!
//! API trait defining what the Validator Set Deriver can do.

use async_trait::async_trait;
use shared_types::{NetworkConfig, ValidatorSet};

use crate::domain::DeriverError;

/// Validator Set Deriver API - inbound port.
#[async_trait]
pub trait ValidatorSetDeriverApi: Send + Sync {
    /// Current epoch of the driver chain.
    async fn get_current_epoch(&self) -> Result<u64, DeriverError>;

    /// Validated network config in force at `epoch`'s capture timestamp.
    async fn get_network_config(&self, epoch: u64) -> Result<NetworkConfig, DeriverError>;

    /// Derives the validator set of `epoch` under `config`.
    ///
    /// Identical chain data always yields a byte-identical set.
    async fn get_validator_set(
        &self,
        epoch: u64,
        config: &NetworkConfig,
    ) -> Result<ValidatorSet, DeriverError>;
}
