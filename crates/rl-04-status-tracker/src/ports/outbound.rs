//! # Outbound Ports
//!
//! Persistence the tracker and listener depend on. A concrete engine lives
//! behind this trait; [`crate::adapters::InMemoryRepo`] serves tests and
//! single-process deployments.

use async_trait::async_trait;
use shared_types::{NetworkConfig, ValidatorSet, ValidatorSetStatus};
use thiserror::Error;

/// Persistence failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepoError {
    /// Status update for an epoch with no stored validator set.
    #[error("No validator set stored for epoch {0}")]
    MissingValidatorSet(u64),

    /// Backend failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Validator set repository - outbound port.
#[async_trait]
pub trait Repo: Send + Sync {
    async fn get_config_by_epoch(&self, epoch: u64) -> Result<Option<NetworkConfig>, RepoError>;

    async fn get_validator_set_by_epoch(
        &self,
        epoch: u64,
    ) -> Result<Option<ValidatorSet>, RepoError>;

    /// Moves the stored set to `status` if the lifecycle allows it, as one
    /// atomic read-check-write. Returns `false` and leaves the set unchanged
    /// when the stored status is already `status` or later.
    async fn update_validator_set_status(
        &self,
        epoch: u64,
        status: ValidatorSetStatus,
    ) -> Result<bool, RepoError>;

    /// Lowest epoch not yet known to be committed. `None` until a validator
    /// set has been stored.
    async fn get_first_uncommitted_validator_set_epoch(&self) -> Result<Option<u64>, RepoError>;

    async fn save_first_uncommitted_validator_set_epoch(&self, epoch: u64)
        -> Result<(), RepoError>;

    async fn save_config(&self, epoch: u64, config: &NetworkConfig) -> Result<(), RepoError>;

    async fn save_validator_set(&self, valset: &ValidatorSet) -> Result<(), RepoError>;

    async fn get_latest_validator_set_epoch(&self) -> Result<Option<u64>, RepoError>;
}
