//! In-memory [`Repo`] adapter.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{NetworkConfig, ValidatorSet, ValidatorSetStatus};

use crate::ports::{Repo, RepoError};

#[derive(Default)]
struct RepoState {
    configs: BTreeMap<u64, NetworkConfig>,
    valsets: BTreeMap<u64, ValidatorSet>,
    first_uncommitted: Option<u64>,
}

/// Repository backed by ordered maps behind a lock.
#[derive(Default)]
pub struct InMemoryRepo {
    state: RwLock<RepoState>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored validator sets.
    pub fn len(&self) -> usize {
        self.state.read().valsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Repo for InMemoryRepo {
    async fn get_config_by_epoch(&self, epoch: u64) -> Result<Option<NetworkConfig>, RepoError> {
        Ok(self.state.read().configs.get(&epoch).cloned())
    }

    async fn get_validator_set_by_epoch(
        &self,
        epoch: u64,
    ) -> Result<Option<ValidatorSet>, RepoError> {
        Ok(self.state.read().valsets.get(&epoch).cloned())
    }

    async fn update_validator_set_status(
        &self,
        epoch: u64,
        status: ValidatorSetStatus,
    ) -> Result<bool, RepoError> {
        let mut state = self.state.write();
        let valset = state
            .valsets
            .get_mut(&epoch)
            .ok_or(RepoError::MissingValidatorSet(epoch))?;
        if !valset.status.can_transition_to(status) {
            return Ok(false);
        }
        valset.status = status;
        Ok(true)
    }

    async fn get_first_uncommitted_validator_set_epoch(&self) -> Result<Option<u64>, RepoError> {
        Ok(self.state.read().first_uncommitted)
    }

    async fn save_first_uncommitted_validator_set_epoch(
        &self,
        epoch: u64,
    ) -> Result<(), RepoError> {
        self.state.write().first_uncommitted = Some(epoch);
        Ok(())
    }

    async fn save_config(&self, epoch: u64, config: &NetworkConfig) -> Result<(), RepoError> {
        self.state.write().configs.insert(epoch, config.clone());
        Ok(())
    }

    async fn save_validator_set(&self, valset: &ValidatorSet) -> Result<(), RepoError> {
        self.state
            .write()
            .valsets
            .insert(valset.epoch, valset.clone());
        Ok(())
    }

    async fn get_latest_validator_set_epoch(&self) -> Result<Option<u64>, RepoError> {
        Ok(self.state.read().valsets.keys().next_back().copied())
    }
}
