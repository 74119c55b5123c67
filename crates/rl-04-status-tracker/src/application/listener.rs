//! # Validator Set Listener
//!
//! Catches the repository up with the chain: derives and stores every epoch
//! from the one after the last stored set (or the current epoch on first
//! start) through the current epoch.

use std::sync::Arc;

use rl_01_valset_deriver::ValidatorSetDeriverApi;
use rl_03_growth_strategy::GrowthStrategyApi;
use shared_types::{Hash, NetworkConfig};
use tracing::{debug, info};

use crate::domain::TrackerError;
use crate::metrics;
use crate::ports::Repo;

/// Validator set listener.
pub struct ValsetListener<R: Repo, D: ValidatorSetDeriverApi, G: GrowthStrategyApi> {
    repo: Arc<R>,
    deriver: Arc<D>,
    growth: Arc<G>,
}

impl<R: Repo, D: ValidatorSetDeriverApi, G: GrowthStrategyApi> ValsetListener<R, D, G> {
    pub fn new(repo: Arc<R>, deriver: Arc<D>, growth: Arc<G>) -> Self {
        Self {
            repo,
            deriver,
            growth,
        }
    }

    /// Header hash the set of `epoch` links to: the stored previous set's
    /// header, or the growth strategy's canonical head for the first set.
    async fn previous_header_hash(
        &self,
        epoch: u64,
        config: &NetworkConfig,
    ) -> Result<Hash, TrackerError> {
        if let Some(prev_epoch) = epoch.checked_sub(1) {
            if let Some(prev) = self.repo.get_validator_set_by_epoch(prev_epoch).await? {
                return Ok(prev.header_hash());
            }
        }
        Ok(self.growth.previous_hash(config).await?)
    }

    /// Derives and stores all missing epochs. Returns the stored epochs.
    ///
    /// Each epoch is stored before the next is derived, so a failure keeps
    /// the progress made so far.
    pub async fn load_all(&self) -> Result<Vec<u64>, TrackerError> {
        let current = self.deriver.get_current_epoch().await?;
        let start = match self.repo.get_latest_validator_set_epoch().await? {
            Some(latest) => latest + 1,
            None => current,
        };
        if start > current {
            debug!(current, "Validator sets up to date");
            return Ok(Vec::new());
        }

        let mut stored = Vec::new();
        for epoch in start..=current {
            let config = self.deriver.get_network_config(epoch).await?;
            let mut valset = self.deriver.get_validator_set(epoch, &config).await?;
            valset.previous_header_hash = self.previous_header_hash(epoch, &config).await?;

            self.repo.save_config(epoch, &config).await?;
            self.repo.save_validator_set(&valset).await?;
            if self
                .repo
                .get_first_uncommitted_validator_set_epoch()
                .await?
                .is_none()
            {
                self.repo
                    .save_first_uncommitted_validator_set_epoch(epoch)
                    .await?;
            }

            metrics::record_valset_loaded();
            info!(
                epoch,
                active = valset.total_active_validators(),
                previous = %hex::encode(valset.previous_header_hash),
                "Stored validator set"
            );
            stored.push(epoch);
        }
        Ok(stored)
    }
}
