//! # Validator Set Deriver Service
//!
//! Fetches provider reads through the injected [`EvmClient`] and hands them
//! to the pure derivation algorithms. Chain reads are sequential and each one
//! is bounded by the configured request timeout.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{
    with_timeout, ChainReadError, EvmClient, NetworkConfig, OperatorWithKeys, ValidatorSet,
};
use tracing::{debug, info, warn};

use crate::algorithms::{build_validator_set, ProviderVotingPowers};
use crate::config::DeriverConfig;
use crate::domain::DeriverError;
use crate::metrics;
use crate::ports::ValidatorSetDeriverApi;

/// Validator Set Deriver - builds canonical validator sets from chain data.
pub struct ValidatorSetDeriver<E: EvmClient> {
    evm: Arc<E>,
    config: DeriverConfig,
}

impl<E: EvmClient> ValidatorSetDeriver<E> {
    pub fn new(evm: Arc<E>, config: DeriverConfig) -> Self {
        Self { evm, config }
    }

    pub fn config(&self) -> &DeriverConfig {
        &self.config
    }

    async fn call<T, F>(&self, call: &'static str, fut: F) -> Result<T, DeriverError>
    where
        F: Future<Output = Result<T, ChainReadError>> + Send,
    {
        with_timeout(call, self.config.request_timeout(), fut)
            .await
            .map_err(|e| {
                metrics::record_derivation_failure(e.call());
                DeriverError::from(e)
            })
    }

    async fn fetch(
        &self,
        capture_timestamp: u64,
        config: &NetworkConfig,
    ) -> Result<(Vec<ProviderVotingPowers>, Vec<OperatorWithKeys>), DeriverError> {
        let mut voting_powers = Vec::with_capacity(config.voting_power_providers.len());
        for provider in &config.voting_power_providers {
            let operators = self
                .call(
                    "get_voting_powers",
                    self.evm.get_voting_powers(provider, capture_timestamp),
                )
                .await?;
            debug!(%provider, operators = operators.len(), "Fetched voting powers");
            voting_powers.push(ProviderVotingPowers {
                provider: *provider,
                operators,
            });
        }

        let keys = self
            .call(
                "get_keys",
                self.evm.get_keys(&config.keys_provider, capture_timestamp),
            )
            .await?;
        debug!(provider = %config.keys_provider, operators = keys.len(), "Fetched keys");

        Ok((voting_powers, keys))
    }
}

#[async_trait]
impl<E: EvmClient + 'static> ValidatorSetDeriverApi for ValidatorSetDeriver<E> {
    async fn get_current_epoch(&self) -> Result<u64, DeriverError> {
        self.call("get_current_epoch", self.evm.get_current_epoch())
            .await
    }

    async fn get_network_config(&self, epoch: u64) -> Result<NetworkConfig, DeriverError> {
        let timestamp = self
            .call("get_epoch_start", self.evm.get_epoch_start(epoch))
            .await?;
        let config = self
            .call("get_config", self.evm.get_config(timestamp))
            .await?;
        if let Err(e) = config.validate() {
            warn!(epoch, error = %e, "Network config rejected");
            metrics::record_derivation_failure("invalid_config");
            return Err(e.into());
        }
        Ok(config)
    }

    async fn get_validator_set(
        &self,
        epoch: u64,
        config: &NetworkConfig,
    ) -> Result<ValidatorSet, DeriverError> {
        let capture_timestamp = self
            .call("get_epoch_start", self.evm.get_epoch_start(epoch))
            .await?;
        let (voting_powers, keys) = self.fetch(capture_timestamp, config).await?;

        let valset = build_validator_set(epoch, capture_timestamp, config, &voting_powers, &keys)
            .inspect_err(|_| metrics::record_derivation_failure("quorum_threshold_not_found"))?;

        let active = valset.total_active_validators();
        metrics::record_valset_derived(active);
        info!(
            epoch,
            capture_timestamp,
            validators = valset.validators.len(),
            active,
            total_voting_power = %valset.total_active_voting_power(),
            quorum_threshold = %valset.quorum_threshold,
            "Derived validator set"
        );
        Ok(valset)
    }
}
