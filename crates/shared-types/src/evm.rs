//! # EVM Client Port
//!
//! Outbound port to the chains the relay reads stake, keys and committed
//! headers from. Every relay subsystem talks to chains only through this
//! trait; contract bindings and RPC batching live behind it.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::entities::{
    AggregationProof, CrossChainAddress, ExtraData, Hash, NetworkConfig, OperatorVotingPower,
    OperatorWithKeys, TxResult,
};
use crate::errors::ChainReadError;
use crate::header::ValidatorSetHeader;

/// Chain access - outbound port.
#[async_trait]
pub trait EvmClient: Send + Sync {
    /// Current epoch of the driver contract.
    async fn get_current_epoch(&self) -> Result<u64, ChainReadError>;

    /// Capture timestamp (start) of an epoch.
    async fn get_epoch_start(&self, epoch: u64) -> Result<u64, ChainReadError>;

    /// Network configuration snapshot at a capture timestamp.
    async fn get_config(&self, timestamp: u64) -> Result<NetworkConfig, ChainReadError>;

    async fn get_voting_powers(
        &self,
        provider: &CrossChainAddress,
        timestamp: u64,
    ) -> Result<Vec<OperatorVotingPower>, ChainReadError>;

    async fn get_keys(
        &self,
        provider: &CrossChainAddress,
        timestamp: u64,
    ) -> Result<Vec<OperatorWithKeys>, ChainReadError>;

    /// Last epoch whose header the replica stores.
    async fn get_last_committed_header_epoch(
        &self,
        replica: &CrossChainAddress,
    ) -> Result<u64, ChainReadError>;

    /// Header hash stored by the replica for `epoch`. [`crate::ZERO_HASH`]
    /// when nothing is committed there yet.
    async fn get_header_hash_at(
        &self,
        replica: &CrossChainAddress,
        epoch: u64,
    ) -> Result<Hash, ChainReadError>;

    async fn is_valset_header_committed_at(
        &self,
        replica: &CrossChainAddress,
        epoch: u64,
    ) -> Result<bool, ChainReadError>;

    async fn commit_valset_header(
        &self,
        replica: &CrossChainAddress,
        header: &ValidatorSetHeader,
        extra_data: &[ExtraData],
        proof: &AggregationProof,
    ) -> Result<TxResult, ChainReadError>;

    async fn set_genesis(
        &self,
        replica: &CrossChainAddress,
        header: &ValidatorSetHeader,
        extra_data: &[ExtraData],
    ) -> Result<TxResult, ChainReadError>;
}

/// Bounds one chain call by `timeout`. Expiry surfaces as
/// [`ChainReadError::Timeout`] tagged with `call`.
pub async fn with_timeout<T, F>(
    call: &'static str,
    timeout: Duration,
    fut: F,
) -> Result<T, ChainReadError>
where
    F: Future<Output = Result<T, ChainReadError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(call, timeout_ms = timeout.as_millis() as u64, "Chain call timed out");
            Err(ChainReadError::Timeout {
                call,
                timeout_ms: timeout.as_millis() as u64,
            })
        }
    }
}
