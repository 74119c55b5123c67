//! # Test Helpers
//!
//! In-memory [`EvmClient`] for unit and integration tests. Enabled for this
//! crate's tests and for dependents through the `test-helpers` feature.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::entities::{
    AggregationProof, CrossChainAddress, ExtraData, Hash, NetworkConfig, OperatorVotingPower,
    OperatorWithKeys, TxResult, ZERO_HASH,
};
use crate::errors::ChainReadError;
use crate::evm::EvmClient;
use crate::header::ValidatorSetHeader;

/// Seconds per epoch used to derive capture timestamps.
pub const MOCK_EPOCH_DURATION: u64 = 600;

/// Timestamp of epoch 0.
pub const MOCK_GENESIS_TIMESTAMP: u64 = 1_700_000_000;

#[derive(Default)]
struct MockState {
    current_epoch: u64,
    config: Option<NetworkConfig>,
    voting_powers: HashMap<CrossChainAddress, Vec<OperatorVotingPower>>,
    keys: HashMap<CrossChainAddress, Vec<OperatorWithKeys>>,
    headers: HashMap<CrossChainAddress, BTreeMap<u64, Hash>>,
    failing_calls: HashSet<&'static str>,
    delay: Option<Duration>,
    calls: HashMap<&'static str, usize>,
    commits: Vec<(CrossChainAddress, ValidatorSetHeader)>,
}

/// Mock chain client. Replica commits made through
/// [`EvmClient::commit_valset_header`] and [`EvmClient::set_genesis`] are
/// visible to subsequent header reads.
#[derive(Default)]
pub struct MockEvmClient {
    state: RwLock<MockState>,
}

impl MockEvmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_epoch(&self, epoch: u64) {
        self.state.write().current_epoch = epoch;
    }

    pub fn set_config(&self, config: NetworkConfig) {
        self.state.write().config = Some(config);
    }

    pub fn set_voting_powers(&self, provider: CrossChainAddress, powers: Vec<OperatorVotingPower>) {
        self.state.write().voting_powers.insert(provider, powers);
    }

    pub fn set_keys(&self, provider: CrossChainAddress, keys: Vec<OperatorWithKeys>) {
        self.state.write().keys.insert(provider, keys);
    }

    /// Stores `hash` as the replica's header for `epoch`.
    pub fn set_header_hash(&self, replica: CrossChainAddress, epoch: u64, hash: Hash) {
        self.state
            .write()
            .headers
            .entry(replica)
            .or_default()
            .insert(epoch, hash);
    }

    /// Makes every subsequent `call` fail until [`Self::clear_failures`].
    pub fn fail_call(&self, call: &'static str) {
        self.state.write().failing_calls.insert(call);
    }

    pub fn clear_failures(&self) {
        self.state.write().failing_calls.clear();
    }

    /// Delays every call, for timeout tests.
    pub fn set_delay(&self, delay: Option<Duration>) {
        self.state.write().delay = delay;
    }

    pub fn call_count(&self, call: &'static str) -> usize {
        self.state.read().calls.get(call).copied().unwrap_or(0)
    }

    pub fn commits(&self) -> Vec<(CrossChainAddress, ValidatorSetHeader)> {
        self.state.read().commits.clone()
    }

    async fn enter(&self, call: &'static str) -> Result<(), ChainReadError> {
        let (delay, failing) = {
            let mut state = self.state.write();
            *state.calls.entry(call).or_insert(0) += 1;
            (state.delay, state.failing_calls.contains(call))
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(ChainReadError::CallFailed {
                call,
                reason: "mock failure".to_string(),
            });
        }
        Ok(())
    }

    fn store_header(&self, replica: &CrossChainAddress, header: &ValidatorSetHeader) -> TxResult {
        let hash = header.hash();
        let mut state = self.state.write();
        state
            .headers
            .entry(*replica)
            .or_default()
            .insert(header.epoch, hash);
        state.commits.push((*replica, header.clone()));
        TxResult { tx_hash: hash }
    }
}

#[async_trait]
impl EvmClient for MockEvmClient {
    async fn get_current_epoch(&self) -> Result<u64, ChainReadError> {
        self.enter("get_current_epoch").await?;
        Ok(self.state.read().current_epoch)
    }

    async fn get_epoch_start(&self, epoch: u64) -> Result<u64, ChainReadError> {
        self.enter("get_epoch_start").await?;
        Ok(MOCK_GENESIS_TIMESTAMP + epoch * MOCK_EPOCH_DURATION)
    }

    async fn get_config(&self, _timestamp: u64) -> Result<NetworkConfig, ChainReadError> {
        self.enter("get_config").await?;
        self.state
            .read()
            .config
            .clone()
            .ok_or_else(|| ChainReadError::CallFailed {
                call: "get_config",
                reason: "no config deployed".to_string(),
            })
    }

    async fn get_voting_powers(
        &self,
        provider: &CrossChainAddress,
        _timestamp: u64,
    ) -> Result<Vec<OperatorVotingPower>, ChainReadError> {
        self.enter("get_voting_powers").await?;
        Ok(self
            .state
            .read()
            .voting_powers
            .get(provider)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_keys(
        &self,
        provider: &CrossChainAddress,
        _timestamp: u64,
    ) -> Result<Vec<OperatorWithKeys>, ChainReadError> {
        self.enter("get_keys").await?;
        Ok(self
            .state
            .read()
            .keys
            .get(provider)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_last_committed_header_epoch(
        &self,
        replica: &CrossChainAddress,
    ) -> Result<u64, ChainReadError> {
        self.enter("get_last_committed_header_epoch").await?;
        Ok(self
            .state
            .read()
            .headers
            .get(replica)
            .and_then(|h| h.keys().next_back().copied())
            .unwrap_or(0))
    }

    async fn get_header_hash_at(
        &self,
        replica: &CrossChainAddress,
        epoch: u64,
    ) -> Result<Hash, ChainReadError> {
        self.enter("get_header_hash_at").await?;
        Ok(self
            .state
            .read()
            .headers
            .get(replica)
            .and_then(|h| h.get(&epoch).copied())
            .unwrap_or(ZERO_HASH))
    }

    async fn is_valset_header_committed_at(
        &self,
        replica: &CrossChainAddress,
        epoch: u64,
    ) -> Result<bool, ChainReadError> {
        self.enter("is_valset_header_committed_at").await?;
        Ok(self
            .state
            .read()
            .headers
            .get(replica)
            .map(|h| h.contains_key(&epoch))
            .unwrap_or(false))
    }

    async fn commit_valset_header(
        &self,
        replica: &CrossChainAddress,
        header: &ValidatorSetHeader,
        _extra_data: &[ExtraData],
        _proof: &AggregationProof,
    ) -> Result<TxResult, ChainReadError> {
        self.enter("commit_valset_header").await?;
        Ok(self.store_header(replica, header))
    }

    async fn set_genesis(
        &self,
        replica: &CrossChainAddress,
        header: &ValidatorSetHeader,
        _extra_data: &[ExtraData],
    ) -> Result<TxResult, ChainReadError> {
        self.enter("set_genesis").await?;
        Ok(self.store_header(replica, header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{KeyTag, U256};

    fn replica() -> CrossChainAddress {
        CrossChainAddress {
            chain_id: 1,
            address: [3; 20],
        }
    }

    fn header(epoch: u64) -> ValidatorSetHeader {
        ValidatorSetHeader {
            version: 1,
            required_key_tag: KeyTag::bls_bn254(15),
            epoch,
            capture_timestamp: 0,
            quorum_threshold: U256::one(),
            total_voting_power: U256::one(),
            validators_ssz_root: [0; 32],
            previous_header_hash: ZERO_HASH,
        }
    }

    #[tokio::test]
    async fn test_genesis_is_visible_to_header_reads() {
        let client = MockEvmClient::new();
        client.set_genesis(&replica(), &header(4), &[]).await.unwrap();

        assert_eq!(
            client.get_last_committed_header_epoch(&replica()).await.unwrap(),
            4
        );
        assert_eq!(
            client.get_header_hash_at(&replica(), 4).await.unwrap(),
            header(4).hash()
        );
        assert_eq!(
            client.get_header_hash_at(&replica(), 5).await.unwrap(),
            ZERO_HASH
        );
        assert_eq!(client.commits().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_call_reports_name() {
        let client = MockEvmClient::new();
        client.fail_call("get_keys");
        let err = client.get_keys(&replica(), 0).await.unwrap_err();
        assert_eq!(err.call(), "get_keys");
        assert_eq!(client.call_count("get_keys"), 1);

        client.clear_failures();
        assert!(client.get_keys(&replica(), 0).await.unwrap().is_empty());
    }
}
