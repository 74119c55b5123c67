//! # Test Harness
//!
//! One mock chain with `n` BLS validators of equal stake, and every relay
//! service wired to it the way a node wires them.

use std::sync::Arc;

use rl_01_valset_deriver::{DeriverConfig, ValidatorSetDeriver};
use rl_02_aggregator::testing::{keypairs, sign_all, TEST_KEY_TAG};
use rl_03_growth_strategy::{GrowthConfig, GrowthService};
use rl_04_status_tracker::{InMemoryRepo, StatusTracker, TrackerConfig, ValsetListener};
use shared_crypto::BlsKeyPair;
use shared_types::testing::MockEvmClient;
use shared_types::{
    CrossChainAddress, GrowthStrategyType, Hash, NetworkConfig, OperatorVotingPower,
    OperatorWithKeys, QuorumThreshold, Signature, ValidatorKey, VaultVotingPower,
    VerificationType, U256,
};

/// Stake of every harness validator.
pub const VALIDATOR_POWER: u64 = 100;

pub type Deriver = ValidatorSetDeriver<MockEvmClient>;
pub type Growth = GrowthService<MockEvmClient>;
pub type Tracker = StatusTracker<MockEvmClient, InMemoryRepo>;
pub type Listener = ValsetListener<InMemoryRepo, Deriver, Growth>;

pub fn voting_power_provider() -> CrossChainAddress {
    CrossChainAddress {
        chain_id: 1,
        address: [0xa1; 20],
    }
}

pub fn keys_provider() -> CrossChainAddress {
    CrossChainAddress {
        chain_id: 1,
        address: [0xb1; 20],
    }
}

pub fn replica(id: u8) -> CrossChainAddress {
    CrossChainAddress {
        chain_id: 10 + id as u64,
        address: [0xc0 | id; 20],
    }
}

pub fn operator(index: usize) -> [u8; 20] {
    [index as u8 + 1; 20]
}

/// 67% quorum over the harness key tag.
pub fn network_config(
    verification_type: VerificationType,
    replicas: Vec<CrossChainAddress>,
    growth_strategy: GrowthStrategyType,
) -> NetworkConfig {
    NetworkConfig {
        voting_power_providers: vec![voting_power_provider()],
        keys_provider: keys_provider(),
        replicas,
        verification_type,
        min_inclusion_voting_power: U256::zero(),
        max_voting_power: U256::zero(),
        max_validators_count: U256::zero(),
        required_key_tags: vec![TEST_KEY_TAG],
        quorum_thresholds: vec![QuorumThreshold {
            key_tag: TEST_KEY_TAG,
            threshold_pct: U256::exp10(16) * 67,
        }],
        required_header_key_tag: TEST_KEY_TAG,
        max_missing_epochs: 0,
        growth_strategy,
    }
}

pub struct Harness {
    pub evm: Arc<MockEvmClient>,
    pub keys: Vec<BlsKeyPair>,
    pub config: NetworkConfig,
    pub repo: Arc<InMemoryRepo>,
    pub deriver: Arc<Deriver>,
    pub growth: Arc<Growth>,
}

impl Harness {
    pub fn new(validators: usize, config: NetworkConfig) -> Self {
        let evm = Arc::new(MockEvmClient::new());
        let keys = keypairs(validators);

        evm.set_config(config.clone());
        evm.set_voting_powers(
            voting_power_provider(),
            (0..validators)
                .map(|i| OperatorVotingPower {
                    operator: operator(i),
                    vaults: vec![VaultVotingPower {
                        vault: operator(i),
                        voting_power: U256::from(VALIDATOR_POWER),
                    }],
                })
                .collect(),
        );
        evm.set_keys(
            keys_provider(),
            keys.iter()
                .enumerate()
                .map(|(i, kp)| OperatorWithKeys {
                    operator: operator(i),
                    keys: vec![ValidatorKey {
                        tag: TEST_KEY_TAG,
                        payload: kp.public_key().compressed_g1().to_vec(),
                    }],
                })
                .collect(),
        );

        let deriver = Arc::new(ValidatorSetDeriver::new(
            evm.clone(),
            DeriverConfig::for_testing(),
        ));
        let growth = Arc::new(GrowthService::new(evm.clone(), GrowthConfig::for_testing()));

        Self {
            evm,
            keys,
            config,
            repo: Arc::new(InMemoryRepo::new()),
            deriver,
            growth,
        }
    }

    pub fn tracker(&self) -> Tracker {
        StatusTracker::new(
            self.evm.clone(),
            self.repo.clone(),
            TrackerConfig::for_testing(),
        )
    }

    pub fn listener(&self) -> Listener {
        ValsetListener::new(self.repo.clone(), self.deriver.clone(), self.growth.clone())
    }

    /// Signatures over `message` from the validators at `signers`.
    pub fn sign(&self, signers: std::ops::Range<usize>, message: &Hash) -> Vec<Signature> {
        sign_all(&self.keys[signers], message)
    }
}
