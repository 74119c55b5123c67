//! # Core Domain Entities
//!
//! Defines the relay data model shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Keys & Stake**: `KeyTag`, `ValidatorKey`, `ValidatorVault` and the raw
//!   provider reads (`OperatorVotingPower`, `OperatorWithKeys`)
//! - **Validator Set**: `Validator`, `ValidatorSet`, `ValidatorSetStatus`
//! - **Network Config**: `NetworkConfig`, `QuorumThreshold`, `CrossChainAddress`
//! - **Aggregation**: `Signature`, `AggregationProof`, `ExtraData`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConfigValidationError;
use crate::header::ValidatorSetHeader;
use crate::ssz;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte hash (keccak256 unless stated otherwise).
pub type Hash = [u8; 32];

/// A 20-byte EVM address.
pub type Address = [u8; 20];

/// The all-zero hash. Replicas report it for epochs they have not committed.
pub const ZERO_HASH: Hash = [0u8; 32];

/// SSZ list cap for the validator list.
pub const VALIDATORS_LIST_MAX: usize = 1_048_576;

/// SSZ list cap for a validator's vaults.
pub const VAULTS_LIST_MAX: usize = 32;

/// SSZ list cap for a validator's keys.
pub const KEYS_LIST_MAX: usize = 128;

/// Header version produced by this implementation.
pub const VALSET_VERSION: u8 = 1;

/// 100% in the 1e18 fixed-point scale used by quorum thresholds.
pub fn threshold_scale() -> U256 {
    U256::exp10(18)
}

// =============================================================================
// CLUSTER A: KEYS & STAKE
// =============================================================================

/// Curve/type of a validator key, encoded in the high nibble of a [`KeyTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// BLS over BN254 (aggregatable).
    BlsBn254,
    /// ECDSA over secp256k1.
    EcdsaSecp256k1,
    /// Unrecognised type nibble.
    Unknown(u8),
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::BlsBn254 => write!(f, "bls-bn254"),
            KeyType::EcdsaSecp256k1 => write!(f, "ecdsa-secp256k1"),
            KeyType::Unknown(t) => write!(f, "unknown({t})"),
        }
    }
}

/// Typed key identifier: high nibble is the [`KeyType`], low nibble the key id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyTag(pub u8);

impl KeyTag {
    /// BLS-BN254 tag with the given id (0..=15).
    pub const fn bls_bn254(id: u8) -> Self {
        KeyTag(id & 0x0f)
    }

    /// ECDSA-secp256k1 tag with the given id (0..=15).
    pub const fn ecdsa_secp256k1(id: u8) -> Self {
        KeyTag(0x10 | (id & 0x0f))
    }

    pub fn key_type(&self) -> KeyType {
        match self.0 >> 4 {
            0 => KeyType::BlsBn254,
            1 => KeyType::EcdsaSecp256k1,
            other => KeyType::Unknown(other),
        }
    }

    pub fn key_id(&self) -> u8 {
        self.0 & 0x0f
    }
}

impl fmt::Display for KeyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.key_type(), self.key_id())
    }
}

/// A typed public key owned by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorKey {
    pub tag: KeyTag,
    /// Compressed G1 (32 bytes) for BLS-BN254, compressed point (33 bytes) for ECDSA.
    pub payload: Vec<u8>,
}

/// One stake source contributing voting power to an operator on a given chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorVault {
    pub chain_id: u64,
    pub vault: Address,
    pub voting_power: U256,
}

/// Voting power of one vault as reported by a voting-power provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultVotingPower {
    pub vault: Address,
    pub voting_power: U256,
}

/// Raw voting-power read for one operator from one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorVotingPower {
    pub operator: Address,
    pub vaults: Vec<VaultVotingPower>,
}

/// Raw key read for one operator from the keys provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorWithKeys {
    pub operator: Address,
    pub keys: Vec<ValidatorKey>,
}

// =============================================================================
// CLUSTER B: VALIDATOR SET
// =============================================================================

/// A validator as it appears in a derived set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub operator: Address,
    pub voting_power: U256,
    pub is_active: bool,
    pub keys: Vec<ValidatorKey>,
    pub vaults: Vec<ValidatorVault>,
}

impl Validator {
    /// Key of the given tag, if the validator registered one.
    pub fn find_key(&self, tag: KeyTag) -> Option<&ValidatorKey> {
        self.keys.iter().find(|k| k.tag == tag)
    }
}

/// Lifecycle state of a validator set. Ordering follows the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidatorSetStatus {
    /// Derived from chain data, not yet signed.
    Derived,
    /// A quorum proof has been aggregated over the set.
    Aggregated,
    /// Every settlement replica stores the matching header.
    Committed,
}

impl ValidatorSetStatus {
    /// Status never regresses and never repeats.
    pub fn can_transition_to(&self, next: ValidatorSetStatus) -> bool {
        next > *self
    }
}

/// Canonical validator ordering: voting power descending, operator ascending.
pub fn sort_validators(validators: &mut [Validator]) {
    validators.sort_by(|a, b| {
        b.voting_power
            .cmp(&a.voting_power)
            .then_with(|| a.operator.cmp(&b.operator))
    });
}

/// The validator set of one epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSet {
    pub version: u8,
    pub required_key_tag: KeyTag,
    pub epoch: u64,
    pub capture_timestamp: u64,
    pub quorum_threshold: U256,
    /// Sorted by [`sort_validators`].
    pub validators: Vec<Validator>,
    pub status: ValidatorSetStatus,
    pub previous_header_hash: Hash,
}

impl ValidatorSet {
    pub fn active_validators(&self) -> impl Iterator<Item = &Validator> {
        self.validators.iter().filter(|v| v.is_active)
    }

    pub fn total_active_validators(&self) -> usize {
        self.active_validators().count()
    }

    pub fn total_active_voting_power(&self) -> U256 {
        self.active_validators()
            .fold(U256::zero(), |acc, v| acc.saturating_add(v.voting_power))
    }

    /// Active validator holding exactly this key.
    pub fn find_validator_by_key(&self, tag: KeyTag, payload: &[u8]) -> Option<&Validator> {
        self.active_validators().find(|v| {
            v.keys
                .iter()
                .any(|k| k.tag == tag && k.payload.as_slice() == payload)
        })
    }

    /// Compact, hashable summary committed on-chain.
    pub fn header(&self) -> ValidatorSetHeader {
        ValidatorSetHeader {
            version: self.version,
            required_key_tag: self.required_key_tag,
            epoch: self.epoch,
            capture_timestamp: self.capture_timestamp,
            quorum_threshold: self.quorum_threshold,
            total_voting_power: self.total_active_voting_power(),
            validators_ssz_root: ssz::validators_root(&self.validators),
            previous_header_hash: self.previous_header_hash,
        }
    }

    pub fn header_hash(&self) -> Hash {
        self.header().hash()
    }
}

// =============================================================================
// CLUSTER C: NETWORK CONFIG
// =============================================================================

/// A contract deployed on a specific chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CrossChainAddress {
    pub chain_id: u64,
    pub address: Address,
}

impl fmt::Display for CrossChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:0x{}", self.chain_id, hex::encode(self.address))
    }
}

/// Proof scheme used to certify a validator set. Discriminants are the
/// on-chain identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerificationType {
    Zk = 0,
    Simple = 1,
}

impl VerificationType {
    pub fn as_u32(&self) -> u32 {
        *self as u32
    }
}

/// Policy used to pick the canonical last committed header across replicas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStrategyType {
    Newest,
    Sync,
    Async,
    NoSettlement,
}

/// Fraction (1e18 = 100%) of active voting power required for a key tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumThreshold {
    pub key_tag: KeyTag,
    pub threshold_pct: U256,
}

/// On-chain network configuration snapshot at a capture timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub voting_power_providers: Vec<CrossChainAddress>,
    pub keys_provider: CrossChainAddress,
    /// Settlement replicas receiving committed headers.
    pub replicas: Vec<CrossChainAddress>,
    pub verification_type: VerificationType,
    pub min_inclusion_voting_power: U256,
    /// Zero disables the cap.
    pub max_voting_power: U256,
    /// Zero disables the limit.
    pub max_validators_count: U256,
    pub required_key_tags: Vec<KeyTag>,
    pub quorum_thresholds: Vec<QuorumThreshold>,
    pub required_header_key_tag: KeyTag,
    pub max_missing_epochs: u64,
    pub growth_strategy: GrowthStrategyType,
}

impl NetworkConfig {
    pub fn quorum_threshold_for(&self, tag: KeyTag) -> Option<U256> {
        self.quorum_thresholds
            .iter()
            .find(|q| q.key_tag == tag)
            .map(|q| q.threshold_pct)
    }

    /// Required key tags whose keys can be BLS-aggregated.
    pub fn required_bls_key_tags(&self) -> Vec<KeyTag> {
        self.required_key_tags
            .iter()
            .copied()
            .filter(|t| t.key_type() == KeyType::BlsBn254)
            .collect()
    }

    /// Structural checks on a freshly fetched snapshot.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.voting_power_providers.is_empty() {
            return Err(ConfigValidationError::NoVotingPowerProviders);
        }
        if !self.required_key_tags.contains(&self.required_header_key_tag) {
            return Err(ConfigValidationError::HeaderKeyTagNotRequired(
                self.required_header_key_tag,
            ));
        }
        let scale = threshold_scale();
        for (i, threshold) in self.quorum_thresholds.iter().enumerate() {
            if threshold.threshold_pct > scale {
                return Err(ConfigValidationError::ThresholdOutOfRange(threshold.key_tag));
            }
            if self.quorum_thresholds[..i]
                .iter()
                .any(|q| q.key_tag == threshold.key_tag)
            {
                return Err(ConfigValidationError::DuplicateQuorumThreshold(
                    threshold.key_tag,
                ));
            }
        }
        let no_settlement = self.growth_strategy == GrowthStrategyType::NoSettlement;
        if no_settlement != self.replicas.is_empty() {
            return Err(ConfigValidationError::GrowthStrategyMismatch {
                strategy: self.growth_strategy,
                replicas: self.replicas.len(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// CLUSTER D: AGGREGATION
// =============================================================================

/// One validator's signature in a signing round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub key_tag: KeyTag,
    pub message_hash: Hash,
    /// BLS-BN254: uncompressed G1 point (64 bytes).
    pub signature: Vec<u8>,
    /// BLS-BN254: G1 (64 bytes) followed by G2 (128 bytes).
    pub public_key: Vec<u8>,
}

/// Quorum certificate over a validator set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationProof {
    pub verification_type: VerificationType,
    pub message_hash: Hash,
    /// Scheme-specific layout.
    pub proof: Vec<u8>,
}

/// Key/value commitment published alongside a header.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExtraData {
    pub key: Hash,
    pub value: Hash,
}

/// Emitted once a quorum proof has been aggregated for an epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofAggregatedMessage {
    pub epoch: u64,
    pub key_tag: KeyTag,
    pub message_hash: Hash,
    pub proof: AggregationProof,
}

/// Receipt of a chain write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub tx_hash: Hash,
}
