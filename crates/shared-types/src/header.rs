//! # Validator Set Header
//!
//! The compact summary of a validator set that settlement replicas store.
//! Its keccak256 over the ABI encoding is the value compared against every
//! replica when tracking commitment.

use serde::{Deserialize, Serialize};
use shared_crypto::keccak256;

use crate::abi;
use crate::entities::{Hash, KeyTag, U256};

/// Hash reported by the `NoSettlement` growth strategy.
pub fn no_settlement_hash() -> Hash {
    keccak256(b"NoSettlement")
}

/// Hashable summary of a [`crate::ValidatorSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSetHeader {
    pub version: u8,
    pub required_key_tag: KeyTag,
    pub epoch: u64,
    pub capture_timestamp: u64,
    pub quorum_threshold: U256,
    pub total_voting_power: U256,
    /// SSZ hash tree root of the validator list.
    pub validators_ssz_root: Hash,
    pub previous_header_hash: Hash,
}

impl ValidatorSetHeader {
    /// `abi.encode(uint8, uint8, uint48, uint48, uint256, uint256, bytes32, bytes32)`
    pub fn abi_encode(&self) -> Vec<u8> {
        abi::concat(&[
            abi::encode_u8(self.version),
            abi::encode_u8(self.required_key_tag.0),
            abi::encode_u64(self.epoch),
            abi::encode_u64(self.capture_timestamp),
            abi::encode_u256(self.quorum_threshold),
            abi::encode_u256(self.total_voting_power),
            abi::encode_bytes32(&self.validators_ssz_root),
            abi::encode_bytes32(&self.previous_header_hash),
        ])
    }

    pub fn hash(&self) -> Hash {
        keccak256(&self.abi_encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> ValidatorSetHeader {
        ValidatorSetHeader {
            version: 1,
            required_key_tag: KeyTag::bls_bn254(15),
            epoch: 7,
            capture_timestamp: 1_700_000_000,
            quorum_threshold: U256::from(671),
            total_voting_power: U256::from(1000),
            validators_ssz_root: [9u8; 32],
            previous_header_hash: [0u8; 32],
        }
    }

    #[test]
    fn test_encoding_is_eight_words() {
        assert_eq!(header().abi_encode().len(), 8 * 32);
    }

    #[test]
    fn test_hash_commits_to_every_field() {
        let base = header().hash();

        let mut changed = header();
        changed.previous_header_hash = [1u8; 32];
        assert_ne!(base, changed.hash());

        let mut changed = header();
        changed.epoch = 8;
        assert_ne!(base, changed.hash());
    }

    #[test]
    fn test_no_settlement_hash_is_not_zero() {
        assert_ne!(no_settlement_hash(), [0u8; 32]);
    }
}
