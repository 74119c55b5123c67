//! # SSZ Merkleization
//!
//! `hash_tree_root` of the validator list, as committed in the header's
//! `validators_ssz_root`. Fields are packed into 32-byte chunks here;
//! merkleization and length mix-in come from `tree_hash`.
//!
//! ```text
//! Validator { operator: Bytes20, voting_power: uint256, is_active: bool,
//!             keys:   List[Key   { tag: uint8, payload_hash: Bytes32 }, 128],
//!             vaults: List[Vault { chain_id: uint64, vault: Bytes20, voting_power: uint256 }, 32] }
//! ```

use shared_crypto::keccak256;

use crate::entities::{
    Address, Hash, Validator, ValidatorKey, ValidatorVault, KEYS_LIST_MAX, U256, VAULTS_LIST_MAX,
    VALIDATORS_LIST_MAX,
};

fn chunk_u256(value: U256) -> Hash {
    let mut chunk = [0u8; 32];
    value.to_little_endian(&mut chunk);
    chunk
}

fn chunk_u64(value: u64) -> Hash {
    let mut chunk = [0u8; 32];
    chunk[..8].copy_from_slice(&value.to_le_bytes());
    chunk
}

fn chunk_u8(value: u8) -> Hash {
    let mut chunk = [0u8; 32];
    chunk[0] = value;
    chunk
}

fn chunk_address(address: &Address) -> Hash {
    let mut chunk = [0u8; 32];
    chunk[..20].copy_from_slice(address);
    chunk
}

/// Merkleizes `chunks` into a tree sized for `limit` leaves, padding with
/// zero subtrees.
pub fn merkleize(chunks: &[Hash], limit: usize) -> Hash {
    tree_hash::merkle_root(&chunks.concat(), limit).0
}

pub fn mix_in_length(root: &Hash, length: usize) -> Hash {
    tree_hash::mix_in_length(&tree_hash::Hash256::from(*root), length).0
}

fn container_root(fields: &[Hash]) -> Hash {
    merkleize(fields, fields.len())
}

fn key_root(key: &ValidatorKey) -> Hash {
    container_root(&[chunk_u8(key.tag.0), keccak256(&key.payload)])
}

fn vault_root(vault: &ValidatorVault) -> Hash {
    container_root(&[
        chunk_u64(vault.chain_id),
        chunk_address(&vault.vault),
        chunk_u256(vault.voting_power),
    ])
}

fn list_root<T>(items: &[T], limit: usize, element_root: impl Fn(&T) -> Hash) -> Hash {
    let roots: Vec<Hash> = items.iter().take(limit).map(element_root).collect();
    mix_in_length(&merkleize(&roots, limit), roots.len())
}

pub fn validator_root(validator: &Validator) -> Hash {
    container_root(&[
        chunk_address(&validator.operator),
        chunk_u256(validator.voting_power),
        chunk_u8(validator.is_active as u8),
        list_root(&validator.keys, KEYS_LIST_MAX, key_root),
        list_root(&validator.vaults, VAULTS_LIST_MAX, vault_root),
    ])
}

/// Root of the full validator list.
pub fn validators_root(validators: &[Validator]) -> Hash {
    list_root(validators, VALIDATORS_LIST_MAX, validator_root)
}
