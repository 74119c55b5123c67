//! Active validators holding a key of the requested tag, with their key
//! decompressed.

use shared_crypto::bn254::decompress_g1;
use shared_crypto::G1Affine;
use shared_types::{Address, KeyTag, KeyType, ValidatorSet, U256};

use crate::domain::AggregatorError;

/// One active validator's BLS key under a fixed tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedValidator {
    pub operator: Address,
    pub key: G1Affine,
    /// On-chain payload (compressed G1).
    pub compressed: [u8; 32],
    pub voting_power: U256,
}

pub fn ensure_bls(key_tag: KeyTag) -> Result<(), AggregatorError> {
    if key_tag.key_type() != KeyType::BlsBn254 {
        return Err(AggregatorError::UnsupportedKeyType(key_tag));
    }
    Ok(())
}

/// Active validators holding a `key_tag` key, in validator-set order.
/// Validators without such a key are skipped.
pub fn keyed_validators(
    valset: &ValidatorSet,
    key_tag: KeyTag,
) -> Result<Vec<KeyedValidator>, AggregatorError> {
    ensure_bls(key_tag)?;

    let mut keyed = Vec::new();
    for validator in valset.active_validators() {
        let Some(key) = validator.find_key(key_tag) else {
            continue;
        };
        let compressed: [u8; 32] = key.payload.as_slice().try_into().map_err(|_| {
            AggregatorError::InvalidKey(format!(
                "operator 0x{} has a {}-byte {} key",
                hex::encode(validator.operator),
                key.payload.len(),
                key_tag
            ))
        })?;
        let point = decompress_g1(&compressed).map_err(|e| {
            AggregatorError::InvalidKey(format!(
                "operator 0x{}: {}",
                hex::encode(validator.operator),
                e
            ))
        })?;
        keyed.push(KeyedValidator {
            operator: validator.operator,
            key: point,
            compressed,
            voting_power: validator.voting_power,
        });
    }

    if keyed.is_empty() {
        return Err(AggregatorError::KeyNotFound {
            key_tag,
            epoch: valset.epoch,
        });
    }
    Ok(keyed)
}

/// Canonical on-chain order: compressed key ascending.
pub fn sort_by_key(keyed: &mut [KeyedValidator]) {
    keyed.sort_by(|a, b| a.compressed.cmp(&b.compressed));
}
