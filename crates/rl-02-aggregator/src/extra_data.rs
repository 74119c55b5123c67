//! # Extra Data
//!
//! Key/value commitments published next to a header so settlement contracts
//! can verify proofs without the full validator list.
//!
//! ```text
//! key(vt, name)           = keccak256(abi.encode(uint32 vt, keccak256(name)))
//! key(vt, "KeyTag", t, n) = keccak256(abi.encode(uint32 vt, keccak256("KeyTag"), uint8 t, keccak256(n)))
//! ```

use shared_crypto::bn254::{aggregate_g1, compress_g1, g1_to_bytes};
use shared_crypto::keccak256;
use shared_types::{abi, ExtraData, Hash, KeyTag, KeyType, ValidatorSet, VerificationType};

use crate::domain::circuit::{mimc_accumulator, normalize};
use crate::domain::keyed::{keyed_validators, sort_by_key};
use crate::domain::AggregatorError;

pub const TOTAL_ACTIVE_VALIDATORS: &str = "TotalActiveValidators";
pub const TOTAL_ACTIVE_VOTING_POWER: &str = "TotalActiveVotingPower";
pub const VALIDATOR_SET_HASH: &str = "ValidatorSetHash";
pub const AGG_PUBLIC_KEY_G1: &str = "AggPublicKeyG1";
const KEY_TAG_PREFIX: &str = "KeyTag";

/// Global entry key.
pub fn extra_data_key(verification_type: VerificationType, name: &str) -> Hash {
    keccak256(&abi::concat(&[
        abi::encode_u32(verification_type.as_u32()),
        keccak256(name.as_bytes()),
    ]))
}

/// Per key tag entry key.
pub fn extra_data_key_tagged(verification_type: VerificationType, key_tag: KeyTag, name: &str) -> Hash {
    keccak256(&abi::concat(&[
        abi::encode_u32(verification_type.as_u32()),
        keccak256(KEY_TAG_PREFIX.as_bytes()),
        abi::encode_u8(key_tag.0),
        keccak256(name.as_bytes()),
    ]))
}

/// Active validators holding a key for the set's required key tag: the
/// population the ZK circuit commits to and the prover verifies against.
fn circuit_validator_count(valset: &ValidatorSet) -> usize {
    valset
        .active_validators()
        .filter(|v| v.find_key(valset.required_key_tag).is_some())
        .count()
}

/// Entries for `verification_type`, sorted by key. Non-BLS tags are skipped.
pub fn generate(
    verification_type: VerificationType,
    valset: &ValidatorSet,
    key_tags: &[KeyTag],
) -> Result<Vec<ExtraData>, AggregatorError> {
    let mut entries = Vec::new();

    match verification_type {
        VerificationType::Zk => entries.push(ExtraData {
            key: extra_data_key(verification_type, TOTAL_ACTIVE_VALIDATORS),
            value: abi::encode_u64(circuit_validator_count(valset) as u64),
        }),
        VerificationType::Simple => entries.push(ExtraData {
            key: extra_data_key(verification_type, TOTAL_ACTIVE_VOTING_POWER),
            value: abi::encode_u256(valset.total_active_voting_power()),
        }),
    }

    for &key_tag in key_tags {
        if key_tag.key_type() != KeyType::BlsBn254 {
            continue;
        }
        let keyed = keyed_validators(valset, key_tag)?;
        match verification_type {
            VerificationType::Zk => {
                let data = normalize(keyed, |_| false)?;
                entries.push(ExtraData {
                    key: extra_data_key_tagged(verification_type, key_tag, VALIDATOR_SET_HASH),
                    value: mimc_accumulator(&data),
                });
            }
            VerificationType::Simple => {
                let mut sorted = keyed;
                sort_by_key(&mut sorted);

                // abi.encode of a dynamic (x, y, votingPower)[]
                let mut encoded = Vec::with_capacity(64 + sorted.len() * 96);
                encoded.extend_from_slice(&abi::encode_u64(32));
                encoded.extend_from_slice(&abi::encode_u64(sorted.len() as u64));
                for validator in &sorted {
                    encoded.extend_from_slice(&g1_to_bytes(&validator.key));
                    encoded.extend_from_slice(&abi::encode_u256(validator.voting_power));
                }
                entries.push(ExtraData {
                    key: extra_data_key_tagged(verification_type, key_tag, VALIDATOR_SET_HASH),
                    value: keccak256(&encoded),
                });

                let agg_key = aggregate_g1(sorted.iter().map(|v| &v.key));
                entries.push(ExtraData {
                    key: extra_data_key_tagged(verification_type, key_tag, AGG_PUBLIC_KEY_G1),
                    value: compress_g1(&agg_key),
                });
            }
        }
    }

    entries.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{keypairs, validator_set, TEST_KEY_TAG};

    #[test]
    fn test_key_layout() {
        let expected = keccak256(
            &[
                abi::encode_u32(1),
                keccak256(b"TotalActiveVotingPower"),
            ]
            .concat(),
        );
        assert_eq!(
            extra_data_key(VerificationType::Simple, TOTAL_ACTIVE_VOTING_POWER),
            expected
        );
        assert_ne!(
            extra_data_key_tagged(VerificationType::Simple, TEST_KEY_TAG, VALIDATOR_SET_HASH),
            extra_data_key_tagged(VerificationType::Zk, TEST_KEY_TAG, VALIDATOR_SET_HASH),
        );
    }

    #[test]
    fn test_simple_entries() {
        let keys = keypairs(3);
        let valset = validator_set(&keys, &[100, 200, 300], 401);
        let entries = generate(VerificationType::Simple, &valset, &[TEST_KEY_TAG]).unwrap();

        assert_eq!(entries.len(), 3);
        assert!(entries.windows(2).all(|w| w[0].key < w[1].key));

        let power = entries
            .iter()
            .find(|e| e.key == extra_data_key(VerificationType::Simple, TOTAL_ACTIVE_VOTING_POWER))
            .unwrap();
        assert_eq!(power.value, abi::encode_u256(600u64.into()));

        let agg = entries
            .iter()
            .find(|e| {
                e.key == extra_data_key_tagged(VerificationType::Simple, TEST_KEY_TAG, AGG_PUBLIC_KEY_G1)
            })
            .unwrap();
        let expected = aggregate_g1(keys.iter().map(|k| k.public_key().g1()));
        assert_eq!(agg.value, compress_g1(&expected));
    }

    #[test]
    fn test_zk_entries_deterministic() {
        let keys = keypairs(3);
        let valset = validator_set(&keys, &[100, 200, 300], 401);
        let mut shuffled = valset.clone();
        shuffled.validators.reverse();

        let a = generate(VerificationType::Zk, &valset, &[TEST_KEY_TAG]).unwrap();
        let b = generate(VerificationType::Zk, &shuffled, &[TEST_KEY_TAG]).unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);

        let count = a
            .iter()
            .find(|e| e.key == extra_data_key(VerificationType::Zk, TOTAL_ACTIVE_VALIDATORS))
            .unwrap();
        assert_eq!(count.value, abi::encode_u64(3));
    }

    #[test]
    fn test_zk_count_covers_keyed_validators_only() {
        let keys = keypairs(3);
        let mut valset = validator_set(&keys, &[100, 200, 300], 401);
        valset.validators[0].keys[0].tag = KeyTag::bls_bn254(1);
        assert_eq!(valset.total_active_validators(), 3);

        let entries = generate(VerificationType::Zk, &valset, &[TEST_KEY_TAG]).unwrap();
        let count = entries
            .iter()
            .find(|e| e.key == extra_data_key(VerificationType::Zk, TOTAL_ACTIVE_VALIDATORS))
            .unwrap();
        assert_eq!(count.value, abi::encode_u64(2));
        assert_eq!(keyed_validators(&valset, TEST_KEY_TAG).unwrap().len(), 2);
    }

    #[test]
    fn test_non_bls_tags_skipped() {
        let keys = keypairs(2);
        let valset = validator_set(&keys, &[100, 200], 201);
        let entries = generate(
            VerificationType::Simple,
            &valset,
            &[TEST_KEY_TAG, KeyTag::ecdsa_secp256k1(0)],
        )
        .unwrap();
        assert_eq!(entries.len(), 3);
    }
}
