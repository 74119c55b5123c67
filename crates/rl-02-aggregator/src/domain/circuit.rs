//! Circuit-side view of a validator set: fixed-size buckets, zero padding
//! and the MiMC accumulator the proof commits to.

use ark_ec::AffineRepr;
use ark_ff::PrimeField;
use shared_crypto::bn254::g1_to_bytes;
use shared_crypto::{Fr, G1Affine, MimcHasher};
use shared_types::{abi, U256};

use crate::domain::keyed::{sort_by_key, KeyedValidator};
use crate::domain::AggregatorError;
use crate::ports::ValidatorData;

/// Validator counts with a compiled circuit.
pub const CIRCUIT_SIZES: [usize; 3] = [10, 100, 1000];

/// Smallest circuit fitting `count` validators.
pub fn circuit_size(count: usize) -> Result<usize, AggregatorError> {
    CIRCUIT_SIZES
        .iter()
        .copied()
        .find(|size| *size >= count)
        .ok_or(AggregatorError::TooManyValidators {
            count,
            max: CIRCUIT_SIZES[CIRCUIT_SIZES.len() - 1],
        })
}

fn zero_entry() -> ValidatorData {
    ValidatorData {
        key: G1Affine::zero(),
        voting_power: U256::zero(),
        is_non_signer: false,
    }
}

/// Sorts by compressed key and pads with zero entries to the circuit size.
pub fn normalize(
    mut keyed: Vec<KeyedValidator>,
    is_non_signer: impl Fn(&KeyedValidator) -> bool,
) -> Result<Vec<ValidatorData>, AggregatorError> {
    let size = circuit_size(keyed.len())?;
    sort_by_key(&mut keyed);

    let mut data: Vec<ValidatorData> = keyed
        .iter()
        .map(|v| ValidatorData {
            key: v.key,
            voting_power: v.voting_power,
            is_non_signer: is_non_signer(v),
        })
        .collect();
    data.resize(size, zero_entry());
    Ok(data)
}

fn to_fr(bytes: &[u8]) -> Fr {
    Fr::from_be_bytes_mod_order(bytes)
}

/// MiMC over `x, y, voting_power` of every normalized entry. Signer flags
/// are not absorbed, so the value depends on the validator set only.
pub fn mimc_accumulator(data: &[ValidatorData]) -> [u8; 32] {
    let mut hasher = MimcHasher::new();
    for entry in data {
        let point = g1_to_bytes(&entry.key);
        hasher
            .update(to_fr(&point[..32]))
            .update(to_fr(&point[32..]))
            .update(to_fr(&abi::encode_u256(entry.voting_power)));
    }
    hasher.finalize_bytes()
}

/// Voting power of entries not flagged as non-signers.
pub fn signers_voting_power(data: &[ValidatorData]) -> U256 {
    data.iter()
        .filter(|d| !d.is_non_signer)
        .fold(U256::zero(), |acc, d| acc.saturating_add(d.voting_power))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_crypto::bn254::compress_g1;
    use shared_crypto::BlsKeyPair;

    fn keyed(seed: u8, power: u64) -> KeyedValidator {
        let kp = BlsKeyPair::from_secret_bytes(&[seed; 32]).unwrap();
        let key = *kp.public_key().g1();
        KeyedValidator {
            operator: [seed; 20],
            key,
            compressed: compress_g1(&key),
            voting_power: U256::from(power),
        }
    }

    #[test]
    fn test_circuit_size_buckets() {
        assert_eq!(circuit_size(1).unwrap(), 10);
        assert_eq!(circuit_size(10).unwrap(), 10);
        assert_eq!(circuit_size(11).unwrap(), 100);
        assert_eq!(circuit_size(1000).unwrap(), 1000);
        assert!(matches!(
            circuit_size(1001),
            Err(AggregatorError::TooManyValidators { count: 1001, max: 1000 })
        ));
    }

    #[test]
    fn test_normalize_pads_and_sorts() {
        let data = normalize(vec![keyed(1, 10), keyed(2, 20), keyed(3, 30)], |_| false).unwrap();
        assert_eq!(data.len(), 10);
        assert!(data[3..].iter().all(|d| d.voting_power.is_zero()));

        let compressed: Vec<[u8; 32]> = data[..3].iter().map(|d| compress_g1(&d.key)).collect();
        let mut sorted = compressed.clone();
        sorted.sort();
        assert_eq!(compressed, sorted);
    }

    #[test]
    fn test_accumulator_ignores_signer_flags_and_input_order() {
        let a = normalize(vec![keyed(1, 10), keyed(2, 20)], |_| false).unwrap();
        let b = normalize(vec![keyed(2, 20), keyed(1, 10)], |v| v.operator[0] == 1).unwrap();
        assert_eq!(mimc_accumulator(&a), mimc_accumulator(&b));

        let c = normalize(vec![keyed(1, 10), keyed(2, 21)], |_| false).unwrap();
        assert_ne!(mimc_accumulator(&a), mimc_accumulator(&c));
    }

    #[test]
    fn test_signers_voting_power() {
        let data = normalize(vec![keyed(1, 10), keyed(2, 20)], |v| v.operator[0] == 2).unwrap();
        assert_eq!(signers_voting_power(&data), U256::from(10));
    }
}
