//! Signature and key aggregation shared by both schemes.

use std::collections::BTreeSet;

use shared_crypto::bn254::{aggregate_g1, aggregate_g2};
use shared_crypto::{BlsPublicKey, BlsSignature, G1Affine, G2Affine};
use shared_types::{Address, Hash, KeyTag, Signature, ValidatorSet};

use crate::domain::keyed::ensure_bls;
use crate::domain::AggregatorError;

/// Sum of the signers' signatures and G2 keys.
#[derive(Debug, Clone)]
pub struct SignerAggregate {
    pub agg_signature: G1Affine,
    pub agg_key_g2: G2Affine,
    pub signers: BTreeSet<Address>,
}

/// Checks every signature against the round and sums them.
///
/// Signatures are not verified individually; the aggregate is checked once
/// when the proof is verified.
pub fn aggregate_signatures(
    valset: &ValidatorSet,
    key_tag: KeyTag,
    message_hash: &Hash,
    signatures: &[Signature],
) -> Result<SignerAggregate, AggregatorError> {
    ensure_bls(key_tag)?;
    if signatures.is_empty() {
        return Err(AggregatorError::NoSignatures);
    }

    let mut sig_points = Vec::with_capacity(signatures.len());
    let mut g2_keys = Vec::with_capacity(signatures.len());
    let mut signers = BTreeSet::new();

    for signature in signatures {
        if signature.key_tag != key_tag {
            return Err(AggregatorError::KeyTagMismatch {
                expected: key_tag,
                got: signature.key_tag,
            });
        }
        if &signature.message_hash != message_hash {
            return Err(AggregatorError::MessageHashMismatch {
                expected: *message_hash,
                got: signature.message_hash,
            });
        }

        let public_key = BlsPublicKey::from_bytes(&signature.public_key)
            .map_err(|e| AggregatorError::InvalidKey(e.to_string()))?;
        let compressed = public_key.compressed_g1();
        let validator = valset
            .find_validator_by_key(key_tag, &compressed)
            .ok_or_else(|| AggregatorError::ValidatorNotFound {
                key_tag,
                key: hex::encode(compressed),
            })?;
        if !signers.insert(validator.operator) {
            return Err(AggregatorError::DuplicateSigner {
                operator: hex::encode(validator.operator),
            });
        }

        let point = BlsSignature::from_bytes(&signature.signature)?;
        sig_points.push(*point.point());
        g2_keys.push(*public_key.g2());
    }

    Ok(SignerAggregate {
        agg_signature: aggregate_g1(&sig_points),
        agg_key_g2: aggregate_g2(&g2_keys),
        signers,
    })
}
