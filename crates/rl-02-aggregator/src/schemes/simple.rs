//! # Simple Scheme
//!
//! Aggregated BLS signature plus the explicit list of committed validators
//! and non-signers. Verification rebuilds the signers' aggregate G1 key from
//! the list and checks one pairing equation.

use bitvec::prelude::*;
use shared_crypto::bn254::{aggregate_g1, hash_to_g1, verify_aggregate};
use shared_types::{AggregationProof, Hash, KeyTag, Signature, ValidatorSet, VerificationType, U256};
use tracing::debug;

use crate::domain::keyed::{keyed_validators, sort_by_key, KeyedValidator};
use crate::domain::signing::aggregate_signatures;
use crate::domain::{AggregatorError, SimpleProof, ValidatorRecord};

/// Keyed active validators in record order.
fn sorted_keyed(
    valset: &ValidatorSet,
    key_tag: KeyTag,
) -> Result<Vec<KeyedValidator>, AggregatorError> {
    let mut keyed = keyed_validators(valset, key_tag)?;
    let max = u16::MAX as usize + 1;
    if keyed.len() > max {
        return Err(AggregatorError::TooManyValidators {
            count: keyed.len(),
            max,
        });
    }
    sort_by_key(&mut keyed);
    Ok(keyed)
}

pub fn aggregate(
    valset: &ValidatorSet,
    key_tag: KeyTag,
    message_hash: &Hash,
    signatures: &[Signature],
) -> Result<AggregationProof, AggregatorError> {
    let aggregate = aggregate_signatures(valset, key_tag, message_hash, signatures)?;
    let keyed = sorted_keyed(valset, key_tag)?;

    let records: Vec<ValidatorRecord> = keyed
        .iter()
        .map(|v| ValidatorRecord {
            key: v.compressed,
            voting_power: v.voting_power,
            is_non_signer: !aggregate.signers.contains(&v.operator),
        })
        .collect();
    let non_signer_indices: Vec<u16> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_non_signer)
        .map(|(i, _)| i as u16)
        .collect();

    debug!(
        epoch = valset.epoch,
        %key_tag,
        signers = aggregate.signers.len(),
        non_signers = non_signer_indices.len(),
        "Aggregated simple proof"
    );

    let proof = SimpleProof {
        agg_signature: aggregate.agg_signature,
        agg_key_g2: aggregate.agg_key_g2,
        records,
        non_signer_indices,
    };
    Ok(AggregationProof {
        verification_type: VerificationType::Simple,
        message_hash: *message_hash,
        proof: proof.encode(),
    })
}

/// `Ok(false)` when the proof does not match the validator set or the
/// pairing check fails; `QuorumNotMet` when it is valid but under-signed.
pub fn verify(
    valset: &ValidatorSet,
    key_tag: KeyTag,
    proof: &AggregationProof,
) -> Result<bool, AggregatorError> {
    let keyed = sorted_keyed(valset, key_tag)?;
    let Some(decoded) = SimpleProof::decode(&proof.proof, keyed.len())? else {
        debug!(epoch = valset.epoch, %key_tag, "Malformed simple proof");
        return Ok(false);
    };

    let records_match = decoded
        .records
        .iter()
        .zip(&keyed)
        .all(|(record, expected)| {
            record.key == expected.compressed && record.voting_power == expected.voting_power
        });
    if !records_match {
        debug!(epoch = valset.epoch, %key_tag, "Proof commits to another validator set");
        return Ok(false);
    }

    let flagged: BitVec = decoded.records.iter().map(|r| r.is_non_signer).collect();
    let mut indexed: BitVec = bitvec![0; keyed.len()];
    let mut previous: Option<u16> = None;
    for &index in &decoded.non_signer_indices {
        // strictly increasing and in range
        if previous.is_some_and(|p| p >= index) || index as usize >= keyed.len() {
            return Ok(false);
        }
        indexed.set(index as usize, true);
        previous = Some(index);
    }
    if flagged != indexed {
        debug!(epoch = valset.epoch, %key_tag, "Non-signer indices disagree with flags");
        return Ok(false);
    }

    let signers: Vec<&KeyedValidator> = keyed
        .iter()
        .zip(flagged.iter())
        .filter(|(_, non_signer)| !**non_signer)
        .map(|(v, _)| v)
        .collect();
    let signed_power = signers
        .iter()
        .fold(U256::zero(), |acc, v| acc.saturating_add(v.voting_power));
    let agg_key_g1 = aggregate_g1(signers.iter().map(|v| &v.key));

    let message_point = hash_to_g1(&proof.message_hash)?;
    if !verify_aggregate(
        &message_point,
        &decoded.agg_signature,
        &agg_key_g1,
        &decoded.agg_key_g2,
    ) {
        debug!(epoch = valset.epoch, %key_tag, "Aggregate signature check failed");
        return Ok(false);
    }

    if signed_power < valset.quorum_threshold {
        return Err(AggregatorError::QuorumNotMet {
            signed: signed_power,
            required: valset.quorum_threshold,
        });
    }
    Ok(true)
}
