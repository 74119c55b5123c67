//! # ZK Scheme
//!
//! The prover shows that the signers of a normalized validator set carry
//! `signersAggVotingPower` and that their aggregate key verifies the
//! aggregate signature. On-chain, and here, the proof is checked against a
//! single public input:
//!
//! ```text
//! inputHash = keccak256(mimcAccumulator ‖ signersAggVotingPower ‖ H(m).x ‖ H(m).y)
//! ```

use std::sync::Arc;

use shared_crypto::bn254::{g1_to_bytes, hash_to_g1};
use shared_crypto::{keccak256_many, G1Affine};
use shared_types::{abi, AggregationProof, Hash, KeyTag, Signature, ValidatorSet, VerificationType, U256};
use tracing::debug;

use crate::domain::circuit::{mimc_accumulator, normalize};
use crate::domain::keyed::keyed_validators;
use crate::domain::proof::{encode_zk_proof, split_zk_proof};
use crate::domain::signing::aggregate_signatures;
use crate::domain::AggregatorError;
use crate::ports::{ProveInput, Prover};

/// Public input binding a proof to a validator set, a signer power and a message.
pub fn input_hash(accumulator: &[u8; 32], signers_voting_power: U256, message_g1: &G1Affine) -> Hash {
    keccak256_many(&[
        accumulator.as_slice(),
        abi::encode_u256(signers_voting_power).as_slice(),
        g1_to_bytes(message_g1).as_slice(),
    ])
}

pub fn aggregate(
    prover: &Arc<dyn Prover>,
    valset: &ValidatorSet,
    key_tag: KeyTag,
    message_hash: &Hash,
    signatures: &[Signature],
) -> Result<AggregationProof, AggregatorError> {
    let aggregate = aggregate_signatures(valset, key_tag, message_hash, signatures)?;
    let keyed = keyed_validators(valset, key_tag)?;
    let validator_data = normalize(keyed, |v| !aggregate.signers.contains(&v.operator))?;

    let input = ProveInput {
        validator_data,
        message_g1: hash_to_g1(message_hash)?,
        agg_signature: aggregate.agg_signature,
        agg_key_g2: aggregate.agg_key_g2,
    };
    let data = prover.prove(&input)?;

    debug!(
        epoch = valset.epoch,
        %key_tag,
        circuit = input.validator_data.len(),
        signers = aggregate.signers.len(),
        "Aggregated zk proof"
    );

    Ok(AggregationProof {
        verification_type: VerificationType::Zk,
        message_hash: *message_hash,
        proof: encode_zk_proof(&data)?,
    })
}

pub fn verify(
    prover: &Arc<dyn Prover>,
    valset: &ValidatorSet,
    key_tag: KeyTag,
    proof: &AggregationProof,
) -> Result<bool, AggregatorError> {
    let (body, signed_power) = split_zk_proof(&proof.proof)?;
    let keyed = keyed_validators(valset, key_tag)?;
    let active = keyed.len();
    let accumulator = mimc_accumulator(&normalize(keyed, |_| false)?);
    let message_g1 = hash_to_g1(&proof.message_hash)?;
    let public_input = input_hash(&accumulator, signed_power, &message_g1);

    if !prover.verify(active, public_input, body)? {
        debug!(epoch = valset.epoch, %key_tag, "Prover rejected zk proof");
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
