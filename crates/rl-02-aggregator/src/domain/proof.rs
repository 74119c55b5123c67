//! # Proof Byte Layouts
//!
//! ```text
//! Simple: aggSig G1(64) ‖ aggKey G2(128) ‖ records(96 each) ‖ nonSignerIndices(u16 LE each)
//!         record = key(32) ‖ votingPower(32, BE) ‖ isNonSigner(32, bool word)
//! ZK:     proof(256) ‖ commitments(64) ‖ commitmentPoK(64) ‖ signersAggVotingPower(32, BE)
//! ```

use shared_crypto::bn254::{g1_from_bytes, g1_to_bytes, g2_from_bytes, g2_to_bytes, G1_LEN, G2_LEN};
use shared_crypto::{G1Affine, G2Affine};
use shared_types::{abi, U256};

use crate::domain::AggregatorError;
use crate::ports::ProofData;

pub const SIMPLE_HEADER_LEN: usize = G1_LEN + G2_LEN;
pub const RECORD_LEN: usize = 96;
pub const INDEX_LEN: usize = 2;

pub const ZK_PROOF_LEN: usize = 256;
pub const ZK_COMMITMENTS_LEN: usize = 64;
pub const ZK_COMMITMENT_POK_LEN: usize = 64;
/// Everything before the trailing voting power word.
pub const ZK_PROOF_BODY_LEN: usize = ZK_PROOF_LEN + ZK_COMMITMENTS_LEN + ZK_COMMITMENT_POK_LEN;
pub const ZK_TOTAL_LEN: usize = ZK_PROOF_BODY_LEN + 32;

/// One validator as committed in a simple proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorRecord {
    pub key: [u8; 32],
    pub voting_power: U256,
    pub is_non_signer: bool,
}

/// Decoded simple-scheme proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleProof {
    pub agg_signature: G1Affine,
    pub agg_key_g2: G2Affine,
    pub records: Vec<ValidatorRecord>,
    pub non_signer_indices: Vec<u16>,
}

impl SimpleProof {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            SIMPLE_HEADER_LEN
                + self.records.len() * RECORD_LEN
                + self.non_signer_indices.len() * INDEX_LEN,
        );
        out.extend_from_slice(&g1_to_bytes(&self.agg_signature));
        out.extend_from_slice(&g2_to_bytes(&self.agg_key_g2));
        for record in &self.records {
            out.extend_from_slice(&abi::encode_bytes32(&record.key));
            out.extend_from_slice(&abi::encode_u256(record.voting_power));
            out.extend_from_slice(&abi::encode_bool(record.is_non_signer));
        }
        for index in &self.non_signer_indices {
            out.extend_from_slice(&index.to_le_bytes());
        }
        out
    }

    /// Decodes a proof committing to `record_count` records.
    ///
    /// Wrong lengths are errors. `Ok(None)` means the bytes have the right
    /// shape but do not encode valid points or flags.
    pub fn decode(bytes: &[u8], record_count: usize) -> Result<Option<Self>, AggregatorError> {
        let records_end = SIMPLE_HEADER_LEN + record_count * RECORD_LEN;
        if bytes.len() < records_end {
            return Err(AggregatorError::InvalidProofLength {
                expected: records_end,
                actual: bytes.len(),
            });
        }
        let tail = bytes.len() - records_end;
        if tail % INDEX_LEN != 0 {
            return Err(AggregatorError::InvalidProofLength {
                expected: bytes.len() - 1,
                actual: bytes.len(),
            });
        }

        let (Ok(agg_signature), Ok(agg_key_g2)) = (
            g1_from_bytes(&bytes[..G1_LEN]),
            g2_from_bytes(&bytes[G1_LEN..SIMPLE_HEADER_LEN]),
        ) else {
            return Ok(None);
        };

        let mut records = Vec::with_capacity(record_count);
        for chunk in bytes[SIMPLE_HEADER_LEN..records_end].chunks_exact(RECORD_LEN) {
            let flag = abi::decode_u256(&chunk[64..]);
            if flag > U256::one() {
                return Ok(None);
            }
            let mut key = [0u8; 32];
            key.copy_from_slice(&chunk[..32]);
            records.push(ValidatorRecord {
                key,
                voting_power: abi::decode_u256(&chunk[32..64]),
                is_non_signer: flag == U256::one(),
            });
        }

        let non_signer_indices = bytes[records_end..]
            .chunks_exact(INDEX_LEN)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();

        Ok(Some(Self {
            agg_signature,
            agg_key_g2,
            records,
            non_signer_indices,
        }))
    }
}

/// Serializes prover output; component sizes are checked.
pub fn encode_zk_proof(data: &ProofData) -> Result<Vec<u8>, AggregatorError> {
    for (part, expected) in [
        (&data.proof, ZK_PROOF_LEN),
        (&data.commitments, ZK_COMMITMENTS_LEN),
        (&data.commitment_pok, ZK_COMMITMENT_POK_LEN),
    ] {
        if part.len() != expected {
            return Err(AggregatorError::InvalidProofLength {
                expected,
                actual: part.len(),
            });
        }
    }
    let mut out = Vec::with_capacity(ZK_TOTAL_LEN);
    out.extend_from_slice(&data.proof);
    out.extend_from_slice(&data.commitments);
    out.extend_from_slice(&data.commitment_pok);
    out.extend_from_slice(&abi::encode_u256(data.signers_agg_voting_power));
    Ok(out)
}

/// Splits a ZK proof into its body and the trailing signer voting power.
pub fn split_zk_proof(bytes: &[u8]) -> Result<(&[u8], U256), AggregatorError> {
    if bytes.len() != ZK_TOTAL_LEN {
        return Err(AggregatorError::InvalidProofLength {
            expected: ZK_TOTAL_LEN,
            actual: bytes.len(),
        });
    }
    let (body, power) = bytes.split_at(ZK_PROOF_BODY_LEN);
    Ok((body, abi::decode_u256(power)))
}
