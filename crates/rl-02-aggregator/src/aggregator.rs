//! # Aggregator
//!
//! Closed dispatch over the on-chain verification types. The ZK variant owns
//! the injected proving backend.

use std::fmt;
use std::sync::Arc;

use shared_types::{AggregationProof, ExtraData, Hash, KeyTag, Signature, ValidatorSet, VerificationType};
use tracing::{info, warn};

use crate::domain::AggregatorError;
use crate::ports::Prover;
use crate::schemes::{simple, zk};
use crate::{extra_data, metrics};

#[derive(Clone)]
pub enum Aggregator {
    Simple,
    Zk { prover: Arc<dyn Prover> },
}

impl fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregator::Simple => write!(f, "Aggregator::Simple"),
            Aggregator::Zk { .. } => write!(f, "Aggregator::Zk"),
        }
    }
}

fn scheme_label(verification_type: VerificationType) -> &'static str {
    match verification_type {
        VerificationType::Simple => "simple",
        VerificationType::Zk => "zk",
    }
}

impl Aggregator {
    /// Aggregator for the network's verification type. ZK needs a prover.
    pub fn new(
        verification_type: VerificationType,
        prover: Option<Arc<dyn Prover>>,
    ) -> Result<Self, AggregatorError> {
        match verification_type {
            VerificationType::Simple => Ok(Aggregator::Simple),
            VerificationType::Zk => prover
                .map(|prover| Aggregator::Zk { prover })
                .ok_or(AggregatorError::MissingProver),
        }
    }

    pub fn verification_type(&self) -> VerificationType {
        match self {
            Aggregator::Simple => VerificationType::Simple,
            Aggregator::Zk { .. } => VerificationType::Zk,
        }
    }

    /// Builds a quorum proof over `message_hash` from the collected signatures.
    pub fn aggregate(
        &self,
        valset: &ValidatorSet,
        key_tag: KeyTag,
        message_hash: &Hash,
        signatures: &[Signature],
    ) -> Result<AggregationProof, AggregatorError> {
        let result = match self {
            Aggregator::Simple => simple::aggregate(valset, key_tag, message_hash, signatures),
            Aggregator::Zk { prover } => {
                zk::aggregate(prover, valset, key_tag, message_hash, signatures)
            }
        };

        let scheme = scheme_label(self.verification_type());
        match &result {
            Ok(proof) => {
                metrics::record_aggregation(scheme, "ok");
                info!(
                    epoch = valset.epoch,
                    %key_tag,
                    scheme,
                    signatures = signatures.len(),
                    proof_len = proof.proof.len(),
                    "Proof aggregated"
                );
            }
            Err(e) => {
                metrics::record_aggregation(scheme, "error");
                warn!(epoch = valset.epoch, %key_tag, scheme, error = %e, "Aggregation failed");
            }
        }
        result
    }

    /// `Ok(false)` for a proof that does not certify `valset`; `QuorumNotMet`
    /// for a valid proof signed by too little voting power.
    pub fn verify(
        &self,
        valset: &ValidatorSet,
        key_tag: KeyTag,
        proof: &AggregationProof,
    ) -> Result<bool, AggregatorError> {
        let expected = self.verification_type();
        if proof.verification_type != expected {
            return Err(AggregatorError::UnsupportedVerificationType {
                expected,
                got: proof.verification_type,
            });
        }

        let result = match self {
            Aggregator::Simple => simple::verify(valset, key_tag, proof),
            Aggregator::Zk { prover } => zk::verify(prover, valset, key_tag, proof),
        };

        let scheme = scheme_label(expected);
        let outcome = match &result {
            Ok(true) => "valid",
            Ok(false) => "invalid",
            Err(_) => "error",
        };
        metrics::record_verification(scheme, outcome);
        if let Err(e) = &result {
            warn!(epoch = valset.epoch, %key_tag, scheme, error = %e, "Verification failed");
        }
        result
    }

    /// Extra data committed with the header of `valset`, sorted by key.
    pub fn generate_extra_data(
        &self,
        valset: &ValidatorSet,
        key_tags: &[KeyTag],
    ) -> Result<Vec<ExtraData>, AggregatorError> {
        extra_data::generate(self.verification_type(), valset, key_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{keypairs, sign_all, validator_set, MockProver, TEST_KEY_TAG};
    use shared_types::{KeyTag, U256};

    const MESSAGE: [u8; 32] = [0x42; 32];

    fn zk() -> Aggregator {
        Aggregator::new(VerificationType::Zk, Some(Arc::new(MockProver::new()))).unwrap()
    }

    #[test]
    fn test_simple_all_signers_verifies() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let aggregator = Aggregator::Simple;

        let proof = aggregator
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys, &MESSAGE))
            .unwrap();
        assert_eq!(proof.verification_type, VerificationType::Simple);
        assert_eq!(proof.proof.len(), 192 + 4 * 96);
        assert!(aggregator.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[test]
    fn test_simple_with_non_signers_verifies() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let signatures = sign_all(&keys[1..], &MESSAGE);

        let proof = Aggregator::Simple
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &signatures)
            .unwrap();
        assert_eq!(proof.proof.len(), 192 + 4 * 96 + 2);
        assert!(Aggregator::Simple.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[test]
    fn test_simple_quorum_not_met() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let signatures = sign_all(&keys[..2], &MESSAGE);

        let proof = Aggregator::Simple
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &signatures)
            .unwrap();
        assert_eq!(
            Aggregator::Simple.verify(&valset, TEST_KEY_TAG, &proof),
            Err(AggregatorError::QuorumNotMet {
                signed: U256::from(300),
                required: U256::from(501),
            })
        );
    }

    #[test]
    fn test_simple_tampered_signature_is_invalid() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let mut proof = Aggregator::Simple
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys, &MESSAGE))
            .unwrap();

        // a valid point, but only one validator's signature
        let single = keys[0].sign(&MESSAGE).unwrap().to_bytes();
        proof.proof[..64].copy_from_slice(&single);
        assert!(!Aggregator::Simple.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[test]
    fn test_simple_other_message_is_invalid() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let mut proof = Aggregator::Simple
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys, &MESSAGE))
            .unwrap();
        proof.message_hash = [0x43; 32];
        assert!(!Aggregator::Simple.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[test]
    fn test_simple_tampered_record_is_invalid() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let mut proof = Aggregator::Simple
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys, &MESSAGE))
            .unwrap();
        // last byte of the first record's voting power
        proof.proof[192 + 63] ^= 1;
        assert!(!Aggregator::Simple.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[test]
    fn test_simple_flag_without_index_is_invalid() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let mut proof = Aggregator::Simple
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys[1..], &MESSAGE))
            .unwrap();
        proof.proof.truncate(proof.proof.len() - 2);
        assert!(!Aggregator::Simple.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[test]
    fn test_simple_truncated_proof_is_an_error() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let mut proof = Aggregator::Simple
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys, &MESSAGE))
            .unwrap();
        proof.proof.truncate(200);
        assert!(matches!(
            Aggregator::Simple.verify(&valset, TEST_KEY_TAG, &proof),
            Err(AggregatorError::InvalidProofLength { .. })
        ));
    }

    #[test]
    fn test_aggregate_rejects_bad_signature_sets() {
        let keys = keypairs(5);
        let valset = validator_set(&keys[..4], &[100, 200, 300, 400], 501);
        let aggregator = Aggregator::Simple;

        assert_eq!(
            aggregator.aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &[]),
            Err(AggregatorError::NoSignatures)
        );

        let other = sign_all(&keys[..1], &[0x43; 32]);
        assert!(matches!(
            aggregator.aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &other),
            Err(AggregatorError::MessageHashMismatch { .. })
        ));

        let outsider = sign_all(&keys[4..], &MESSAGE);
        assert!(matches!(
            aggregator.aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &outsider),
            Err(AggregatorError::ValidatorNotFound { .. })
        ));

        let mut duplicated = sign_all(&keys[..2], &MESSAGE);
        duplicated.push(duplicated[0].clone());
        assert!(matches!(
            aggregator.aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &duplicated),
            Err(AggregatorError::DuplicateSigner { .. })
        ));

        assert!(matches!(
            aggregator.aggregate(&valset, KeyTag::bls_bn254(1), &MESSAGE, &sign_all(&keys[..1], &MESSAGE)),
            Err(AggregatorError::KeyTagMismatch { .. })
        ));
        assert_eq!(
            aggregator.aggregate(&valset, KeyTag::ecdsa_secp256k1(0), &MESSAGE, &sign_all(&keys[..1], &MESSAGE)),
            Err(AggregatorError::UnsupportedKeyType(KeyTag::ecdsa_secp256k1(0)))
        );
    }

    #[test]
    fn test_new_requires_prover_for_zk() {
        assert!(matches!(
            Aggregator::new(VerificationType::Zk, None),
            Err(AggregatorError::MissingProver)
        ));
        assert_eq!(
            Aggregator::new(VerificationType::Simple, None)
                .unwrap()
                .verification_type(),
            VerificationType::Simple
        );
    }

    #[test]
    fn test_verify_rejects_other_scheme() {
        let keys = keypairs(4);
        let valset = validator_set(&keys, &[100, 200, 300, 400], 501);
        let proof = Aggregator::Simple
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys, &MESSAGE))
            .unwrap();
        assert_eq!(
            zk().verify(&valset, TEST_KEY_TAG, &proof),
            Err(AggregatorError::UnsupportedVerificationType {
                expected: VerificationType::Zk,
                got: VerificationType::Simple,
            })
        );
    }

    #[test]
    fn test_zk_roundtrip_with_non_signers() {
        let keys = keypairs(6);
        let valset = validator_set(&keys, &[100, 100, 100, 100, 100, 100], 401);
        let aggregator = zk();

        let proof = aggregator
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys[..5], &MESSAGE))
            .unwrap();
        assert_eq!(proof.verification_type, VerificationType::Zk);
        assert_eq!(proof.proof.len(), 416);
        assert_eq!(U256::from_big_endian(&proof.proof[384..]), U256::from(500));
        assert!(aggregator.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[test]
    fn test_zk_verify_outcomes() {
        let keys = keypairs(6);
        let valset = validator_set(&keys, &[100, 100, 100, 100, 100, 100], 401);
        let proof = zk()
            .aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &sign_all(&keys[..3], &MESSAGE))
            .unwrap();
        assert!(matches!(
            zk().verify(&valset, TEST_KEY_TAG, &proof),
            Err(AggregatorError::QuorumNotMet { .. })
        ));

        // claimed voting power is bound by the public input
        let mut inflated = proof.clone();
        inflated.proof[384..].copy_from_slice(&shared_types::abi::encode_u256(U256::from(600)));
        assert!(!zk().verify(&valset, TEST_KEY_TAG, &inflated).unwrap());

        let rejecting = Aggregator::new(
            VerificationType::Zk,
            Some(Arc::new(MockProver::rejecting())),
        )
        .unwrap();
        assert!(!rejecting.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[test]
    fn test_zk_prover_rejects_forged_signature() {
        let keys = keypairs(3);
        let valset = validator_set(&keys, &[100, 100, 100], 201);
        let mut signatures = sign_all(&keys, &MESSAGE);
        signatures[0].signature = keys[0].sign(&[0x43; 32]).unwrap().to_bytes().to_vec();
        assert!(matches!(
            zk().aggregate(&valset, TEST_KEY_TAG, &MESSAGE, &signatures),
            Err(AggregatorError::Prover(_))
        ));
    }
}
