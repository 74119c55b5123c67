//! Test doubles: a deterministic prover and BLS validator set fixtures.

use ark_ec::AffineRepr;
use shared_crypto::bn254::{aggregate_g1, verify_aggregate};
use shared_crypto::{keccak256_many, BlsKeyPair};
use shared_types::{
    abi, KeyTag, Signature, Validator, ValidatorKey, ValidatorSet, ValidatorSetStatus, U256,
    VALSET_VERSION, ZERO_HASH,
};

use crate::domain::circuit::{circuit_size, mimc_accumulator, signers_voting_power};
use crate::domain::proof::{ZK_COMMITMENTS_LEN, ZK_PROOF_BODY_LEN, ZK_PROOF_LEN};
use crate::ports::{ProofData, ProveInput, Prover, ProverError};
use crate::schemes::zk::input_hash;

/// Key tag used by the fixtures.
pub const TEST_KEY_TAG: KeyTag = KeyTag::bls_bn254(15);

/// Prover that checks the witness like the circuit would and emits proof
/// bytes derived from the public input.
#[derive(Debug, Default, Clone)]
pub struct MockProver {
    reject: bool,
}

impl MockProver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A prover whose `verify` always answers `false`.
    pub fn rejecting() -> Self {
        Self { reject: true }
    }

    fn proof_bytes(public_input: &[u8; 32], active_validators: usize) -> Vec<u8> {
        let count = abi::encode_u64(active_validators as u64);
        (0..ZK_PROOF_BODY_LEN / 32)
            .flat_map(|i| {
                keccak256_many(&[
                    b"mock-groth16".as_slice(),
                    public_input.as_slice(),
                    count.as_slice(),
                    abi::encode_u64(i as u64).as_slice(),
                ])
            })
            .collect()
    }
}

impl Prover for MockProver {
    fn prove(&self, input: &ProveInput) -> Result<ProofData, ProverError> {
        let size = input.validator_data.len();
        if circuit_size(size).ok() != Some(size) {
            return Err(ProverError::UnsupportedCircuitSize(size));
        }

        let signer_key = aggregate_g1(
            input
                .validator_data
                .iter()
                .filter(|d| !d.is_non_signer)
                .map(|d| &d.key),
        );
        if !verify_aggregate(
            &input.message_g1,
            &input.agg_signature,
            &signer_key,
            &input.agg_key_g2,
        ) {
            return Err(ProverError::Unsatisfied(
                "aggregate signature does not match signer keys".into(),
            ));
        }

        let active = input
            .validator_data
            .iter()
            .filter(|d| !d.key.is_zero())
            .count();
        let power = signers_voting_power(&input.validator_data);
        let public_input = input_hash(
            &mimc_accumulator(&input.validator_data),
            power,
            &input.message_g1,
        );

        let bytes = Self::proof_bytes(&public_input, active);
        let (proof, rest) = bytes.split_at(ZK_PROOF_LEN);
        let (commitments, commitment_pok) = rest.split_at(ZK_COMMITMENTS_LEN);
        Ok(ProofData {
            proof: proof.to_vec(),
            commitments: commitments.to_vec(),
            commitment_pok: commitment_pok.to_vec(),
            signers_agg_voting_power: power,
        })
    }

    fn verify(
        &self,
        active_validators: usize,
        input_hash: [u8; 32],
        proof: &[u8],
    ) -> Result<bool, ProverError> {
        circuit_size(active_validators)
            .map_err(|_| ProverError::UnsupportedCircuitSize(active_validators))?;
        if self.reject {
            return Ok(false);
        }
        Ok(proof == Self::proof_bytes(&input_hash, active_validators).as_slice())
    }
}

/// Deterministic key pairs, one per seed byte.
pub fn keypairs(count: usize) -> Vec<BlsKeyPair> {
    (0..count)
        .map(|i| {
            let mut secret = [0u8; 32];
            secret[30] = 0x5a;
            secret[31] = i as u8 + 1;
            BlsKeyPair::from_secret_bytes(&secret).expect("non-zero secret")
        })
        .collect()
}

/// Active validator set over `keypairs` with the given powers, sorted like a
/// derived set, quorum threshold `quorum`.
pub fn validator_set(keypairs: &[BlsKeyPair], powers: &[u64], quorum: u64) -> ValidatorSet {
    let mut validators: Vec<Validator> = keypairs
        .iter()
        .zip(powers)
        .enumerate()
        .map(|(i, (kp, power))| Validator {
            operator: [i as u8 + 1; 20],
            voting_power: U256::from(*power),
            is_active: true,
            keys: vec![ValidatorKey {
                tag: TEST_KEY_TAG,
                payload: kp.public_key().compressed_g1().to_vec(),
            }],
            vaults: vec![],
        })
        .collect();
    shared_types::sort_validators(&mut validators);

    ValidatorSet {
        version: VALSET_VERSION,
        required_key_tag: TEST_KEY_TAG,
        epoch: 1,
        capture_timestamp: 1_700_000_000,
        quorum_threshold: U256::from(quorum),
        validators,
        status: ValidatorSetStatus::Derived,
        previous_header_hash: ZERO_HASH,
    }
}

/// Signs `message_hash` with every key pair.
pub fn sign_all(keypairs: &[BlsKeyPair], message_hash: &[u8; 32]) -> Vec<Signature> {
    keypairs
        .iter()
        .map(|kp| Signature {
            key_tag: TEST_KEY_TAG,
            message_hash: *message_hash,
            signature: kp
                .sign(message_hash)
                .expect("hash to curve")
                .to_bytes()
                .to_vec(),
            public_key: kp.public_key().to_bytes(),
        })
        .collect()
}
