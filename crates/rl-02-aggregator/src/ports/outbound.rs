//! # Outbound Ports
//!
//! The proving backend. Circuit definition, witness generation and Groth16
//! setup live behind this trait.

use shared_crypto::{G1Affine, G2Affine};
use shared_types::{Hash, U256};
use thiserror::Error;

/// Proving backend failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProverError {
    /// No circuit is compiled for this validator count.
    #[error("No circuit for {0} validators")]
    UnsupportedCircuitSize(usize),

    /// The witness does not satisfy the circuit.
    #[error("Witness does not satisfy the circuit: {0}")]
    Unsatisfied(String),

    /// Backend or transport failure.
    #[error("Prover backend failure: {0}")]
    Backend(String),
}

/// One circuit input row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorData {
    pub key: G1Affine,
    pub voting_power: U256,
    pub is_non_signer: bool,
}

/// Everything the circuit needs to prove one aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProveInput {
    /// Normalized to a circuit size.
    pub validator_data: Vec<ValidatorData>,
    pub message_g1: G1Affine,
    pub agg_signature: G1Affine,
    /// Sum of signers' G2 keys.
    pub agg_key_g2: G2Affine,
}

/// Groth16 proof with its Pedersen commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofData {
    /// 256 bytes.
    pub proof: Vec<u8>,
    /// 64 bytes.
    pub commitments: Vec<u8>,
    /// 64 bytes.
    pub commitment_pok: Vec<u8>,
    pub signers_agg_voting_power: U256,
}

/// Prover - outbound port.
pub trait Prover: Send + Sync {
    fn prove(&self, input: &ProveInput) -> Result<ProofData, ProverError>;

    /// `proof` is `proof ‖ commitments ‖ commitmentPoK` without the trailing
    /// voting power word.
    fn verify(
        &self,
        active_validators: usize,
        input_hash: Hash,
        proof: &[u8],
    ) -> Result<bool, ProverError>;
}
