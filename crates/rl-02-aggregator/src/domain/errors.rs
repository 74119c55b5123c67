//! # Domain Errors
//!
//! Error types for aggregation and verification.

use shared_crypto::CryptoError;
use shared_types::{Hash, KeyTag, VerificationType, U256};
use thiserror::Error;

use crate::ports::ProverError;

fn short(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Aggregator error types.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregatorError {
    /// Aggregate called without signatures.
    #[error("No signatures to aggregate")]
    NoSignatures,

    /// A signature was made under another message.
    #[error("Message hash mismatch: expected {}, got {}", short(.expected), short(.got))]
    MessageHashMismatch {
        /// Target message hash
        expected: Hash,
        /// Hash carried by the signature
        got: Hash,
    },

    /// A signature carries a different key tag than requested.
    #[error("Key tag mismatch: expected {expected}, got {got}")]
    KeyTagMismatch {
        /// Requested key tag
        expected: KeyTag,
        /// Tag carried by the signature
        got: KeyTag,
    },

    /// Only BLS-BN254 keys aggregate.
    #[error("Key tag {0} is not an aggregatable key type")]
    UnsupportedKeyType(KeyTag),

    /// The signer's key belongs to no active validator.
    #[error("No active validator holds {key_tag} key 0x{key}")]
    ValidatorNotFound {
        /// Key tag searched
        key_tag: KeyTag,
        /// Compressed key, hex
        key: String,
    },

    /// No active validator holds a key of this tag.
    #[error("No active validator holds a {key_tag} key (epoch {epoch})")]
    KeyNotFound {
        /// Key tag searched
        key_tag: KeyTag,
        /// Epoch of the validator set
        epoch: u64,
    },

    /// A key failed to parse or decompress.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Two signatures from the same operator.
    #[error("Duplicate signature from operator 0x{operator}")]
    DuplicateSigner {
        /// Operator address, hex
        operator: String,
    },

    /// Proof bytes do not match the scheme's layout.
    #[error("Invalid proof length: expected {expected}, got {actual}")]
    InvalidProofLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// More keyed validators than the largest circuit or index width allows.
    #[error("Too many validators: {count} > {max}")]
    TooManyValidators {
        /// Keyed active validators
        count: usize,
        /// Supported maximum
        max: usize,
    },

    /// Signers' voting power is below the quorum threshold.
    #[error("Quorum not met: signed {signed}, required {required}")]
    QuorumNotMet {
        /// Aggregated signer voting power
        signed: U256,
        /// Validator set quorum threshold
        required: U256,
    },

    /// Proof produced by another scheme.
    #[error("Verification type mismatch: aggregator is {expected:?}, proof is {got:?}")]
    UnsupportedVerificationType {
        /// This aggregator's scheme
        expected: VerificationType,
        /// Scheme of the proof
        got: VerificationType,
    },

    /// ZK scheme selected without a prover.
    #[error("ZK verification requires a prover")]
    MissingProver,

    /// The proving backend failed.
    #[error("Prover error: {0}")]
    Prover(#[from] ProverError),

    /// Curve operation failed.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
