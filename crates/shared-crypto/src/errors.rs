//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Encoded point or key has the wrong size
    #[error("Invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Coordinates do not describe a point of the expected group
    #[error("Invalid {group} point")]
    InvalidPoint {
        /// "G1" or "G2"
        group: &'static str,
    },

    /// Coordinate is not a canonical field element
    #[error("Field element out of range")]
    NonCanonicalField,

    /// Compressed x coordinate has no matching y
    #[error("Compressed G1 point does not decompress")]
    DecompressionFailed,

    /// Try-and-increment exhausted its attempts
    #[error("Hash to curve failed")]
    HashToCurveFailed,

    /// Public key is not G1 followed by G2
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Secret key is zero or out of range
    #[error("Invalid private key")]
    InvalidPrivateKey,
}
