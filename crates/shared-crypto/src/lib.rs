//! # Shared Crypto - Relay Cryptographic Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `bn254` | BLS over BN254 | Validator keys, aggregate signatures |
//! | `hashing` | Keccak-256, SHA-256 | EVM commitments, SSZ roots |
//! | `mimc` | MiMC-BN254 | Circuit-friendly validator-set accumulator |
//!
//! ## Security Properties
//!
//! - **G2 inputs**: subgroup-checked on parse
//! - **Aggregate verification**: Fiat-Shamir challenge binds the G1 key to its G2 image
//! - **Field inputs**: non-canonical encodings are rejected, never reduced

#![warn(clippy::all)]

pub mod bn254;
pub mod errors;
pub mod hashing;
pub mod mimc;

// Re-exports
pub use bn254::{BlsKeyPair, BlsPublicKey, BlsSignature};
pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_many, sha256, sha256_pair, Hash};
pub use mimc::MimcHasher;

// Curve types used across subsystems
pub use ark_bn254::{Fr, G1Affine, G2Affine};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
