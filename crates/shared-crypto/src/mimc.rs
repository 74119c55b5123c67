//! # MiMC over the BN254 scalar field
//!
//! Circuit-friendly hash used for the validator-set accumulator that ZK
//! proofs commit to. Parameters match gnark's `mimc/bn254`: 110 rounds of
//! `x ↦ (x + k + c_i)^5`, round constants from a keccak chain seeded with
//! `"seed"`, absorbed with the Miyaguchi–Preneel construction.

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField};
use ark_std::Zero;
use lazy_static::lazy_static;

use crate::hashing::keccak256;
use crate::CryptoError;

/// Number of rounds.
pub const MIMC_ROUNDS: usize = 110;

const SEED: &[u8] = b"seed";

lazy_static! {
    static ref ROUND_CONSTANTS: Vec<Fr> = {
        let mut rnd = keccak256(SEED);
        (0..MIMC_ROUNDS)
            .map(|_| {
                rnd = keccak256(&rnd);
                Fr::from_be_bytes_mod_order(&rnd)
            })
            .collect()
    };
}

/// Stateful MiMC hasher.
#[derive(Clone, Debug, Default)]
pub struct MimcHasher {
    state: Fr,
}

impl MimcHasher {
    pub fn new() -> Self {
        Self::default()
    }

    fn encrypt(&self, mut message: Fr) -> Fr {
        for constant in ROUND_CONSTANTS.iter() {
            let tmp = message + self.state + constant;
            message = tmp.square().square() * tmp;
        }
        message + self.state
    }

    /// Absorbs one field element.
    pub fn update(&mut self, element: Fr) -> &mut Self {
        let encrypted = self.encrypt(element);
        self.state += encrypted + element;
        self
    }

    /// Absorbs 32-byte big-endian blocks. Each block must be a canonical
    /// field element; a short final block is left-padded.
    pub fn update_bytes(&mut self, data: &[u8]) -> Result<&mut Self, CryptoError> {
        for block in data.chunks(32) {
            let mut padded = [0u8; 32];
            padded[32 - block.len()..].copy_from_slice(block);
            let element = Fr::from_be_bytes_mod_order(&padded);
            if element.into_bigint().to_bytes_be() != padded {
                return Err(CryptoError::NonCanonicalField);
            }
            self.update(element);
        }
        Ok(self)
    }

    pub fn finalize(&self) -> Fr {
        self.state
    }

    /// Digest as 32 big-endian bytes.
    pub fn finalize_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&self.state.into_bigint().to_bytes_be());
        out
    }

    pub fn reset(&mut self) {
        self.state = Fr::zero();
    }
}
