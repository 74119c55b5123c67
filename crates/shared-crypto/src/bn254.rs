//! BLS over BN254
//!
//! Signatures and hashed messages live on G1, aggregate verification keys on
//! G2. A validator's public key carries both its G1 and G2 images of the same
//! secret so the G1 side can be committed compactly on-chain.
//!
//! Encodings follow the EVM precompiles:
//! - G1: `x ‖ y`, 32-byte big-endian each (64 bytes)
//! - G2: `x.c1 ‖ x.c0 ‖ y.c1 ‖ y.c0` (128 bytes)
//! - compressed G1: `2x + (y odd)`, 32-byte big-endian
//! - the point at infinity encodes as all zeros

use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G1Projective, G2Affine, G2Projective};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::{BigInteger, Field, PrimeField};
use ark_std::{UniformRand, Zero};
use rand::Rng;

use crate::hashing::keccak256;
use crate::CryptoError;

/// Uncompressed G1 size.
pub const G1_LEN: usize = 64;
/// Uncompressed G2 size.
pub const G2_LEN: usize = 128;
/// Compressed G1 size.
pub const G1_COMPRESSED_LEN: usize = 32;
/// Public key size (G1 followed by G2).
pub const PUBLIC_KEY_LEN: usize = G1_LEN + G2_LEN;

const HASH_TO_CURVE_TRIES: usize = 256;

// =============================================================================
// Field / point encoding
// =============================================================================

fn fq_to_bytes(value: &Fq) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&value.into_bigint().to_bytes_be());
    out
}

fn fq_from_bytes(bytes: &[u8]) -> Result<Fq, CryptoError> {
    let value = Fq::from_be_bytes_mod_order(bytes);
    if value.into_bigint().to_bytes_be() != bytes {
        return Err(CryptoError::NonCanonicalField);
    }
    Ok(value)
}

fn check_len(bytes: &[u8], expected: usize) -> Result<(), CryptoError> {
    if bytes.len() != expected {
        return Err(CryptoError::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

fn fq_is_odd(value: &Fq) -> bool {
    value.into_bigint().is_odd()
}

/// Serializes a G1 point as `x ‖ y`.
pub fn g1_to_bytes(point: &G1Affine) -> [u8; G1_LEN] {
    let mut out = [0u8; G1_LEN];
    if point.infinity {
        return out;
    }
    out[..32].copy_from_slice(&fq_to_bytes(&point.x));
    out[32..].copy_from_slice(&fq_to_bytes(&point.y));
    out
}

/// Parses and validates a 64-byte G1 point.
pub fn g1_from_bytes(bytes: &[u8]) -> Result<G1Affine, CryptoError> {
    check_len(bytes, G1_LEN)?;
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G1Affine::zero());
    }
    let x = fq_from_bytes(&bytes[..32])?;
    let y = fq_from_bytes(&bytes[32..])?;
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CryptoError::InvalidPoint { group: "G1" });
    }
    Ok(point)
}

/// Serializes a G2 point as `x.c1 ‖ x.c0 ‖ y.c1 ‖ y.c0`.
pub fn g2_to_bytes(point: &G2Affine) -> [u8; G2_LEN] {
    let mut out = [0u8; G2_LEN];
    if point.infinity {
        return out;
    }
    out[..32].copy_from_slice(&fq_to_bytes(&point.x.c1));
    out[32..64].copy_from_slice(&fq_to_bytes(&point.x.c0));
    out[64..96].copy_from_slice(&fq_to_bytes(&point.y.c1));
    out[96..].copy_from_slice(&fq_to_bytes(&point.y.c0));
    out
}

/// Parses and validates a 128-byte G2 point, including the subgroup check.
pub fn g2_from_bytes(bytes: &[u8]) -> Result<G2Affine, CryptoError> {
    check_len(bytes, G2_LEN)?;
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G2Affine::zero());
    }
    let x = Fq2::new(fq_from_bytes(&bytes[32..64])?, fq_from_bytes(&bytes[..32])?);
    let y = Fq2::new(fq_from_bytes(&bytes[96..])?, fq_from_bytes(&bytes[64..96])?);
    let point = G2Affine::new_unchecked(x, y);
    if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(CryptoError::InvalidPoint { group: "G2" });
    }
    Ok(point)
}

/// Compresses a G1 point to `2x + (y odd)`.
pub fn compress_g1(point: &G1Affine) -> [u8; G1_COMPRESSED_LEN] {
    if point.infinity {
        return [0u8; G1_COMPRESSED_LEN];
    }
    let mut out = fq_to_bytes(&point.x);
    // x < 2^254, so the doubling cannot overflow 32 bytes.
    let mut carry = 0u8;
    for byte in out.iter_mut().rev() {
        let next = *byte >> 7;
        *byte = (*byte << 1) | carry;
        carry = next;
    }
    if fq_is_odd(&point.y) {
        out[31] |= 1;
    }
    out
}

/// Inverse of [`compress_g1`].
pub fn decompress_g1(bytes: &[u8]) -> Result<G1Affine, CryptoError> {
    check_len(bytes, G1_COMPRESSED_LEN)?;
    if bytes.iter().all(|b| *b == 0) {
        return Ok(G1Affine::zero());
    }
    let y_odd = bytes[31] & 1 == 1;
    let mut x_bytes = [0u8; 32];
    let mut carry = 0u8;
    for (dst, src) in x_bytes.iter_mut().zip(bytes.iter()) {
        *dst = (*src >> 1) | carry;
        carry = (*src & 1) << 7;
    }
    let x = fq_from_bytes(&x_bytes)?;
    let y = curve_y(&x).ok_or(CryptoError::DecompressionFailed)?;
    let y = if fq_is_odd(&y) == y_odd { y } else { -y };
    let point = G1Affine::new_unchecked(x, y);
    if !point.is_on_curve() {
        return Err(CryptoError::DecompressionFailed);
    }
    Ok(point)
}

/// A square root of `x³ + 3`, if one exists.
fn curve_y(x: &Fq) -> Option<Fq> {
    let rhs = x.square() * x + Fq::from(3u64);
    rhs.sqrt()
}

// =============================================================================
// Hash to curve
// =============================================================================

/// Maps a message hash onto G1 by try-and-increment:
/// `x = keccak256(message) mod p`, incremented until `x³ + 3` is a square.
/// The smaller of the two roots is taken as `y`.
pub fn hash_to_g1(message: &[u8]) -> Result<G1Affine, CryptoError> {
    let mut x = Fq::from_be_bytes_mod_order(&keccak256(message));
    for _ in 0..HASH_TO_CURVE_TRIES {
        if let Some(y) = curve_y(&x) {
            let neg = -y;
            let y = if y.into_bigint() <= neg.into_bigint() {
                y
            } else {
                neg
            };
            return Ok(G1Affine::new_unchecked(x, y));
        }
        x += Fq::from(1u64);
    }
    Err(CryptoError::HashToCurveFailed)
}

// =============================================================================
// Keys and signatures
// =============================================================================

/// BLS secret key (scalar in Fr).
#[derive(Clone)]
pub struct BlsSecretKey(Fr);

impl BlsSecretKey {
    /// Reduces 32 big-endian bytes into a scalar. Zero is rejected.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let scalar = Fr::from_be_bytes_mod_order(bytes);
        if scalar.is_zero() {
            return Err(CryptoError::InvalidPrivateKey);
        }
        Ok(Self(scalar))
    }
}

/// BLS public key: G1 and G2 images of the same secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlsPublicKey {
    g1: G1Affine,
    g2: G2Affine,
}

impl BlsPublicKey {
    /// Parses `G1(64) ‖ G2(128)`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != PUBLIC_KEY_LEN {
            return Err(CryptoError::InvalidPublicKey);
        }
        Ok(Self {
            g1: g1_from_bytes(&bytes[..G1_LEN])?,
            g2: g2_from_bytes(&bytes[G1_LEN..])?,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PUBLIC_KEY_LEN);
        out.extend_from_slice(&g1_to_bytes(&self.g1));
        out.extend_from_slice(&g2_to_bytes(&self.g2));
        out
    }

    pub fn g1(&self) -> &G1Affine {
        &self.g1
    }

    pub fn g2(&self) -> &G2Affine {
        &self.g2
    }

    /// On-chain key payload.
    pub fn compressed_g1(&self) -> [u8; G1_COMPRESSED_LEN] {
        compress_g1(&self.g1)
    }
}

/// BLS signature (G1 point).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlsSignature(G1Affine);

impl BlsSignature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Ok(Self(g1_from_bytes(bytes)?))
    }

    pub fn to_bytes(&self) -> [u8; G1_LEN] {
        g1_to_bytes(&self.0)
    }

    pub fn point(&self) -> &G1Affine {
        &self.0
    }
}

/// BLS key pair for signing operations.
pub struct BlsKeyPair {
    secret: BlsSecretKey,
    public: BlsPublicKey,
}

impl BlsKeyPair {
    /// Generate a new random key pair.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        loop {
            let scalar = Fr::rand(rng);
            if !scalar.is_zero() {
                return Self::from_scalar(scalar);
            }
        }
    }

    /// Create from existing secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        Ok(Self::from_scalar(BlsSecretKey::from_bytes(bytes)?.0))
    }

    fn from_scalar(scalar: Fr) -> Self {
        let public = BlsPublicKey {
            g1: (G1Affine::generator() * scalar).into_affine(),
            g2: (G2Affine::generator() * scalar).into_affine(),
        };
        Self {
            secret: BlsSecretKey(scalar),
            public,
        }
    }

    pub fn public_key(&self) -> &BlsPublicKey {
        &self.public
    }

    /// Signs a message hash: `sk · H(m)`.
    pub fn sign(&self, message: &[u8]) -> Result<BlsSignature, CryptoError> {
        let point = hash_to_g1(message)?;
        Ok(BlsSignature((point * self.secret.0).into_affine()))
    }
}

/// Checks `e(sig, G2) == e(H(m), pk_g2)`.
pub fn verify(public_key: &BlsPublicKey, message: &[u8], signature: &BlsSignature) -> bool {
    let Ok(point) = hash_to_g1(message) else {
        return false;
    };
    Bn254::pairing(signature.0, G2Affine::generator()) == Bn254::pairing(point, public_key.g2)
}

/// Sum of G1 points.
pub fn aggregate_g1<'a>(points: impl IntoIterator<Item = &'a G1Affine>) -> G1Affine {
    let mut acc = G1Projective::zero();
    for point in points {
        acc += point;
    }
    acc.into_affine()
}

/// Sum of G2 points.
pub fn aggregate_g2<'a>(points: impl IntoIterator<Item = &'a G2Affine>) -> G2Affine {
    let mut acc = G2Projective::zero();
    for point in points {
        acc += point;
    }
    acc.into_affine()
}

/// Verifies an aggregate signature against both images of the aggregate key
/// in one pairing equation:
///
/// `e(sig + α·pk_g1, G2) == e(H(m) + α·G1, pk_g2)`
///
/// with `α = keccak256(sig ‖ pk_g1 ‖ pk_g2 ‖ H(m)) mod r`. The α term binds
/// the G1 key to the G2 key it claims to mirror.
pub fn verify_aggregate(
    message_point: &G1Affine,
    signature: &G1Affine,
    pk_g1: &G1Affine,
    pk_g2: &G2Affine,
) -> bool {
    let mut transcript = Vec::with_capacity(G1_LEN * 3 + G2_LEN);
    transcript.extend_from_slice(&g1_to_bytes(signature));
    transcript.extend_from_slice(&g1_to_bytes(pk_g1));
    transcript.extend_from_slice(&g2_to_bytes(pk_g2));
    transcript.extend_from_slice(&g1_to_bytes(message_point));
    let alpha = Fr::from_be_bytes_mod_order(&keccak256(&transcript));

    let lhs = (*pk_g1 * alpha + signature).into_affine();
    let rhs = (G1Affine::generator() * alpha + message_point).into_affine();
    Bn254::pairing(lhs, G2Affine::generator()) == Bn254::pairing(rhs, *pk_g2)
}
