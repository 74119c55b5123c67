//! # Verification Schemes
//!
//! | Scheme | Proof | Verifier work |
//! |--------|-------|---------------|
//! | Simple | aggregate signature + validator records + non-signer indices | one pairing check |
//! | ZK | Groth16 proof + signer voting power | `Prover::verify` on one public input |

pub mod simple;
pub mod zk;
