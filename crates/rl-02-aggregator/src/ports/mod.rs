//! # Ports Layer

pub mod outbound;

pub use outbound::{ProofData, ProveInput, Prover, ProverError, ValidatorData};
