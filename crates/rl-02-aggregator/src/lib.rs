//! # RL-02 Aggregator
//!
//! Turns a signing round's BLS signatures into a quorum certificate over a
//! validator set, verifies such certificates, and derives the extra data
//! commitments settlement contracts read.
//!
//! **Subsystem ID:** 2
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Verification Types
//!
//! | Type | On-chain id | Proof size |
//! |------|-------------|------------|
//! | ZK | 0 | 416 bytes |
//! | Simple | 1 | 192 + 96·n + 2·nonSigners bytes |
//!
//! ## Module Structure
//!
//! ```text
//! rl-02-aggregator/
//! ├── domain/          # errors, keyed validators, signing, circuit, proof layouts
//! ├── schemes/         # simple, zk
//! ├── ports/           # Prover (outbound)
//! ├── aggregator.rs    # Aggregator enum
//! ├── extra_data.rs    # ExtraData keys and values
//! ├── testing.rs       # MockProver + fixtures (feature `test-helpers`)
//! └── metrics.rs       # Prometheus counters (feature `metrics`)
//! ```

#![warn(clippy::all)]

pub mod aggregator;
pub mod domain;
pub mod extra_data;
pub mod metrics;
pub mod ports;
pub mod schemes;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

// Re-exports
pub use aggregator::Aggregator;
pub use domain::AggregatorError;
pub use extra_data::{extra_data_key, extra_data_key_tagged};
pub use ports::{ProofData, ProveInput, Prover, ProverError, ValidatorData};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
