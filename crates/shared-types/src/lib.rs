//! # Shared Types Crate
//!
//! This crate contains the relay's validator-set data model, the canonical
//! header and SSZ encodings, and the `EvmClient` port every subsystem uses to
//! reach chains.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Deterministic Encoding**: Header hashes and SSZ roots are computed
//!   here only, so every subsystem agrees byte for byte.
//! - **Injected Chain Access**: Subsystems receive an `Arc<E: EvmClient>`;
//!   there is no global client.

pub mod abi;
pub mod entities;
pub mod errors;
pub mod evm;
pub mod header;
pub mod ssz;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use entities::*;
pub use errors::*;
pub use evm::{with_timeout, EvmClient};
pub use header::{no_settlement_hash, ValidatorSetHeader};
