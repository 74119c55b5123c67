//! # RL-01 Validator Set Deriver
//!
//! Converts raw on-chain voting-power and key data into a canonical,
//! deterministic `ValidatorSet`.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Derivation Pipeline
//!
//! | Step | Rule |
//! |------|------|
//! | Merge | One validator per operator, vaults summed across providers/chains |
//! | Vault truncation | Strongest `VAULTS_LIST_MAX` vaults kept, power recomputed |
//! | Activation | Min inclusion power, keyless skip, power cap, count limit |
//! | List cap | `VALIDATORS_LIST_MAX` |
//! | Quorum | `ceil(active_power · pct / 1e18) + 1` for the header key tag |
//!
//! ## Module Structure
//!
//! ```text
//! rl-01-valset-deriver/
//! ├── domain/          # DeriverError
//! ├── algorithms/      # merge, activation, threshold (pure)
//! ├── ports/           # ValidatorSetDeriverApi
//! ├── application/     # ValidatorSetDeriver service
//! ├── metrics.rs       # Prometheus counters (feature `metrics`)
//! └── config.rs        # DeriverConfig
//! ```

#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;

// Re-exports
pub use algorithms::{
    apply_activation, build_validator_set, merge_operators, quorum_threshold, truncate_vaults,
    ProviderVotingPowers,
};
pub use application::ValidatorSetDeriver;
pub use config::DeriverConfig;
pub use domain::DeriverError;
pub use ports::ValidatorSetDeriverApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
