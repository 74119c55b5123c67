//! # RL-03 Growth Strategy
//!
//! Decides which header the relay builds on when several settlement
//! replicas store committed validator set headers, and whether an epoch's
//! header counts as committed.
//!
//! **Subsystem ID:** 3
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Module Structure
//!
//! ```text
//! rl-03-growth-strategy/
//! ├── domain/          # GrowthStrategy, HeaderCommitStatus, GrowthError
//! ├── algorithms/      # replica selection (pure)
//! ├── ports/           # GrowthStrategyApi
//! ├── application/     # GrowthService
//! ├── metrics.rs       # Prometheus gauges (feature `metrics`)
//! └── config.rs        # GrowthConfig
//! ```

#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;

// Re-exports
pub use application::GrowthService;
pub use config::GrowthConfig;
pub use domain::{GrowthError, GrowthStrategy, HeaderCommitStatus};
pub use ports::GrowthStrategyApi;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
