//! # RL-04 Status Tracker
//!
//! Tracks each epoch's validator set through its lifecycle and keeps the
//! local store in step with the chain.
//!
//! **Subsystem ID:** 4
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Lifecycle
//!
//! ```text
//! Derived ──(proof aggregated)──→ Aggregated ──(all replicas match)──→ Committed
//!    └──────────────────────(all replicas match)─────────────────────────┘
//! ```
//!
//! Status never regresses. A replica storing a different header for an epoch
//! is a `HeaderIntegrityViolation` and stops the tracking loop.
//!
//! ## Module Structure
//!
//! ```text
//! rl-04-status-tracker/
//! ├── domain/          # TrackerError
//! ├── ports/           # StatusTrackerApi (inbound), Repo (outbound)
//! ├── adapters/        # InMemoryRepo
//! ├── application/     # StatusTracker, ValsetListener
//! ├── metrics.rs       # Prometheus counters (feature `metrics`)
//! └── config.rs        # TrackerConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;

// Re-exports
pub use adapters::InMemoryRepo;
pub use application::{StatusTracker, ValsetListener};
pub use config::TrackerConfig;
pub use domain::TrackerError;
pub use ports::{Repo, RepoError, StatusTrackerApi};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
