//! # Relay Test Suite
//!
//! Cross-subsystem scenarios wiring the deriver, aggregator, growth strategy
//! and status tracker against an in-memory chain.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Harness: mock chain, keys, wired services
//! └── integration/
//!     ├── observability.rs # tracing + Prometheus exposition
//!     ├── pipeline.rs   # derive → sign → aggregate → verify
//!     └── settlement.rs # commit → track → growth strategy
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p relay-tests
//! cargo test -p relay-tests integration::settlement::
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
