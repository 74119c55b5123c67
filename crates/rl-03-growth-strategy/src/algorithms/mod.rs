//! # Algorithms
//!
//! Pure replica selection, independent of chain access.

pub mod selection;

pub use selection::{find_divergence, is_stale, select_laggard, select_newest, ReplicaHead};
