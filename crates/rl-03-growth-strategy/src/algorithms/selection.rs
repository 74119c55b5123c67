//! # Replica Selection
//!
//! Pure choices over replica heads. Ties always go to the replica listed
//! first in the network config.

use shared_types::{CrossChainAddress, Hash};

/// Last committed epoch reported by one replica.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicaHead {
    pub replica: CrossChainAddress,
    pub epoch: u64,
}

/// Replica with the highest committed epoch.
pub fn select_newest(heads: &[ReplicaHead]) -> Option<ReplicaHead> {
    heads.iter().copied().fold(None, |best, head| match best {
        Some(b) if b.epoch >= head.epoch => Some(b),
        _ => Some(head),
    })
}

/// Replica with the lowest committed epoch.
pub fn select_laggard(heads: &[ReplicaHead]) -> Option<ReplicaHead> {
    heads.iter().copied().fold(None, |best, head| match best {
        Some(b) if b.epoch <= head.epoch => Some(b),
        _ => Some(head),
    })
}

/// A newest commit closer than `max_missing_epochs` to the current epoch.
/// A zero window disables the check.
pub fn is_stale(newest: u64, current: u64, max_missing_epochs: u64) -> bool {
    max_missing_epochs != 0 && current.saturating_sub(newest) < max_missing_epochs
}

/// First replica whose hash differs from `expected`.
pub fn find_divergence(
    expected: &Hash,
    hashes: &[(CrossChainAddress, Hash)],
) -> Option<(CrossChainAddress, Hash)> {
    hashes.iter().find(|(_, hash)| hash != expected).copied()
}
