//! # Domain Errors

use shared_types::{ChainReadError, CrossChainAddress, Hash};
use thiserror::Error;

fn short(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Growth strategy errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GrowthError {
    /// A replica read failed or timed out.
    #[error(transparent)]
    ChainRead(#[from] ChainReadError),

    /// The newest committed header is inside the missing-epochs window.
    #[error(
        "Stale commit: newest committed epoch {newest}, current epoch {current}, window {max_missing_epochs}"
    )]
    StaleCommit {
        newest: u64,
        current: u64,
        max_missing_epochs: u64,
    },

    /// Two replicas store different headers for the same epoch.
    #[error("Replica {replica} diverges at epoch {epoch}: expected {}, got {}", short(.expected), short(.got))]
    ReplicaDivergence {
        epoch: u64,
        replica: CrossChainAddress,
        /// Laggard's hash
        expected: Hash,
        got: Hash,
    },

    /// A settlement strategy was configured without replicas.
    #[error("Growth strategy {strategy} needs at least one settlement replica")]
    NoReplicas { strategy: &'static str },
}

impl GrowthError {
    /// Transient errors clear up on retry; the others need operator action
    /// or a later epoch.
    pub fn is_transient(&self) -> bool {
        matches!(self, GrowthError::ChainRead(_) | GrowthError::StaleCommit { .. })
    }
}
