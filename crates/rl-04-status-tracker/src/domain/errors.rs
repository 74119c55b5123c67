//! # Domain Errors

use rl_01_valset_deriver::DeriverError;
use rl_03_growth_strategy::GrowthError;
use shared_types::{ChainReadError, CrossChainAddress, Hash};
use thiserror::Error;

use crate::ports::RepoError;

fn short(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Status tracker errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error(transparent)]
    ChainRead(#[from] ChainReadError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),

    #[error("No validator set stored for epoch {epoch}")]
    ValidatorSetNotFound { epoch: u64 },

    #[error("No network config stored for epoch {epoch}")]
    ConfigNotFound { epoch: u64 },

    /// A replica committed a header other than the one derived locally.
    #[error(
        "Header integrity violation at epoch {epoch} on {replica}: local {}, remote {}",
        short(.local),
        short(.remote)
    )]
    HeaderIntegrityViolation {
        epoch: u64,
        replica: CrossChainAddress,
        local: Hash,
        remote: Hash,
    },

    #[error("Deriver error: {0}")]
    Deriver(#[from] DeriverError),

    #[error("Growth strategy error: {0}")]
    Growth(#[from] GrowthError),
}

impl TrackerError {
    /// Fatal errors stop the tracking loop; the rest are retried next tick.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TrackerError::HeaderIntegrityViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_integrity_violation_is_fatal() {
        let violation = TrackerError::HeaderIntegrityViolation {
            epoch: 4,
            replica: CrossChainAddress {
                chain_id: 1,
                address: [1; 20],
            },
            local: [0xaa; 32],
            remote: [0xbb; 32],
        };
        assert!(violation.is_fatal());
        assert!(violation.to_string().contains("0xaaaa"));

        assert!(!TrackerError::ValidatorSetNotFound { epoch: 4 }.is_fatal());
        let read: TrackerError = ChainReadError::Timeout {
            call: "get_header_hash_at",
            timeout_ms: 1000,
        }
        .into();
        assert!(!read.is_fatal());
    }
}
