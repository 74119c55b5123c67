//! # Domain Errors
//!
//! Error types for validator set derivation.

use shared_types::{ChainReadError, ConfigValidationError, KeyTag};
use thiserror::Error;

/// Validator set derivation errors. No partial set is ever returned
/// alongside one of these.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeriverError {
    /// An upstream chain read failed or timed out.
    #[error(transparent)]
    ChainRead(#[from] ChainReadError),

    /// The config has no quorum threshold for its required header key tag.
    #[error("No quorum threshold configured for key tag {key_tag} (epoch {epoch})")]
    QuorumThresholdNotFound {
        /// Epoch being derived
        epoch: u64,
        /// Required header key tag
        key_tag: KeyTag,
    },

    /// The on-chain network config failed validation.
    #[error("Invalid network config: {0}")]
    ConfigValidation(#[from] ConfigValidationError),
}

impl DeriverError {
    /// Transient errors are retried by the caller on its next tick.
    pub fn is_transient(&self) -> bool {
        matches!(self, DeriverError::ChainRead(_))
    }
}
