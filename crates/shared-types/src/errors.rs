//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

use crate::entities::{GrowthStrategyType, KeyTag};

/// Failure of a single chain call. Transient: callers retry on the next tick.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainReadError {
    /// The RPC call failed or the contract reverted.
    #[error("Chain call {call} failed: {reason}")]
    CallFailed { call: &'static str, reason: String },

    /// The per-call deadline expired.
    #[error("Chain call {call} timed out after {timeout_ms}ms")]
    Timeout { call: &'static str, timeout_ms: u64 },
}

impl ChainReadError {
    /// Name of the failing call.
    pub fn call(&self) -> &'static str {
        match self {
            ChainReadError::CallFailed { call, .. } | ChainReadError::Timeout { call, .. } => call,
        }
    }
}

/// Network configuration rejected at load time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("No voting power providers configured")]
    NoVotingPowerProviders,

    #[error("Required header key tag {0} is not among the required key tags")]
    HeaderKeyTagNotRequired(KeyTag),

    #[error("Duplicate quorum threshold for key tag {0}")]
    DuplicateQuorumThreshold(KeyTag),

    #[error("Quorum threshold for key tag {0} exceeds 100%")]
    ThresholdOutOfRange(KeyTag),

    #[error("Growth strategy {strategy:?} does not fit {replicas} settlement replicas")]
    GrowthStrategyMismatch {
        strategy: GrowthStrategyType,
        replicas: usize,
    },

    #[error("Invalid service configuration: {0}")]
    InvalidServiceConfig(String),
}
