//! # Growth Strategies
//!
//! | Strategy | Canonical head | Committed means |
//! |----------|----------------|-----------------|
//! | Newest | highest replica epoch, staleness checked | any replica |
//! | Async | highest replica epoch | any replica |
//! | Sync | lowest replica epoch, all replicas agree | every replica |
//! | NoSettlement | `keccak256("NoSettlement")` at the current epoch | always |

use serde::{Deserialize, Serialize};
use shared_types::{GrowthStrategyType, NetworkConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthStrategy {
    Newest { max_missing_epochs: u64 },
    Sync,
    Async,
    NoSettlement,
}

impl GrowthStrategy {
    pub fn from_network_config(config: &NetworkConfig) -> Self {
        match config.growth_strategy {
            GrowthStrategyType::Newest => GrowthStrategy::Newest {
                max_missing_epochs: config.max_missing_epochs,
            },
            GrowthStrategyType::Sync => GrowthStrategy::Sync,
            GrowthStrategyType::Async => GrowthStrategy::Async,
            GrowthStrategyType::NoSettlement => GrowthStrategy::NoSettlement,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GrowthStrategy::Newest { .. } => "newest",
            GrowthStrategy::Sync => "sync",
            GrowthStrategy::Async => "async",
            GrowthStrategy::NoSettlement => "no-settlement",
        }
    }

    /// Whether commitment is read from settlement replicas.
    pub fn uses_replicas(&self) -> bool {
        !matches!(self, GrowthStrategy::NoSettlement)
    }
}

/// Commit state of one epoch's header under a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderCommitStatus {
    Committed,
    /// Beyond the last committed epoch; may still be committed.
    Pending,
    /// At or before the last committed epoch but not committed.
    Missed,
}
