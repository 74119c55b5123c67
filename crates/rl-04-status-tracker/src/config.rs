//! # Tracker Configuration

use serde::{Deserialize, Serialize};
use shared_types::ConfigValidationError;
use std::time::Duration;

/// Status tracker configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Seconds between commit tracking passes.
    pub poll_interval_secs: u64,
    /// Deadline for each replica call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            request_timeout_secs: 10,
        }
    }
}

impl TrackerConfig {
    /// Create a config for testing (fast polling).
    pub fn for_testing() -> Self {
        Self {
            poll_interval_secs: 1,
            request_timeout_secs: 1,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.poll_interval_secs == 0 {
            return Err(ConfigValidationError::InvalidServiceConfig(
                "poll_interval_secs must be positive".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidServiceConfig(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
