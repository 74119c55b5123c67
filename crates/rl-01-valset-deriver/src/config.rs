//! # Deriver Configuration

use serde::{Deserialize, Serialize};
use shared_types::ConfigValidationError;
use std::time::Duration;

/// Validator set deriver configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeriverConfig {
    /// Deadline for each individual chain call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for DeriverConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
        }
    }
}

impl DeriverConfig {
    /// Create a config for testing (short deadlines).
    pub fn for_testing() -> Self {
        Self {
            request_timeout_secs: 1,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidServiceConfig(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
