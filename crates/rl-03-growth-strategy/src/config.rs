//! # Growth Strategy Configuration

use serde::{Deserialize, Serialize};
use shared_types::ConfigValidationError;
use std::time::Duration;

/// Replica reader configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Deadline for each replica call, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
        }
    }
}

impl GrowthConfig {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(GrowthConfig::default().validate().is_ok());
        assert!(GrowthConfig::for_testing().validate().is_ok());
        assert!(GrowthConfig {
            request_timeout_secs: 0
        }
        .validate()
        .is_err());
    }
}
