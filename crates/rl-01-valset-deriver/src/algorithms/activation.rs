//! # Activation Pass
//!
//! Single forward scan over validators sorted by voting power descending.

use shared_types::{NetworkConfig, Validator, U256};

/// Marks validators active in place and returns how many were activated.
///
/// - stops at the first validator below `min_inclusion_voting_power`
/// - skips validators without keys
/// - caps active voting power at `max_voting_power` when non-zero
/// - stops once `max_validators_count` (when non-zero) are active
///
/// Capping does not reorder the list.
pub fn apply_activation(validators: &mut [Validator], config: &NetworkConfig) -> usize {
    let max_count = config.max_validators_count;
    let mut active = 0usize;

    for validator in validators.iter_mut() {
        if validator.voting_power < config.min_inclusion_voting_power {
            break;
        }
        if validator.keys.is_empty() {
            continue;
        }

        validator.is_active = true;
        if !config.max_voting_power.is_zero() && validator.voting_power > config.max_voting_power {
            validator.voting_power = config.max_voting_power;
        }
        active += 1;

        if !max_count.is_zero() && U256::from(active) >= max_count {
            break;
        }
    }

    active
}
