//! # Quorum Threshold
//!
//! `ceil(total_active_voting_power · pct / 1e18) + 1`, computed in 512 bits.

use primitive_types::U512;
use shared_types::{threshold_scale, U256};

/// Absolute voting power needed for quorum at `threshold_pct` (1e18 = 100%).
pub fn quorum_threshold(total_active_voting_power: U256, threshold_pct: U256) -> U256 {
    let scale = U512::from(threshold_scale());
    let product = total_active_voting_power.full_mul(threshold_pct);
    let ceiled = (product + scale - U512::one()) / scale;
    U256::try_from(ceiled)
        .unwrap_or(U256::MAX)
        .saturating_add(U256::one())
}
