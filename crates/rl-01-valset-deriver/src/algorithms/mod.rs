//! # Derivation Algorithms
//!
//! Pure functions turning provider reads into a [`ValidatorSet`]. The
//! service only fetches; everything consensus-relevant happens here.

pub mod activation;
pub mod merge;
pub mod threshold;

pub use activation::apply_activation;
pub use merge::{merge_operators, truncate_vaults, ProviderVotingPowers};
pub use threshold::quorum_threshold;

use shared_types::{
    NetworkConfig, OperatorWithKeys, ValidatorSet, ValidatorSetStatus, VALIDATORS_LIST_MAX,
    VALSET_VERSION, ZERO_HASH,
};

use crate::domain::DeriverError;

/// Builds the validator set of `epoch` from already fetched reads.
pub fn build_validator_set(
    epoch: u64,
    capture_timestamp: u64,
    config: &NetworkConfig,
    voting_powers: &[ProviderVotingPowers],
    keys: &[OperatorWithKeys],
) -> Result<ValidatorSet, DeriverError> {
    let threshold_pct = config
        .quorum_threshold_for(config.required_header_key_tag)
        .ok_or(DeriverError::QuorumThresholdNotFound {
            epoch,
            key_tag: config.required_header_key_tag,
        })?;

    let mut validators = merge_operators(voting_powers, keys);
    apply_activation(&mut validators, config);
    validators.truncate(VALIDATORS_LIST_MAX);

    let mut valset = ValidatorSet {
        version: VALSET_VERSION,
        required_key_tag: config.required_header_key_tag,
        epoch,
        capture_timestamp,
        quorum_threshold: Default::default(),
        validators,
        status: ValidatorSetStatus::Derived,
        previous_header_hash: ZERO_HASH,
    };
    valset.quorum_threshold = quorum_threshold(valset.total_active_voting_power(), threshold_pct);
    Ok(valset)
}
