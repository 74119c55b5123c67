//! # Provider Merge
//!
//! Folds raw voting-power and key reads into one [`Validator`] per operator.
//!
//! Operators are collected in a `BTreeMap` and every list is sorted
//! explicitly, so the result never depends on provider response order.

use std::collections::BTreeMap;

use shared_types::{
    sort_validators, Address, CrossChainAddress, OperatorVotingPower, OperatorWithKeys, Validator,
    ValidatorVault, U256, VAULTS_LIST_MAX,
};

/// Voting-power read from one provider.
#[derive(Debug, Clone)]
pub struct ProviderVotingPowers {
    pub provider: CrossChainAddress,
    pub operators: Vec<OperatorVotingPower>,
}

/// Merges provider reads and attaches keys.
///
/// Vaults are tagged with their provider's chain id. Keys of operators with
/// no voting power anywhere are dropped. The returned list is sorted by
/// [`sort_validators`] with every validator inactive.
pub fn merge_operators(
    voting_powers: &[ProviderVotingPowers],
    keys: &[OperatorWithKeys],
) -> Vec<Validator> {
    let mut by_operator: BTreeMap<Address, Validator> = BTreeMap::new();

    for read in voting_powers {
        for operator in &read.operators {
            let validator = by_operator
                .entry(operator.operator)
                .or_insert_with(|| Validator {
                    operator: operator.operator,
                    voting_power: U256::zero(),
                    is_active: false,
                    keys: Vec::new(),
                    vaults: Vec::new(),
                });
            for vault in &operator.vaults {
                validator.vaults.push(ValidatorVault {
                    chain_id: read.provider.chain_id,
                    vault: vault.vault,
                    voting_power: vault.voting_power,
                });
            }
        }
    }

    for operator in keys {
        if let Some(validator) = by_operator.get_mut(&operator.operator) {
            validator.keys.extend(operator.keys.iter().cloned());
        }
    }

    let mut validators: Vec<Validator> = by_operator
        .into_values()
        .map(|mut validator| {
            validator.keys.sort_by(|a, b| a.tag.cmp(&b.tag).then_with(|| a.payload.cmp(&b.payload)));
            validator.keys.dedup();
            truncate_vaults(&mut validator);
            validator
        })
        .collect();

    sort_validators(&mut validators);
    validators
}

/// Keeps the `VAULTS_LIST_MAX` strongest vaults and recomputes the
/// validator's voting power from what is kept.
pub fn truncate_vaults(validator: &mut Validator) {
    validator.vaults.sort_by(|a, b| {
        b.voting_power
            .cmp(&a.voting_power)
            .then_with(|| a.vault.cmp(&b.vault))
            .then_with(|| a.chain_id.cmp(&b.chain_id))
    });
    validator.vaults.truncate(VAULTS_LIST_MAX);
    validator.voting_power = validator
        .vaults
        .iter()
        .fold(U256::zero(), |acc, v| acc.saturating_add(v.voting_power));
}
