//! Derive → sign → aggregate → verify, across both verification schemes.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rl_01_valset_deriver::ValidatorSetDeriverApi;
    use rl_02_aggregator::extra_data::{
        TOTAL_ACTIVE_VALIDATORS, TOTAL_ACTIVE_VOTING_POWER, VALIDATOR_SET_HASH,
    };
    use rl_02_aggregator::testing::{MockProver, TEST_KEY_TAG};
    use rl_02_aggregator::{
        extra_data_key, extra_data_key_tagged, Aggregator, AggregatorError, Prover,
    };
    use shared_types::{abi, GrowthStrategyType, ValidatorSet, VerificationType, U256};

    use crate::fixtures::{network_config, Harness, VALIDATOR_POWER};

    async fn derive(harness: &Harness, epoch: u64) -> ValidatorSet {
        harness.evm.set_current_epoch(epoch);
        let config = harness.deriver.get_network_config(epoch).await.unwrap();
        harness
            .deriver
            .get_validator_set(epoch, &config)
            .await
            .unwrap()
    }

    fn harness(verification_type: VerificationType) -> Harness {
        Harness::new(
            10,
            network_config(verification_type, vec![], GrowthStrategyType::NoSettlement),
        )
    }

    #[tokio::test]
    async fn test_derived_set_matches_chain_state() {
        let harness = harness(VerificationType::Simple);
        let valset = derive(&harness, 3).await;

        assert_eq!(valset.epoch, 3);
        assert_eq!(valset.total_active_validators(), 10);
        assert_eq!(
            valset.total_active_voting_power(),
            U256::from(10 * VALIDATOR_POWER)
        );
        // ceil(1000 * 0.67) + 1
        assert_eq!(valset.quorum_threshold, U256::from(671));
        assert!(valset
            .validators
            .windows(2)
            .all(|w| w[0].operator < w[1].operator));
    }

    #[tokio::test]
    async fn test_simple_quorum_with_non_signers() {
        let harness = harness(VerificationType::Simple);
        let valset = derive(&harness, 1).await;
        let message = valset.header_hash();
        let aggregator = Aggregator::new(VerificationType::Simple, None).unwrap();

        // 7 of 10 sign: 700 >= 671
        let signatures = harness.sign(3..10, &message);
        let proof = aggregator
            .aggregate(&valset, TEST_KEY_TAG, &message, &signatures)
            .unwrap();

        assert_eq!(proof.verification_type, VerificationType::Simple);
        assert_eq!(proof.message_hash, message);
        assert!(aggregator.verify(&valset, TEST_KEY_TAG, &proof).unwrap());
    }

    #[tokio::test]
    async fn test_simple_quorum_missed() {
        let harness = harness(VerificationType::Simple);
        let valset = derive(&harness, 1).await;
        let message = valset.header_hash();
        let aggregator = Aggregator::new(VerificationType::Simple, None).unwrap();

        let signatures = harness.sign(0..4, &message);
        let proof = aggregator
            .aggregate(&valset, TEST_KEY_TAG, &message, &signatures)
            .unwrap();
        assert!(matches!(
            aggregator.verify(&valset, TEST_KEY_TAG, &proof),
            Err(AggregatorError::QuorumNotMet { .. })
        ));
    }

    #[tokio::test]
    async fn test_proof_bound_to_its_header() {
        let harness = harness(VerificationType::Simple);
        let first = derive(&harness, 1).await;
        let second = derive(&harness, 2).await;
        assert_ne!(first.header_hash(), second.header_hash());

        let message = first.header_hash();
        let aggregator = Aggregator::new(VerificationType::Simple, None).unwrap();
        let mut proof = aggregator
            .aggregate(&first, TEST_KEY_TAG, &message, &harness.sign(0..10, &message))
            .unwrap();
        assert!(aggregator.verify(&first, TEST_KEY_TAG, &proof).unwrap());

        proof.message_hash = second.header_hash();
        assert!(!aggregator.verify(&second, TEST_KEY_TAG, &proof).unwrap());
    }

    #[tokio::test]
    async fn test_zk_quorum_with_non_signers() {
        let harness = harness(VerificationType::Zk);
        let valset = derive(&harness, 1).await;
        let message = valset.header_hash();
        let prover: Arc<dyn Prover> = Arc::new(MockProver::new());
        let aggregator = Aggregator::new(VerificationType::Zk, Some(prover)).unwrap();

        let signatures = harness.sign(2..10, &message);
        let proof = aggregator
            .aggregate(&valset, TEST_KEY_TAG, &message, &signatures)
            .unwrap();

        assert_eq!(proof.verification_type, VerificationType::Zk);
        assert!(aggregator.verify(&valset, TEST_KEY_TAG, &proof).unwrap());

        let simple = Aggregator::new(VerificationType::Simple, None).unwrap();
        assert!(matches!(
            simple.verify(&valset, TEST_KEY_TAG, &proof),
            Err(AggregatorError::UnsupportedVerificationType { .. })
        ));
    }

    #[tokio::test]
    async fn test_derivation_is_deterministic() {
        let harness = harness(VerificationType::Simple);
        let a = derive(&harness, 4).await;
        let b = derive(&harness, 4).await;

        assert_eq!(a, b);
        assert_eq!(a.header_hash(), b.header_hash());

        let aggregator = Aggregator::new(VerificationType::Simple, None).unwrap();
        assert_eq!(
            aggregator.generate_extra_data(&a, &[TEST_KEY_TAG]).unwrap(),
            aggregator.generate_extra_data(&b, &[TEST_KEY_TAG]).unwrap(),
        );
    }

    #[tokio::test]
    async fn test_extra_data_per_scheme() {
        let harness = harness(VerificationType::Simple);
        let valset = derive(&harness, 1).await;

        let simple = Aggregator::new(VerificationType::Simple, None)
            .unwrap()
            .generate_extra_data(&valset, &[TEST_KEY_TAG])
            .unwrap();
        assert_eq!(simple.len(), 3);
        let power = simple
            .iter()
            .find(|e| e.key == extra_data_key(VerificationType::Simple, TOTAL_ACTIVE_VOTING_POWER))
            .unwrap();
        assert_eq!(power.value, abi::encode_u256(U256::from(10 * VALIDATOR_POWER)));

        let prover: Arc<dyn Prover> = Arc::new(MockProver::new());
        let zk = Aggregator::new(VerificationType::Zk, Some(prover))
            .unwrap()
            .generate_extra_data(&valset, &[TEST_KEY_TAG])
            .unwrap();
        assert_eq!(zk.len(), 2);
        let count = zk
            .iter()
            .find(|e| e.key == extra_data_key(VerificationType::Zk, TOTAL_ACTIVE_VALIDATORS))
            .unwrap();
        assert_eq!(count.value, abi::encode_u64(10));
        assert!(zk.iter().any(|e| e.key
            == extra_data_key_tagged(VerificationType::Zk, TEST_KEY_TAG, VALIDATOR_SET_HASH)));
    }
}
