//! Listener → aggregation report → replica commits → tracker and growth
//! strategy agreeing on the canonical head.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rl_02_aggregator::testing::TEST_KEY_TAG;
    use rl_02_aggregator::Aggregator;
    use rl_03_growth_strategy::{GrowthStrategyApi, HeaderCommitStatus};
    use rl_04_status_tracker::{Repo, StatusTrackerApi, TrackerError};
    use shared_types::{
        AggregationProof, EvmClient, GrowthStrategyType, ProofAggregatedMessage, ValidatorSet,
        ValidatorSetStatus, VerificationType,
    };
    use tokio::sync::watch;

    use crate::fixtures::{network_config, replica, Harness};

    fn harness(strategy: GrowthStrategyType) -> Harness {
        Harness::new(
            10,
            network_config(
                VerificationType::Simple,
                vec![replica(1), replica(2)],
                strategy,
            ),
        )
    }

    async fn stored(harness: &Harness, epoch: u64) -> ValidatorSet {
        harness
            .repo
            .get_validator_set_by_epoch(epoch)
            .await
            .unwrap()
            .unwrap()
    }

    fn aggregate(harness: &Harness, valset: &ValidatorSet) -> AggregationProof {
        let message = valset.header_hash();
        Aggregator::new(VerificationType::Simple, None)
            .unwrap()
            .aggregate(valset, TEST_KEY_TAG, &message, &harness.sign(2..10, &message))
            .unwrap()
    }

    async fn commit(
        harness: &Harness,
        replica_id: u8,
        valset: &ValidatorSet,
        proof: &AggregationProof,
    ) {
        let extra = Aggregator::new(VerificationType::Simple, None)
            .unwrap()
            .generate_extra_data(valset, &[TEST_KEY_TAG])
            .unwrap();
        harness
            .evm
            .commit_valset_header(&replica(replica_id), &valset.header(), &extra, proof)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_full_lifecycle_under_sync() {
        let harness = harness(GrowthStrategyType::Sync);
        let tracker = harness.tracker();
        let listener = harness.listener();

        harness.evm.set_current_epoch(1);
        assert_eq!(listener.load_all().await.unwrap(), vec![1]);
        let valset = stored(&harness, 1).await;
        assert_eq!(valset.status, ValidatorSetStatus::Derived);

        let proof = aggregate(&harness, &valset);
        let msg = ProofAggregatedMessage {
            epoch: 1,
            key_tag: TEST_KEY_TAG,
            message_hash: valset.header_hash(),
            proof: proof.clone(),
        };
        assert!(tracker.handle_proof_aggregated(&msg).await.unwrap());
        assert!(!tracker.handle_proof_aggregated(&msg).await.unwrap());
        assert_eq!(stored(&harness, 1).await.status, ValidatorSetStatus::Aggregated);

        // one of two replicas is not enough
        commit(&harness, 1, &valset, &proof).await;
        assert!(tracker.track_committed_epochs().await.unwrap().is_empty());
        assert_eq!(stored(&harness, 1).await.status, ValidatorSetStatus::Aggregated);

        commit(&harness, 2, &valset, &proof).await;
        assert_eq!(tracker.track_committed_epochs().await.unwrap(), vec![1]);
        assert_eq!(stored(&harness, 1).await.status, ValidatorSetStatus::Committed);
        assert_eq!(
            harness
                .repo
                .get_first_uncommitted_validator_set_epoch()
                .await
                .unwrap(),
            Some(2)
        );

        assert_eq!(
            harness
                .growth
                .last_committed_header_hash(&harness.config)
                .await
                .unwrap(),
            (valset.header_hash(), 1)
        );
        assert_eq!(
            harness
                .growth
                .valset_status(&harness.config, 2)
                .await
                .unwrap(),
            HeaderCommitStatus::Pending
        );

        // the next set links to the committed one
        harness.evm.set_current_epoch(2);
        assert_eq!(listener.load_all().await.unwrap(), vec![2]);
        assert_eq!(
            stored(&harness, 2).await.previous_header_hash,
            valset.header_hash()
        );
    }

    #[tokio::test]
    async fn test_strategies_disagree_on_lagging_replica() {
        let sync = harness(GrowthStrategyType::Sync);
        sync.evm.set_current_epoch(1);
        sync.listener().load_all().await.unwrap();
        let valset = stored(&sync, 1).await;
        let proof = aggregate(&sync, &valset);
        commit(&sync, 2, &valset, &proof).await;

        let (_, sync_epoch) = sync
            .growth
            .last_committed_header_hash(&sync.config)
            .await
            .unwrap();
        assert_eq!(sync_epoch, 0);

        let mut async_config = sync.config.clone();
        async_config.growth_strategy = GrowthStrategyType::Async;
        assert_eq!(
            sync.growth
                .last_committed_header_hash(&async_config)
                .await
                .unwrap(),
            (valset.header_hash(), 1)
        );
        assert!(sync
            .growth
            .is_valset_header_committed(&async_config, 1)
            .await
            .unwrap());
        assert!(!sync
            .growth
            .is_valset_header_committed(&sync.config, 1)
            .await
            .unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracker_loop_commits_then_shuts_down() {
        let harness = harness(GrowthStrategyType::Async);
        harness.evm.set_current_epoch(1);
        harness.listener().load_all().await.unwrap();
        let valset = stored(&harness, 1).await;
        let proof = aggregate(&harness, &valset);

        let tracker = harness.tracker();
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(async move { tracker.start(rx).await });

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(stored(&harness, 1).await.status, ValidatorSetStatus::Derived);

        commit(&harness, 1, &valset, &proof).await;
        commit(&harness, 2, &valset, &proof).await;
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(stored(&harness, 1).await.status, ValidatorSetStatus::Committed);

        tx.send(true).unwrap();
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_foreign_header_stops_tracker() {
        let harness = harness(GrowthStrategyType::Async);
        harness.evm.set_current_epoch(1);
        harness.listener().load_all().await.unwrap();
        harness.evm.set_header_hash(replica(2), 1, [0xee; 32]);

        let (_tx, rx) = watch::channel(false);
        let result = harness.tracker().start(rx).await;
        assert!(matches!(
            result,
            Err(TrackerError::HeaderIntegrityViolation { epoch: 1, .. })
        ));
        assert_eq!(stored(&harness, 1).await.status, ValidatorSetStatus::Derived);
    }
}
