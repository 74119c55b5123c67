//! Logging and metrics exposition while the pipeline runs.

#[cfg(test)]
mod tests {
    use relay_telemetry::{gather_metrics, init_tracing, TelemetryConfig};
    use rl_01_valset_deriver::ValidatorSetDeriverApi;
    use rl_02_aggregator::testing::TEST_KEY_TAG;
    use rl_02_aggregator::Aggregator;
    use shared_types::{GrowthStrategyType, VerificationType};

    use crate::fixtures::{network_config, Harness};

    #[tokio::test]
    async fn test_pipeline_metrics_exposed() {
        // another test may have installed the subscriber already
        let _ = init_tracing(&TelemetryConfig::for_testing());

        let harness = Harness::new(
            4,
            network_config(
                VerificationType::Simple,
                vec![],
                GrowthStrategyType::NoSettlement,
            ),
        );
        harness.evm.set_current_epoch(1);
        let config = harness.deriver.get_network_config(1).await.unwrap();
        let valset = harness.deriver.get_validator_set(1, &config).await.unwrap();

        let message = valset.header_hash();
        let aggregator = Aggregator::new(VerificationType::Simple, None).unwrap();
        let proof = aggregator
            .aggregate(&valset, TEST_KEY_TAG, &message, &harness.sign(0..4, &message))
            .unwrap();
        assert!(aggregator.verify(&valset, TEST_KEY_TAG, &proof).unwrap());

        let text = gather_metrics().unwrap();
        assert!(text.contains("relay_deriver_valsets_derived_total"));
        assert!(text.contains("relay_aggregator_proofs_aggregated_total"));
        assert!(text.contains("relay_aggregator_proofs_verified_total"));
    }
}
