//! # Status Tracker
//!
//! Moves stored validator sets through `Derived → Aggregated → Committed`.
//! Aggregation is reported by the signing pipeline; commitment is observed
//! by polling settlement replicas.
//!
//! ## Commit Cursor
//!
//! `first_uncommitted` is the lowest epoch not yet settled. It only moves
//! forward, one epoch at a time, and is persisted after the decision for that
//! epoch is persisted.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{
    with_timeout, ChainReadError, EvmClient, ProofAggregatedMessage, ValidatorSet,
    ValidatorSetStatus, ZERO_HASH,
};
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::config::TrackerConfig;
use crate::domain::TrackerError;
use crate::metrics;
use crate::ports::{Repo, StatusTrackerApi};

/// Outcome of checking one epoch against its replicas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EpochDecision {
    AlreadyCommitted,
    NewlyCommitted,
    /// No replicas configured; nothing to observe.
    NoSettlement,
    /// At least one replica has not committed yet.
    Pending,
}

impl EpochDecision {
    fn is_settled(&self) -> bool {
        !matches!(self, EpochDecision::Pending)
    }
}

/// Status Tracker - validator set lifecycle state machine.
pub struct StatusTracker<E: EvmClient, R: Repo> {
    evm: Arc<E>,
    repo: Arc<R>,
    config: TrackerConfig,
}

impl<E: EvmClient + 'static, R: Repo + 'static> StatusTracker<E, R> {
    pub fn new(evm: Arc<E>, repo: Arc<R>, config: TrackerConfig) -> Self {
        Self { evm, repo, config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    async fn call<T, F>(&self, call: &'static str, fut: F) -> Result<T, TrackerError>
    where
        F: Future<Output = Result<T, ChainReadError>> + Send,
    {
        Ok(with_timeout(call, self.config.request_timeout(), fut).await?)
    }

    async fn decide(&self, valset: &ValidatorSet) -> Result<EpochDecision, TrackerError> {
        let epoch = valset.epoch;
        if valset.status == ValidatorSetStatus::Committed {
            return Ok(EpochDecision::AlreadyCommitted);
        }

        let config = self
            .repo
            .get_config_by_epoch(epoch)
            .await?
            .ok_or(TrackerError::ConfigNotFound { epoch })?;
        if config.replicas.is_empty() {
            return Ok(EpochDecision::NoSettlement);
        }

        let local = valset.header_hash();
        let mut committed_everywhere = true;
        for replica in &config.replicas {
            let remote = self
                .call(
                    "get_header_hash_at",
                    self.evm.get_header_hash_at(replica, epoch),
                )
                .await?;
            if remote == ZERO_HASH {
                committed_everywhere = false;
                continue;
            }
            if remote != local {
                metrics::record_integrity_violation();
                error!(
                    epoch,
                    %replica,
                    local = %hex::encode(local),
                    remote = %hex::encode(remote),
                    "Replica committed a different header"
                );
                return Err(TrackerError::HeaderIntegrityViolation {
                    epoch,
                    replica: *replica,
                    local,
                    remote,
                });
            }
        }

        if !committed_everywhere {
            return Ok(EpochDecision::Pending);
        }
        if !self
            .repo
            .update_validator_set_status(epoch, ValidatorSetStatus::Committed)
            .await?
        {
            return Ok(EpochDecision::AlreadyCommitted);
        }
        metrics::record_status_transition("committed");
        info!(epoch, replicas = config.replicas.len(), "Validator set committed");
        Ok(EpochDecision::NewlyCommitted)
    }

    /// Polls replicas every `poll_interval` until `shutdown` flips to `true`
    /// or its sender is dropped. A signal arriving mid-pass abandons the pass
    /// at its current chain call. Integrity violations end the loop with the
    /// error; other errors are logged and retried on the next tick.
    pub async fn start(&self, mut shutdown: watch::Receiver<bool>) -> Result<(), TrackerError> {
        let mut ticker = tokio::time::interval(self.config.poll_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_secs = self.config.poll_interval_secs, "Status tracker started");

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    // The pass may be dropped at any chain call; status and
                    // cursor are written only once an epoch settles.
                    let pass = tokio::select! {
                        changed = shutdown.changed() => {
                            if changed.is_err() {
                                break;
                            }
                            debug!("Tracking pass interrupted by shutdown signal");
                            continue;
                        }
                        result = self.track_committed_epochs() => result,
                    };
                    match pass {
                        Ok(committed) if !committed.is_empty() => {
                            debug!(?committed, "Tracking pass committed epochs");
                        }
                        Ok(_) => {}
                        Err(e) if e.is_fatal() => {
                            error!(error = %e, "Status tracker stopped");
                            return Err(e);
                        }
                        Err(e) => warn!(error = %e, "Tracking pass failed, retrying"),
                    }
                }
            }
        }

        info!("Status tracker shut down");
        Ok(())
    }
}

#[async_trait]
impl<E: EvmClient + 'static, R: Repo + 'static> StatusTrackerApi for StatusTracker<E, R> {
    async fn handle_proof_aggregated(
        &self,
        msg: &ProofAggregatedMessage,
    ) -> Result<bool, TrackerError> {
        let epoch = msg.epoch;
        let valset = self
            .repo
            .get_validator_set_by_epoch(epoch)
            .await?
            .ok_or(TrackerError::ValidatorSetNotFound { epoch })?;

        if !valset.status.can_transition_to(ValidatorSetStatus::Aggregated) {
            debug!(epoch, status = ?valset.status, "Proof for an already aggregated set");
            return Ok(false);
        }
        // a commit may have landed since the read
        if !self
            .repo
            .update_validator_set_status(epoch, ValidatorSetStatus::Aggregated)
            .await?
        {
            debug!(epoch, "Validator set moved past aggregated concurrently");
            return Ok(false);
        }
        metrics::record_status_transition("aggregated");
        info!(
            epoch,
            key_tag = %msg.key_tag,
            message_hash = %hex::encode(msg.message_hash),
            "Validator set aggregated"
        );
        Ok(true)
    }

    async fn track_committed_epochs(&self) -> Result<Vec<u64>, TrackerError> {
        let Some(mut cursor) = self
            .repo
            .get_first_uncommitted_validator_set_epoch()
            .await?
        else {
            debug!("No validator sets stored yet");
            return Ok(Vec::new());
        };

        let mut committed = Vec::new();
        let mut epoch = cursor;
        while let Some(valset) = self.repo.get_validator_set_by_epoch(epoch).await? {
            let decision = self.decide(&valset).await?;
            if decision == EpochDecision::NewlyCommitted {
                committed.push(epoch);
            }
            if decision.is_settled() && epoch == cursor {
                cursor += 1;
                self.repo
                    .save_first_uncommitted_validator_set_epoch(cursor)
                    .await?;
                metrics::record_cursor(cursor);
            }
            epoch += 1;
        }
        Ok(committed)
    }
}
