//! # Growth Strategy Service
//!
//! Reads replica heads through the injected [`EvmClient`] and applies the
//! configured [`GrowthStrategy`]. Replica reads are sequential, in
//! configuration order, each bounded by the request timeout.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use shared_types::{
    no_settlement_hash, with_timeout, ChainReadError, CrossChainAddress, EvmClient, Hash,
    NetworkConfig,
};
use tracing::{debug, warn};

use crate::algorithms::{find_divergence, is_stale, select_laggard, select_newest, ReplicaHead};
use crate::config::GrowthConfig;
use crate::domain::{GrowthError, GrowthStrategy, HeaderCommitStatus};
use crate::metrics;
use crate::ports::GrowthStrategyApi;

/// Growth strategy service over settlement replicas.
pub struct GrowthService<E: EvmClient> {
    evm: Arc<E>,
    config: GrowthConfig,
}

impl<E: EvmClient> GrowthService<E> {
    pub fn new(evm: Arc<E>, config: GrowthConfig) -> Self {
        Self { evm, config }
    }

    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    async fn call<T, F>(&self, call: &'static str, fut: F) -> Result<T, GrowthError>
    where
        F: Future<Output = Result<T, ChainReadError>> + Send,
    {
        with_timeout(call, self.config.request_timeout(), fut)
            .await
            .map_err(|e| {
                metrics::record_failure("chain_read");
                GrowthError::from(e)
            })
    }

    fn replicas<'a>(
        strategy: GrowthStrategy,
        config: &'a NetworkConfig,
    ) -> Result<&'a [CrossChainAddress], GrowthError> {
        if config.replicas.is_empty() {
            return Err(GrowthError::NoReplicas {
                strategy: strategy.name(),
            });
        }
        Ok(&config.replicas)
    }

    async fn replica_heads(
        &self,
        replicas: &[CrossChainAddress],
    ) -> Result<Vec<ReplicaHead>, GrowthError> {
        let mut heads = Vec::with_capacity(replicas.len());
        for replica in replicas {
            let epoch = self
                .call(
                    "get_last_committed_header_epoch",
                    self.evm.get_last_committed_header_epoch(replica),
                )
                .await?;
            debug!(%replica, epoch, "Replica head");
            heads.push(ReplicaHead {
                replica: *replica,
                epoch,
            });
        }
        Ok(heads)
    }

    async fn header_hash_at(
        &self,
        replica: &CrossChainAddress,
        epoch: u64,
    ) -> Result<Hash, GrowthError> {
        self.call("get_header_hash_at", self.evm.get_header_hash_at(replica, epoch))
            .await
    }

    /// Canonical head: the replica and epoch the strategy builds on.
    async fn canonical_head(
        &self,
        strategy: GrowthStrategy,
        config: &NetworkConfig,
    ) -> Result<ReplicaHead, GrowthError> {
        let replicas = Self::replicas(strategy, config)?;
        let heads = self.replica_heads(replicas).await?;
        let selected = match strategy {
            GrowthStrategy::Sync => select_laggard(&heads),
            _ => select_newest(&heads),
        };
        selected.ok_or(GrowthError::NoReplicas {
            strategy: strategy.name(),
        })
    }

    async fn newest(
        &self,
        strategy: GrowthStrategy,
        config: &NetworkConfig,
        max_missing_epochs: u64,
    ) -> Result<(Hash, u64), GrowthError> {
        let head = self.canonical_head(strategy, config).await?;
        if max_missing_epochs != 0 {
            let current = self
                .call("get_current_epoch", self.evm.get_current_epoch())
                .await?;
            if is_stale(head.epoch, current, max_missing_epochs) {
                metrics::record_failure("stale_commit");
                return Err(GrowthError::StaleCommit {
                    newest: head.epoch,
                    current,
                    max_missing_epochs,
                });
            }
        }
        let hash = self.header_hash_at(&head.replica, head.epoch).await?;
        Ok((hash, head.epoch))
    }

    async fn sync(&self, config: &NetworkConfig) -> Result<(Hash, u64), GrowthError> {
        let head = self.canonical_head(GrowthStrategy::Sync, config).await?;
        let expected = self.header_hash_at(&head.replica, head.epoch).await?;

        let mut hashes = Vec::with_capacity(config.replicas.len());
        for replica in config.replicas.iter().filter(|r| **r != head.replica) {
            hashes.push((*replica, self.header_hash_at(replica, head.epoch).await?));
        }
        if let Some((replica, got)) = find_divergence(&expected, &hashes) {
            metrics::record_failure("divergence");
            warn!(%replica, epoch = head.epoch, "Settlement replicas diverge");
            return Err(GrowthError::ReplicaDivergence {
                epoch: head.epoch,
                replica,
                expected,
                got,
            });
        }
        Ok((expected, head.epoch))
    }
}

#[async_trait]
impl<E: EvmClient + 'static> GrowthStrategyApi for GrowthService<E> {
    async fn last_committed_header_hash(
        &self,
        config: &NetworkConfig,
    ) -> Result<(Hash, u64), GrowthError> {
        let strategy = GrowthStrategy::from_network_config(config);
        let (hash, epoch) = match strategy {
            GrowthStrategy::Newest { max_missing_epochs } => {
                self.newest(strategy, config, max_missing_epochs).await?
            }
            GrowthStrategy::Async => self.newest(strategy, config, 0).await?,
            GrowthStrategy::Sync => self.sync(config).await?,
            GrowthStrategy::NoSettlement => {
                let current = self
                    .call("get_current_epoch", self.evm.get_current_epoch())
                    .await?;
                (no_settlement_hash(), current)
            }
        };
        metrics::record_last_committed_epoch(epoch);
        debug!(strategy = strategy.name(), epoch, "Last committed header");
        Ok((hash, epoch))
    }

    async fn previous_hash(&self, config: &NetworkConfig) -> Result<Hash, GrowthError> {
        let (hash, _) = self.last_committed_header_hash(config).await?;
        Ok(hash)
    }

    async fn is_valset_header_committed(
        &self,
        config: &NetworkConfig,
        epoch: u64,
    ) -> Result<bool, GrowthError> {
        let strategy = GrowthStrategy::from_network_config(config);
        if !strategy.uses_replicas() {
            return Ok(true);
        }
        let replicas = Self::replicas(strategy, config)?;
        let require_all = matches!(strategy, GrowthStrategy::Sync);

        for replica in replicas {
            let committed = self
                .call(
                    "is_valset_header_committed_at",
                    self.evm.is_valset_header_committed_at(replica, epoch),
                )
                .await?;
            if committed && !require_all {
                return Ok(true);
            }
            if !committed && require_all {
                return Ok(false);
            }
        }
        Ok(require_all)
    }

    async fn valset_status(
        &self,
        config: &NetworkConfig,
        epoch: u64,
    ) -> Result<HeaderCommitStatus, GrowthError> {
        if self.is_valset_header_committed(config, epoch).await? {
            return Ok(HeaderCommitStatus::Committed);
        }
        let strategy = GrowthStrategy::from_network_config(config);
        let head = self.canonical_head(strategy, config).await?;
        if epoch > head.epoch {
            Ok(HeaderCommitStatus::Pending)
        } else {
            Ok(HeaderCommitStatus::Missed)
        }
    }
}
