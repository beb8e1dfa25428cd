//! Shared state for API handlers and constants

use std::{sync::Arc, time::Duration as StdDuration};

use eyre::Result;
use warehouse::{
    BridgeFlowRow, BridgeVolumeRow, DepositBucketRow, DepositStatsRow, DepositorGrowthRow,
    QueryParams, WalletCohortRow, WarehouseReader,
};

use crate::cache::PanelCache;

/// Default maximum number of requests allowed during the rate limiting period.
pub const DEFAULT_MAX_REQUESTS: u64 = u64::MAX;
/// Default duration for the rate limiting window.
pub const DEFAULT_RATE_PERIOD: StdDuration = StdDuration::from_secs(1);

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub(crate) client: WarehouseReader,
    cache: PanelCache,
    max_requests: u64,
    rate_period: StdDuration,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState").finish_non_exhaustive()
    }
}

impl ApiState {
    /// Create a new [`ApiState`].
    pub fn new(client: WarehouseReader, max_requests: u64, rate_period: StdDuration) -> Self {
        Self { client, cache: PanelCache::default(), max_requests, rate_period }
    }

    /// Maximum number of requests allowed per [`rate_period`](Self::rate_period).
    pub const fn max_requests(&self) -> u64 {
        self.max_requests
    }

    /// Time window for rate limiting.
    pub const fn rate_period(&self) -> StdDuration {
        self.rate_period
    }

    pub(crate) async fn bridge_flows(&self, params: QueryParams) -> Result<Arc<Vec<BridgeFlowRow>>> {
        if let Some(rows) = self.cache.flows.get(&params) {
            return Ok(rows);
        }
        let rows = self.client.get_bridge_flows(params).await?;
        Ok(self.cache.flows.insert(params, rows))
    }

    pub(crate) async fn bridge_volume(
        &self,
        params: QueryParams,
    ) -> Result<Arc<Vec<BridgeVolumeRow>>> {
        if let Some(rows) = self.cache.volume.get(&params) {
            return Ok(rows);
        }
        let rows = self.client.get_bridge_volume(params).await?;
        Ok(self.cache.volume.insert(params, rows))
    }

    pub(crate) async fn deposit_stats(
        &self,
        params: QueryParams,
    ) -> Result<Arc<Option<DepositStatsRow>>> {
        if let Some(stats) = self.cache.deposit_stats.get(&params) {
            return Ok(stats);
        }
        let stats = self.client.get_deposit_stats(params).await?;
        Ok(self.cache.deposit_stats.insert(params, stats))
    }

    pub(crate) async fn deposit_distribution(
        &self,
        params: QueryParams,
    ) -> Result<Arc<Vec<DepositBucketRow>>> {
        if let Some(rows) = self.cache.distribution.get(&params) {
            return Ok(rows);
        }
        let rows = self.client.get_deposit_distribution(params).await?;
        Ok(self.cache.distribution.insert(params, rows))
    }

    pub(crate) async fn depositor_growth(
        &self,
        params: QueryParams,
    ) -> Result<Arc<Vec<DepositorGrowthRow>>> {
        if let Some(rows) = self.cache.growth.get(&params) {
            return Ok(rows);
        }
        let rows = self.client.get_depositor_growth(params).await?;
        Ok(self.cache.growth.insert(params, rows))
    }

    pub(crate) async fn depositor_cohorts(
        &self,
        params: QueryParams,
    ) -> Result<Arc<Vec<WalletCohortRow>>> {
        if let Some(rows) = self.cache.cohorts.get(&params) {
            return Ok(rows);
        }
        let rows = self.client.get_depositor_cohorts(params).await?;
        Ok(self.cache.cohorts.insert(params, rows))
    }

    pub(crate) async fn total_depositors(&self, params: QueryParams) -> Result<Arc<Option<u64>>> {
        if let Some(total) = self.cache.total_depositors.get(&params) {
            return Ok(total);
        }
        let total = self.client.get_total_depositors(params).await?;
        Ok(self.cache.total_depositors.insert(params, total))
    }
}
