//! Per-panel memoization of finished query results.
//!
//! The warehouse is append-only and every query is bounded by an explicit
//! date range, so a result for a given parameter tuple never changes once
//! computed. Entries therefore have no expiry. Failed queries are not
//! cached and are retried on the next request.

use std::sync::Arc;

use dashmap::DashMap;
use warehouse::{
    BridgeFlowRow, BridgeVolumeRow, DepositBucketRow, DepositStatsRow, DepositorGrowthRow,
    QueryParams, WalletCohortRow,
};

/// Memo table for one panel, keyed by the full parameter tuple.
#[derive(Debug)]
pub(crate) struct Memo<T>(Arc<DashMap<QueryParams, Arc<T>>>);

impl<T> Clone for Memo<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for Memo<T> {
    fn default() -> Self {
        Self(Arc::new(DashMap::new()))
    }
}

impl<T> Memo<T> {
    pub(crate) fn get(&self, params: &QueryParams) -> Option<Arc<T>> {
        self.0.get(params).map(|entry| Arc::clone(entry.value()))
    }

    pub(crate) fn insert(&self, params: QueryParams, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.0.insert(params, Arc::clone(&value));
        value
    }
}

/// One memo table per dashboard panel.
#[derive(Clone, Debug, Default)]
pub(crate) struct PanelCache {
    pub(crate) flows: Memo<Vec<BridgeFlowRow>>,
    pub(crate) volume: Memo<Vec<BridgeVolumeRow>>,
    pub(crate) deposit_stats: Memo<Option<DepositStatsRow>>,
    pub(crate) distribution: Memo<Vec<DepositBucketRow>>,
    pub(crate) growth: Memo<Vec<DepositorGrowthRow>>,
    pub(crate) cohorts: Memo<Vec<WalletCohortRow>>,
    pub(crate) total_depositors: Memo<Option<u64>>,
}

#[cfg(test)]
mod tests {
    use super::Memo;
    use chrono::NaiveDate;
    use warehouse::{QueryParams, Timeframe};

    #[test]
    fn insert_then_get_round_trips() {
        let memo: Memo<Vec<u64>> = Memo::default();
        let params = QueryParams::default();
        assert!(memo.get(&params).is_none());

        let stored = memo.insert(params, vec![1, 2, 3]);
        let fetched = memo.get(&params).unwrap();
        assert_eq!(*stored, *fetched);
    }

    #[test]
    fn distinct_params_are_separate_entries() {
        let memo: Memo<u64> = Memo::default();
        let a = QueryParams::default();
        let b = QueryParams::new(
            Timeframe::Day,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        );

        memo.insert(a, 1);
        memo.insert(b, 2);
        assert_eq!(*memo.get(&a).unwrap(), 1);
        assert_eq!(*memo.get(&b).unwrap(), 2);
    }
}
