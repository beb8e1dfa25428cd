//! `ClickHouse` access layer for Bridgescope.
//!
//! The warehouse is populated by an external indexer; this crate only reads
//! from it. [`WarehouseReader`] exposes one method per dashboard panel, each
//! a fixed parameterized SQL template deserialized into a typed row model.

pub mod models;
pub mod params;
mod reader;

pub use models::{
    BridgeFlowRow, BridgeVolumeRow, DepositBucketRow, DepositStatsRow, DepositorGrowthRow,
    WalletCohortRow,
};
pub use params::{QueryParams, Timeframe};
pub use reader::WarehouseReader;
