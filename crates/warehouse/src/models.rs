//! Typed result rows for the dashboard panels.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One day of bridge flow for a single token denomination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BridgeFlowRow {
    /// Calendar day (UTC).
    pub day: NaiveDate,
    /// Token denomination symbol.
    pub token: String,
    /// Signed transfer total for the day; deposits positive, withdrawals negative.
    pub net_deposit: f64,
    /// Running sum of `net_deposit` over all days up to this one.
    pub tvl: f64,
    /// Total stablecoin supply on the host chain that day, if known.
    pub stablecoin_supply: Option<f64>,
    /// `100 * tvl / stablecoin_supply`; `None` when supply is missing or zero.
    pub pct_of_stablecoin_supply: Option<f64>,
}

/// Deposit/withdrawal volume aggregated per truncated period.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct BridgeVolumeRow {
    /// Period start (day, Monday of week, or first of month).
    pub period: NaiveDate,
    /// `Deposit` or `Withdrawal`.
    pub action: String,
    /// Distinct counterparty wallets.
    pub users: u64,
    /// Distinct transactions.
    pub events: u64,
    /// Transferred amount total.
    pub volume: f64,
}

/// Headline deposit statistics over the selected range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct DepositStatsRow {
    /// Average deposit size in USD, rounded.
    pub avg_amount: f64,
    /// Median deposit size in USD, rounded.
    pub median_amount: f64,
    /// Total number of deposits.
    pub total_deposits: u64,
}

/// Deposit count for one size bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DepositBucketRow {
    /// Bucket label (prefix-sorted into bucket order).
    pub bucket: String,
    /// Number of deposits in the bucket.
    pub deposits: u64,
}

/// New and cumulative depositor counts per day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DepositorGrowthRow {
    /// Day of first deposit (UTC).
    pub day: NaiveDate,
    /// Wallets whose first deposit fell on this day.
    pub new_depositors: u64,
    /// Running depositor total up to and including this day.
    pub total_depositors: u64,
}

/// Aggregate stats for one depositor cohort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct WalletCohortRow {
    /// `Deposit Wallet` or `Arbitrum User Wallet`.
    pub wallet_type: String,
    /// Wallets in the cohort.
    pub wallets: u64,
    /// Average per-wallet deposit volume.
    pub avg_deposit_volume: f64,
    /// Median per-wallet deposit volume.
    pub median_deposit_volume: f64,
}
