//! Shared primitives for Bridgescope.

pub mod bridge;
pub mod buckets;

pub use bridge::{BRIDGE_PAIRS, BridgePair, NULL_ADDRESS, STABLECOIN_CONTRACTS};
pub use buckets::DepositSizeBucket;
