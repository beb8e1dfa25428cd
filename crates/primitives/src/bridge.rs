//! Hyperliquid bridge contract configuration on Arbitrum.
//!
//! The bridge custodies deposits in two USDC denominations, each with its own
//! deposit contract. These addresses are fixed properties of the deployment
//! and are not runtime-configurable.

use alloy_primitives::{Address, address};

/// A bridge deposit contract together with the token it accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BridgePair {
    /// Token denomination symbol.
    pub symbol: &'static str,
    /// Address transfers are deposited to (and withdrawn from).
    pub bridge_address: Address,
    /// ERC-20 contract of the accepted token.
    pub token_contract: Address,
}

/// The two bridge deposit contracts tracked by the dashboard.
pub const BRIDGE_PAIRS: [BridgePair; 2] = [
    BridgePair {
        symbol: "USDC.e",
        bridge_address: address!("C67E9Efdb8a66A4B91b1f3731C75F500130373A4"),
        token_contract: address!("FF970A61A04b1cA14834A43f5dE4533eBDDB5CC8"),
    },
    BridgePair {
        symbol: "USDC",
        bridge_address: address!("2Df1c51E09aECF9cacB7bc98cB1742757f163dF7"),
        token_contract: address!("af88d065e77c8cC2239327C5EDb3A432268e5831"),
    },
];

/// Stablecoin contracts whose mint/burn flow defines the host-chain
/// stablecoin supply baseline (USDC, USDT, USDC.e, DAI).
pub const STABLECOIN_CONTRACTS: [Address; 4] = [
    address!("af88d065e77c8cC2239327C5EDb3A432268e5831"),
    address!("Fd086bC7CD5C481DCC9C85ebE478A1C0b69FCbb9"),
    address!("FF970A61A04b1cA14834A43f5dE4533eBDDB5CC8"),
    address!("da10009cbd5d07dd0cecc66161fc93d7c9000da1"),
];

/// Mint/burn counterparty address.
pub const NULL_ADDRESS: Address = Address::ZERO;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_have_distinct_addresses() {
        assert_ne!(BRIDGE_PAIRS[0].bridge_address, BRIDGE_PAIRS[1].bridge_address);
        assert_ne!(BRIDGE_PAIRS[0].token_contract, BRIDGE_PAIRS[1].token_contract);
    }

    #[test]
    fn bridge_tokens_are_in_supply_set() {
        for pair in BRIDGE_PAIRS {
            assert!(STABLECOIN_CONTRACTS.contains(&pair.token_contract));
        }
    }
}
