use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;

pub use providers::{Address, U256};

/// Placeholder contract address (`0xeeee…eeee`) marking a chain's native
/// coin, which has no contract of its own.
pub const NATIVE_TOKEN: Address = Address::repeat_byte(0xee);

/// Read-only descriptor of one queryable asset on one chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub chain_id: u64,
    pub chain_name: String,
    pub is_native: bool,
}

impl Token {
    pub fn native(symbol: &str, name: &str, decimals: u8, chain_id: u64, chain_name: &str) -> Self {
        Self {
            address: NATIVE_TOKEN,
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            chain_id,
            chain_name: chain_name.to_string(),
            is_native: true,
        }
    }

    pub fn erc20(
        address: Address,
        symbol: &str,
        name: &str,
        decimals: u8,
        chain_id: u64,
        chain_name: &str,
    ) -> Self {
        Self {
            address,
            symbol: symbol.to_string(),
            name: name.to_string(),
            decimals,
            chain_id,
            chain_name: chain_name.to_string(),
            is_native: false,
        }
    }

    /// The `SYMBOL-CHAINID` key the aggregate map is indexed by.
    pub fn key(&self) -> String {
        format!("{}-{}", self.symbol, self.chain_id)
    }
}

/// One resolved balance. Failed reads are represented by a zero amount,
/// so a requested token always produces an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceEntry {
    pub token_key: String,
    pub raw: U256,
    pub formatted: String,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRequest {
    pub address: Option<Address>,
    /// The chain the caller is focused on. Carried for logging only; it
    /// never influences which chains are fetched.
    pub focus_chain_id: u64,
    pub chain_ids: Vec<u64>,
}

#[skip_serializing_none]
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub balance_by_token_key: HashMap<String, String>,
    pub is_fetching_cross_chain_balances: bool,
    pub balance_error: Option<String>,
}

impl BalanceSnapshot {
    pub fn ready(balances: HashMap<String, String>) -> Self {
        Self {
            balance_by_token_key: balances,
            is_fetching_cross_chain_balances: false,
            balance_error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            balance_by_token_key: HashMap::new(),
            is_fetching_cross_chain_balances: false,
            balance_error: Some(error),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Token, NATIVE_TOKEN};
    use crate::address;

    #[test]
    fn token_keys() {
        let eth = Token::native("ETH", "Ether", 18, 8453, "Base");
        let usdc = Token::erc20(
            address!("0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85"),
            "USDC",
            "USD Coin",
            6,
            10,
            "Optimism",
        );

        assert_eq!(eth.key(), "ETH-8453");
        assert_eq!(usdc.key(), "USDC-10");
    }

    #[test]
    fn native_constructor_uses_the_sentinel() {
        let celo = Token::native("CELO", "Celo", 18, 42220, "Celo");

        assert!(celo.is_native);
        assert_eq!(celo.address, NATIVE_TOKEN);
        assert_eq!(
            celo.address,
            address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE")
        );
    }
}
