use crate::{address, types::Token};
use std::collections::HashMap;

/// Source of the token descriptors queried per chain.
pub trait TokenRegistry: Send + Sync {
    /// Descriptors for one chain. Unknown chains yield an empty list.
    fn tokens_by_chain(&self, chain_id: u64) -> Vec<Token>;
}

lazy_static::lazy_static! {
    pub static ref TOKENS: HashMap<u64, Vec<Token>> = {
        let mut tokens = HashMap::new();

        tokens.insert(1, vec![
            Token::native("ETH", "Ether", 18, 1, "Ethereum"),
            Token::erc20(
                address!("0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
                "USDC", "USD Coin", 6, 1, "Ethereum",
            ),
            Token::erc20(
                address!("0x6B175474E89094C44Da98b954EedeAC495271d0F"),
                "DAI", "Dai Stablecoin", 18, 1, "Ethereum",
            ),
            Token::erc20(
                address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
                "WETH", "Wrapped Ether", 18, 1, "Ethereum",
            ),
        ]);
        tokens.insert(10, vec![
            Token::native("ETH", "Ether", 18, 10, "Optimism"),
            Token::erc20(
                address!("0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85"),
                "USDC", "USD Coin", 6, 10, "Optimism",
            ),
            Token::erc20(
                address!("0x4200000000000000000000000000000000000042"),
                "OP", "Optimism", 18, 10, "Optimism",
            ),
        ]);
        tokens.insert(8453, vec![
            Token::native("ETH", "Ether", 18, 8453, "Base"),
            Token::erc20(
                address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
                "USDC", "USD Coin", 6, 8453, "Base",
            ),
        ]);
        tokens.insert(42161, vec![
            Token::native("ETH", "Ether", 18, 42161, "Arbitrum One"),
            Token::erc20(
                address!("0xaf88d065e77c8cC2239327C5EDb3A432268e5831"),
                "USDC", "USD Coin", 6, 42161, "Arbitrum One",
            ),
            Token::erc20(
                address!("0x912CE59144191C1204E64559FE8253a0e49E6548"),
                "ARB", "Arbitrum", 18, 42161, "Arbitrum One",
            ),
        ]);
        tokens.insert(42220, vec![
            Token::native("CELO", "Celo", 18, 42220, "Celo"),
            Token::erc20(
                address!("0x765DE816845861e75A25fCA122bb6898B8B1282a"),
                "cUSD", "Celo Dollar", 18, 42220, "Celo",
            ),
        ]);
        tokens.insert(11155111, vec![
            Token::native("ETH", "Ether", 18, 11155111, "Sepolia"),
        ]);

        tokens
    };
}

/// Registry backed by the static token table above.
pub struct StaticRegistry;

impl TokenRegistry for StaticRegistry {
    fn tokens_by_chain(&self, chain_id: u64) -> Vec<Token> {
        TOKENS.get(&chain_id).cloned().unwrap_or_default()
    }
}
