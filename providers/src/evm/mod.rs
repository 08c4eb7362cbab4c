pub mod general;

pub use general::{Provider, ProviderError, ProviderPool, PROVIDERS};

use std::collections::HashMap;
use web3::types::Address;

pub const ERC20_ABI: &[u8] = include_bytes!("../../../abi/ERC20.json");
pub const MULTICALL_ABI: &[u8] = include_bytes!("../../../abi/MULTICALL.json");

/// Static description of a supported chain: display name, the environment
/// variable holding its RPC URL and the multicall contract to batch
/// read-only calls through.
pub struct ChainConfig {
    pub name: &'static str,
    pub rpc_env: &'static str,
    pub multicall: Address,
}

#[macro_export]
macro_rules! address {
    ($addr:expr) => {{
        use std::str::FromStr;
        web3::types::Address::from_str($addr).expect(&format!("Invalid address {}", $addr))
    }};
}

lazy_static::lazy_static! {
    pub static ref CHAINS: HashMap<u64, ChainConfig> = {
        // Multicall3 is deployed at the same address on every chain below.
        let multicall = address!("0xcA11bde05977b3631167028862bE2a173976CA11");

        let mut chains = HashMap::new();

        chains.insert(
            1,
            ChainConfig {
                name: "Ethereum",
                rpc_env: "ETHEREUM_RPC",
                multicall,
            },
        );
        chains.insert(
            10,
            ChainConfig {
                name: "Optimism",
                rpc_env: "OPTIMISM_RPC",
                multicall,
            },
        );
        chains.insert(
            8453,
            ChainConfig {
                name: "Base",
                rpc_env: "BASE_RPC",
                multicall,
            },
        );
        chains.insert(
            42161,
            ChainConfig {
                name: "Arbitrum One",
                rpc_env: "ARBITRUM_RPC",
                multicall,
            },
        );
        chains.insert(
            42220,
            ChainConfig {
                name: "Celo",
                rpc_env: "CELO_RPC",
                multicall,
            },
        );
        chains.insert(
            11155111,
            ChainConfig {
                name: "Sepolia",
                rpc_env: "SEPOLIA_RPC",
                multicall,
            },
        );

        chains
    };
}
