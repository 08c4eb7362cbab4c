pub mod evm;

use async_trait::async_trait;
use std::sync::Arc;

pub use evm::{ChainConfig, Provider, ProviderError, ProviderPool, CHAINS, PROVIDERS};
pub use web3::types::{Address, U256};

/// Read-only balance access for a single chain.
///
/// Implementations are shared behind `Arc` and queried concurrently, so
/// they must not hold per-call state.
#[async_trait]
pub trait BalanceQuerier: Send + Sync {
    /// Native coin balance of `owner` in the chain's smallest unit.
    async fn get_native_balance(&self, owner: Address) -> Result<U256, ProviderError>;

    /// ERC-20 balances of `owner` for every contract in `tokens`, resolved
    /// with a single batched call. The outer error means the whole batch
    /// failed; an inner error marks one call that failed within an otherwise
    /// successful batch. Results keep the order of `tokens`.
    async fn get_erc20_balances(
        &self,
        tokens: &[Address],
        owner: Address,
    ) -> Result<Vec<Result<U256, ProviderError>>, ProviderError>;
}

/// Maps chain ids to shared [`BalanceQuerier`] instances.
#[async_trait]
pub trait RpcClientProvider: Send + Sync {
    async fn get_rpc_client(
        &self,
        chain_id: u64,
    ) -> Result<Arc<dyn BalanceQuerier>, ProviderError>;
}
