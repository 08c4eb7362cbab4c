use crossbalance::{
    registry::StaticRegistry,
    types::{BalanceRequest, BalanceSnapshot},
    BalanceAggregator, FetchPolicy, ProviderPool, PROVIDERS,
};
use std::sync::Arc;

lazy_static::lazy_static! {
    static ref AGGREGATOR: BalanceAggregator<ProviderPool> = BalanceAggregator::new(
        Arc::clone(&PROVIDERS),
        Arc::new(StaticRegistry),
        FetchPolicy::default(),
    );
}

pub async fn cross_chain_balances(request: &BalanceRequest) -> BalanceSnapshot {
    AGGREGATOR.cross_chain_balances(request).await
}

pub async fn retry_cross_chain_balances(request: &BalanceRequest) -> BalanceSnapshot {
    AGGREGATOR.retry_fetch_balances(request).await
}
