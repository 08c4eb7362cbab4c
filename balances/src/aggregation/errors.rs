use thiserror::Error;

/// Failures of the aggregation mechanism itself. Per-chain and per-token
/// read failures are degraded to zero balances and never reach this type.
#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("Balance fetch task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
