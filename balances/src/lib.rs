#![deny(clippy::dbg_macro)]

pub mod aggregation;
pub mod registry;
pub mod types;

pub use aggregation::{BalanceAggregator, FetchPolicy};
pub use providers::{ProviderPool, PROVIDERS};

#[macro_export]
macro_rules! address {
    ($addr:expr) => {{
        use std::str::FromStr;
        $crate::types::Address::from_str($addr).expect(&format!("Invalid address {}", $addr))
    }};
}
