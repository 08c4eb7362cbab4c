use crate::{
    aggregation::utils::format_units,
    types::{BalanceEntry, Token},
};
use providers::{Address, RpcClientProvider, U256};

fn entry(token: &Token, raw: U256) -> BalanceEntry {
    BalanceEntry {
        token_key: token.key(),
        formatted: format_units(raw, token.decimals),
        raw,
    }
}

/// Resolves every balance for one chain: one native read plus one batched
/// call covering all ERC-20 descriptors, issued concurrently.
///
/// Failures never escape. A failed client resolution, a failed native
/// read, a failed batch and a failed call inside the batch all degrade to
/// zero balances, so one bad chain cannot take down an aggregation.
pub async fn fetch_chain_balances<R: RpcClientProvider>(
    resolver: &R,
    chain_id: u64,
    owner: Address,
    tokens: Vec<Token>,
) -> Vec<BalanceEntry> {
    if tokens.is_empty() {
        return vec![];
    }

    let client = match resolver.get_rpc_client(chain_id).await {
        Ok(client) => client,
        Err(error) => {
            log::warn!("no rpc client for chain {chain_id}: {error}");
            return tokens
                .iter()
                .map(|token| entry(token, U256::zero()))
                .collect();
        }
    };

    let has_native = tokens.iter().any(|token| token.is_native);
    let contracts: Vec<Address> = tokens
        .iter()
        .filter(|token| !token.is_native)
        .map(|token| token.address)
        .collect();

    let (native_result, batch_result) = futures::join!(
        async {
            if has_native {
                Some(client.get_native_balance(owner).await)
            } else {
                None
            }
        },
        async {
            if contracts.is_empty() {
                Ok(vec![])
            } else {
                client.get_erc20_balances(&contracts, owner).await
            }
        },
    );

    let native_balance = match native_result {
        Some(Ok(balance)) => balance,
        Some(Err(error)) => {
            log::warn!("native balance read failed on chain {chain_id}: {error}");
            U256::zero()
        }
        None => U256::zero(),
    };

    let batch = match batch_result {
        Ok(results) => results,
        Err(error) => {
            log::warn!("batched balance call failed on chain {chain_id}: {error}");
            vec![]
        }
    };

    // Batch results arrive in submission order; walk them alongside the
    // ERC-20 descriptors.
    let mut next_erc20 = 0;

    tokens
        .iter()
        .map(|token| {
            if token.is_native {
                return entry(token, native_balance);
            }

            let result = batch.get(next_erc20);
            next_erc20 += 1;

            match result {
                Some(Ok(balance)) => entry(token, *balance),
                Some(Err(error)) => {
                    log::debug!(
                        "balanceOf {:?} failed on chain {chain_id}: {error}",
                        token.address
                    );
                    entry(token, U256::zero())
                }
                None => entry(token, U256::zero()),
            }
        })
        .collect()
}
