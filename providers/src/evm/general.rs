use crate::{
    evm::{CHAINS, ERC20_ABI, MULTICALL_ABI},
    BalanceQuerier, RpcClientProvider,
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tokio::sync::RwLock;
use web3::{
    contract::{Contract, Options},
    ethabi,
    transports::Http,
    types::{Address, U256},
    Web3,
};

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Chain `{0}` is not supported")]
    ChainNotSupported(u64),
    #[error("Environment variable `{0}` is not set")]
    MissingRpcUrl(String),
    #[error(transparent)]
    Web3(#[from] web3::Error),
    #[error(transparent)]
    Web3Contract(#[from] web3::contract::Error),
    #[error(transparent)]
    Abi(#[from] ethabi::Error),
    #[error("Multicall returned {got} results for {expected} calls")]
    BatchLengthMismatch { expected: usize, got: usize },
    #[error("Call reverted or returned undecodable data")]
    CallFailed,
}

lazy_static::lazy_static! {
    static ref ERC20: ethabi::Contract =
        ethabi::Contract::load(ERC20_ABI).expect("Invalid ERC-20 ABI");
}

fn balance_of_call(token: Address, owner: Address) -> Result<ethabi::Token, ProviderError> {
    let data = ERC20
        .function("balanceOf")?
        .encode_input(&[ethabi::Token::Address(owner)])?;

    Ok(ethabi::Token::Tuple(vec![
        ethabi::Token::Address(token),
        ethabi::Token::Bytes(data),
    ]))
}

fn decode_balance(result: ethabi::Token) -> Result<U256, ProviderError> {
    let fields = match result {
        ethabi::Token::Tuple(fields) => fields,
        _ => return Err(ProviderError::CallFailed),
    };

    match fields.as_slice() {
        [ethabi::Token::Bool(true), ethabi::Token::Bytes(data)] => {
            match ethabi::decode(&[ethabi::ParamType::Uint(256)], data) {
                Ok(tokens) => match tokens.as_slice() {
                    [ethabi::Token::Uint(balance)] => Ok(*balance),
                    _ => Err(ProviderError::CallFailed),
                },
                Err(_) => Err(ProviderError::CallFailed),
            }
        }
        _ => Err(ProviderError::CallFailed),
    }
}

/// Read-only web3 client for one chain.
pub struct Provider {
    pub chain_id: u64,
    pub web3: Web3<Http>,
    multicall: Contract<Http>,
}

impl Provider {
    /// Builds a client for `chain_id` from the chain table and the chain's
    /// RPC URL environment variable.
    pub fn new(chain_id: u64) -> Result<Self, ProviderError> {
        let config = CHAINS
            .get(&chain_id)
            .ok_or(ProviderError::ChainNotSupported(chain_id))?;

        let rpc_url = std::env::var(config.rpc_env)
            .map_err(|_| ProviderError::MissingRpcUrl(config.rpc_env.to_string()))?;

        let web3 = Web3::new(Http::new(&rpc_url)?);
        let multicall = Contract::from_json(web3.eth(), config.multicall, MULTICALL_ABI)?;

        log::info!("created provider for {} (chain {chain_id})", config.name);

        Ok(Self {
            chain_id,
            web3,
            multicall,
        })
    }
}

#[async_trait]
impl BalanceQuerier for Provider {
    async fn get_native_balance(&self, owner: Address) -> Result<U256, ProviderError> {
        self.web3
            .eth()
            .balance(owner, None)
            .await
            .map_err(ProviderError::Web3)
    }

    async fn get_erc20_balances(
        &self,
        tokens: &[Address],
        owner: Address,
    ) -> Result<Vec<Result<U256, ProviderError>>, ProviderError> {
        if tokens.is_empty() {
            return Ok(vec![]);
        }

        let calls = tokens
            .iter()
            .map(|token| balance_of_call(*token, owner))
            .collect::<Result<Vec<_>, _>>()?;

        // With `requireSuccess = false` the multicall contract reports
        // reverts per call instead of failing the whole batch.
        let results: Vec<ethabi::Token> = self
            .multicall
            .query(
                "tryAggregate",
                (false, calls),
                None,
                Options::default(),
                None,
            )
            .await?;

        if results.len() != tokens.len() {
            return Err(ProviderError::BatchLengthMismatch {
                expected: tokens.len(),
                got: results.len(),
            });
        }

        Ok(results.into_iter().map(decode_balance).collect())
    }
}

/// Lazily-populated cache of per-chain clients. Clients are created on
/// first use and kept for the process lifetime; entries are never replaced.
pub struct ProviderPool {
    providers: RwLock<HashMap<u64, Arc<Provider>>>,
}

impl ProviderPool {
    pub fn new() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for ProviderPool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RpcClientProvider for ProviderPool {
    async fn get_rpc_client(
        &self,
        chain_id: u64,
    ) -> Result<Arc<dyn BalanceQuerier>, ProviderError> {
        {
            let providers = self.providers.read().await;
            if let Some(provider) = providers.get(&chain_id) {
                return Ok(Arc::clone(provider) as Arc<dyn BalanceQuerier>);
            }
        }

        let provider = Arc::new(Provider::new(chain_id)?);

        // If two resolutions race, the one that inserts first wins and the
        // losing client is dropped.
        let mut providers = self.providers.write().await;
        let provider = providers.entry(chain_id).or_insert(provider);

        Ok(Arc::clone(provider) as Arc<dyn BalanceQuerier>)
    }
}

lazy_static::lazy_static! {
    pub static ref PROVIDERS: Arc<ProviderPool> = Arc::new(ProviderPool::new());
}
