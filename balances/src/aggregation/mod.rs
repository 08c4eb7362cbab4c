use crate::{
    registry::TokenRegistry,
    types::{Address, BalanceRequest, BalanceSnapshot},
};
use futures::future::join_all;
use providers::RpcClientProvider;
use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

pub mod errors;
pub mod fetcher;
pub mod utils;

pub use errors::AggregationError;

/// Tuning for the aggregation engine. `retry_count` is the total number of
/// attempts for one run and applies to orchestration failures only;
/// per-chain read errors are degraded to zeros, not retried.
#[derive(Clone, Debug)]
pub struct FetchPolicy {
    pub retry_count: usize,
    pub retry_delay: Duration,
    pub cache_lifetime: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            retry_count: 3,
            retry_delay: Duration::from_secs(5),
            cache_lifetime: Duration::from_secs(60),
        }
    }
}

/// Identity of an aggregation request: the wallet address plus the sorted,
/// deduplicated chain id set. Chain order and the focused chain never
/// change the identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestKey {
    address: Address,
    chain_ids: Vec<u64>,
}

impl RequestKey {
    pub fn new(address: Address, chain_ids: &[u64]) -> Self {
        let mut chain_ids = chain_ids.to_vec();
        chain_ids.sort_unstable();
        chain_ids.dedup();

        Self { address, chain_ids }
    }

    /// `None` when the request cannot produce balances: no wallet is
    /// connected or no chains were requested.
    pub fn from_request(request: &BalanceRequest) -> Option<Self> {
        match request.address {
            Some(address) if !request.chain_ids.is_empty() => {
                Some(Self::new(address, &request.chain_ids))
            }
            _ => None,
        }
    }
}

struct CachedBalances {
    balances: HashMap<String, String>,
    created_at: Instant,
}

/// Fans one balance request out to every requested chain, merges the
/// settled entries into a single `SYMBOL-CHAINID` keyed map and caches the
/// result per request key.
pub struct BalanceAggregator<R> {
    resolver: Arc<R>,
    registry: Arc<dyn TokenRegistry>,
    policy: FetchPolicy,
    cache: Mutex<HashMap<RequestKey, CachedBalances>>,
    in_flight: Mutex<HashMap<RequestKey, Arc<Mutex<()>>>>,
    fetching: AtomicUsize,
}

impl<R: RpcClientProvider + 'static> BalanceAggregator<R> {
    pub fn new(resolver: Arc<R>, registry: Arc<dyn TokenRegistry>, policy: FetchPolicy) -> Self {
        Self {
            resolver,
            registry,
            policy,
            cache: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            fetching: AtomicUsize::new(0),
        }
    }

    /// Aggregated balances for the request, served from cache while fresh.
    pub async fn cross_chain_balances(&self, request: &BalanceRequest) -> BalanceSnapshot {
        let key = match RequestKey::from_request(request) {
            Some(key) => key,
            None => return BalanceSnapshot::default(),
        };

        log::debug!(
            "balance request for {:?} on {:?} (focus {})",
            key.address,
            key.chain_ids,
            request.focus_chain_id
        );

        if let Some(balances) = self.cached(&key).await {
            return BalanceSnapshot::ready(balances);
        }

        self.fetch_and_cache(&key).await
    }

    /// Forgets any cached result for the request, then fetches it again.
    pub async fn retry_fetch_balances(&self, request: &BalanceRequest) -> BalanceSnapshot {
        if let Some(key) = RequestKey::from_request(request) {
            self.cache.lock().await.remove(&key);
        }

        self.cross_chain_balances(request).await
    }

    /// Whether at least one aggregation run currently has outstanding
    /// per-chain fetches.
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst) > 0
    }

    async fn cached(&self, key: &RequestKey) -> Option<HashMap<String, String>> {
        let cache = self.cache.lock().await;

        cache
            .get(key)
            .filter(|cached| cached.created_at.elapsed() < self.policy.cache_lifetime)
            .map(|cached| cached.balances.clone())
    }

    async fn store(&self, key: &RequestKey, balances: HashMap<String, String>) {
        let mut cache = self.cache.lock().await;

        cache.retain(|_, cached| cached.created_at.elapsed() < self.policy.cache_lifetime);
        cache.insert(
            key.clone(),
            CachedBalances {
                balances,
                created_at: Instant::now(),
            },
        );
    }

    async fn in_flight_lock(&self, key: &RequestKey) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;

        Arc::clone(
            in_flight
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }

    async fn fetch_and_cache(&self, key: &RequestKey) -> BalanceSnapshot {
        // Concurrent identical requests serialize here; whoever runs first
        // fills the cache for the rest.
        let _in_flight = self.in_flight_lock(key).await.lock_owned().await;

        if let Some(balances) = self.cached(key).await {
            return BalanceSnapshot::ready(balances);
        }

        self.fetching.fetch_add(1, Ordering::SeqCst);
        let fetched = self.fetch_with_retry(key).await;
        self.fetching.fetch_sub(1, Ordering::SeqCst);

        match fetched {
            Ok(balances) => {
                self.store(key, balances.clone()).await;
                BalanceSnapshot::ready(balances)
            }
            Err(error) => {
                // Failed runs are not cached; the next identical request
                // starts over.
                log::warn!("balance aggregation for {:?} failed: {error}", key.address);
                BalanceSnapshot::failed(error.to_string())
            }
        }
    }

    async fn fetch_with_retry(
        &self,
        key: &RequestKey,
    ) -> Result<HashMap<String, String>, AggregationError> {
        let mut attempt = 1;

        loop {
            match self.fetch_all(key).await {
                Ok(balances) => return Ok(balances),
                Err(error) => {
                    if attempt >= self.policy.retry_count {
                        return Err(error);
                    }

                    log::warn!(
                        "balance fetch attempt {attempt}/{} failed: {error}",
                        self.policy.retry_count
                    );
                    attempt += 1;
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
            }
        }
    }

    async fn fetch_all(
        &self,
        key: &RequestKey,
    ) -> Result<HashMap<String, String>, AggregationError> {
        let owner = key.address;
        let tasks = key
            .chain_ids
            .iter()
            .map(|&chain_id| {
                let resolver = Arc::clone(&self.resolver);
                let tokens = self.registry.tokens_by_chain(chain_id);

                tokio::spawn(async move {
                    fetcher::fetch_chain_balances(resolver.as_ref(), chain_id, owner, tokens).await
                })
            })
            .collect::<Vec<_>>();

        let mut balances = HashMap::new();

        for settled in join_all(tasks).await {
            for entry in settled? {
                balances.insert(entry.token_key, entry.formatted);
            }
        }

        Ok(balances)
    }
}
