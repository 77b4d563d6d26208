use {
    crate::api::{Address, CepApi},
    futures::{
        FutureExt,
        future::{BoxFuture, Shared},
    },
    model::cep::Cep,
    prometheus::IntCounterVec,
    std::{
        collections::{HashMap, hash_map::Entry},
        sync::{Arc, Mutex},
    },
    thiserror::Error,
};

/// Why a lookup produced no address.
///
/// `NotFound` is a final answer about the data and is treated like any other
/// validation failure. `Transport` means the answer could not be obtained at
/// all; callers may retry and must not present it as "the code is wrong".
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ResolveError {
    #[error("postal code not found")]
    NotFound,
    #[error("postal code lookup failed: {0}")]
    Transport(String),
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait CepResolving: Send + Sync {
    /// Resolves a structurally valid postal code to its registered address.
    async fn resolve(&self, cep: Cep) -> Result<Address, ResolveError>;
}

/// Plain resolver that maps ViaCEP answers onto domain outcomes.
pub struct ViaCepResolver {
    api: Arc<dyn CepApi>,
}

impl ViaCepResolver {
    pub fn new(api: Arc<dyn CepApi>) -> Self {
        Self { api }
    }
}

#[async_trait::async_trait]
impl CepResolving for ViaCepResolver {
    async fn resolve(&self, cep: Cep) -> Result<Address, ResolveError> {
        let outcome = match self.api.lookup(cep.clone()).await {
            Ok(Some(address)) => Ok(address),
            Ok(None) => Err(ResolveError::NotFound),
            Err(err) => {
                tracing::warn!(%cep, ?err, "postal code lookup failed");
                Err(ResolveError::Transport(format!("{err:#}")))
            }
        };
        Metrics::get()
            .cep_lookups
            .with_label_values(&[outcome_label(&outcome)])
            .inc();
        outcome
    }
}

fn outcome_label(outcome: &Result<Address, ResolveError>) -> &'static str {
    match outcome {
        Ok(_) => "found",
        Err(ResolveError::NotFound) => "not_found",
        Err(ResolveError::Transport(_)) => "transport_error",
    }
}

type SharedLookup = Shared<BoxFuture<'static, Result<Address, ResolveError>>>;

/// Caches lookups for the lifetime of the resolver and shares in-flight
/// requests, so each distinct code reaches the network at most once per
/// settled answer.
///
/// A confirmed `NotFound` is as final as a found address and stays cached.
/// Only transport failures are evicted, which makes the next request for the
/// same code try again.
pub struct CachedCepResolver {
    inner: Arc<dyn CepResolving>,
    cache: Mutex<HashMap<Cep, SharedLookup>>,
}

impl CachedCepResolver {
    pub fn new(inner: Arc<dyn CepResolving>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait::async_trait]
impl CepResolving for CachedCepResolver {
    async fn resolve(&self, cep: Cep) -> Result<Address, ResolveError> {
        let lookup = {
            let mut cache = self.cache.lock().unwrap();
            match cache.entry(cep.clone()) {
                Entry::Occupied(entry) => {
                    Metrics::get()
                        .cep_cache_access
                        .with_label_values(&["hits"])
                        .inc();
                    entry.get().clone()
                }
                Entry::Vacant(entry) => {
                    Metrics::get()
                        .cep_cache_access
                        .with_label_values(&["misses"])
                        .inc();
                    let inner = self.inner.clone();
                    let cep = cep.clone();
                    entry
                        .insert(async move { inner.resolve(cep).await }.boxed().shared())
                        .clone()
                }
            }
        };

        let outcome = lookup.await;
        if matches!(outcome, Err(ResolveError::Transport(_))) {
            // Another task may have evicted and replaced the entry already;
            // peeking makes sure only the settled failure is dropped, never a
            // fresh in-flight lookup.
            let mut cache = self.cache.lock().unwrap();
            if let Some(Err(ResolveError::Transport(_))) =
                cache.get(&cep).and_then(|lookup| lookup.peek())
            {
                cache.remove(&cep);
            }
        }

        outcome
    }
}

#[derive(prometheus_metric_storage::MetricStorage)]
struct Metrics {
    /// Postal-code cache accesses, by whether the code was already cached.
    #[metric(labels("result"))]
    cep_cache_access: IntCounterVec,

    /// Settled postal-code lookups, by outcome.
    #[metric(labels("outcome"))]
    cep_lookups: IntCounterVec,
}

impl Metrics {
    fn get() -> &'static Self {
        Metrics::instance(observe::metrics::get_storage_registry()).unwrap()
    }
}
