use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use arc_swap::ArcSwap;
use log::{debug, error, info};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use config::JupiterConfig;
use jupiter_client::{
    JupiterApi, JupiterClient, JupiterClientError, TokenListClient, TokenListSource,
};

use crate::maps::{build_token_map, resolve_route_map};
use crate::scope::JUPITER_API_PROVIDER;
use crate::{JupiterApiContext, LoadError, LoadStatus, RouteMap, TokenMap};

/// Loads the Jupiter token list and route map once per mount and publishes them as an
/// immutable [`JupiterApiContext`] snapshot.
///
/// Cloning is cheap, every clone shares the same snapshot and lifecycle.
#[derive(Clone)]
pub struct JupiterApiProvider {
    inner: Arc<Inner>,
}

struct Inner {
    api: Arc<dyn JupiterApi>,
    token_list: Arc<dyn TokenListSource>,
    snapshot: ArcSwap<JupiterApiContext>,
    lifecycle: Mutex<Lifecycle>,
    settled: Notify,
}

#[derive(Default)]
struct Lifecycle {
    mounted: bool,
    // Bumped on every mount and unmount, a load only publishes for its own generation
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl JupiterApiProvider {
    pub fn new(api: Arc<dyn JupiterApi>, token_list: Arc<dyn TokenListSource>) -> Self {
        let snapshot = ArcSwap::from_pointee(JupiterApiContext::empty(
            api.clone(),
            LoadStatus::NotLoaded,
        ));

        JupiterApiProvider {
            inner: Arc::new(Inner {
                api,
                token_list,
                snapshot,
                lifecycle: Mutex::new(Lifecycle::default()),
                settled: Notify::new(),
            }),
        }
    }

    /// Builds the client handle and token list client from configuration. The base path
    /// override is read from the environment here, once.
    pub fn from_config(config: &JupiterConfig) -> Result<Self, JupiterClientError> {
        let api = JupiterClient::from_config(config)?;
        let token_list = TokenListClient::from_config(config)?;

        Ok(Self::new(Arc::new(api), Arc::new(token_list)))
    }

    pub fn api(&self) -> Arc<dyn JupiterApi> {
        self.inner.api.clone()
    }

    /// Current snapshot. Never blocks.
    pub fn context(&self) -> Arc<JupiterApiContext> {
        self.inner.snapshot.load_full()
    }

    /// Starts a load in the background. Calling it on a mounted provider does nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(&self) {
        let mut lifecycle = self.inner.lock_lifecycle();
        if lifecycle.mounted {
            debug!("JupiterApiProvider already mounted, ignoring");
            return;
        }

        lifecycle.mounted = true;
        lifecycle.generation += 1;
        let generation = lifecycle.generation;

        let loading = JupiterApiContext::empty(self.inner.api.clone(), LoadStatus::Loading);
        self.inner.snapshot.store(Arc::new(loading));

        info!("Mounting JupiterApiProvider (generation {})", generation);

        let inner = self.inner.clone();
        lifecycle.task = Some(tokio::spawn(async move {
            let result = load(inner.api.as_ref(), inner.token_list.as_ref()).await;
            inner.publish(generation, result);
        }));
    }

    /// Cancels the in-flight load, if any, and drops the published data.
    pub fn unmount(&self) {
        let mut lifecycle = self.inner.lock_lifecycle();
        if let Some(task) = lifecycle.task.take() {
            task.abort();
        }

        lifecycle.mounted = false;
        lifecycle.generation += 1;

        let not_loaded = JupiterApiContext::empty(self.inner.api.clone(), LoadStatus::NotLoaded);
        self.inner.snapshot.store(Arc::new(not_loaded));
        drop(lifecycle);

        info!("JupiterApiProvider unmounted");
        self.inner.settled.notify_waiters();
    }

    pub fn remount(&self) {
        self.unmount();
        self.mount();
    }

    /// Waits until the current mount has either loaded or failed.
    ///
    /// Returns [`LoadError::NotMounted`] when the provider is not mounted or gets unmounted
    /// while waiting.
    pub async fn wait_until_settled(&self) -> Result<Arc<JupiterApiContext>, Arc<LoadError>> {
        loop {
            let settled = self.inner.settled.notified();

            let context = self.context();
            match context.status {
                LoadStatus::Loaded => return Ok(context),
                LoadStatus::Failed => {
                    return Err(context
                        .error
                        .clone()
                        .unwrap_or_else(|| Arc::new(LoadError::NotMounted)))
                }
                LoadStatus::NotLoaded => return Err(Arc::new(LoadError::NotMounted)),
                LoadStatus::Loading => settled.await,
            }
        }
    }

    /// Runs `f` with this provider installed for [`crate::use_jupiter_api_context`].
    ///
    /// The scope does not carry over into tasks spawned from `f`.
    pub async fn scope<F: Future>(&self, f: F) -> F::Output {
        JUPITER_API_PROVIDER.scope(self.clone(), f).await
    }

    pub fn sync_scope<R>(&self, f: impl FnOnce() -> R) -> R {
        JUPITER_API_PROVIDER.sync_scope(self.clone(), f)
    }
}

impl fmt::Debug for JupiterApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JupiterApiProvider").field("context", &self.context()).finish()
    }
}

impl Inner {
    fn lock_lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, generation: u64, result: Result<(TokenMap, RouteMap), LoadError>) {
        let lifecycle = self.lock_lifecycle();
        if !lifecycle.mounted || lifecycle.generation != generation {
            debug!(
                "Discarding load result of generation {}, current generation is {}",
                generation, lifecycle.generation
            );
            return;
        }

        let context = match result {
            Ok((token_map, route_map)) => {
                info!(
                    "Jupiter data loaded: {} tokens, {} route sources",
                    token_map.len(),
                    route_map.len()
                );
                JupiterApiContext::loaded(self.api.clone(), token_map, route_map)
            }
            Err(err) => {
                error!("Failed to load Jupiter data: {}", err);
                JupiterApiContext::failed(self.api.clone(), err)
            }
        };

        self.snapshot.store(Arc::new(context));
        drop(lifecycle);

        self.settled.notify_waiters();
    }
}

async fn load(
    api: &dyn JupiterApi,
    token_list: &dyn TokenListSource,
) -> Result<(TokenMap, RouteMap), LoadError> {
    let (tokens, top_tokens, indexed_route_map) = tokio::try_join!(
        async { token_list.get_tokens().await.map_err(LoadError::Tokens) },
        async { token_list.get_top_tokens().await.map_err(LoadError::TopTokens) },
        async { api.get_indexed_route_map().await.map_err(LoadError::RouteMap) },
    )?;

    // Top tokens are fetched alongside the rest but not published
    debug!("{} top tokens fetched", top_tokens.len());

    let route_map = resolve_route_map(indexed_route_map)?;
    Ok((build_token_map(tokens), route_map))
}
