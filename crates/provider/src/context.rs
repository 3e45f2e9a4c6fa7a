use std::fmt;
use std::sync::Arc;

use derive_more::Display;

use jupiter_client::JupiterApi;

use crate::{LoadError, RouteMap, TokenMap};

/// Lifecycle of a single mount. Only an unmount moves a provider back to `NotLoaded`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    NotLoaded,
    Loading,
    Loaded,
    Failed,
}

/// Snapshot published by a [`crate::JupiterApiProvider`].
///
/// Snapshots are immutable: a load replaces the whole value, so readers either see the
/// empty maps of an unfinished load or the complete maps of a finished one.
pub struct JupiterApiContext {
    pub api: Arc<dyn JupiterApi>,
    pub status: LoadStatus,
    pub loaded: bool,
    pub token_map: TokenMap,
    pub route_map: RouteMap,
    pub error: Option<Arc<LoadError>>,
}

impl JupiterApiContext {
    pub(crate) fn empty(api: Arc<dyn JupiterApi>, status: LoadStatus) -> Self {
        JupiterApiContext {
            api,
            status,
            loaded: false,
            token_map: TokenMap::new(),
            route_map: RouteMap::new(),
            error: None,
        }
    }

    pub(crate) fn loaded(
        api: Arc<dyn JupiterApi>,
        token_map: TokenMap,
        route_map: RouteMap,
    ) -> Self {
        JupiterApiContext {
            api,
            status: LoadStatus::Loaded,
            loaded: true,
            token_map,
            route_map,
            error: None,
        }
    }

    pub(crate) fn failed(api: Arc<dyn JupiterApi>, error: LoadError) -> Self {
        JupiterApiContext {
            error: Some(Arc::new(error)),
            ..Self::empty(api, LoadStatus::Failed)
        }
    }

    /// Mints reachable in one swap from `mint`, empty when there is no route.
    pub fn routes_from(&self, mint: &str) -> &[String] {
        self.route_map.get(mint).map(Vec::as_slice).unwrap_or_default()
    }
}

impl fmt::Debug for JupiterApiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JupiterApiContext")
            .field("api", &self.api.base_path())
            .field("status", &self.status)
            .field("loaded", &self.loaded)
            .field("tokens", &self.token_map.len())
            .field("routes", &self.route_map.len())
            .field("error", &self.error)
            .finish()
    }
}
