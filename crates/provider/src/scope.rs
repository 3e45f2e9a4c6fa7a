//! Scoped access to a [`JupiterApiProvider`].
//!
//! A provider installs itself for the duration of a future with
//! [`JupiterApiProvider::scope`] (or a closure with [`JupiterApiProvider::sync_scope`]).
//! Code running inside that scope reads the published snapshot without the provider
//! being threaded through every call. Outside any scope the accessors fail with
//! [`ContextError::MissingProvider`].
use std::sync::Arc;

use crate::{ContextError, JupiterApiContext, JupiterApiProvider};

tokio::task_local! {
    pub(crate) static JUPITER_API_PROVIDER: JupiterApiProvider;
}

/// Snapshot of the innermost enclosing provider.
pub fn use_jupiter_api_context() -> Result<Arc<JupiterApiContext>, ContextError> {
    JUPITER_API_PROVIDER
        .try_with(|provider| provider.context())
        .map_err(|_| ContextError::MissingProvider)
}

/// The innermost enclosing provider itself, for callers that need to wait on or remount it.
pub fn use_jupiter_api_provider() -> Result<JupiterApiProvider, ContextError> {
    JUPITER_API_PROVIDER
        .try_with(JupiterApiProvider::clone)
        .map_err(|_| ContextError::MissingProvider)
}
