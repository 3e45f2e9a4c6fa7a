use thiserror::Error;

use jupiter_client::JupiterClientError;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to fetch token list: {0}")]
    Tokens(JupiterClientError),

    #[error("Failed to fetch top tokens: {0}")]
    TopTokens(JupiterClientError),

    #[error("Failed to fetch indexed route map: {0}")]
    RouteMap(JupiterClientError),

    #[error("Route map key is not a valid index: {0}")]
    InvalidRouteKey(String),

    #[error("Route map index {index} out of range for {len} mint keys")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Provider is not mounted")]
    NotMounted,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("use_jupiter_api_context must be used within a JupiterApiProvider")]
    MissingProvider,
}
