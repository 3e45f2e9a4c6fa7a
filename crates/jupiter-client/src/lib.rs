use async_trait::async_trait;
use log::error;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

pub use client::JupiterClient;
pub use errors::JupiterClientError;
pub use token_list::TokenListClient;
pub use types::{IndexedRouteMap, TokenInfo};

mod client;
mod errors;
mod token_list;
pub mod types;

/// Operations of the Jupiter swap API a provider depends on.
#[async_trait]
pub trait JupiterApi: Send + Sync {
    fn base_path(&self) -> String;

    async fn get_indexed_route_map(&self) -> Result<IndexedRouteMap, JupiterClientError>;
}

/// Source of the token registry: the full token list and the ids of the top tokens.
#[async_trait]
pub trait TokenListSource: Send + Sync {
    async fn get_tokens(&self) -> Result<Vec<TokenInfo>, JupiterClientError>;

    async fn get_top_tokens(&self) -> Result<Vec<String>, JupiterClientError>;
}

pub(crate) fn build_http_client(
    request_timeout_sec: Option<u64>,
) -> Result<reqwest::Client, JupiterClientError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = request_timeout_sec {
        builder = builder.timeout(std::time::Duration::from_secs(timeout));
    }

    Ok(builder.build()?)
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, JupiterClientError> {
    let response = client.get(url).send().await?;

    if response.status() != StatusCode::OK {
        error!("GET {} failed with status: {}", url, response.status());
        return Err(JupiterClientError::RequestFailed(url.to_string(), response.status()));
    }

    let raw_text = response.text().await?;

    serde_json::from_str(&raw_text)
        .map_err(|err| JupiterClientError::DeserializationError(raw_text, err))
}
