use async_trait::async_trait;
use log::info;

use config::JupiterConfig;

use crate::{build_http_client, get_json, JupiterClientError, TokenInfo, TokenListSource};

/// Reads the token registry from the Jupiter token cache.
#[derive(Debug, Clone)]
pub struct TokenListClient {
    client: reqwest::Client,
    tokens_url: String,
    top_tokens_url: String,
}

impl TokenListClient {
    pub fn new(
        tokens_url: impl Into<String>,
        top_tokens_url: impl Into<String>,
        request_timeout_sec: Option<u64>,
    ) -> Result<Self, JupiterClientError> {
        Ok(TokenListClient {
            client: build_http_client(request_timeout_sec)?,
            tokens_url: tokens_url.into(),
            top_tokens_url: top_tokens_url.into(),
        })
    }

    pub fn from_config(config: &JupiterConfig) -> Result<Self, JupiterClientError> {
        Self::new(&config.tokens_url, &config.top_tokens_url, config.request_timeout_sec)
    }
}

#[async_trait]
impl TokenListSource for TokenListClient {
    async fn get_tokens(&self) -> Result<Vec<TokenInfo>, JupiterClientError> {
        info!("Fetching token list from {}", self.tokens_url);

        let tokens: Vec<TokenInfo> = get_json(&self.client, &self.tokens_url).await?;

        info!("{} tokens fetched", tokens.len());
        Ok(tokens)
    }

    async fn get_top_tokens(&self) -> Result<Vec<String>, JupiterClientError> {
        info!("Fetching top tokens from {}", self.top_tokens_url);

        get_json(&self.client, &self.top_tokens_url).await
    }
}
