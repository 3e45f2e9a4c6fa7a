use async_trait::async_trait;
use log::{debug, info};

use config::JupiterConfig;

use crate::{build_http_client, get_json, IndexedRouteMap, JupiterApi, JupiterClientError};

/// Client handle for the Jupiter swap API, bound to a single base path.
#[derive(Debug, Clone)]
pub struct JupiterClient {
    client: reqwest::Client,
    base_path: String,
}

impl JupiterClient {
    pub fn new(
        base_path: impl Into<String>,
        request_timeout_sec: Option<u64>,
    ) -> Result<Self, JupiterClientError> {
        let base_path = base_path.into();
        debug!("Building Jupiter client for {}", base_path);

        Ok(JupiterClient { client: build_http_client(request_timeout_sec)?, base_path })
    }

    /// Builds the handle against the environment override if present, the configured
    /// default base URL otherwise.
    pub fn from_config(config: &JupiterConfig) -> Result<Self, JupiterClientError> {
        Self::new(config.resolve_base_path(), config.request_timeout_sec)
    }
}

#[async_trait]
impl JupiterApi for JupiterClient {
    fn base_path(&self) -> String {
        self.base_path.clone()
    }

    async fn get_indexed_route_map(&self) -> Result<IndexedRouteMap, JupiterClientError> {
        info!("Fetching indexed route map from {}", self.base_path);

        let url = format!("{}/v1/indexed-route-map", self.base_path.trim_end_matches('/'));
        let route_map: IndexedRouteMap = get_json(&self.client, &url).await?;

        info!(
            "Indexed route map fetched: {} mints, {} sources",
            route_map.mint_keys.len(),
            route_map.indexed_route_map.len()
        );

        Ok(route_map)
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use config::{JupiterConfig, DEFAULT_BASE_URL};

    use crate::{JupiterApi, JupiterClient, JupiterClientError};

    const TEST_ENV: &str = "JUP_SWAP_API_CLIENT_TEST";

    fn jupiter_config() -> JupiterConfig {
        JupiterConfig { base_url_env: TEST_ENV.to_string(), ..JupiterConfig::default() }
    }

    #[test]
    #[serial]
    fn test_base_path_defaults_to_public_endpoint() {
        env::remove_var(TEST_ENV);

        let client = JupiterClient::from_config(&jupiter_config()).unwrap();

        assert_eq!(client.base_path(), DEFAULT_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_base_path_uses_env_override() {
        env::set_var(TEST_ENV, "https://jupiter.example.com/");

        let client = JupiterClient::from_config(&jupiter_config()).unwrap();
        env::remove_var(TEST_ENV);

        assert_eq!(client.base_path(), "https://jupiter.example.com/");
    }

    #[tokio::test]
    async fn test_fetch_indexed_route_map_with_trailing_slash_base() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/indexed-route-map")
            .with_status(200)
            .with_body(r#"{"mintKeys": ["A"], "indexedRouteMap": {}}"#)
            .create_async()
            .await;

        let base_path = format!("{}/", server.url());
        let client = JupiterClient::new(base_path.clone(), None).unwrap();
        let route_map = client.get_indexed_route_map().await.unwrap();

        mock.assert_async().await;
        assert_eq!(client.base_path(), base_path);
        assert_eq!(route_map.mint_keys, vec!["A"]);
    }

    #[tokio::test]
    async fn test_fetch_indexed_route_map() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/indexed-route-map")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"mintKeys": ["A", "B", "C"], "indexedRouteMap": {"0": [1, 2]}}"#)
            .create_async()
            .await;

        let client = JupiterClient::new(server.url(), None).unwrap();
        let route_map = client.get_indexed_route_map().await.unwrap();

        mock.assert_async().await;
        assert_eq!(route_map.mint_keys, vec!["A", "B", "C"]);
        assert_eq!(route_map.indexed_route_map["0"], vec![1, 2]);
    }

    #[tokio::test]
    async fn test_fetch_indexed_route_map_request_failed() {
        let mut server = mockito::Server::new_async().await;
        let _mock =
            server.mock("GET", "/v1/indexed-route-map").with_status(503).create_async().await;

        let client = JupiterClient::new(server.url(), None).unwrap();
        let err = client.get_indexed_route_map().await.unwrap_err();

        assert!(matches!(err, JupiterClientError::RequestFailed(_, status) if status == 503));
    }

    #[tokio::test]
    async fn test_fetch_indexed_route_map_bad_payload() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/indexed-route-map")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = JupiterClient::new(server.url(), None).unwrap();
        let err = client.get_indexed_route_map().await.unwrap_err();

        assert!(
            matches!(err, JupiterClientError::DeserializationError(raw, _) if raw == "not json")
        );
    }
}
