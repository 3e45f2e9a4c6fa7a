use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Token metadata as published by the Jupiter token cache.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    pub chain_id: u64,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

// GET /v1/indexed-route-map
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IndexedRouteMap {
    #[serde(default)]
    pub mint_keys: Vec<String>,
    // Source index (as a string key) to the indices of directly reachable mints
    #[serde(default)]
    pub indexed_route_map: HashMap<String, Vec<usize>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_info_deserialization() {
        let raw = r#"{
            "address": "So11111111111111111111111111111111111111112",
            "chainId": 101,
            "decimals": 9,
            "name": "Wrapped SOL",
            "symbol": "SOL",
            "logoURI": "https://example.com/sol.png",
            "tags": ["old-registry"],
            "extensions": {"coingeckoId": "wrapped-solana"}
        }"#;

        let token: TokenInfo = serde_json::from_str(raw).unwrap();

        assert_eq!(token.symbol, "SOL");
        assert_eq!(token.decimals, 9);
        assert_eq!(token.logo_uri.as_deref(), Some("https://example.com/sol.png"));
        assert_eq!(token.tags, vec!["old-registry".to_string()]);
        assert_eq!(token.extensions.unwrap()["coingeckoId"], "wrapped-solana");
    }

    #[test]
    fn test_token_info_optional_fields() {
        let raw = r#"{"address": "A", "chainId": 101, "decimals": 6, "name": "A", "symbol": "A"}"#;

        let token: TokenInfo = serde_json::from_str(raw).unwrap();

        assert_eq!(token.logo_uri, None);
        assert!(token.tags.is_empty());
        assert_eq!(token.extensions, None);
    }

    #[test]
    fn test_indexed_route_map_defaults_missing_fields() {
        let map: IndexedRouteMap = serde_json::from_str("{}").unwrap();

        assert!(map.mint_keys.is_empty());
        assert!(map.indexed_route_map.is_empty());

        let map: IndexedRouteMap =
            serde_json::from_str(r#"{"mintKeys": ["A", "B"], "indexedRouteMap": {"0": [1]}}"#)
                .unwrap();
        assert_eq!(map.mint_keys, vec!["A", "B"]);
        assert_eq!(map.indexed_route_map["0"], vec![1]);
    }
}
