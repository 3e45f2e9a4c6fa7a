use std::collections::HashMap;

use jupiter_client::{IndexedRouteMap, TokenInfo};

use crate::LoadError;

/// Token address to token metadata.
pub type TokenMap = HashMap<String, TokenInfo>;

/// Source mint to the mints reachable from it in a single swap.
pub type RouteMap = HashMap<String, Vec<String>>;

/// Keys the token list by address. Later records win over earlier ones with the same address.
pub fn build_token_map(tokens: Vec<TokenInfo>) -> TokenMap {
    tokens.into_iter().map(|token| (token.address.clone(), token)).collect()
}

/// Resolves every index of the compact route map through `mint_keys`.
///
/// Keys must be canonical decimal indices, so `"00"` or `"+0"` cannot alias `"0"`.
pub fn resolve_route_map(indexed: IndexedRouteMap) -> Result<RouteMap, LoadError> {
    let IndexedRouteMap { mint_keys, indexed_route_map } = indexed;

    let mint_at = |index: usize| {
        mint_keys
            .get(index)
            .cloned()
            .ok_or(LoadError::IndexOutOfRange { index, len: mint_keys.len() })
    };

    indexed_route_map
        .into_iter()
        .map(|(key, destinations)| {
            let index = match key.parse::<usize>() {
                Ok(index) if index.to_string() == key => index,
                _ => return Err(LoadError::InvalidRouteKey(key)),
            };

            let destinations = destinations
                .into_iter()
                .map(|destination| mint_at(destination))
                .collect::<Result<Vec<_>, _>>()?;

            Ok::<_, LoadError>((mint_at(index)?, destinations))
        })
        .collect()
}
