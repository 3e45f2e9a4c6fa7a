use log::debug;
use thiserror::Error;

use provider::{use_jupiter_api_context, ContextError, JupiterApiContext, LoadStatus};

/// Human readable summary of the data published by the enclosing provider.
pub fn summarize(mint: Option<&str>) -> Result<Vec<String>, SummaryError> {
    let context = use_jupiter_api_context()?;
    if !context.loaded {
        return Err(SummaryError::NotLoaded(context.status));
    }

    let mut lines = vec![
        format!("Jupiter API: {}", context.api.base_path()),
        format!("Tokens: {}", context.token_map.len()),
        format!("Route sources: {}", context.route_map.len()),
    ];

    if let Some(mint) = mint {
        let destinations = context.routes_from(mint);
        debug!("{} direct routes from {}", destinations.len(), mint);

        lines.push(format!(
            "Direct routes from {} ({}):",
            label(&context, mint),
            destinations.len()
        ));
        lines.extend(
            destinations
                .iter()
                .map(|destination| format!("  -> {}", label(&context, destination))),
        );
    }

    Ok(lines)
}

// "SYMBOL (address)" when the token is known, the bare address otherwise
fn label(context: &JupiterApiContext, address: &str) -> String {
    match context.token_map.get(address) {
        Some(token) => format!("{} ({})", token.symbol, address),
        None => address.to_string(),
    }
}

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error(transparent)]
    MissingProvider(#[from] ContextError),

    #[error("Jupiter data is not loaded, status: {0}")]
    NotLoaded(LoadStatus),
}
