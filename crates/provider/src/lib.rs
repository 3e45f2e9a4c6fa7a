pub use context::{JupiterApiContext, LoadStatus};
pub use errors::{ContextError, LoadError};
pub use maps::{build_token_map, resolve_route_map, RouteMap, TokenMap};
pub use provider::JupiterApiProvider;
pub use scope::{use_jupiter_api_context, use_jupiter_api_provider};

mod context;
mod errors;
pub mod maps;
mod provider;
mod scope;
