use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use log::debug;
use serde_json::json;

use provider::{JupiterApiContext, JupiterApiProvider, LoadStatus};

pub struct ServiceController {
    provider: JupiterApiProvider,
}

impl ServiceController {
    pub fn new(provider: JupiterApiProvider) -> Self {
        Self { provider }
    }

    pub fn router(self) -> Router {
        let provider = self.provider;

        Router::new()
            .route(
                "/",
                get({
                    let provider = provider.clone();
                    move || async move { ServiceController::status(provider.clone()).await }
                }),
            )
            .route(
                "/api/health",
                get({
                    let provider = provider.clone();
                    move || async move { ServiceController::status(provider.clone()).await }
                }),
            )
            .route(
                "/api/tokens/:address",
                get({
                    let provider = provider.clone();
                    move |Path(address): Path<String>| async move {
                        ServiceController::get_token(provider.clone(), address).await
                    }
                }),
            )
            .route(
                "/api/routes/:mint",
                get({
                    let provider = provider.clone();
                    move |Path(mint): Path<String>| async move {
                        ServiceController::get_routes(provider.clone(), mint).await
                    }
                }),
            )
    }

    /// Health check endpoint, reports the load status of the provider
    pub async fn status(provider: JupiterApiProvider) -> impl IntoResponse {
        let context = provider.context();

        match &context.error {
            Some(err) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "loaded": false,
                    "load_status": context.status.to_string(),
                    "error": err.to_string(),
                })),
            ),
            None => (
                StatusCode::OK,
                Json(json!({
                    "message": "Service is running...",
                    "status": "ok",
                    "loaded": context.loaded,
                    "load_status": context.status.to_string(),
                })),
            ),
        }
    }

    /// Get token metadata by address
    pub async fn get_token(provider: JupiterApiProvider, address: String) -> impl IntoResponse {
        debug!("Token lookup for {}", address);

        let context = provider.context();
        if let Err(response) = ensure_loaded(&context) {
            return response;
        }

        match context.token_map.get(&address) {
            Some(token) => (StatusCode::OK, Json(json!(token))),
            None => (StatusCode::NOT_FOUND, Json(json!({ "error": "Token not found" }))),
        }
    }

    /// Get the mints reachable from `mint` in a single swap
    pub async fn get_routes(provider: JupiterApiProvider, mint: String) -> impl IntoResponse {
        debug!("Route lookup for {}", mint);

        let context = provider.context();
        if let Err(response) = ensure_loaded(&context) {
            return response;
        }

        match context.route_map.get(&mint) {
            Some(destinations) => {
                (StatusCode::OK, Json(json!({ "mint": mint, "destinations": destinations })))
            }
            None => (StatusCode::NOT_FOUND, Json(json!({ "error": "No routes for mint" }))),
        }
    }
}

fn ensure_loaded(
    context: &JupiterApiContext,
) -> Result<(), (StatusCode, Json<serde_json::Value>)> {
    match (&context.error, context.status) {
        (Some(err), _) => {
            Err((StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": err.to_string() }))))
        }
        (None, LoadStatus::Loaded) => Ok(()),
        (None, status) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "Token data is not loaded yet",
                "load_status": status.to_string(),
            })),
        )),
    }
}
