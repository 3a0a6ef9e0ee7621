//! Router assembly for the gateway's HTTP surface

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::api::handlers;
use crate::gateway::dispatch;
use crate::AppState;

/// Build the complete application router: the gateway's own endpoints plus
/// the proxied `/api/*` routes, behind permissive CORS and request tracing.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .merge(dispatch::api_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
