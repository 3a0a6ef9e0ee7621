//! Handlers for the gateway's own endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::gateway::health::HealthReport;
use crate::AppState;

/// Gateway self-description with a link to each backend's API docs.
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    let services: BTreeMap<_, _> = state
        .registry
        .iter()
        .map(|(name, base_url)| (name, format!("{}/api-docs", base_url)))
        .collect();

    Json(json!({
        "message": "Escolastico API Gateway - Microservicios",
        "version": env!("CARGO_PKG_VERSION"),
        "services": services,
    }))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub services_status: HealthReport,
}

/// Gateway health: the gateway itself is always UP; each backend is probed
/// fresh on every call.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let services_status = state.health.check_all(&state.registry).await;

    Json(HealthResponse {
        status: "UP",
        service: "api-gateway",
        services_status,
    })
}
