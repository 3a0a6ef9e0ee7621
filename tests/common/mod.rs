//! Shared helpers for driving the gateway router in tests

use axum::{body::Body, http::Request, response::Response, Router};
use escolastico_gateway::{
    api,
    config::{ProxyConfig, ServiceUrls, Settings},
    AppState,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Build the real application router against the given backend URLs.
pub fn gateway_app(services: ServiceUrls, timeout_secs: u64, health_timeout_secs: u64) -> Router {
    let settings = Settings {
        services,
        proxy: ProxyConfig {
            timeout_secs,
            health_timeout_secs,
        },
        ..Settings::default()
    };

    let client = reqwest::Client::new();
    api::routes::create_router(Arc::new(AppState::new(settings, client)))
}

/// Point every service at the same base URL.
pub fn all_services_at(base_url: &str) -> ServiceUrls {
    ServiceUrls {
        usuarios: base_url.to_string(),
        cursos: base_url.to_string(),
        matriculas: base_url.to_string(),
        calificaciones: base_url.to_string(),
        asistencia: base_url.to_string(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
