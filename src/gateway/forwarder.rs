//! Outbound request forwarding to backend services

use axum::{
    extract::Request,
    http::{header, HeaderName, Method, StatusCode},
    Json,
};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{GatewayError, Result};

/// Reissues an inbound request against a backend base URL and relays the
/// upstream response. Holds a clone of the process-wide connection-pooling
/// client; the per-call timeout is a hard ceiling, there is no retry.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    timeout: Duration,
}

impl Forwarder {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Forward one request to `base_url` + `subpath` and translate the
    /// outcome into a gateway response.
    ///
    /// The upstream status code is passed through verbatim; upstream 4xx/5xx
    /// are not gateway failures. Transport failures map to 504 (timeout),
    /// 503 (connection refused), or 500 (anything else, including a
    /// non-JSON upstream body).
    pub async fn forward(
        &self,
        base_url: &str,
        subpath: &str,
        req: Request,
    ) -> Result<(StatusCode, Json<Value>)> {
        let (parts, body) = req.into_parts();

        let method = match parts.method.as_str() {
            "GET" => reqwest::Method::GET,
            "POST" => reqwest::Method::POST,
            "PUT" => reqwest::Method::PUT,
            "PATCH" => reqwest::Method::PATCH,
            "DELETE" => reqwest::Method::DELETE,
            _ => return Err(GatewayError::MethodNotAllowed),
        };

        // Query string is relayed verbatim, duplicates and ordering intact.
        let mut url = format!("{}{}", base_url, subpath);
        if let Some(query) = parts.uri.query() {
            url.push('?');
            url.push_str(query);
        }

        debug!(method = %parts.method, url = %url, "Forwarding request");

        let mut outbound = self.client.request(method, &url).timeout(self.timeout);

        for (name, value) in &parts.headers {
            if forwards_header(name) {
                outbound = outbound.header(name.as_str(), value.as_bytes());
            }
        }

        if carries_body(&parts.method) {
            if let Some(json) = read_json_body(&parts.headers, body).await? {
                outbound = outbound.json(&json);
            }
        }

        let response = outbound.send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Outbound call failed");
            GatewayError::from(e)
        })?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| GatewayError::Upstream(e.to_string()))?;
        let body: Value = response.json().await?;

        Ok((status, Json(body)))
    }
}

/// `host` must never reach the backend (it names the gateway, not the
/// upstream virtual host); `content-length` is recomputed for the
/// re-encoded body.
fn forwards_header(name: &HeaderName) -> bool {
    *name != header::HOST && *name != header::CONTENT_LENGTH
}

fn carries_body(method: &Method) -> bool {
    *method == Method::POST || *method == Method::PUT || *method == Method::PATCH
}

/// Decode the inbound body as JSON, but only when the content-type is
/// exactly `application/json`; any other content-type means no body is
/// forwarded. An unparseable JSON body is a gateway-side failure (500).
async fn read_json_body(
    headers: &axum::http::HeaderMap,
    body: axum::body::Body,
) -> Result<Option<Value>> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "application/json")
        .unwrap_or(false);

    if !is_json {
        return Ok(None);
    }

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| GatewayError::Upstream(e.to_string()))?;

    if bytes.is_empty() {
        return Ok(None);
    }

    let json = serde_json::from_slice(&bytes).map_err(|e| GatewayError::Upstream(e.to_string()))?;
    Ok(Some(json))
}
