//! On-demand health aggregation across the backend fleet

use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

use crate::registry::{ServiceName, ServiceRegistry};

/// Binary health classification. Every failure mode collapses to DOWN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceStatus {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

/// Fresh per-call status of every registered backend.
pub type HealthReport = BTreeMap<ServiceName, ServiceStatus>;

/// Probes every backend's `/health` endpoint with a short per-call timeout.
#[derive(Debug, Clone)]
pub struct HealthAggregator {
    client: Client,
    timeout: Duration,
}

impl HealthAggregator {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Check all services concurrently and return once every probe has
    /// resolved. A service is UP only when its health endpoint answers 200
    /// within the timeout; nothing here is cached between calls, and no
    /// probe failure escapes as an error.
    pub async fn check_all(&self, registry: &ServiceRegistry) -> HealthReport {
        let checks = registry.iter().map(|(name, base_url)| async move {
            let status = self.check_one(name, base_url).await;
            (name, status)
        });

        join_all(checks).await.into_iter().collect()
    }

    async fn check_one(&self, name: ServiceName, base_url: &str) -> ServiceStatus {
        let url = format!("{}/health", base_url);

        match self.client.get(&url).timeout(self.timeout).send().await {
            Ok(response) if response.status() == reqwest::StatusCode::OK => {
                debug!(service = %name, "Health check passed");
                ServiceStatus::Up
            }
            Ok(response) => {
                debug!(service = %name, status = %response.status(), "Health check failed");
                ServiceStatus::Down
            }
            Err(e) if e.is_timeout() => {
                debug!(service = %name, "Health check timed out");
                ServiceStatus::Down
            }
            Err(e) if e.is_connect() => {
                debug!(service = %name, "Health check could not connect");
                ServiceStatus::Down
            }
            Err(e) => {
                debug!(service = %name, error = %e, "Health check failed");
                ServiceStatus::Down
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&ServiceStatus::Up).unwrap(), "\"UP\"");
        assert_eq!(
            serde_json::to_string(&ServiceStatus::Down).unwrap(),
            "\"DOWN\""
        );
    }

    #[test]
    fn test_report_serializes_by_service_name() {
        let mut report = HealthReport::new();
        report.insert(ServiceName::Usuarios, ServiceStatus::Up);
        report.insert(ServiceName::Cursos, ServiceStatus::Down);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["usuarios"], "UP");
        assert_eq!(json["cursos"], "DOWN");
    }
}
