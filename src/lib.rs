//! Escolastico API Gateway
//!
//! A reverse-proxy gateway fronting the school-management microservices:
//! path-prefix dispatch, method-preserving forwarding, and on-demand health
//! aggregation over a fixed service registry.

pub mod api;
pub mod config;
pub mod error;
pub mod gateway;
pub mod registry;

pub use error::{GatewayError, Result};

use std::time::Duration;

use config::Settings;
use gateway::{forwarder::Forwarder, health::HealthAggregator};
use registry::ServiceRegistry;

/// Application state shared across all handlers. Everything in here is
/// immutable after construction, so it is shared without locking.
pub struct AppState {
    pub settings: Settings,
    pub registry: ServiceRegistry,
    pub forwarder: Forwarder,
    pub health: HealthAggregator,
}

impl AppState {
    /// Wire the components around one shared connection-pooling client.
    pub fn new(settings: Settings, client: reqwest::Client) -> Self {
        let registry = ServiceRegistry::from_urls(&settings.services);
        let forwarder = Forwarder::new(
            client.clone(),
            Duration::from_secs(settings.proxy.timeout_secs),
        );
        let health = HealthAggregator::new(
            client,
            Duration::from_secs(settings.proxy.health_timeout_secs),
        );

        Self {
            settings,
            registry,
            forwarder,
            health,
        }
    }
}
