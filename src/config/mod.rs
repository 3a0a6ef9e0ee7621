//! Configuration module

pub mod settings;

pub use settings::{LoggingConfig, ProxyConfig, ServerConfig, ServiceUrls, Settings};
