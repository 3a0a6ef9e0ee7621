//! Application settings and configuration management

use crate::error::Result;
use crate::registry::ServiceName;
use config::{Config, Environment};
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub services: ServiceUrls,
    #[serde(default)]
    pub proxy: ProxyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Base URLs of the backend microservices
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceUrls {
    #[serde(default = "default_usuarios_url")]
    pub usuarios: String,
    #[serde(default = "default_cursos_url")]
    pub cursos: String,
    #[serde(default = "default_matriculas_url")]
    pub matriculas: String,
    #[serde(default = "default_calificaciones_url")]
    pub calificaciones: String,
    #[serde(default = "default_asistencia_url")]
    pub asistencia: String,
}

fn default_usuarios_url() -> String {
    ServiceName::Usuarios.default_url().to_string()
}

fn default_cursos_url() -> String {
    ServiceName::Cursos.default_url().to_string()
}

fn default_matriculas_url() -> String {
    ServiceName::Matriculas.default_url().to_string()
}

fn default_calificaciones_url() -> String {
    ServiceName::Calificaciones.default_url().to_string()
}

fn default_asistencia_url() -> String {
    ServiceName::Asistencia.default_url().to_string()
}

impl ServiceUrls {
    pub fn get(&self, name: ServiceName) -> &str {
        match name {
            ServiceName::Usuarios => &self.usuarios,
            ServiceName::Cursos => &self.cursos,
            ServiceName::Matriculas => &self.matriculas,
            ServiceName::Calificaciones => &self.calificaciones,
            ServiceName::Asistencia => &self.asistencia,
        }
    }
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            usuarios: default_usuarios_url(),
            cursos: default_cursos_url(),
            matriculas: default_matriculas_url(),
            calificaciones: default_calificaciones_url(),
            asistencia: default_asistencia_url(),
        }
    }
}

/// Outbound call timeouts, in seconds
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

fn default_health_timeout() -> u64 {
    5
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            health_timeout_secs: default_health_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Each backend URL comes from its own variable (USUARIOS_SERVICE_URL,
    /// CURSOS_SERVICE_URL, ...) and falls back to the conventional internal
    /// address when absent; a missing variable never fails startup. The
    /// remaining settings accept GATEWAY-prefixed overrides
    /// (e.g. GATEWAY_SERVER__PORT).
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("proxy.timeout_secs", default_timeout() as i64)?
            .set_default("proxy.health_timeout_secs", default_health_timeout() as i64)?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        for service in ServiceName::ALL {
            let key = format!("services.{}", service.as_str());
            builder = builder.set_default(key.as_str(), service.default_url())?;

            if let Ok(url) = std::env::var(service.env_var()) {
                builder = builder.set_override(key.as_str(), url)?;
            }
        }

        let config = builder
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            services: ServiceUrls::default(),
            proxy: ProxyConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
