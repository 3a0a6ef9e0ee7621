//! Service name enumeration and the immutable service registry

use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::ServiceUrls;

/// Logical name of a backend microservice. The set is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    Usuarios,
    Cursos,
    Matriculas,
    Calificaciones,
    Asistencia,
}

impl ServiceName {
    /// Every registered backend, in registry order.
    pub const ALL: [ServiceName; 5] = [
        ServiceName::Usuarios,
        ServiceName::Cursos,
        ServiceName::Matriculas,
        ServiceName::Calificaciones,
        ServiceName::Asistencia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceName::Usuarios => "usuarios",
            ServiceName::Cursos => "cursos",
            ServiceName::Matriculas => "matriculas",
            ServiceName::Calificaciones => "calificaciones",
            ServiceName::Asistencia => "asistencia",
        }
    }

    /// Environment variable holding this service's base URL.
    pub fn env_var(&self) -> &'static str {
        match self {
            ServiceName::Usuarios => "USUARIOS_SERVICE_URL",
            ServiceName::Cursos => "CURSOS_SERVICE_URL",
            ServiceName::Matriculas => "MATRICULAS_SERVICE_URL",
            ServiceName::Calificaciones => "CALIFICACIONES_SERVICE_URL",
            ServiceName::Asistencia => "ASISTENCIA_SERVICE_URL",
        }
    }

    /// Conventional internal address used when the variable is absent.
    pub fn default_url(&self) -> &'static str {
        match self {
            ServiceName::Usuarios => "http://usuarios-service:5001",
            ServiceName::Cursos => "http://cursos-service:5002",
            ServiceName::Matriculas => "http://matriculas-service:5003",
            ServiceName::Calificaciones => "http://calificaciones-service:5004",
            ServiceName::Asistencia => "http://asistencia-service:5005",
        }
    }
}

impl std::fmt::Display for ServiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable name -> base URL table, built once at startup and never
/// modified afterwards, so handlers read it without locking.
#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    base_urls: BTreeMap<ServiceName, String>,
}

impl ServiceRegistry {
    pub fn from_urls(urls: &ServiceUrls) -> Self {
        let base_urls = ServiceName::ALL
            .into_iter()
            .map(|name| {
                let url = urls.get(name).trim_end_matches('/').to_string();
                (name, url)
            })
            .collect();

        Self { base_urls }
    }

    /// Base URL for a service. Every `ServiceName` has exactly one entry.
    pub fn base_url(&self, name: ServiceName) -> &str {
        &self.base_urls[&name]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ServiceName, &str)> {
        self.base_urls
            .iter()
            .map(|(name, url)| (*name, url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.base_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base_urls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_service() {
        let registry = ServiceRegistry::from_urls(&ServiceUrls::default());
        assert_eq!(registry.len(), ServiceName::ALL.len());

        for name in ServiceName::ALL {
            assert_eq!(registry.base_url(name), name.default_url());
        }
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let mut urls = ServiceUrls::default();
        urls.cursos = "http://localhost:5002/".to_string();

        let registry = ServiceRegistry::from_urls(&urls);
        assert_eq!(registry.base_url(ServiceName::Cursos), "http://localhost:5002");
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&ServiceName::Asistencia).unwrap(),
            "\"asistencia\""
        );
        assert_eq!(ServiceName::Usuarios.to_string(), "usuarios");
    }
}
