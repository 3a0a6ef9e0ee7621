//! Static route table and request dispatch

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    routing::{on, MethodFilter},
    Json, Router,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::registry::ServiceName;
use crate::AppState;

/// One proxied resource: the `/api/<resource>` prefix it owns and the
/// backend service it targets.
#[derive(Debug, Clone, Copy)]
pub struct RouteRule {
    pub resource: &'static str,
    pub service: ServiceName,
}

/// The full route table. Static, evaluated once when the router is built.
/// `estudiantes` and `profesores` both live in the usuarios service but
/// keep disjoint forwarded sub-paths.
pub const ROUTES: &[RouteRule] = &[
    RouteRule {
        resource: "estudiantes",
        service: ServiceName::Usuarios,
    },
    RouteRule {
        resource: "profesores",
        service: ServiceName::Usuarios,
    },
    RouteRule {
        resource: "cursos",
        service: ServiceName::Cursos,
    },
    RouteRule {
        resource: "matriculas",
        service: ServiceName::Matriculas,
    },
    RouteRule {
        resource: "calificaciones",
        service: ServiceName::Calificaciones,
    },
    RouteRule {
        resource: "asistencias",
        service: ServiceName::Asistencia,
    },
];

/// Build the proxy sub-router from the route table.
///
/// Each resource gets an exact collection route (GET|POST) and a wildcard
/// item route (GET|PUT|PATCH|DELETE). A registered path hit with a method
/// outside its set is answered 405 by the method filter, before any
/// outbound call is made. Paths for unregistered resources fall through to
/// the default 404.
pub fn api_router() -> Router<Arc<AppState>> {
    let collection_methods = MethodFilter::GET.or(MethodFilter::POST);
    let item_methods = MethodFilter::GET
        .or(MethodFilter::PUT)
        .or(MethodFilter::PATCH)
        .or(MethodFilter::DELETE);

    let mut router = Router::new();

    for rule in ROUTES {
        let collection_rule = *rule;
        let item_rule = *rule;

        router = router
            .route(
                &format!("/api/{}", rule.resource),
                on(
                    collection_methods,
                    move |state: State<Arc<AppState>>, req: Request| async move {
                        dispatch(state, collection_rule, None, req).await
                    },
                ),
            )
            .route(
                &format!("/api/{}/*rest", rule.resource),
                on(
                    item_methods,
                    move |state: State<Arc<AppState>>,
                          Path(rest): Path<String>,
                          req: Request| async move {
                        dispatch(state, item_rule, Some(rest), req).await
                    },
                ),
            );
    }

    router
}

/// Resolve the forwarded sub-path for a matched rule and hand the request
/// to the forwarder.
async fn dispatch(
    State(state): State<Arc<AppState>>,
    rule: RouteRule,
    rest: Option<String>,
    req: Request,
) -> Result<(StatusCode, Json<Value>)> {
    let subpath = match rest {
        Some(rest) => format!("/{}/{}", rule.resource, rest),
        None => format!("/{}", rule.resource),
    };

    debug!(
        resource = rule.resource,
        service = %rule.service,
        subpath = %subpath,
        "Dispatching to backend"
    );

    let base_url = state.registry.base_url(rule.service);
    state.forwarder.forward(base_url, &subpath, req).await
}
