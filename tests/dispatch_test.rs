//! Routing tests: prefix dispatch, sub-path forwarding, and 405 handling

mod common;

use axum::{body::Body, http::Request};
use common::{all_services_at, gateway_app, json_body, send};
use serde_json::json;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn collection_route_forwards_to_resource_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cursos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let app = gateway_app(all_services_at(&server.uri()), 30, 5);
    let response = send(
        &app,
        Request::builder()
            .uri("/api/cursos")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), 200);
    assert_eq!(json_body(response).await, json!([{"id": 1}]));
}

#[tokio::test]
async fn item_route_forwards_full_remainder() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/estudiantes/5/notas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"notas": []})))
        .expect(1)
        .mount(&server)
        .await;

    let app = gateway_app(all_services_at(&server.uri()), 30, 5);
    let response = send(
        &app,
        Request::builder()
            .uri("/api/estudiantes/5/notas")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn estudiantes_and_profesores_share_a_backend_with_disjoint_subpaths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/estudiantes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tipo": "estudiante"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/profesores/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tipo": "profesor"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = gateway_app(all_services_at(&server.uri()), 30, 5);

    let estudiantes = send(
        &app,
        Request::builder()
            .uri("/api/estudiantes")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(json_body(estudiantes).await["tipo"], "estudiante");

    let profesores = send(
        &app,
        Request::builder()
            .uri("/api/profesores/1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(json_body(profesores).await["tipo"], "profesor");
}

#[tokio::test]
async fn disallowed_method_returns_405_without_outbound_call() {
    let server = MockServer::start().await;

    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let app = gateway_app(all_services_at(&server.uri()), 30, 5);

    // DELETE is an item-level method, not allowed on the collection route.
    let response = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/estudiantes")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), 405);

    // POST is a collection-level method, not allowed on item routes.
    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/estudiantes/5")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn unregistered_resource_is_not_routed() {
    let server = MockServer::start().await;

    Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let app = gateway_app(all_services_at(&server.uri()), 30, 5);
    let response = send(
        &app,
        Request::builder()
            .uri("/api/docentes")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), 404);
}
