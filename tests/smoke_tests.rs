mod common;

use axum::http::{StatusCode, header};
use common::{TestResponse, spawn_app};

fn content_type(response: &TestResponse) -> mime::Mime {
    response.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .parse()
        .unwrap()
}

#[tokio::test]
async fn test_health_probes() {
    let app = spawn_app().await;

    let response = app.get("/api/system/health/live", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "alive");

    let response = app.get("/api/system/health/ready", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["database"], true);
}

#[tokio::test]
async fn test_sitemap_lists_static_routes_and_published_media() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    app.create_movie(&admin, "Dune", "dune", "published").await;
    app.create_movie(&admin, "Secret Cut", "secret-cut", "draft").await;

    let response = app.get("/sitemap.xml", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let content_type = content_type(&response);
    assert_eq!(content_type.type_(), mime::APPLICATION);
    assert_eq!(content_type.subtype(), mime::XML);

    let xml = response.text();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<urlset"));
    assert!(xml.contains("/movies</loc>"));
    assert!(xml.contains("/watch/dune</loc>"));
    assert!(!xml.contains("secret-cut"));
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = spawn_app().await;

    let response = app.get("/api/system/health/live", None).await;
    assert_eq!(response.headers["x-content-type-options"], "nosniff");
    assert_eq!(response.headers["x-frame-options"], "DENY");
    let csp = response.headers["content-security-policy"].to_str().unwrap();
    assert!(csp.contains("frame-src https:"));
    assert!(response.headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_metrics_are_admin_only() {
    let app = spawn_app().await;

    let response = app.get("/api/admin/metrics", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let admin = app.admin("admin@example.com").await;
    let response = app.get("/api/admin/metrics", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let app = spawn_app().await;

    let response = app.get("/api/does-not-exist", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["success"], false);
}

#[tokio::test]
async fn test_client_routes_fall_back_to_index() {
    let app = spawn_app().await;

    let response = app.get("/watch/anything", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(content_type(&response).essence_str(), mime::TEXT_HTML.essence_str());
    assert!(response.text().contains("<div id=\"root\">"));
}
