mod common;

use axum::http::StatusCode;
use common::{PASSWORD, spawn_app};
use serde_json::json;

#[tokio::test]
async fn test_signup_signs_the_user_in() {
    let app = spawn_app().await;

    let cookie = app.signup("Jane.Doe@Example.com").await;

    let response = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
    let me = response.data();
    assert_eq!(me["username"], "jane.doe");
    assert_eq!(me["is_admin"], false);
}

#[tokio::test]
async fn test_duplicate_email_is_a_conflict() {
    let app = spawn_app().await;
    app.signup("ana@example.com").await;

    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "email": "ANA@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["success"], false);
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .post(
            "/api/auth/signup",
            None,
            json!({ "email": "short@example.com", "password": "abc" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_and_logout() {
    let app = spawn_app().await;
    app.signup("leo@example.com").await;

    let response = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "leo@example.com", "password": "wrong-password" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.json()["error"], "Invalid email or password");

    let response = app
        .post(
            "/api/auth/login",
            None,
            json!({
                "email": "leo@example.com",
                "password": PASSWORD,
                "redirect": "//evil.example.com",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["redirect"], "/");
    let cookie = response.cookie.expect("login should set a session cookie");

    let response = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.post("/api/auth/logout", Some(&cookie), json!({})).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/api/auth/me", Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_keeps_local_redirect() {
    let app = spawn_app().await;
    app.signup("mia@example.com").await;

    let response = app
        .post(
            "/api/auth/login",
            None,
            json!({
                "email": "mia@example.com",
                "password": PASSWORD,
                "redirect": "/watch/dune",
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["redirect"], "/watch/dune");
}

#[tokio::test]
async fn test_guards() {
    let app = spawn_app().await;

    let response = app.get("/api/profile", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.get("/api/admin/dashboard", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let user = app.signup("viewer@example.com").await;
    let response = app.get("/api/admin/dashboard", Some(&user)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let admin = app.admin("boss@example.com").await;
    let response = app.get("/api/admin/dashboard", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["users"], 2);
}

#[tokio::test]
async fn test_demote_takes_effect_on_next_request() {
    let app = spawn_app().await;
    let admin = app.admin("temp@example.com").await;

    let response = app.get("/api/admin/dashboard", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    assert!(
        app.state
            .store()
            .set_admin("temp@example.com", false)
            .await
            .unwrap()
    );

    let response = app.get("/api/admin/dashboard", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
