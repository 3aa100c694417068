mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn test_submit_requires_login() {
    let app = spawn_app().await;

    let response = app
        .post(
            "/api/suggestions",
            None,
            json!({ "title": "Arrival", "type": "movie" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_vote_toggle() {
    let app = spawn_app().await;
    let author = app.signup("author@example.com").await;
    let voter = app.signup("voter@example.com").await;

    let response = app
        .post(
            "/api/suggestions",
            Some(&author),
            json!({ "title": "Arrival", "type": "movie", "year": "2016" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());
    let suggestion = response.data();
    assert_eq!(suggestion["status"], "pending");
    assert_eq!(suggestion["votes"], 0);
    assert_eq!(suggestion["year"], 2016);
    let vote_uri = format!("/api/suggestions/{}/vote", suggestion["id"].as_str().unwrap());

    let response = app.post(&vote_uri, None, json!({})).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.post(&vote_uri, Some(&voter), json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["voted"], true);
    assert_eq!(response.data()["votes"], 1);

    let response = app.get("/api/suggestions", Some(&voter)).await;
    let board = response.data();
    assert_eq!(board[0]["has_voted"], true);
    assert_eq!(board[0]["votes"], 1);

    let response = app.get("/api/suggestions", None).await;
    assert_eq!(response.data()[0]["has_voted"], false);

    let response = app.post(&vote_uri, Some(&voter), json!({})).await;
    assert_eq!(response.data()["voted"], false);
    assert_eq!(response.data()["votes"], 0);

    let response = app.get("/api/suggestions", Some(&voter)).await;
    assert_eq!(response.data()[0]["votes"], 0);
    assert_eq!(response.data()[0]["has_voted"], false);
}

#[tokio::test]
async fn test_board_filters_by_type_and_sorts_by_votes() {
    let app = spawn_app().await;
    let user = app.signup("user@example.com").await;

    let mut ids = Vec::new();
    for (title, kind) in [("Arrival", "movie"), ("Severance", "series"), ("Sicario", "movie")] {
        let response = app
            .post(
                "/api/suggestions",
                Some(&user),
                json!({ "title": title, "type": kind }),
            )
            .await;
        ids.push(response.data()["id"].as_str().unwrap().to_string());
    }

    let response = app
        .post(&format!("/api/suggestions/{}/vote", ids[2]), Some(&user), json!({}))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/api/suggestions?type=movie", None).await;
    let titles: Vec<String> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Sicario", "Arrival"]);
}

#[tokio::test]
async fn test_suggestion_validation() {
    let app = spawn_app().await;
    let user = app.signup("user@example.com").await;

    let response = app
        .post(
            "/api/suggestions",
            Some(&user),
            json!({ "title": "   ", "type": "movie" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post(
            "/api/suggestions",
            Some(&user),
            json!({ "title": "Metropolis", "type": "movie", "year": 1850 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post(
            "/api/suggestions",
            Some(&user),
            json!({ "title": "Metropolis", "type": "movie", "imdb_link": "not a url" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_moderation_transitions() {
    let app = spawn_app().await;
    let user = app.signup("user@example.com").await;
    let admin = app.admin("admin@example.com").await;

    let response = app
        .post(
            "/api/suggestions",
            Some(&user),
            json!({ "title": "Arrival", "type": "movie" }),
        )
        .await;
    let id = response.data()["id"].as_str().unwrap().to_string();
    let status_uri = format!("/api/admin/suggestions/{id}/status");

    let response = app
        .put(&status_uri, Some(&user), json!({ "status": "approved" }))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Pending can't jump straight to added.
    let response = app
        .put(&status_uri, Some(&admin), json!({ "status": "added" }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .put(&status_uri, Some(&admin), json!({ "status": "approved" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "approved");

    // Approved suggestions leave the public board and stop taking votes.
    let response = app.get("/api/suggestions", None).await;
    assert_eq!(response.data().as_array().unwrap().len(), 0);

    let response = app
        .post(&format!("/api/suggestions/{id}/vote"), Some(&user), json!({}))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .put(&status_uri, Some(&admin), json!({ "status": "added" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .get("/api/admin/suggestions?status=added", Some(&admin))
        .await;
    let list = response.data();
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
    assert_eq!(list["counts"]["added"], 1);
    assert_eq!(list["counts"]["pending"], 0);

    let response = app
        .put(&status_uri, Some(&admin), json!({ "status": "pending" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .delete(&format!("/api/admin/suggestions/{id}"), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .delete(&format!("/api/admin/suggestions/{id}"), Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
