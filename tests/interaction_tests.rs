mod common;

use axum::http::StatusCode;
use common::spawn_app;
use serde_json::json;

#[tokio::test]
async fn test_favorite_toggle() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Dune", "dune", "published").await;
    let uri = format!("/api/media/{}/favorite", movie["id"].as_str().unwrap());

    let user = app.signup("fan@example.com").await;

    let response = app.post(&uri, Some(&user), json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["is_favorite"], true);

    let response = app.get("/api/profile", Some(&user)).await;
    assert_eq!(response.data()["favorites"].as_array().unwrap().len(), 1);

    let response = app.get("/api/watch/dune", Some(&user)).await;
    assert_eq!(response.data()["viewer"]["is_favorite"], true);

    let response = app.post(&uri, Some(&user), json!({})).await;
    assert_eq!(response.data()["is_favorite"], false);

    let response = app.get("/api/profile", Some(&user)).await;
    assert_eq!(response.data()["favorites"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_anonymous_interactions_are_rejected() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Dune", "dune", "published").await;
    let id = movie["id"].as_str().unwrap();

    let response = app
        .post(&format!("/api/media/{id}/favorite"), None, json!({}))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .put(&format!("/api/media/{id}/rating"), None, json!({ "rating": 8 }))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ratings_are_averaged() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Dune", "dune", "published").await;
    let uri = format!("/api/media/{}/rating", movie["id"].as_str().unwrap());

    // Editorial rating stands in until someone votes.
    let response = app.get(&uri, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let summary = response.data();
    assert_eq!(summary["count"], 0);
    assert!(summary["average"].is_null());
    assert_eq!(summary["display_rating"], 7.5);

    let ana = app.signup("ana@example.com").await;
    let leo = app.signup("leo@example.com").await;

    let response = app.put(&uri, Some(&ana), json!({ "rating": 6 })).await;
    assert_eq!(response.status, StatusCode::OK);

    // A second rating from the same user replaces the first.
    let response = app.put(&uri, Some(&ana), json!({ "rating": "8" })).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["user_rating"], 8);

    let response = app.put(&uri, Some(&leo), json!({ "rating": 9 })).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get(&uri, None).await;
    let summary = response.data();
    assert_eq!(summary["count"], 2);
    assert_eq!(summary["average"], 8.5);
    assert_eq!(summary["display_rating"], 8.5);

    let response = app.get("/api/watch/dune", Some(&leo)).await;
    assert_eq!(response.data()["viewer"]["user_rating"], 9);
}

#[tokio::test]
async fn test_rating_out_of_range_is_rejected() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Dune", "dune", "published").await;
    let uri = format!("/api/media/{}/rating", movie["id"].as_str().unwrap());
    let user = app.signup("fan@example.com").await;

    for rating in [json!(0), json!(11), json!("great")] {
        let response = app.put(&uri, Some(&user), json!({ "rating": rating })).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "rating {rating}");
    }

    let response = app.get(&uri, None).await;
    assert_eq!(response.data()["count"], 0);
}

#[tokio::test]
async fn test_draft_media_cannot_be_interacted_with() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Hidden", "hidden", "draft").await;
    let id = movie["id"].as_str().unwrap();
    let user = app.signup("fan@example.com").await;

    let response = app
        .post(&format!("/api/media/{id}/favorite"), Some(&user), json!({}))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.get(&format!("/api/media/{id}/rating"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_watched_toggle_feeds_history() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Dune", "dune", "published").await;
    let uri = format!("/api/media/{}/watched", movie["id"].as_str().unwrap());
    let user = app.signup("fan@example.com").await;

    let response = app.post(&uri, Some(&user), json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["is_watched"], true);

    let response = app.get("/api/profile", Some(&user)).await;
    let profile = response.data();
    assert_eq!(profile["history"].as_array().unwrap().len(), 1);
    assert_eq!(profile["profile"]["username"], "fan");

    let response = app.post(&uri, Some(&user), json!({})).await;
    assert_eq!(response.data()["is_watched"], false);
}
