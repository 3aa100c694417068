mod common;

use axum::http::StatusCode;
use common::spawn_app;
use movio::entities::{episodes, media_categories, seasons};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;

#[tokio::test]
async fn test_duplicate_slug_is_a_conflict() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Dune", "dune", "published").await;

    let response = app
        .post(
            "/api/admin/media",
            Some(&admin),
            json!({
                "title": "Dune (2021)",
                "slug": "dune",
                "type": "movie",
                "embed_url": "https://player.example.com/dune-2021",
                "categories": movie["category_ids"],
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.json()["success"], false);
}

#[tokio::test]
async fn test_media_validation() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let category = app.create_category(&admin, "Action").await;

    // Movies need a player.
    let response = app
        .post(
            "/api/admin/media",
            Some(&admin),
            json!({
                "title": "No Player",
                "slug": "no-player",
                "type": "movie",
                "categories": [category["id"]],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post(
            "/api/admin/media",
            Some(&admin),
            json!({
                "title": "No Category",
                "slug": "no-category",
                "type": "movie",
                "embed_url": "https://player.example.com/x",
                "categories": [],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post(
            "/api/admin/media",
            Some(&admin),
            json!({
                "title": "Bad Slug",
                "slug": "Bad Slug!",
                "type": "movie",
                "embed_url": "https://player.example.com/x",
                "categories": [category["id"]],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .post(
            "/api/admin/media",
            Some(&admin),
            json!({
                "title": "Ghost Category",
                "slug": "ghost-category",
                "type": "movie",
                "embed_url": "https://player.example.com/x",
                "categories": ["00000000-0000-4000-8000-000000000000"],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_replaces_categories() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Dune", "dune", "draft").await;
    let id = movie["id"].as_str().unwrap().to_string();

    let scifi = app.create_category(&admin, "Science-Fiction").await;
    let epic = app.create_category(&admin, "Épopée").await;
    assert_eq!(epic["slug"], "epopee");

    let response = app
        .put(
            &format!("/api/admin/media/{id}"),
            Some(&admin),
            json!({
                "title": "Dune",
                "slug": "dune",
                "type": "movie",
                "embed_url": "https://player.example.com/dune",
                "status": "published",
                "categories": [scifi["id"], epic["id"], scifi["id"]],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.text());

    let response = app.get(&format!("/api/admin/media/{id}"), Some(&admin)).await;
    let detail = response.data();
    assert_eq!(detail["status"], "published");
    let mut ids: Vec<String> = detail["category_ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    ids.sort();
    let mut expected = vec![
        scifi["id"].as_str().unwrap().to_string(),
        epic["id"].as_str().unwrap().to_string(),
    ];
    expected.sort();
    assert_eq!(ids, expected);

    let response = app
        .get("/api/category/science-fiction", None)
        .await;
    assert_eq!(response.data()["total"], 1);
}

#[tokio::test]
async fn test_failed_update_keeps_previous_categories() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let dune = app.create_movie(&admin, "Dune", "dune", "published").await;
    app.create_movie(&admin, "Arrival", "arrival", "published").await;
    let drama = app.create_category(&admin, "Drame").await;
    let id = dune["id"].as_str().unwrap().to_string();

    let response = app
        .put(
            &format!("/api/admin/media/{id}"),
            Some(&admin),
            json!({
                "title": "Dune",
                "slug": "arrival",
                "type": "movie",
                "embed_url": "https://player.example.com/dune",
                "categories": [drama["id"]],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app.get(&format!("/api/admin/media/{id}"), Some(&admin)).await;
    let detail = response.data();
    assert_eq!(detail["slug"], "dune");
    assert_eq!(detail["category_ids"], dune["category_ids"]);
}

#[tokio::test]
async fn test_update_missing_media_is_not_found() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let category = app.create_category(&admin, "Action").await;

    let response = app
        .put(
            "/api/admin/media/00000000-0000-4000-8000-000000000000",
            Some(&admin),
            json!({
                "title": "Ghost",
                "slug": "ghost",
                "type": "movie",
                "embed_url": "https://player.example.com/ghost",
                "categories": [category["id"]],
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_crud() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;

    let created = app.create_category(&admin, "Action & Aventure").await;
    assert_eq!(created["slug"], "action-aventure");
    let id = created["id"].as_str().unwrap().to_string();

    let response = app
        .post("/api/admin/categories", Some(&admin), json!({ "name": "Action & Aventure" }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .put(
            &format!("/api/admin/categories/{id}"),
            Some(&admin),
            json!({ "name": "Aventure", "slug": "aventure" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Aventure");

    let response = app.delete(&format!("/api/admin/categories/{id}"), Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get("/api/admin/categories", Some(&admin)).await;
    assert_eq!(response.data().as_array().unwrap().len(), 0);

    let response = app.delete(&format!("/api/admin/categories/{id}"), Some(&admin)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_seasons_require_a_series() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let movie = app.create_movie(&admin, "Dune", "dune", "published").await;

    let response = app
        .post(
            &format!("/api/admin/media/{}/seasons", movie["id"].as_str().unwrap()),
            Some(&admin),
            json!({ "season_number": 1 }),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_season_and_episode_lifecycle() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let category = app.create_category(&admin, "Thriller").await;

    let response = app
        .post(
            "/api/admin/media",
            Some(&admin),
            json!({
                "title": "Dark",
                "slug": "dark",
                "type": "series",
                "categories": [category["id"]],
            }),
        )
        .await;
    let series_id = response.data()["id"].as_str().unwrap().to_string();
    let seasons_uri = format!("/api/admin/media/{series_id}/seasons");

    let response = app
        .post(&seasons_uri, Some(&admin), json!({ "season_number": 1 }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let season_id = response.data()["id"].as_str().unwrap().to_string();

    let response = app
        .post(&seasons_uri, Some(&admin), json!({ "season_number": 1 }))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .post(&seasons_uri, Some(&admin), json!({ "season_number": 0 }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let episodes_uri = format!("/api/admin/seasons/{season_id}/episodes");
    let response = app
        .post(
            &episodes_uri,
            Some(&admin),
            json!({
                "episode_number": 1,
                "title": "Secrets",
                "embed_url": "https://player.example.com/dark/1",
                "duration": 52,
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let episode_id = response.data()["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &episodes_uri,
            Some(&admin),
            json!({ "episode_number": 2, "title": "Lies" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.get(&seasons_uri, Some(&admin)).await;
    let seasons = response.data();
    assert_eq!(seasons[0]["episodes"].as_array().unwrap().len(), 1);

    let response = app.delete(&format!("/api/admin/episodes/{episode_id}"), Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.delete(&format!("/api/admin/seasons/{season_id}"), Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.get(&seasons_uri, Some(&admin)).await;
    assert_eq!(response.data().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    app.create_movie(&admin, "Dune", "dune", "published").await;
    app.create_movie(&admin, "Arrival", "arrival", "draft").await;

    let response = app.get("/api/admin/dashboard", Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);
    let dashboard = response.data();
    assert_eq!(dashboard["movies"], 2);
    assert_eq!(dashboard["series"], 0);
    assert_eq!(dashboard["categories"], 2);
    assert_eq!(dashboard["pending_suggestions"], 0);
    assert_eq!(dashboard["recent"].as_array().unwrap().len(), 2);

    let response = app.get("/api/admin/media?status=draft", Some(&admin)).await;
    assert_eq!(response.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_media_removes_its_seasons_episodes_and_links() {
    let app = spawn_app().await;
    let admin = app.admin("admin@example.com").await;
    let category = app.create_category(&admin, "Thriller").await;

    let response = app
        .post(
            "/api/admin/media",
            Some(&admin),
            json!({
                "title": "Dark",
                "slug": "dark",
                "type": "series",
                "categories": [category["id"]],
            }),
        )
        .await;
    let series_id = response.data()["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &format!("/api/admin/media/{series_id}/seasons"),
            Some(&admin),
            json!({ "season_number": 1 }),
        )
        .await;
    let season_id = response.data()["id"].as_str().unwrap().to_string();

    let response = app
        .post(
            &format!("/api/admin/seasons/{season_id}/episodes"),
            Some(&admin),
            json!({
                "episode_number": 1,
                "title": "Secrets",
                "embed_url": "https://player.example.com/dark/1",
            }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.delete(&format!("/api/admin/media/{series_id}"), Some(&admin)).await;
    assert_eq!(response.status, StatusCode::OK);

    let conn = &app.state.store().conn;
    assert_eq!(seasons::Entity::find().count(conn).await.unwrap(), 0);
    assert_eq!(episodes::Entity::find().count(conn).await.unwrap(), 0);
    assert_eq!(media_categories::Entity::find().count(conn).await.unwrap(), 0);

    let response = app.get(&format!("/api/admin/media/{series_id}"), Some(&admin)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
