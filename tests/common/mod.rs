#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use movio::api::AppState;
use movio::config::Config;
use movio::state::SharedState;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub cookie: Option<String>,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn data(&self) -> Value {
        self.json()["data"].clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn spawn_app() -> TestApp {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();
    config.server.secure_cookies = false;
    config.observability.metrics_enabled = false;

    let shared = Arc::new(
        SharedState::new(config)
            .await
            .expect("Failed to create shared state"),
    );
    let state = movio::api::create_app_state(shared, None);
    let router = movio::api::router(state.clone());

    TestApp { router, state }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let cookie = headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let body = response
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            cookie,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, cookie, None).await
    }

    pub async fn post(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::POST, uri, cookie, Some(body)).await
    }

    pub async fn put(&self, uri: &str, cookie: Option<&str>, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, cookie, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, cookie, None).await
    }

    /// Signs up a fresh account and returns its session cookie.
    pub async fn signup(&self, email: &str) -> String {
        let response = self
            .post(
                "/api/auth/signup",
                None,
                json!({ "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.cookie.expect("signup should set a session cookie")
    }

    /// Signs up an account and grants it administrator access.
    pub async fn admin(&self, email: &str) -> String {
        let cookie = self.signup(email).await;
        assert!(self.state.store().set_admin(email, true).await.unwrap());
        cookie
    }

    pub async fn create_category(&self, admin: &str, name: &str) -> Value {
        let response = self
            .post("/api/admin/categories", Some(admin), json!({ "name": name }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.data()
    }

    pub async fn create_movie(&self, admin: &str, title: &str, slug: &str, status: &str) -> Value {
        let category = self.create_category(admin, &format!("{title} genre")).await;
        let response = self
            .post(
                "/api/admin/media",
                Some(admin),
                json!({
                    "title": title,
                    "slug": slug,
                    "type": "movie",
                    "embed_url": format!("https://player.example.com/{slug}"),
                    "duration": 135,
                    "rating": 7.5,
                    "status": status,
                    "categories": [category["id"]],
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.data()
    }
}
