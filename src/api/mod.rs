use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use time;

use crate::config::Config;
use crate::state::SharedState;

mod admin;
mod assets;
pub mod auth;
mod catalog;
mod error;
mod interactions;
mod observability;
mod suggestions;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use crate::services::{
    AdminService, AuthService, CatalogService, InteractionService, SuggestionService,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn catalog_service(&self) -> &Arc<dyn CatalogService> {
        &self.shared.catalog_service
    }

    #[must_use]
    pub fn admin_service(&self) -> &Arc<dyn AdminService> {
        &self.shared.admin_service
    }

    #[must_use]
    pub fn interaction_service(&self) -> &Arc<dyn InteractionService> {
        &self.shared.interaction_service
    }

    #[must_use]
    pub fn suggestion_service(&self) -> &Arc<dyn SuggestionService> {
        &self.shared.suggestion_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = state.config().server.clone();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            server.session_inactivity_minutes,
        )));

    let api_router = Router::new()
        .merge(create_public_router())
        .merge(create_user_router(state.clone()))
        .nest("/admin", create_admin_router(state.clone()))
        .layer(session_layer)
        .with_state(state.clone());

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/sitemap.xml", get(catalog::sitemap_xml))
        .with_state(state)
        .fallback(assets::serve_asset)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::logging_middleware))
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home", get(catalog::home))
        .route("/movies", get(catalog::movies))
        .route("/series", get(catalog::series))
        .route("/new", get(catalog::new_releases))
        .route("/category/{slug}", get(catalog::category))
        .route("/watch/{slug}", get(catalog::watch))
        .route("/search", get(catalog::search))
        .route("/navigation", get(catalog::navigation))
        .route("/media/{id}/rating", get(interactions::rating))
        .route("/suggestions", get(suggestions::list_open))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::get_current_user))
        .route("/system/health/live", get(system::health_live))
        .route("/system/health/ready", get(system::health_ready))
}

fn create_user_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(interactions::profile))
        .route("/media/{id}/favorite", post(interactions::toggle_favorite))
        .route("/media/{id}/watched", post(interactions::toggle_watched))
        .route("/media/{id}/rating", put(interactions::rate))
        .route("/suggestions", post(suggestions::submit))
        .route("/suggestions/{id}/vote", post(suggestions::toggle_vote))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}

fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/metrics", get(observability::get_metrics))
        .route("/media", get(admin::list_media).post(admin::create_media))
        .route(
            "/media/{id}",
            get(admin::get_media)
                .put(admin::update_media)
                .delete(admin::delete_media),
        )
        .route(
            "/media/{id}/seasons",
            get(admin::list_seasons).post(admin::create_season),
        )
        .route("/seasons/{id}", delete(admin::delete_season))
        .route("/seasons/{id}/episodes", post(admin::create_episode))
        .route("/episodes/{id}", delete(admin::delete_episode))
        .route(
            "/categories",
            get(admin::list_categories).post(admin::create_category),
        )
        .route(
            "/categories/{id}",
            put(admin::update_category).delete(admin::delete_category),
        )
        .route("/suggestions", get(suggestions::list_for_moderation))
        .route("/suggestions/{id}/status", put(suggestions::set_status))
        .route("/suggestions/{id}", delete(suggestions::delete))
        .route_layer(middleware::from_fn_with_state(state, auth::admin_middleware))
}
