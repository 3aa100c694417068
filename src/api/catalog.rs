//! Public catalog pages. Each handler returns the view model of one site
//! route.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::session_user_id;
use super::validation::validate_search_query;
use super::{ApiError, ApiResponse, AppState, SearchQuery};
use crate::services::CatalogError;
use crate::services::catalog_service::{
    CategoryPage, HomePage, KindPage, Navigation, NewReleases, SearchResults, WatchPage,
};
use crate::services::sitemap;

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
            CatalogError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

/// `GET /api/home`
pub async fn home(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HomePage>>, ApiError> {
    let page = state.catalog_service().home().await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `GET /api/movies`
pub async fn movies(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<KindPage>>, ApiError> {
    let page = state.catalog_service().movies().await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `GET /api/series`
pub async fn series(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<KindPage>>, ApiError> {
    let page = state.catalog_service().series().await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `GET /api/new`
pub async fn new_releases(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<NewReleases>>, ApiError> {
    let page = state.catalog_service().new_releases().await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `GET /api/category/{slug}`
pub async fn category(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CategoryPage>>, ApiError> {
    let page = state.catalog_service().category_page(&slug).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `GET /api/search?q=`
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResults>>, ApiError> {
    let query = validate_search_query(&params.q)?;
    let results = state.catalog_service().search(query).await?;
    Ok(Json(ApiResponse::success(results)))
}

/// `GET /api/watch/{slug}`
///
/// Viewer state is included when the request carries a session.
pub async fn watch(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<WatchPage>>, ApiError> {
    let viewer = session_user_id(&session).await?;
    let page = state.catalog_service().watch_page(&slug, viewer).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// `GET /api/navigation`
pub async fn navigation(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Navigation>>, ApiError> {
    let viewer = session_user_id(&session).await?;
    let nav = state.catalog_service().navigation(viewer).await?;
    Ok(Json(ApiResponse::success(nav)))
}

/// `GET /sitemap.xml`
pub async fn sitemap_xml(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let entries = state.catalog_service().sitemap_entries().await?;
    let xml = sitemap::render(&state.config().server.public_base_url, &entries)?;

    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
}
