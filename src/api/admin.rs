//! Back-office endpoints, mounted under `/api/admin` behind the admin
//! middleware.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MediaListQuery};
use crate::domain::{CategoryId, EpisodeId, MediaId, SeasonId};
use crate::models::category::Category;
use crate::models::media::{Media, MediaFilter};
use crate::models::season::{Episode, Season, SeasonWithEpisodes};
use crate::services::forms::{CategoryInput, EpisodeInput, MediaInput, SeasonInput};
use crate::services::{AdminError, Dashboard, MediaDetail};

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            AdminError::Validation(msg) => Self::ValidationError(msg),
            AdminError::Conflict(msg) => Self::Conflict(msg),
            AdminError::Database(msg) => Self::DatabaseError(msg),
            AdminError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Dashboard>>, ApiError> {
    let dashboard = state.admin_service().dashboard().await?;
    Ok(Json(ApiResponse::success(dashboard)))
}

// ============================================================================
// Media
// ============================================================================

pub async fn list_media(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MediaListQuery>,
) -> Result<Json<ApiResponse<Vec<Media>>>, ApiError> {
    let filter = MediaFilter {
        kind: params.kind,
        status: params.status,
    };
    let items = state.admin_service().list_media(filter).await?;
    Ok(Json(ApiResponse::success(items)))
}

pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MediaId>,
) -> Result<Json<ApiResponse<MediaDetail>>, ApiError> {
    let media = state.admin_service().get_media(id).await?;
    Ok(Json(ApiResponse::success(media)))
}

pub async fn create_media(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MediaInput>,
) -> Result<Json<ApiResponse<MediaDetail>>, ApiError> {
    let media = state.admin_service().create_media(payload).await?;
    Ok(Json(ApiResponse::success(media)))
}

pub async fn update_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MediaId>,
    Json(payload): Json<MediaInput>,
) -> Result<Json<ApiResponse<MediaDetail>>, ApiError> {
    let media = state.admin_service().update_media(id, payload).await?;
    Ok(Json(ApiResponse::success(media)))
}

pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MediaId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.admin_service().delete_media(id).await?;
    Ok(Json(ApiResponse::success(())))
}

// ============================================================================
// Seasons & episodes
// ============================================================================

pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MediaId>,
) -> Result<Json<ApiResponse<Vec<SeasonWithEpisodes>>>, ApiError> {
    let seasons = state.admin_service().list_seasons(id).await?;
    Ok(Json(ApiResponse::success(seasons)))
}

pub async fn create_season(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MediaId>,
    Json(payload): Json<SeasonInput>,
) -> Result<Json<ApiResponse<Season>>, ApiError> {
    let season = state.admin_service().create_season(id, payload).await?;
    Ok(Json(ApiResponse::success(season)))
}

pub async fn delete_season(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SeasonId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.admin_service().delete_season(id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SeasonId>,
    Json(payload): Json<EpisodeInput>,
) -> Result<Json<ApiResponse<Episode>>, ApiError> {
    let episode = state.admin_service().create_episode(id, payload).await?;
    Ok(Json(ApiResponse::success(episode)))
}

pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EpisodeId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.admin_service().delete_episode(id).await?;
    Ok(Json(ApiResponse::success(())))
}

// ============================================================================
// Categories
// ============================================================================

pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Category>>>, ApiError> {
    let categories = state.admin_service().list_categories().await?;
    Ok(Json(ApiResponse::success(categories)))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CategoryInput>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let category = state.admin_service().create_category(payload).await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CategoryId>,
    Json(payload): Json<CategoryInput>,
) -> Result<Json<ApiResponse<Category>>, ApiError> {
    let category = state.admin_service().update_category(id, payload).await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<CategoryId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.admin_service().delete_category(id).await?;
    Ok(Json(ApiResponse::success(())))
}
