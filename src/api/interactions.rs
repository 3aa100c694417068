use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::CurrentUser;
use super::{ApiError, ApiResponse, AppState};
use crate::domain::MediaId;
use crate::models::interaction::RatingSummary;
use crate::services::InteractionError;
use crate::services::forms::FormValue;
use crate::services::interaction_service::{
    FavoriteState, ProfilePage, RatingResult, WatchedState,
};

impl From<InteractionError> for ApiError {
    fn from(err: InteractionError) -> Self {
        match err {
            InteractionError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            InteractionError::Validation(msg) => Self::ValidationError(msg),
            InteractionError::Database(msg) => Self::DatabaseError(msg),
            InteractionError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rating: FormValue,
}

/// `POST /api/media/{id}/favorite`
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<MediaId>,
) -> Result<Json<ApiResponse<FavoriteState>>, ApiError> {
    let result = state
        .interaction_service()
        .toggle_favorite(user.id(), id)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// `POST /api/media/{id}/watched`
pub async fn toggle_watched(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<MediaId>,
) -> Result<Json<ApiResponse<WatchedState>>, ApiError> {
    let result = state
        .interaction_service()
        .toggle_watched(user.id(), id)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// `PUT /api/media/{id}/rating`
pub async fn rate(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<MediaId>,
    Json(payload): Json<RateRequest>,
) -> Result<Json<ApiResponse<RatingResult>>, ApiError> {
    let result = state
        .interaction_service()
        .rate(user.id(), id, &payload.rating)
        .await?;
    Ok(Json(ApiResponse::success(result)))
}

/// `GET /api/media/{id}/rating`
pub async fn rating(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MediaId>,
) -> Result<Json<ApiResponse<RatingSummary>>, ApiError> {
    let summary = state.interaction_service().rating_summary(id).await?;
    Ok(Json(ApiResponse::success(summary)))
}

/// `GET /api/profile`
pub async fn profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<ApiResponse<ProfilePage>>, ApiError> {
    let page = state.interaction_service().profile(user.id()).await?;
    Ok(Json(ApiResponse::success(page)))
}
