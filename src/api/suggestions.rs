use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{CurrentUser, session_user_id};
use super::{
    ApiError, ApiResponse, AppState, ModerationQuery, StatusUpdateRequest, SuggestionListQuery,
};
use crate::domain::SuggestionId;
use crate::models::suggestion::{Suggestion, VoteState};
use crate::services::SuggestionError;
use crate::services::forms::SuggestionInput;
use crate::services::suggestion_service::{ModerationList, SuggestionView};

impl From<SuggestionError> for ApiError {
    fn from(err: SuggestionError) -> Self {
        match err {
            SuggestionError::NotFound(id) => Self::not_found("Suggestion", id),
            SuggestionError::Validation(msg) => Self::ValidationError(msg),
            SuggestionError::Conflict(msg) => Self::Conflict(msg),
            SuggestionError::Database(msg) => Self::DatabaseError(msg),
            SuggestionError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

/// `GET /api/suggestions?type=&sort=`
pub async fn list_open(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(params): Query<SuggestionListQuery>,
) -> Result<Json<ApiResponse<Vec<SuggestionView>>>, ApiError> {
    let viewer = session_user_id(&session).await?;
    let items = state
        .suggestion_service()
        .list_open(params.kind, params.sort, viewer)
        .await?;
    Ok(Json(ApiResponse::success(items)))
}

/// `POST /api/suggestions`
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<SuggestionInput>,
) -> Result<Json<ApiResponse<Suggestion>>, ApiError> {
    let suggestion = state.suggestion_service().submit(user.id(), payload).await?;
    Ok(Json(ApiResponse::success(suggestion)))
}

/// `POST /api/suggestions/{id}/vote`
pub async fn toggle_vote(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<SuggestionId>,
) -> Result<Json<ApiResponse<VoteState>>, ApiError> {
    let vote = state.suggestion_service().toggle_vote(user.id(), id).await?;
    Ok(Json(ApiResponse::success(vote)))
}

// ============================================================================
// Moderation
// ============================================================================

/// `GET /api/admin/suggestions?status=`
pub async fn list_for_moderation(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ModerationQuery>,
) -> Result<Json<ApiResponse<ModerationList>>, ApiError> {
    let list = state
        .suggestion_service()
        .list_by_status(params.status)
        .await?;
    Ok(Json(ApiResponse::success(list)))
}

/// `PUT /api/admin/suggestions/{id}/status`
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SuggestionId>,
    Json(payload): Json<StatusUpdateRequest>,
) -> Result<Json<ApiResponse<Suggestion>>, ApiError> {
    let suggestion = state
        .suggestion_service()
        .set_status(id, payload.status)
        .await?;
    Ok(Json(ApiResponse::success(suggestion)))
}

/// `DELETE /api/admin/suggestions/{id}`
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<SuggestionId>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.suggestion_service().delete(id).await?;
    Ok(Json(ApiResponse::success(())))
}
