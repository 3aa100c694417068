use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::{sanitize_redirect, validate_required};
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::domain::UserId;
use crate::models::user::Profile;
use crate::services::{AuthError, SignupRequest};

const SESSION_USER_KEY: &str = "user_id";

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => {
                Self::Unauthorized("Invalid email or password".to_string())
            }
            AuthError::Unauthorized => Self::login_required(),
            AuthError::Validation(msg) => Self::ValidationError(msg),
            AuthError::Conflict(msg) => Self::Conflict(msg),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::InternalError(msg),
        }
    }
}

/// The signed-in profile, placed in request extensions by the middlewares.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Profile);

impl CurrentUser {
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.0.id
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub redirect: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub user: Profile,
    pub redirect: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Rejects anonymous requests with 401.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let profile = require_user(&state, &session).await?;
    request.extensions_mut().insert(CurrentUser(profile));
    Ok(next.run(request).await)
}

/// Rejects anonymous requests with 401 and non-admins with 403.
pub async fn admin_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let profile = require_user(&state, &session).await?;

    if !profile.is_admin {
        tracing::warn!(user_id = %profile.id, path = %request.uri().path(), "Non-admin hit admin route");
        return Err(ApiError::admin_required());
    }

    request.extensions_mut().insert(CurrentUser(profile));
    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/signup
/// Create an account and sign it in
pub async fn signup(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    validate_required("Email", &payload.email)?;
    validate_required("Password", &payload.password)?;

    let profile = state.auth_service().signup(payload).await?;
    start_session(&session, profile.id).await?;

    Ok(Json(ApiResponse::success(profile)))
}

/// POST /auth/login
/// Authenticate with email and password
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    validate_required("Email", &payload.email)?;
    validate_required("Password", &payload.password)?;

    let user = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    start_session(&session, user.id).await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        user,
        redirect: sanitize_redirect(payload.redirect.as_deref()),
    })))
}

/// POST /auth/logout
/// Invalidate the current session
pub async fn logout(session: Session) -> Json<ApiResponse<MessageResponse>> {
    if let Err(e) = session.flush().await {
        tracing::warn!("Failed to flush session: {e}");
    }
    Json(ApiResponse::success(MessageResponse::new("Logged out")))
}

/// GET /auth/me
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = require_user(&state, &session).await?;
    Ok(Json(ApiResponse::success(profile)))
}

// ============================================================================
// Helpers
// ============================================================================

async fn start_session(session: &Session, user: UserId) -> Result<(), ApiError> {
    session
        .cycle_id()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to rotate session: {e}")))?;

    session
        .insert(SESSION_USER_KEY, user)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!(user_id = %user, "Signed in");
    Ok(())
}

/// User id stored in the session, if any.
pub async fn session_user_id(session: &Session) -> Result<Option<UserId>, ApiError> {
    let user = session
        .get::<UserId>(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    if let Some(id) = user {
        tracing::Span::current().record("user_id", tracing::field::display(id));
    }

    Ok(user)
}

/// Profile of the signed-in user. A session whose account is gone is
/// cleared and treated as anonymous.
async fn require_user(state: &AppState, session: &Session) -> Result<Profile, ApiError> {
    let id = session_user_id(session)
        .await?
        .ok_or_else(ApiError::login_required)?;

    match state.auth_service().current_user(id).await {
        Ok(profile) => Ok(profile),
        Err(AuthError::Unauthorized) => {
            session.flush().await.ok();
            Err(ApiError::login_required())
        }
        Err(err) => Err(err.into()),
    }
}
