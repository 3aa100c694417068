//! Favorites, watch history and ratings of signed-in users.

use crate::domain::{MediaId, UserId};
use crate::models::interaction::{FavoriteEntry, HistoryEntry, RatingStats, RatingSummary};
use crate::models::user::Profile;
use crate::services::forms::{FormError, FormValue};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InteractionError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for InteractionError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for InteractionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<FormError> for InteractionError {
    fn from(err: FormError) -> Self {
        Self::Validation(err.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FavoriteState {
    pub is_favorite: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WatchedState {
    pub is_watched: bool,
}

/// Response to a rating, with the aggregate recomputed after the write.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RatingResult {
    pub user_rating: i32,
    pub rating: RatingSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfilePage {
    pub profile: Profile,
    pub favorites: Vec<FavoriteEntry>,
    pub history: Vec<HistoryEntry>,
    pub ratings_given: RatingStats,
}

#[async_trait::async_trait]
pub trait InteractionService: Send + Sync {
    /// Adds the media to the user's favorites, or removes it when present.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::NotFound`] unless the media is published.
    async fn toggle_favorite(
        &self,
        user: UserId,
        media_id: MediaId,
    ) -> Result<FavoriteState, InteractionError>;

    async fn toggle_watched(
        &self,
        user: UserId,
        media_id: MediaId,
    ) -> Result<WatchedState, InteractionError>;

    /// Creates or replaces the user's 1-10 rating.
    async fn rate(
        &self,
        user: UserId,
        media_id: MediaId,
        value: &FormValue,
    ) -> Result<RatingResult, InteractionError>;

    async fn rating_summary(&self, media_id: MediaId) -> Result<RatingSummary, InteractionError>;

    async fn profile(&self, user: UserId) -> Result<ProfilePage, InteractionError>;
}
