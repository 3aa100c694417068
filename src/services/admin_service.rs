//! Back-office management of the catalog.
//!
//! Every write validates its form first, then persists it in as few
//! statements as the store allows. Constraint failures reported by the
//! database come back as [`AdminError::Conflict`] with the backend message.

use crate::db::{ConstraintViolation, constraint_violation};
use crate::domain::{CategoryId, EpisodeId, MediaId, SeasonId};
use crate::models::category::Category;
use crate::models::media::{Media, MediaFilter};
use crate::models::season::{Episode, Season, SeasonWithEpisodes};
use crate::services::forms::{CategoryInput, EpisodeInput, FormError, MediaInput, SeasonInput};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AdminError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AdminError {
    fn from(err: anyhow::Error) -> Self {
        match constraint_violation(&err) {
            Some(ConstraintViolation::Unique(msg)) => Self::Conflict(msg),
            Some(ConstraintViolation::ForeignKey(msg)) => Self::Validation(msg),
            None => Self::Internal(format!("{err:#}")),
        }
    }
}

impl From<FormError> for AdminError {
    fn from(err: FormError) -> Self {
        Self::Validation(err.0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub movies: u64,
    pub series: u64,
    pub categories: u64,
    pub users: u64,
    pub pending_suggestions: u64,
    /// Latest media of any status.
    pub recent: Vec<Media>,
}

/// A media as edited in the back-office.
#[derive(Debug, Clone, Serialize)]
pub struct MediaDetail {
    #[serde(flatten)]
    pub media: Media,
    pub category_ids: Vec<CategoryId>,
}

#[async_trait::async_trait]
pub trait AdminService: Send + Sync {
    async fn dashboard(&self) -> Result<Dashboard, AdminError>;

    /// All media newest first, whatever their status.
    async fn list_media(&self, filter: MediaFilter) -> Result<Vec<Media>, AdminError>;

    async fn get_media(&self, id: MediaId) -> Result<MediaDetail, AdminError>;

    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] for an invalid form or unknown
    /// categories and [`AdminError::Conflict`] for a slug already in use.
    async fn create_media(&self, input: MediaInput) -> Result<MediaDetail, AdminError>;

    async fn update_media(&self, id: MediaId, input: MediaInput)
    -> Result<MediaDetail, AdminError>;

    async fn delete_media(&self, id: MediaId) -> Result<(), AdminError>;

    /// # Errors
    ///
    /// Returns [`AdminError::NotFound`] when the media isn't a series.
    async fn list_seasons(&self, media_id: MediaId)
    -> Result<Vec<SeasonWithEpisodes>, AdminError>;

    async fn create_season(
        &self,
        media_id: MediaId,
        input: SeasonInput,
    ) -> Result<Season, AdminError>;

    async fn delete_season(&self, id: SeasonId) -> Result<(), AdminError>;

    async fn create_episode(
        &self,
        season_id: SeasonId,
        input: EpisodeInput,
    ) -> Result<Episode, AdminError>;

    async fn delete_episode(&self, id: EpisodeId) -> Result<(), AdminError>;

    async fn list_categories(&self) -> Result<Vec<Category>, AdminError>;

    async fn create_category(&self, input: CategoryInput) -> Result<Category, AdminError>;

    async fn update_category(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Category, AdminError>;

    async fn delete_category(&self, id: CategoryId) -> Result<(), AdminError>;
}
