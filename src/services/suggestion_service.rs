//! Content suggestions: the public board, voting and moderation.

use crate::domain::{MediaKind, SuggestionId, SuggestionSort, SuggestionStatus, UserId};
use crate::models::suggestion::{Suggestion, VoteState};
use crate::services::forms::{FormError, SuggestionInput};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Suggestion {0} not found")]
    NotFound(SuggestionId),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for SuggestionError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for SuggestionError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(format!("{err:#}"))
    }
}

impl From<FormError> for SuggestionError {
    fn from(err: FormError) -> Self {
        Self::Validation(err.0)
    }
}

/// A board entry as seen by the current viewer.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionView {
    #[serde(flatten)]
    pub suggestion: Suggestion,
    pub has_voted: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub added: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModerationList {
    pub status: SuggestionStatus,
    pub items: Vec<Suggestion>,
    pub counts: StatusCounts,
}

#[async_trait::async_trait]
pub trait SuggestionService: Send + Sync {
    /// Pending suggestions, with `has_voted` filled in for a signed-in viewer.
    async fn list_open(
        &self,
        kind: Option<MediaKind>,
        sort: SuggestionSort,
        viewer: Option<UserId>,
    ) -> Result<Vec<SuggestionView>, SuggestionError>;

    async fn submit(
        &self,
        user: UserId,
        input: SuggestionInput,
    ) -> Result<Suggestion, SuggestionError>;

    /// Casts the user's vote, or withdraws it when already cast.
    ///
    /// # Errors
    ///
    /// Returns [`SuggestionError::Conflict`] once the suggestion has left
    /// the pending state.
    async fn toggle_vote(
        &self,
        user: UserId,
        id: SuggestionId,
    ) -> Result<VoteState, SuggestionError>;

    async fn list_by_status(
        &self,
        status: SuggestionStatus,
    ) -> Result<ModerationList, SuggestionError>;

    /// # Errors
    ///
    /// Returns [`SuggestionError::Conflict`] for a transition the moderation
    /// workflow doesn't allow.
    async fn set_status(
        &self,
        id: SuggestionId,
        status: SuggestionStatus,
    ) -> Result<Suggestion, SuggestionError>;

    async fn delete(&self, id: SuggestionId) -> Result<(), SuggestionError>;
}
