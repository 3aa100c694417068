//! `SeaORM` implementation of the `SuggestionService` trait.

use crate::config::CatalogConfig;
use crate::db::{Store, SuggestionQuery};
use crate::domain::{MediaKind, SuggestionId, SuggestionSort, SuggestionStatus, UserId};
use crate::models::suggestion::{Suggestion, VoteState};
use crate::services::forms::SuggestionInput;
use crate::services::suggestion_service::{
    ModerationList, StatusCounts, SuggestionError, SuggestionService, SuggestionView,
};
use tracing::{info, warn};

pub struct SeaOrmSuggestionService {
    store: Store,
    config: CatalogConfig,
}

impl SeaOrmSuggestionService {
    #[must_use]
    pub const fn new(store: Store, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    async fn status_counts(&self) -> Result<StatusCounts, SuggestionError> {
        let (pending, approved, rejected, added) = tokio::join!(
            self.store.count_suggestions(SuggestionStatus::Pending),
            self.store.count_suggestions(SuggestionStatus::Approved),
            self.store.count_suggestions(SuggestionStatus::Rejected),
            self.store.count_suggestions(SuggestionStatus::Added)
        );

        Ok(StatusCounts {
            pending: pending?,
            approved: approved?,
            rejected: rejected?,
            added: added?,
        })
    }
}

#[async_trait::async_trait]
impl SuggestionService for SeaOrmSuggestionService {
    async fn list_open(
        &self,
        kind: Option<MediaKind>,
        sort: SuggestionSort,
        viewer: Option<UserId>,
    ) -> Result<Vec<SuggestionView>, SuggestionError> {
        let suggestions = self
            .store
            .list_suggestions(SuggestionQuery {
                status: Some(SuggestionStatus::Pending),
                kind,
                sort,
                limit: Some(self.config.suggestion_list_limit),
            })
            .await?;

        let voted = match viewer {
            Some(user) => {
                let ids: Vec<_> = suggestions.iter().map(|s| s.id).collect();
                self.store.voted_suggestion_ids(user, &ids).await?
            }
            None => Default::default(),
        };

        Ok(suggestions
            .into_iter()
            .map(|suggestion| SuggestionView {
                has_voted: voted.contains(&suggestion.id),
                suggestion,
            })
            .collect())
    }

    async fn submit(
        &self,
        user: UserId,
        input: SuggestionInput,
    ) -> Result<Suggestion, SuggestionError> {
        let draft = input.validate()?;

        let suggestion = self.store.create_suggestion(user, &draft).await?;
        info!(
            suggestion_id = %suggestion.id,
            user_id = %user,
            kind = %suggestion.kind,
            "Suggestion submitted"
        );

        Ok(suggestion)
    }

    async fn toggle_vote(
        &self,
        user: UserId,
        id: SuggestionId,
    ) -> Result<VoteState, SuggestionError> {
        let suggestion = self
            .store
            .get_suggestion(id)
            .await?
            .ok_or(SuggestionError::NotFound(id))?;

        if suggestion.status != SuggestionStatus::Pending {
            return Err(SuggestionError::Conflict(
                "Voting is closed for this suggestion".to_string(),
            ));
        }

        let state = self
            .store
            .toggle_suggestion_vote(user, id)
            .await?
            .ok_or(SuggestionError::NotFound(id))?;

        info!(
            suggestion_id = %id,
            user_id = %user,
            voted = state.voted,
            votes = state.votes,
            "Suggestion vote toggled"
        );

        Ok(state)
    }

    async fn list_by_status(
        &self,
        status: SuggestionStatus,
    ) -> Result<ModerationList, SuggestionError> {
        let (items, counts) = tokio::join!(
            self.store.list_suggestions(SuggestionQuery {
                status: Some(status),
                kind: None,
                sort: SuggestionSort::Votes,
                limit: None,
            }),
            self.status_counts()
        );

        Ok(ModerationList {
            status,
            items: items?,
            counts: counts?,
        })
    }

    async fn set_status(
        &self,
        id: SuggestionId,
        status: SuggestionStatus,
    ) -> Result<Suggestion, SuggestionError> {
        let current = self
            .store
            .get_suggestion(id)
            .await?
            .ok_or(SuggestionError::NotFound(id))?;

        if !current.status.can_transition_to(status) {
            warn!(
                suggestion_id = %id,
                from = %current.status,
                to = %status,
                "Rejected suggestion status change"
            );
            return Err(SuggestionError::Conflict(format!(
                "Cannot move a suggestion from {} to {}",
                current.status, status
            )));
        }

        let updated = self
            .store
            .set_suggestion_status(id, status)
            .await?
            .ok_or(SuggestionError::NotFound(id))?;

        info!(suggestion_id = %id, from = %current.status, to = %status, "Suggestion moderated");
        Ok(updated)
    }

    async fn delete(&self, id: SuggestionId) -> Result<(), SuggestionError> {
        if !self.store.delete_suggestion(id).await? {
            return Err(SuggestionError::NotFound(id));
        }
        info!(suggestion_id = %id, "Suggestion deleted");
        Ok(())
    }
}
