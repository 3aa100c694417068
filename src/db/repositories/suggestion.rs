use crate::domain::{
    MediaKind, SuggestionId, SuggestionSort, SuggestionStatus, UserId, now_timestamp,
};
use crate::entities::{content_suggestions, profiles, suggestion_votes};
use crate::models::suggestion::{Suggestion, SuggestionDraft, VoteState};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashSet;

/// Query of the suggestion board and the moderation list.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionQuery {
    pub status: Option<SuggestionStatus>,
    pub kind: Option<MediaKind>,
    pub sort: SuggestionSort,
    pub limit: Option<u64>,
}

pub struct SuggestionRepository {
    conn: DatabaseConnection,
}

impl SuggestionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(
        model: content_suggestions::Model,
        author: Option<profiles::Model>,
    ) -> Result<Suggestion> {
        Ok(Suggestion {
            id: SuggestionId::from(model.id),
            user_id: UserId::from(model.user_id),
            title: model.title,
            kind: model.kind.parse()?,
            description: model.description,
            year: model.year,
            external_link: model.external_link,
            votes: model.votes,
            status: model.status.parse()?,
            author: author.map(|p| p.username),
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    pub async fn list(&self, query: SuggestionQuery) -> Result<Vec<Suggestion>> {
        let mut select = content_suggestions::Entity::find();

        if let Some(status) = query.status {
            select = select.filter(content_suggestions::Column::Status.eq(status.as_str()));
        }

        if let Some(kind) = query.kind {
            select = select.filter(content_suggestions::Column::Kind.eq(kind.as_str()));
        }

        select = match query.sort {
            SuggestionSort::Votes => select
                .order_by_desc(content_suggestions::Column::Votes)
                .order_by_desc(content_suggestions::Column::CreatedAt),
            SuggestionSort::Recent => {
                select.order_by_desc(content_suggestions::Column::CreatedAt)
            }
        };

        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        let rows = select
            .find_also_related(profiles::Entity)
            .all(&self.conn)
            .await
            .context("Failed to list suggestions")?;

        rows.into_iter()
            .map(|(model, author)| Self::map_model(model, author))
            .collect()
    }

    pub async fn get(&self, id: SuggestionId) -> Result<Option<Suggestion>> {
        let row = content_suggestions::Entity::find_by_id(id.value())
            .find_also_related(profiles::Entity)
            .one(&self.conn)
            .await?;

        row.map(|(model, author)| Self::map_model(model, author))
            .transpose()
    }

    /// Which of `ids` the user has voted for.
    pub async fn voted_ids(
        &self,
        user: UserId,
        ids: &[SuggestionId],
    ) -> Result<HashSet<SuggestionId>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let rows = suggestion_votes::Entity::find()
            .filter(suggestion_votes::Column::UserId.eq(user.value()))
            .filter(suggestion_votes::Column::SuggestionId.is_in(ids.iter().map(SuggestionId::value)))
            .all(&self.conn)
            .await
            .context("Failed to load votes")?;

        Ok(rows
            .into_iter()
            .map(|v| SuggestionId::from(v.suggestion_id))
            .collect())
    }

    pub async fn create(&self, user: UserId, draft: &SuggestionDraft) -> Result<Suggestion> {
        let now = now_timestamp();

        let model = content_suggestions::ActiveModel {
            id: Set(SuggestionId::generate().value()),
            user_id: Set(user.value()),
            title: Set(draft.title.clone()),
            kind: Set(draft.kind.as_str().to_string()),
            description: Set(draft.description.clone()),
            year: Set(draft.year),
            external_link: Set(draft.external_link.clone()),
            votes: Set(0),
            status: Set(SuggestionStatus::Pending.as_str().to_string()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert suggestion")?;

        let author = profiles::Entity::find_by_id(user.value())
            .one(&self.conn)
            .await?;

        Self::map_model(model, author)
    }

    /// Adds or removes the user's vote and re-derives the stored count from
    /// the vote rows, all in one transaction. `None` if the suggestion is gone.
    pub async fn toggle_vote(&self, user: UserId, id: SuggestionId) -> Result<Option<VoteState>> {
        let txn = self.conn.begin().await?;

        let Some(suggestion) = content_suggestions::Entity::find_by_id(id.value())
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let key = (user.value(), id.value());
        let existing = suggestion_votes::Entity::find_by_id(key).one(&txn).await?;

        let voted = if existing.is_some() {
            suggestion_votes::Entity::delete_by_id(key).exec(&txn).await?;
            false
        } else {
            suggestion_votes::ActiveModel {
                user_id: Set(user.value()),
                suggestion_id: Set(id.value()),
                created_at: Set(now_timestamp()),
            }
            .insert(&txn)
            .await
            .context("Failed to insert vote")?;
            true
        };

        let votes = count_votes(&txn, id).await?;

        let mut active: content_suggestions::ActiveModel = suggestion.into();
        active.votes = Set(votes);
        active.update(&txn).await?;

        txn.commit().await?;

        Ok(Some(VoteState { voted, votes }))
    }

    pub async fn set_status(
        &self,
        id: SuggestionId,
        status: SuggestionStatus,
    ) -> Result<Option<Suggestion>> {
        let Some(existing) = content_suggestions::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: content_suggestions::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(now_timestamp());
        active
            .update(&self.conn)
            .await
            .context("Failed to update suggestion status")?;

        self.get(id).await
    }

    pub async fn delete(&self, id: SuggestionId) -> Result<bool> {
        let result = content_suggestions::Entity::delete_by_id(id.value())
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_by_status(&self, status: SuggestionStatus) -> Result<u64> {
        let count = content_suggestions::Entity::find()
            .filter(content_suggestions::Column::Status.eq(status.as_str()))
            .count(&self.conn)
            .await?;

        Ok(count)
    }
}

async fn count_votes<C: ConnectionTrait>(db: &C, id: SuggestionId) -> Result<i32> {
    let count = suggestion_votes::Entity::find()
        .filter(suggestion_votes::Column::SuggestionId.eq(id.value()))
        .count(db)
        .await?;

    Ok(i32::try_from(count)?)
}
