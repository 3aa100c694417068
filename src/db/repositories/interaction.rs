use crate::domain::{MediaId, MediaStatus, UserId, now_timestamp};
use crate::entities::{favorites, media, ratings, watch_history};
use crate::models::interaction::{FavoriteEntry, HistoryEntry, RatingStats};
use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::media::MediaRepository;

pub struct InteractionRepository {
    conn: DatabaseConnection,
}

impl InteractionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    pub async fn is_favorite(&self, user: UserId, media_id: MediaId) -> Result<bool> {
        let row = favorites::Entity::find_by_id((user.value(), media_id.value()))
            .one(&self.conn)
            .await?;

        Ok(row.is_some())
    }

    /// Concurrent duplicate inserts collapse into one row.
    pub async fn add_favorite(&self, user: UserId, media_id: MediaId) -> Result<()> {
        favorites::Entity::insert(favorites::ActiveModel {
            user_id: Set(user.value()),
            media_id: Set(media_id.value()),
            added_at: Set(now_timestamp()),
        })
        .on_conflict(
            OnConflict::columns([favorites::Column::UserId, favorites::Column::MediaId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to add favorite")?;

        Ok(())
    }

    pub async fn remove_favorite(&self, user: UserId, media_id: MediaId) -> Result<bool> {
        let result = favorites::Entity::delete_by_id((user.value(), media_id.value()))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Published favorites, most recently added first.
    pub async fn list_favorites(&self, user: UserId) -> Result<Vec<FavoriteEntry>> {
        let rows = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user.value()))
            .find_also_related(media::Entity)
            .filter(media::Column::Status.eq(MediaStatus::Published.as_str()))
            .order_by_desc(favorites::Column::AddedAt)
            .all(&self.conn)
            .await
            .context("Failed to list favorites")?;

        rows.into_iter()
            .filter_map(|(fav, media)| media.map(|m| (fav, m)))
            .map(|(fav, media)| {
                Ok(FavoriteEntry {
                    media: MediaRepository::map_model(media)?,
                    added_at: fav.added_at,
                })
            })
            .collect()
    }

    // ========================================================================
    // Watch history
    // ========================================================================

    pub async fn is_watched(&self, user: UserId, media_id: MediaId) -> Result<bool> {
        let row = watch_history::Entity::find_by_id((user.value(), media_id.value()))
            .one(&self.conn)
            .await?;

        Ok(row.is_some_and(|h| h.completed))
    }

    pub async fn mark_watched(&self, user: UserId, media_id: MediaId) -> Result<()> {
        watch_history::Entity::insert(watch_history::ActiveModel {
            user_id: Set(user.value()),
            media_id: Set(media_id.value()),
            watched_at: Set(now_timestamp()),
            completed: Set(true),
        })
        .on_conflict(
            OnConflict::columns([
                watch_history::Column::UserId,
                watch_history::Column::MediaId,
            ])
            .update_columns([
                watch_history::Column::WatchedAt,
                watch_history::Column::Completed,
            ])
            .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to record watch history")?;

        Ok(())
    }

    pub async fn clear_watched(&self, user: UserId, media_id: MediaId) -> Result<bool> {
        let result = watch_history::Entity::delete_by_id((user.value(), media_id.value()))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Latest published history entries.
    pub async fn list_history(&self, user: UserId, limit: u64) -> Result<Vec<HistoryEntry>> {
        let rows = watch_history::Entity::find()
            .filter(watch_history::Column::UserId.eq(user.value()))
            .find_also_related(media::Entity)
            .filter(media::Column::Status.eq(MediaStatus::Published.as_str()))
            .order_by_desc(watch_history::Column::WatchedAt)
            .limit(limit)
            .all(&self.conn)
            .await
            .context("Failed to list watch history")?;

        rows.into_iter()
            .filter_map(|(entry, media)| media.map(|m| (entry, m)))
            .map(|(entry, media)| {
                Ok(HistoryEntry {
                    media: MediaRepository::map_model(media)?,
                    watched_at: entry.watched_at,
                    completed: entry.completed,
                })
            })
            .collect()
    }

    // ========================================================================
    // Ratings
    // ========================================================================

    pub async fn user_rating(&self, user: UserId, media_id: MediaId) -> Result<Option<i32>> {
        let row = ratings::Entity::find_by_id((user.value(), media_id.value()))
            .one(&self.conn)
            .await?;

        Ok(row.map(|r| r.rating))
    }

    /// One rating per (user, media); a second call replaces the first.
    pub async fn upsert_rating(&self, user: UserId, media_id: MediaId, rating: i32) -> Result<()> {
        let now = now_timestamp();

        ratings::Entity::insert(ratings::ActiveModel {
            user_id: Set(user.value()),
            media_id: Set(media_id.value()),
            rating: Set(rating),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([ratings::Column::UserId, ratings::Column::MediaId])
                .update_columns([ratings::Column::Rating, ratings::Column::UpdatedAt])
                .to_owned(),
        )
        .exec_without_returning(&self.conn)
        .await
        .context("Failed to save rating")?;

        Ok(())
    }

    pub async fn rating_stats(&self, media_id: MediaId) -> Result<RatingStats> {
        self.aggregate_ratings(ratings::Column::MediaId.eq(media_id.value()))
            .await
    }

    /// Count and mean of the ratings a user has given.
    pub async fn ratings_given(&self, user: UserId) -> Result<RatingStats> {
        self.aggregate_ratings(ratings::Column::UserId.eq(user.value()))
            .await
    }

    async fn aggregate_ratings(
        &self,
        filter: sea_orm::sea_query::SimpleExpr,
    ) -> Result<RatingStats> {
        let row: Option<(i64, Option<i64>)> = ratings::Entity::find()
            .select_only()
            .column_as(ratings::Column::Rating.count(), "count")
            .column_as(ratings::Column::Rating.sum(), "sum")
            .filter(filter)
            .into_tuple()
            .one(&self.conn)
            .await
            .context("Failed to aggregate ratings")?;

        let (count, sum) = row.unwrap_or((0, None));
        Ok(RatingStats::from_sum(count, sum))
    }
}
