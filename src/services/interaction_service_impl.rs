//! `SeaORM` implementation of the `InteractionService` trait.

use crate::db::Store;
use crate::domain::{MediaId, UserId};
use crate::models::interaction::RatingSummary;
use crate::models::media::Media;
use crate::services::forms::{FormValue, validate_rating};
use crate::services::interaction_service::{
    FavoriteState, InteractionError, InteractionService, ProfilePage, RatingResult, WatchedState,
};
use tracing::info;

const HISTORY_LIMIT: u64 = 12;

pub struct SeaOrmInteractionService {
    store: Store,
}

impl SeaOrmInteractionService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn published(&self, media_id: MediaId) -> Result<Media, InteractionError> {
        self.store
            .get_media(media_id)
            .await?
            .filter(|media| media.status.is_public())
            .ok_or_else(|| InteractionError::NotFound(format!("Media {media_id}")))
    }
}

#[async_trait::async_trait]
impl InteractionService for SeaOrmInteractionService {
    async fn toggle_favorite(
        &self,
        user: UserId,
        media_id: MediaId,
    ) -> Result<FavoriteState, InteractionError> {
        self.published(media_id).await?;

        let is_favorite = if self.store.remove_favorite(user, media_id).await? {
            false
        } else {
            self.store.add_favorite(user, media_id).await?;
            true
        };

        info!(user_id = %user, media_id = %media_id, is_favorite, "Favorite toggled");
        Ok(FavoriteState { is_favorite })
    }

    async fn toggle_watched(
        &self,
        user: UserId,
        media_id: MediaId,
    ) -> Result<WatchedState, InteractionError> {
        self.published(media_id).await?;

        let is_watched = if self.store.is_watched(user, media_id).await? {
            self.store.clear_watched(user, media_id).await?;
            false
        } else {
            self.store.mark_watched(user, media_id).await?;
            true
        };

        info!(user_id = %user, media_id = %media_id, is_watched, "Watched state toggled");
        Ok(WatchedState { is_watched })
    }

    async fn rate(
        &self,
        user: UserId,
        media_id: MediaId,
        value: &FormValue,
    ) -> Result<RatingResult, InteractionError> {
        let rating = validate_rating(value)?;
        let media = self.published(media_id).await?;

        self.store.upsert_rating(user, media_id, rating).await?;
        let stats = self.store.rating_stats(media_id).await?;

        info!(user_id = %user, media_id = %media_id, rating, "Media rated");
        Ok(RatingResult {
            user_rating: rating,
            rating: RatingSummary::new(stats, media.rating),
        })
    }

    async fn rating_summary(&self, media_id: MediaId) -> Result<RatingSummary, InteractionError> {
        let media = self.published(media_id).await?;
        let stats = self.store.rating_stats(media_id).await?;

        Ok(RatingSummary::new(stats, media.rating))
    }

    async fn profile(&self, user: UserId) -> Result<ProfilePage, InteractionError> {
        let (profile, favorites, history, ratings_given) = tokio::join!(
            self.store.get_profile(user),
            self.store.list_favorites(user),
            self.store.list_history(user, HISTORY_LIMIT),
            self.store.ratings_given(user)
        );

        let profile = profile?.ok_or_else(|| InteractionError::NotFound("Profile".to_string()))?;

        Ok(ProfilePage {
            profile,
            favorites: favorites?,
            history: history?,
            ratings_given: ratings_given?,
        })
    }
}
