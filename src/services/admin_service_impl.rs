//! `SeaORM` implementation of the `AdminService` trait.

use crate::db::Store;
use crate::domain::{CategoryId, EpisodeId, MediaId, MediaKind, SeasonId, SuggestionStatus};
use crate::models::category::Category;
use crate::models::media::{Media, MediaDraft, MediaFilter};
use crate::models::season::{Episode, Season, SeasonWithEpisodes};
use crate::services::admin_service::{AdminError, AdminService, Dashboard, MediaDetail};
use crate::services::forms::{CategoryInput, EpisodeInput, MediaInput, SeasonInput};
use tracing::{info, warn};

const RECENT_MEDIA: u64 = 5;

pub struct SeaOrmAdminService {
    store: Store,
}

impl SeaOrmAdminService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Rejects category ids that don't exist before anything is written.
    async fn check_categories(&self, draft: &MediaDraft) -> Result<(), AdminError> {
        let found = self
            .store
            .count_existing_categories(&draft.category_ids)
            .await?;

        if usize::try_from(found).ok() != Some(draft.category_ids.len()) {
            warn!(slug = %draft.slug, "Media form references unknown categories");
            return Err(AdminError::Validation(
                "One or more categories do not exist".to_string(),
            ));
        }

        Ok(())
    }

    async fn detail(&self, media: Media) -> Result<MediaDetail, AdminError> {
        let category_ids = self.store.category_ids_for_media(media.id).await?;
        Ok(MediaDetail {
            media,
            category_ids,
        })
    }

    async fn series(&self, media_id: MediaId) -> Result<Media, AdminError> {
        self.store
            .get_media(media_id)
            .await?
            .filter(|media| media.kind() == MediaKind::Series)
            .ok_or_else(|| AdminError::NotFound(format!("Series {media_id}")))
    }
}

#[async_trait::async_trait]
impl AdminService for SeaOrmAdminService {
    async fn dashboard(&self) -> Result<Dashboard, AdminError> {
        let (movies, series, categories, users, pending, recent) = tokio::join!(
            self.store.count_media(MediaKind::Movie),
            self.store.count_media(MediaKind::Series),
            self.store.count_categories(),
            self.store.count_users(),
            self.store.count_suggestions(SuggestionStatus::Pending),
            self.store
                .list_all_media(MediaFilter::default(), Some(RECENT_MEDIA))
        );

        Ok(Dashboard {
            movies: movies?,
            series: series?,
            categories: categories?,
            users: users?,
            pending_suggestions: pending?,
            recent: recent?,
        })
    }

    async fn list_media(&self, filter: MediaFilter) -> Result<Vec<Media>, AdminError> {
        Ok(self.store.list_all_media(filter, None).await?)
    }

    async fn get_media(&self, id: MediaId) -> Result<MediaDetail, AdminError> {
        let media = self
            .store
            .get_media(id)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("Media {id}")))?;

        self.detail(media).await
    }

    async fn create_media(&self, input: MediaInput) -> Result<MediaDetail, AdminError> {
        let draft = input.validate()?;
        self.check_categories(&draft).await?;

        let media = self.store.create_media(&draft).await?;
        info!(media_id = %media.id, slug = %media.slug, kind = %media.kind(), "Media created");

        self.detail(media).await
    }

    async fn update_media(
        &self,
        id: MediaId,
        input: MediaInput,
    ) -> Result<MediaDetail, AdminError> {
        let draft = input.validate()?;
        self.check_categories(&draft).await?;

        let media = self
            .store
            .update_media(id, &draft)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("Media {id}")))?;
        info!(media_id = %id, slug = %media.slug, "Media updated");

        self.detail(media).await
    }

    async fn delete_media(&self, id: MediaId) -> Result<(), AdminError> {
        if !self.store.delete_media(id).await? {
            return Err(AdminError::NotFound(format!("Media {id}")));
        }
        info!(media_id = %id, "Media deleted");
        Ok(())
    }

    async fn list_seasons(
        &self,
        media_id: MediaId,
    ) -> Result<Vec<SeasonWithEpisodes>, AdminError> {
        self.series(media_id).await?;
        Ok(self.store.list_seasons(media_id).await?)
    }

    async fn create_season(
        &self,
        media_id: MediaId,
        input: SeasonInput,
    ) -> Result<Season, AdminError> {
        let draft = input.validate()?;
        self.series(media_id).await?;

        let season = self.store.create_season(media_id, &draft).await?;
        info!(
            media_id = %media_id,
            season_number = season.season_number,
            "Season created"
        );

        Ok(season)
    }

    async fn delete_season(&self, id: SeasonId) -> Result<(), AdminError> {
        if !self.store.delete_season(id).await? {
            return Err(AdminError::NotFound(format!("Season {id}")));
        }
        info!(season_id = %id, "Season deleted");
        Ok(())
    }

    async fn create_episode(
        &self,
        season_id: SeasonId,
        input: EpisodeInput,
    ) -> Result<Episode, AdminError> {
        let draft = input.validate()?;

        if self.store.get_season(season_id).await?.is_none() {
            return Err(AdminError::NotFound(format!("Season {season_id}")));
        }

        let episode = self.store.create_episode(season_id, &draft).await?;
        info!(
            season_id = %season_id,
            episode_number = episode.episode_number,
            "Episode created"
        );

        Ok(episode)
    }

    async fn delete_episode(&self, id: EpisodeId) -> Result<(), AdminError> {
        if !self.store.delete_episode(id).await? {
            return Err(AdminError::NotFound(format!("Episode {id}")));
        }
        info!(episode_id = %id, "Episode deleted");
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, AdminError> {
        Ok(self.store.list_categories().await?)
    }

    async fn create_category(&self, input: CategoryInput) -> Result<Category, AdminError> {
        let (name, slug) = input.validate()?;

        let category = self.store.create_category(&name, &slug).await?;
        info!(category_id = %category.id, slug = %category.slug, "Category created");

        Ok(category)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Category, AdminError> {
        let (name, slug) = input.validate()?;

        let category = self
            .store
            .update_category(id, &name, &slug)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("Category {id}")))?;
        info!(category_id = %id, slug = %category.slug, "Category updated");

        Ok(category)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), AdminError> {
        if !self.store.delete_category(id).await? {
            return Err(AdminError::NotFound(format!("Category {id}")));
        }
        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
