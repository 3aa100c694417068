use crate::domain::{EpisodeId, MediaId, SeasonId, now_timestamp};
use crate::entities::{episodes, seasons};
use crate::models::season::{Episode, EpisodeDraft, Season, SeasonDraft, SeasonWithEpisodes};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::collections::HashMap;

impl From<seasons::Model> for Season {
    fn from(model: seasons::Model) -> Self {
        Self {
            id: SeasonId::from(model.id),
            media_id: MediaId::from(model.media_id),
            season_number: model.season_number,
            title: model.title,
            description: model.description,
            poster_url: model.poster_url,
            release_date: model.release_date,
            created_at: model.created_at,
        }
    }
}

impl From<episodes::Model> for Episode {
    fn from(model: episodes::Model) -> Self {
        Self {
            id: EpisodeId::from(model.id),
            season_id: SeasonId::from(model.season_id),
            episode_number: model.episode_number,
            title: model.title,
            description: model.description,
            embed_url: model.embed_url,
            duration: model.duration,
            thumbnail_url: model.thumbnail_url,
            release_date: model.release_date,
            created_at: model.created_at,
        }
    }
}

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Seasons by `season_number`, each with episodes by `episode_number`.
    pub async fn list_for_media(&self, media_id: MediaId) -> Result<Vec<SeasonWithEpisodes>> {
        let season_rows = seasons::Entity::find()
            .filter(seasons::Column::MediaId.eq(media_id.value()))
            .order_by_asc(seasons::Column::SeasonNumber)
            .all(&self.conn)
            .await
            .context("Failed to list seasons")?;

        if season_rows.is_empty() {
            return Ok(Vec::new());
        }

        let episode_rows = episodes::Entity::find()
            .filter(episodes::Column::SeasonId.is_in(season_rows.iter().map(|s| s.id)))
            .order_by_asc(episodes::Column::EpisodeNumber)
            .all(&self.conn)
            .await
            .context("Failed to list episodes")?;

        let mut by_season: HashMap<uuid::Uuid, Vec<Episode>> = HashMap::new();
        for row in episode_rows {
            by_season
                .entry(row.season_id)
                .or_default()
                .push(Episode::from(row));
        }

        Ok(season_rows
            .into_iter()
            .map(|row| {
                let episodes = by_season.remove(&row.id).unwrap_or_default();
                SeasonWithEpisodes {
                    season: Season::from(row),
                    episodes,
                }
            })
            .collect())
    }

    pub async fn get(&self, id: SeasonId) -> Result<Option<Season>> {
        let row = seasons::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?;

        Ok(row.map(Season::from))
    }

    pub async fn create(&self, media_id: MediaId, draft: &SeasonDraft) -> Result<Season> {
        let model = seasons::ActiveModel {
            id: Set(SeasonId::generate().value()),
            media_id: Set(media_id.value()),
            season_number: Set(draft.season_number),
            title: Set(draft.title.clone()),
            description: Set(draft.description.clone()),
            poster_url: Set(draft.poster_url.clone()),
            release_date: Set(draft.release_date.clone()),
            created_at: Set(now_timestamp()),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert season")?;

        Ok(Season::from(model))
    }

    pub async fn delete(&self, id: SeasonId) -> Result<bool> {
        let result = seasons::Entity::delete_by_id(id.value())
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create_episode(&self, season_id: SeasonId, draft: &EpisodeDraft) -> Result<Episode> {
        let model = episodes::ActiveModel {
            id: Set(EpisodeId::generate().value()),
            season_id: Set(season_id.value()),
            episode_number: Set(draft.episode_number),
            title: Set(draft.title.clone()),
            description: Set(draft.description.clone()),
            embed_url: Set(draft.embed_url.clone()),
            duration: Set(draft.duration),
            thumbnail_url: Set(draft.thumbnail_url.clone()),
            release_date: Set(draft.release_date.clone()),
            created_at: Set(now_timestamp()),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert episode")?;

        Ok(Episode::from(model))
    }

    pub async fn delete_episode(&self, id: EpisodeId) -> Result<bool> {
        let result = episodes::Entity::delete_by_id(id.value())
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
