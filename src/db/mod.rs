use crate::domain::{
    CategoryId, EpisodeId, MediaId, MediaKind, SeasonId, SuggestionId, SuggestionStatus, UserId,
};
use crate::models::category::Category;
use crate::models::interaction::{FavoriteEntry, HistoryEntry, RatingStats};
use crate::models::media::{Media, MediaDraft, MediaFilter};
use crate::models::season::{Episode, EpisodeDraft, Season, SeasonDraft, SeasonWithEpisodes};
use crate::models::suggestion::{Suggestion, SuggestionDraft, VoteState};
use crate::models::user::{Credentials, Profile};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr, Statement};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::media::PublishedQuery;
pub use repositories::suggestion::SuggestionQuery;

/// Constraint violations the database reported for a failed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique(String),
    ForeignKey(String),
}

/// Finds a constraint violation anywhere in the error chain.
#[must_use]
pub fn constraint_violation(err: &anyhow::Error) -> Option<ConstraintViolation> {
    let db_err = err.chain().find_map(|e| e.downcast_ref::<DbErr>())?;
    match db_err.sql_err()? {
        SqlErr::UniqueConstraintViolation(msg) => Some(ConstraintViolation::Unique(msg)),
        SqlErr::ForeignKeyConstraintViolation(msg) => Some(ConstraintViolation::ForeignKey(msg)),
        _ => None,
    }
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if db_url.starts_with("sqlite:") && !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Each connection to an in-memory SQLite database is its own database.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn media_repo(&self) -> repositories::media::MediaRepository {
        repositories::media::MediaRepository::new(self.conn.clone())
    }

    fn category_repo(&self) -> repositories::category::CategoryRepository {
        repositories::category::CategoryRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    fn interaction_repo(&self) -> repositories::interaction::InteractionRepository {
        repositories::interaction::InteractionRepository::new(self.conn.clone())
    }

    fn suggestion_repo(&self) -> repositories::suggestion::SuggestionRepository {
        repositories::suggestion::SuggestionRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // ========== Media ==========

    pub async fn get_media(&self, id: MediaId) -> Result<Option<Media>> {
        self.media_repo().get(id).await
    }

    pub async fn get_media_by_slug(&self, slug: &str) -> Result<Option<Media>> {
        self.media_repo().get_by_slug(slug).await
    }

    pub async fn list_published_media(&self, query: &PublishedQuery<'_>) -> Result<Vec<Media>> {
        self.media_repo().list_published(query).await
    }

    pub async fn search_published_media(&self, term: &str) -> Result<Vec<Media>> {
        self.media_repo().search_published(term).await
    }

    pub async fn list_all_media(&self, filter: MediaFilter, limit: Option<u64>) -> Result<Vec<Media>> {
        self.media_repo().list_all(filter, limit).await
    }

    pub async fn count_media(&self, kind: MediaKind) -> Result<u64> {
        self.media_repo().count_by_kind(kind).await
    }

    pub async fn create_media(&self, draft: &MediaDraft) -> Result<Media> {
        self.media_repo().create(draft).await
    }

    pub async fn update_media(&self, id: MediaId, draft: &MediaDraft) -> Result<Option<Media>> {
        self.media_repo().update(id, draft).await
    }

    pub async fn delete_media(&self, id: MediaId) -> Result<bool> {
        self.media_repo().delete(id).await
    }

    // ========== Categories ==========

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.category_repo().list().await
    }

    pub async fn get_category(&self, id: CategoryId) -> Result<Option<Category>> {
        self.category_repo().get(id).await
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        self.category_repo().get_by_slug(slug).await
    }

    pub async fn count_existing_categories(&self, ids: &[CategoryId]) -> Result<u64> {
        self.category_repo().count_existing(ids).await
    }

    pub async fn create_category(&self, name: &str, slug: &str) -> Result<Category> {
        self.category_repo().create(name, slug).await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        name: &str,
        slug: &str,
    ) -> Result<Option<Category>> {
        self.category_repo().update(id, name, slug).await
    }

    pub async fn delete_category(&self, id: CategoryId) -> Result<bool> {
        self.category_repo().delete(id).await
    }

    pub async fn count_categories(&self) -> Result<u64> {
        self.category_repo().count().await
    }

    pub async fn category_ids_for_media(&self, media_id: MediaId) -> Result<Vec<CategoryId>> {
        self.category_repo().ids_for_media(media_id).await
    }

    pub async fn categories_for_media(&self, media_id: MediaId) -> Result<Vec<Category>> {
        self.category_repo().for_media(media_id).await
    }

    // ========== Seasons & Episodes ==========

    pub async fn list_seasons(&self, media_id: MediaId) -> Result<Vec<SeasonWithEpisodes>> {
        self.season_repo().list_for_media(media_id).await
    }

    pub async fn get_season(&self, id: SeasonId) -> Result<Option<Season>> {
        self.season_repo().get(id).await
    }

    pub async fn create_season(&self, media_id: MediaId, draft: &SeasonDraft) -> Result<Season> {
        self.season_repo().create(media_id, draft).await
    }

    pub async fn delete_season(&self, id: SeasonId) -> Result<bool> {
        self.season_repo().delete(id).await
    }

    pub async fn create_episode(&self, season_id: SeasonId, draft: &EpisodeDraft) -> Result<Episode> {
        self.season_repo().create_episode(season_id, draft).await
    }

    pub async fn delete_episode(&self, id: EpisodeId) -> Result<bool> {
        self.season_repo().delete_episode(id).await
    }

    // ========== Favorites, history, ratings ==========

    pub async fn is_favorite(&self, user: UserId, media_id: MediaId) -> Result<bool> {
        self.interaction_repo().is_favorite(user, media_id).await
    }

    pub async fn add_favorite(&self, user: UserId, media_id: MediaId) -> Result<()> {
        self.interaction_repo().add_favorite(user, media_id).await
    }

    pub async fn remove_favorite(&self, user: UserId, media_id: MediaId) -> Result<bool> {
        self.interaction_repo().remove_favorite(user, media_id).await
    }

    pub async fn list_favorites(&self, user: UserId) -> Result<Vec<FavoriteEntry>> {
        self.interaction_repo().list_favorites(user).await
    }

    pub async fn is_watched(&self, user: UserId, media_id: MediaId) -> Result<bool> {
        self.interaction_repo().is_watched(user, media_id).await
    }

    pub async fn mark_watched(&self, user: UserId, media_id: MediaId) -> Result<()> {
        self.interaction_repo().mark_watched(user, media_id).await
    }

    pub async fn clear_watched(&self, user: UserId, media_id: MediaId) -> Result<bool> {
        self.interaction_repo().clear_watched(user, media_id).await
    }

    pub async fn list_history(&self, user: UserId, limit: u64) -> Result<Vec<HistoryEntry>> {
        self.interaction_repo().list_history(user, limit).await
    }

    pub async fn user_rating(&self, user: UserId, media_id: MediaId) -> Result<Option<i32>> {
        self.interaction_repo().user_rating(user, media_id).await
    }

    pub async fn upsert_rating(&self, user: UserId, media_id: MediaId, rating: i32) -> Result<()> {
        self.interaction_repo()
            .upsert_rating(user, media_id, rating)
            .await
    }

    pub async fn rating_stats(&self, media_id: MediaId) -> Result<RatingStats> {
        self.interaction_repo().rating_stats(media_id).await
    }

    pub async fn ratings_given(&self, user: UserId) -> Result<RatingStats> {
        self.interaction_repo().ratings_given(user).await
    }

    // ========== Suggestions ==========

    pub async fn list_suggestions(&self, query: SuggestionQuery) -> Result<Vec<Suggestion>> {
        self.suggestion_repo().list(query).await
    }

    pub async fn get_suggestion(&self, id: SuggestionId) -> Result<Option<Suggestion>> {
        self.suggestion_repo().get(id).await
    }

    pub async fn voted_suggestion_ids(
        &self,
        user: UserId,
        ids: &[SuggestionId],
    ) -> Result<HashSet<SuggestionId>> {
        self.suggestion_repo().voted_ids(user, ids).await
    }

    pub async fn create_suggestion(
        &self,
        user: UserId,
        draft: &SuggestionDraft,
    ) -> Result<Suggestion> {
        self.suggestion_repo().create(user, draft).await
    }

    pub async fn toggle_suggestion_vote(
        &self,
        user: UserId,
        id: SuggestionId,
    ) -> Result<Option<VoteState>> {
        self.suggestion_repo().toggle_vote(user, id).await
    }

    pub async fn set_suggestion_status(
        &self,
        id: SuggestionId,
        status: SuggestionStatus,
    ) -> Result<Option<Suggestion>> {
        self.suggestion_repo().set_status(id, status).await
    }

    pub async fn delete_suggestion(&self, id: SuggestionId) -> Result<bool> {
        self.suggestion_repo().delete(id).await
    }

    pub async fn count_suggestions(&self, status: SuggestionStatus) -> Result<u64> {
        self.suggestion_repo().count_by_status(status).await
    }

    // ========== Users ==========

    pub async fn create_user_with_profile(
        &self,
        email: &str,
        password_hash: String,
        username: &str,
    ) -> Result<Profile> {
        self.user_repo()
            .create_with_profile(email, password_hash, username)
            .await
    }

    pub async fn get_credentials(&self, email: &str) -> Result<Option<Credentials>> {
        self.user_repo().get_credentials(email).await
    }

    pub async fn get_profile(&self, id: UserId) -> Result<Option<Profile>> {
        self.user_repo().get_profile(id).await
    }

    pub async fn set_admin(&self, email: &str, is_admin: bool) -> Result<bool> {
        self.user_repo().set_admin(email, is_admin).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaStatus;
    use crate::models::media::MediaVariant;

    fn movie_draft(slug: &str, categories: Vec<CategoryId>) -> MediaDraft {
        MediaDraft {
            title: "The Matrix".to_string(),
            slug: slug.to_string(),
            description: None,
            poster_url: None,
            backdrop_url: None,
            variant: MediaVariant::Movie {
                embed_url: Some("https://player.example/matrix".to_string()),
                duration: Some(136),
            },
            year: Some(1999),
            rating: Some(8.7),
            status: MediaStatus::Published,
            category_ids: categories,
        }
    }

    #[tokio::test]
    async fn duplicate_slug_is_reported_as_unique_violation() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let action = store.create_category("Action", "action").await.unwrap();

        store
            .create_media(&movie_draft("the-matrix", vec![action.id]))
            .await
            .unwrap();
        let err = store
            .create_media(&movie_draft("the-matrix", vec![action.id]))
            .await
            .unwrap_err();

        assert!(matches!(
            constraint_violation(&err),
            Some(ConstraintViolation::Unique(_))
        ));
    }

    #[tokio::test]
    async fn category_links_follow_the_latest_selection() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let action = store.create_category("Action", "action").await.unwrap();
        let drama = store.create_category("Drame", "drame").await.unwrap();
        let scifi = store.create_category("Science-Fiction", "science-fiction").await.unwrap();

        let media = store
            .create_media(&movie_draft("the-matrix", vec![action.id, scifi.id]))
            .await
            .unwrap();

        store
            .update_media(media.id, &movie_draft("the-matrix", vec![drama.id, scifi.id]))
            .await
            .unwrap();

        let names: Vec<_> = store
            .categories_for_media(media.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Drame", "Science-Fiction"]);
    }

    #[tokio::test]
    async fn deleting_media_cascades_to_links_and_seasons() {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let action = store.create_category("Action", "action").await.unwrap();

        let mut draft = movie_draft("dark", vec![action.id]);
        draft.variant = MediaVariant::Series;
        let series = store.create_media(&draft).await.unwrap();

        let season = store
            .create_season(
                series.id,
                &SeasonDraft {
                    season_number: 1,
                    title: None,
                    description: None,
                    poster_url: None,
                    release_date: None,
                },
            )
            .await
            .unwrap();

        assert!(store.delete_media(series.id).await.unwrap());
        assert!(store.get_season(season.id).await.unwrap().is_none());
        assert!(store.category_ids_for_media(series.id).await.unwrap().is_empty());
    }
}
