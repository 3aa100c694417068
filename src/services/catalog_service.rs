//! Public read paths of the catalog.
//!
//! Only published media ever leave this service.

use crate::domain::UserId;
use crate::models::category::Category;
use crate::models::interaction::{RatingSummary, ViewerState};
use crate::models::media::MediaCard;
use crate::models::season::SeasonWithEpisodes;
use crate::models::user::Profile;
use crate::services::sitemap::SitemapEntry;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// One category section of the home page.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRow {
    pub category: Category,
    pub items: Vec<MediaCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub hero: Vec<MediaCard>,
    pub rotation_interval_seconds: u32,
    pub latest: Vec<MediaCard>,
    pub movies: Vec<MediaCard>,
    pub series: Vec<MediaCard>,
    pub categories: Vec<CategoryRow>,
}

/// Listing of one kind (`/movies`, `/series`).
#[derive(Debug, Clone, Serialize)]
pub struct KindPage {
    pub popular: Vec<MediaCard>,
    pub recent: Vec<MediaCard>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReleases {
    pub window_days: i64,
    pub movies: Vec<MediaCard>,
    pub series: Vec<MediaCard>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub items: Vec<MediaCard>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub items: Vec<MediaCard>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchPage {
    pub media: MediaCard,
    pub categories: Vec<Category>,
    /// Empty for movies.
    pub seasons: Vec<SeasonWithEpisodes>,
    pub rating: RatingSummary,
    /// Present only for a signed-in viewer.
    pub viewer: Option<ViewerState>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub categories: Vec<Category>,
    pub user: Option<Profile>,
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Hero, latest, per-kind and per-category rows of the landing page.
    async fn home(&self) -> Result<HomePage, CatalogError>;

    async fn movies(&self) -> Result<KindPage, CatalogError>;

    async fn series(&self) -> Result<KindPage, CatalogError>;

    /// Media published within the configured window.
    async fn new_releases(&self) -> Result<NewReleases, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no category has this slug.
    async fn category_page(&self, slug: &str) -> Result<CategoryPage, CatalogError>;

    /// A blank query yields an empty result.
    async fn search(&self, query: &str) -> Result<SearchResults, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the slug is unknown or the
    /// media isn't published.
    async fn watch_page(
        &self,
        slug: &str,
        viewer: Option<UserId>,
    ) -> Result<WatchPage, CatalogError>;

    async fn navigation(&self, viewer: Option<UserId>) -> Result<Navigation, CatalogError>;

    /// Static routes followed by one watch route per published media.
    async fn sitemap_entries(&self) -> Result<Vec<SitemapEntry>, CatalogError>;
}
