//! `SeaORM` implementation of the `CatalogService` trait.

use crate::config::CatalogConfig;
use crate::db::{PublishedQuery, Store};
use crate::domain::trending::select_trending;
use crate::domain::{MediaKind, UserId, days_ago_timestamp};
use crate::models::interaction::{RatingSummary, ViewerState};
use crate::models::media::{Media, MediaCard, cards};
use crate::services::catalog_service::{
    CatalogError, CategoryPage, CatalogService, CategoryRow, HomePage, KindPage, Navigation,
    NewReleases, SearchResults, WatchPage,
};
use crate::services::sitemap::{SitemapEntry, static_entries};
use futures::future::try_join_all;
use std::cmp::Ordering;
use tracing::debug;

pub struct SeaOrmCatalogService {
    store: Store,
    config: CatalogConfig,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store, config: CatalogConfig) -> Self {
        Self { store, config }
    }

    async fn kind_page(&self, kind: MediaKind) -> Result<KindPage, CatalogError> {
        let items = self
            .store
            .list_published_media(&PublishedQuery {
                kind: Some(kind),
                ..PublishedQuery::default()
            })
            .await?;

        let total = items.len();
        let recent = items
            .iter()
            .take(usize::try_from(self.config.row_limit).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(KindPage {
            popular: cards(by_popularity(items)),
            recent: cards(recent),
            total,
        })
    }
}

/// Highest editorial rating first, unrated last; the incoming recency order
/// is kept for ties.
fn by_popularity(mut items: Vec<Media>) -> Vec<Media> {
    items.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    items
}

fn split_by_kind(items: Vec<Media>) -> (Vec<Media>, Vec<Media>) {
    items
        .into_iter()
        .partition(|media| media.kind() == MediaKind::Movie)
}

#[async_trait::async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn home(&self) -> Result<HomePage, CatalogError> {
        let everything = PublishedQuery::default();
        let (published, categories) = tokio::join!(
            self.store.list_published_media(&everything),
            self.store.list_categories()
        );
        let published = published?;
        let categories = categories?;

        let rows = try_join_all(categories.into_iter().map(|category| async move {
            let items = self
                .store
                .list_published_media(&PublishedQuery {
                    category: Some(category.id),
                    limit: Some(self.config.row_limit),
                    ..PublishedQuery::default()
                })
                .await?;

            Ok::<_, anyhow::Error>(CategoryRow {
                category,
                items: cards(items),
            })
        }))
        .await?;

        let row_limit = usize::try_from(self.config.row_limit).unwrap_or(usize::MAX);
        let hero = select_trending(
            &published,
            |media| media.rating,
            self.config.trending_min_rating,
            self.config.hero_limit,
        );
        let latest = published.iter().take(row_limit).cloned().collect();
        let (movies, series) = split_by_kind(published);

        Ok(HomePage {
            hero: cards(hero),
            rotation_interval_seconds: self.config.hero_rotation_seconds,
            latest: cards(latest),
            movies: cards(movies),
            series: cards(series),
            categories: rows,
        })
    }

    async fn movies(&self) -> Result<KindPage, CatalogError> {
        self.kind_page(MediaKind::Movie).await
    }

    async fn series(&self) -> Result<KindPage, CatalogError> {
        self.kind_page(MediaKind::Series).await
    }

    async fn new_releases(&self) -> Result<NewReleases, CatalogError> {
        let since = days_ago_timestamp(self.config.new_release_window_days);

        let items = self
            .store
            .list_published_media(&PublishedQuery {
                created_since: Some(&since),
                limit: Some(self.config.new_release_limit),
                ..PublishedQuery::default()
            })
            .await?;

        let total = items.len();
        let (movies, series) = split_by_kind(items);

        Ok(NewReleases {
            window_days: self.config.new_release_window_days,
            movies: cards(movies),
            series: cards(series),
            total,
        })
    }

    async fn category_page(&self, slug: &str) -> Result<CategoryPage, CatalogError> {
        let category = self
            .store
            .get_category_by_slug(slug)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Category '{slug}'")))?;

        let items = self
            .store
            .list_published_media(&PublishedQuery {
                category: Some(category.id),
                ..PublishedQuery::default()
            })
            .await?;

        Ok(CategoryPage {
            total: items.len(),
            category,
            items: cards(items),
        })
    }

    async fn search(&self, query: &str) -> Result<SearchResults, CatalogError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResults {
                query: String::new(),
                items: Vec::new(),
                total: 0,
            });
        }

        let items = self.store.search_published_media(query).await?;
        debug!(query, matches = items.len(), "Catalog search");

        Ok(SearchResults {
            query: query.to_string(),
            total: items.len(),
            items: cards(items),
        })
    }

    async fn watch_page(
        &self,
        slug: &str,
        viewer: Option<UserId>,
    ) -> Result<WatchPage, CatalogError> {
        let media = self
            .store
            .get_media_by_slug(slug)
            .await?
            .filter(|media| media.status.is_public())
            .ok_or_else(|| CatalogError::NotFound(format!("Media '{slug}'")))?;

        let media_id = media.id;
        let is_series = media.kind() == MediaKind::Series;

        let (seasons, categories, stats, viewer) = tokio::join!(
            async {
                if is_series {
                    self.store.list_seasons(media_id).await
                } else {
                    Ok(Vec::new())
                }
            },
            self.store.categories_for_media(media_id),
            self.store.rating_stats(media_id),
            async {
                let Some(user) = viewer else {
                    return Ok(None);
                };

                let (is_favorite, is_watched, user_rating) = tokio::join!(
                    self.store.is_favorite(user, media_id),
                    self.store.is_watched(user, media_id),
                    self.store.user_rating(user, media_id)
                );

                Ok::<_, anyhow::Error>(Some(ViewerState {
                    is_favorite: is_favorite?,
                    is_watched: is_watched?,
                    user_rating: user_rating?,
                }))
            }
        );

        let rating = RatingSummary::new(stats?, media.rating);

        Ok(WatchPage {
            media: MediaCard::from(media),
            categories: categories?,
            seasons: seasons?,
            rating,
            viewer: viewer?,
        })
    }

    async fn navigation(&self, viewer: Option<UserId>) -> Result<Navigation, CatalogError> {
        let (categories, user) = tokio::join!(self.store.list_categories(), async {
            match viewer {
                Some(id) => self.store.get_profile(id).await,
                None => Ok(None),
            }
        });

        Ok(Navigation {
            categories: categories?,
            user: user?,
        })
    }

    async fn sitemap_entries(&self) -> Result<Vec<SitemapEntry>, CatalogError> {
        let published = self
            .store
            .list_published_media(&PublishedQuery::default())
            .await?;

        let mut entries = static_entries();
        entries.extend(
            published
                .into_iter()
                .map(|media| SitemapEntry::watch(&media.slug, media.updated_at)),
        );

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MediaId, MediaStatus};
    use crate::models::media::MediaVariant;

    fn media(title: &str, rating: Option<f64>, variant: MediaVariant) -> Media {
        Media {
            id: MediaId::generate(),
            title: title.to_string(),
            slug: title.to_lowercase(),
            description: None,
            poster_url: None,
            backdrop_url: None,
            variant,
            year: None,
            rating,
            status: MediaStatus::Published,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn movie(title: &str, rating: Option<f64>) -> Media {
        media(
            title,
            rating,
            MediaVariant::Movie {
                embed_url: None,
                duration: None,
            },
        )
    }

    #[test]
    fn popularity_puts_unrated_last_and_keeps_recency_for_ties() {
        let ordered = by_popularity(vec![
            movie("a", None),
            movie("b", Some(6.0)),
            movie("c", Some(9.0)),
            movie("d", Some(6.0)),
        ]);

        let titles: Vec<_> = ordered.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "d", "a"]);
    }

    #[test]
    fn splits_movies_from_series() {
        let (movies, series) = split_by_kind(vec![
            movie("a", None),
            media("b", None, MediaVariant::Series),
            movie("c", None),
        ]);

        assert_eq!(movies.len(), 2);
        assert_eq!(series[0].title, "b");
    }
}
