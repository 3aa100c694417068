use crate::domain::{CategoryId, MediaId, MediaKind, MediaStatus, now_timestamp};
use crate::entities::{media, media_categories};
use crate::models::media::{Media, MediaDraft, MediaFilter, MediaVariant};
use anyhow::{Context, Result};
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select, Set,
    TransactionTrait,
};
use std::collections::HashSet;

/// Criteria for the public catalog queries. Results are always published
/// and newest first.
#[derive(Debug, Clone, Default)]
pub struct PublishedQuery<'a> {
    pub kind: Option<MediaKind>,
    /// Only media created at or after this timestamp
    pub created_since: Option<&'a str>,
    pub category: Option<CategoryId>,
    pub limit: Option<u64>,
}

pub struct MediaRepository {
    conn: DatabaseConnection,
}

impl MediaRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub(super) fn map_model(model: media::Model) -> Result<Media> {
        let kind: MediaKind = model.kind.parse()?;
        let status: MediaStatus = model.status.parse()?;

        let variant = match kind {
            MediaKind::Movie => MediaVariant::Movie {
                embed_url: model.embed_url,
                duration: model.duration,
            },
            MediaKind::Series => MediaVariant::Series,
        };

        Ok(Media {
            id: MediaId::from(model.id),
            title: model.title,
            slug: model.slug,
            description: model.description,
            poster_url: model.poster_url,
            backdrop_url: model.backdrop_url,
            variant,
            year: model.year,
            rating: model.rating,
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    fn map_models(models: Vec<media::Model>) -> Result<Vec<Media>> {
        models.into_iter().map(Self::map_model).collect()
    }

    fn published(query: &PublishedQuery<'_>) -> Select<media::Entity> {
        let mut select = media::Entity::find()
            .filter(media::Column::Status.eq(MediaStatus::Published.as_str()));

        if let Some(kind) = query.kind {
            select = select.filter(media::Column::Kind.eq(kind.as_str()));
        }

        if let Some(since) = query.created_since {
            select = select.filter(media::Column::CreatedAt.gte(since));
        }

        if let Some(category) = query.category {
            select = select
                .join(JoinType::InnerJoin, media::Relation::MediaCategories.def())
                .filter(media_categories::Column::CategoryId.eq(category.value()));
        }

        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        select.order_by_desc(media::Column::CreatedAt)
    }

    pub async fn get(&self, id: MediaId) -> Result<Option<Media>> {
        let model = media::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query media by ID")?;

        model.map(Self::map_model).transpose()
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Media>> {
        let model = media::Entity::find()
            .filter(media::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query media by slug")?;

        model.map(Self::map_model).transpose()
    }

    pub async fn list_published(&self, query: &PublishedQuery<'_>) -> Result<Vec<Media>> {
        let models = Self::published(query)
            .all(&self.conn)
            .await
            .context("Failed to list published media")?;

        Self::map_models(models)
    }

    /// Case-insensitive substring match on title or description.
    pub async fn search_published(&self, term: &str) -> Result<Vec<Media>> {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        let condition = Expr::col(media::Column::SearchText)
            .like(LikeExpr::new(pattern).escape('\\'));

        let models = Self::published(&PublishedQuery::default())
            .filter(condition)
            .all(&self.conn)
            .await
            .context("Failed to search media")?;

        Self::map_models(models)
    }

    /// Every media regardless of status, newest first.
    pub async fn list_all(&self, filter: MediaFilter, limit: Option<u64>) -> Result<Vec<Media>> {
        let mut select = media::Entity::find();

        if let Some(kind) = filter.kind {
            select = select.filter(media::Column::Kind.eq(kind.as_str()));
        }

        if let Some(status) = filter.status {
            select = select.filter(media::Column::Status.eq(status.as_str()));
        }

        if let Some(limit) = limit {
            select = select.limit(limit);
        }

        let models = select
            .order_by_desc(media::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list media")?;

        Self::map_models(models)
    }

    pub async fn count_by_kind(&self, kind: MediaKind) -> Result<u64> {
        let count = media::Entity::find()
            .filter(media::Column::Kind.eq(kind.as_str()))
            .count(&self.conn)
            .await?;

        Ok(count)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Inserts the media row and its category links in one transaction.
    pub async fn create(&self, draft: &MediaDraft) -> Result<Media> {
        let id = MediaId::generate();
        let now = now_timestamp();
        let (embed_url, duration) = variant_columns(&draft.variant);

        let txn = self.conn.begin().await?;

        let model = media::ActiveModel {
            id: Set(id.value()),
            title: Set(draft.title.clone()),
            slug: Set(draft.slug.clone()),
            description: Set(draft.description.clone()),
            poster_url: Set(draft.poster_url.clone()),
            backdrop_url: Set(draft.backdrop_url.clone()),
            kind: Set(draft.variant.kind().as_str().to_string()),
            embed_url: Set(embed_url),
            year: Set(draft.year),
            rating: Set(draft.rating),
            duration: Set(duration),
            status: Set(draft.status.as_str().to_string()),
            search_text: Set(search_text(draft)),
            created_at: Set(now.clone()),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await
        .context("Failed to insert media")?;

        sync_categories(&txn, id, &draft.category_ids).await?;

        txn.commit().await?;

        Self::map_model(model)
    }

    /// Replaces every editable field and the category links atomically.
    /// Returns `None` when the media doesn't exist.
    pub async fn update(&self, id: MediaId, draft: &MediaDraft) -> Result<Option<Media>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = media::Entity::find_by_id(id.value()).one(&txn).await? else {
            return Ok(None);
        };

        let (embed_url, duration) = variant_columns(&draft.variant);

        let mut active: media::ActiveModel = existing.into();
        active.title = Set(draft.title.clone());
        active.slug = Set(draft.slug.clone());
        active.description = Set(draft.description.clone());
        active.poster_url = Set(draft.poster_url.clone());
        active.backdrop_url = Set(draft.backdrop_url.clone());
        active.kind = Set(draft.variant.kind().as_str().to_string());
        active.embed_url = Set(embed_url);
        active.year = Set(draft.year);
        active.rating = Set(draft.rating);
        active.duration = Set(duration);
        active.status = Set(draft.status.as_str().to_string());
        active.search_text = Set(search_text(draft));
        active.updated_at = Set(now_timestamp());

        let model = active
            .update(&txn)
            .await
            .context("Failed to update media")?;

        sync_categories(&txn, id, &draft.category_ids).await?;

        txn.commit().await?;

        Self::map_model(model).map(Some)
    }

    /// Seasons, episodes, links and user rows go with it through cascades.
    pub async fn delete(&self, id: MediaId) -> Result<bool> {
        let result = media::Entity::delete_by_id(id.value())
            .exec(&self.conn)
            .await
            .context("Failed to delete media")?;

        Ok(result.rows_affected > 0)
    }
}

/// Brings the links of `media_id` to exactly `wanted`, touching only the
/// rows that differ.
async fn sync_categories<C: ConnectionTrait>(
    db: &C,
    media_id: MediaId,
    wanted: &[CategoryId],
) -> Result<()> {
    let wanted: HashSet<_> = wanted.iter().map(CategoryId::value).collect();

    let current: HashSet<_> = media_categories::Entity::find()
        .filter(media_categories::Column::MediaId.eq(media_id.value()))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.category_id)
        .collect();

    let stale: Vec<_> = current.difference(&wanted).copied().collect();
    if !stale.is_empty() {
        media_categories::Entity::delete_many()
            .filter(media_categories::Column::MediaId.eq(media_id.value()))
            .filter(media_categories::Column::CategoryId.is_in(stale))
            .exec(db)
            .await
            .context("Failed to remove category links")?;
    }

    let missing: Vec<_> = wanted
        .difference(&current)
        .map(|category_id| media_categories::ActiveModel {
            media_id: Set(media_id.value()),
            category_id: Set(*category_id),
        })
        .collect();
    if !missing.is_empty() {
        media_categories::Entity::insert_many(missing)
            .exec(db)
            .await
            .context("Failed to add category links")?;
    }

    Ok(())
}

/// Series rows never keep movie-only columns.
fn variant_columns(variant: &MediaVariant) -> (Option<String>, Option<i32>) {
    match variant {
        MediaVariant::Movie {
            embed_url,
            duration,
        } => (embed_url.clone(), *duration),
        MediaVariant::Series => (None, None),
    }
}

/// SQLite's `LOWER()` only folds ASCII, so the folded copy is written here.
fn search_text(draft: &MediaDraft) -> String {
    let mut text = draft.title.to_lowercase();
    if let Some(description) = &draft.description {
        text.push('\n');
        text.push_str(&description.to_lowercase());
    }
    text
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
