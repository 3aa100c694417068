use crate::domain::{CategoryId, MediaId, now_timestamp};
use crate::entities::{categories, media_categories};
use crate::models::category::Category;
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: CategoryId::from(model.id),
            name: model.name,
            slug: model.slug,
            created_at: model.created_at,
        }
    }
}

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<Category>> {
        let rows = categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list categories")?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>> {
        let row = categories::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?;

        Ok(row.map(Category::from))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let row = categories::Entity::find()
            .filter(categories::Column::Slug.eq(slug))
            .one(&self.conn)
            .await
            .context("Failed to query category by slug")?;

        Ok(row.map(Category::from))
    }

    /// Number of the given ids that exist.
    pub async fn count_existing(&self, ids: &[CategoryId]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let count = categories::Entity::find()
            .filter(categories::Column::Id.is_in(ids.iter().map(CategoryId::value)))
            .count(&self.conn)
            .await?;

        Ok(count)
    }

    pub async fn create(&self, name: &str, slug: &str) -> Result<Category> {
        let model = categories::ActiveModel {
            id: Set(CategoryId::generate().value()),
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            created_at: Set(now_timestamp()),
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert category")?;

        Ok(Category::from(model))
    }

    pub async fn update(&self, id: CategoryId, name: &str, slug: &str) -> Result<Option<Category>> {
        let Some(existing) = categories::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await?
        else {
            return Ok(None);
        };

        let mut active: categories::ActiveModel = existing.into();
        active.name = Set(name.to_string());
        active.slug = Set(slug.to_string());
        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update category")?;

        Ok(Some(Category::from(model)))
    }

    pub async fn delete(&self, id: CategoryId) -> Result<bool> {
        let result = categories::Entity::delete_by_id(id.value())
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(categories::Entity::find().count(&self.conn).await?)
    }

    /// Category ids linked to a media.
    pub async fn ids_for_media(&self, media_id: MediaId) -> Result<Vec<CategoryId>> {
        let links = media_categories::Entity::find()
            .filter(media_categories::Column::MediaId.eq(media_id.value()))
            .all(&self.conn)
            .await?;

        Ok(links
            .into_iter()
            .map(|l| CategoryId::from(l.category_id))
            .collect())
    }

    /// Categories linked to a media, by name.
    pub async fn for_media(&self, media_id: MediaId) -> Result<Vec<Category>> {
        let rows = media_categories::Entity::find()
            .filter(media_categories::Column::MediaId.eq(media_id.value()))
            .find_also_related(categories::Entity)
            .order_by_asc(categories::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to load media categories")?;

        Ok(rows
            .into_iter()
            .filter_map(|(_, category)| category.map(Category::from))
            .collect())
    }
}
