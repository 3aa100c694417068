use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "media")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    /// "movie" or "series"
    pub kind: String,
    /// Movies only; NULL for series
    pub embed_url: Option<String>,
    pub year: Option<i32>,
    /// Editorial rating, 0-10
    pub rating: Option<f64>,
    /// Minutes. Movies only.
    pub duration: Option<i32>,
    /// "draft", "published" or "archived"
    pub status: String,
    /// Lowercased title and description, matched by catalog search
    pub search_text: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seasons::Entity")]
    Seasons,
    #[sea_orm(has_many = "super::media_categories::Entity")]
    MediaCategories,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::watch_history::Entity")]
    WatchHistory,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::media_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MediaCategories.def()
    }
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::watch_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchHistory.def()
    }
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::media_categories::Relation::Categories.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::media_categories::Relation::Media.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
