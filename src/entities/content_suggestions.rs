use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "content_suggestions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    /// "movie" or "series"
    pub kind: String,
    pub description: Option<String>,
    pub year: Option<i32>,
    pub external_link: Option<String>,
    /// Kept equal to the number of `suggestion_votes` rows
    pub votes: i32,
    /// "pending", "approved", "rejected" or "added"
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::UserId",
        to = "super::profiles::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Profiles,
    #[sea_orm(has_many = "super::suggestion_votes::Entity")]
    SuggestionVotes,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl Related<super::suggestion_votes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SuggestionVotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
