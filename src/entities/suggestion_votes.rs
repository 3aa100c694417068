use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "suggestion_votes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub suggestion_id: Uuid,
    pub created_at: String,
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
    #[sea_orm(
        belongs_to = "super::content_suggestions::Entity",
        from = "Column::SuggestionId",
        to = "super::content_suggestions::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ContentSuggestions,
}

impl Related<super::content_suggestions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentSuggestions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
