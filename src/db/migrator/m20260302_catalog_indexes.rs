use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const UP: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_seasons_media_number ON seasons(media_id, season_number)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_episodes_season_number ON episodes(season_id, episode_number)",
    "CREATE INDEX IF NOT EXISTS idx_media_status_created ON media(status, created_at)",
    "CREATE INDEX IF NOT EXISTS idx_media_categories_category ON media_categories(category_id)",
    "CREATE INDEX IF NOT EXISTS idx_suggestions_status_votes ON content_suggestions(status, votes)",
];

const DOWN: &[&str] = &[
    "DROP INDEX IF EXISTS idx_suggestions_status_votes",
    "DROP INDEX IF EXISTS idx_media_categories_category",
    "DROP INDEX IF EXISTS idx_media_status_created",
    "DROP INDEX IF EXISTS idx_episodes_season_number",
    "DROP INDEX IF EXISTS idx_seasons_media_number",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for sql in UP {
            conn.execute_unprepared(sql).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for sql in DOWN {
            conn.execute_unprepared(sql).await?;
        }

        Ok(())
    }
}
