use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS meeting_capture;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO meeting_capture, public;")
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // CASCADE removes every table created in the schema
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS meeting_capture CASCADE;")
            .await?;

        Ok(())
    }
}
