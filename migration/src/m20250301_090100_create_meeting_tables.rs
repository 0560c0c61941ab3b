use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Meeting find-or-create upserts on meetings_meeting_unique_id_unique.
        let create_meetings_sql = r#"
            CREATE TABLE IF NOT EXISTS meeting_capture.meetings (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id VARCHAR(255) NOT NULL,
                meeting_unique_id VARCHAR(255) NOT NULL,
                meeting_title VARCHAR(255) NOT NULL,
                meeting_start_time TIMESTAMP NOT NULL DEFAULT NOW(),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                CONSTRAINT meetings_meeting_unique_id_unique UNIQUE(meeting_unique_id)
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_meetings_sql)
            .await?;

        let create_transcripts_sql = r#"
            CREATE TABLE IF NOT EXISTS meeting_capture.transcripts (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL
                    REFERENCES meeting_capture.meetings(id) ON DELETE CASCADE,
                text TEXT NOT NULL,
                speaker VARCHAR(255) NOT NULL DEFAULT 'Unknown',
                user_email VARCHAR(255) NOT NULL DEFAULT '',
                timestamp TIMESTAMP NOT NULL DEFAULT NOW(),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_transcripts_sql)
            .await?;

        let create_attendees_sql = r#"
            CREATE TABLE IF NOT EXISTS meeting_capture.attendees (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                meeting_id UUID NOT NULL
                    REFERENCES meeting_capture.meetings(id) ON DELETE CASCADE,
                participant_id VARCHAR(255) NOT NULL,
                name VARCHAR(255) NOT NULL,
                email VARCHAR(255) NOT NULL DEFAULT '',
                join_time TIMESTAMP NOT NULL DEFAULT NOW(),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                CONSTRAINT attendees_meeting_participant_unique UNIQUE(meeting_id, participant_id)
            )
        "#;

        manager
            .get_connection()
            .execute_unprepared(create_attendees_sql)
            .await?;

        // Meeting list is ordered by recency, transcripts by segment time
        manager
            .create_index(
                Index::create()
                    .name("idx_meetings_updated_at")
                    .table((Alias::new("meeting_capture"), Meetings::Table))
                    .col(Meetings::UpdatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transcripts_meeting_id_timestamp")
                    .table((Alias::new("meeting_capture"), Transcripts::Table))
                    .col(Transcripts::MeetingId)
                    .col(Transcripts::Timestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "DROP TABLE IF EXISTS meeting_capture.attendees, \
                 meeting_capture.transcripts, meeting_capture.meetings",
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Meetings {
    Table,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Transcripts {
    Table,
    MeetingId,
    Timestamp,
}
