//! In-memory SQLite databases for tests.
//!
//! Tables are generated from the entity definitions rather than the Postgres
//! migrations, plus the composite unique index the attendee upsert relies on.

use entity::{attendees, meetings, transcripts};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};

/// Opens a fresh, empty in-memory database with the meeting tables created.
///
/// The pool holds a single connection: every SQLite `:memory:` connection is
/// its own database.
pub async fn sqlite_connection() -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(opt).await?;

    create_table(&db, meetings::Entity).await?;
    create_table(&db, transcripts::Entity).await?;
    create_table(&db, attendees::Entity).await?;

    db.execute_unprepared(
        "CREATE UNIQUE INDEX attendees_meeting_participant_unique \
         ON attendees (meeting_id, participant_id)",
    )
    .await?;

    Ok(db)
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(entity)))
        .await?;
    Ok(())
}
