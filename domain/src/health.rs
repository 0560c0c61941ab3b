//! Liveness of the storage backend.

use crate::error::Error;
use log::*;
use sea_orm::DatabaseConnection;

/// Round-trips a trivial query to the database.
pub async fn check_database(db: &DatabaseConnection) -> Result<(), Error> {
    db.ping().await.map_err(|err| {
        warn!("Database health check failed: {err}");
        Error::unavailable(err)
    })
}
