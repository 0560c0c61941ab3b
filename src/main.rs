use log::*;
use migration::{Migrator, MigratorTrait};
use service::{config::Config, logging::Logger, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!(
        "Starting meeting_capture {} [{}]",
        service::config::SERVICE_VERSION,
        config.runtime_env()
    );

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    info!("Applying pending schema migrations...");
    if let Err(e) = service::ensure_schema(&db).await {
        error!("Failed to create database schema: {e}");
        std::process::exit(1);
    }

    if let Err(e) = Migrator::up(db.as_ref(), None).await {
        error!("Failed to apply schema migrations: {e}");
        std::process::exit(1);
    }

    let app_state = AppState::new(config, &db);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server terminated with an error: {e}");
        std::process::exit(1);
    }

    info!("Server stopped");
}
