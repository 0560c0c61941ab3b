use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::response::health::HealthResponse;
use crate::AppState;
use domain::{datetime, health as HealthApi};
use log::*;
use service::config::SERVICE_VERSION;

/// GET the service and database status
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up and the database is reachable", body = HealthResponse),
        (status = 500, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(app_state): State<AppState>) -> impl IntoResponse {
    let timestamp = datetime::now().format(datetime::RECORD_FORMAT).to_string();

    match HealthApi::check_database(app_state.db_conn_ref()).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse::healthy(SERVICE_VERSION, timestamp)),
        ),
        Err(err) => {
            error!("Health check failed: {err}");
            let reason = err
                .source
                .as_ref()
                .map(|source| source.to_string())
                .unwrap_or_else(|| err.to_string());

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse::unhealthy(reason, timestamp)),
            )
        }
    }
}
