use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::response::meeting::{MeetingDetailResponse, MeetingResponse};
use crate::{AppState, Error};
use domain::meeting as MeetingApi;
use log::*;

/// GET all meetings, most recently updated first
#[utoipa::path(
    get,
    path = "/api/meetings",
    responses(
        (status = 200, description = "Successfully retrieved all meetings", body = [MeetingResponse]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn index(State(app_state): State<AppState>) -> Result<impl IntoResponse, Error> {
    debug!("GET all meetings");

    let meetings: Vec<MeetingResponse> = MeetingApi::list_summaries(app_state.db_conn_ref())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    debug!("Found {} meetings", meetings.len());

    Ok((StatusCode::OK, Json(meetings)))
}

/// GET a meeting with its transcript and attendees
#[utoipa::path(
    get,
    path = "/api/meetings/{meeting_unique_id}",
    params(
        ("meeting_unique_id" = String, Path, description = "Natural key of the meeting"),
    ),
    responses(
        (status = 200, description = "Successfully retrieved the meeting", body = MeetingDetailResponse),
        (status = 404, description = "Meeting not found"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn read(
    State(app_state): State<AppState>,
    Path(meeting_unique_id): Path<String>,
) -> Result<impl IntoResponse, Error> {
    debug!("GET meeting: {meeting_unique_id}");

    let detail = MeetingApi::find_detail(app_state.db_conn_ref(), &meeting_unique_id).await?;

    Ok((StatusCode::OK, Json(MeetingDetailResponse::from(detail))))
}
