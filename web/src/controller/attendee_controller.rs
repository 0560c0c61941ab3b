use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::extractors::json_body::JsonBody;
use crate::params::attendee::CreateParams;
use crate::response::SuccessResponse;
use crate::{AppState, Error};
use domain::submission as SubmissionApi;
use log::*;

/// POST save one attendee of a meeting
#[utoipa::path(
    post,
    path = "/api/attendees",
    request_body = CreateParams,
    responses(
        (status = 200, description = "Attendee saved", body = SuccessResponse),
        (status = 400, description = "Invalid data format, or attendee ID is required"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(params): JsonBody<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST save attendee for meeting: {:?}", params.meeting.meeting_id);

    let attendee = SubmissionApi::submit_attendee(app_state.db_conn_ref(), params.into()).await?;

    debug!("Saved attendee: {attendee:?}");

    Ok((
        StatusCode::OK,
        Json(SuccessResponse::new("Attendee saved successfully")),
    ))
}
