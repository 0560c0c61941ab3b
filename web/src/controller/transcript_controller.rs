use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::extractors::json_body::JsonBody;
use crate::params::transcript::CreateParams;
use crate::response::SuccessResponse;
use crate::{AppState, Error};
use domain::submission as SubmissionApi;
use log::*;

/// POST save transcript segments (and optionally attendees) for a meeting
#[utoipa::path(
    post,
    path = "/api/transcripts",
    request_body = CreateParams,
    responses(
        (status = 200, description = "Transcript saved", body = SuccessResponse),
        (status = 400, description = "Invalid data format, or no transcript data provided"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    JsonBody(params): JsonBody<CreateParams>,
) -> Result<impl IntoResponse, Error> {
    debug!("POST save transcript for meeting: {:?}", params.meeting.meeting_id);

    let receipt = SubmissionApi::submit_transcript(app_state.db_conn_ref(), params.into()).await?;

    debug!(
        "Saved {} transcript segments to meeting: {}",
        receipt.segments_appended, receipt.meeting.meeting_unique_id
    );

    Ok((
        StatusCode::OK,
        Json(SuccessResponse::new("Transcript saved successfully")),
    ))
}
