use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::*;
use serde_json::json;

use domain::error::{
    DomainErrorKind, EntityErrorKind, Error as DomainError, InternalErrorKind, RequestErrorKind,
};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Every error body is `{"error": <message>}`.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0.error_kind {
            DomainErrorKind::Request(request_error_kind) => match request_error_kind {
                RequestErrorKind::InvalidPayload(reason) => {
                    debug!("Rejecting request: {reason:?}");
                    (StatusCode::BAD_REQUEST, reason.to_string())
                }
                RequestErrorKind::MissingAttendeeId => (
                    StatusCode::BAD_REQUEST,
                    "Attendee ID is required".to_string(),
                ),
            },
            DomainErrorKind::Internal(internal_error_kind) => match internal_error_kind {
                InternalErrorKind::Entity(EntityErrorKind::NotFound) => {
                    (StatusCode::NOT_FOUND, "Meeting not found".to_string())
                }
                InternalErrorKind::Entity(_) | InternalErrorKind::Other(_) => {
                    error!("Internal server error: {}", self.0);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
