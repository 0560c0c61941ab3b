use crate::Error;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domain::error::{Error as DomainError, PayloadError};
use log::*;
use serde::de::DeserializeOwned;
use serde_json::json;

/// `axum::Json`, but a body that is not JSON or has the wrong shape is
/// answered with this service's `{"error": "Invalid data format"}` response.
/// Oversized bodies (413) and non-JSON content types (415) keep their status.
pub(crate) struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let status = rejection.status();
                warn!("Rejected request body ({status}): {}", rejection.body_text());

                match status {
                    StatusCode::PAYLOAD_TOO_LARGE | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                        Err((status, Json(json!({ "error": rejection.body_text() })))
                            .into_response())
                    }
                    _ => Err(
                        Error::from(DomainError::invalid_payload(PayloadError::Malformed))
                            .into_response(),
                    ),
                }
            }
        }
    }
}
