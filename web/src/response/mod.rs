//! Response DTOs. Domain timestamps are rendered as `MM/DD/YYYY, hh:mm:ss AM/PM`,
//! record timestamps as `YYYY-MM-DD HH:MM:SS`.

pub(crate) mod health;
pub(crate) mod meeting;

use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by a successful submission.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SuccessResponse {
    pub status: String,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }
}
