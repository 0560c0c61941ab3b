use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthResponse {
    pub status: String,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(version: &str, timestamp: String) -> Self {
        Self {
            status: "healthy".to_string(),
            database: "connected".to_string(),
            version: Some(version.to_string()),
            error: None,
            timestamp,
        }
    }

    pub fn unhealthy(error: String, timestamp: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            database: "disconnected".to_string(),
            version: None,
            error: Some(error),
            timestamp,
        }
    }
}
