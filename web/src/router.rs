use crate::controller::{
    attendee_controller, health_check_controller, meeting_controller, transcript_controller,
};
use crate::{params, response, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI spec. To be a part
// of the rendered spec, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "Meeting Capture API"
        ),
        paths(
            attendee_controller::create,
            health_check_controller::health_check,
            meeting_controller::index,
            meeting_controller::read,
            transcript_controller::create,
        ),
        components(
            schemas(
                params::attendee::AttendeeParams,
                params::attendee::CreateParams,
                params::meeting::MeetingParams,
                params::transcript::CreateParams,
                params::transcript::SegmentParams,
                response::SuccessResponse,
                response::health::HealthResponse,
                response::meeting::AttendeeResponse,
                response::meeting::MeetingDetailResponse,
                response::meeting::MeetingResponse,
                response::meeting::TranscriptResponse,
            )
        ),
        tags(
            (name = "meeting_capture", description = "Meeting transcript and attendee capture API")
        )
    )]
struct ApiDoc;

pub fn define_routes(app_state: AppState) -> Router {
    let max_body_bytes = app_state.config.max_body_bytes;

    Router::new()
        .merge(transcript_routes(app_state.clone()))
        .merge(attendee_routes(app_state.clone()))
        .merge(meeting_routes(app_state.clone()))
        .merge(health_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}

fn transcript_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/transcripts", post(transcript_controller::create))
        .with_state(app_state)
}

fn attendee_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/attendees", post(attendee_controller::create))
        .with_state(app_state)
}

fn meeting_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/meetings", get(meeting_controller::index))
        .route(
            "/api/meetings/{meeting_unique_id}",
            get(meeting_controller::read),
        )
        .with_state(app_state)
}

fn health_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check_controller::health_check))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use clap::Parser;
    use entity_api::test_utils;
    use serde_json::{json, Value};
    use service::config::Config;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_router() -> Router {
        router_with_args(&[]).await
    }

    async fn router_with_args(args: &[&str]) -> Router {
        let db = Arc::new(test_utils::sqlite_connection().await.unwrap());

        define_routes(AppState::new(config(args), &db))
    }

    fn config(args: &[&str]) -> Config {
        Config::parse_from(std::iter::once("meeting_capture").chain(args.iter().copied()))
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn transcript_then_detail() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            post_json(
                "/api/transcripts",
                json!({
                    "meetingId": "abc-defg-hij",
                    "meetingTitle": "Standup",
                    "meetingUniqueId": "U1",
                    "meetingStartTime": "03/01/2024, 09:00:00 AM",
                    "userEmail": "host@example.com",
                    "transcriptSegments": [
                        {"text": "hi", "speaker": "Ann", "timestamp": "03/01/2024, 09:00:05 AM"}
                    ],
                    "attendees": [
                        {"participant_id": "p-1", "name": "Ann", "join_time": "03/01/2024, 09:00:01 AM"}
                    ]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "success", "message": "Transcript saved successfully"})
        );

        let (status, body) = send(&router, get_request("/api/meetings/U1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meeting"]["meetingUniqueId"], "U1");
        assert_eq!(body["meeting"]["meetingTitle"], "Standup");
        assert_eq!(body["meeting"]["meetingStartTime"], "03/01/2024, 09:00:00 AM");
        assert_eq!(body["meeting"]["hasTranscript"], true);
        assert_eq!(body["meeting"]["hasAttendees"], true);
        assert_eq!(body["meeting"]["lastUpdated"], body["meeting"]["updatedAt"]);
        assert_eq!(body["transcripts"][0]["text"], "hi");
        assert_eq!(body["transcripts"][0]["speaker"], "Ann");
        assert_eq!(body["transcripts"][0]["userEmail"], "host@example.com");
        assert_eq!(body["transcripts"][0]["timestamp"], "03/01/2024, 09:00:05 AM");
        assert_eq!(body["attendees"]["p-1"]["name"], "Ann");
        assert_eq!(body["attendees"]["p-1"]["joinTime"], "03/01/2024, 09:00:01 AM");
    }

    #[tokio::test]
    async fn flat_transcript_is_listed() {
        let router = test_router().await;

        let (status, _) = send(
            &router,
            post_json(
                "/api/transcripts",
                json!({"meetingId": "abc-defg-hij", "meetingUniqueId": "U2", "transcript": "hello"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&router, get_request("/api/meetings")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["meetingUniqueId"], "U2");
        assert_eq!(body[0]["meetingTitle"], "Unnamed Meeting");
        assert_eq!(body[0]["hasTranscript"], true);
        assert_eq!(body[0]["hasAttendees"], false);
    }

    #[tokio::test]
    async fn transcript_without_data_is_rejected() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            post_json("/api/transcripts", json!({"meetingId": "abc-defg-hij"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No transcript data provided"}));
    }

    #[tokio::test]
    async fn transcript_without_meeting_id_is_invalid() {
        let router = test_router().await;

        let (status, body) =
            send(&router, post_json("/api/transcripts", json!({"transcript": "hi"}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid data format"}));
    }

    #[tokio::test]
    async fn malformed_body_is_invalid() {
        let router = test_router().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/transcripts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid data format"}));
    }

    #[tokio::test]
    async fn attendee_is_saved() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            post_json(
                "/api/attendees",
                json!({
                    "meetingId": "abc-defg-hij",
                    "meetingUniqueId": "U3",
                    "attendee": {"id": "p-7", "name": "Bob", "joinTime": "2024-03-01 09:02:00"}
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"status": "success", "message": "Attendee saved successfully"})
        );

        let (_, body) = send(&router, get_request("/api/meetings/U3")).await;
        assert_eq!(body["attendees"]["p-7"]["name"], "Bob");
        assert_eq!(body["attendees"]["p-7"]["joinTime"], "03/01/2024, 09:02:00 AM");
        assert_eq!(body["transcripts"], json!([]));
    }

    #[tokio::test]
    async fn missing_attendee_is_invalid() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            post_json("/api/attendees", json!({"meetingId": "abc-defg-hij"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid data format"}));
    }

    #[tokio::test]
    async fn attendee_without_id_is_rejected() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            post_json(
                "/api/attendees",
                json!({"meetingId": "abc-defg-hij", "attendee": {"name": "Bob"}}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Attendee ID is required"}));

        let (_, meetings) = send(&router, get_request("/api/meetings")).await;
        assert_eq!(meetings, json!([]));
    }

    #[tokio::test]
    async fn unknown_meeting_is_not_found() {
        let router = test_router().await;

        let (status, body) = send(&router, get_request("/api/meetings/nope")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Meeting not found"}));
    }

    #[tokio::test]
    async fn health_reports_connected_database() {
        let router = test_router().await;

        let (status, body) = send(&router, get_request("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
        assert_eq!(body["version"], "1.0.0");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let router = test_router().await;

        let (status, _) = send(&router, get_request("/api/nothing-here")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_array_segments_fall_back_to_flat_transcript() {
        let router = test_router().await;

        let (status, _) = send(
            &router,
            post_json(
                "/api/transcripts",
                json!({
                    "meetingId": "m",
                    "meetingUniqueId": "U4",
                    "transcriptSegments": "oops",
                    "transcript": "hi",
                    "attendees": "none"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&router, get_request("/api/meetings/U4")).await;
        assert_eq!(body["transcripts"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["transcripts"][0]["text"], "hi");
        assert_eq!(body["attendees"], json!({}));
    }

    #[tokio::test]
    async fn numeric_meeting_id_is_accepted() {
        let router = test_router().await;

        let (status, _) = send(
            &router,
            post_json(
                "/api/transcripts",
                json!({"meetingId": 123, "meetingUniqueId": "U5", "transcript": "hi"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&router, get_request("/api/meetings/U5")).await;
        assert_eq!(body["meeting"]["meetingId"], "123");
    }

    #[tokio::test]
    async fn transcript_batch_above_two_megabytes_is_saved() {
        let router = test_router().await;
        let segments: Vec<Value> = (0..30)
            .map(|i| json!({"text": "a".repeat(100_000), "speaker": format!("S{i}")}))
            .collect();

        let (status, _) = send(
            &router,
            post_json(
                "/api/transcripts",
                json!({"meetingId": "m", "meetingUniqueId": "U6", "transcriptSegments": segments}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&router, get_request("/api/meetings/U6")).await;
        assert_eq!(body["transcripts"].as_array().map(Vec::len), Some(30));
    }

    #[tokio::test]
    async fn body_over_configured_limit_is_payload_too_large() {
        let router = router_with_args(&["--max-body-bytes", "1024"]).await;

        let (status, body) = send(
            &router,
            post_json(
                "/api/transcripts",
                json!({"meetingId": "m", "transcript": "a".repeat(4096)}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body["error"].is_string());

        let (_, meetings) = send(&router, get_request("/api/meetings")).await;
        assert_eq!(meetings, json!([]));
    }

    #[tokio::test]
    async fn body_without_json_content_type_is_unsupported() {
        let router = test_router().await;
        let request = Request::builder()
            .method("POST")
            .uri("/api/transcripts")
            .body(Body::from(json!({"meetingId": "m", "transcript": "hi"}).to_string()))
            .unwrap();

        let (status, body) = send(&router, request).await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn health_reports_disconnected_database() {
        let db = test_utils::sqlite_connection().await.unwrap();
        db.clone().close().await.unwrap();
        let router = define_routes(AppState::new(config(&[]), &Arc::new(db)));

        let (status, body) = send(&router, get_request("/api/health")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "unhealthy");
        assert_eq!(body["database"], "disconnected");
        assert!(body["error"].is_string());
        assert!(body["timestamp"].is_string());
        assert!(body.get("version").is_none());
    }
}
