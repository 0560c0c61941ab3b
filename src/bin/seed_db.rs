use domain::attendee::AttendeeInput;
use domain::submission::{self as SubmissionApi, MeetingFields, TranscriptSubmission};
use domain::transcript::{SegmentPayload, TranscriptPayload};
use log::*;
use migration::{Migrator, MigratorTrait};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

const DEMO_MEETING_UNIQUE_ID: &str = "demo-standup";

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to initialize logger: {e}");
    }

    info!("Seeding database [{}]...", config.database_url());

    let db = match service::init_database(&config).await {
        Ok(db) => Arc::new(db),
        Err(e) => {
            error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = service::ensure_schema(&db).await {
        error!("Failed to create database schema: {e}");
        std::process::exit(1);
    }

    if let Err(e) = Migrator::up(db.as_ref(), None).await {
        error!("Failed to apply schema migrations: {e}");
        std::process::exit(1);
    }

    let service_state = service::AppState::new(config, &db);

    match SubmissionApi::submit_transcript(service_state.db_conn_ref(), demo_submission()).await {
        Ok(receipt) => info!(
            "Seeded meeting {} with {} segments and {} attendees",
            receipt.meeting.meeting_unique_id, receipt.segments_appended, receipt.attendees_merged
        ),
        Err(e) => {
            error!("Failed to seed demo meeting: {e}");
            std::process::exit(1);
        }
    }
}

fn demo_submission() -> TranscriptSubmission {
    let segment = |text: &str, speaker: &str, timestamp: &str| SegmentPayload {
        text: Some(text.to_string()),
        speaker: Some(speaker.to_string()),
        timestamp: Some(timestamp.to_string()),
    };
    let attendee = |participant_id: &str, name: &str, email: &str| AttendeeInput {
        participant_id: Some(participant_id.to_string()),
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        join_time: Some("03/01/2024, 09:00:00 AM".to_string()),
        ..Default::default()
    };

    TranscriptSubmission {
        meeting: MeetingFields {
            meeting_id: Some("abc-defg-hij".to_string()),
            meeting_title: Some("Demo Standup".to_string()),
            meeting_unique_id: Some(DEMO_MEETING_UNIQUE_ID.to_string()),
            meeting_start_time: Some("03/01/2024, 09:00:00 AM".to_string()),
        },
        user_email: Some("host@example.com".to_string()),
        transcript: TranscriptPayload {
            segments: Some(vec![
                segment("Morning, everyone.", "Ann Lee", "03/01/2024, 09:00:12 AM"),
                segment("Morning! I'll start with yesterday's deploy.", "Bob Ray", "03/01/2024, 09:00:20 AM"),
                segment("Sounds good, go ahead.", "Ann Lee", "03/01/2024, 09:00:31 AM"),
            ]),
            ..Default::default()
        },
        attendees: Some(vec![
            attendee("spaces/demo/devices/1", "Ann Lee", "ann@example.com"),
            attendee("spaces/demo/devices/2", "Bob Ray", "bob@example.com"),
        ]),
    }
}
