use domain::datetime::{format_display, format_record};
use domain::meeting::{MeetingDetail, MeetingSummary};
use domain::{attendees, transcripts, Id};
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MeetingResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,
    pub meeting_id: String,
    pub meeting_unique_id: String,
    pub meeting_title: String,
    pub meeting_start_time: String,
    pub created_at: String,
    pub updated_at: String,
    pub has_transcript: bool,
    pub has_attendees: bool,
    /// Same instant as `updatedAt`
    pub last_updated: String,
}

impl From<MeetingSummary> for MeetingResponse {
    fn from(summary: MeetingSummary) -> Self {
        let meeting = summary.meeting;
        let updated_at = format_record(&meeting.updated_at);

        Self {
            id: meeting.id,
            meeting_id: meeting.meeting_id,
            meeting_unique_id: meeting.meeting_unique_id,
            meeting_title: meeting.meeting_title,
            meeting_start_time: format_display(&meeting.meeting_start_time),
            created_at: format_record(&meeting.created_at),
            last_updated: updated_at.clone(),
            updated_at,
            has_transcript: summary.has_transcript,
            has_attendees: summary.has_attendees,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TranscriptResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,
    pub text: String,
    pub speaker: String,
    pub user_email: String,
    pub timestamp: String,
    pub created_at: String,
}

impl From<transcripts::Model> for TranscriptResponse {
    fn from(transcript: transcripts::Model) -> Self {
        Self {
            id: transcript.id,
            text: transcript.text,
            speaker: transcript.speaker,
            user_email: transcript.user_email,
            timestamp: format_display(&transcript.timestamp),
            created_at: format_record(&transcript.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttendeeResponse {
    #[schema(value_type = String, format = Uuid)]
    pub id: Id,
    pub participant_id: String,
    pub name: String,
    pub email: String,
    pub join_time: String,
    pub created_at: String,
}

impl From<attendees::Model> for AttendeeResponse {
    fn from(attendee: attendees::Model) -> Self {
        Self {
            id: attendee.id,
            participant_id: attendee.participant_id,
            name: attendee.name,
            email: attendee.email,
            join_time: format_display(&attendee.join_time),
            created_at: format_record(&attendee.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MeetingDetailResponse {
    pub meeting: MeetingResponse,
    /// Oldest segment first
    pub transcripts: Vec<TranscriptResponse>,
    /// Keyed by participant id
    pub attendees: BTreeMap<String, AttendeeResponse>,
}

impl From<MeetingDetail> for MeetingDetailResponse {
    fn from(detail: MeetingDetail) -> Self {
        Self {
            meeting: detail.summary.into(),
            transcripts: detail.transcripts.into_iter().map(Into::into).collect(),
            attendees: detail
                .attendees
                .into_iter()
                .map(|(participant_id, attendee)| (participant_id, attendee.into()))
                .collect(),
        }
    }
}
