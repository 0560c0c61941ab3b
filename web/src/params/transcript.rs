use super::attendee::AttendeeParams;
use super::list_or_none;
use super::meeting::MeetingParams;
use domain::submission::TranscriptSubmission;
use domain::transcript::{SegmentPayload, TranscriptPayload};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct SegmentParams {
    pub text: Option<String>,
    pub speaker: Option<String>,
    pub timestamp: Option<String>,
}

/// A transcript submission. Either `transcriptSegments` or the flat
/// `transcript`/`speaker`/`timestamp` fields must be given; the list wins when
/// both are.
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = TranscriptCreateParams)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateParams {
    #[serde(flatten)]
    pub meeting: MeetingParams,
    pub user_email: Option<String>,
    /// Read as absent unless it is an array
    #[serde(default, deserialize_with = "list_or_none")]
    pub transcript_segments: Option<Vec<SegmentParams>>,
    pub transcript: Option<String>,
    pub speaker: Option<String>,
    pub timestamp: Option<String>,
    /// Attendees without a participant id are skipped. Ignored unless an array.
    #[serde(default, deserialize_with = "list_or_none")]
    pub attendees: Option<Vec<AttendeeParams>>,
}

impl From<CreateParams> for TranscriptSubmission {
    fn from(params: CreateParams) -> Self {
        TranscriptSubmission {
            meeting: params.meeting.into(),
            user_email: params.user_email,
            transcript: TranscriptPayload {
                segments: params.transcript_segments.map(|segments| {
                    segments
                        .into_iter()
                        .map(|segment| SegmentPayload {
                            text: segment.text,
                            speaker: segment.speaker,
                            timestamp: segment.timestamp,
                        })
                        .collect()
                }),
                transcript: params.transcript,
                speaker: params.speaker,
                timestamp: params.timestamp,
            },
            attendees: params
                .attendees
                .map(|attendees| attendees.into_iter().map(Into::into).collect()),
        }
    }
}
