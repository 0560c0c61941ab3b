use super::meeting::MeetingParams;
use domain::attendee::AttendeeInput;
use domain::submission::AttendeeSubmission;
use super::string_or_number;
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct AttendeeParams {
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = Option<String>)]
    pub participant_id: Option<String>,
    /// Older spelling of `participant_id`
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = Option<String>)]
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub join_time: Option<String>,
    /// Older spelling of `join_time`
    #[serde(rename = "joinTime")]
    pub join_time_legacy: Option<String>,
}

impl From<AttendeeParams> for AttendeeInput {
    fn from(params: AttendeeParams) -> Self {
        AttendeeInput {
            participant_id: params.participant_id,
            legacy_id: params.id,
            name: params.name,
            email: params.email,
            join_time: params.join_time,
            legacy_join_time: params.join_time_legacy,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = AttendeeCreateParams)]
pub(crate) struct CreateParams {
    #[serde(flatten)]
    pub meeting: MeetingParams,
    pub attendee: Option<AttendeeParams>,
}

impl From<CreateParams> for AttendeeSubmission {
    fn from(params: CreateParams) -> Self {
        AttendeeSubmission {
            meeting: params.meeting.into(),
            attendee: params.attendee.map(Into::into),
        }
    }
}
