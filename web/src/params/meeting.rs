use super::string_or_number;
use domain::submission::MeetingFields;
use serde::Deserialize;
use utoipa::ToSchema;

/// Identifies the meeting a submission belongs to.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MeetingParams {
    /// Provider meeting id, e.g. the Meet code. Required.
    #[serde(default, deserialize_with = "string_or_number")]
    #[schema(value_type = Option<String>)]
    pub meeting_id: Option<String>,
    pub meeting_title: Option<String>,
    /// Natural key of the meeting. Derived from the title and today's date when absent.
    pub meeting_unique_id: Option<String>,
    /// `MM/DD/YYYY, hh:mm:ss AM/PM` or `YYYY-MM-DD HH:MM:SS`
    pub meeting_start_time: Option<String>,
}

impl From<MeetingParams> for MeetingFields {
    fn from(params: MeetingParams) -> Self {
        MeetingFields {
            meeting_id: params.meeting_id,
            meeting_title: params.meeting_title,
            meeting_unique_id: params.meeting_unique_id,
            meeting_start_time: params.meeting_start_time,
        }
    }
}
