//! Meeting identity resolution and the read side over stored meetings.

use crate::datetime;
use crate::error::Error;
use crate::{attendees, meetings::Model, transcripts};
use chrono::NaiveDate;
use entity_api::meeting::NewMeeting;
use log::*;
use sea_orm::ConnectionTrait;
use std::collections::BTreeMap;

/// Title used when a submission does not name its meeting.
pub const DEFAULT_TITLE: &str = "Unnamed Meeting";

/// How a submission identifies the meeting it belongs to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingRef {
    /// Provider meeting id (e.g. the Meet code). Stored, never used as a key.
    pub external_id: String,
    pub title: Option<String>,
    pub unique_id: Option<String>,
    pub start_time: Option<String>,
}

impl MeetingRef {
    pub fn title(&self) -> &str {
        non_blank(self.title.as_deref()).unwrap_or(DEFAULT_TITLE)
    }

    /// The natural key: the client-supplied unique id, or `{title}_{YYYY-MM-DD}`
    /// for `today`. Derived keys collide for equal titles on the same day.
    pub fn unique_id_on(&self, today: NaiveDate) -> String {
        match non_blank(self.unique_id.as_deref()) {
            Some(unique_id) => unique_id.to_string(),
            None => format!("{}_{}", self.title(), today.format("%Y-%m-%d")),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Finds the meeting `meeting` refers to, creating it on first reference.
///
/// Title and start time only matter when the meeting is created; an existing
/// meeting is returned as stored.
pub async fn resolve(db: &impl ConnectionTrait, meeting: &MeetingRef) -> Result<Model, Error> {
    let meeting_unique_id = meeting.unique_id_on(datetime::today());

    if let Some(existing) =
        entity_api::meeting::find_by_unique_id(db, &meeting_unique_id).await?
    {
        debug!("Found existing meeting {} for key {meeting_unique_id}", existing.id);
        return Ok(existing);
    }

    debug!("Creating meeting {meeting_unique_id}");

    let created = entity_api::meeting::insert_or_adopt(
        db,
        NewMeeting {
            meeting_id: meeting.external_id.clone(),
            meeting_unique_id,
            meeting_title: meeting.title().to_string(),
            meeting_start_time: datetime::normalize_field(
                "meeting start time",
                meeting.start_time.as_deref(),
            ),
        },
    )
    .await?;

    Ok(created)
}

/// A meeting plus whether anything has been recorded for it yet.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingSummary {
    pub meeting: Model,
    pub has_transcript: bool,
    pub has_attendees: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeetingDetail {
    pub summary: MeetingSummary,
    /// Ordered by segment timestamp, oldest first
    pub transcripts: Vec<transcripts::Model>,
    /// Keyed by participant id
    pub attendees: BTreeMap<String, attendees::Model>,
}

/// All meetings, most recently updated first.
pub async fn list_summaries(db: &impl ConnectionTrait) -> Result<Vec<MeetingSummary>, Error> {
    let meetings = entity_api::meeting::find_all_by_recency(db).await?;
    let transcript_counts = entity_api::transcript::count_by_meeting(db).await?;
    let attendee_counts = entity_api::attendee::count_by_meeting(db).await?;

    Ok(meetings
        .into_iter()
        .map(|meeting| MeetingSummary {
            has_transcript: transcript_counts.get(&meeting.id).is_some_and(|c| *c > 0),
            has_attendees: attendee_counts.get(&meeting.id).is_some_and(|c| *c > 0),
            meeting,
        })
        .collect())
}

/// The meeting with natural key `meeting_unique_id` and everything recorded for it.
pub async fn find_detail(
    db: &impl ConnectionTrait,
    meeting_unique_id: &str,
) -> Result<MeetingDetail, Error> {
    let meeting = entity_api::meeting::find_by_unique_id(db, meeting_unique_id)
        .await?
        .ok_or_else(|| {
            debug!("Meeting {meeting_unique_id} not found");
            Error::not_found()
        })?;

    let transcripts = entity_api::transcript::find_by_meeting_id(db, meeting.id).await?;

    // Later rows replace earlier ones should a participant ever appear twice.
    let attendees: BTreeMap<String, attendees::Model> =
        entity_api::attendee::find_by_meeting_id(db, meeting.id)
            .await?
            .into_iter()
            .map(|attendee| (attendee.participant_id.clone(), attendee))
            .collect();

    Ok(MeetingDetail {
        summary: MeetingSummary {
            has_transcript: !transcripts.is_empty(),
            has_attendees: !attendees.is_empty(),
            meeting,
        },
        transcripts,
        attendees,
    })
}
