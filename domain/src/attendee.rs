//! Merging attendee sightings into a meeting's roster.
//!
//! Clients have sent participant ids as `participant_id` or `id` and join
//! times as `join_time` or `joinTime`. Both spellings are accepted on every
//! submission path, the newer one winning when both are present.

use crate::datetime;
use crate::error::Error;
use crate::{attendees::Model, Id};
use entity_api::attendee::AttendeeUpsert;
use log::*;
use sea_orm::ConnectionTrait;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendeeInput {
    /// `participant_id`
    pub participant_id: Option<String>,
    /// `id`
    pub legacy_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    /// `join_time`
    pub join_time: Option<String>,
    /// `joinTime`
    pub legacy_join_time: Option<String>,
}

impl AttendeeInput {
    /// `participant_id` if given, else `id`. Empty ids count as missing.
    pub fn participant_id(&self) -> Option<&str> {
        match &self.participant_id {
            Some(participant_id) => Some(participant_id.as_str()),
            None => self.legacy_id.as_deref(),
        }
        .filter(|id| !id.is_empty())
    }

    pub fn join_time(&self) -> Option<&str> {
        self.join_time
            .as_deref()
            .or(self.legacy_join_time.as_deref())
    }

    fn to_upsert(&self) -> Option<AttendeeUpsert> {
        let participant_id = self.participant_id()?;

        Some(AttendeeUpsert {
            participant_id: participant_id.to_string(),
            name: reported(self.name.as_deref()),
            email: reported(self.email.as_deref()),
            join_time: datetime::normalize_field("join time", self.join_time()),
        })
    }
}

// An empty value is treated as not reported so it never blanks a stored one.
fn reported(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Merges one attendee into the meeting. Fails with `MissingAttendeeId` when
/// the input carries no participant id.
pub async fn merge(
    db: &impl ConnectionTrait,
    meeting_id: Id,
    input: &AttendeeInput,
) -> Result<Model, Error> {
    let upsert = input.to_upsert().ok_or_else(Error::missing_attendee_id)?;

    Ok(entity_api::attendee::upsert(db, meeting_id, upsert).await?)
}

/// Merges every attendee that has a participant id; the rest are skipped.
/// Returns how many were merged.
pub async fn merge_batch(
    db: &impl ConnectionTrait,
    meeting_id: Id,
    inputs: &[AttendeeInput],
) -> Result<usize, Error> {
    let mut merged = 0;

    for input in inputs {
        let Some(upsert) = input.to_upsert() else {
            warn!("Skipping attendee without a participant id for meeting {meeting_id}");
            continue;
        };

        entity_api::attendee::upsert(db, meeting_id, upsert).await?;
        merged += 1;
    }

    Ok(merged)
}
