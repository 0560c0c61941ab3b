//! The two write paths: transcript submissions and single-attendee submissions.
//!
//! Each submission runs in one transaction. A rejected submission leaves no
//! trace, including the meeting it would have created.

use crate::attendee::{self, AttendeeInput};
use crate::error::{Error, PayloadError};
use crate::meeting::{self, MeetingRef};
use crate::transcript::{self, TranscriptPayload};
use crate::{attendees, meetings};
use log::*;
use sea_orm::{DatabaseConnection, TransactionTrait};

/// Meeting fields shared by both submission kinds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingFields {
    pub meeting_id: Option<String>,
    pub meeting_title: Option<String>,
    pub meeting_unique_id: Option<String>,
    pub meeting_start_time: Option<String>,
}

impl MeetingFields {
    fn meeting_ref(&self) -> Result<MeetingRef, Error> {
        let external_id = self
            .meeting_id
            .clone()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::invalid_payload(PayloadError::MissingMeetingId))?;

        Ok(MeetingRef {
            external_id,
            title: self.meeting_title.clone(),
            unique_id: self.meeting_unique_id.clone(),
            start_time: self.meeting_start_time.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptSubmission {
    pub meeting: MeetingFields,
    pub user_email: Option<String>,
    pub transcript: TranscriptPayload,
    pub attendees: Option<Vec<AttendeeInput>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendeeSubmission {
    pub meeting: MeetingFields,
    pub attendee: Option<AttendeeInput>,
}

/// What a transcript submission wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub meeting: meetings::Model,
    pub segments_appended: usize,
    pub attendees_merged: usize,
}

/// Resolves the meeting, appends the transcript segments and merges any
/// attendees listed alongside them.
pub async fn submit_transcript(
    db: &DatabaseConnection,
    submission: TranscriptSubmission,
) -> Result<SubmissionReceipt, Error> {
    let meeting_ref = submission.meeting.meeting_ref()?;
    submission.transcript.ensure_present()?;
    let user_email = submission.user_email.unwrap_or_default();

    let txn = db.begin().await.map_err(Error::transaction)?;

    let meeting = meeting::resolve(&txn, &meeting_ref).await?;

    let segments_appended =
        transcript::append(&txn, meeting.id, &submission.transcript, &user_email).await?;

    let attendees_merged = match &submission.attendees {
        Some(attendees) => attendee::merge_batch(&txn, meeting.id, attendees).await?,
        None => 0,
    };

    entity_api::meeting::touch(&txn, meeting.id).await?;

    txn.commit().await.map_err(Error::transaction)?;

    info!(
        "Saved {segments_appended} segments and {attendees_merged} attendees for meeting {}",
        meeting.meeting_unique_id
    );

    Ok(SubmissionReceipt {
        meeting,
        segments_appended,
        attendees_merged,
    })
}

/// Resolves the meeting and merges one attendee into it.
pub async fn submit_attendee(
    db: &DatabaseConnection,
    submission: AttendeeSubmission,
) -> Result<attendees::Model, Error> {
    let meeting_ref = submission.meeting.meeting_ref()?;
    let attendee = submission
        .attendee
        .ok_or_else(|| Error::invalid_payload(PayloadError::MissingAttendee))?;
    if attendee.participant_id().is_none() {
        return Err(Error::missing_attendee_id());
    }

    let txn = db.begin().await.map_err(Error::transaction)?;

    let meeting = meeting::resolve(&txn, &meeting_ref).await?;
    let merged = attendee::merge(&txn, meeting.id, &attendee).await?;
    entity_api::meeting::touch(&txn, meeting.id).await?;

    txn.commit().await.map_err(Error::transaction)?;

    info!(
        "Saved attendee {} for meeting {}",
        merged.participant_id, meeting.meeting_unique_id
    );

    Ok(merged)
}
