//! Appending transcript segments to a meeting.
//!
//! Two payload shapes are accepted, checked in order: a list of segments
//! (`transcriptSegments`), or one flat `transcript` string with top-level
//! `speaker`/`timestamp`. Segments are never updated or deduplicated.

use crate::datetime;
use crate::error::{Error, PayloadError};
use crate::Id;
use entity_api::transcript::SegmentInput;
use log::*;
use sea_orm::ConnectionTrait;

/// Speaker stored for segments that do not name one.
pub const DEFAULT_SPEAKER: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPayload {
    pub text: Option<String>,
    pub speaker: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranscriptPayload {
    pub segments: Option<Vec<SegmentPayload>>,
    pub transcript: Option<String>,
    pub speaker: Option<String>,
    pub timestamp: Option<String>,
}

impl TranscriptPayload {
    /// Fails with `InvalidPayload` unless one of the two shapes is present.
    pub fn ensure_present(&self) -> Result<(), Error> {
        if self.segments.is_some() || self.transcript.is_some() {
            Ok(())
        } else {
            Err(Error::invalid_payload(PayloadError::NoTranscriptData))
        }
    }

    /// The rows this payload appends, with defaults applied.
    pub fn segment_inputs(&self, submitter_email: &str) -> Result<Vec<SegmentInput>, Error> {
        self.ensure_present()?;

        if let Some(segments) = &self.segments {
            return Ok(segments
                .iter()
                .map(|segment| {
                    segment_input(
                        segment.text.as_deref(),
                        segment.speaker.as_deref(),
                        segment.timestamp.as_deref(),
                        submitter_email,
                    )
                })
                .collect());
        }

        Ok(vec![segment_input(
            self.transcript.as_deref(),
            self.speaker.as_deref(),
            self.timestamp.as_deref(),
            submitter_email,
        )])
    }
}

fn segment_input(
    text: Option<&str>,
    speaker: Option<&str>,
    timestamp: Option<&str>,
    submitter_email: &str,
) -> SegmentInput {
    SegmentInput {
        text: text.unwrap_or_default().to_string(),
        speaker: speaker.unwrap_or(DEFAULT_SPEAKER).to_string(),
        user_email: submitter_email.to_string(),
        timestamp: datetime::normalize_field("segment timestamp", timestamp),
    }
}

/// Appends every segment in `payload` to the meeting. Returns how many rows were created.
pub async fn append(
    db: &impl ConnectionTrait,
    meeting_id: Id,
    payload: &TranscriptPayload,
    submitter_email: &str,
) -> Result<usize, Error> {
    let segments = payload.segment_inputs(submitter_email)?;

    let created = entity_api::transcript::create_batch(db, meeting_id, segments).await?;

    debug!("Appended {} transcript segments to meeting {meeting_id}", created.len());

    Ok(created.len())
}
