//! Storage operations for the transcripts table.

use super::error::Error;
use super::query;
use entity::transcripts::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{entity::prelude::*, ActiveValue::Set, ConnectionTrait, QueryOrder};
use std::collections::HashMap;

/// Input for creating a transcript segment
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInput {
    pub text: String,
    pub speaker: String,
    pub user_email: String,
    pub timestamp: DateTime,
}

/// Appends a transcript segment to a meeting
pub async fn create(
    db: &impl ConnectionTrait,
    meeting_id: Id,
    input: SegmentInput,
) -> Result<Model, Error> {
    debug!(
        "Creating transcript segment for meeting: {meeting_id}, speaker: {}",
        input.speaker
    );

    let active_model = ActiveModel {
        id: Set(Id::new_v4()),
        meeting_id: Set(meeting_id),
        text: Set(input.text),
        speaker: Set(input.speaker),
        user_email: Set(input.user_email),
        timestamp: Set(input.timestamp),
        created_at: Set(chrono::Utc::now().into()),
    };

    Ok(active_model.insert(db).await?)
}

/// Appends multiple transcript segments to a meeting, in input order
pub async fn create_batch(
    db: &impl ConnectionTrait,
    meeting_id: Id,
    segments: Vec<SegmentInput>,
) -> Result<Vec<Model>, Error> {
    debug!(
        "Creating {} transcript segments for meeting: {meeting_id}",
        segments.len()
    );

    let mut created = Vec::with_capacity(segments.len());

    for segment in segments {
        created.push(create(db, meeting_id, segment).await?);
    }

    Ok(created)
}

/// Finds all transcript segments for a meeting, ordered by when they were spoken
pub async fn find_by_meeting_id(
    db: &impl ConnectionTrait,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::MeetingId.eq(meeting_id))
        .order_by_asc(Column::Timestamp)
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Number of transcript segments per meeting id
pub async fn count_by_meeting(db: &impl ConnectionTrait) -> Result<HashMap<Id, u64>, Error> {
    query::count_by_parent::<Entity>(db, Column::MeetingId).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meeting::{self, NewMeeting};
    use crate::test_utils;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> DateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn segment(text: &str, timestamp: DateTime) -> SegmentInput {
        SegmentInput {
            text: text.to_string(),
            speaker: "Bob".to_string(),
            user_email: "bob@example.com".to_string(),
            timestamp,
        }
    }

    async fn meeting_id(db: &DatabaseConnection, unique_id: &str) -> Result<Id, Error> {
        let meeting = meeting::insert_or_adopt(
            db,
            NewMeeting {
                meeting_id: "abc-defg-hij".to_string(),
                meeting_unique_id: unique_id.to_string(),
                meeting_title: "Standup".to_string(),
                meeting_start_time: at(9, 0),
            },
        )
        .await?;
        Ok(meeting.id)
    }

    #[tokio::test]
    async fn create_batch_appends_every_segment() -> Result<(), Error> {
        let db = test_utils::sqlite_connection().await?;
        let meeting_id = meeting_id(&db, "U1").await?;

        let created = create_batch(
            &db,
            meeting_id,
            vec![segment("hello", at(9, 1)), segment("hello", at(9, 1))],
        )
        .await?;

        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id, created[1].id);
        assert_eq!(find_by_meeting_id(&db, meeting_id).await?.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn find_by_meeting_id_orders_by_segment_timestamp() -> Result<(), Error> {
        let db = test_utils::sqlite_connection().await?;
        let meeting_id = meeting_id(&db, "U1").await?;

        create(&db, meeting_id, segment("third", at(9, 30))).await?;
        create(&db, meeting_id, segment("first", at(9, 10))).await?;
        create(&db, meeting_id, segment("second", at(9, 20))).await?;

        let texts: Vec<String> = find_by_meeting_id(&db, meeting_id)
            .await?
            .into_iter()
            .map(|t| t.text)
            .collect();

        assert_eq!(texts, vec!["first", "second", "third"]);

        Ok(())
    }

    #[tokio::test]
    async fn count_by_meeting_counts_only_meetings_with_segments() -> Result<(), Error> {
        let db = test_utils::sqlite_connection().await?;
        let busy = meeting_id(&db, "U1").await?;
        let quiet = meeting_id(&db, "U2").await?;

        create_batch(
            &db,
            busy,
            vec![segment("a", at(9, 1)), segment("b", at(9, 2))],
        )
        .await?;

        let counts = count_by_meeting(&db).await?;

        assert_eq!(counts.get(&busy), Some(&2));
        assert_eq!(counts.get(&quiet), None);

        Ok(())
    }
}
