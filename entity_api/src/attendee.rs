//! Storage operations for the attendees table.

use super::error::Error;
use super::query;
use entity::attendees::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*, sea_query::OnConflict, ActiveValue::Set, ConnectionTrait, QueryOrder,
};
use std::collections::HashMap;

/// Name stored for an attendee first seen without one
pub const DEFAULT_NAME: &str = "Unknown";

/// An attendee sighting to merge into a meeting's roster.
///
/// `None` for `name` or `email` means "not reported": a new row gets the
/// default and an existing row keeps its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendeeUpsert {
    pub participant_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub join_time: DateTime,
}

/// Inserts the attendee, or updates the reported `name`/`email` of the
/// existing row for the same (meeting, participant id). `join_time` is only
/// ever written on insert.
///
/// Backed by `attendees_meeting_participant_unique`, so concurrent merges of
/// the same participant converge on a single row.
pub async fn upsert(
    db: &impl ConnectionTrait,
    meeting_id: Id,
    input: AttendeeUpsert,
) -> Result<Model, Error> {
    debug!("Upserting attendee {} for meeting: {meeting_id}", input.participant_id);

    let mut update_columns = Vec::with_capacity(2);
    if input.name.is_some() {
        update_columns.push(Column::Name);
    }
    if input.email.is_some() {
        update_columns.push(Column::Email);
    }

    let mut on_conflict = OnConflict::columns([Column::MeetingId, Column::ParticipantId]);
    if update_columns.is_empty() {
        on_conflict.do_nothing();
    } else {
        on_conflict.update_columns(update_columns);
    }

    let participant_id = input.participant_id.clone();

    let active_model = ActiveModel {
        id: Set(Id::new_v4()),
        meeting_id: Set(meeting_id),
        participant_id: Set(input.participant_id),
        name: Set(input.name.unwrap_or_else(|| DEFAULT_NAME.to_string())),
        email: Set(input.email.unwrap_or_default()),
        join_time: Set(input.join_time),
        created_at: Set(chrono::Utc::now().into()),
    };

    Entity::insert(active_model)
        .on_conflict(on_conflict)
        .exec_without_returning(db)
        .await?;

    find_by_participant(db, meeting_id, &participant_id)
        .await?
        .ok_or_else(Error::not_found)
}

pub async fn find_by_participant(
    db: &impl ConnectionTrait,
    meeting_id: Id,
    participant_id: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::MeetingId.eq(meeting_id))
        .filter(Column::ParticipantId.eq(participant_id))
        .one(db)
        .await?)
}

/// Finds a meeting's attendees in the order they were first seen
pub async fn find_by_meeting_id(
    db: &impl ConnectionTrait,
    meeting_id: Id,
) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::MeetingId.eq(meeting_id))
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Number of attendees per meeting id
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

    fn sighting(name: Option<&str>, email: Option<&str>, join_time: DateTime) -> AttendeeUpsert {
        AttendeeUpsert {
            participant_id: "p-1".to_string(),
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            join_time,
        }
    }

    async fn meeting_id(db: &DatabaseConnection) -> Result<Id, Error> {
        let meeting = meeting::insert_or_adopt(
            db,
            NewMeeting {
                meeting_id: "abc-defg-hij".to_string(),
                meeting_unique_id: "U1".to_string(),
                meeting_title: "Standup".to_string(),
                meeting_start_time: at(9, 0),
            },
        )
        .await?;
        Ok(meeting.id)
    }

    #[tokio::test]
    async fn upsert_inserts_with_defaults() -> Result<(), Error> {
        let db = test_utils::sqlite_connection().await?;
        let meeting_id = meeting_id(&db).await?;

        let attendee = upsert(&db, meeting_id, sighting(None, None, at(9, 5))).await?;

        assert_eq!(attendee.participant_id, "p-1");
        assert_eq!(attendee.name, DEFAULT_NAME);
        assert_eq!(attendee.email, "");
        assert_eq!(attendee.join_time, at(9, 5));

        Ok(())
    }

    #[tokio::test]
    async fn upsert_updates_name_and_keeps_join_time() -> Result<(), Error> {
        let db = test_utils::sqlite_connection().await?;
        let meeting_id = meeting_id(&db).await?;

        let first = upsert(
            &db,
            meeting_id,
            sighting(Some("Alice"), Some("alice@example.com"), at(9, 5)),
        )
        .await?;
        let second = upsert(&db, meeting_id, sighting(Some("Alice B."), None, at(9, 45))).await?;

        assert_eq!(second.id, first.id);
        assert_eq!(second.name, "Alice B.");
        assert_eq!(second.email, "alice@example.com");
        assert_eq!(second.join_time, at(9, 5));
        assert_eq!(find_by_meeting_id(&db, meeting_id).await?.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn upsert_without_reported_fields_leaves_row_untouched() -> Result<(), Error> {
        let db = test_utils::sqlite_connection().await?;
        let meeting_id = meeting_id(&db).await?;

        upsert(&db, meeting_id, sighting(Some("Alice"), None, at(9, 5))).await?;
        let unchanged = upsert(&db, meeting_id, sighting(None, None, at(10, 0))).await?;

        assert_eq!(unchanged.name, "Alice");
        assert_eq!(unchanged.join_time, at(9, 5));

        Ok(())
    }

    #[tokio::test]
    async fn count_by_meeting_counts_distinct_participants() -> Result<(), Error> {
        let db = test_utils::sqlite_connection().await?;
        let meeting_id = meeting_id(&db).await?;

        upsert(&db, meeting_id, sighting(Some("Alice"), None, at(9, 5))).await?;
        upsert(&db, meeting_id, sighting(Some("Alice"), None, at(9, 6))).await?;
        upsert(
            &db,
            meeting_id,
            AttendeeUpsert {
                participant_id: "p-2".to_string(),
                ..sighting(Some("Bob"), None, at(9, 7))
            },
        )
        .await?;

        assert_eq!(count_by_meeting(&db).await?.get(&meeting_id), Some(&2));

        Ok(())
    }
}
