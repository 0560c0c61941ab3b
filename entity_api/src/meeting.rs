//! Storage operations for the meetings table.

use super::error::Error;
use entity::meetings::{ActiveModel, Column, Entity, Model};
use entity::Id;
use log::*;
use sea_orm::{
    entity::prelude::*,
    sea_query::{Expr, OnConflict},
    ActiveValue::Set,
    ConnectionTrait, QueryOrder,
};

/// Values for a meeting row that is inserted only if its natural key is unknown.
#[derive(Debug, Clone)]
pub struct NewMeeting {
    pub meeting_id: String,
    pub meeting_unique_id: String,
    pub meeting_title: String,
    pub meeting_start_time: DateTime,
}

/// Inserts `new_meeting` and returns the row stored under its natural key.
///
/// The insert is `ON CONFLICT (meeting_unique_id) DO NOTHING` followed by a
/// re-query, so when another writer has already created the same key we adopt
/// its row unchanged instead of failing or duplicating it.
pub async fn insert_or_adopt(
    db: &impl ConnectionTrait,
    new_meeting: NewMeeting,
) -> Result<Model, Error> {
    debug!("New meeting to be inserted: {new_meeting:?}");

    let now = chrono::Utc::now();
    let meeting_unique_id = new_meeting.meeting_unique_id.clone();

    let active_model = ActiveModel {
        id: Set(Id::new_v4()),
        meeting_id: Set(new_meeting.meeting_id),
        meeting_unique_id: Set(new_meeting.meeting_unique_id),
        meeting_title: Set(new_meeting.meeting_title),
        meeting_start_time: Set(new_meeting.meeting_start_time),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    };

    let rows_inserted = Entity::insert(active_model)
        .on_conflict(
            OnConflict::column(Column::MeetingUniqueId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

    if rows_inserted == 0 {
        info!("Meeting {meeting_unique_id} already exists, adopting existing row");
    }

    find_by_unique_id(db, &meeting_unique_id)
        .await?
        .ok_or_else(Error::not_found)
}

pub async fn find_by_unique_id(
    db: &impl ConnectionTrait,
    meeting_unique_id: &str,
) -> Result<Option<Model>, Error> {
    Ok(Entity::find()
        .filter(Column::MeetingUniqueId.eq(meeting_unique_id))
        .one(db)
        .await?)
}

/// All meetings, most recently updated first.
pub async fn find_all_by_recency(db: &impl ConnectionTrait) -> Result<Vec<Model>, Error> {
    Ok(Entity::find()
        .order_by_desc(Column::UpdatedAt)
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await?)
}

/// Sets `updated_at` to now without touching any other column.
pub async fn touch(db: &impl ConnectionTrait, id: Id) -> Result<(), Error> {
    let now: DateTimeWithTimeZone = chrono::Utc::now().into();

    let result = Entity::update_many()
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        debug!("Meeting with id {id} not found");
        return Err(Error::not_found());
    }

    Ok(())
}
