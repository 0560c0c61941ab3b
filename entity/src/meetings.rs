//! SeaORM Entity for meetings table.
//! One row per natural meeting key, created lazily by the first submission.

use crate::Id;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "meetings")]
pub struct Model {
    #[serde(skip_deserializing)]
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Id,

    /// Meeting id reported by the client. Informational, not unique.
    pub meeting_id: String,

    /// Natural key: client supplied, or derived as `{title}_{YYYY-MM-DD}`
    #[sea_orm(unique)]
    pub meeting_unique_id: String,

    pub meeting_title: String,

    pub meeting_start_time: DateTime,

    #[serde(skip_deserializing)]
    pub created_at: DateTimeWithTimeZone,

    #[serde(skip_deserializing)]
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transcripts::Entity")]
    Transcripts,

    #[sea_orm(has_many = "super::attendees::Entity")]
    Attendees,
}

impl Related<super::transcripts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transcripts.def()
    }
}

impl Related<super::attendees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
