use crate::error::Error;
use entity::Id;
use sea_orm::sea_query::Expr;
use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect};
use std::collections::HashMap;

/// Counts the rows of a child entity per parent id.
///
/// `parent_column` must hold the parent's `Id`. Parents without children are
/// absent from the returned map. One `GROUP BY` query regardless of how many
/// parents exist.
pub async fn count_by_parent<E>(
    db: &impl ConnectionTrait,
    parent_column: E::Column,
) -> Result<HashMap<Id, u64>, Error>
where
    E: EntityTrait,
{
    let rows: Vec<(Id, i64)> = E::find()
        .select_only()
        .column(parent_column)
        .column_as(Expr::col(parent_column).count(), "row_count")
        .group_by(parent_column)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(parent_id, row_count)| (parent_id, u64::try_from(row_count).unwrap_or(0)))
        .collect())
}
