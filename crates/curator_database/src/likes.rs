//! Like store.

use curator_core::{Id, Like};
use curator_error::{CollisionError, CuratorError, CuratorResult};
use curator_interface::{LikeFilter, LikeSortField, Page, SortOrder};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info, instrument};

use crate::conditions::like_conditions;
use crate::media::collision_or;
use crate::models::{CountRow, LikeRow};
use crate::ordering::{like_order, render_order_by};
use crate::predicate::render_where;
use crate::schema::likes;
use crate::sql::SqlFragment;

/// Insert `like`, failing on an existing id.
#[instrument(skip_all, fields(id = %like.id()))]
pub fn insert_like(conn: &mut SqliteConnection, like: &Like) -> CuratorResult<()> {
    conn.transaction::<_, CuratorError, _>(|conn| {
        let exists: bool =
            diesel::select(diesel::dsl::exists(likes::table.find(like.id().to_vec())))
                .get_result(conn)?;
        if exists {
            return Err(CollisionError::new("like", like.id().to_string()).into());
        }

        diesel::insert_into(likes::table)
            .values(LikeRow::from(like))
            .execute(conn)
            .map_err(|e| collision_or("like", like.id(), e))?;
        Ok(())
    })?;
    info!("Created like");
    Ok(())
}

/// Fetch one like.
pub fn find_like(conn: &mut SqliteConnection, id: &Id) -> CuratorResult<Option<Like>> {
    likes::table
        .find(id.to_vec())
        .select(LikeRow::as_select())
        .first(conn)
        .optional()?
        .map(LikeRow::into_like)
        .transpose()
}

/// Likes matching `filter`, ordered and windowed.
pub fn search_likes(
    conn: &mut SqliteConnection,
    filter: &LikeFilter,
    sort: LikeSortField,
    order: SortOrder,
    page: Page,
) -> CuratorResult<Vec<Like>> {
    let mut statement = SqlFragment::raw(
        "SELECT likes.id AS id, likes.creation_time AS creation_time, \
         likes.medium_id AS medium_id, likes.user_id AS user_id FROM likes",
    );
    render_where(&like_conditions(filter), &mut statement);
    render_order_by(&like_order(sort, order), &mut statement);
    statement.push_page(page);

    statement
        .into_query()
        .load::<LikeRow>(conn)?
        .into_iter()
        .map(LikeRow::into_like)
        .collect()
}

/// Number of likes matching `filter`.
pub fn count_likes(conn: &mut SqliteConnection, filter: &LikeFilter) -> CuratorResult<i64> {
    let mut statement = SqlFragment::raw("SELECT COUNT(likes.id) AS count FROM likes");
    render_where(&like_conditions(filter), &mut statement);
    let row: CountRow = statement.into_query().get_result(conn)?;
    Ok(row.count)
}

/// Delete one like; a missing id is a no-op.
#[instrument(skip(conn), fields(id = %id))]
pub fn delete_like(conn: &mut SqliteConnection, id: &Id) -> CuratorResult<()> {
    let removed = diesel::delete(likes::table.find(id.to_vec())).execute(conn)?;
    debug!(removed, "Deleted like");
    Ok(())
}

/// Delete every like from a user.
#[instrument(skip(conn), fields(user_id = %user_id))]
pub fn delete_user_likes(conn: &mut SqliteConnection, user_id: &Id) -> CuratorResult<()> {
    let removed =
        diesel::delete(likes::table.filter(likes::user_id.eq(user_id.to_vec()))).execute(conn)?;
    info!(removed, "Deleted user likes");
    Ok(())
}
