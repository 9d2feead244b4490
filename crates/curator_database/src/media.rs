//! Media statements: the like-count join, search, aggregates and writes.

use curator_core::{Id, Medium, MediumUpdate};
use curator_error::{CollisionError, CuratorError, CuratorResult};
use curator_interface::{MediaFilter, MediaSortField, Page, SortOrder};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind as DieselErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use tracing::{debug, info, instrument};

use crate::conditions::{liked_by_user, media_conditions};
use crate::models::{CountRow, MediumChangeset, MediumRow, NewMediumRow, SumRow};
use crate::ordering::{OrderTerm, media_order, render_order_by};
use crate::predicate::{Column, CompareOp, Condition, Table, render_where};
use crate::random_order::RandomOrderStrategy;
use crate::schema::{likes, media, tags};
use crate::sql::SqlFragment;

const MEDIA_COLUMNS: &str = "media.id AS id, \
    media.upload_time AS upload_time, \
    media.creation_time AS creation_time, \
    media.touch_time AS touch_time, \
    media.uploader_remote_origin AS uploader_remote_origin, \
    media.uploader_id AS uploader_id, \
    media.owner_id AS owner_id, \
    media.status AS status, \
    media.protection AS protection, \
    media.searchability AS searchability, \
    media.group_bits AS group_bits, \
    media.mime AS mime, \
    media.size AS size, \
    media.data1 AS data1, \
    media.data2 AS data2, \
    media.data3 AS data3, \
    media.data4 AS data4, \
    media.data5 AS data5, \
    media.data6 AS data6, \
    media.focus AS focus";

/// A filtered media view joined with per-medium like counts.
///
/// Counts are global unless the filter names a `liked_by_user`, in which
/// case only that user's likes are counted and only media they liked are
/// kept.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    conditions: Vec<Condition>,
    liked_by: Option<Id>,
}

impl MediaQuery {
    /// View for `filter`.
    pub fn new(filter: &MediaFilter) -> Self {
        let mut conditions = media_conditions(filter);
        let liked_by = liked_by_user(filter);
        if let Some(user) = liked_by {
            conditions.push(Condition::in_subquery(
                Column::MediaId,
                Column::LikeMediumId,
                Table::Likes,
                vec![Condition::compare(
                    Column::LikeUserId,
                    CompareOp::Eq,
                    user.to_vec(),
                )],
                false,
            ));
        }
        Self {
            conditions,
            liked_by,
        }
    }

    /// The same view narrowed by one more condition.
    pub fn and(&self, condition: Condition) -> Self {
        let mut narrowed = self.clone();
        narrowed.conditions.push(condition);
        narrowed
    }

    fn push_from(&self, out: &mut SqlFragment) {
        out.push_sql(
            " FROM media LEFT OUTER JOIN (SELECT likes.medium_id AS medium_id, \
             COUNT(likes.id) AS like_count FROM likes",
        );
        if let Some(user) = self.liked_by {
            out.push_sql(" WHERE likes.user_id = ")
                .push_bind(user.to_vec());
        }
        out.push_sql(
            " GROUP BY likes.medium_id) AS like_counts ON like_counts.medium_id = media.id",
        );
        render_where(&self.conditions, out);
    }

    /// Rows of the view in `order`, windowed by `page`.
    pub fn select(&self, order: &[OrderTerm], page: Page) -> SqlFragment {
        let mut out = SqlFragment::raw(format!(
            "SELECT {}, {} AS like_count",
            MEDIA_COLUMNS,
            Column::LikeCount.sql()
        ));
        self.push_from(&mut out);
        render_order_by(order, &mut out);
        out.push_page(page);
        out
    }

    /// Number of rows in the view.
    pub fn count(&self) -> SqlFragment {
        let mut out = SqlFragment::raw("SELECT COUNT(media.id) AS count");
        self.push_from(&mut out);
        out
    }

    /// Sum of `size` over the view.
    pub fn total_size(&self) -> SqlFragment {
        let mut out = SqlFragment::raw("SELECT SUM(media.size) AS total");
        self.push_from(&mut out);
        out
    }
}

/// Run a media select and decode every row.
pub fn load_media(
    conn: &mut SqliteConnection,
    statement: SqlFragment,
) -> CuratorResult<Vec<Medium>> {
    load_rows(conn, statement)?
        .into_iter()
        .map(MediumRow::into_medium)
        .collect()
}

/// Run a media select without decoding.
pub fn load_rows(
    conn: &mut SqliteConnection,
    statement: SqlFragment,
) -> CuratorResult<Vec<MediumRow>> {
    Ok(statement.into_query().load::<MediumRow>(conn)?)
}

/// Insert `medium`, failing on an existing id.
///
/// The existence check is a fast path; the primary key is what actually
/// rejects a concurrent duplicate, and both surface as a collision.
#[instrument(skip(conn, medium), fields(id = %medium.id))]
pub fn insert_medium(conn: &mut SqliteConnection, medium: &Medium) -> CuratorResult<()> {
    conn.transaction::<_, CuratorError, _>(|conn| {
        let id = medium.id.to_vec();
        let exists: bool =
            diesel::select(diesel::dsl::exists(media::table.find(id))).get_result(conn)?;
        if exists {
            return Err(CollisionError::new("medium", medium.id.to_string()).into());
        }

        diesel::insert_into(media::table)
            .values(NewMediumRow::from(medium))
            .execute(conn)
            .map_err(|e| collision_or("medium", &medium.id, e))?;
        Ok(())
    })?;
    info!("Created medium");
    Ok(())
}

/// Map a unique-constraint violation to a collision.
pub fn collision_or(entity: &'static str, id: &Id, err: DieselError) -> CuratorError {
    match err {
        DieselError::DatabaseError(DieselErrorKind::UniqueViolation, _) => {
            CollisionError::new(entity, id.to_string()).into()
        }
        other => other.into(),
    }
}

/// Fetch one medium with its global like count.
pub fn find_medium(conn: &mut SqliteConnection, id: &Id) -> CuratorResult<Option<Medium>> {
    let query = MediaQuery::new(&MediaFilter::default()).and(Condition::compare(
        Column::MediaId,
        CompareOp::Eq,
        id.to_vec(),
    ));
    Ok(load_media(conn, query.select(&[], Page::all()))?.pop())
}

/// Apply `update` to the medium with `id`; a missing id is a no-op.
#[instrument(skip(conn, update), fields(id = %id))]
pub fn update_medium(
    conn: &mut SqliteConnection,
    id: &Id,
    update: MediumUpdate,
    now: i64,
) -> CuratorResult<()> {
    update.validate()?;
    let changeset = MediumChangeset::from_update(update, now);
    let updated = diesel::update(media::table.find(id.to_vec()))
        .set(&changeset)
        .execute(conn)?;
    debug!(updated, "Updated medium");
    Ok(())
}

/// Delete a medium with its tags and likes.
#[instrument(skip(conn), fields(id = %id))]
pub fn delete_medium(conn: &mut SqliteConnection, id: &Id) -> CuratorResult<()> {
    let bytes = id.to_vec();
    conn.transaction::<_, CuratorError, _>(|conn| {
        let tags_removed =
            diesel::delete(tags::table.filter(tags::medium_id.eq(&bytes))).execute(conn)?;
        let likes_removed =
            diesel::delete(likes::table.filter(likes::medium_id.eq(&bytes))).execute(conn)?;
        let media_removed = diesel::delete(media::table.find(&bytes)).execute(conn)?;
        info!(tags_removed, likes_removed, media_removed, "Deleted medium");
        Ok(())
    })
}

/// Media in the view, ordered and windowed.
pub fn search_media(
    conn: &mut SqliteConnection,
    filter: &MediaFilter,
    sort: &MediaSortField,
    order: SortOrder,
    page: Page,
    random: &dyn RandomOrderStrategy,
) -> CuratorResult<Vec<Medium>> {
    let terms = media_order(sort, order, random);
    load_media(conn, MediaQuery::new(filter).select(&terms, page))
}

/// Number of media in the view.
pub fn count_media(conn: &mut SqliteConnection, filter: &MediaFilter) -> CuratorResult<i64> {
    let row: CountRow = MediaQuery::new(filter)
        .count()
        .into_query()
        .get_result(conn)?;
    Ok(row.count)
}

/// Total size of media in the view; zero when empty.
pub fn total_size(conn: &mut SqliteConnection, filter: &MediaFilter) -> CuratorResult<i64> {
    let row: SumRow = MediaQuery::new(filter)
        .total_size()
        .into_query()
        .get_result(conn)?;
    Ok(row.total.unwrap_or(0))
}

/// Distinct mimes, sorted.
pub fn mimes(conn: &mut SqliteConnection) -> CuratorResult<Vec<String>> {
    Ok(media::table
        .select(media::mime)
        .distinct()
        .order(media::mime.asc())
        .load::<String>(conn)?)
}
