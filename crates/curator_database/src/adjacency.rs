//! Neighbor lookup inside a filtered, sorted media view.
//!
//! For column sorts the view is never materialized: the rows sharing the
//! reference's key are scanned in tie-break order, and any neighbor still
//! missing is fetched with a single-row query on the key column. The
//! seeded random order has no usable key comparison, so that view is
//! scanned in full.

use curator_core::{AdjacentMedia, Id, Medium};
use curator_error::CuratorResult;
use curator_interface::{MediaFilter, MediaSortField, Page, SortOrder};
use diesel::sqlite::SqliteConnection;
use tracing::{debug, instrument};

use crate::media::{MediaQuery, load_media, load_rows};
use crate::models::MediumRow;
use crate::ordering::{OrderTerm, media_order, media_tie_breaks};
use crate::predicate::{Column, CompareOp, Condition};
use crate::random_order::RandomOrderStrategy;
use crate::sql::SqlValue;

/// Find the media immediately before and after `medium` in the view.
#[instrument(skip_all, fields(id = %medium.id, sort = %sort, order = %order))]
pub fn adjacent_media(
    conn: &mut SqliteConnection,
    medium: &Medium,
    filter: &MediaFilter,
    sort: &MediaSortField,
    order: SortOrder,
    random: &dyn RandomOrderStrategy,
) -> CuratorResult<AdjacentMedia> {
    let view = MediaQuery::new(filter);

    let Some((column, target)) = sort_key(sort, medium) else {
        debug!("Scanning full random-ordered view");
        let terms = media_order(sort, order, random);
        let rows = load_rows(conn, view.select(&terms, Page::all()))?;
        return capture(&medium.id, rows);
    };
    let tie_breaks = media_tie_breaks(sort, order);

    let equal = view.and(Condition::compare(column, CompareOp::Eq, target.clone()));
    let rows = load_rows(conn, equal.select(&tie_breaks, Page::all()))?;
    debug!(batch = rows.len(), "Scanned equal-key batch");
    let mut adjacent = capture(&medium.id, rows)?;

    let mut view_order = vec![OrderTerm::column(column, order)];
    view_order.extend(tie_breaks);

    if adjacent.prev.is_none() {
        let before = match order {
            SortOrder::Asc => CompareOp::Lt,
            SortOrder::Desc => CompareOp::Gt,
        };
        let reversed: Vec<OrderTerm> = view_order.iter().map(OrderTerm::reversed).collect();
        let statement = view
            .and(Condition::compare(column, before, target.clone()))
            .select(&reversed, Page::new(0, 1));
        adjacent.prev = load_media(conn, statement)?.pop();
    }

    if adjacent.next.is_none() {
        let after = match order {
            SortOrder::Asc => CompareOp::Gt,
            SortOrder::Desc => CompareOp::Lt,
        };
        let statement = view
            .and(Condition::compare(column, after, target))
            .select(&view_order, Page::new(0, 1));
        adjacent.next = load_media(conn, statement)?.pop();
    }

    Ok(adjacent)
}

/// The sort column and the reference medium's value in it; `None` for
/// random order.
fn sort_key(sort: &MediaSortField, medium: &Medium) -> Option<(Column, SqlValue)> {
    let key = match sort {
        MediaSortField::CreationTime => (Column::CreationTime, SqlValue::Int(medium.creation_time)),
        MediaSortField::UploadTime => (Column::UploadTime, SqlValue::Int(medium.upload_time)),
        MediaSortField::TouchTime => (Column::TouchTime, SqlValue::Int(medium.touch_time)),
        MediaSortField::Size => (Column::Size, SqlValue::Int(medium.size)),
        MediaSortField::Mime => (Column::Mime, SqlValue::Text(medium.mime.clone())),
        MediaSortField::Id => (Column::MediaId, SqlValue::Blob(medium.id.to_vec())),
        MediaSortField::Data(slot) => (Column::Data(*slot), SqlValue::Int(slot.value_of(medium))),
        MediaSortField::Likes => (Column::LikeCount, SqlValue::Int(medium.like_count)),
        MediaSortField::Random(_) => return None,
    };
    Some(key)
}

/// Neighbors of `reference` within rows already in view order.
fn capture(reference: &Id, rows: Vec<MediumRow>) -> CuratorResult<AdjacentMedia> {
    let Some(position) = rows
        .iter()
        .position(|row| row.id[..] == reference.as_bytes()[..])
    else {
        return Ok(AdjacentMedia::default());
    };

    let mut rows = rows.into_iter();
    let prev = rows.by_ref().take(position).last();
    let next = rows.nth(1);

    Ok(AdjacentMedia {
        prev: prev.map(MediumRow::into_medium).transpose()?,
        next: next.map(MediumRow::into_medium).transpose()?,
    })
}
