//! Tag store: association writes, searches and frequency aggregation.

use std::collections::{BTreeSet, HashMap};

use curator_core::{Id, Medium, Tag, TagCount, normalize_tags};
use curator_error::{CuratorError, CuratorResult};
use curator_interface::{
    Page, SortOrder, TagCountFilter, TagCountSortField, TagFilter, TagSortField,
};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::{debug, instrument};

use crate::conditions::{tag_conditions_for, tag_count_conditions};
use crate::models::{CountRow, TagCountRow, TagRow};
use crate::ordering::{render_order_by, tag_count_order, tag_order};
use crate::predicate::render_where;
use crate::schema::tags;
use crate::sql::SqlFragment;

/// Rows per insert statement, keeping binds under the engine's limit.
const INSERT_CHUNK: usize = 250;

/// Ids per `IN` list when hydrating tags.
const LOOKUP_CHUNK: usize = 500;

fn unique_ids(medium_ids: &[Id]) -> Vec<Vec<u8>> {
    medium_ids
        .iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(Id::to_vec)
        .collect()
}

fn non_blank(tags: &[String]) -> Vec<&str> {
    tags.iter()
        .map(String::as_str)
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Attach every tag to every medium; existing pairs are left alone.
#[instrument(skip_all, fields(media = medium_ids.len(), tags = tags.len()))]
pub fn add_tags(
    conn: &mut SqliteConnection,
    medium_ids: &[Id],
    tags: &[String],
) -> CuratorResult<()> {
    let tags = normalize_tags(tags)?;
    let rows: Vec<TagRow> = unique_ids(medium_ids)
        .into_iter()
        .flat_map(|medium_id| {
            tags.iter().map(move |tag| TagRow {
                medium_id: medium_id.clone(),
                tag: tag.clone(),
            })
        })
        .collect();
    if rows.is_empty() {
        return Ok(());
    }

    let mut inserted = 0;
    for chunk in rows.chunks(INSERT_CHUNK) {
        inserted += diesel::insert_or_ignore_into(tags::table)
            .values(chunk)
            .execute(conn)?;
    }
    debug!(inserted, "Added tags");
    Ok(())
}

/// Detach `tags` from the media, or all their tags when `tags` is empty.
///
/// A non-empty list of only blank tags removes nothing.
#[instrument(skip_all, fields(media = medium_ids.len(), tags = tags.len()))]
pub fn remove_tags(
    conn: &mut SqliteConnection,
    medium_ids: &[Id],
    tags: &[String],
) -> CuratorResult<()> {
    let ids = unique_ids(medium_ids);
    if ids.is_empty() {
        return Ok(());
    }

    let removed = if tags.is_empty() {
        diesel::delete(tags::table.filter(tags::medium_id.eq_any(ids))).execute(conn)?
    } else {
        let wanted = non_blank(tags);
        if wanted.is_empty() {
            return Ok(());
        }
        diesel::delete(
            tags::table
                .filter(tags::medium_id.eq_any(ids))
                .filter(tags::tag.eq_any(wanted)),
        )
        .execute(conn)?
    };
    debug!(removed, "Removed tags");
    Ok(())
}

/// Replace each medium's tag set.
///
/// Runs as one transaction so readers never observe the empty set.
pub fn set_tags(
    conn: &mut SqliteConnection,
    medium_ids: &[Id],
    tags: &[String],
) -> CuratorResult<()> {
    conn.transaction::<_, CuratorError, _>(|conn| {
        remove_tags(conn, medium_ids, &[])?;
        add_tags(conn, medium_ids, tags)
    })
}

/// Remove tags from every medium.
#[instrument(skip_all, fields(tags = tags.len()))]
pub fn delete_tags(conn: &mut SqliteConnection, tags: &[String]) -> CuratorResult<()> {
    let wanted = non_blank(tags);
    if wanted.is_empty() {
        return Ok(());
    }
    let removed = diesel::delete(tags::table.filter(tags::tag.eq_any(wanted))).execute(conn)?;
    debug!(removed, "Deleted tags globally");
    Ok(())
}

/// Tag association rows matching `filter`.
pub fn search_tags(
    conn: &mut SqliteConnection,
    filter: &TagFilter,
    sort: TagSortField,
    order: SortOrder,
    page: Page,
) -> CuratorResult<Vec<Tag>> {
    let mut statement =
        SqlFragment::raw("SELECT tags.medium_id AS medium_id, tags.tag AS tag FROM tags");
    render_where(&tag_conditions_for(filter), &mut statement);
    render_order_by(&tag_order(sort, order), &mut statement);
    statement.push_page(page);

    statement
        .into_query()
        .load::<TagRow>(conn)?
        .into_iter()
        .map(TagRow::into_tag)
        .collect()
}

/// Number of tag association rows matching `filter`.
pub fn count_tags(conn: &mut SqliteConnection, filter: &TagFilter) -> CuratorResult<i64> {
    let mut statement = SqlFragment::raw("SELECT COUNT(tags.tag) AS count FROM tags");
    render_where(&tag_conditions_for(filter), &mut statement);
    let row: CountRow = statement.into_query().get_result(conn)?;
    Ok(row.count)
}

/// Attach sorted tag lists to `media`; media without tags get an empty list.
#[instrument(skip_all, fields(media = media.len()))]
pub fn populate_media_tags(
    conn: &mut SqliteConnection,
    media: &mut [Medium],
) -> CuratorResult<()> {
    let ids: Vec<Id> = media.iter().map(|medium| medium.id).collect();
    let ids = unique_ids(&ids);
    let mut by_medium: HashMap<Vec<u8>, Vec<String>> = HashMap::new();
    for chunk in ids.chunks(LOOKUP_CHUNK) {
        let rows = tags::table
            .filter(tags::medium_id.eq_any(chunk))
            .order((tags::medium_id.asc(), tags::tag.asc()))
            .select(TagRow::as_select())
            .load(conn)?;
        for row in rows {
            by_medium.entry(row.medium_id).or_default().push(row.tag);
        }
    }

    for medium in media.iter_mut() {
        medium.tags = by_medium
            .get(medium.id.as_bytes().as_slice())
            .cloned()
            .unwrap_or_default();
    }
    Ok(())
}

/// Tags with the number of rows carrying each.
pub fn search_tag_counts(
    conn: &mut SqliteConnection,
    filter: &TagCountFilter,
    sort: TagCountSortField,
    order: SortOrder,
    page: Page,
) -> CuratorResult<Vec<TagCount>> {
    let mut statement =
        SqlFragment::raw("SELECT tags.tag AS tag, COUNT(tags.tag) AS count FROM tags");
    render_where(&tag_count_conditions(filter), &mut statement);
    statement.push_sql(" GROUP BY tags.tag");
    render_order_by(&tag_count_order(sort, order), &mut statement);
    statement.push_page(page);

    Ok(statement
        .into_query()
        .load::<TagCountRow>(conn)?
        .into_iter()
        .map(TagCount::from)
        .collect())
}

/// Number of distinct tags matching `filter`.
pub fn count_unique_tags(
    conn: &mut SqliteConnection,
    filter: &TagCountFilter,
) -> CuratorResult<i64> {
    let mut statement = SqlFragment::raw("SELECT COUNT(DISTINCT tags.tag) AS count FROM tags");
    render_where(&tag_count_conditions(filter), &mut statement);
    let row: CountRow = statement.into_query().get_result(conn)?;
    Ok(row.count)
}
