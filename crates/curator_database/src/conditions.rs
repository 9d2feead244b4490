//! Filter handlers: one per filter shape, each yielding conditions.
//!
//! Membership and enumeration groups drop values that do not parse. When
//! every supplied value fails, the group becomes [`Condition::Never`] so
//! that a malformed filter returns nothing rather than everything.

use curator_core::{Id, MediumProtection, MediumSearchability, MediumStatus, Moderation};
use curator_interface::{FilterValue, LikeFilter, MediaFilter, TagCountFilter, TagFilter};
use tracing::debug;

use crate::predicate::{Column, CompareOp, Condition, Table};
use crate::sql::SqlValue;

/// Conditions for a media search, excluding `liked_by_user`.
pub fn media_conditions(filter: &MediaFilter) -> Vec<Condition> {
    let mut conditions = Vec::new();

    conditions.extend(id_membership(&filter.ids, Column::MediaId));
    conditions.extend(membership(
        &filter.uploader_remote_origins,
        Column::UploaderRemoteOrigin,
        |value| value.parse_packed_address().map(SqlValue::Blob),
    ));
    conditions.extend(cutoffs(
        Column::UploadTime,
        filter.uploaded_before,
        filter.uploaded_after,
    ));
    conditions.extend(cutoffs(
        Column::CreationTime,
        filter.created_before,
        filter.created_after,
    ));
    conditions.extend(cutoffs(
        Column::TouchTime,
        filter.touched_before,
        filter.touched_after,
    ));
    conditions.extend(id_membership(&filter.uploader_ids, Column::UploaderId));
    conditions.extend(id_membership(&filter.owner_ids, Column::OwnerId));

    conditions.extend(moderation_conditions(
        &filter.with_statuses,
        &filter.without_statuses,
        &filter.with_protections,
        &filter.without_protections,
        &filter.with_searchabilities,
        &filter.without_searchabilities,
    ));

    if let Some(mask) = filter.group_bits {
        conditions.push(Condition::BitAnd {
            column: Column::GroupBits,
            mask: i64::from(mask.bits()),
        });
    }
    conditions.extend(string_membership(&filter.with_mimes, Column::Mime, false));
    conditions.extend(string_membership(&filter.without_mimes, Column::Mime, true));
    conditions.extend(cutoffs(Column::Size, filter.smaller_than, filter.larger_than));
    for (slot, less_than, more_than) in filter.data_cutoffs() {
        conditions.extend(cutoffs(Column::Data(slot), less_than, more_than));
    }

    if let Some(portrait) = filter.portrait {
        conditions.extend(orientation(portrait, CompareOp::Lt, CompareOp::Ge));
    }
    if let Some(landscape) = filter.landscape {
        conditions.extend(orientation(landscape, CompareOp::Gt, CompareOp::Le));
    }

    conditions.extend(tag_conditions(filter));
    conditions
}

/// The user whose likes scope the search, if the id parses.
pub fn liked_by_user(filter: &MediaFilter) -> Option<Id> {
    let value = filter.liked_by_user.as_ref()?;
    let user = value.parse_id();
    if user.is_none() {
        debug!(?value, "Ignoring unparseable liked_by_user");
    }
    user
}

/// Conditions for a tag association search.
pub fn tag_conditions_for(filter: &TagFilter) -> Vec<Condition> {
    let mut conditions = Vec::new();
    conditions.extend(id_membership(&filter.medium_ids, Column::TagMediumId));
    conditions.extend(any_like(&filter.tags));
    conditions
}

/// Conditions for tag frequencies.
///
/// Each moderation group scopes the counted rows to media matching it.
pub fn tag_count_conditions(filter: &TagCountFilter) -> Vec<Condition> {
    let mut conditions = Vec::new();
    conditions.extend(any_like(&filter.tags));
    for media_condition in moderation_conditions(
        &filter.with_statuses,
        &filter.without_statuses,
        &filter.with_protections,
        &filter.without_protections,
        &filter.with_searchabilities,
        &filter.without_searchabilities,
    ) {
        conditions.push(Condition::in_subquery(
            Column::TagMediumId,
            Column::MediaId,
            Table::Media,
            vec![media_condition],
            false,
        ));
    }
    conditions
}

/// Conditions for a like search.
pub fn like_conditions(filter: &LikeFilter) -> Vec<Condition> {
    let mut conditions = Vec::new();
    conditions.extend(id_membership(&filter.ids, Column::LikeId));
    conditions.extend(cutoffs(
        Column::LikeCreationTime,
        filter.created_before,
        filter.created_after,
    ));
    conditions.extend(id_membership(&filter.medium_ids, Column::LikeMediumId));
    conditions.extend(id_membership(&filter.user_ids, Column::LikeUserId));
    conditions
}

fn membership<F>(values: &[FilterValue], column: Column, parse: F) -> Option<Condition>
where
    F: Fn(&FilterValue) -> Option<SqlValue>,
{
    if values.is_empty() {
        return None;
    }
    let parsed: Vec<SqlValue> = values.iter().filter_map(parse).collect();
    if parsed.is_empty() {
        debug!(?column, "No membership value parsed, filter is unsatisfiable");
        return Some(Condition::Never);
    }
    Some(Condition::In {
        column,
        values: parsed,
        negated: false,
    })
}

fn id_membership(values: &[FilterValue], column: Column) -> Option<Condition> {
    membership(values, column, |value| {
        value.parse_id().map(|id| SqlValue::Blob(id.to_vec()))
    })
}

fn string_membership(values: &[String], column: Column, negated: bool) -> Option<Condition> {
    if values.is_empty() {
        return None;
    }
    Some(Condition::In {
        column,
        values: values.iter().map(|v| SqlValue::Text(v.clone())).collect(),
        negated,
    })
}

fn cutoffs(column: Column, below: Option<i64>, above: Option<i64>) -> Vec<Condition> {
    let mut conditions = Vec::new();
    if let Some(below) = below {
        conditions.push(Condition::compare(column, CompareOp::Lt, below));
    }
    if let Some(above) = above {
        conditions.push(Condition::compare(column, CompareOp::Gt, above));
    }
    conditions
}

/// `with_` values are OR-ed, `without_` values AND-ed; see module docs for
/// what happens when nothing parses.
fn enumeration<T: Moderation>(
    with: &[FilterValue],
    without: &[FilterValue],
    column: Column,
) -> Vec<Condition> {
    let mut conditions = Vec::new();
    for (values, negated) in [(with, false), (without, true)] {
        if values.is_empty() {
            continue;
        }
        let codes: Vec<SqlValue> = values
            .iter()
            .filter_map(FilterValue::parse_enum::<T>)
            .map(|member| SqlValue::from(member.code()))
            .collect();
        if codes.is_empty() {
            debug!(
                enumeration = T::ENUMERATION,
                negated, "No enumeration value parsed, filter is unsatisfiable"
            );
            conditions.push(Condition::Never);
        } else {
            conditions.push(Condition::In {
                column,
                values: codes,
                negated,
            });
        }
    }
    conditions
}

fn moderation_conditions(
    with_statuses: &[FilterValue],
    without_statuses: &[FilterValue],
    with_protections: &[FilterValue],
    without_protections: &[FilterValue],
    with_searchabilities: &[FilterValue],
    without_searchabilities: &[FilterValue],
) -> Vec<Condition> {
    let mut conditions =
        enumeration::<MediumStatus>(with_statuses, without_statuses, Column::Status);
    conditions.extend(enumeration::<MediumProtection>(
        with_protections,
        without_protections,
        Column::Protection,
    ));
    conditions.extend(enumeration::<MediumSearchability>(
        with_searchabilities,
        without_searchabilities,
        Column::Searchability,
    ));
    conditions
}

/// `wanted` selects the strict test; otherwise the loose opposite.
/// Portrait and landscape negations overlap where `data1 == data2`.
fn orientation(wanted: bool, strict: CompareOp, opposite: CompareOp) -> Vec<Condition> {
    let data1 = Column::Data(curator_interface::DataSlot::Data1);
    let data2 = Column::Data(curator_interface::DataSlot::Data2);
    if wanted {
        vec![
            Condition::compare(data1, CompareOp::Gt, 0i64),
            Condition::compare(data2, CompareOp::Gt, 0i64),
            Condition::columns(data1, strict, data2),
        ]
    } else {
        vec![Condition::columns(data1, opposite, data2)]
    }
}

fn any_like(patterns: &[String]) -> Option<Condition> {
    if patterns.is_empty() {
        return None;
    }
    Some(Condition::Any(
        patterns
            .iter()
            .map(|pattern| Condition::Like {
                column: Column::Tag,
                pattern: pattern.clone(),
                negated: false,
            })
            .collect(),
    ))
}

/// Each tag term becomes its own containment test, so `with_tags = [a, b]`
/// requires both.
fn tag_conditions(filter: &MediaFilter) -> Vec<Condition> {
    let exact = |tag: &String| Condition::compare(Column::Tag, CompareOp::Eq, tag.as_str());
    let like = |tag: &String| Condition::Like {
        column: Column::Tag,
        pattern: tag.clone(),
        negated: false,
    };

    let with = filter
        .with_tags
        .iter()
        .map(exact)
        .chain(filter.with_tags_like.iter().map(like))
        .map(|term| (term, false));
    let without = filter
        .without_tags
        .iter()
        .map(exact)
        .chain(filter.without_tags_like.iter().map(like))
        .map(|term| (term, true));

    with.chain(without)
        .map(|(term, negated)| {
            Condition::in_subquery(
                Column::MediaId,
                Column::TagMediumId,
                Table::Tags,
                vec![term],
                negated,
            )
        })
        .collect()
}
