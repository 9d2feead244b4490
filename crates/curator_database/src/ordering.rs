//! Deterministic orderings with tie-break chains.

use curator_interface::{LikeSortField, MediaSortField, SortOrder, TagCountSortField, TagSortField};

use crate::predicate::Column;
use crate::random_order::RandomOrderStrategy;
use crate::sql::SqlFragment;

/// One `ORDER BY` term.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTerm {
    pub expression: SqlFragment,
    pub order: SortOrder,
}

impl OrderTerm {
    pub fn column(column: Column, order: SortOrder) -> Self {
        Self {
            expression: SqlFragment::raw(column.sql()),
            order,
        }
    }

    /// The same expression in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            expression: self.expression.clone(),
            order: self.order.reverse(),
        }
    }
}

/// Append ` ORDER BY ...` for `terms`.
pub fn render_order_by(terms: &[OrderTerm], out: &mut SqlFragment) {
    if terms.is_empty() {
        return;
    }
    out.push_sql(" ORDER BY ");
    for (i, term) in terms.iter().enumerate() {
        if i > 0 {
            out.push_sql(", ");
        }
        out.append(term.expression.clone())
            .push_sql(" ")
            .push_sql(term.order.keyword());
    }
}

/// Column a media sort field orders by; `None` for the random order.
pub fn media_sort_column(field: &MediaSortField) -> Option<Column> {
    match field {
        MediaSortField::CreationTime => Some(Column::CreationTime),
        MediaSortField::UploadTime => Some(Column::UploadTime),
        MediaSortField::TouchTime => Some(Column::TouchTime),
        MediaSortField::Size => Some(Column::Size),
        MediaSortField::Mime => Some(Column::Mime),
        MediaSortField::Id => Some(Column::MediaId),
        MediaSortField::Data(slot) => Some(Column::Data(*slot)),
        MediaSortField::Likes => Some(Column::LikeCount),
        MediaSortField::Random(_) => None,
    }
}

/// Terms after the requested key: creation time then id, skipping any
/// the key already covers.
pub fn media_tie_breaks(field: &MediaSortField, order: SortOrder) -> Vec<OrderTerm> {
    match field {
        MediaSortField::Id => Vec::new(),
        MediaSortField::CreationTime => vec![OrderTerm::column(Column::MediaId, order)],
        _ => vec![
            OrderTerm::column(Column::CreationTime, order),
            OrderTerm::column(Column::MediaId, order),
        ],
    }
}

/// Full ordering for a media view.
pub fn media_order(
    field: &MediaSortField,
    order: SortOrder,
    random: &dyn RandomOrderStrategy,
) -> Vec<OrderTerm> {
    let key = match field {
        MediaSortField::Random(seed) => OrderTerm {
            expression: random.order_expression(seed, Column::MediaId.sql()),
            order,
        },
        other => match media_sort_column(other) {
            Some(column) => OrderTerm::column(column, order),
            None => OrderTerm::column(Column::CreationTime, order),
        },
    };
    let mut terms = vec![key];
    terms.extend(media_tie_breaks(field, order));
    terms
}

/// Ordering for tag association rows.
pub fn tag_order(field: TagSortField, order: SortOrder) -> Vec<OrderTerm> {
    match field {
        TagSortField::Tag => vec![
            OrderTerm::column(Column::Tag, order),
            OrderTerm::column(Column::TagMediumId, order),
        ],
        TagSortField::MediumId => vec![
            OrderTerm::column(Column::TagMediumId, order),
            OrderTerm::column(Column::Tag, order),
        ],
    }
}

/// Ordering for tag frequencies.
pub fn tag_count_order(field: TagCountSortField, order: SortOrder) -> Vec<OrderTerm> {
    match field {
        TagCountSortField::Tag => vec![OrderTerm::column(Column::Tag, order)],
        TagCountSortField::Count => vec![
            OrderTerm::column(Column::TagCount, order),
            OrderTerm::column(Column::Tag, order),
        ],
    }
}

/// Ordering for likes.
pub fn like_order(field: LikeSortField, order: SortOrder) -> Vec<OrderTerm> {
    let key = match field {
        LikeSortField::CreationTime => Column::LikeCreationTime,
        LikeSortField::Id => Column::LikeId,
        LikeSortField::MediumId => Column::LikeMediumId,
        LikeSortField::UserId => Column::LikeUserId,
    };
    let mut terms = vec![OrderTerm::column(key, order)];
    for tie_break in [Column::LikeCreationTime, Column::LikeId] {
        if tie_break != key {
            terms.push(OrderTerm::column(tie_break, order));
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_order::SyntheticRowKey;
    use curator_interface::DataSlot;

    fn rendered(terms: &[OrderTerm]) -> String {
        let mut out = SqlFragment::default();
        render_order_by(terms, &mut out);
        out.sql
    }

    #[test]
    fn default_chain_ends_in_id() {
        let terms = media_order(
            &MediaSortField::Data(DataSlot::Data1),
            SortOrder::Asc,
            &SyntheticRowKey::default(),
        );
        assert_eq!(
            rendered(&terms),
            " ORDER BY media.data1 ASC, media.creation_time ASC, media.id ASC"
        );
    }

    #[test]
    fn chain_skips_the_requested_key() {
        let random = SyntheticRowKey::default();
        assert_eq!(
            rendered(&media_order(&MediaSortField::CreationTime, SortOrder::Desc, &random)),
            " ORDER BY media.creation_time DESC, media.id DESC"
        );
        assert_eq!(
            rendered(&media_order(&MediaSortField::Id, SortOrder::Asc, &random)),
            " ORDER BY media.id ASC"
        );
    }

    #[test]
    fn likes_sort_on_aggregate() {
        let terms = media_order(
            &MediaSortField::Likes,
            SortOrder::Desc,
            &SyntheticRowKey::default(),
        );
        assert_eq!(
            rendered(&terms),
            concat!(
                " ORDER BY COALESCE(like_counts.like_count, 0) DESC,",
                " media.creation_time DESC, media.id DESC"
            )
        );
    }

    #[test]
    fn like_chain_does_not_repeat_key() {
        assert_eq!(
            rendered(&like_order(LikeSortField::Id, SortOrder::Asc)),
            " ORDER BY likes.id ASC, likes.creation_time ASC"
        );
        assert_eq!(
            rendered(&like_order(LikeSortField::UserId, SortOrder::Desc)),
            " ORDER BY likes.user_id DESC, likes.creation_time DESC, likes.id DESC"
        );
    }

    #[test]
    fn tag_counts_break_ties_on_tag() {
        assert_eq!(
            rendered(&tag_count_order(TagCountSortField::Count, SortOrder::Desc)),
            " ORDER BY COUNT(tags.tag) DESC, tags.tag DESC"
        );
    }
}
