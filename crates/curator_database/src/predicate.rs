//! Typed boolean conditions rendered to SQL.
//!
//! Filters are translated into a flat list of [`Condition`]s that the
//! caller joins with `AND`. Column names come from a closed enum, so only
//! values ever reach the statement as binds.

use curator_interface::DataSlot;

use crate::sql::{SqlFragment, SqlValue};

/// Expression for a medium's like count once the aggregate is joined.
pub const LIKE_COUNT_EXPRESSION: &str = "COALESCE(like_counts.like_count, 0)";

/// A column, or aggregate usable like one, that conditions may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    MediaId,
    UploadTime,
    CreationTime,
    TouchTime,
    UploaderRemoteOrigin,
    UploaderId,
    OwnerId,
    Status,
    Protection,
    Searchability,
    GroupBits,
    Mime,
    Size,
    Data(DataSlot),
    LikeCount,
    TagMediumId,
    Tag,
    LikeId,
    LikeCreationTime,
    LikeMediumId,
    LikeUserId,
    TagCount,
}

impl Column {
    /// Qualified SQL expression for this column.
    pub fn sql(self) -> &'static str {
        match self {
            Column::MediaId => "media.id",
            Column::UploadTime => "media.upload_time",
            Column::CreationTime => "media.creation_time",
            Column::TouchTime => "media.touch_time",
            Column::UploaderRemoteOrigin => "media.uploader_remote_origin",
            Column::UploaderId => "media.uploader_id",
            Column::OwnerId => "media.owner_id",
            Column::Status => "media.status",
            Column::Protection => "media.protection",
            Column::Searchability => "media.searchability",
            Column::GroupBits => "media.group_bits",
            Column::Mime => "media.mime",
            Column::Size => "media.size",
            Column::Data(DataSlot::Data1) => "media.data1",
            Column::Data(DataSlot::Data2) => "media.data2",
            Column::Data(DataSlot::Data3) => "media.data3",
            Column::Data(DataSlot::Data4) => "media.data4",
            Column::Data(DataSlot::Data5) => "media.data5",
            Column::Data(DataSlot::Data6) => "media.data6",
            Column::LikeCount => LIKE_COUNT_EXPRESSION,
            Column::TagMediumId => "tags.medium_id",
            Column::Tag => "tags.tag",
            Column::LikeId => "likes.id",
            Column::LikeCreationTime => "likes.creation_time",
            Column::LikeMediumId => "likes.medium_id",
            Column::LikeUserId => "likes.user_id",
            Column::TagCount => "COUNT(tags.tag)",
        }
    }
}

/// Tables a sub-query may select from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Media,
    Tags,
    Likes,
}

impl Table {
    fn sql(self) -> &'static str {
        match self {
            Table::Media => "media",
            Table::Tags => "tags",
            Table::Likes => "likes",
        }
    }
}

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CompareOp {
    fn sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
        }
    }
}

/// `SELECT <column> FROM <table> WHERE <conditions>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Subquery {
    pub select: Column,
    pub from: Table,
    pub conditions: Vec<Condition>,
}

/// One boolean condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Matches nothing
    Never,
    /// `column op ?`
    Compare {
        column: Column,
        op: CompareOp,
        value: SqlValue,
    },
    /// `left op right`
    CompareColumns {
        left: Column,
        op: CompareOp,
        right: Column,
    },
    /// `column [NOT] IN (?, ...)`
    In {
        column: Column,
        values: Vec<SqlValue>,
        negated: bool,
    },
    /// `column [NOT] LIKE ? ESCAPE '\'`
    Like {
        column: Column,
        pattern: String,
        negated: bool,
    },
    /// `(column & ?) != 0`
    BitAnd { column: Column, mask: i64 },
    /// `column [NOT] IN (SELECT ...)`
    InSubquery {
        column: Column,
        subquery: Box<Subquery>,
        negated: bool,
    },
    /// Any member holds
    Any(Vec<Condition>),
    /// Every member holds
    All(Vec<Condition>),
}

impl Condition {
    /// `column op value`.
    pub fn compare(column: Column, op: CompareOp, value: impl Into<SqlValue>) -> Self {
        Condition::Compare {
            column,
            op,
            value: value.into(),
        }
    }

    /// `left op right`.
    pub fn columns(left: Column, op: CompareOp, right: Column) -> Self {
        Condition::CompareColumns { left, op, right }
    }

    /// `column IN (SELECT select FROM from WHERE conditions)`, or `NOT IN`.
    pub fn in_subquery(
        column: Column,
        select: Column,
        from: Table,
        conditions: Vec<Condition>,
        negated: bool,
    ) -> Self {
        Condition::InSubquery {
            column,
            subquery: Box::new(Subquery {
                select,
                from,
                conditions,
            }),
            negated,
        }
    }

    /// Render into `out`.
    pub fn render(&self, out: &mut SqlFragment) {
        match self {
            Condition::Never => {
                out.push_sql("1 = 0");
            }
            Condition::Compare { column, op, value } => {
                out.push_sql(column.sql())
                    .push_sql(" ")
                    .push_sql(op.sql())
                    .push_sql(" ")
                    .push_bind(value.clone());
            }
            Condition::CompareColumns { left, op, right } => {
                out.push_sql(left.sql())
                    .push_sql(" ")
                    .push_sql(op.sql())
                    .push_sql(" ")
                    .push_sql(right.sql());
            }
            Condition::In {
                column,
                values,
                negated,
            } => {
                if values.is_empty() {
                    out.push_sql(if *negated { "1 = 1" } else { "1 = 0" });
                    return;
                }
                out.push_sql(column.sql())
                    .push_sql(if *negated { " NOT IN (" } else { " IN (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_sql(", ");
                    }
                    out.push_bind(value.clone());
                }
                out.push_sql(")");
            }
            Condition::Like {
                column,
                pattern,
                negated,
            } => {
                out.push_sql(column.sql())
                    .push_sql(if *negated { " NOT LIKE " } else { " LIKE " })
                    .push_bind(pattern.as_str())
                    .push_sql(" ESCAPE '\\'");
            }
            Condition::BitAnd { column, mask } => {
                out.push_sql("(")
                    .push_sql(column.sql())
                    .push_sql(" & ")
                    .push_bind(*mask)
                    .push_sql(") != 0");
            }
            Condition::InSubquery {
                column,
                subquery,
                negated,
            } => {
                out.push_sql(column.sql())
                    .push_sql(if *negated {
                        " NOT IN (SELECT "
                    } else {
                        " IN (SELECT "
                    })
                    .push_sql(subquery.select.sql())
                    .push_sql(" FROM ")
                    .push_sql(subquery.from.sql());
                render_where(&subquery.conditions, out);
                out.push_sql(")");
            }
            Condition::Any(members) => render_joined(members, " OR ", "1 = 0", out),
            Condition::All(members) => render_joined(members, " AND ", "1 = 1", out),
        }
    }
}

fn render_joined(members: &[Condition], separator: &str, empty: &str, out: &mut SqlFragment) {
    if members.is_empty() {
        out.push_sql(empty);
        return;
    }
    out.push_sql("(");
    for (i, member) in members.iter().enumerate() {
        if i > 0 {
            out.push_sql(separator);
        }
        out.push_sql("(");
        member.render(out);
        out.push_sql(")");
    }
    out.push_sql(")");
}

/// Append ` WHERE a AND b ...`, or nothing when there are no conditions.
pub fn render_where(conditions: &[Condition], out: &mut SqlFragment) {
    if conditions.is_empty() {
        return;
    }
    out.push_sql(" WHERE ");
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            out.push_sql(" AND ");
        }
        out.push_sql("(");
        condition.render(out);
        out.push_sql(")");
    }
}
