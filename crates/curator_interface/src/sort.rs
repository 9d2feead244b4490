//! Sort fields and directions.
//!
//! Sort tokens are parsed leniently: anything unrecognized falls back to
//! the entity's default field instead of failing the query.

use crate::RandomSeed;

/// Sort direction. Anything but `asc` means descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, derive_more::Display)]
pub enum SortOrder {
    /// Smallest first
    #[display("asc")]
    Asc,
    /// Largest first
    #[default]
    #[display("desc")]
    Desc,
}

impl SortOrder {
    /// Parse a direction token.
    pub fn parse(token: &str) -> Self {
        if token == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// SQL keyword for this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// One of the six generic descriptor slots on a medium.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display,
)]
pub enum DataSlot {
    /// `data1`
    #[display("data1")]
    Data1,
    /// `data2`
    #[display("data2")]
    Data2,
    /// `data3`
    #[display("data3")]
    Data3,
    /// `data4`
    #[display("data4")]
    Data4,
    /// `data5`
    #[display("data5")]
    Data5,
    /// `data6`
    #[display("data6")]
    Data6,
}

impl DataSlot {
    /// All slots in column order.
    pub const ALL: [DataSlot; 6] = [
        DataSlot::Data1,
        DataSlot::Data2,
        DataSlot::Data3,
        DataSlot::Data4,
        DataSlot::Data5,
        DataSlot::Data6,
    ];

    /// Column name of this slot.
    pub fn column(self) -> &'static str {
        match self {
            DataSlot::Data1 => "data1",
            DataSlot::Data2 => "data2",
            DataSlot::Data3 => "data3",
            DataSlot::Data4 => "data4",
            DataSlot::Data5 => "data5",
            DataSlot::Data6 => "data6",
        }
    }

    /// Slot for a column name such as `data3`.
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.column() == name)
    }

    /// This slot's value on a medium.
    pub fn value_of(self, medium: &curator_core::Medium) -> i64 {
        match self {
            DataSlot::Data1 => medium.data1,
            DataSlot::Data2 => medium.data2,
            DataSlot::Data3 => medium.data3,
            DataSlot::Data4 => medium.data4,
            DataSlot::Data5 => medium.data5,
            DataSlot::Data6 => medium.data6,
        }
    }
}

/// How media are ordered.
///
/// # Examples
///
/// ```
/// use curator_interface::{DataSlot, MediaSortField};
///
/// assert_eq!(MediaSortField::parse("data2"), MediaSortField::Data(DataSlot::Data2));
/// assert_eq!(MediaSortField::parse("bogus"), MediaSortField::CreationTime);
/// assert!(matches!(MediaSortField::parse("random:AQI"), MediaSortField::Random(_)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum MediaSortField {
    /// `creation_time`
    #[default]
    CreationTime,
    /// `upload_time`
    UploadTime,
    /// `touch_time`
    TouchTime,
    /// `size`
    Size,
    /// `mime`
    Mime,
    /// `id`
    Id,
    /// `data1` through `data6`
    Data(DataSlot),
    /// Aggregated like count
    Likes,
    /// Reproducible pseudo-random order, `random:<seed>`
    Random(RandomSeed),
}

impl MediaSortField {
    /// Parse a sort token, falling back to creation time.
    pub fn parse(token: &str) -> Self {
        if let Some(seed) = token.strip_prefix("random:") {
            return match RandomSeed::from_token(seed) {
                Ok(seed) => MediaSortField::Random(seed),
                Err(e) => {
                    tracing::debug!(
                        token,
                        error = %e,
                        "Undecodable random seed, using default sort"
                    );
                    MediaSortField::default()
                }
            };
        }
        match token {
            "creation_time" => MediaSortField::CreationTime,
            "upload_time" => MediaSortField::UploadTime,
            "touch_time" => MediaSortField::TouchTime,
            "size" => MediaSortField::Size,
            "mime" => MediaSortField::Mime,
            "id" => MediaSortField::Id,
            "likes" => MediaSortField::Likes,
            other => match DataSlot::from_column(other) {
                Some(slot) => MediaSortField::Data(slot),
                None => {
                    if !other.is_empty() {
                        tracing::debug!(token, "Unrecognized sort field, using default sort");
                    }
                    MediaSortField::default()
                }
            },
        }
    }

    /// Whether this is the seeded random order.
    pub fn is_random(&self) -> bool {
        matches!(self, MediaSortField::Random(_))
    }
}

impl std::fmt::Display for MediaSortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaSortField::CreationTime => f.write_str("creation_time"),
            MediaSortField::UploadTime => f.write_str("upload_time"),
            MediaSortField::TouchTime => f.write_str("touch_time"),
            MediaSortField::Size => f.write_str("size"),
            MediaSortField::Mime => f.write_str("mime"),
            MediaSortField::Id => f.write_str("id"),
            MediaSortField::Data(slot) => write!(f, "{}", slot),
            MediaSortField::Likes => f.write_str("likes"),
            MediaSortField::Random(seed) => write!(f, "random:{}", seed),
        }
    }
}

/// How tag association rows are ordered; ties break on medium id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TagSortField {
    /// Tag text
    #[default]
    Tag,
    /// Medium id
    MediumId,
}

impl TagSortField {
    /// Parse a sort token, falling back to tag text.
    pub fn parse(token: &str) -> Self {
        match token {
            "medium_id" => TagSortField::MediumId,
            _ => TagSortField::Tag,
        }
    }
}

/// How tag frequency rows are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TagCountSortField {
    /// Tag text
    #[default]
    Tag,
    /// Frequency, ties broken by tag text
    Count,
}

impl TagCountSortField {
    /// Parse a sort token, falling back to tag text.
    pub fn parse(token: &str) -> Self {
        match token {
            "count" => TagCountSortField::Count,
            _ => TagCountSortField::Tag,
        }
    }
}

/// How likes are ordered; ties break on creation time then id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LikeSortField {
    /// Creation time
    #[default]
    CreationTime,
    /// Like id
    Id,
    /// Liked medium
    MediumId,
    /// Liking user
    UserId,
}

impl LikeSortField {
    /// Parse a sort token, falling back to creation time.
    pub fn parse(token: &str) -> Self {
        match token {
            "id" => LikeSortField::Id,
            "medium_id" => LikeSortField::MediumId,
            "user_id" => LikeSortField::UserId,
            _ => LikeSortField::CreationTime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_defaults_to_descending() {
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse(""), SortOrder::Desc);
        assert_eq!(SortOrder::parse("ASC"), SortOrder::Desc);
    }

    #[test]
    fn bad_random_seed_falls_back() {
        assert_eq!(
            MediaSortField::parse("random:"),
            MediaSortField::CreationTime
        );
        assert_eq!(
            MediaSortField::parse("random:!!"),
            MediaSortField::CreationTime
        );
    }

    #[test]
    fn tokens_round_trip_through_display() {
        for token in ["upload_time", "size", "mime", "id", "data6", "likes", "random:AQI"] {
            assert_eq!(MediaSortField::parse(token).to_string(), token);
        }
    }
}
