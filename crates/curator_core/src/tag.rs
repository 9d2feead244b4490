//! Tag associations and frequency rows.

use curator_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

use crate::Id;

/// Longest tag string the catalog stores.
pub const MAX_TAG_LENGTH: usize = 16;

/// A tag attached to one medium.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_getters::Getters,
)]
pub struct Tag {
    /// Medium carrying the tag
    medium_id: Id,
    /// Tag text
    tag: String,
}

impl Tag {
    /// Create a tag association.
    pub fn new(medium_id: Id, tag: impl Into<String>) -> Self {
        Self {
            medium_id,
            tag: tag.into(),
        }
    }
}

/// How many media carry a tag.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct TagCount {
    /// Tag text
    tag: String,
    /// Number of association rows
    count: i64,
}

impl TagCount {
    /// Create a frequency row.
    pub fn new(tag: impl Into<String>, count: i64) -> Self {
        Self {
            tag: tag.into(),
            count,
        }
    }
}

/// Deduplicate, sort and bound-check a tag list.
///
/// Empty strings are skipped rather than rejected.
///
/// # Errors
///
/// Returns `TooLong` for a tag over [`MAX_TAG_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use curator_core::normalize_tags;
///
/// let tags = normalize_tags(["b", "a", "", "b"]).unwrap();
/// assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
/// ```
#[track_caller]
pub fn normalize_tags<I, S>(tags: I) -> Result<Vec<String>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut normalized = std::collections::BTreeSet::new();
    for tag in tags {
        let tag = tag.as_ref();
        if tag.is_empty() {
            continue;
        }
        let actual = tag.chars().count();
        if actual > MAX_TAG_LENGTH {
            return Err(ValidationError::new(ValidationErrorKind::TooLong {
                field: "tag",
                max: MAX_TAG_LENGTH,
                actual,
            }));
        }
        normalized.insert(tag.to_string());
    }
    Ok(normalized.into_iter().collect())
}
