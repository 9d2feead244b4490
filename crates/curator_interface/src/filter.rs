//! Declarative filters for media, tags, tag counts and likes.
//!
//! Every list-valued key accepts either one value or a list. An empty
//! list is the same as an absent key. Unknown keys are ignored.

use curator_core::GroupBits;
use serde::{Deserialize, Serialize};

use crate::{FilterValue, one_or_many};

/// Filter over the media view.
///
/// Cutoffs are strict: `created_before = t` keeps rows with
/// `creation_time < t`.
///
/// # Examples
///
/// ```
/// use curator_interface::{FilterValue, MediaFilter};
///
/// let filter = MediaFilter::default()
///     .with_statuses(vec![FilterValue::from("ALLOWED")])
///     .created_after(1_000)
///     .portrait(true);
/// assert_eq!(filter.created_after, Some(1_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(strip_option, into)]
#[serde(default)]
pub struct MediaFilter {
    /// Medium ids
    #[serde(deserialize_with = "one_or_many")]
    pub ids: Vec<FilterValue>,
    /// Uploader network origins
    #[serde(deserialize_with = "one_or_many")]
    pub uploader_remote_origins: Vec<FilterValue>,
    /// Upload time upper bound
    pub uploaded_before: Option<i64>,
    /// Upload time lower bound
    pub uploaded_after: Option<i64>,
    /// Creation time upper bound
    pub created_before: Option<i64>,
    /// Creation time lower bound
    pub created_after: Option<i64>,
    /// Touch time upper bound
    pub touched_before: Option<i64>,
    /// Touch time lower bound
    pub touched_after: Option<i64>,
    /// Uploader ids
    #[serde(deserialize_with = "one_or_many")]
    pub uploader_ids: Vec<FilterValue>,
    /// Owner ids
    #[serde(deserialize_with = "one_or_many")]
    pub owner_ids: Vec<FilterValue>,
    /// Statuses to include, any may match
    #[serde(deserialize_with = "one_or_many")]
    pub with_statuses: Vec<FilterValue>,
    /// Statuses to exclude
    #[serde(deserialize_with = "one_or_many")]
    pub without_statuses: Vec<FilterValue>,
    /// Protections to include
    #[serde(deserialize_with = "one_or_many")]
    pub with_protections: Vec<FilterValue>,
    /// Protections to exclude
    #[serde(deserialize_with = "one_or_many")]
    pub without_protections: Vec<FilterValue>,
    /// Searchabilities to include
    #[serde(deserialize_with = "one_or_many")]
    pub with_searchabilities: Vec<FilterValue>,
    /// Searchabilities to exclude
    #[serde(deserialize_with = "one_or_many")]
    pub without_searchabilities: Vec<FilterValue>,
    /// Mask that must share a bit with the medium's group bits
    pub group_bits: Option<GroupBits>,
    /// Exact mimes to include
    #[serde(deserialize_with = "one_or_many")]
    pub with_mimes: Vec<String>,
    /// Exact mimes to exclude
    #[serde(deserialize_with = "one_or_many")]
    pub without_mimes: Vec<String>,
    /// Size upper bound
    pub smaller_than: Option<i64>,
    /// Size lower bound
    pub larger_than: Option<i64>,
    /// `data1` upper bound
    pub data1_less_than: Option<i64>,
    /// `data1` lower bound
    pub data1_more_than: Option<i64>,
    /// `data2` upper bound
    pub data2_less_than: Option<i64>,
    /// `data2` lower bound
    pub data2_more_than: Option<i64>,
    /// `data3` upper bound
    pub data3_less_than: Option<i64>,
    /// `data3` lower bound
    pub data3_more_than: Option<i64>,
    /// `data4` upper bound
    pub data4_less_than: Option<i64>,
    /// `data4` lower bound
    pub data4_more_than: Option<i64>,
    /// `data5` upper bound
    pub data5_less_than: Option<i64>,
    /// `data5` lower bound
    pub data5_more_than: Option<i64>,
    /// `data6` upper bound
    pub data6_less_than: Option<i64>,
    /// `data6` lower bound
    pub data6_more_than: Option<i64>,
    /// Taller than wide (`true`) or not (`false`)
    pub portrait: Option<bool>,
    /// Wider than tall (`true`) or not (`false`)
    pub landscape: Option<bool>,
    /// Tags every result must carry
    #[serde(deserialize_with = "one_or_many")]
    pub with_tags: Vec<String>,
    /// Tags no result may carry
    #[serde(deserialize_with = "one_or_many")]
    pub without_tags: Vec<String>,
    /// Tag patterns every result must match, backslash escapes
    #[serde(deserialize_with = "one_or_many")]
    pub with_tags_like: Vec<String>,
    /// Tag patterns no result may match
    #[serde(deserialize_with = "one_or_many")]
    pub without_tags_like: Vec<String>,
    /// Restrict to media liked by this user and count only their likes
    pub liked_by_user: Option<FilterValue>,
}

impl MediaFilter {
    /// Upper and lower bounds configured for each descriptor slot.
    pub fn data_cutoffs(&self) -> [(crate::DataSlot, Option<i64>, Option<i64>); 6] {
        use crate::DataSlot::*;
        [
            (Data1, self.data1_less_than, self.data1_more_than),
            (Data2, self.data2_less_than, self.data2_more_than),
            (Data3, self.data3_less_than, self.data3_more_than),
            (Data4, self.data4_less_than, self.data4_more_than),
            (Data5, self.data5_less_than, self.data5_more_than),
            (Data6, self.data6_less_than, self.data6_more_than),
        ]
    }
}

/// Filter over tag association rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(strip_option, into)]
#[serde(default)]
pub struct TagFilter {
    /// Media whose tags are wanted
    #[serde(deserialize_with = "one_or_many")]
    pub medium_ids: Vec<FilterValue>,
    /// Tag patterns, any may match
    #[serde(deserialize_with = "one_or_many")]
    pub tags: Vec<String>,
}

/// Filter over tag frequencies.
///
/// Moderation keys scope the counted rows to media matching them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(strip_option, into)]
#[serde(default)]
pub struct TagCountFilter {
    /// Tag patterns, any may match
    #[serde(deserialize_with = "one_or_many")]
    pub tags: Vec<String>,
    /// Statuses of media to count
    #[serde(deserialize_with = "one_or_many")]
    pub with_statuses: Vec<FilterValue>,
    /// Statuses of media to skip
    #[serde(deserialize_with = "one_or_many")]
    pub without_statuses: Vec<FilterValue>,
    /// Protections of media to count
    #[serde(deserialize_with = "one_or_many")]
    pub with_protections: Vec<FilterValue>,
    /// Protections of media to skip
    #[serde(deserialize_with = "one_or_many")]
    pub without_protections: Vec<FilterValue>,
    /// Searchabilities of media to count
    #[serde(deserialize_with = "one_or_many")]
    pub with_searchabilities: Vec<FilterValue>,
    /// Searchabilities of media to skip
    #[serde(deserialize_with = "one_or_many")]
    pub without_searchabilities: Vec<FilterValue>,
}

/// Filter over like events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(strip_option, into)]
#[serde(default)]
pub struct LikeFilter {
    /// Like ids
    #[serde(deserialize_with = "one_or_many")]
    pub ids: Vec<FilterValue>,
    /// Creation time upper bound
    pub created_before: Option<i64>,
    /// Creation time lower bound
    pub created_after: Option<i64>,
    /// Liked media
    #[serde(deserialize_with = "one_or_many")]
    pub medium_ids: Vec<FilterValue>,
    /// Liking users
    #[serde(deserialize_with = "one_or_many")]
    pub user_ids: Vec<FilterValue>,
}
