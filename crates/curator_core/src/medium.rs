//! The catalog item and its creation and update payloads.

use std::net::{IpAddr, Ipv4Addr};

use chrono::{DateTime, Utc};
use curator_error::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};

use crate::{GroupBits, Id, MediumProtection, MediumSearchability, MediumStatus};

/// Longest mime string the catalog stores.
pub const MAX_MIME_LENGTH: usize = 32;

/// Focus assigned when none is given.
pub const DEFAULT_FOCUS: f64 = 0.5;

/// Current Unix time in whole seconds.
pub fn now_timestamp() -> i64 {
    Utc::now().timestamp()
}

/// One catalog item.
///
/// `like_count` is aggregated at read time and `tags` is hydrated
/// separately by the tag store; neither is stored on the media row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medium {
    /// Unique identifier
    pub id: Id,
    /// Unix seconds when the medium was uploaded
    pub upload_time: i64,
    /// Unix seconds when the content was created
    pub creation_time: i64,
    /// Unix seconds of the last mutation
    pub touch_time: i64,
    /// Network origin of the upload
    pub uploader_remote_origin: IpAddr,
    /// Uploading user, if not anonymous
    pub uploader_id: Option<Id>,
    /// Owning user, if any
    pub owner_id: Option<Id>,
    /// Moderation status
    pub status: MediumStatus,
    /// Viewing protection
    pub protection: MediumProtection,
    /// Search visibility
    pub searchability: MediumSearchability,
    /// Group visibility mask
    pub group_bits: GroupBits,
    /// Content mime type
    pub mime: String,
    /// Content size in bytes
    pub size: i64,
    /// Generic descriptor slot, by convention width
    pub data1: i64,
    /// Generic descriptor slot, by convention height
    pub data2: i64,
    /// Generic descriptor slot
    pub data3: i64,
    /// Generic descriptor slot
    pub data4: i64,
    /// Generic descriptor slot
    pub data5: i64,
    /// Generic descriptor slot
    pub data6: i64,
    /// Focal ratio in [0, 1]
    pub focus: f64,
    /// Number of likes, aggregated at read time
    pub like_count: i64,
    /// Attached tags, sorted, once hydrated
    pub tags: Vec<String>,
}

impl Medium {
    /// Build a medium from a draft, filling defaults.
    ///
    /// Missing timestamps become `now`, a missing id is generated.
    ///
    /// # Errors
    ///
    /// Fails when the mime is too long or focus lies outside [0, 1].
    #[track_caller]
    pub fn from_draft(draft: MediumDraft, now: i64) -> Result<Self, ValidationError> {
        let mime = draft.mime.unwrap_or_default();
        validate_mime(&mime)?;
        let focus = draft.focus.unwrap_or(DEFAULT_FOCUS);
        validate_focus(focus)?;

        Ok(Self {
            id: draft.id.unwrap_or_else(Id::generate),
            upload_time: draft.upload_time.unwrap_or(now),
            creation_time: draft.creation_time.unwrap_or(now),
            touch_time: draft.touch_time.unwrap_or(now),
            uploader_remote_origin: draft
                .uploader_remote_origin
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            uploader_id: draft.uploader_id,
            owner_id: draft.owner_id,
            status: draft.status.unwrap_or_default(),
            protection: draft.protection.unwrap_or_default(),
            searchability: draft.searchability.unwrap_or_default(),
            group_bits: draft.group_bits.unwrap_or_default(),
            mime,
            size: draft.size.unwrap_or(0),
            data1: draft.data1.unwrap_or(0),
            data2: draft.data2.unwrap_or(0),
            data3: draft.data3.unwrap_or(0),
            data4: draft.data4.unwrap_or(0),
            data5: draft.data5.unwrap_or(0),
            data6: draft.data6.unwrap_or(0),
            focus,
            like_count: 0,
            tags: Vec::new(),
        })
    }

    /// Upload time as a UTC datetime.
    pub fn upload_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.upload_time, 0)
    }

    /// Creation time as a UTC datetime.
    pub fn creation_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.creation_time, 0)
    }

    /// Touch time as a UTC datetime.
    pub fn touch_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.touch_time, 0)
    }
}

/// Fields for a new medium; anything left unset takes its default.
///
/// # Examples
///
/// ```
/// use curator_core::{Medium, MediumDraft, MediumStatus};
///
/// let draft = MediumDraft::default()
///     .with_mime("image/png")
///     .with_status(MediumStatus::Copyright)
///     .with_data1(640);
/// let medium = Medium::from_draft(draft, 1_700_000_000).unwrap();
/// assert_eq!(medium.creation_time, 1_700_000_000);
/// assert_eq!(medium.focus, 0.5);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option, into)]
#[serde(default)]
pub struct MediumDraft {
    /// Explicit identifier, generated when absent
    pub id: Option<Id>,
    /// Upload time
    pub upload_time: Option<i64>,
    /// Creation time
    pub creation_time: Option<i64>,
    /// Touch time
    pub touch_time: Option<i64>,
    /// Upload origin, loopback when absent
    pub uploader_remote_origin: Option<IpAddr>,
    /// Uploading user
    pub uploader_id: Option<Id>,
    /// Owning user
    pub owner_id: Option<Id>,
    /// Moderation status
    pub status: Option<MediumStatus>,
    /// Viewing protection
    pub protection: Option<MediumProtection>,
    /// Search visibility
    pub searchability: Option<MediumSearchability>,
    /// Group mask
    pub group_bits: Option<GroupBits>,
    /// Mime type
    pub mime: Option<String>,
    /// Size in bytes
    pub size: Option<i64>,
    /// Descriptor slot 1
    pub data1: Option<i64>,
    /// Descriptor slot 2
    pub data2: Option<i64>,
    /// Descriptor slot 3
    pub data3: Option<i64>,
    /// Descriptor slot 4
    pub data4: Option<i64>,
    /// Descriptor slot 5
    pub data5: Option<i64>,
    /// Descriptor slot 6
    pub data6: Option<i64>,
    /// Focus ratio
    pub focus: Option<f64>,
}

/// Partial field set applied by an update.
///
/// `touch_time` is refreshed to the current time unless set explicitly.
/// The nullable user references use a nested option so that an update
/// can clear them.
#[derive(Debug, Clone, Default, PartialEq, derive_setters::Setters)]
#[setters(prefix = "with_", strip_option, into)]
pub struct MediumUpdate {
    /// New upload time
    pub upload_time: Option<i64>,
    /// New creation time
    pub creation_time: Option<i64>,
    /// Explicit touch time
    pub touch_time: Option<i64>,
    /// New upload origin
    pub uploader_remote_origin: Option<IpAddr>,
    /// New uploader, `Some(None)` clears it
    pub uploader_id: Option<Option<Id>>,
    /// New owner, `Some(None)` clears it
    pub owner_id: Option<Option<Id>>,
    /// New status
    pub status: Option<MediumStatus>,
    /// New protection
    pub protection: Option<MediumProtection>,
    /// New searchability
    pub searchability: Option<MediumSearchability>,
    /// New group mask
    pub group_bits: Option<GroupBits>,
    /// New mime
    pub mime: Option<String>,
    /// New size
    pub size: Option<i64>,
    /// New descriptor slot 1
    pub data1: Option<i64>,
    /// New descriptor slot 2
    pub data2: Option<i64>,
    /// New descriptor slot 3
    pub data3: Option<i64>,
    /// New descriptor slot 4
    pub data4: Option<i64>,
    /// New descriptor slot 5
    pub data5: Option<i64>,
    /// New descriptor slot 6
    pub data6: Option<i64>,
    /// New focus
    pub focus: Option<f64>,
}

impl MediumUpdate {
    /// Check bounded fields before touching the store.
    ///
    /// # Errors
    ///
    /// Fails when the mime is too long or focus lies outside [0, 1].
    #[track_caller]
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(mime) = &self.mime {
            validate_mime(mime)?;
        }
        if let Some(focus) = self.focus {
            validate_focus(focus)?;
        }
        Ok(())
    }
}

#[track_caller]
fn validate_mime(mime: &str) -> Result<(), ValidationError> {
    let actual = mime.chars().count();
    if actual > MAX_MIME_LENGTH {
        return Err(ValidationError::new(ValidationErrorKind::TooLong {
            field: "mime",
            max: MAX_MIME_LENGTH,
            actual,
        }));
    }
    Ok(())
}

#[track_caller]
fn validate_focus(focus: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&focus) {
        return Err(ValidationError::new(ValidationErrorKind::FocusOutOfRange(
            focus,
        )));
    }
    Ok(())
}
