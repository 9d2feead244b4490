//! Row types mapping catalog tables to entities.

use curator_core::{
    GroupBits, Id, Like, Medium, MediumProtection, MediumSearchability, MediumStatus,
    MediumUpdate, Moderation, Tag, TagCount, pack_address, unpack_address,
};
use curator_error::{CuratorResult, DatabaseError, DatabaseErrorKind, ValidationError};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable};

use crate::schema::{likes, media, tags};

/// A media row joined with its aggregated like count.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(table_name = media)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MediumRow {
    pub id: Vec<u8>,
    pub upload_time: i64,
    pub creation_time: i64,
    pub touch_time: i64,
    pub uploader_remote_origin: Vec<u8>,
    pub uploader_id: Option<Vec<u8>>,
    pub owner_id: Option<Vec<u8>>,
    pub status: i32,
    pub protection: i32,
    pub searchability: i32,
    pub group_bits: i32,
    pub mime: String,
    pub size: i64,
    pub data1: i64,
    pub data2: i64,
    pub data3: i64,
    pub data4: i64,
    pub data5: i64,
    pub data6: i64,
    pub focus: f64,
    #[diesel(sql_type = BigInt)]
    pub like_count: i64,
}

impl MediumRow {
    /// Decode into a medium with an empty tag list.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRow` if a stored value no longer decodes.
    pub fn into_medium(self) -> CuratorResult<Medium> {
        let group_bits = u16::try_from(self.group_bits)
            .map_err(|_| invalid_row(format!("group_bits {}", self.group_bits)))?;
        Ok(Medium {
            id: decode(Id::from_slice(&self.id))?,
            upload_time: self.upload_time,
            creation_time: self.creation_time,
            touch_time: self.touch_time,
            uploader_remote_origin: decode(unpack_address(&self.uploader_remote_origin))?,
            uploader_id: decode_optional_id(self.uploader_id.as_deref())?,
            owner_id: decode_optional_id(self.owner_id.as_deref())?,
            status: decode(MediumStatus::from_value(self.status.into()))?,
            protection: decode(MediumProtection::from_value(self.protection.into()))?,
            searchability: decode(MediumSearchability::from_value(self.searchability.into()))?,
            group_bits: GroupBits::new(group_bits),
            mime: self.mime,
            size: self.size,
            data1: self.data1,
            data2: self.data2,
            data3: self.data3,
            data4: self.data4,
            data5: self.data5,
            data6: self.data6,
            focus: self.focus,
            like_count: self.like_count,
            tags: Vec::new(),
        })
    }
}

/// Insertable media row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = media)]
pub struct NewMediumRow {
    pub id: Vec<u8>,
    pub upload_time: i64,
    pub creation_time: i64,
    pub touch_time: i64,
    pub uploader_remote_origin: Vec<u8>,
    pub uploader_id: Option<Vec<u8>>,
    pub owner_id: Option<Vec<u8>>,
    pub status: i32,
    pub protection: i32,
    pub searchability: i32,
    pub group_bits: i32,
    pub mime: String,
    pub size: i64,
    pub data1: i64,
    pub data2: i64,
    pub data3: i64,
    pub data4: i64,
    pub data5: i64,
    pub data6: i64,
    pub focus: f64,
}

impl From<&Medium> for NewMediumRow {
    fn from(medium: &Medium) -> Self {
        Self {
            id: medium.id.to_vec(),
            upload_time: medium.upload_time,
            creation_time: medium.creation_time,
            touch_time: medium.touch_time,
            uploader_remote_origin: pack_address(&medium.uploader_remote_origin),
            uploader_id: medium.uploader_id.map(|id| id.to_vec()),
            owner_id: medium.owner_id.map(|id| id.to_vec()),
            status: medium.status.code(),
            protection: medium.protection.code(),
            searchability: medium.searchability.code(),
            group_bits: i32::from(medium.group_bits.bits()),
            mime: medium.mime.clone(),
            size: medium.size,
            data1: medium.data1,
            data2: medium.data2,
            data3: medium.data3,
            data4: medium.data4,
            data5: medium.data5,
            data6: medium.data6,
            focus: medium.focus,
        }
    }
}

/// Partial media update; `None` leaves a column untouched.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = media)]
pub struct MediumChangeset {
    pub upload_time: Option<i64>,
    pub creation_time: Option<i64>,
    pub touch_time: Option<i64>,
    pub uploader_remote_origin: Option<Vec<u8>>,
    pub uploader_id: Option<Option<Vec<u8>>>,
    pub owner_id: Option<Option<Vec<u8>>>,
    pub status: Option<i32>,
    pub protection: Option<i32>,
    pub searchability: Option<i32>,
    pub group_bits: Option<i32>,
    pub mime: Option<String>,
    pub size: Option<i64>,
    pub data1: Option<i64>,
    pub data2: Option<i64>,
    pub data3: Option<i64>,
    pub data4: Option<i64>,
    pub data5: Option<i64>,
    pub data6: Option<i64>,
    pub focus: Option<f64>,
}

impl MediumChangeset {
    /// Translate an update, stamping `now` as touch time unless one is given.
    pub fn from_update(update: MediumUpdate, now: i64) -> Self {
        Self {
            upload_time: update.upload_time,
            creation_time: update.creation_time,
            touch_time: Some(update.touch_time.unwrap_or(now)),
            uploader_remote_origin: update.uploader_remote_origin.as_ref().map(pack_address),
            uploader_id: update.uploader_id.map(|id| id.map(|id| id.to_vec())),
            owner_id: update.owner_id.map(|id| id.map(|id| id.to_vec())),
            status: update.status.map(Moderation::code),
            protection: update.protection.map(Moderation::code),
            searchability: update.searchability.map(Moderation::code),
            group_bits: update.group_bits.map(|bits| i32::from(bits.bits())),
            mime: update.mime,
            size: update.size,
            data1: update.data1,
            data2: update.data2,
            data3: update.data3,
            data4: update.data4,
            data5: update.data5,
            data6: update.data6,
            focus: update.focus,
        }
    }
}

/// A tag association row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, QueryableByName, Selectable, Insertable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TagRow {
    pub medium_id: Vec<u8>,
    pub tag: String,
}

impl TagRow {
    /// Decode into a tag.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRow` if the medium id no longer decodes.
    pub fn into_tag(self) -> CuratorResult<Tag> {
        Ok(Tag::new(decode(Id::from_slice(&self.medium_id))?, self.tag))
    }
}

/// A tag with its frequency.
#[derive(Debug, Clone, QueryableByName)]
#[diesel(table_name = tags)]
pub struct TagCountRow {
    pub tag: String,
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

impl From<TagCountRow> for TagCount {
    fn from(row: TagCountRow) -> Self {
        TagCount::new(row.tag, row.count)
    }
}

/// A like row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, QueryableByName, Selectable, Insertable)]
#[diesel(table_name = likes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LikeRow {
    pub id: Vec<u8>,
    pub creation_time: i64,
    pub medium_id: Vec<u8>,
    pub user_id: Vec<u8>,
}

impl LikeRow {
    /// Decode into a like.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRow` if an id no longer decodes.
    pub fn into_like(self) -> CuratorResult<Like> {
        Ok(Like::new(
            decode(Id::from_slice(&self.id))?,
            self.creation_time,
            decode(Id::from_slice(&self.medium_id))?,
            decode(Id::from_slice(&self.user_id))?,
        ))
    }
}

impl From<&Like> for LikeRow {
    fn from(like: &Like) -> Self {
        Self {
            id: like.id().to_vec(),
            creation_time: *like.creation_time(),
            medium_id: like.medium_id().to_vec(),
            user_id: like.user_id().to_vec(),
        }
    }
}

/// Single aggregate produced by `COUNT`.
#[derive(Debug, QueryableByName)]
pub struct CountRow {
    #[diesel(sql_type = BigInt)]
    pub count: i64,
}

/// Single aggregate produced by `SUM`, null over zero rows.
#[derive(Debug, QueryableByName)]
pub struct SumRow {
    #[diesel(sql_type = Nullable<BigInt>)]
    pub total: Option<i64>,
}

fn invalid_row(message: String) -> DatabaseError {
    DatabaseError::new(DatabaseErrorKind::InvalidRow(message))
}

fn decode<T>(result: Result<T, ValidationError>) -> Result<T, DatabaseError> {
    result.map_err(|e| invalid_row(e.kind.to_string()))
}

fn decode_optional_id(bytes: Option<&[u8]>) -> Result<Option<Id>, DatabaseError> {
    match bytes {
        None | Some([]) => Ok(None),
        Some(bytes) => decode(Id::from_slice(bytes)).map(Some),
    }
}
